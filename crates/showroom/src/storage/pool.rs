//! Pooled `SQLite` connections.
//!
//! [`SqlitePool`] wraps an `r2d2` pool of `rusqlite` connections. Every
//! connection is set up the same way (busy timeout, WAL, relaxed sync), and
//! the schema is brought up to date before the first one is handed out.

use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use r2d2::{ManageConnection, Pool};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use tempfile::TempDir;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

use crate::error::{Error, Result};

use super::migrations;

/// File name of the database inside a temporary pool's directory.
const TEMPORARY_DATABASE_NAME: &str = "showroom.db";

/// A connection on loan from a [`SqlitePool`]. Dropping it hands the
/// connection back.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Errors raised while handing out pooled connections.
#[derive(Debug, Error)]
pub enum PoolError {
    /// No connection became available within the acquire timeout.
    #[error("connection pool exhausted: {0}")]
    Exhausted(#[source] r2d2::Error),

    /// The pool has been closed.
    #[error("connection pool is closed")]
    Closed,
}

/// Sizing and timing parameters for a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Number of connections kept open.
    pub size: usize,
    /// Longest time [`SqlitePool::acquire`] blocks before giving up.
    pub acquire_timeout: Duration,
    /// `SQLite` busy timeout applied to every connection.
    pub busy_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            size: 4,
            acquire_timeout: Duration::from_secs(5),
            busy_timeout: Duration::from_secs(1),
        }
    }
}

/// Snapshot of pool occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStatus {
    /// Connections the pool may hold.
    pub size: usize,
    /// Connections currently idle.
    pub idle: usize,
    /// Whether the pool has been closed.
    pub closed: bool,
}

/// Fixed-size pool of `SQLite` connections.
pub struct SqlitePool {
    // Declared before `scratch` so connections close before the directory goes.
    handle: RwLock<Option<Pool<SqliteConnectionManager>>>,
    path: PathBuf,
    config: PoolConfig,
    scratch: Option<TempDir>,
}

impl SqlitePool {
    /// Open a pool over the database file at `path`.
    ///
    /// Creates parent directories and the database file if needed, and
    /// brings the schema up to date before any connection is handed out.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is unusable, a directory cannot
    /// be created, the database cannot be opened, or schema setup fails.
    pub fn open(path: impl AsRef<Path>, config: PoolConfig) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening database pool at {}", path.display());
        let pool = Self::build(path, config, None)?;
        info!(
            size = config.size,
            "Database pool opened at {}",
            pool.path.display()
        );
        Ok(pool)
    }

    /// Open a pool over a fresh database in a private temporary directory.
    ///
    /// The database behaves like a file database in every respect, including
    /// concurrent writers, and is deleted when the pool is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is unusable or the temporary
    /// database cannot be created.
    pub fn open_temporary(config: PoolConfig) -> Result<Self> {
        let scratch = tempfile::Builder::new()
            .prefix("showroom-")
            .tempdir()
            .map_err(|source| Error::DirectoryCreate {
                path: std::env::temp_dir(),
                source,
            })?;
        let path = scratch.path().join(TEMPORARY_DATABASE_NAME);
        Self::build(path, config, Some(scratch))
    }

    fn build(path: PathBuf, config: PoolConfig, scratch: Option<TempDir>) -> Result<Self> {
        let max_size = u32::try_from(config.size)
            .ok()
            .filter(|size| *size > 0)
            .ok_or_else(|| Error::ConfigValidation {
                message: format!("pool size must be between 1 and {}", u32::MAX),
            })?;
        if config.acquire_timeout.is_zero() {
            return Err(Error::ConfigValidation {
                message: "acquire timeout must be greater than 0".to_string(),
            });
        }

        let busy_timeout = config.busy_timeout;
        let manager =
            SqliteConnectionManager::file(&path).with_init(move |conn: &mut Connection| {
                conn.busy_timeout(busy_timeout)?;
                conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")
            });

        // Schema setup gets a connection of its own so pooled ones never race it.
        let mut setup = manager.connect().map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;
        migrations::initialize_schema(&mut setup)?;
        drop(setup);

        let pool = Pool::builder()
            .max_size(max_size)
            .connection_timeout(config.acquire_timeout)
            .build(manager)
            .map_err(PoolError::Exhausted)?;

        Ok(Self {
            handle: RwLock::new(Some(pool)),
            path,
            config,
            scratch,
        })
    }

    /// Path of the database behind this pool.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the database is deleted along with the pool.
    #[must_use]
    pub fn is_temporary(&self) -> bool {
        self.scratch.is_some()
    }

    /// Take a connection, blocking until one is available.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Exhausted`] if none becomes available within the
    /// acquire timeout, [`PoolError::Closed`] if the pool was closed.
    pub fn acquire(&self) -> std::result::Result<PooledConnection, PoolError> {
        let pool = self.handle().ok_or(PoolError::Closed)?;
        let conn = pool.get().map_err(|err| {
            warn!(error = %err, "Connection pool exhausted");
            PoolError::Exhausted(err)
        })?;
        trace!(idle = pool.state().idle_connections, "Connection acquired");
        Ok(conn)
    }

    /// Close the pool.
    ///
    /// New acquisitions fail with [`PoolError::Closed`]. Idle connections are
    /// closed once no connection is still on loan; connections on loan are
    /// closed as they come back.
    pub fn close(&self) {
        let released = self
            .handle
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if released.is_some() {
            info!("Database pool closed");
        }
    }

    /// Current occupancy of the pool.
    #[must_use]
    pub fn status(&self) -> PoolStatus {
        match self.handle() {
            Some(pool) => PoolStatus {
                size: self.config.size,
                idle: pool.state().idle_connections as usize,
                closed: false,
            },
            None => PoolStatus {
                size: self.config.size,
                idle: 0,
                closed: true,
            },
        }
    }

    fn handle(&self) -> Option<Pool<SqliteConnectionManager>> {
        self.handle
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl std::fmt::Debug for SqlitePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqlitePool")
            .field("path", &self.path)
            .field("config", &self.config)
            .field("temporary", &self.is_temporary())
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}
