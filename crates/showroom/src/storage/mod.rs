//! Storage plumbing for the showroom.
//!
//! This module owns the `SQLite` side of persistence: the schema, its
//! migrations, and the `r2d2` connection pool the repository borrows from.

pub mod migrations;
mod pool;
pub mod schema;

pub use pool::{PoolConfig, PoolError, PoolStatus, PooledConnection, SqlitePool};
