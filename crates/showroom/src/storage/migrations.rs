//! Versioned schema initialisation.
//!
//! The schema version lives in `PRAGMA user_version`. Each migration step is
//! applied inside its own transaction together with the version bump, so a
//! failed step leaves the database at the previous version.

use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::{Error, Result};

use super::schema::SCHEMA_STATEMENTS;

/// The schema version this build expects.
pub const CURRENT_VERSION: i32 = 1;

/// Migration steps, indexed by the version they produce.
const MIGRATIONS: &[(i32, &[&str])] = &[(1, SCHEMA_STATEMENTS)];

/// Bring the database schema up to [`CURRENT_VERSION`].
///
/// # Errors
///
/// Returns an error if the stored version is newer than this build
/// understands, or if any migration statement fails.
pub fn initialize_schema(conn: &mut Connection) -> Result<()> {
    let version = schema_version(conn)?;
    if version > CURRENT_VERSION {
        return Err(Error::DatabaseMigration {
            message: format!(
                "database schema version {version} is newer than supported version {CURRENT_VERSION}"
            ),
        });
    }

    for &(target, statements) in MIGRATIONS.iter().filter(|(v, _)| *v > version) {
        apply(conn, target, statements)?;
    }

    if version < CURRENT_VERSION {
        info!(from = version, to = CURRENT_VERSION, "Database schema migrated");
    }
    Ok(())
}

/// Read the schema version; a fresh database reports 0.
///
/// # Errors
///
/// Returns an error if the pragma cannot be read.
pub fn schema_version(conn: &Connection) -> Result<i32> {
    let version = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    Ok(version)
}

fn apply(conn: &mut Connection, target: i32, statements: &[&str]) -> Result<()> {
    debug!(version = target, "Applying schema migration");
    let tx = conn.transaction()?;
    for statement in statements {
        tx.execute_batch(statement)
            .map_err(|e| Error::DatabaseMigration {
                message: format!("migration to version {target} failed: {e}"),
            })?;
    }
    tx.execute_batch(&format!("PRAGMA user_version = {target}"))?;
    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_db() -> Connection {
        Connection::open_in_memory().expect("failed to create in-memory database")
    }

    fn table_exists(conn: &Connection, name: &str) -> bool {
        let count: i32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
                [name],
                |row| row.get(0),
            )
            .unwrap();
        count == 1
    }

    #[test]
    fn test_initialize_schema_creates_car_table() {
        let mut conn = create_test_db();
        initialize_schema(&mut conn).expect("failed to initialize schema");
        assert!(table_exists(&conn, "car"));
    }

    #[test]
    fn test_fresh_database_version_is_zero() {
        let conn = create_test_db();
        assert_eq!(schema_version(&conn).unwrap(), 0);
    }

    #[test]
    fn test_initialize_schema_sets_version() {
        let mut conn = create_test_db();
        initialize_schema(&mut conn).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn test_initialize_schema_idempotent() {
        let mut conn = create_test_db();
        initialize_schema(&mut conn).expect("first init failed");
        conn.execute(
            "INSERT INTO car (car_name, car_description) VALUES ('a', 'b')",
            [],
        )
        .unwrap();
        initialize_schema(&mut conn).expect("second init failed");

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM car", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_newer_database_is_rejected() {
        let mut conn = create_test_db();
        conn.execute_batch(&format!("PRAGMA user_version = {}", CURRENT_VERSION + 1))
            .unwrap();

        let err = initialize_schema(&mut conn).unwrap_err();
        assert!(matches!(err, Error::DatabaseMigration { .. }));
        assert!(err.to_string().contains("newer than supported"));
    }

    #[test]
    fn test_migrations_are_ordered() {
        let versions: Vec<i32> = MIGRATIONS.iter().map(|(v, _)| *v).collect();
        let mut sorted = versions.clone();
        sorted.sort_unstable();
        assert_eq!(versions, sorted);
        assert_eq!(versions.last().copied(), Some(CURRENT_VERSION));
    }

    #[test]
    fn test_name_index_created() {
        let mut conn = create_test_db();
        initialize_schema(&mut conn).unwrap();

        let indexes: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='index' AND tbl_name='car'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(std::result::Result::ok)
            .collect();
        assert!(indexes.iter().any(|n| n == "idx_car_name"));
    }
}
