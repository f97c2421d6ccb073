//! `SQLite` schema definitions for the showroom store.

/// SQL statement to create the car table.
pub const CREATE_CAR_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS car (
    car_id INTEGER PRIMARY KEY AUTOINCREMENT,
    car_name TEXT NOT NULL,
    car_description TEXT NOT NULL
)
";

/// SQL statement to create an index on `car_name` for catalogue lookups.
pub const CREATE_NAME_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_car_name ON car(car_name)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_CAR_TABLE,
    CREATE_NAME_INDEX,
];
