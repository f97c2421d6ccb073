//! `SQLite` implementation of [`CarRepository`].

use std::sync::Arc;

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, error};

use crate::car::Car;
use crate::storage::SqlitePool;

use super::{CarRepository, Result, StorageCause, StorageError};

const SQL_ADD_CAR: &str = "insert into car(car_name, car_description) values (?,?)";
const SQL_DELETE_CAR: &str = "delete from car where car_id = ?";
const SQL_UPDATE_CAR: &str = "update car set car_name = ?, car_description = ? where car_id = ?";
const SQL_GET_ALL_CARS: &str = "select car_id, car_name, car_description from car";
const SQL_FIND_CAR_BY_ID: &str =
    "select car_id, car_name, car_description from car where car_id = ?";

/// Car repository issuing one parameterized statement per call through a
/// shared [`SqlitePool`].
///
/// Each call borrows a connection for its whole duration and returns it on
/// every exit path. Nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct SqlCarRepository {
    pool: Arc<SqlitePool>,
}

impl SqlCarRepository {
    /// Create a repository over `pool`. The pool's lifecycle stays with the
    /// caller.
    #[must_use]
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }

    /// Run `statement` on a pooled connection.
    fn run<T>(
        &self,
        statement: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> std::result::Result<T, StorageCause> {
        let conn = self.pool.acquire()?;
        Ok(statement(&conn)?)
    }

    /// Map a row laid out as (id, name, description).
    fn row_to_car(row: &Row<'_>) -> rusqlite::Result<Car> {
        Ok(Car::with_id(
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    }
}

/// Log a failed operation and build the error handed to the caller.
fn failure(message: String, cause: Option<StorageCause>) -> StorageError {
    match cause {
        Some(cause) => {
            error!(error = %cause, "{message}");
            StorageError::with_cause(message, cause)
        }
        None => {
            error!("{message}");
            StorageError::new(message)
        }
    }
}

fn describe_add(car: &Car) -> String {
    format!(
        "Cannot add new car, carName: {} carDescription: {}",
        car.name(),
        car.description()
    )
}

fn describe_update(car: &Car) -> String {
    let id = car
        .id()
        .map_or_else(|| "unassigned".to_string(), |id| id.to_string());
    format!(
        "Cannot update car by id, carId: {id} carName: {} carDescription: {}",
        car.name(),
        car.description()
    )
}

impl CarRepository for SqlCarRepository {
    fn add_car(&self, car: Car) -> Result<Car> {
        let inserted = self
            .run(|conn| {
                let mut stmt = conn.prepare_cached(SQL_ADD_CAR)?;
                let rows = stmt.execute(params![car.name(), car.description()])?;
                Ok((rows > 0).then(|| conn.last_insert_rowid()))
            })
            .map_err(|cause| failure(describe_add(&car), Some(cause)))?;

        let Some(id) = inserted else {
            return Err(failure(describe_add(&car), None));
        };
        debug!(car_id = id, "Car added");
        let (name, description) = car.into_parts();
        Ok(Car::with_id(id, name, description))
    }

    fn delete_car(&self, car_id: i64) -> Result<bool> {
        let rows = self
            .run(|conn| conn.prepare_cached(SQL_DELETE_CAR)?.execute([car_id]))
            .map_err(|cause| {
                failure(format!("Cannot delete car by id carId: {car_id}"), Some(cause))
            })?;
        debug!(car_id, removed = rows > 0, "Car delete executed");
        Ok(rows > 0)
    }

    fn update_car(&self, car: Car) -> Result<Car> {
        let Some(car_id) = car.id() else {
            return Err(failure(describe_update(&car), None));
        };

        let rows = self
            .run(|conn| {
                conn.prepare_cached(SQL_UPDATE_CAR)?
                    .execute(params![car.name(), car.description(), car_id])
            })
            .map_err(|cause| failure(describe_update(&car), Some(cause)))?;

        if rows == 0 {
            return Err(failure(describe_update(&car), None));
        }
        debug!(car_id, "Car updated");
        Ok(car)
    }

    fn get_cars(&self) -> Result<Vec<Car>> {
        self.run(|conn| {
            let mut stmt = conn.prepare_cached(SQL_GET_ALL_CARS)?;
            let cars = stmt
                .query_map([], Self::row_to_car)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(cars)
        })
        .map_err(|cause| failure("Cannot get all cars".to_string(), Some(cause)))
    }

    fn find_car_by_id(&self, car_id: i64) -> Result<Option<Car>> {
        let found = self
            .run(|conn| {
                conn.prepare_cached(SQL_FIND_CAR_BY_ID)?
                    .query_row([car_id], Self::row_to_car)
                    .optional()
            })
            .map_err(|cause| {
                failure(format!("Cannot find car by id, carId: {car_id}"), Some(cause))
            })?;

        if found.is_none() {
            debug!(car_id, "No car with this id");
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::thread;
    use std::time::Duration;

    use super::*;
    use crate::storage::{PoolConfig, PoolError};

    fn test_config(size: usize) -> PoolConfig {
        PoolConfig {
            size,
            acquire_timeout: Duration::from_millis(250),
            busy_timeout: Duration::from_millis(100),
        }
    }

    fn create_test_repository() -> (Arc<SqlitePool>, SqlCarRepository) {
        let pool = Arc::new(SqlitePool::open_temporary(test_config(2)).unwrap());
        let repository = SqlCarRepository::new(Arc::clone(&pool));
        (pool, repository)
    }

    fn drop_car_table(pool: &SqlitePool) {
        pool.acquire()
            .unwrap()
            .execute_batch("DROP TABLE car")
            .unwrap();
    }

    #[test]
    fn test_add_assigns_id() {
        let (_pool, repo) = create_test_repository();
        let added = repo.add_car(Car::new("Mustang", "V8 coupe")).unwrap();

        assert!(added.id().is_some());
        assert_eq!(added.name(), "Mustang");
        assert_eq!(added.description(), "V8 coupe");
    }

    #[test]
    fn test_add_ignores_caller_id() {
        let (_pool, repo) = create_test_repository();
        let first = repo.add_car(Car::new("A", "a")).unwrap();
        let second = repo.add_car(Car::with_id(first.id().unwrap(), "B", "b")).unwrap();

        assert_ne!(first.id(), second.id());
        assert_eq!(repo.get_cars().unwrap().len(), 2);
    }

    #[test]
    fn test_add_then_find() {
        let (_pool, repo) = create_test_repository();
        let pairs = [
            ("Golf", "Hatchback"),
            ("", ""),
            ("Škoda Octavia", "Estate, 2.0 TDI"),
            ("Quote's", "semi;colon -- dash"),
        ];

        for (name, description) in pairs {
            let added = repo.add_car(Car::new(name, description)).unwrap();
            let found = repo.find_car_by_id(added.id().unwrap()).unwrap().unwrap();
            assert_eq!(found.name(), name);
            assert_eq!(found.description(), description);
            assert_eq!(found, added);
        }
    }

    #[test]
    fn test_find_unknown_id_is_absent() {
        let (_pool, repo) = create_test_repository();
        assert!(repo.find_car_by_id(424_242).unwrap().is_none());
        assert!(repo.find_car_by_id(-1).unwrap().is_none());
    }

    #[test]
    fn test_delete_returns_true_exactly_once() {
        let (_pool, repo) = create_test_repository();
        let id = repo.add_car(Car::new("Delorean", "DMC-12")).unwrap().id().unwrap();

        assert!(repo.delete_car(id).unwrap());
        assert!(!repo.delete_car(id).unwrap());
        assert!(repo.find_car_by_id(id).unwrap().is_none());
    }

    #[test]
    fn test_delete_unknown_id_is_false() {
        let (_pool, repo) = create_test_repository();
        assert!(!repo.delete_car(99_999).unwrap());
    }

    #[test]
    fn test_update_existing() {
        let (_pool, repo) = create_test_repository();
        let id = repo.add_car(Car::new("Civic", "Old")).unwrap().id().unwrap();

        let changed = Car::with_id(id, "Civic Type R", "New");
        let returned = repo.update_car(changed.clone()).unwrap();
        assert_eq!(returned, changed);

        let found = repo.find_car_by_id(id).unwrap().unwrap();
        assert_eq!(found.name(), "Civic Type R");
        assert_eq!(found.description(), "New");
    }

    #[test]
    fn test_update_missing_id_fails() {
        let (_pool, repo) = create_test_repository();
        let err = repo.update_car(Car::with_id(777, "Ghost", "Nope")).unwrap_err();

        assert!(err.cause().is_none());
        assert!(err.message().contains("carId: 777"));
        assert!(err.message().contains("carName: Ghost"));
    }

    #[test]
    fn test_update_unsaved_car_fails() {
        let (_pool, repo) = create_test_repository();
        let err = repo.update_car(Car::new("Unsaved", "Car")).unwrap_err();
        assert!(err.message().contains("carId: unassigned"));
    }

    #[test]
    fn test_get_cars_empty() {
        let (_pool, repo) = create_test_repository();
        assert!(repo.get_cars().unwrap().is_empty());
    }

    #[test]
    fn test_get_cars_contains_all_added() {
        let (_pool, repo) = create_test_repository();
        let added: HashSet<Car> = (0..5)
            .map(|i| repo.add_car(Car::new(format!("Car {i}"), "desc")).unwrap())
            .collect();

        let listed: HashSet<Car> = repo.get_cars().unwrap().into_iter().collect();
        assert!(listed.len() >= added.len());
        assert!(added.is_subset(&listed));
    }

    #[test]
    fn test_operations_return_connection_to_pool() {
        let (pool, repo) = create_test_repository();
        let id = repo.add_car(Car::new("A", "a")).unwrap().id().unwrap();
        repo.find_car_by_id(id).unwrap();
        repo.get_cars().unwrap();
        let _ = repo.update_car(Car::with_id(12_345, "missing", "row"));
        repo.delete_car(id).unwrap();

        assert_eq!(pool.status().idle, pool.status().size);
    }

    #[test]
    fn test_exhausted_pool_surfaces_as_storage_error() {
        let pool = Arc::new(SqlitePool::open_temporary(test_config(1)).unwrap());
        let repo = SqlCarRepository::new(Arc::clone(&pool));
        let _held = pool.acquire().unwrap();

        let errors = [
            repo.add_car(Car::new("a", "b")).unwrap_err(),
            repo.delete_car(1).unwrap_err(),
            repo.update_car(Car::with_id(1, "a", "b")).unwrap_err(),
            repo.get_cars().unwrap_err(),
            repo.find_car_by_id(1).unwrap_err(),
        ];
        for err in errors {
            assert!(err.is_pool_failure(), "expected pool failure: {err}");
            assert!(matches!(
                err.cause(),
                Some(StorageCause::Pool(PoolError::Exhausted(_)))
            ));
        }
    }

    #[test]
    fn test_closed_pool_surfaces_as_storage_error() {
        let (pool, repo) = create_test_repository();
        pool.close();

        let err = repo.get_cars().unwrap_err();
        assert!(matches!(
            err.cause(),
            Some(StorageCause::Pool(PoolError::Closed))
        ));
    }

    #[test]
    fn test_execution_failure_is_not_reported_as_absence() {
        let (pool, repo) = create_test_repository();
        drop_car_table(&pool);

        let err = repo.find_car_by_id(1).unwrap_err();
        assert!(matches!(err.cause(), Some(StorageCause::Sql(_))));
        assert_eq!(err.message(), "Cannot find car by id, carId: 1");

        let err = repo.delete_car(1).unwrap_err();
        assert!(matches!(err.cause(), Some(StorageCause::Sql(_))));
        assert_eq!(err.message(), "Cannot delete car by id carId: 1");
    }

    #[test]
    fn test_execution_failure_on_writes_and_list() {
        let (pool, repo) = create_test_repository();
        drop_car_table(&pool);

        let err = repo.add_car(Car::new("Name", "Desc")).unwrap_err();
        assert_eq!(
            err.message(),
            "Cannot add new car, carName: Name carDescription: Desc"
        );
        assert!(matches!(err.cause(), Some(StorageCause::Sql(_))));

        let err = repo.update_car(Car::with_id(5, "Name", "Desc")).unwrap_err();
        assert_eq!(
            err.message(),
            "Cannot update car by id, carId: 5 carName: Name carDescription: Desc"
        );

        let err = repo.get_cars().unwrap_err();
        assert_eq!(err.message(), "Cannot get all cars");
    }

    #[test]
    fn test_concurrent_writes_and_reads_on_temporary_database() {
        let config = PoolConfig {
            size: 4,
            acquire_timeout: Duration::from_secs(10),
            busy_timeout: Duration::from_secs(10),
        };
        let pool = Arc::new(SqlitePool::open_temporary(config).unwrap());
        let repo = SqlCarRepository::new(Arc::clone(&pool));

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let repo = repo.clone();
                thread::spawn(move || {
                    for i in 0..100 {
                        repo.add_car(Car::new(format!("t{t}-{i}"), "x")).unwrap();
                        assert!(!repo.get_cars().unwrap().is_empty());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(repo.get_cars().unwrap().len(), 400);
        assert_eq!(pool.status().idle, 4);
    }

    #[test]
    fn test_concurrent_adds_on_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let config = PoolConfig {
            size: 3,
            acquire_timeout: Duration::from_secs(10),
            busy_timeout: Duration::from_secs(10),
        };
        let pool = Arc::new(SqlitePool::open(dir.path().join("cars.db"), config).unwrap());
        let repo = SqlCarRepository::new(Arc::clone(&pool));

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let repo = repo.clone();
                thread::spawn(move || {
                    (0..10)
                        .map(|i| {
                            repo.add_car(Car::new(format!("t{t}-{i}"), "threaded"))
                                .unwrap()
                                .id()
                                .unwrap()
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let ids: HashSet<i64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        assert_eq!(ids.len(), 40);
        assert_eq!(repo.get_cars().unwrap().len(), 40);

    }
}
