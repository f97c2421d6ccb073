//! Persistence contract for [`Car`] values.
//!
//! [`CarRepository`] is storage-agnostic. Absence is a normal outcome
//! (`delete_car` returning `false`, `find_car_by_id` returning `None`); every
//! failure of the store itself is reported as a [`StorageError`].

mod sql;

use thiserror::Error;

use crate::car::Car;
use crate::storage::PoolError;

pub use sql::SqlCarRepository;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// The lower-level failure behind a [`StorageError`].
#[derive(Debug, Error)]
pub enum StorageCause {
    /// The statement could not be prepared or executed.
    #[error(transparent)]
    Sql(#[from] rusqlite::Error),

    /// No connection could be obtained.
    #[error(transparent)]
    Pool(#[from] PoolError),
}

/// A repository operation failed.
///
/// The message names the operation and its key arguments; the cause, when
/// present, is the underlying store or pool failure.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct StorageError {
    message: String,
    #[source]
    source: Option<StorageCause>,
}

impl StorageError {
    /// A failure with no lower-level cause, such as a statement that
    /// affected no rows.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// A failure caused by the store or the pool.
    #[must_use]
    pub fn with_cause(message: impl Into<String>, cause: impl Into<StorageCause>) -> Self {
        Self {
            message: message.into(),
            source: Some(cause.into()),
        }
    }

    /// Description of the attempted operation.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The underlying failure, if any.
    #[must_use]
    pub fn cause(&self) -> Option<&StorageCause> {
        self.source.as_ref()
    }

    /// Whether the operation failed because the pool had no connection to
    /// spare or had been closed.
    #[must_use]
    pub fn is_pool_failure(&self) -> bool {
        matches!(self.source, Some(StorageCause::Pool(_)))
    }
}

/// Storage-agnostic CRUD operations on cars.
pub trait CarRepository: Send + Sync {
    /// Persist a new car, returning it with its store-assigned id.
    ///
    /// Any id already carried by `car` is ignored.
    ///
    /// # Errors
    ///
    /// Fails if the insert affects no rows or the store is unreachable.
    fn add_car(&self, car: Car) -> Result<Car>;

    /// Remove a car, returning whether a row was actually deleted.
    ///
    /// # Errors
    ///
    /// Fails only if the store cannot execute the delete.
    fn delete_car(&self, car_id: i64) -> Result<bool>;

    /// Overwrite the stored name and description of `car`, returning the
    /// input unchanged.
    ///
    /// # Errors
    ///
    /// Fails if `car` has no id, if no row has that id, or if the store is
    /// unreachable.
    fn update_car(&self, car: Car) -> Result<Car>;

    /// All stored cars, in no particular order.
    ///
    /// # Errors
    ///
    /// Fails only if the store cannot execute the query.
    fn get_cars(&self) -> Result<Vec<Car>>;

    /// Look a car up by id.
    ///
    /// # Errors
    ///
    /// Fails only if the store cannot execute the query.
    fn find_car_by_id(&self, car_id: i64) -> Result<Option<Car>>;
}
