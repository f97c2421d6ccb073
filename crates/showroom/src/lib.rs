//! `showroom` - a car showroom catalogue
//!
//! This library provides the car entity, a storage-agnostic repository
//! contract with its pooled `SQLite` implementation, and a small command
//! layer that maps named requests onto repository calls.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod car;
pub mod cli;
pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod repository;
pub mod storage;

pub use car::{Car, CarBuilder};
pub use config::Config;
pub use controller::Controller;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use repository::{CarRepository, SqlCarRepository, StorageError};
pub use storage::{PoolConfig, SqlitePool};
