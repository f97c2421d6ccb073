//! The command layer.
//!
//! Each user-facing action is a [`Command`] that turns a
//! [`CommandRequest`] into a [`CommandResponse`] naming the page to show.
//! The [`Controller`](crate::controller::Controller) picks the command by
//! name.

mod car;
mod request;
mod response;

use std::str::FromStr;

use crate::error::{Error, Result};

pub use car::{
    AddCarCommand, DeleteCarCommand, ShowCarCommand, ShowCarsCommand, UpdateCarCommand,
};
pub use request::CommandRequest;
pub use response::{CommandResponse, Model, PagePath, ResponseKind};

/// A single user-facing action.
pub trait Command: Send + Sync {
    /// Handle `request`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is malformed or the storage layer
    /// fails.
    fn execute(&self, request: &CommandRequest) -> Result<CommandResponse>;
}

/// Names under which commands are registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommandName {
    /// Show the result page.
    ShowResultPage,
    /// List all cars.
    ShowCars,
    /// Show one car.
    ShowCar,
    /// Add a car.
    AddCar,
    /// Update a car.
    UpdateCar,
    /// Delete a car.
    DeleteCar,
}

impl CommandName {
    /// Every command name.
    pub const ALL: [Self; 6] = [
        Self::ShowResultPage,
        Self::ShowCars,
        Self::ShowCar,
        Self::AddCar,
        Self::UpdateCar,
        Self::DeleteCar,
    ];

    /// The wire name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ShowResultPage => "show_result_page",
            Self::ShowCars => "show_cars",
            Self::ShowCar => "show_car",
            Self::AddCar => "add_car",
            Self::UpdateCar => "update_car",
            Self::DeleteCar => "delete_car",
        }
    }
}

impl std::fmt::Display for CommandName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownCommand {
                name: s.to_string(),
            })
    }
}

/// Forwards to the result page.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowResultPageCommand;

impl Command for ShowResultPageCommand {
    fn execute(&self, _request: &CommandRequest) -> Result<CommandResponse> {
        Ok(CommandResponse::forward(PagePath::Result))
    }
}
