//! Commands operating on the car catalogue.

use std::sync::Arc;

use crate::car::Car;
use crate::error::Result;
use crate::repository::CarRepository;

use super::{Command, CommandRequest, CommandResponse, Model, PagePath};

/// Lists every car.
#[derive(Clone)]
pub struct ShowCarsCommand {
    repository: Arc<dyn CarRepository>,
}

/// Shows one car by `id`.
#[derive(Clone)]
pub struct ShowCarCommand {
    repository: Arc<dyn CarRepository>,
}

/// Adds a car from `name` and `description`.
#[derive(Clone)]
pub struct AddCarCommand {
    repository: Arc<dyn CarRepository>,
}

/// Replaces the `name` and `description` of car `id`.
#[derive(Clone)]
pub struct UpdateCarCommand {
    repository: Arc<dyn CarRepository>,
}

/// Deletes car `id`.
#[derive(Clone)]
pub struct DeleteCarCommand {
    repository: Arc<dyn CarRepository>,
}

macro_rules! repository_command {
    ($($command:ident),+ $(,)?) => {$(
        impl $command {
            /// Create the command over `repository`.
            #[must_use]
            pub fn new(repository: Arc<dyn CarRepository>) -> Self {
                Self { repository }
            }
        }

        impl std::fmt::Debug for $command {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($command)).finish_non_exhaustive()
            }
        }
    )+};
}

repository_command!(
    ShowCarsCommand,
    ShowCarCommand,
    AddCarCommand,
    UpdateCarCommand,
    DeleteCarCommand,
);

impl Command for ShowCarsCommand {
    fn execute(&self, _request: &CommandRequest) -> Result<CommandResponse> {
        let cars = self.repository.get_cars()?;
        Ok(CommandResponse::forward(PagePath::Cars).with_model(Model::Cars(cars)))
    }
}

impl Command for ShowCarCommand {
    fn execute(&self, request: &CommandRequest) -> Result<CommandResponse> {
        let id = request.id_param("id")?;
        let response = match self.repository.find_car_by_id(id)? {
            Some(car) => CommandResponse::forward(PagePath::Car).with_model(Model::Car(car)),
            None => CommandResponse::forward(PagePath::Result)
                .with_model(Model::Message(format!("No car with id {id}"))),
        };
        Ok(response)
    }
}

impl Command for AddCarCommand {
    fn execute(&self, request: &CommandRequest) -> Result<CommandResponse> {
        let car = Car::new(
            request.required_param("name")?,
            request.required_param("description")?,
        );
        let added = self.repository.add_car(car)?;
        Ok(CommandResponse::redirect(PagePath::Car).with_model(Model::Car(added)))
    }
}

impl Command for UpdateCarCommand {
    fn execute(&self, request: &CommandRequest) -> Result<CommandResponse> {
        let car = Car::builder()
            .id(request.id_param("id")?)
            .name(request.required_param("name")?)
            .description(request.required_param("description")?)
            .build();
        let updated = self.repository.update_car(car)?;
        Ok(CommandResponse::redirect(PagePath::Car).with_model(Model::Car(updated)))
    }
}

impl Command for DeleteCarCommand {
    fn execute(&self, request: &CommandRequest) -> Result<CommandResponse> {
        let id = request.id_param("id")?;
        let removed = self.repository.delete_car(id)?;
        Ok(CommandResponse::forward(PagePath::Result).with_model(Model::Deleted { id, removed }))
    }
}
