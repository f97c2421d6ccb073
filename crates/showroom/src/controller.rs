//! Front controller: routes requests to commands by name.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::command::{
    AddCarCommand, Command, CommandName, CommandRequest, CommandResponse, DeleteCarCommand, Model,
    PagePath, ShowCarCommand, ShowCarsCommand, ShowResultPageCommand, UpdateCarCommand,
};
use crate::error::{Error, Result};
use crate::repository::CarRepository;

/// Routes [`CommandRequest`]s to registered [`Command`]s.
pub struct Controller {
    commands: BTreeMap<CommandName, Box<dyn Command>>,
}

impl Controller {
    /// A controller with no commands registered.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            commands: BTreeMap::new(),
        }
    }

    /// A controller with every showroom command registered over `repository`.
    #[must_use]
    pub fn new(repository: Arc<dyn CarRepository>) -> Self {
        let mut controller = Self::empty();
        controller.register(CommandName::ShowResultPage, ShowResultPageCommand);
        controller.register(
            CommandName::ShowCars,
            ShowCarsCommand::new(Arc::clone(&repository)),
        );
        controller.register(
            CommandName::ShowCar,
            ShowCarCommand::new(Arc::clone(&repository)),
        );
        controller.register(
            CommandName::AddCar,
            AddCarCommand::new(Arc::clone(&repository)),
        );
        controller.register(
            CommandName::UpdateCar,
            UpdateCarCommand::new(Arc::clone(&repository)),
        );
        controller.register(CommandName::DeleteCar, DeleteCarCommand::new(repository));
        controller
    }

    /// Register `command` under `name`, replacing any previous one.
    pub fn register(&mut self, name: CommandName, command: impl Command + 'static) {
        self.commands.insert(name, Box::new(command));
    }

    /// Names of the registered commands.
    pub fn command_names(&self) -> impl Iterator<Item = CommandName> + '_ {
        self.commands.keys().copied()
    }

    /// Run the command named by `request`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCommand`] if no command is registered under the
    /// requested name, or whatever error the command itself produces.
    pub fn dispatch(&self, request: &CommandRequest) -> Result<CommandResponse> {
        let name: CommandName = request.command().parse()?;
        let command = self
            .commands
            .get(&name)
            .ok_or_else(|| Error::UnknownCommand {
                name: request.command().to_string(),
            })?;
        debug!(command = %name, "Dispatching command");
        command.execute(request)
    }

    /// Run the command named by `request`, turning any failure into a
    /// forward to the error page.
    #[must_use]
    pub fn handle(&self, request: &CommandRequest) -> CommandResponse {
        self.dispatch(request).unwrap_or_else(|err| {
            if !logged_at_source(&err) {
                if err.is_client_error() {
                    warn!(command = request.command(), "{err}");
                } else {
                    error!(command = request.command(), "{err}");
                }
            }
            CommandResponse::forward(PagePath::Error).with_model(Model::Failure(err.to_string()))
        })
    }
}

/// Repository failures are logged by the repository when it raises them.
fn logged_at_source(err: &Error) -> bool {
    matches!(err, Error::Storage(_))
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("commands", &self.commands.keys().collect::<Vec<_>>())
            .finish()
    }
}
