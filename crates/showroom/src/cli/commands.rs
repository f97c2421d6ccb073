//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::command::{CommandName, CommandRequest};

/// Car catalogue commands.
#[derive(Debug, Subcommand)]
pub enum CarCommand {
    /// List all cars
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show a single car
    Show {
        /// Car id
        id: i64,

        /// Output format
        #[arg(short, long, value_enum, default_value = "plain")]
        format: OutputFormat,
    },

    /// Add a new car
    Add {
        /// Car name
        #[arg(short, long)]
        name: String,

        /// Car description
        #[arg(short, long)]
        description: String,
    },

    /// Replace the name and description of a car
    Update {
        /// Car id
        id: i64,

        /// New name
        #[arg(short, long)]
        name: String,

        /// New description
        #[arg(short, long)]
        description: String,
    },

    /// Delete a car
    Delete {
        /// Car id
        id: i64,
    },
}

impl CarCommand {
    /// Build the controller request for this command.
    #[must_use]
    pub fn to_request(&self) -> CommandRequest {
        match self {
            Self::List { .. } => CommandRequest::new(CommandName::ShowCars.as_str()),
            Self::Show { id, .. } => {
                CommandRequest::new(CommandName::ShowCar.as_str()).with_param("id", id.to_string())
            }
            Self::Add { name, description } => CommandRequest::new(CommandName::AddCar.as_str())
                .with_param("name", name.as_str())
                .with_param("description", description.as_str()),
            Self::Update {
                id,
                name,
                description,
            } => CommandRequest::new(CommandName::UpdateCar.as_str())
                .with_param("id", id.to_string())
                .with_param("name", name.as_str())
                .with_param("description", description.as_str()),
            Self::Delete { id } => CommandRequest::new(CommandName::DeleteCar.as_str())
                .with_param("id", id.to_string()),
        }
    }

    /// Output format requested for this command.
    #[must_use]
    pub fn format(&self) -> OutputFormat {
        match self {
            Self::List { format } | Self::Show { format, .. } => *format,
            Self::Add { .. } | Self::Update { .. } | Self::Delete { .. } => OutputFormat::Plain,
        }
    }
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}
