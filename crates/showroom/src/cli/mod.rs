//! Command-line interface for the showroom.
//!
//! This module provides the CLI structure for the `showroom` binary and the
//! rendering of controller responses to the terminal.

mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{CarCommand, ConfigCommand, OutputFormat, StatusCommand};
pub use render::render;

use crate::logging::Verbosity;

/// showroom - Manage a car showroom catalogue
///
/// Adds, lists, updates and removes cars in a pooled `SQLite` store.
#[derive(Debug, Parser)]
#[command(name = "showroom")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Work with the car catalogue
    #[command(subcommand)]
    Car(CarCommand),

    /// Show database and pool status
    Status(StatusCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_name() {
        assert_eq!(Cli::command().get_name(), "showroom");
    }

    #[test]
    fn test_parse_car_list() {
        let cli = Cli::try_parse_from(["showroom", "car", "list", "--format", "json"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Car(CarCommand::List {
                format: OutputFormat::Json
            })
        ));
    }

    #[test]
    fn test_parse_car_add() {
        let cli = Cli::try_parse_from([
            "showroom",
            "car",
            "add",
            "--name",
            "Twingo",
            "--description",
            "City car",
        ])
        .unwrap();
        match cli.command {
            Command::Car(CarCommand::Add { name, description }) => {
                assert_eq!(name, "Twingo");
                assert_eq!(description, "City car");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_car_delete_requires_numeric_id() {
        assert!(Cli::try_parse_from(["showroom", "car", "delete", "abc"]).is_err());
        let cli = Cli::try_parse_from(["showroom", "car", "delete", "3"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Car(CarCommand::Delete { id: 3 })
        ));
    }

    #[test]
    fn test_parse_status() {
        let cli = Cli::try_parse_from(["showroom", "status", "--json"]).unwrap();
        assert!(matches!(cli.command, Command::Status(StatusCommand { json: true })));
    }

    #[test]
    fn test_parse_with_config() {
        let cli =
            Cli::try_parse_from(["showroom", "-c", "/custom/config.toml", "status"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_verbosity_flags() {
        let cli = Cli::try_parse_from(["showroom", "-vv", "status"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Trace);

        let cli = Cli::try_parse_from(["showroom", "-q", "status"]).unwrap();
        assert_eq!(cli.verbosity(), Verbosity::Quiet);
    }
}
