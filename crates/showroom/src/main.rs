//! `showroom` - CLI for the car showroom catalogue.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use showroom::cli::{self, CarCommand, Cli, Command, ConfigCommand};
use showroom::{init_logging, CarRepository, Config, Controller, SqlCarRepository, SqlitePool};

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("failed to load configuration")?;

    match cli.command {
        Command::Car(car_cmd) => handle_car(&config, &car_cmd),
        Command::Status(status_cmd) => handle_status(&config, status_cmd.json),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn open_pool(config: &Config) -> anyhow::Result<Arc<SqlitePool>> {
    let path = config.database_path();
    let pool = SqlitePool::open(&path, config.pool_config())
        .with_context(|| format!("failed to open database at {}", path.display()))?;
    Ok(Arc::new(pool))
}

fn handle_car(config: &Config, cmd: &CarCommand) -> anyhow::Result<ExitCode> {
    let pool = open_pool(config)?;
    let controller = Controller::new(Arc::new(SqlCarRepository::new(Arc::clone(&pool))));

    let response = controller.handle(&cmd.to_request());
    let mut stdout = io::stdout().lock();
    cli::render(&response, cmd.format(), &mut stdout)?;
    stdout.flush()?;
    pool.close();

    Ok(if response.is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn handle_status(config: &Config, json: bool) -> anyhow::Result<ExitCode> {
    let pool = open_pool(config)?;
    let repository = SqlCarRepository::new(Arc::clone(&pool));
    let cars = repository.get_cars()?.len();
    let status = pool.status();

    if json {
        let status = serde_json::json!({
            "database_path": pool.path(),
            "pool_size": status.size,
            "pool_idle": status.idle,
            "cars": cars,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("showroom status");
        println!("---------------");
        println!("Database:      {}", pool.path().display());
        println!("Pool:          {} idle of {}", status.idle, status.size);
        println!("Cars:          {cars}");
    }
    pool.close();
    Ok(ExitCode::SUCCESS)
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<ExitCode> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                let pool = config.pool_config();
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Database]");
                println!("  Path:               {}", config.database_path().display());
                println!("  Pool size:          {}", pool.size);
                println!("  Acquire timeout:    {:?}", pool.acquire_timeout);
                println!("  Busy timeout:       {:?}", pool.busy_timeout);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            if let Err(e) = Config::load_from(Some(path)) {
                println!("Configuration error: {e}");
                return Ok(ExitCode::FAILURE);
            }
            println!("Configuration is valid.");
        }
    }
    Ok(ExitCode::SUCCESS)
}
