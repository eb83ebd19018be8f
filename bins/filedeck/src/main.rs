//! Filedeck - a terminal file manager
//!
//! Lists and searches a storage root, creates, renames, copies, moves and
//! deletes entries, and keeps recent files and favorites in step with those
//! changes.

use clap::Parser;
use filedeck_cli::output::Status;
use filedeck_core::config::Config;
use filedeck_core::error::exit_codes;
use filedeck_telemetry::{TelemetryConfig, level_for_verbosity};
use std::process::ExitCode;

mod app;
mod args;
mod commands;
mod shell;

use app::App;
use args::{Cli, Command};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let telemetry = TelemetryConfig {
        log_level: level_for_verbosity(cli.verbose).to_string(),
        json: cli.json,
        ..TelemetryConfig::default()
    };
    if let Err(e) = filedeck_telemetry::init_with_config(telemetry) {
        Status::warning(&format!("Logging unavailable: {}", e));
    }

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            report_setup_error(&e, cli.json);
            return exit(exit_codes::CONFIG_ERROR);
        }
    };

    let app = match App::build(&config, cli.json) {
        Ok(app) => app,
        Err(e) => {
            Status::error(&format!("{:#}", e));
            return exit(exit_codes::FAILURE);
        }
    };

    let result = match cli.command {
        Command::Shell => shell::run(&app).await,
        command => commands::run(&app, &app.root, command).await,
    };

    match result {
        Ok(()) => exit(exit_codes::SUCCESS),
        Err(e) => {
            app.report(&e);
            exit(exit_codes::FAILURE)
        }
    }
}

fn report_setup_error(err: &filedeck_core::Error, json: bool) {
    if json {
        println!("{}", serde_json::json!({ "error": err.to_report() }));
    } else {
        Status::failure(err);
    }
}

fn exit(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
