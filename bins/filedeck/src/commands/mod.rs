//! CLI command implementations

pub mod browse;
pub mod edit;
pub mod records;

use crate::app::App;
use crate::args::Command;
use filedeck_core::{Error, ErrorCode, Result};
use filedeck_telemetry::{Outcome, Timer, metrics};
use std::path::Path;

/// Run one command with paths resolved against `cwd`
pub async fn run(app: &App, cwd: &Path, command: Command) -> Result<()> {
    let name = command.name();
    let timer = Timer::start(format!("cmd.{}", name));
    let result = dispatch(app, cwd, command).await;
    timer.stop();
    metrics().record_operation(name, Outcome::from(&result));
    result
}

async fn dispatch(app: &App, cwd: &Path, command: Command) -> Result<()> {
    let path = |raw: &Path| app.resolve(cwd, Some(raw));

    match command {
        Command::Ls { dir } => browse::list(app, &app.resolve(cwd, dir.as_deref())).await,
        Command::Search { query, dir, limit } => {
            browse::search(app, &app.resolve(cwd, dir.as_deref()), &query, limit).await
        }
        Command::Info { path: p } => browse::info(app, &path(&p)).await,
        Command::Cat { path: p } => browse::cat(app, &path(&p)).await,
        Command::Open { path: p } => browse::open(app, &path(&p)).await,
        Command::Root => browse::root(app),

        Command::Mkdir { parent, name } => edit::mkdir(app, &path(&parent), &name).await,
        Command::Rename { path: p, new_name } => edit::rename(app, &path(&p), &new_name).await,
        Command::Rm { path: p } => edit::remove(app, &path(&p)).await,
        Command::Cp { src, dest_dir, resolve } => {
            edit::copy(app, &path(&src), &path(&dest_dir), resolve).await
        }
        Command::Mv { src, dest_dir } => edit::move_to(app, &path(&src), &path(&dest_dir)).await,

        Command::Recent { clear } => records::recent(app, clear).await,
        Command::Fav { action } => records::favorites(app, action, cwd).await,

        Command::Shell => Err(Error::new(
            ErrorCode::ValidationError,
            "Already inside a shell session",
        )),
    }
}
