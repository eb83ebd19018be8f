//! Interactive session
//!
//! Keeps a working directory and the staged copy/move between commands.
//! Every one-shot command is available, plus `copy`, `move`, `paste`,
//! `cancel`, `status`, `cd`, `stats` and `exit`.

use crate::app::{App, Interrupt};
use crate::args::Command;
use crate::commands;
use clap::{Parser, Subcommand};
use filedeck_cli::output::Status;
use filedeck_core::clipboard::PendingOperation;
use filedeck_core::entry::breadcrumbs;
use filedeck_core::{Error, Result};
use filedeck_telemetry::{Outcome, metrics};
use owo_colors::OwoColorize;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand)]
enum ShellCommand {
    /// Stage an entry to be copied by the next paste
    Copy { src: PathBuf },

    /// Stage an entry to be moved by the next paste
    Move { src: PathBuf },

    /// Run the staged copy or move into DIR (defaults to the current directory)
    Paste { dir: Option<PathBuf> },

    /// Drop the staged operation
    Cancel,

    /// Show the staged operation
    Status,

    /// Change the current directory (defaults to the storage root)
    Cd { dir: Option<PathBuf> },

    /// Print operation metrics for this session
    Stats,

    /// Leave the shell
    #[command(alias = "quit")]
    Exit,

    #[command(flatten)]
    Core(Command),
}

enum Flow {
    Continue,
    Exit,
}

/// Run the read-eval-print loop until `exit` or end of input
pub async fn run(app: &App) -> Result<()> {
    let mut cwd = app.root.clone();

    loop {
        prompt(app, &cwd);
        let Some(line) = read_line().await? else {
            break;
        };
        let tokens = match split_line(&line) {
            Ok(tokens) if tokens.is_empty() => continue,
            Ok(tokens) => tokens,
            Err(message) => {
                Status::error(message);
                continue;
            }
        };
        let parsed = match ShellLine::try_parse_from(&tokens) {
            Ok(parsed) => parsed,
            Err(e) => {
                if e.print().is_err() {
                    Status::error(&e.to_string());
                }
                continue;
            }
        };

        match execute(app, &mut cwd, parsed.command).await {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => break,
            Err(e) => app.report(&e),
        }
    }

    tracing::info!(metrics = %metrics().export_json(), "Shell session finished");
    Ok(())
}

async fn execute(app: &App, cwd: &mut PathBuf, command: ShellCommand) -> Result<Flow> {
    match command {
        ShellCommand::Core(command) => commands::run(app, cwd, command).await?,
        ShellCommand::Copy { src } => {
            let src = app.resolve(cwd, Some(src.as_path()));
            app.service.stat(&src).await?;
            app.service.start_copy(&src);
            Status::info(&format!("Copy staged: {} (paste to finish)", src.display()));
        }
        ShellCommand::Move { src } => {
            let src = app.resolve(cwd, Some(src.as_path()));
            app.service.stat(&src).await?;
            app.service.start_move(&src);
            Status::info(&format!("Move staged: {} (paste to finish)", src.display()));
        }
        ShellCommand::Paste { dir } => {
            let dest = app.resolve(cwd, dir.as_deref());
            let interrupt = Interrupt::watch();
            let result = app
                .with_spinner("Pasting...", app.service.paste(&dest, interrupt.token()))
                .await;
            metrics().record_operation("paste", Outcome::from(&result));
            let entry = result?;
            if app.json {
                app.print_json(&entry)?;
            } else {
                Status::success(&format!("Pasted {}", entry.path.display()));
            }
        }
        ShellCommand::Cancel => {
            app.service.cancel_pending();
            Status::info("Nothing staged");
        }
        ShellCommand::Status => print_pending(app, &app.service.pending())?,
        ShellCommand::Cd { dir } => {
            let target = match dir {
                Some(dir) => app.resolve(cwd, Some(dir.as_path())),
                None => app.root.clone(),
            };
            let entry = app.service.stat(&target).await?;
            if !entry.is_dir {
                return Err(Error::not_a_directory(&target));
            }
            *cwd = target;
        }
        ShellCommand::Stats => app.print_json(&metrics().snapshot())?,
        ShellCommand::Exit => return Ok(Flow::Exit),
    }
    Ok(Flow::Continue)
}

fn print_pending(app: &App, pending: &PendingOperation) -> Result<()> {
    if app.json {
        return app.print_json(pending);
    }
    match pending.source() {
        Some(source) => Status::info(&format!("{} staged: {}", pending.label(), source.display())),
        None => Status::info("Nothing staged"),
    }
    Ok(())
}

fn prompt(app: &App, cwd: &Path) {
    let trail: Vec<String> = breadcrumbs(&app.root, cwd)
        .into_iter()
        .map(|(label, _)| label)
        .collect();
    let location = if cwd.starts_with(&app.root) {
        trail.join("/")
    } else {
        cwd.display().to_string()
    };
    eprint!("{}{} ", location.cyan(), ">".bold());
    let _ = std::io::stderr().flush();
}

/// Next line of input, `None` at end of input
async fn read_line() -> Result<Option<String>> {
    let read = tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        std::io::stdin().read_line(&mut line).map(|n| (n, line))
    })
    .await
    .map_err(|e| Error::internal(format!("Input task failed: {}", e)))?;

    match read {
        Ok((0, _)) => Ok(None),
        Ok((_, line)) => Ok(Some(line)),
        Err(e) => Err(Error::io(format!("Failed to read input: {}", e)).with_source(e)),
    }
}

/// Split a line into words; single or double quotes group words
fn split_line(line: &str) -> std::result::Result<Vec<String>, &'static str> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut in_token = false;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_token = true;
            }
            None if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if quote.is_some() {
        return Err("Unterminated quote");
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}
