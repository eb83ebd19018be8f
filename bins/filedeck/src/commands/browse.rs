//! Read-only commands: ls, search, info, cat, open, root

use crate::app::{App, Interrupt};
use filedeck_cli::output::{self, Status};
use filedeck_cli::progress;
use filedeck_core::Result;
use filedeck_core::entry::{FileEntry, breadcrumbs};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct EntryDetails<'a> {
    #[serde(flatten)]
    entry: &'a FileEntry,
    mime_type: &'static str,
    favorite: bool,
}

/// Run ls command
pub async fn list(app: &App, dir: &Path) -> Result<()> {
    let entries = app.service.list_dir(dir).await?;
    if app.json {
        return app.print_json(&entries);
    }

    let favorites: HashSet<PathBuf> = app
        .service
        .favorites()
        .await?
        .into_iter()
        .map(|f| f.path)
        .collect();
    output::print_breadcrumbs(&breadcrumbs(&app.root, dir));
    output::print_entries(&entries, |p| favorites.contains(p));
    Ok(())
}

/// Run search command
pub async fn search(app: &App, root: &Path, query: &str, limit: Option<usize>) -> Result<()> {
    let interrupt = Interrupt::watch();
    let pb = progress::spinner(&format!("Searching for '{}'...", query));
    let result = app.service.search(root, query, interrupt.token()).await;
    progress::clear(&pb);

    let mut results = result?;
    if let Some(limit) = limit {
        results.truncate(limit);
    }

    if app.json {
        return app.print_json(&results);
    }
    if results.is_empty() {
        Status::info(&format!("No matches for '{}'", query));
        return Ok(());
    }
    for entry in &results {
        let location = entry
            .path
            .strip_prefix(root)
            .unwrap_or(&entry.path)
            .display()
            .to_string();
        let marker = if entry.is_dir { "d" } else { "-" };
        println!("{} {}", marker.dimmed(), location);
    }
    println!(
        "{}",
        output::format_count(results.len(), "match", "matches").dimmed()
    );
    Ok(())
}

/// Run info command
pub async fn info(app: &App, path: &Path) -> Result<()> {
    let entry = app.service.stat(path).await?;
    let favorite = app.service.is_favorite(path).await?;

    if app.json {
        return app.print_json(&EntryDetails {
            entry: &entry,
            mime_type: entry.mime_type(),
            favorite,
        });
    }
    output::print_entry_details(&entry, favorite);
    Ok(())
}

/// Run cat command
pub async fn cat(app: &App, path: &Path) -> Result<()> {
    let text = app.service.read_text(path).await?;
    if app.json {
        return app.print_json(&serde_json::json!({
            "path": path,
            "content": text,
        }));
    }
    print!("{}", text);
    if !text.ends_with('\n') {
        println!();
    }
    Ok(())
}

/// Run open command
pub async fn open(app: &App, path: &Path) -> Result<()> {
    let entry = app.service.open(path).await?;
    if app.json {
        return app.print_json(&EntryDetails {
            entry: &entry,
            mime_type: entry.mime_type(),
            favorite: app.service.is_favorite(path).await?,
        });
    }
    Status::success(&format!("Opened {} ({})", entry.name, entry.mime_type()));
    Ok(())
}

/// Run root command
pub fn root(app: &App) -> Result<()> {
    if app.json {
        return app.print_json(&serde_json::json!({
            "root": app.root,
            "data_dir": app.data_dir,
        }));
    }
    println!("{}", app.root.display());
    println!("{} {}", "records:".dimmed(), app.data_dir.display());
    Ok(())
}
