//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use chrono::{DateTime, Local, Utc};
use console::{Alignment, pad_str};
use filedeck_core::entry::FileEntry;
use filedeck_core::store::{FavoriteEntry, RecentEntry};
use filedeck_core::Error;
use owo_colors::OwoColorize;
use std::path::Path;

/// Width of the name column in entry tables
const NAME_WIDTH: usize = 36;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".blue(), message);
    }

    /// Print a typed error with its code and suggestion
    pub fn failure(err: &Error) {
        eprintln!("{} {} {}", "✗".red(), err.user_message(), format!("[{}]", err.code).dimmed());
        if let Some(context) = &err.context {
            eprintln!("  {}", context.dimmed());
        }
        if let Some(suggestion) = &err.suggestion {
            eprintln!("  {} {}", "→".cyan(), suggestion);
        }
    }
}

/// Format a file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Format a timestamp in local time, `dd/mm/yyyy hh:mm`
pub fn format_timestamp(timestamp: Option<DateTime<Utc>>) -> String {
    timestamp
        .map(|t| t.with_timezone(&Local).format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// One table row: marker, name, size and modification time
pub fn entry_row(entry: &FileEntry, favorite: bool) -> String {
    let marker = if favorite { "★" } else { " " };
    let display = if entry.is_dir {
        format!("{}/", entry.name)
    } else {
        entry.name.clone()
    };
    let name = pad_str(&display, NAME_WIDTH, Alignment::Left, Some("…"));
    let size = if entry.is_dir {
        "-".to_string()
    } else {
        format_size(entry.size)
    };
    let size = pad_str(&size, 10, Alignment::Right, None);
    let name = if entry.is_dir {
        name.blue().bold().to_string()
    } else {
        name.to_string()
    };
    format!(
        "{} {} {}  {}",
        marker.yellow(),
        name,
        size,
        format_timestamp(entry.modified).dimmed()
    )
}

/// Print a directory listing; `is_favorite` marks starred rows
pub fn print_entries(entries: &[FileEntry], is_favorite: impl Fn(&Path) -> bool) {
    if entries.is_empty() {
        println!("{}", "(empty)".dimmed());
        return;
    }
    for entry in entries {
        println!("{}", entry_row(entry, is_favorite(&entry.path)));
    }
    println!(
        "{}",
        format_count(entries.len(), "entry", "entries").dimmed()
    );
}

/// Print detailed information about one entry
pub fn print_entry_details(entry: &FileEntry, favorite: bool) {
    let rows = [
        ("Name", entry.name.clone()),
        ("Path", entry.path.display().to_string()),
        ("Type", entry.kind.to_string()),
        ("MIME", entry.mime_type().to_string()),
        ("Size", format_size(entry.size)),
        ("Modified", format_timestamp(entry.modified)),
        ("Favorite", if favorite { "yes" } else { "no" }.to_string()),
    ];
    for (label, value) in rows {
        println!("{:>9}  {}", label.bold(), value);
    }
}

/// Print recent-file records, most recent first
pub fn print_recent(records: &[RecentEntry]) {
    if records.is_empty() {
        println!("{}", "No recent files".dimmed());
        return;
    }
    for record in records {
        println!(
            "{}  {}  {}",
            format_timestamp(Some(record.last_accessed)).dimmed(),
            pad_str(&record.name, NAME_WIDTH, Alignment::Left, Some("…")),
            record.path.display().dimmed()
        );
    }
}

/// Print favorite records
pub fn print_favorites(records: &[FavoriteEntry]) {
    if records.is_empty() {
        println!("{}", "No favorites".dimmed());
        return;
    }
    for record in records {
        println!(
            "{} {}  {}",
            "★".yellow(),
            pad_str(&record.name, NAME_WIDTH, Alignment::Left, Some("…")),
            record.path.display().dimmed()
        );
    }
}

/// Print a breadcrumb trail as `Storage › docs › 2024`
pub fn print_breadcrumbs(crumbs: &[(String, std::path::PathBuf)]) {
    let trail: Vec<&str> = crumbs.iter().map(|(label, _)| label.as_str()).collect();
    println!("{}", trail.join(" › ").bold());
}
