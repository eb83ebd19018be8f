//! Mutating commands: mkdir, rename, rm, cp, mv

use crate::app::{App, Interrupt};
use filedeck_cli::output::Status;
use filedeck_core::Result;
use filedeck_core::entry::FileEntry;
use std::path::Path;

fn done(app: &App, entry: &FileEntry, message: String) -> Result<()> {
    if app.json {
        return app.print_json(entry);
    }
    Status::success(&message);
    Ok(())
}

/// Run mkdir command
pub async fn mkdir(app: &App, parent: &Path, name: &str) -> Result<()> {
    let entry = app.service.create_folder(parent, name).await?;
    let message = format!("Created folder {}", entry.path.display());
    done(app, &entry, message)
}

/// Run rename command
pub async fn rename(app: &App, path: &Path, new_name: &str) -> Result<()> {
    let entry = app.service.rename(path, new_name).await?;
    let message = format!("Renamed to {}", entry.name);
    done(app, &entry, message)
}

/// Run rm command
pub async fn remove(app: &App, path: &Path) -> Result<()> {
    let interrupt = Interrupt::watch();
    app.with_spinner(
        &format!("Deleting {}...", path.display()),
        app.service.delete(path, interrupt.token()),
    )
    .await?;

    if app.json {
        return app.print_json(&serde_json::json!({ "deleted": path }));
    }
    Status::success(&format!("Deleted {}", path.display()));
    Ok(())
}

/// Run cp command
pub async fn copy(app: &App, src: &Path, dest_dir: &Path, resolve: bool) -> Result<()> {
    let interrupt = Interrupt::watch();
    let message = format!("Copying {}...", src.display());
    let entry = if resolve {
        app.with_spinner(
            &message,
            app.service.copy_resolved(src, dest_dir, interrupt.token()),
        )
        .await?
    } else {
        app.with_spinner(&message, app.service.copy(src, dest_dir, interrupt.token()))
            .await?
    };
    let message = format!("Copied to {}", entry.path.display());
    done(app, &entry, message)
}

/// Run mv command
pub async fn move_to(app: &App, src: &Path, dest_dir: &Path) -> Result<()> {
    let interrupt = Interrupt::watch();
    let entry = app
        .with_spinner(
            &format!("Moving {}...", src.display()),
            app.service.move_to(src, dest_dir, interrupt.token()),
        )
        .await?;
    let message = format!("Moved to {}", entry.path.display());
    done(app, &entry, message)
}
