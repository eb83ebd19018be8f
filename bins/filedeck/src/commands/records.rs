//! Recent files and favorites

use crate::app::App;
use crate::args::FavAction;
use filedeck_cli::output::{self, Status};
use filedeck_core::Result;
use std::path::Path;

/// Run recent command
pub async fn recent(app: &App, clear: bool) -> Result<()> {
    if clear {
        app.service.clear_recent().await?;
        if app.json {
            return app.print_json(&serde_json::json!({ "cleared": true }));
        }
        Status::success("Cleared recent files");
        return Ok(());
    }

    let records = app.service.recent().await?;
    if app.json {
        return app.print_json(&records);
    }
    output::print_recent(&records);
    Ok(())
}

/// Run fav command
pub async fn favorites(app: &App, action: FavAction, cwd: &Path) -> Result<()> {
    match action {
        FavAction::List => {
            let records = app.service.favorites().await?;
            if app.json {
                return app.print_json(&records);
            }
            output::print_favorites(&records);
        }
        FavAction::Add { path } => {
            let path = app.resolve(cwd, Some(path.as_path()));
            let record = app.service.add_favorite(&path).await?;
            if app.json {
                return app.print_json(&record);
            }
            Status::success(&format!("Added {} to favorites", record.name));
        }
        FavAction::Remove { path } => {
            let path = app.resolve(cwd, Some(path.as_path()));
            let removed = app.service.remove_favorite(&path).await?;
            if app.json {
                return app.print_json(&serde_json::json!({ "path": path, "removed": removed }));
            }
            if removed {
                Status::success(&format!("Removed {} from favorites", path.display()));
            } else {
                Status::info(&format!("{} was not a favorite", path.display()));
            }
        }
        FavAction::Toggle { path } => {
            let path = app.resolve(cwd, Some(path.as_path()));
            let favorite = app.service.toggle_favorite(&path).await?;
            if app.json {
                return app.print_json(&serde_json::json!({ "path": path, "favorite": favorite }));
            }
            if favorite {
                Status::success(&format!("Added {} to favorites", path.display()));
            } else {
                Status::success(&format!("Removed {} from favorites", path.display()));
            }
        }
    }
    Ok(())
}
