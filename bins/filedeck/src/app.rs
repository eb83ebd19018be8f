//! Shared state for one invocation

use anyhow::Context;
use filedeck_cli::{output::Status, progress};
use filedeck_core::config::{Config, default_data_dir, expand_path, resolve_storage_root};
use filedeck_core::prelude::{
    CancelToken, Error, FileManager, FileService, LocalFs, ManagerOptions, Result, Stores,
};
use serde::Serialize;
use std::future::Future;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use tokio::task::JoinHandle;

/// The service plus how to present its results
pub struct App {
    pub service: FileService<LocalFs>,
    pub root: PathBuf,
    pub data_dir: PathBuf,
    pub json: bool,
}

impl App {
    /// Resolve the storage root, open the stores and build the service
    pub fn build(config: &Config, json: bool) -> anyhow::Result<Self> {
        let schema = &config.schema;
        let root = resolve_storage_root(schema).context("Failed to resolve the storage root")?;
        let data_dir = match &schema.store.data_dir {
            Some(raw) => expand_path(raw)?,
            None => default_data_dir(),
        };
        let stores = Stores::open(&data_dir, schema.recent.limit)
            .with_context(|| format!("Failed to open records in {}", data_dir.display()))?;

        let manager = FileManager::new(LocalFs::new(), stores, ManagerOptions::from(schema));
        tracing::debug!(
            root = %root.display(),
            data_dir = %data_dir.display(),
            config = ?config.path,
            "Service ready"
        );

        Ok(Self {
            service: FileService::new(manager),
            root,
            data_dir,
            json,
        })
    }

    /// Absolute paths are used as given; relative ones are joined to `cwd`
    pub fn resolve(&self, cwd: &Path, raw: Option<&Path>) -> PathBuf {
        match raw {
            Some(path) if path.is_absolute() => normalize(path),
            Some(path) => normalize(&cwd.join(path)),
            None => cwd.to_path_buf(),
        }
    }

    /// Print `value` as pretty JSON on stdout
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        write_json(&mut std::io::stdout().lock(), value)
    }

    /// Report a failed command in the selected output format
    pub fn report(&self, err: &Error) {
        tracing::warn!(code = %err.code, error = %err.user_message(), "Command failed");
        // A JSON report that cannot be written falls back to stderr
        if !self.json
            || self
                .print_json(&serde_json::json!({ "error": err.to_report() }))
                .is_err()
        {
            Status::failure(err);
        }
    }

    /// Run `work` behind a spinner that is cleared when it finishes
    pub async fn with_spinner<T>(
        &self,
        message: &str,
        work: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        let pb = progress::spinner(message);
        let result = work.await;
        progress::clear(&pb);
        result
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| Error::internal(format!("Failed to encode output: {}", e)))?;
    writeln!(out, "{}", text)
        .map_err(|e| Error::io(format!("Failed to write output: {}", e)).with_source(e))
}

/// Cancels a token when Ctrl-C is pressed while the guard is alive
pub struct Interrupt {
    token: CancelToken,
    watcher: JoinHandle<()>,
}

impl Interrupt {
    pub fn watch() -> Self {
        let token = CancelToken::new();
        let watcher = tokio::spawn({
            let token = token.clone();
            async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::info!("Interrupt received, cancelling");
                    token.cancel();
                }
            }
        });
        Self { token, watcher }
    }

    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }
}

impl Drop for Interrupt {
    fn drop(&mut self) {
        self.watcher.abort();
    }
}

/// Lexically resolve `.` and `..` without touching the disk
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `..` above the root stays at the root
                if !out.pop() && !out.has_root() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
