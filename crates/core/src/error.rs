//! Error handling for file operations
//!
//! Every filesystem call is converted into a typed [`Error`] at the point of
//! failure. Errors carry:
//! - An [`ErrorCode`] for programmatic handling
//! - A short human-readable message for the UI collaborator
//! - Optional context and recovery suggestion
//! - A serializable report form

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // General errors (1xxx)
    Unknown = 1000,
    Internal = 1001,
    Cancelled = 1002,

    // Filesystem errors (2xxx)
    IoFailure = 2000,
    NotFound = 2001,
    AccessDenied = 2002,
    NotADirectory = 2003,
    AlreadyExists = 2004,
    ParentNotWritable = 2005,
    RecursiveTarget = 2006,

    // Configuration errors (3xxx)
    ConfigError = 3000,
    ConfigNotFound = 3001,
    ConfigParseError = 3002,

    // Store errors (4xxx)
    StoreError = 4000,
    StoreCorrupted = 4001,

    // Validation errors (6xxx)
    ValidationError = 6000,
    InvalidName = 6001,
    NothingStaged = 6002,
    FileTooLarge = 6003,
    NotText = 6004,
}

impl ErrorCode {
    /// Get the numeric code
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a human-readable category
    pub fn category(&self) -> &'static str {
        match self.code() / 1000 {
            1 => "General",
            2 => "Filesystem",
            3 => "Configuration",
            4 => "Store",
            6 => "Validation",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Main error type with rich context
#[derive(Error, Debug)]
pub struct Error {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional context
    pub context: Option<String>,
    /// Recovery suggestion
    pub suggestion: Option<String>,
    /// Source error
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ctx) = &self.context {
            write!(f, "\n  Context: {}", ctx)?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n  Suggestion: {}", suggestion)?;
        }
        Ok(())
    }
}

impl Error {
    /// Create a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: None,
            suggestion: None,
            source: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Add a recovery suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Whether this error has the given code
    pub fn is(&self, code: ErrorCode) -> bool {
        self.code == code
    }

    /// Short message suitable for a status bar or snackbar
    pub fn user_message(&self) -> &str {
        &self.message
    }

    /// Convert to a serializable report
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code,
            code_str: self.code.to_string(),
            category: self.code.category().to_string(),
            message: self.message.clone(),
            context: self.context.clone(),
            suggestion: self.suggestion.clone(),
            source: self.source.as_ref().map(|e| e.to_string()),
        }
    }

    // Convenience constructors

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::IoFailure, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }

    pub fn cancelled() -> Self {
        Self::new(ErrorCode::Cancelled, "Operation cancelled")
    }

    pub fn not_found(path: impl AsRef<Path>) -> Self {
        Self::new(
            ErrorCode::NotFound,
            format!("File does not exist: {}", path.as_ref().display()),
        )
    }

    pub fn not_a_directory(path: impl AsRef<Path>) -> Self {
        Self::new(
            ErrorCode::NotADirectory,
            format!("Not a valid directory: {}", path.as_ref().display()),
        )
    }

    pub fn access_denied(path: impl AsRef<Path>) -> Self {
        Self::new(
            ErrorCode::AccessDenied,
            format!("Cannot access: {}", path.as_ref().display()),
        )
        .with_suggestion("Check that you have read permissions for this location")
    }

    pub fn already_exists(path: impl AsRef<Path>) -> Self {
        let name = path
            .as_ref()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.as_ref().display().to_string());
        Self::new(
            ErrorCode::AlreadyExists,
            format!("An entry named '{}' already exists", name),
        )
    }

    pub fn parent_not_writable(path: impl AsRef<Path>) -> Self {
        Self::new(
            ErrorCode::ParentNotWritable,
            format!("Cannot write to directory: {}", path.as_ref().display()),
        )
        .with_suggestion("Choose a location you have write permissions for")
    }

    pub fn recursive_target(source: impl AsRef<Path>) -> Self {
        Self::new(
            ErrorCode::RecursiveTarget,
            format!(
                "Cannot place '{}' inside itself",
                source.as_ref().display()
            ),
        )
    }

    pub fn invalid_name(name: &str) -> Self {
        Self::new(ErrorCode::InvalidName, format!("Invalid file name: '{}'", name))
            .with_suggestion("Names must not be blank or contain / \\ : * ? \" < > |")
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StoreError, message)
    }

    /// Convert an I/O error raised while touching `path`
    pub fn from_io(err: std::io::Error, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let base = match err.kind() {
            std::io::ErrorKind::NotFound => Self::not_found(path),
            std::io::ErrorKind::PermissionDenied => Self::access_denied(path),
            std::io::ErrorKind::AlreadyExists => Self::already_exists(path),
            std::io::ErrorKind::NotADirectory => Self::not_a_directory(path),
            _ => Self::io(format!("I/O failure on {}: {}", path.display(), err)),
        };
        base.with_source(err)
    }
}

/// Serializable error report for logging and API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub code_str: String,
    pub category: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes for CLI commands
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const FAILURE: i32 = 1;
    pub const CONFIG_ERROR: i32 = 3;
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let code = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::NotFound,
            std::io::ErrorKind::PermissionDenied => ErrorCode::AccessDenied,
            std::io::ErrorKind::AlreadyExists => ErrorCode::AlreadyExists,
            std::io::ErrorKind::NotADirectory => ErrorCode::NotADirectory,
            _ => ErrorCode::IoFailure,
        };
        Error::new(code, err.to_string()).with_source(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::new(ErrorCode::StoreCorrupted, format!("JSON error: {}", err)).with_source(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::new(ErrorCode::ConfigParseError, format!("TOML parse error: {}", err))
            .with_source(err)
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    fn context(self, context: impl Into<String>) -> Result<T>;
    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_suggestion(self, suggestion: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_suggestion(suggestion))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::NotFound.to_string(), "E2001");
        assert_eq!(ErrorCode::StoreError.to_string(), "E4000");
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::IoFailure.category(), "Filesystem");
        assert_eq!(ErrorCode::ConfigParseError.category(), "Configuration");
        assert_eq!(ErrorCode::InvalidName.category(), "Validation");
    }

    #[test]
    fn test_from_io_maps_kinds() {
        let cases = [
            (io::ErrorKind::NotFound, ErrorCode::NotFound),
            (io::ErrorKind::PermissionDenied, ErrorCode::AccessDenied),
            (io::ErrorKind::AlreadyExists, ErrorCode::AlreadyExists),
            (io::ErrorKind::NotADirectory, ErrorCode::NotADirectory),
            (io::ErrorKind::Other, ErrorCode::IoFailure),
        ];
        for (kind, code) in cases {
            let err = Error::from_io(io::Error::from(kind), "/tmp/x");
            assert_eq!(err.code, code, "{:?}", kind);
            assert!(err.source.is_some());
        }
    }

    #[test]
    fn test_already_exists_names_the_entry() {
        let err = Error::already_exists("/data/report.pdf");
        assert_eq!(err.user_message(), "An entry named 'report.pdf' already exists");
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::not_found("/path/to/file").with_context("While renaming");

        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(err.context.is_some());
        assert!(err.to_string().contains("While renaming"));
    }

    #[test]
    fn test_error_report_serialization() {
        let err = Error::parent_not_writable("/readonly");

        let report = err.to_report();
        let json = serde_json::to_string(&report).unwrap();

        assert!(json.contains("E2005"));
        assert!(json.contains("PARENT_NOT_WRITABLE"));
        assert!(json.contains("Filesystem"));
    }
}
