//! Error types for the native-image CLI.

use graalvm_native_image::NativeImageError;
use thiserror::Error;

/// Errors that can occur while running the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Resolving or running the build failed.
    #[error(transparent)]
    Build(#[from] NativeImageError),

    /// The working directory cannot be represented as UTF-8.
    #[error("current directory is not valid UTF-8: {path}")]
    NonUtf8CurrentDir {
        /// Lossy rendering of the directory.
        path: String,
    },

    /// A command-line property was not of the form `key=value`.
    #[error("invalid property {input:?}; expected KEY=VALUE")]
    InvalidProperty {
        /// The rejected input.
        input: String,
    },

    /// Report serialisation failed.
    #[error("failed to render JSON report: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
