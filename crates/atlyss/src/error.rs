//! Error types for the ATLYSS extension

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced to the host by the extension hooks
#[derive(Debug, Error)]
pub enum ExtensionError {
    /// The game installation could not be resolved
    #[error("{message}")]
    NotFound { message: String },

    /// A bundled dependency failed to copy into the game directory
    #[error("Failed to copy dependency: {name}")]
    DependencyInstallFailed {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// No archive entry matched the content predicate while planning
    #[error("No installable content found among {entries} archive entries")]
    NoInstallableContent { entries: usize },

    /// File system operation failed outside of a dependency copy
    #[error("File operation failed on '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A discovery backend failed before the locator mapped the failure
    #[error("Game discovery failed: {0}")]
    Discovery(String),

    /// Invalid configuration value
    #[error("Invalid configuration for {field}: {message}")]
    Configuration { field: String, message: String },
}

impl ExtensionError {
    /// Build an `Io` error for the given path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Check whether this error means the game was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, ExtensionError>;
