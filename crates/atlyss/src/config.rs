//! Configuration for the extension
//!
//! Defaults mirror the layout the extension ships with: the bundled
//! dependencies live in a `Dependencies` folder next to the executable.

use std::path::PathBuf;

use crate::error::{ExtensionError, Result};
use crate::install::ContentPredicate;

/// Environment variable overriding the dependency directory
pub const DEPENDENCIES_DIR_ENV: &str = "ATLYSS_DEPENDENCIES_DIR";

/// Environment variable overriding the copy concurrency limit
pub const MAX_CONCURRENT_COPIES_ENV: &str = "ATLYSS_MAX_CONCURRENT_COPIES";

/// Runtime configuration for setup and installation
#[derive(Debug, Clone)]
pub struct ExtensionConfig {
    /// Directory holding the bundled dependency set
    pub dependencies_dir: PathBuf,
    /// Plugin-loading directory, relative to the game directory
    pub plugins_subdir: PathBuf,
    /// Maximum number of dependency copies in flight
    pub max_concurrent_copies: usize,
    /// Which archive entries count as mod content
    pub predicate: ContentPredicate,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            dependencies_dir: default_dependencies_dir(),
            plugins_subdir: PathBuf::from("BepInEx").join("plugins"),
            max_concurrent_copies: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4),
            // BepInEx loads textures, models and animations as well as
            // assemblies, so no single extension decides support.
            predicate: ContentPredicate::AcceptAll,
        }
    }
}

impl ExtensionConfig {
    /// Build a configuration from the process environment
    ///
    /// Loads a `.env` file first when one is present.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup(DEPENDENCIES_DIR_ENV) {
            config.dependencies_dir = PathBuf::from(dir);
        }

        if let Some(raw) = lookup(MAX_CONCURRENT_COPIES_ENV) {
            let limit: usize = raw.trim().parse().map_err(|_| ExtensionError::Configuration {
                field: MAX_CONCURRENT_COPIES_ENV.to_string(),
                message: format!("expected a positive integer, got '{}'", raw),
            })?;
            config = config.with_max_concurrent_copies(limit)?;
        }

        Ok(config)
    }

    pub fn with_dependencies_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dependencies_dir = dir.into();
        self
    }

    pub fn with_predicate(mut self, predicate: ContentPredicate) -> Self {
        self.predicate = predicate;
        self
    }

    /// Set the copy concurrency limit, rejecting zero
    pub fn with_max_concurrent_copies(mut self, limit: usize) -> Result<Self> {
        if limit == 0 {
            return Err(ExtensionError::Configuration {
                field: MAX_CONCURRENT_COPIES_ENV.to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        self.max_concurrent_copies = limit;
        Ok(self)
    }
}

fn default_dependencies_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("Dependencies")))
        .unwrap_or_else(|| PathBuf::from("Dependencies"))
}
