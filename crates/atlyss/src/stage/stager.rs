//! Dependency staging
//!
//! Copies the bundled BepInEx runtime into the game directory so the game
//! can load plugins, and makes sure the plugin folder exists.

use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

use super::fs::FileSystem;
use crate::config::ExtensionConfig;
use crate::error::{ExtensionError, Result};

/// Stages the dependency set into a game installation
pub struct DependencyStager {
    fs: Arc<dyn FileSystem>,
    dependencies_dir: PathBuf,
    plugins_subdir: PathBuf,
    max_concurrent_copies: usize,
}

impl DependencyStager {
    pub fn new(fs: Arc<dyn FileSystem>, config: &ExtensionConfig) -> Self {
        Self {
            fs,
            dependencies_dir: config.dependencies_dir.clone(),
            plugins_subdir: config.plugins_subdir.clone(),
            max_concurrent_copies: config.max_concurrent_copies.max(1),
        }
    }

    /// Prepare a game installation for modding
    ///
    /// Returns the names of the staged dependencies. Every copy runs to
    /// completion before the result is reported; if any failed, the first
    /// failure in listing order is returned and the successful copies stay
    /// on disk.
    pub async fn stage(&self, install_path: &Path) -> Result<Vec<String>> {
        let plugins_dir = install_path.join(&self.plugins_subdir);
        self.fs
            .ensure_dir(&plugins_dir)
            .await
            .map_err(|e| ExtensionError::io(&plugins_dir, e))?;

        let names = self
            .fs
            .list_dir(&self.dependencies_dir)
            .await
            .map_err(|e| ExtensionError::io(&self.dependencies_dir, e))?;

        let results: Vec<Result<String>> = stream::iter(names)
            .map(|name| self.copy_dependency(install_path, name))
            .buffered(self.max_concurrent_copies)
            .collect()
            .await;

        let staged = results.into_iter().collect::<Result<Vec<String>>>()?;

        info!("All dependencies installed successfully.");
        Ok(staged)
    }

    async fn copy_dependency(&self, install_path: &Path, name: String) -> Result<String> {
        let source = self.dependencies_dir.join(&name);
        let destination = install_path.join(&name);

        match self.fs.copy_overwrite(&source, &destination).await {
            Ok(()) => {
                info!("Copied dependency: {}", name);
                Ok(name)
            }
            Err(e) => {
                error!("Error copying {}: {}", name, e);
                Err(ExtensionError::DependencyInstallFailed { name, source: e })
            }
        }
    }
}
