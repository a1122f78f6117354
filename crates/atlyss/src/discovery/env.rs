//! Environment variable override for game discovery

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, warn};

use super::{GameDiscovery, GameEntry};
use crate::error::Result;

/// Environment variable pointing at a manual game installation
pub const GAME_PATH_ENV: &str = "ATLYSS_PATH";

/// Checks a manually configured path before asking the wrapped backend
pub struct EnvOverrideDiscovery<D> {
    override_path: Option<PathBuf>,
    inner: D,
}

impl<D: GameDiscovery> EnvOverrideDiscovery<D> {
    /// Read the override from `ATLYSS_PATH`
    pub fn from_env(inner: D) -> Self {
        Self::with_override(inner, std::env::var_os(GAME_PATH_ENV).map(PathBuf::from))
    }

    pub fn with_override(inner: D, override_path: Option<PathBuf>) -> Self {
        Self {
            override_path,
            inner,
        }
    }
}

#[async_trait]
impl<D: GameDiscovery> GameDiscovery for EnvOverrideDiscovery<D> {
    async fn find_by_app_id(&self, app_ids: &[u32]) -> Result<GameEntry> {
        if let Some(path) = &self.override_path {
            if tokio::fs::metadata(path).await.is_ok_and(|m| m.is_dir()) {
                debug!("Using game path override {}", path.display());
                return Ok(GameEntry {
                    app_id: app_ids.first().copied().unwrap_or_default(),
                    game_path: path.clone(),
                    store: "manual",
                });
            }
            warn!(
                "{} points at {} which is not a directory, falling back",
                GAME_PATH_ENV,
                path.display()
            );
        }

        self.inner.find_by_app_id(app_ids).await
    }
}
