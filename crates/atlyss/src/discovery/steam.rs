//! Steam game path resolution
//!
//! Uses steamlocate to search all Steam library folders for the app.

use async_trait::async_trait;
use tracing::debug;

use super::{GameDiscovery, GameEntry};
use crate::error::{ExtensionError, Result};

/// Discovery backed by the local Steam installation
#[derive(Debug, Default, Clone, Copy)]
pub struct SteamDiscovery;

#[async_trait]
impl GameDiscovery for SteamDiscovery {
    async fn find_by_app_id(&self, app_ids: &[u32]) -> Result<GameEntry> {
        let app_ids = app_ids.to_vec();
        tokio::task::spawn_blocking(move || find_installed(&app_ids))
            .await
            .map_err(|e| ExtensionError::Discovery(e.to_string()))?
    }
}

fn find_installed(app_ids: &[u32]) -> Result<GameEntry> {
    let steam_dir =
        steamlocate::SteamDir::locate().map_err(|e| ExtensionError::Discovery(e.to_string()))?;

    for &app_id in app_ids {
        let found = steam_dir
            .find_app(app_id)
            .map_err(|e| ExtensionError::Discovery(e.to_string()))?;

        if let Some((app, library)) = found {
            let game_path = library.resolve_app_dir(&app);
            if game_path.exists() {
                return Ok(GameEntry {
                    app_id,
                    game_path,
                    store: "steam",
                });
            }
            debug!("Steam app {} listed but {} is missing", app_id, game_path.display());
        }
    }

    Err(ExtensionError::Discovery(format!(
        "Steam apps {:?} not found or not installed",
        app_ids
    )))
}
