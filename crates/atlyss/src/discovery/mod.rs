//! Game discovery
//!
//! Store lookups are injected through [`GameDiscovery`] so the locator can be
//! driven by Steam in production and by fakes in tests.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{ExtensionError, Result};
use crate::game::GameDescriptor;

pub mod env;
pub mod steam;

pub use env::EnvOverrideDiscovery;
pub use steam::SteamDiscovery;

/// Message shown to the user when the game cannot be found
pub const NOT_FOUND_MESSAGE: &str = "Unable to locate ATLYSS installation.";

/// An installed game as reported by a store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEntry {
    pub app_id: u32,
    pub game_path: PathBuf,
    pub store: &'static str,
}

/// Resolves platform application ids to installed games
#[async_trait]
pub trait GameDiscovery: Send + Sync {
    /// Find the first installed game matching any of the application ids
    async fn find_by_app_id(&self, app_ids: &[u32]) -> Result<GameEntry>;
}

/// Resolves the installation path of one game
pub struct GameLocator {
    game: GameDescriptor,
    discovery: Arc<dyn GameDiscovery>,
}

impl GameLocator {
    pub fn new(game: GameDescriptor, discovery: Arc<dyn GameDiscovery>) -> Self {
        Self { game, discovery }
    }

    /// Locate the game installation directory
    ///
    /// Every discovery failure becomes `NotFound`; there is no retry.
    pub async fn locate(&self) -> Result<PathBuf> {
        match self.discovery.find_by_app_id(&[self.game.steam_app_id]).await {
            Ok(entry) => {
                info!(
                    "Found {} via {} at {}",
                    self.game.name,
                    entry.store,
                    entry.game_path.display()
                );
                Ok(entry.game_path)
            }
            Err(e) => {
                debug!("Discovery for app {} failed: {}", self.game.steam_app_id, e);
                Err(ExtensionError::NotFound {
                    message: NOT_FOUND_MESSAGE.to_string(),
                })
            }
        }
    }
}
