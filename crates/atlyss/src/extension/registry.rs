//! In-process host registry
//!
//! Keeps the registrations an extension makes and drives its hooks the way a
//! mod manager would: installers are asked in priority order and the first
//! one that supports an archive plans its installation.

use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use super::{
    Discovery, ExtensionContext, GameRegistration, GameSupport, InstallerRegistration,
    ModInstaller,
};
use crate::error::Result;
use crate::install::InstallResult;

/// A registered game and its hooks
pub struct RegisteredGame {
    pub registration: GameRegistration,
    pub hooks: Arc<dyn GameSupport>,
}

/// A registered installer and its hooks
pub struct RegisteredInstaller {
    pub registration: InstallerRegistration,
    pub installer: Arc<dyn ModInstaller>,
}

/// Registry collecting extension registrations
#[derive(Default)]
pub struct HostRegistry {
    games: Vec<RegisteredGame>,
    installers: Vec<RegisteredInstaller>,
}

impl HostRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn game(&self, id: &str) -> Option<&RegisteredGame> {
        self.games.iter().find(|g| g.registration.id == id)
    }

    /// Installers sorted by ascending priority
    pub fn installers(&self) -> &[RegisteredInstaller] {
        &self.installers
    }

    /// Discover a registered game and run its setup hook
    pub async fn discover_and_setup(&self, game_id: &str) -> Result<Option<PathBuf>> {
        let Some(game) = self.game(game_id) else {
            return Ok(None);
        };

        let path = game.hooks.query_path().await?;
        game.hooks.setup(&Discovery { path: path.clone() }).await?;
        info!("Prepared {} at {}", game.registration.name, path.display());
        Ok(Some(path))
    }

    /// Find the first installer, by priority, that supports the archive
    pub async fn select_installer(
        &self,
        entries: &[String],
        game_id: &str,
    ) -> Result<Option<&RegisteredInstaller>> {
        for candidate in &self.installers {
            let result = candidate
                .installer
                .test_supported_content(entries, game_id)
                .await?;
            if result.supported {
                debug!("Installer '{}' accepted archive", candidate.registration.name);
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }

    /// Plan an archive with the first installer that supports it
    ///
    /// Returns the installer name along with its instructions.
    pub async fn install(
        &self,
        entries: &[String],
        game_id: &str,
    ) -> Result<Option<(String, InstallResult)>> {
        let Some(selected) = self.select_installer(entries, game_id).await? else {
            return Ok(None);
        };
        let result = selected.installer.install_content(entries).await?;
        Ok(Some((selected.registration.name.clone(), result)))
    }
}

impl ExtensionContext for HostRegistry {
    fn register_game(&mut self, registration: GameRegistration, hooks: Arc<dyn GameSupport>) {
        debug!("Registered game '{}'", registration.id);
        self.games.push(RegisteredGame {
            registration,
            hooks,
        });
    }

    fn register_installer(
        &mut self,
        registration: InstallerRegistration,
        installer: Arc<dyn ModInstaller>,
    ) {
        debug!(
            "Registered installer '{}' at priority {}",
            registration.name, registration.priority
        );
        self.installers.push(RegisteredInstaller {
            registration,
            installer,
        });
        self.installers.sort_by_key(|i| i.registration.priority);
    }
}
