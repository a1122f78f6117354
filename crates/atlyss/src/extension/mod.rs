//! Host-facing extension facade
//!
//! The host talks to game extensions through two hook sets: [`GameSupport`]
//! for discovery and setup, and [`ModInstaller`] for archive handling.
//! [`init`] registers ATLYSS with any [`ExtensionContext`].

use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::config::ExtensionConfig;
use crate::discovery::{EnvOverrideDiscovery, GameDiscovery, GameLocator, SteamDiscovery};
use crate::error::Result;
use crate::game::{ATLYSS, GameDescriptor};
use crate::install::{
    ClassificationResult, ContentClassifier, InstallPlanner, InstallResult,
};
use crate::stage::{DependencyStager, FileSystem, LocalFileSystem};

pub mod registry;

pub use registry::HostRegistry;

/// Name the installer registers under
pub const INSTALLER_NAME: &str = "atlyss-mod";

/// Installer priority; lower runs first
pub const INSTALLER_PRIORITY: u32 = 25;

/// Game metadata handed to the host at registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRegistration {
    pub id: String,
    pub name: String,
    /// Mods are layered into one folder rather than isolated
    pub merge_mods: bool,
    pub logo: String,
    pub executable: String,
    /// Files that must exist for a directory to count as an install
    pub required_files: Vec<String>,
    pub supported_tools: Vec<String>,
    /// Variables injected when the host launches the game
    pub environment: BTreeMap<String, String>,
    pub details: BTreeMap<String, String>,
}

/// Installer metadata handed to the host at registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallerRegistration {
    pub name: String,
    pub priority: u32,
}

/// Result of the host's discovery step, passed to setup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    pub path: PathBuf,
}

/// Discovery and setup hooks for a game
#[async_trait]
pub trait GameSupport: Send + Sync {
    /// Find the game installation
    async fn query_path(&self) -> Result<PathBuf>;

    /// Mod folder relative to the game directory
    fn query_mod_path(&self, game_path: &Path) -> PathBuf;

    /// Prepare a discovered installation for modding
    async fn setup(&self, discovery: &Discovery) -> Result<()>;
}

/// Archive hooks for an installer
#[async_trait]
pub trait ModInstaller: Send + Sync {
    async fn test_supported_content(
        &self,
        entries: &[String],
        game_id: &str,
    ) -> Result<ClassificationResult>;

    async fn install_content(&self, entries: &[String]) -> Result<InstallResult>;
}

/// Registration surface exposed by the host
pub trait ExtensionContext {
    fn register_game(&mut self, registration: GameRegistration, hooks: Arc<dyn GameSupport>);

    fn register_installer(
        &mut self,
        registration: InstallerRegistration,
        installer: Arc<dyn ModInstaller>,
    );
}

/// ATLYSS support wired from its components
pub struct AtlyssExtension {
    game: GameDescriptor,
    locator: GameLocator,
    stager: DependencyStager,
    classifier: ContentClassifier,
    planner: InstallPlanner,
}

impl AtlyssExtension {
    pub fn new(
        config: &ExtensionConfig,
        discovery: Arc<dyn GameDiscovery>,
        fs: Arc<dyn FileSystem>,
    ) -> Self {
        Self {
            game: ATLYSS,
            locator: GameLocator::new(ATLYSS, discovery),
            stager: DependencyStager::new(fs, config),
            classifier: ContentClassifier::new(ATLYSS, config.predicate.clone()),
            planner: InstallPlanner::new(config.predicate.clone()),
        }
    }

    /// Steam discovery with the `ATLYSS_PATH` override, on the real file system
    pub fn with_defaults(config: &ExtensionConfig) -> Self {
        Self::new(
            config,
            Arc::new(EnvOverrideDiscovery::from_env(SteamDiscovery)),
            Arc::new(LocalFileSystem),
        )
    }

    pub fn registration(&self) -> GameRegistration {
        let app_id = self.game.steam_app_id_string();
        GameRegistration {
            id: self.game.id.to_string(),
            name: self.game.name.to_string(),
            merge_mods: true,
            logo: self.game.logo.to_string(),
            executable: self.game.executable.to_string(),
            required_files: self.game.required_files.iter().map(|f| f.to_string()).collect(),
            supported_tools: Vec::new(),
            environment: BTreeMap::from([("SteamAPPId".to_string(), app_id.clone())]),
            details: BTreeMap::from([("steamAppId".to_string(), app_id)]),
        }
    }

    pub fn installer_registration(&self) -> InstallerRegistration {
        InstallerRegistration {
            name: INSTALLER_NAME.to_string(),
            priority: INSTALLER_PRIORITY,
        }
    }

    /// Stage dependencies into a discovered installation
    pub async fn prepare_for_modding(&self, discovery: &Discovery) -> Result<Vec<String>> {
        self.stager.stage(&discovery.path).await
    }
}

#[async_trait]
impl GameSupport for AtlyssExtension {
    async fn query_path(&self) -> Result<PathBuf> {
        self.locator.locate().await
    }

    fn query_mod_path(&self, _game_path: &Path) -> PathBuf {
        PathBuf::new()
    }

    async fn setup(&self, discovery: &Discovery) -> Result<()> {
        self.prepare_for_modding(discovery).await.map(|_| ())
    }
}

#[async_trait]
impl ModInstaller for AtlyssExtension {
    async fn test_supported_content(
        &self,
        entries: &[String],
        game_id: &str,
    ) -> Result<ClassificationResult> {
        Ok(self.classifier.classify(entries, game_id))
    }

    async fn install_content(&self, entries: &[String]) -> Result<InstallResult> {
        let instructions = self.planner.plan(entries)?;
        Ok(InstallResult { instructions })
    }
}

/// Register ATLYSS support with the host
pub fn init(context: &mut dyn ExtensionContext, extension: Arc<AtlyssExtension>) -> bool {
    context.register_game(extension.registration(), extension.clone());
    context.register_installer(extension.installer_registration(), extension);

    info!("ATLYSS extension loaded successfully.");
    true
}
