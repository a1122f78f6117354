//! ATLYSS game support for mod managers
//!
//! This library teaches a mod-management host how to find ATLYSS, prepare
//! it for BepInEx mods, and install mod archives into it.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use atlyss::{AtlyssExtension, ExtensionConfig, HostRegistry, init};
//! use std::sync::Arc;
//!
//! # async fn example() -> atlyss::Result<()> {
//! let config = ExtensionConfig::from_env()?;
//! let extension = Arc::new(AtlyssExtension::with_defaults(&config));
//!
//! let mut host = HostRegistry::new();
//! init(&mut host, extension);
//!
//! // Find the game and stage the BepInEx runtime into it
//! host.discover_and_setup(atlyss::GAME_ID).await?;
//!
//! // Plan an extracted archive
//! let entries = vec![
//!     "MyMod/MyMod.dll".to_string(),
//!     "MyMod/assets/".to_string(),
//!     "MyMod/assets/icon.png".to_string(),
//! ];
//! if let Some((installer, result)) = host.install(&entries, atlyss::GAME_ID).await? {
//!     println!("{} planned {} copies", installer, result.instructions.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Components
//!
//! - **Game locator**: Steam lookup by app id, with an `ATLYSS_PATH` override
//! - **Dependency stager**: concurrent, overwriting copy of the bundled runtime
//! - **Content classifier**: accepts any archive with content for ATLYSS
//! - **Install planner**: strips wrapper folders and directory entries

pub mod config;
pub mod discovery;
pub mod error;
pub mod extension;
pub mod game;
pub mod install;
pub mod stage;

// Re-export commonly used types for convenience
pub use config::ExtensionConfig;
pub use discovery::{EnvOverrideDiscovery, GameDiscovery, GameEntry, GameLocator, SteamDiscovery};
pub use error::{ExtensionError, Result};
pub use extension::{
    AtlyssExtension, Discovery, ExtensionContext, GameRegistration, GameSupport, HostRegistry,
    InstallerRegistration, ModInstaller, init,
};
pub use game::{ATLYSS, GAME_ID, GameDescriptor, STEAM_APP_ID};
pub use install::{
    ClassificationResult, ContentClassifier, ContentPredicate, InstallPlanner, InstallResult,
    Instruction,
};
pub use stage::{DependencyStager, FileSystem, LocalFileSystem};

#[cfg(test)]
mod tests;
