//! Command line driver for the ATLYSS extension
//!
//! Runs the extension hooks against the local machine the way a mod manager
//! would, printing host-facing results as JSON.

use anyhow::{Context, Result};
use atlyss::{
    AtlyssExtension, Discovery, ExtensionConfig, GAME_ID, GameSupport, HostRegistry, ModInstaller,
    init,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "atlyss", about = "ATLYSS mod support tooling")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the game and installer registrations
    Registration,
    /// Find the game installation
    Locate,
    /// Stage the bundled dependencies into the game directory
    Setup {
        /// Use this directory instead of discovering the game
        #[arg(long)]
        game_dir: Option<PathBuf>,
    },
    /// Check whether an archive listing is ATLYSS content
    Classify {
        /// File with one archive entry per line
        entries: PathBuf,
        #[arg(long, default_value = GAME_ID)]
        game_id: String,
    },
    /// Print the copy plan for an archive listing
    Plan {
        /// File with one archive entry per line
        entries: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = ExtensionConfig::from_env().context("Failed to load configuration")?;
    let extension = Arc::new(AtlyssExtension::with_defaults(&config));

    match cli.command {
        Command::Registration => {
            let mut host = HostRegistry::new();
            init(&mut host, extension.clone());
            let game = host
                .game(GAME_ID)
                .context("Extension did not register the game")?;
            println!("{}", serde_json::to_string_pretty(&game.registration)?);
            println!(
                "{}",
                serde_json::to_string_pretty(&extension.installer_registration())?
            );
        }
        Command::Locate => {
            let path = extension.query_path().await?;
            println!("{}", path.display());
        }
        Command::Setup { game_dir } => {
            let path = match game_dir {
                Some(dir) => dir,
                None => extension.query_path().await?,
            };
            let staged = extension
                .prepare_for_modding(&Discovery { path: path.clone() })
                .await
                .with_context(|| format!("Setup failed for {}", path.display()))?;
            println!("{}", serde_json::to_string_pretty(&staged)?);
        }
        Command::Classify { entries, game_id } => {
            let listing = read_entries(&entries).await?;
            let result = extension.test_supported_content(&listing, &game_id).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Plan { entries } => {
            let listing = read_entries(&entries).await?;
            let result = extension
                .install_content(&listing)
                .await
                .with_context(|| format!("Cannot plan {}", entries.display()))?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}

async fn read_entries(path: &Path) -> Result<Vec<String>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read entry list {}", path.display()))?;
    Ok(text
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
