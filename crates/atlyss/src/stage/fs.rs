//! File system capability used by the dependency stager
//!
//! The stager only needs three operations, so they sit behind a trait and
//! tests can swap in an in-memory implementation.

use async_trait::async_trait;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use walkdir::WalkDir;

/// File operations required for staging dependencies
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Create a directory and its parents, succeeding if it already exists
    async fn ensure_dir(&self, path: &Path) -> io::Result<()>;

    /// Names of the entries directly inside a directory, sorted
    async fn list_dir(&self, path: &Path) -> io::Result<Vec<String>>;

    /// Copy a file or directory tree, overwriting whatever is at the destination
    async fn copy_overwrite(&self, source: &Path, destination: &Path) -> io::Result<()>;
}

/// The real file system, driven through tokio
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

#[async_trait]
impl FileSystem for LocalFileSystem {
    async fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path).await
    }

    async fn list_dir(&self, path: &Path) -> io::Result<Vec<String>> {
        let mut reader = fs::read_dir(path).await?;
        let mut names = Vec::new();
        while let Some(entry) = reader.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    async fn copy_overwrite(&self, source: &Path, destination: &Path) -> io::Result<()> {
        let metadata = fs::metadata(source).await?;

        if metadata.is_dir() {
            let source = source.to_path_buf();
            let destination = destination.to_path_buf();
            return tokio::task::spawn_blocking(move || copy_dir_recursive(&source, &destination))
                .await
                .map_err(io::Error::other)?;
        }

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).await?;
        }
        if fs::metadata(destination).await.is_ok_and(|m| m.is_dir()) {
            fs::remove_dir_all(destination).await?;
        }
        fs::copy(source, destination).await?;
        debug!("Copied {} to {}", source.display(), destination.display());
        Ok(())
    }
}

/// Copy a directory tree file by file
///
/// Files already in the destination tree are overwritten; files that only
/// exist at the destination are left alone.
fn copy_dir_recursive(source: &Path, destination: &Path) -> io::Result<()> {
    if destination.is_file() {
        std::fs::remove_file(destination)?;
    }
    std::fs::create_dir_all(destination)?;

    for entry in WalkDir::new(source).min_depth(1).follow_links(true) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(io::Error::other)?;
        let target: PathBuf = destination.join(relative);

        if entry.file_type().is_dir() {
            if target.is_file() {
                std::fs::remove_file(&target)?;
            }
            std::fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            if target.is_dir() {
                std::fs::remove_dir_all(&target)?;
            }
            std::fs::copy(entry.path(), &target)?;
        }
    }

    debug!("Copied tree {} to {}", source.display(), destination.display());
    Ok(())
}
