//! Cross-component tests for locating, staging and installing

use super::*;
use async_trait::async_trait;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::tempdir;

/// In-memory file system recording every call
#[derive(Default)]
struct MemoryFileSystem {
    dependencies: Vec<String>,
    failing: HashSet<String>,
    fail_listing: bool,
    created_dirs: Mutex<Vec<PathBuf>>,
    copies: Mutex<Vec<(PathBuf, PathBuf)>>,
}

impl MemoryFileSystem {
    fn with_dependencies(names: &[&str]) -> Self {
        Self {
            dependencies: names.iter().map(|n| n.to_string()).collect(),
            ..Default::default()
        }
    }

    fn failing_on(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    fn copies(&self) -> Vec<(PathBuf, PathBuf)> {
        self.copies.lock().unwrap().clone()
    }

    fn created_dirs(&self) -> Vec<PathBuf> {
        self.created_dirs.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileSystem for MemoryFileSystem {
    async fn ensure_dir(&self, path: &Path) -> io::Result<()> {
        self.created_dirs.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    async fn list_dir(&self, _path: &Path) -> io::Result<Vec<String>> {
        if self.fail_listing {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no dependency folder"));
        }
        let mut names = self.dependencies.clone();
        names.sort();
        Ok(names)
    }

    async fn copy_overwrite(&self, source: &Path, destination: &Path) -> io::Result<()> {
        self.copies
            .lock()
            .unwrap()
            .push((source.to_path_buf(), destination.to_path_buf()));

        let name = source.file_name().unwrap().to_string_lossy().into_owned();
        if self.failing.contains(&name) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "access denied"));
        }
        Ok(())
    }
}

/// Discovery returning a fixed answer and counting lookups
struct FakeDiscovery {
    game_path: Option<PathBuf>,
    calls: AtomicUsize,
}

impl FakeDiscovery {
    fn found(path: impl Into<PathBuf>) -> Self {
        Self {
            game_path: Some(path.into()),
            calls: AtomicUsize::new(0),
        }
    }

    fn missing() -> Self {
        Self {
            game_path: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl GameDiscovery for FakeDiscovery {
    async fn find_by_app_id(&self, app_ids: &[u32]) -> Result<GameEntry> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.game_path {
            Some(path) if app_ids.contains(&STEAM_APP_ID) => Ok(GameEntry {
                app_id: STEAM_APP_ID,
                game_path: path.clone(),
                store: "fake",
            }),
            _ => Err(ExtensionError::Discovery("no matching app".to_string())),
        }
    }
}

fn entries(paths: &[&str]) -> Vec<String> {
    paths.iter().map(|p| p.to_string()).collect()
}

fn memory_config() -> ExtensionConfig {
    ExtensionConfig::default()
        .with_dependencies_dir("/bundle/Dependencies")
        .with_max_concurrent_copies(8)
        .unwrap()
}

#[cfg(test)]
mod locator_tests {
    use super::*;
    use crate::discovery::NOT_FOUND_MESSAGE;

    #[tokio::test]
    async fn test_locate_returns_discovered_path() {
        let locator = GameLocator::new(ATLYSS, Arc::new(FakeDiscovery::found("/games/ATLYSS")));
        let path = locator.locate().await.unwrap();
        assert_eq!(path, PathBuf::from("/games/ATLYSS"));
    }

    #[tokio::test]
    async fn test_locate_missing_game_is_not_found_without_retry() {
        let discovery = Arc::new(FakeDiscovery::missing());
        let locator = GameLocator::new(ATLYSS, discovery.clone());

        let err = locator.locate().await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), NOT_FOUND_MESSAGE);
        assert_eq!(discovery.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_env_override_wins_when_directory_exists() {
        let game_dir = tempdir().unwrap();
        let discovery = EnvOverrideDiscovery::with_override(
            FakeDiscovery::missing(),
            Some(game_dir.path().to_path_buf()),
        );

        let entry = discovery.find_by_app_id(&[STEAM_APP_ID]).await.unwrap();
        assert_eq!(entry.game_path, game_dir.path());
        assert_eq!(entry.store, "manual");
    }

    #[tokio::test]
    async fn test_env_override_falls_back_when_missing() {
        let discovery = EnvOverrideDiscovery::with_override(
            FakeDiscovery::found("/steam/common/ATLYSS"),
            Some(PathBuf::from("/definitely/not/here")),
        );
        let entry = discovery.find_by_app_id(&[STEAM_APP_ID]).await.unwrap();
        assert_eq!(entry.game_path, PathBuf::from("/steam/common/ATLYSS"));

        let locator = GameLocator::new(
            ATLYSS,
            Arc::new(EnvOverrideDiscovery::with_override(FakeDiscovery::missing(), None)),
        );
        assert!(locator.locate().await.unwrap_err().is_not_found());
    }
}

#[cfg(test)]
mod stager_tests {
    use super::*;

    #[tokio::test]
    async fn test_stage_copies_every_dependency() {
        let fs = Arc::new(MemoryFileSystem::with_dependencies(&[
            "winhttp.dll",
            "doorstop_config.ini",
            "BepInEx",
        ]));
        let stager = DependencyStager::new(fs.clone(), &memory_config());

        let staged = stager.stage(Path::new("/games/ATLYSS")).await.unwrap();
        assert_eq!(staged, vec!["BepInEx", "doorstop_config.ini", "winhttp.dll"]);

        assert_eq!(
            fs.created_dirs(),
            vec![PathBuf::from("/games/ATLYSS").join("BepInEx").join("plugins")]
        );

        let mut copies = fs.copies();
        copies.sort();
        assert_eq!(copies.len(), 3);
        assert!(copies.contains(&(
            PathBuf::from("/bundle/Dependencies/winhttp.dll"),
            PathBuf::from("/games/ATLYSS/winhttp.dll"),
        )));
    }

    #[tokio::test]
    async fn test_stage_failure_names_the_dependency() {
        let dependencies = ["a.dll", "b.dll", "c.dll"];

        for failing in dependencies {
            for limit in [1, 2] {
                let fs = Arc::new(
                    MemoryFileSystem::with_dependencies(&dependencies).failing_on(failing),
                );
                let config = memory_config().with_max_concurrent_copies(limit).unwrap();
                let stager = DependencyStager::new(fs.clone(), &config);

                let err = stager.stage(Path::new("/games/ATLYSS")).await.unwrap_err();
                match err {
                    ExtensionError::DependencyInstallFailed { name, source } => {
                        assert_eq!(name, failing);
                        assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
                    }
                    other => panic!("unexpected error: {other}"),
                }

                // Every copy is still issued and the successful ones are kept
                let mut issued: Vec<_> = fs
                    .copies()
                    .into_iter()
                    .map(|(source, _)| source.file_name().unwrap().to_string_lossy().into_owned())
                    .collect();
                issued.sort();
                assert_eq!(issued, dependencies, "failing {failing} with limit {limit}");
            }
        }
    }

    #[tokio::test]
    async fn test_stage_reports_first_failure_in_listing_order() {
        let fs = Arc::new(
            MemoryFileSystem::with_dependencies(&["a.dll", "b.dll", "c.dll", "d.dll"])
                .failing_on("b.dll")
                .failing_on("d.dll"),
        );
        let config = memory_config().with_max_concurrent_copies(2).unwrap();
        let stager = DependencyStager::new(fs.clone(), &config);

        let err = stager.stage(Path::new("/games/ATLYSS")).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to copy dependency: b.dll");
        assert_eq!(fs.copies().len(), 4);
    }

    #[tokio::test]
    async fn test_stage_missing_dependency_folder() {
        let fs = Arc::new(MemoryFileSystem {
            fail_listing: true,
            ..Default::default()
        });
        let stager = DependencyStager::new(fs.clone(), &memory_config());

        let err = stager.stage(Path::new("/games/ATLYSS")).await.unwrap_err();
        match err {
            ExtensionError::Io { path, .. } => {
                assert_eq!(path, PathBuf::from("/bundle/Dependencies"))
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(fs.copies().is_empty());
    }

    #[tokio::test]
    async fn test_stage_on_disk_is_idempotent_and_overwrites() {
        let deps = tempdir().unwrap();
        let game = tempdir().unwrap();

        tokio::fs::write(deps.path().join("winhttp.dll"), b"loader v1").await.unwrap();
        tokio::fs::write(deps.path().join("doorstop_config.ini"), b"enabled=true").await.unwrap();
        let core = deps.path().join("BepInEx").join("core");
        tokio::fs::create_dir_all(&core).await.unwrap();
        tokio::fs::write(core.join("BepInEx.dll"), b"core v1").await.unwrap();

        let config = ExtensionConfig::default().with_dependencies_dir(deps.path());
        let stager = DependencyStager::new(Arc::new(LocalFileSystem), &config);

        let staged = stager.stage(game.path()).await.unwrap();
        assert_eq!(staged, vec!["BepInEx", "doorstop_config.ini", "winhttp.dll"]);
        assert!(game.path().join("BepInEx").join("plugins").is_dir());
        assert_eq!(
            tokio::fs::read(game.path().join("BepInEx/core/BepInEx.dll")).await.unwrap(),
            b"core v1"
        );

        // A file that only exists in the game copy of a directory dependency
        let local_only = game.path().join("BepInEx").join("core").join("user.cfg");
        tokio::fs::write(&local_only, b"keep me").await.unwrap();

        tokio::fs::write(deps.path().join("winhttp.dll"), b"loader v2").await.unwrap();
        tokio::fs::write(core.join("BepInEx.dll"), b"core v2").await.unwrap();

        stager.stage(game.path()).await.unwrap();

        assert_eq!(
            tokio::fs::read(game.path().join("winhttp.dll")).await.unwrap(),
            b"loader v2"
        );
        assert_eq!(
            tokio::fs::read(game.path().join("BepInEx/core/BepInEx.dll")).await.unwrap(),
            b"core v2"
        );
        // Directory dependencies are overwritten file by file, not replaced
        assert!(local_only.exists());
        assert!(game.path().join("BepInEx").join("plugins").is_dir());

        let mut top_level = Vec::new();
        let mut reader = tokio::fs::read_dir(game.path()).await.unwrap();
        while let Some(entry) = reader.next_entry().await.unwrap() {
            top_level.push(entry.file_name().to_string_lossy().into_owned());
        }
        top_level.sort();
        assert_eq!(top_level, vec!["BepInEx", "doorstop_config.ini", "winhttp.dll"]);
    }
}

#[cfg(test)]
mod extension_tests {
    use super::*;
    use crate::extension::{INSTALLER_NAME, INSTALLER_PRIORITY};
    use serde_json::json;

    /// Installer answering every archive the same way
    struct FixedInstaller {
        supported: bool,
    }

    #[async_trait]
    impl ModInstaller for FixedInstaller {
        async fn test_supported_content(
            &self,
            _entries: &[String],
            _game_id: &str,
        ) -> Result<ClassificationResult> {
            Ok(ClassificationResult {
                supported: self.supported,
                required_files: Vec::new(),
            })
        }

        async fn install_content(&self, _entries: &[String]) -> Result<InstallResult> {
            Ok(InstallResult::default())
        }
    }

    fn extension_with(discovery: FakeDiscovery, fs: MemoryFileSystem) -> Arc<AtlyssExtension> {
        Arc::new(AtlyssExtension::new(
            &memory_config(),
            Arc::new(discovery),
            Arc::new(fs),
        ))
    }

    fn registered_host() -> HostRegistry {
        let mut host = HostRegistry::new();
        let extension = extension_with(
            FakeDiscovery::found("/games/ATLYSS"),
            MemoryFileSystem::with_dependencies(&["winhttp.dll"]),
        );
        assert!(init(&mut host, extension));
        host
    }

    #[test]
    fn test_registration_contract() {
        let host = registered_host();
        let game = host.game(GAME_ID).unwrap();
        let registration = &game.registration;

        assert_eq!(registration.id, "atlyss");
        assert!(registration.merge_mods);
        assert_eq!(registration.executable, "ATLYSS.exe");
        assert_eq!(registration.required_files, vec!["ATLYSS.exe"]);
        assert_eq!(registration.logo, "gameart.jpg");
        assert!(registration.supported_tools.is_empty());
        assert_eq!(game.hooks.query_mod_path(Path::new("/games/ATLYSS")), PathBuf::new());

        let value = serde_json::to_value(registration).unwrap();
        assert_eq!(value["mergeMods"], json!(true));
        assert_eq!(value["requiredFiles"], json!(["ATLYSS.exe"]));
        assert_eq!(value["environment"], json!({ "SteamAPPId": "2768430" }));
        assert_eq!(value["details"], json!({ "steamAppId": "2768430" }));

        let installers = host.installers();
        assert_eq!(installers.len(), 1);
        assert_eq!(installers[0].registration.name, INSTALLER_NAME);
        assert_eq!(installers[0].registration.priority, INSTALLER_PRIORITY);
    }

    #[tokio::test]
    async fn test_discover_and_setup_runs_hooks() {
        let host = registered_host();
        let path = host.discover_and_setup(GAME_ID).await.unwrap();
        assert_eq!(path, Some(PathBuf::from("/games/ATLYSS")));

        assert_eq!(host.discover_and_setup("valheim").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_setup_surfaces_not_found() {
        let mut host = HostRegistry::new();
        init(
            &mut host,
            extension_with(FakeDiscovery::missing(), MemoryFileSystem::default()),
        );
        let err = host.discover_and_setup(GAME_ID).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_setup_surfaces_dependency_failure() {
        let extension = extension_with(
            FakeDiscovery::found("/games/ATLYSS"),
            MemoryFileSystem::with_dependencies(&["winhttp.dll"]).failing_on("winhttp.dll"),
        );
        let err = extension
            .setup(&Discovery {
                path: PathBuf::from("/games/ATLYSS"),
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to copy dependency: winhttp.dll");
    }

    #[tokio::test]
    async fn test_install_through_host() {
        let host = registered_host();
        let listing = entries(&["ModRoot/readme.txt", "ModRoot/plugin.dll", "ModRoot/sub/"]);

        let (installer, result) = host.install(&listing, GAME_ID).await.unwrap().unwrap();
        assert_eq!(installer, INSTALLER_NAME);
        assert_eq!(
            result.instructions,
            vec![
                Instruction::copy("ModRoot/readme.txt", "readme.txt"),
                Instruction::copy("ModRoot/plugin.dll", "plugin.dll"),
            ]
        );

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value["instructions"][0],
            json!({ "type": "copy", "source": "ModRoot/readme.txt", "destination": "readme.txt" })
        );

        assert!(host.install(&listing, "valheim").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_installers_are_asked_by_priority() {
        let mut host = registered_host();
        host.register_installer(
            InstallerRegistration {
                name: "catch-all".to_string(),
                priority: 50,
            },
            Arc::new(FixedInstaller { supported: true }),
        );
        host.register_installer(
            InstallerRegistration {
                name: "picky".to_string(),
                priority: 10,
            },
            Arc::new(FixedInstaller { supported: false }),
        );

        let names: Vec<_> = host
            .installers()
            .iter()
            .map(|i| i.registration.name.as_str())
            .collect();
        assert_eq!(names, vec!["picky", INSTALLER_NAME, "catch-all"]);

        let listing = entries(&["Mod/plugin.dll"]);
        let selected = host.select_installer(&listing, GAME_ID).await.unwrap().unwrap();
        assert_eq!(selected.registration.name, INSTALLER_NAME);

        let selected = host.select_installer(&listing, "valheim").await.unwrap().unwrap();
        assert_eq!(selected.registration.name, "catch-all");
    }

    #[tokio::test]
    async fn test_hooks_for_directory_first_listing() {
        let host = registered_host();
        let listing = entries(&[
            "BepInEx/",
            "BepInEx/plugins/",
            "BepInEx/plugins/Mod.dll",
            "BepInEx/config/Mod.cfg",
        ]);

        let (_, result) = host.install(&listing, GAME_ID).await.unwrap().unwrap();
        assert_eq!(
            result.instructions,
            vec![
                Instruction::copy("BepInEx/plugins/Mod.dll", "BepInEx/plugins/Mod.dll"),
                Instruction::copy("BepInEx/config/Mod.cfg", "BepInEx/config/Mod.cfg"),
            ]
        );
    }

    #[tokio::test]
    async fn test_hooks_for_directory_only_and_empty_archives() {
        let extension = extension_with(FakeDiscovery::missing(), MemoryFileSystem::default());

        let directories = entries(&["Empty/", "Empty/sub/"]);
        let result = extension
            .test_supported_content(&directories, GAME_ID)
            .await
            .unwrap();
        assert_eq!(result, ClassificationResult::supported());
        let planned = extension.install_content(&directories).await.unwrap();
        assert!(planned.instructions.is_empty());

        let result = extension.test_supported_content(&[], GAME_ID).await.unwrap();
        assert_eq!(result, ClassificationResult::unsupported());
        let err = extension.install_content(&[]).await.unwrap_err();
        assert!(matches!(err, ExtensionError::NoInstallableContent { entries: 0 }));

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value, json!({ "supported": false, "requiredFiles": [] }));
    }
}
