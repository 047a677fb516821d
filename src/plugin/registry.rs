use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::PluginError;
use crate::plugin::descriptor::PluginDescriptor;
use crate::plugin::metadata::{PluginId, PluginMetadata};
use crate::plugin::setting::PluginUserState;

#[derive(Debug, Clone)]
struct RegistryEntry {
    metadata: PluginMetadata,
    is_system: bool,
    installed: bool,
}

/// On-disk shape of `plugins.toml`, keyed by plugin id.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    #[serde(default)]
    plugins: BTreeMap<String, PluginUserState>,
}

/// Produces [`PluginDescriptor`] snapshots for the UI.
///
/// Holds validated manifests (from directory scans, system registration, or
/// store listings) plus the persisted per-plugin user state, and combines
/// the two on every listing call. Descriptors are never handed out by
/// reference; each call builds fresh values.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    entries: BTreeMap<PluginId, RegistryEntry>,
    states: BTreeMap<PluginId, PluginUserState>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a built-in plugin. System plugins are always installed and
    /// cannot be removed or disabled by the user.
    pub fn register_system(&mut self, metadata: PluginMetadata) -> Result<(), PluginError> {
        self.insert(metadata, true, true)
    }

    /// Registers a plugin known from a store listing but not present on
    /// disk. Its descriptor will carry no installed-only state.
    pub fn register_available(&mut self, metadata: PluginMetadata) -> Result<(), PluginError> {
        self.insert(metadata, false, false)
    }

    fn insert(
        &mut self,
        metadata: PluginMetadata,
        is_system: bool,
        installed: bool,
    ) -> Result<(), PluginError> {
        metadata.validate()?;

        if self.entries.contains_key(&metadata.id) {
            return Err(PluginError::DuplicateId {
                id: metadata.id.to_string(),
            });
        }

        self.entries.insert(
            metadata.id.clone(),
            RegistryEntry {
                metadata,
                is_system,
                installed,
            },
        );
        Ok(())
    }

    /// Scans each directory for plugin subdirectories carrying a
    /// `plugin.json` and registers every valid one as installed. Broken
    /// manifests are logged and skipped. Returns how many plugins loaded.
    pub fn discover(&mut self, plugin_dirs: &[PathBuf]) -> usize {
        let mut loaded = 0;

        for dir in plugin_dirs {
            let entries = match fs::read_dir(dir) {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::debug!("skipping plugin directory {}: {err}", dir.display());
                    continue;
                }
            };

            for entry in entries.flatten() {
                let plugin_dir = entry.path();
                if !plugin_dir.is_dir() {
                    continue;
                }

                match parse_manifest(&plugin_dir.join("plugin.json")) {
                    Ok(metadata) => {
                        tracing::debug!("loaded plugin manifest: {}", metadata.id);
                        match self.insert(metadata, false, true) {
                            Ok(()) => loaded += 1,
                            Err(err) => tracing::warn!("{err}"),
                        }
                    }
                    Err(err) => tracing::warn!("{err}"),
                }
            }
        }

        loaded
    }

    /// Overlays user state from `plugins.toml`. A missing file is the
    /// first-run case, not an error.
    pub fn load_state(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            self.states.clear();
            return Ok(());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read plugin state {}", path.display()))?;
        let file: StateFile = toml::from_str(&raw)
            .with_context(|| format!("parse plugin state {}", path.display()))?;

        self.states = file
            .plugins
            .into_iter()
            .map(|(id, state)| (PluginId::new(id), state))
            .collect();
        Ok(())
    }

    pub fn save_state(&self, path: &Path) -> Result<()> {
        let file = StateFile {
            plugins: self
                .states
                .iter()
                .map(|(id, state)| (id.to_string(), state.clone()))
                .collect(),
        };

        let raw = toml::to_string_pretty(&file).context("encode plugin state")?;
        fs::write(path, raw).with_context(|| format!("write plugin state {}", path.display()))?;
        Ok(())
    }

    pub fn set_disabled(&mut self, id: &PluginId, disabled: bool) -> Result<(), PluginError> {
        self.require_installed(id)?;
        self.states.entry(id.clone()).or_default().disabled = disabled;
        Ok(())
    }

    /// Replaces the user's trigger keywords for an installed plugin. An
    /// empty list reverts to the manifest defaults.
    pub fn set_trigger_keywords(
        &mut self,
        id: &PluginId,
        keywords: Vec<String>,
    ) -> Result<(), PluginError> {
        self.require_installed(id)?;
        self.states.entry(id.clone()).or_default().trigger_keywords = keywords;
        Ok(())
    }

    pub fn set_setting(
        &mut self,
        id: &PluginId,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), PluginError> {
        self.require_installed(id)?;
        self.states
            .entry(id.clone())
            .or_default()
            .settings
            .insert(key.into(), value.into());
        Ok(())
    }

    fn require_installed(&self, id: &PluginId) -> Result<(), PluginError> {
        match self.entries.get(id) {
            Some(entry) if entry.installed => Ok(()),
            _ => Err(PluginError::NotRegistered { id: id.to_string() }),
        }
    }

    /// Fresh snapshots of every registered plugin, ordered by id.
    pub fn descriptors(&self) -> Vec<PluginDescriptor> {
        self.entries.values().map(|e| self.snapshot(e)).collect()
    }

    pub fn descriptor(&self, id: &PluginId) -> Option<PluginDescriptor> {
        self.entries.get(id).map(|e| self.snapshot(e))
    }

    fn snapshot(&self, entry: &RegistryEntry) -> PluginDescriptor {
        let default_state = PluginUserState::default();
        let state = entry.installed.then(|| {
            self.states
                .get(&entry.metadata.id)
                .unwrap_or(&default_state)
        });

        PluginDescriptor::from_metadata(&entry.metadata, entry.is_system, state)
    }
}

fn parse_manifest(path: &Path) -> Result<PluginMetadata, PluginError> {
    let raw = fs::read_to_string(path).map_err(|source| PluginError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let metadata: PluginMetadata =
        serde_json::from_str(&raw).map_err(|source| PluginError::Manifest {
            path: path.to_path_buf(),
            source,
        })?;

    metadata.validate()?;
    Ok(metadata)
}

/// Directories scanned for installed plugins, user directory first.
pub fn default_plugin_dirs() -> Vec<PathBuf> {
    if let Some(project_dirs) = directories::ProjectDirs::from("", "", "beacon") {
        return vec![project_dirs.data_dir().join("plugins")];
    }

    if let Some(base_dirs) = directories::BaseDirs::new() {
        return vec![base_dirs.home_dir().join(".local/share/beacon/plugins")];
    }

    vec![PathBuf::from(".beacon-plugins")]
}

/// Location of the persisted `plugins.toml` user state.
pub fn default_state_path() -> PathBuf {
    if let Some(project_dirs) = directories::ProjectDirs::from("", "", "beacon") {
        return project_dirs.config_dir().join("plugins.toml");
    }

    if let Some(base_dirs) = directories::BaseDirs::new() {
        return base_dirs.home_dir().join(".config/beacon/plugins.toml");
    }

    PathBuf::from("plugins.toml")
}
