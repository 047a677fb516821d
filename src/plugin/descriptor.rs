use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::plugin::metadata::{MetadataCommand, PluginIcon, PluginId, PluginMetadata, Runtime};
use crate::plugin::setting::{self, PluginUserState, SettingDefinition};

/// Installed-only plugin state.
///
/// Setting definitions, setting values, and the disabled flag only mean
/// something for an installed plugin, so they live behind this variant
/// instead of sitting on [`PluginDescriptor`] with undefined contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InstallState {
    #[default]
    NotInstalled,
    Installed {
        setting_definitions: Vec<SettingDefinition>,
        settings: BTreeMap<String, String>,
        disabled: bool,
    },
}

/// Snapshot of one plugin as shown to the UI.
///
/// Built fresh on every listing request and never mutated in place; when
/// plugin state changes the registry hands out a new snapshot. On the wire
/// this flattens to the flat camelCase shape the UI binds to, with
/// `isInstalled` gating `settingDefinitions`/`setting`/`isDisable`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "WireDescriptor", from = "WireDescriptor")]
pub struct PluginDescriptor {
    pub id: PluginId,
    pub name: String,
    pub author: String,
    pub version: String,
    pub min_host_version: String,
    pub runtime: Runtime,
    pub description: String,
    pub icon: Option<PluginIcon>,
    pub website: String,
    pub entry: String,
    pub screenshot_urls: Vec<String>,
    pub trigger_keywords: Vec<String>,
    pub commands: Vec<MetadataCommand>,
    pub supported_os: Vec<String>,
    pub is_system: bool,
    pub install: InstallState,
}

impl PluginDescriptor {
    /// Snapshots a registry entry. `state` carries the persisted user state
    /// when the plugin is installed; `None` means not installed, which is
    /// expected for store listings, not an error.
    pub fn from_metadata(
        metadata: &PluginMetadata,
        is_system: bool,
        state: Option<&PluginUserState>,
    ) -> Self {
        let trigger_keywords = state
            .filter(|s| !s.trigger_keywords.is_empty())
            .map(|s| s.trigger_keywords.clone())
            .unwrap_or_else(|| metadata.trigger_keywords.clone());

        let install = match state {
            Some(state) => {
                let mut settings = setting::default_settings(&metadata.setting_definitions);
                settings.extend(state.settings.clone());
                InstallState::Installed {
                    setting_definitions: metadata.setting_definitions.clone(),
                    settings,
                    // system plugins cannot be turned off
                    disabled: state.disabled && !is_system,
                }
            }
            None => InstallState::NotInstalled,
        };

        Self {
            id: metadata.id.clone(),
            name: metadata.name.clone(),
            author: metadata.author.clone(),
            version: metadata.version.clone(),
            min_host_version: metadata.min_host_version.clone(),
            runtime: metadata.runtime.clone(),
            description: metadata.description.clone(),
            icon: metadata.icon.clone(),
            website: metadata.website.clone(),
            entry: metadata.entry.clone(),
            screenshot_urls: metadata.screenshot_urls.clone(),
            trigger_keywords,
            commands: metadata.commands.clone(),
            supported_os: metadata.supported_os.clone(),
            is_system,
            install,
        }
    }

    pub fn is_installed(&self) -> bool {
        matches!(self.install, InstallState::Installed { .. })
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self.install, InstallState::Installed { disabled: true, .. })
    }
}

/// Flat wire shape. Gated fields serialize as empty/false for plugins that
/// are not installed, and are dropped on the way back in so stale values
/// cannot leak into [`InstallState::NotInstalled`] descriptors.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireDescriptor {
    id: PluginId,
    name: String,
    #[serde(default)]
    author: String,
    version: String,
    #[serde(default)]
    min_host_version: String,
    runtime: Runtime,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: Option<PluginIcon>,
    #[serde(default)]
    website: String,
    entry: String,
    #[serde(default)]
    screenshot_urls: Vec<String>,
    #[serde(default)]
    trigger_keywords: Vec<String>,
    #[serde(default)]
    commands: Vec<MetadataCommand>,
    #[serde(default, rename = "supportedOS")]
    supported_os: Vec<String>,
    #[serde(default)]
    setting_definitions: Vec<SettingDefinition>,
    #[serde(default)]
    setting: BTreeMap<String, String>,
    #[serde(default)]
    is_system: bool,
    is_installed: bool,
    #[serde(default)]
    is_disable: bool,
}

impl From<PluginDescriptor> for WireDescriptor {
    fn from(descriptor: PluginDescriptor) -> Self {
        let (is_installed, setting_definitions, setting, is_disable) = match descriptor.install {
            InstallState::Installed {
                setting_definitions,
                settings,
                disabled,
            } => (true, setting_definitions, settings, disabled),
            InstallState::NotInstalled => (false, Vec::new(), BTreeMap::new(), false),
        };

        Self {
            id: descriptor.id,
            name: descriptor.name,
            author: descriptor.author,
            version: descriptor.version,
            min_host_version: descriptor.min_host_version,
            runtime: descriptor.runtime,
            description: descriptor.description,
            icon: descriptor.icon,
            website: descriptor.website,
            entry: descriptor.entry,
            screenshot_urls: descriptor.screenshot_urls,
            trigger_keywords: descriptor.trigger_keywords,
            commands: descriptor.commands,
            supported_os: descriptor.supported_os,
            setting_definitions,
            setting,
            is_system: descriptor.is_system,
            is_installed,
            is_disable,
        }
    }
}

impl From<WireDescriptor> for PluginDescriptor {
    fn from(wire: WireDescriptor) -> Self {
        let install = if wire.is_installed {
            InstallState::Installed {
                setting_definitions: wire.setting_definitions,
                settings: wire.setting,
                disabled: wire.is_disable,
            }
        } else {
            InstallState::NotInstalled
        };

        Self {
            id: wire.id,
            name: wire.name,
            author: wire.author,
            version: wire.version,
            min_host_version: wire.min_host_version,
            runtime: wire.runtime,
            description: wire.description,
            icon: wire.icon,
            website: wire.website,
            entry: wire.entry,
            screenshot_urls: wire.screenshot_urls,
            trigger_keywords: wire.trigger_keywords,
            commands: wire.commands,
            supported_os: wire.supported_os,
            is_system: wire.is_system,
            install,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    use super::*;
    use crate::plugin::metadata::IconKind;

    fn weather_metadata() -> PluginMetadata {
        serde_json::from_str(
            r#"{
                "id": "com.example.weather",
                "name": "Weather",
                "author": "Jane",
                "version": "2.1.0",
                "minHostVersion": "1.4.0",
                "runtime": "Nodejs",
                "description": "Forecasts in the result list",
                "icon": {"kind": "relative", "data": "assets/icon.png"},
                "website": "https://example.com/weather",
                "entry": "dist/index.js",
                "screenshotUrls": ["https://example.com/2.png", "https://example.com/1.png"],
                "triggerKeywords": ["weather", "wt"],
                "commands": [
                    {"name": "refresh", "description": "Refresh the forecast"},
                    {"name": "locate", "description": "Detect my city"}
                ],
                "supportedOS": ["windows", "linux", "darwin"],
                "settingDefinitions": [
                    {"type": "textbox", "key": "city", "label": "City", "defaultValue": "Berlin"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn not_installed_snapshot_has_no_gated_state() {
        let descriptor = PluginDescriptor::from_metadata(&weather_metadata(), false, None);

        assert!(!descriptor.is_installed());
        assert!(!descriptor.is_disabled());
        assert_eq!(descriptor.install, InstallState::NotInstalled);
    }

    #[test]
    fn not_installed_wire_shape_uses_empty_defaults() {
        let descriptor = PluginDescriptor::from_metadata(&weather_metadata(), false, None);
        let wire: Value = serde_json::to_value(&descriptor).unwrap();

        assert_eq!(wire["isInstalled"], Value::Bool(false));
        assert_eq!(wire["isDisable"], Value::Bool(false));
        assert_eq!(wire["settingDefinitions"], serde_json::json!([]));
        assert_eq!(wire["setting"], serde_json::json!({}));
    }

    #[test]
    fn installed_snapshot_seeds_settings_from_defaults_then_user_values() {
        let mut state = PluginUserState::default();
        state
            .settings
            .insert("city".to_string(), "Osaka".to_string());

        let descriptor =
            PluginDescriptor::from_metadata(&weather_metadata(), false, Some(&state));

        let InstallState::Installed { settings, .. } = &descriptor.install else {
            panic!("expected installed state");
        };
        assert_eq!(settings.get("city").map(String::as_str), Some("Osaka"));
    }

    #[test]
    fn user_trigger_keywords_replace_manifest_defaults() {
        let state = PluginUserState {
            trigger_keywords: vec!["w".to_string()],
            ..PluginUserState::default()
        };

        let descriptor =
            PluginDescriptor::from_metadata(&weather_metadata(), false, Some(&state));
        assert_eq!(descriptor.trigger_keywords, vec!["w"]);
    }

    #[test]
    fn system_plugins_ignore_a_persisted_disabled_flag() {
        let state = PluginUserState {
            disabled: true,
            ..PluginUserState::default()
        };

        let descriptor = PluginDescriptor::from_metadata(&weather_metadata(), true, Some(&state));
        assert!(descriptor.is_installed());
        assert!(!descriptor.is_disabled());
    }

    #[test]
    fn round_trip_preserves_every_field_and_sequence_order() {
        let state = PluginUserState {
            disabled: true,
            trigger_keywords: vec!["wx".to_string(), "weather".to_string()],
            ..PluginUserState::default()
        };
        let descriptor = PluginDescriptor::from_metadata(&weather_metadata(), false, Some(&state));

        let encoded = serde_json::to_string(&descriptor).unwrap();
        let decoded: PluginDescriptor = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded, descriptor);
        assert_eq!(
            decoded.screenshot_urls,
            vec!["https://example.com/2.png", "https://example.com/1.png"]
        );
        assert_eq!(decoded.trigger_keywords, vec!["wx", "weather"]);
        assert_eq!(
            decoded
                .commands
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>(),
            vec!["refresh", "locate"]
        );
        assert_eq!(
            decoded.icon,
            Some(PluginIcon {
                kind: IconKind::Relative,
                data: "assets/icon.png".to_string()
            })
        );
    }

    #[test]
    fn stale_disable_flag_is_dropped_when_not_installed() {
        let base = serde_json::to_value(PluginDescriptor::from_metadata(
            &weather_metadata(),
            false,
            None,
        ))
        .unwrap();

        let mut stale = base.clone();
        stale["isDisable"] = Value::Bool(true);

        let a: PluginDescriptor = serde_json::from_value(base).unwrap();
        let b: PluginDescriptor = serde_json::from_value(stale).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_sequences_and_mappings_round_trip() {
        let metadata: PluginMetadata = serde_json::from_str(
            r#"{
                "id": "com.example.bare",
                "name": "Bare",
                "version": "0.1.0",
                "runtime": "Python",
                "entry": "main.py",
                "triggerKeywords": ["bare"]
            }"#,
        )
        .unwrap();

        let installed = PluginDescriptor::from_metadata(
            &metadata,
            false,
            Some(&PluginUserState::default()),
        );
        let encoded = serde_json::to_string(&installed).unwrap();
        let decoded: PluginDescriptor = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded, installed);
        let InstallState::Installed {
            setting_definitions,
            settings,
            ..
        } = &decoded.install
        else {
            panic!("expected installed state");
        };
        assert!(setting_definitions.is_empty());
        assert!(settings.is_empty());
    }
}
