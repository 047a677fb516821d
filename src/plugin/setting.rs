use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One entry in a plugin's declared settings form, in display order.
///
/// `head`, `label`, and `newline` are layout-only; the rest carry a `key`
/// the host persists a value under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum SettingDefinition {
    Head {
        content: String,
    },
    Label {
        content: String,
    },
    Newline,
    Textbox {
        key: String,
        label: String,
        #[serde(default)]
        default_value: String,
    },
    Checkbox {
        key: String,
        label: String,
        #[serde(default)]
        default_value: String,
    },
    Select {
        key: String,
        label: String,
        #[serde(default)]
        default_value: String,
        options: Vec<SelectOption>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SettingDefinition {
    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Textbox { key, .. } | Self::Checkbox { key, .. } | Self::Select { key, .. } => {
                Some(key)
            }
            Self::Head { .. } | Self::Label { .. } | Self::Newline => None,
        }
    }

    fn key_and_default(&self) -> Option<(String, String)> {
        match self {
            Self::Textbox {
                key, default_value, ..
            }
            | Self::Checkbox {
                key, default_value, ..
            }
            | Self::Select {
                key, default_value, ..
            } => Some((key.clone(), default_value.clone())),
            Self::Head { .. } | Self::Label { .. } | Self::Newline => None,
        }
    }
}

/// Seed settings for a freshly installed plugin: every keyed definition maps
/// to its declared default.
pub fn default_settings(definitions: &[SettingDefinition]) -> BTreeMap<String, String> {
    definitions
        .iter()
        .filter_map(SettingDefinition::key_and_default)
        .collect()
}

/// Persisted per-plugin user state.
///
/// An empty `trigger_keywords` means the user never edited them and the
/// manifest's defaults apply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginUserState {
    pub disabled: bool,
    pub trigger_keywords: Vec<String>,
    pub settings: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn definitions_deserialize_from_tagged_json() {
        let raw = r#"[
            {"type": "head", "content": "General"},
            {"type": "textbox", "key": "city", "label": "City", "defaultValue": "Berlin"},
            {"type": "newline"},
            {"type": "checkbox", "key": "fahrenheit", "label": "Use Fahrenheit"},
            {"type": "select", "key": "provider", "label": "Provider",
             "defaultValue": "owm",
             "options": [{"label": "OpenWeatherMap", "value": "owm"}]}
        ]"#;

        let definitions: Vec<SettingDefinition> = serde_json::from_str(raw).unwrap();
        assert_eq!(definitions.len(), 5);
        assert_eq!(definitions[1].key(), Some("city"));
        assert_eq!(definitions[2], SettingDefinition::Newline);
        assert_eq!(definitions[3].key(), Some("fahrenheit"));
    }

    #[test]
    fn definition_order_survives_a_round_trip() {
        let raw = r#"[
            {"type": "textbox", "key": "b", "label": "B"},
            {"type": "textbox", "key": "a", "label": "A"},
            {"type": "textbox", "key": "c", "label": "C"}
        ]"#;

        let definitions: Vec<SettingDefinition> = serde_json::from_str(raw).unwrap();
        let encoded = serde_json::to_string(&definitions).unwrap();
        let decoded: Vec<SettingDefinition> = serde_json::from_str(&encoded).unwrap();

        let keys: Vec<_> = decoded.iter().filter_map(SettingDefinition::key).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn default_settings_skips_layout_entries() {
        let definitions = vec![
            SettingDefinition::Head {
                content: "General".to_string(),
            },
            SettingDefinition::Textbox {
                key: "city".to_string(),
                label: "City".to_string(),
                default_value: "Berlin".to_string(),
            },
            SettingDefinition::Newline,
            SettingDefinition::Checkbox {
                key: "fahrenheit".to_string(),
                label: "Use Fahrenheit".to_string(),
                default_value: "false".to_string(),
            },
        ];

        let defaults = default_settings(&definitions);
        assert_eq!(defaults.len(), 2);
        assert_eq!(defaults.get("city").map(String::as_str), Some("Berlin"));
        assert_eq!(defaults.get("fahrenheit").map(String::as_str), Some("false"));
    }

    #[test]
    fn user_state_defaults_to_enabled_and_untouched() {
        let state: PluginUserState = toml::from_str("").unwrap();
        assert!(!state.disabled);
        assert!(state.trigger_keywords.is_empty());
        assert!(state.settings.is_empty());
    }
}
