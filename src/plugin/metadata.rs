use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::PluginError;
use crate::plugin::setting::SettingDefinition;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PluginId(pub String);

impl PluginId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PluginId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Execution runtime a plugin requires from the host.
///
/// Manifests carry this as a free-form string; unrecognized values are kept
/// verbatim in `Unknown` so they round-trip, and the registry rejects them
/// at registration time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Runtime {
    Dotnet,
    Nodejs,
    Python,
    Unknown(String),
}

impl Runtime {
    /// Case-insensitive, matching how manifests are written in the wild.
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "dotnet" => Self::Dotnet,
            "nodejs" => Self::Nodejs,
            "python" => Self::Python,
            _ => Self::Unknown(raw.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Dotnet => "Dotnet",
            Self::Nodejs => "Nodejs",
            Self::Python => "Python",
            Self::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Runtime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Runtime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// How the `data` field of a [`PluginIcon`] should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconKind {
    Absolute,
    Relative,
    Url,
    Base64,
    Svg,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginIcon {
    pub kind: IconKind,
    pub data: String,
}

/// A command the plugin declares. Display order in the UI follows
/// declaration order in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataCommand {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Static plugin metadata as declared in a `plugin.json` manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginMetadata {
    pub id: PluginId,
    pub name: String,
    #[serde(default)]
    pub author: String,
    pub version: String,
    #[serde(default)]
    pub min_host_version: String,
    pub runtime: Runtime,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: Option<PluginIcon>,
    #[serde(default)]
    pub website: String,
    pub entry: String,
    #[serde(default)]
    pub screenshot_urls: Vec<String>,
    #[serde(default)]
    pub trigger_keywords: Vec<String>,
    #[serde(default)]
    pub commands: Vec<MetadataCommand>,
    #[serde(default, rename = "supportedOS")]
    pub supported_os: Vec<String>,
    #[serde(default)]
    pub setting_definitions: Vec<SettingDefinition>,
}

impl PluginMetadata {
    /// Checks the two rules every loadable manifest must satisfy: at least
    /// one trigger keyword, and a runtime the host knows how to start.
    pub fn validate(&self) -> Result<(), PluginError> {
        if self.trigger_keywords.is_empty() {
            return Err(PluginError::NoTriggerKeywords {
                id: self.id.to_string(),
            });
        }

        if !self.runtime.is_known() {
            return Err(PluginError::UnsupportedRuntime {
                id: self.id.to_string(),
                runtime: self.runtime.as_str().to_string(),
            });
        }

        Ok(())
    }
}
