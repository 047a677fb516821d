//! Data layer shared between the Beacon host and its UI.
//!
//! Two snapshot shapes cross the UI boundary: [`PluginDescriptor`], built
//! by the [`PluginRegistry`] from plugin manifests plus persisted user
//! state, and [`ThemeDefinition`], loaded from theme files by
//! [`theme::loader`]. Both are immutable values; state changes produce a
//! replacement snapshot rather than mutating one in place.

pub mod error;
pub mod plugin;
pub mod theme;

pub use error::{PluginError, ThemeError};
pub use plugin::descriptor::{InstallState, PluginDescriptor};
pub use plugin::metadata::{
    IconKind, MetadataCommand, PluginIcon, PluginId, PluginMetadata, Runtime,
};
pub use plugin::registry::PluginRegistry;
pub use plugin::setting::{PluginUserState, SelectOption, SettingDefinition};
pub use theme::definition::ThemeDefinition;
pub use theme::loader::{load_theme, load_theme_dir};
