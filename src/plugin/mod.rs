pub mod descriptor;
pub mod metadata;
pub mod registry;
pub mod setting;

pub use descriptor::{InstallState, PluginDescriptor};
pub use metadata::{PluginId, PluginMetadata, Runtime};
pub use registry::PluginRegistry;
