pub mod definition;
pub mod loader;

pub use definition::ThemeDefinition;
pub use loader::{load_theme, load_theme_dir};
