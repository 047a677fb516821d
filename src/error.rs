use std::path::PathBuf;

use thiserror::Error;

/// Failures while reading or validating a plugin manifest or registry state.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {}: {source}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("plugin {id} declares no trigger keywords")]
    NoTriggerKeywords { id: String },

    #[error("plugin {id} requires unsupported runtime {runtime:?}")]
    UnsupportedRuntime { id: String, runtime: String },

    #[error("plugin {id} is already registered")]
    DuplicateId { id: String },

    #[error("plugin {id} is not registered")]
    NotRegistered { id: String },
}

/// Failures while loading or validating a theme file.
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse theme: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },

    #[error("theme {theme_id}: {field} is not a valid color string: {value:?}")]
    InvalidColor {
        theme_id: String,
        field: &'static str,
        value: String,
    },
}
