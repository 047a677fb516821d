use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::error::ThemeError;
use crate::theme::definition::ThemeDefinition;

// Hex (#RGB, #RRGGBB, #RRGGBBAA), rgb()/rgba(), or a named color. Theme
// files in the wild use all three; anything else is a typo.
fn color_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(#[0-9a-fA-F]{3}|#[0-9a-fA-F]{6}|#[0-9a-fA-F]{8}|[A-Za-z]+|rgba?\(\s*\d{1,3}\s*,\s*\d{1,3}\s*,\s*\d{1,3}\s*(,\s*(0|1|0?\.[0-9]+|1\.0)\s*)?\))$",
        )
        .expect("color pattern compiles")
    })
}

pub fn is_valid_color(value: &str) -> bool {
    color_pattern().is_match(value)
}

/// Checks every color field of an already-parsed theme. Geometry needs no
/// check here; the shape cannot hold a negative value.
pub fn validate_theme(theme: &ThemeDefinition) -> Result<(), ThemeError> {
    for (field, value) in theme.color_fields() {
        if !is_valid_color(value) {
            return Err(ThemeError::InvalidColor {
                theme_id: theme.theme_id.clone(),
                field,
                value: value.to_string(),
            });
        }
    }

    Ok(())
}

/// Loads and validates a single theme file.
pub fn load_theme(path: &Path) -> Result<ThemeDefinition, ThemeError> {
    let raw = fs::read_to_string(path).map_err(|source| ThemeError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let theme: ThemeDefinition =
        serde_json::from_str(&raw).map_err(|source| ThemeError::Parse { source })?;

    validate_theme(&theme)?;
    Ok(theme)
}

/// Loads every `*.json` theme in a directory, sorted by theme id.
/// Unloadable files are logged and skipped so one broken theme cannot take
/// down the whole selection list.
pub fn load_theme_dir(dir: &Path) -> Vec<ThemeDefinition> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!("skipping theme directory {}: {err}", dir.display());
            return Vec::new();
        }
    };

    let mut themes = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }

        match load_theme(&path) {
            Ok(theme) => {
                tracing::debug!("loaded theme {}", theme.theme_id);
                themes.push(theme);
            }
            Err(err) => tracing::warn!("theme {}: {err}", path.display()),
        }
    }

    themes.sort_by(|a, b| a.theme_id.cmp(&b.theme_id));
    themes
}

/// Directory scanned for user-installed themes.
pub fn default_theme_dir() -> PathBuf {
    if let Some(project_dirs) = directories::ProjectDirs::from("", "", "beacon") {
        return project_dirs.data_dir().join("themes");
    }

    if let Some(base_dirs) = directories::BaseDirs::new() {
        return base_dirs.home_dir().join(".local/share/beacon/themes");
    }

    PathBuf::from(".beacon-themes")
}
