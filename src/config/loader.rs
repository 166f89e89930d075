//! Settings file loading.

use crate::config::schema::Settings;
use crate::error::{EnvCheckError, Result};
use std::fs;
use std::path::Path;

/// Load settings from an optional path.
///
/// Without a path the built-in defaults apply. An explicit path that does
/// not exist is an error.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => {
            let settings = load_settings_file(path)?;
            tracing::debug!("Loaded settings from {}", path.display());
            Ok(settings)
        }
        None => Ok(Settings::default()),
    }
}

/// Load and parse a settings file.
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            EnvCheckError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            EnvCheckError::Io(e)
        }
    })?;

    parse_settings(&content, path)
}

/// Parse YAML content into [`Settings`].
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_settings(content: &str, source_path: &Path) -> Result<Settings> {
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }
    serde_yaml::from_str(content).map_err(|e| EnvCheckError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}
