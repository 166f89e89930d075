//! Requirements manifest loading.
//!
//! A manifest is UTF-8 text with one requirement per non-blank line. Parsing
//! is all-or-nothing: the first malformed line aborts the whole manifest.

use std::fs;
use std::path::Path;

use anyhow::Context;

use super::requirement::Requirement;
use crate::error::{EnvCheckError, Result};

/// Parse manifest content. `path` is only used for error reporting.
pub fn parse_manifest(content: &str, path: &Path) -> Result<Vec<Requirement>> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            Requirement::parse(line).map_err(|e| EnvCheckError::ManifestParse {
                path: path.to_path_buf(),
                line: index + 1,
                message: match e {
                    EnvCheckError::InvalidRequirement { message, .. } => message,
                    other => other.to_string(),
                },
            })
        })
        .collect()
}

/// Read and parse a manifest file.
pub fn load_manifest(path: &Path) -> Result<Vec<Requirement>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest {}", path.display()))?;
    let requirements = parse_manifest(&content, path)?;
    tracing::debug!(
        "Loaded {} requirements from {}",
        requirements.len(),
        path.display()
    );
    Ok(requirements)
}
