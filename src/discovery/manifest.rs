//! Project manifest (nextile.yaml) parsing.
//!
//! The manifest defines project configuration: where to look for Tiled
//! documents, where to write exports, and what to skip.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{NextileError, Result};
use crate::export::PALETTE_EXTENSION;

/// Project manifest loaded from nextile.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Source directories to scan for maps and tilesets.
    /// Defaults to the project root if empty.
    pub sources: Vec<String>,

    /// Output directory for exported files.
    pub output: PathBuf,

    /// Patterns to exclude from discovery.
    pub excludes: Vec<String>,

    /// Extension appended to a bitmap's file name for its palette.
    pub palette_extension: String,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            sources: vec![],
            output: PathBuf::from("dist"),
            excludes: vec![],
            palette_extension: PALETTE_EXTENSION.to_string(),
        }
    }
}

impl Manifest {
    /// Load manifest from a nextile.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| NextileError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| NextileError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check nextile.yaml syntax".to_string()),
        })
    }

    /// Check if a path should be excluded based on exclude patterns.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.excludes
            .iter()
            .any(|pattern| matches_pattern(&path_str, pattern))
    }

    /// Get effective source paths, defaulting to the project root.
    pub fn effective_sources(&self) -> Vec<String> {
        if self.sources.is_empty() {
            vec![".".to_string()]
        } else {
            self.sources.clone()
        }
    }
}

/// Simple glob matching: `**/dir/*`, `*.ext`, `dir/*`, or a substring.
fn matches_pattern(path: &str, pattern: &str) -> bool {
    if let Some(suffix) = pattern.strip_prefix("**/") {
        if let Some(dir) = suffix.strip_suffix("/*") {
            return path.starts_with(&format!("{}/", dir)) || path.contains(&format!("/{}/", dir));
        }
        return path.contains(suffix);
    }

    if let Some(suffix) = pattern.strip_prefix('*') {
        if !pattern.contains('/') {
            return path.ends_with(suffix);
        }
    }

    if let Some(prefix) = pattern.strip_suffix("/*") {
        return path.starts_with(&format!("{}/", prefix))
            || path.contains(&format!("/{}/", prefix));
    }

    path.contains(pattern)
}
