//! File system scanner for Tiled documents.
//!
//! Recursively scans directories for maps (`.tmj`) and tilesets (`.tsj`).
//! Plain `.json` files are classified by their top-level `type` field.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use walkdir::WalkDir;

use super::manifest::Manifest;

/// Kind of Tiled document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Map,
    Tileset,
}

/// Result of scanning a directory for Tiled documents.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Discovered map files.
    pub maps: Vec<PathBuf>,
    /// Discovered tileset files.
    pub tilesets: Vec<PathBuf>,
}

impl ScanResult {
    /// Create a new empty scan result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the total number of discovered files.
    pub fn total(&self) -> usize {
        self.maps.len() + self.tilesets.len()
    }

    /// Check if no files were discovered.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Record a file under its document kind.
    pub fn push(&mut self, kind: DocumentKind, path: PathBuf) {
        match kind {
            DocumentKind::Map => self.maps.push(path),
            DocumentKind::Tileset => self.tilesets.push(path),
        }
    }

    /// Merge another scan result into this one.
    pub fn merge(&mut self, other: ScanResult) {
        self.maps.extend(other.maps);
        self.tilesets.extend(other.tilesets);
    }
}

/// Scan a directory for Tiled documents.
///
/// Results are sorted so exports happen in a stable order.
pub fn scan_directory(root: &Path, manifest: &Manifest) -> ScanResult {
    let mut result = ScanResult::new();

    if !root.exists() {
        return result;
    }

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if !entry.file_type().is_file() || manifest.is_excluded(path) {
            continue;
        }

        if let Some(kind) = detect_document_kind(path) {
            result.push(kind, path.to_path_buf());
        }
    }

    result
}

/// Scan multiple source paths relative to a base directory.
pub fn scan_sources(sources: &[String], base_path: &Path, manifest: &Manifest) -> ScanResult {
    let mut result = ScanResult::new();

    for source in sources {
        let source_path = if Path::new(source).is_absolute() {
            PathBuf::from(source)
        } else {
            base_path.join(source)
        };

        result.merge(scan_directory(&source_path, manifest));
    }

    result
}

#[derive(Deserialize)]
struct DocumentType {
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Detect the document kind from a path.
///
/// `.tmj` and `.tsj` are decided by extension alone; `.json` files are
/// read and classified by their `type` field.
pub fn detect_document_kind(path: &Path) -> Option<DocumentKind> {
    match path.extension()?.to_str()? {
        "tmj" => Some(DocumentKind::Map),
        "tsj" => Some(DocumentKind::Tileset),
        "json" => {
            let content = fs::read_to_string(path).ok()?;
            let doc: DocumentType = serde_json::from_str(&content).ok()?;
            match doc.kind.as_deref()? {
                "map" => Some(DocumentKind::Map),
                "tileset" => Some(DocumentKind::Tileset),
                _ => None,
            }
        }
        _ => None,
    }
}
