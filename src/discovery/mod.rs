//! Project discovery for nextile.
//!
//! Finds every Tiled map and tileset in a project directory, either from
//! the `sources` listed in a `nextile.yaml` manifest or by scanning the
//! whole directory.
//!
//! # Example
//!
//! ```ignore
//! use nextile::discovery::discover;
//!
//! let project = discover("./game")?;
//! println!("Found {} documents", project.scan.total());
//! ```

mod manifest;
mod scanner;

use std::path::{Path, PathBuf};

use crate::error::Result;

pub use manifest::Manifest;
pub use scanner::{detect_document_kind, scan_directory, scan_sources, DocumentKind, ScanResult};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "nextile.yaml";

/// Result of discovering documents in a project.
#[derive(Debug)]
pub struct DiscoveryResult {
    /// The project root directory.
    pub root: PathBuf,

    /// The loaded manifest (default if no nextile.yaml was found).
    pub manifest: Manifest,

    /// Whether a nextile.yaml manifest was found.
    pub has_manifest: bool,

    /// Discovered maps and tilesets.
    pub scan: ScanResult,
}

impl DiscoveryResult {
    /// Output directory, resolved against the project root.
    pub fn output_dir(&self) -> PathBuf {
        if self.manifest.output.is_absolute() {
            self.manifest.output.clone()
        } else {
            self.root.join(&self.manifest.output)
        }
    }
}

/// Discover Tiled documents in a project directory.
pub fn discover(root: impl AsRef<Path>) -> Result<DiscoveryResult> {
    let root = root.as_ref().to_path_buf();

    let manifest_path = root.join(MANIFEST_FILENAME);
    let (mut manifest, has_manifest) = if manifest_path.exists() {
        (Manifest::load(&manifest_path)?, true)
    } else {
        (Manifest::default(), false)
    };

    // Never pick up our own exports on a rebuild.
    if let Some(output) = manifest.output.to_str() {
        let pattern = format!("{}/*", output.trim_end_matches('/'));
        if !manifest.excludes.contains(&pattern) {
            manifest.excludes.push(pattern);
        }
    }

    let scan = scan_sources(&manifest.effective_sources(), &root, &manifest);

    Ok(DiscoveryResult {
        root,
        manifest,
        has_manifest,
        scan,
    })
}
