//! Tiled JSON tileset loading (`.tsj`).

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{NextileError, Result};
use crate::types::Tileset;

#[derive(Debug, Deserialize)]
struct RawTileset {
    #[serde(default)]
    name: String,
    tilewidth: u32,
    tileheight: u32,
    tilecount: u32,
    #[serde(default)]
    columns: u32,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    imagewidth: u32,
    #[serde(default)]
    imageheight: u32,
    #[serde(default)]
    margin: u32,
    #[serde(default)]
    spacing: u32,
}

/// Load a Tiled JSON tileset. The image path is resolved against the
/// tileset file's directory.
pub fn load_tileset(path: &Path) -> Result<Tileset> {
    let source = fs::read_to_string(path).map_err(|e| NextileError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read tileset: {}", e),
    })?;

    let tileset = parse_tileset(&source)?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(match tileset.image.clone() {
        Some(image) => tileset.with_image(base.join(image)),
        None => tileset,
    })
}

/// Parse a single-image Tiled JSON tileset.
pub fn parse_tileset(source: &str) -> Result<Tileset> {
    let raw: RawTileset = serde_json::from_str(source).map_err(|e| NextileError::Parse {
        message: format!("Invalid Tiled tileset: {}", e),
        help: Some("Export the tileset from Tiled as JSON (.tsj)".to_string()),
    })?;

    let image = raw.image.clone().ok_or_else(|| NextileError::Parse {
        message: format!("Tileset '{}' has no image", raw.name),
        help: Some("Image collection tilesets are not supported; use a single tileset image".to_string()),
    })?;

    let columns = if raw.columns > 0 {
        raw.columns
    } else {
        derive_columns(&raw)?
    };

    let tileset = Tileset::grid(
        raw.name,
        raw.tilewidth,
        raw.tileheight,
        raw.imagewidth,
        raw.imageheight,
        raw.tilecount,
        columns,
        raw.margin,
        raw.spacing,
    )?;
    Ok(tileset.with_image(image))
}

/// Columns that fit across the image when the tileset does not say.
fn derive_columns(raw: &RawTileset) -> Result<u32> {
    let usable = raw.imagewidth.saturating_sub(raw.margin).checked_add(raw.spacing);
    let step = raw.tilewidth.checked_add(raw.spacing);
    match (usable, step) {
        (Some(usable), Some(step)) => Ok(usable / step.max(1)),
        _ => Err(NextileError::Parse {
            message: format!("Tileset '{}' has an out-of-range spacing of {}", raw.name, raw.spacing),
            help: Some("Check the tileset's margin, spacing and tile size".to_string()),
        }),
    }
}
