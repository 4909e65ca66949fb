//! Tiled JSON map loading (`.tmj`).

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{NextileError, Result};
use crate::types::{Layer, Map, TileLayer};

use super::gid::resolve_gid;

#[derive(Debug, Deserialize)]
struct RawMap {
    tilewidth: u32,
    tileheight: u32,
    #[serde(default)]
    layers: Vec<RawLayer>,
    #[serde(default)]
    tilesets: Vec<RawTilesetRef>,
}

#[derive(Debug, Deserialize)]
struct RawTilesetRef {
    firstgid: u32,
}

#[derive(Debug, Deserialize)]
struct RawLayer {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    width: usize,
    #[serde(default)]
    height: usize,
    #[serde(default)]
    data: Option<LayerData>,
    #[serde(default)]
    encoding: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LayerData {
    Gids(Vec<u32>),
    Encoded(String),
}

/// Load a Tiled JSON map from disk.
pub fn load_map(path: &Path) -> Result<Map> {
    let source = fs::read_to_string(path).map_err(|e| NextileError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read map: {}", e),
    })?;
    parse_map(&source)
}

/// Parse a Tiled JSON map.
///
/// Tile layers must store their data as a plain GID array (Tiled's CSV
/// layer format). Non-tile layers are kept by name only.
pub fn parse_map(source: &str) -> Result<Map> {
    let raw: RawMap = serde_json::from_str(source).map_err(|e| NextileError::Parse {
        message: format!("Invalid Tiled map: {}", e),
        help: Some("Export the map from Tiled as JSON (.tmj)".to_string()),
    })?;

    let mut first_gids: Vec<u32> = raw.tilesets.iter().map(|t| t.firstgid).collect();
    first_gids.sort_unstable();

    let layers = raw
        .layers
        .into_iter()
        .map(|layer| convert_layer(layer, &first_gids))
        .collect::<Result<Vec<_>>>()?;

    Ok(Map {
        tile_width: raw.tilewidth,
        tile_height: raw.tileheight,
        layers,
    })
}

fn convert_layer(raw: RawLayer, first_gids: &[u32]) -> Result<Layer> {
    if raw.kind != "tilelayer" {
        return Ok(Layer::Other {
            name: raw.name,
            kind: raw.kind,
        });
    }

    let gids = match raw.data {
        Some(LayerData::Gids(gids)) => gids,
        Some(LayerData::Encoded(_)) => {
            return Err(NextileError::Parse {
                message: format!(
                    "Layer '{}' uses {} encoding",
                    raw.name,
                    raw.encoding.as_deref().unwrap_or("string")
                ),
                help: Some("Set the layer format to CSV in the map properties".to_string()),
            })
        }
        None => {
            return Err(NextileError::Parse {
                message: format!("Layer '{}' has no tile data", raw.name),
                help: Some("Infinite maps are not supported; disable 'Infinite' in the map properties".to_string()),
            })
        }
    };

    let cells = gids.into_iter().map(|gid| resolve_gid(gid, first_gids)).collect();
    Ok(Layer::Tiles(TileLayer::new(raw.name, raw.width, raw.height, cells)))
}
