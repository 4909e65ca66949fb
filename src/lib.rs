//! nextile - Tiled maps and tilesets to ZX Spectrum Next layer 3 data
//!
//! A library for turning an indexed tileset image into a packed 4bpp
//! bitmap with an RGB332 palette, and a tile map layer into metatile
//! records with hardware transform attributes.

pub mod cli;
pub mod decode;
pub mod discovery;
pub mod error;
pub mod export;
pub mod output;
pub mod render;
pub mod report;
pub mod tiled;
pub mod types;

#[cfg(test)]
mod test_support;

pub use decode::{decode_indexed, ImageContainer, IndexedImage};
pub use discovery::{discover, DiscoveryResult, DocumentKind, Manifest, ScanResult};
pub use error::{NextileError, Result};
pub use export::{
    export_map, export_tileset, export_tileset_with, write_map, write_tileset, DirectorySink,
    ExportSink, MemorySink, OutputFile, TilesetExport,
};
pub use render::{
    pack_tiles, quantize_palette, render_preview, resolve_metatiles, resolve_transform,
    PreviewOptions, SubTileOffsetPlan,
};
pub use report::{Collector, Diagnostic, Reporter, Severity, Silent};
pub use tiled::{load_map, load_tileset};
pub use types::{
    Cell, Colour, Flip, Layer, Map, MetaTileRecord, TileGrid, TileLayer, TileRect, Tileset,
    Transform,
};
