//! Core domain types for nextile.
//!
//! - `Colour` - palette entries and their RGB332 encoding
//! - `TileGrid`, `TileLayer`, `Map` - map layers and per-cell flip flags
//! - `Tileset` - tile geometry and source rectangles
//! - `MetaTileRecord` - exported sub-tile placements

mod colour;
mod grid;
mod metatile;
mod tileset;

pub use colour::Colour;
pub use grid::{Cell, Flip, Layer, Map, TileGrid, TileLayer};
pub use metatile::{MetaTileRecord, Transform};
pub use tileset::{check_tile_dimensions, TileRect, Tileset, SUB_TILE_SIZE};
