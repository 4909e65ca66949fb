//! Tiled JSON loading.
//!
//! Reads maps (`.tmj`) and tilesets (`.tsj`) saved in Tiled's JSON format
//! into nextile's map and tileset types.

mod gid;
mod map;
mod tileset;

pub use gid::{
    resolve_gid, split_gid, FLIPPED_ANTI_DIAGONALLY, FLIPPED_HORIZONTALLY, FLIPPED_VERTICALLY,
    ROTATED_HEXAGONAL_120,
};
pub use map::{load_map, parse_map};
pub use tileset::{load_tileset, parse_tileset};
