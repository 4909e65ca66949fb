//! Metatile records for JSON export.

use serde::Serialize;

/// One 8x8 sub-tile placement in the exported metatile description.
///
/// Serialized in camelCase. `tileId` is omitted for empty cells so that
/// consumers can tell "no tile" apart from tile 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaTileRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tile_id: Option<u32>,

    /// Sub-tile position inside the metatile, `[column, row]`.
    pub sub_tile_coords: [usize; 2],

    pub x_mirror: bool,
    pub y_mirror: bool,
    pub rotate: bool,
}

/// Hardware transform attributes for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transform {
    pub x_mirror: bool,
    pub y_mirror: bool,
    pub rotate: bool,
}

impl Transform {
    pub const fn new(x_mirror: bool, y_mirror: bool, rotate: bool) -> Self {
        Self {
            x_mirror,
            y_mirror,
            rotate,
        }
    }
}
