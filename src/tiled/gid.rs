//! Tiled global tile ids.
//!
//! The top bits of a GID carry the cell's flip flags; the rest is the tile
//! index offset by the owning tileset's `firstgid`. GID 0 is an empty cell.

use crate::types::{Cell, Flip};

pub const FLIPPED_HORIZONTALLY: u32 = 0x8000_0000;
pub const FLIPPED_VERTICALLY: u32 = 0x4000_0000;
pub const FLIPPED_ANTI_DIAGONALLY: u32 = 0x2000_0000;
/// Hexagonal 120 degree rotation; meaningless for orthogonal maps.
pub const ROTATED_HEXAGONAL_120: u32 = 0x1000_0000;

const FLAG_MASK: u32 =
    FLIPPED_HORIZONTALLY | FLIPPED_VERTICALLY | FLIPPED_ANTI_DIAGONALLY | ROTATED_HEXAGONAL_120;

/// Split a raw GID into tile GID and flip flags.
pub fn split_gid(raw: u32) -> (u32, Flip) {
    let flip = Flip::new(
        raw & FLIPPED_HORIZONTALLY != 0,
        raw & FLIPPED_VERTICALLY != 0,
        raw & FLIPPED_ANTI_DIAGONALLY != 0,
    );
    (raw & !FLAG_MASK, flip)
}

/// Resolve a raw GID against the map's tileset `firstgid`s (ascending).
///
/// The owning tileset is the one with the largest `firstgid` not above the
/// GID. With no tilesets the Tiled default of 1 is assumed.
pub fn resolve_gid(raw: u32, first_gids: &[u32]) -> Cell {
    let (gid, flip) = split_gid(raw);
    if gid == 0 {
        return Cell { tile: None, flip };
    }

    let first_gid = first_gids
        .iter()
        .copied()
        .filter(|&first| first <= gid)
        .max()
        .unwrap_or(1);

    Cell {
        tile: gid.checked_sub(first_gid),
        flip,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_gid() {
        assert_eq!(split_gid(42), (42, Flip::NONE));
    }

    #[test]
    fn test_split_flags() {
        let (gid, flip) = split_gid(FLIPPED_HORIZONTALLY | FLIPPED_ANTI_DIAGONALLY | 7);
        assert_eq!(gid, 7);
        assert_eq!(flip, Flip::new(true, false, true));
    }

    #[test]
    fn test_hex_rotation_is_masked() {
        assert_eq!(split_gid(ROTATED_HEXAGONAL_120 | 3).0, 3);
    }

    #[test]
    fn test_resolve_empty_cell() {
        assert_eq!(resolve_gid(0, &[1]).tile, None);
    }

    #[test]
    fn test_resolve_first_tile_is_zero() {
        assert_eq!(resolve_gid(1, &[1]).tile, Some(0));
    }

    #[test]
    fn test_resolve_picks_owning_tileset() {
        assert_eq!(resolve_gid(70, &[1, 65]).tile, Some(5));
        assert_eq!(resolve_gid(64, &[1, 65]).tile, Some(63));
    }

    #[test]
    fn test_resolve_without_tilesets() {
        assert_eq!(resolve_gid(3, &[]).tile, Some(2));
    }

    #[test]
    fn test_flipped_empty_cell_keeps_flags() {
        let cell = resolve_gid(FLIPPED_VERTICALLY, &[1]);
        assert_eq!(cell.tile, None);
        assert!(cell.flip.vertical);
    }
}
