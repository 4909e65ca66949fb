//! Sub-tile read planning.
//!
//! Every tile is cut into 8x8 sub-tiles, left to right then top to bottom.
//! Each sub-tile becomes eight row offsets into the flat pixel buffer; each
//! offset starts a run of 8 horizontally contiguous pixels.

use crate::types::{Tileset, SUB_TILE_SIZE};

const RUN: usize = SUB_TILE_SIZE as usize;

/// Row-start offsets of one 8x8 sub-tile.
pub type SubTileRows = [usize; RUN];

/// Read offsets for every sub-tile of every tile, in output order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubTileOffsetPlan {
    sub_tiles_per_tile: usize,
    sub_tiles: Vec<SubTileRows>,
}

impl SubTileOffsetPlan {
    /// Plan reads for `tileset` over an image with the given row stride.
    pub fn new(tileset: &Tileset, stride: usize) -> Self {
        let (sub_cols, sub_rows) = tileset.sub_tiles();
        let mut sub_tiles = Vec::with_capacity(tileset.tile_count() * sub_cols * sub_rows);

        for rect in &tileset.tiles {
            let (x, y) = (rect.x as usize, rect.y as usize);
            for sub_row in 0..sub_rows {
                for sub_col in 0..sub_cols {
                    let rows: SubTileRows = std::array::from_fn(|r| {
                        (y + sub_row * RUN + r) * stride + x + sub_col * RUN
                    });
                    sub_tiles.push(rows);
                }
            }
        }

        Self {
            sub_tiles_per_tile: sub_cols * sub_rows,
            sub_tiles,
        }
    }

    /// All sub-tiles, in output order.
    pub fn sub_tiles(&self) -> &[SubTileRows] {
        &self.sub_tiles
    }

    /// The sub-tiles of one tile.
    pub fn tile(&self, index: usize) -> &[SubTileRows] {
        let start = index * self.sub_tiles_per_tile;
        self.sub_tiles
            .get(start..start + self.sub_tiles_per_tile)
            .unwrap_or(&[])
    }

    /// Every run start, flattened in output order.
    pub fn offsets(&self) -> impl Iterator<Item = usize> + '_ {
        self.sub_tiles.iter().flatten().copied()
    }

    /// Number of pixels the plan reads.
    pub fn pixel_count(&self) -> usize {
        self.sub_tiles.len() * RUN * RUN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_single_sub_tile() {
        let tileset = Tileset::grid("t", 8, 8, 8, 8, 1, 1, 0, 0).unwrap();
        let plan = SubTileOffsetPlan::new(&tileset, 8);

        assert_eq!(plan.sub_tiles(), &[[0, 8, 16, 24, 32, 40, 48, 56]]);
    }

    #[test]
    fn test_sub_tiles_are_row_major_within_tile() {
        // One 16x16 tile in a 16-pixel-wide image
        let tileset = Tileset::grid("t", 16, 16, 16, 16, 1, 1, 0, 0).unwrap();
        let plan = SubTileOffsetPlan::new(&tileset, 16);
        let starts: Vec<usize> = plan.sub_tiles().iter().map(|s| s[0]).collect();

        // top-left, top-right, bottom-left, bottom-right
        assert_eq!(starts, vec![0, 8, 128, 136]);
        assert_eq!(plan.sub_tiles()[1][1], 16 + 8);
    }

    #[test]
    fn test_uses_tile_rect_offsets() {
        let tileset = Tileset::grid("t", 8, 8, 32, 16, 8, 4, 0, 0).unwrap();
        let plan = SubTileOffsetPlan::new(&tileset, 32);

        assert_eq!(plan.tile(1)[0][0], 8);
        assert_eq!(plan.tile(5)[0][0], 8 * 32 + 8);
        assert_eq!(plan.tile(5)[0][7], 15 * 32 + 8);
        assert!(plan.tile(8).is_empty());
    }

    #[test]
    fn test_plan_covers_each_tile_exactly() {
        for (w, h) in [(8, 8), (16, 16), (32, 8), (8, 24), (32, 32)] {
            let tileset = Tileset::grid("t", w, h, w * 2, h, 2, 2, 0, 0).unwrap();
            let stride = (w * 2) as usize;
            let plan = SubTileOffsetPlan::new(&tileset, stride);

            let (cols, rows) = tileset.sub_tiles();
            assert_eq!(cols * rows * 64, (w * h) as usize);

            for tile in 0..2 {
                let pixels: HashSet<usize> = plan
                    .tile(tile)
                    .iter()
                    .flatten()
                    .flat_map(|&start| start..start + 8)
                    .collect();
                assert_eq!(pixels.len(), (w * h) as usize, "gap or overlap for {w}x{h}");
            }
            assert_eq!(plan.pixel_count(), 2 * (w * h) as usize);
        }
    }
}
