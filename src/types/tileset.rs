//! Tileset geometry.

use std::path::PathBuf;

use crate::error::{NextileError, Result};

/// Native hardware tile edge, in pixels.
pub const SUB_TILE_SIZE: u32 = 8;

/// Where a tile's pixels live in the tileset image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A tileset: tile geometry plus the backing image.
#[derive(Debug, Clone, PartialEq)]
pub struct Tileset {
    pub name: String,
    pub tile_width: u32,
    pub tile_height: u32,
    pub image_width: u32,
    pub image_height: u32,
    /// Path of the backing image, if the tileset came from disk.
    pub image: Option<PathBuf>,
    /// Per-tile source rectangles, indexed by tile id.
    pub tiles: Vec<TileRect>,
}

impl Tileset {
    /// Build a tileset laid out as a regular grid, the way Tiled slices
    /// single-image tilesets.
    ///
    /// Fails if a tile's source offset does not fit in a `u32`.
    #[allow(clippy::too_many_arguments)]
    pub fn grid(
        name: impl Into<String>,
        tile_width: u32,
        tile_height: u32,
        image_width: u32,
        image_height: u32,
        tile_count: u32,
        columns: u32,
        margin: u32,
        spacing: u32,
    ) -> Result<Self> {
        let name = name.into();
        let columns = columns.max(1);
        let step_x = tile_width.checked_add(spacing);
        let step_y = tile_height.checked_add(spacing);
        let offset = |index: u32, step: Option<u32>| {
            step.and_then(|step| index.checked_mul(step))
                .and_then(|offset| offset.checked_add(margin))
        };

        let tiles = (0..tile_count)
            .map(|id| {
                let x = offset(id % columns, step_x);
                let y = offset(id / columns, step_y);
                match (x, y) {
                    (Some(x), Some(y)) => Ok(TileRect {
                        x,
                        y,
                        width: tile_width,
                        height: tile_height,
                    }),
                    _ => Err(NextileError::Parse {
                        message: format!("Tileset '{}': tile {} lies outside the addressable image", name, id),
                        help: Some("Check the tileset's margin, spacing and tile size".to_string()),
                    }),
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name,
            tile_width,
            tile_height,
            image_width,
            image_height,
            image: None,
            tiles,
        })
    }

    /// Attach the backing image path.
    pub fn with_image(mut self, image: impl Into<PathBuf>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Number of 8x8 sub-tiles across and down one tile.
    pub fn sub_tiles(&self) -> (usize, usize) {
        (
            (self.tile_width / SUB_TILE_SIZE) as usize,
            (self.tile_height / SUB_TILE_SIZE) as usize,
        )
    }

    /// Reject tile sizes the hardware cannot split into 8x8 sub-tiles.
    pub fn check_dimensions(&self) -> Result<()> {
        check_tile_dimensions(self.tile_width, self.tile_height)
    }

    /// Size in bytes of the packed 4bpp bitmap for this tileset.
    pub fn packed_len(&self) -> usize {
        self.tile_count() * self.tile_width as usize * self.tile_height as usize / 2
    }
}

/// Both edges must be non-zero multiples of the sub-tile size.
pub fn check_tile_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 || width % SUB_TILE_SIZE != 0 || height % SUB_TILE_SIZE != 0 {
        return Err(NextileError::UnsupportedTileDimensions { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_rects() {
        let tileset = Tileset::grid("t", 16, 16, 32, 32, 4, 2, 0, 0).unwrap();

        assert_eq!(tileset.tile_count(), 4);
        assert_eq!(tileset.tiles[1], TileRect { x: 16, y: 0, width: 16, height: 16 });
        assert_eq!(tileset.tiles[2], TileRect { x: 0, y: 16, width: 16, height: 16 });
    }

    #[test]
    fn test_grid_rects_with_margin_and_spacing() {
        let tileset = Tileset::grid("t", 8, 8, 64, 64, 4, 2, 1, 2).unwrap();

        assert_eq!(tileset.tiles[0].x, 1);
        assert_eq!(tileset.tiles[1].x, 11);
        assert_eq!(tileset.tiles[3].y, 11);
    }

    #[test]
    fn test_grid_rejects_offsets_past_u32() {
        let err = Tileset::grid("t", 8, 8, 64, 64, 4, 2, 0, u32::MAX).unwrap_err();
        assert!(matches!(err, NextileError::Parse { help: Some(_), .. }), "{:?}", err);

        assert!(Tileset::grid("t", 8, 8, 64, 64, 2, 2, u32::MAX - 4, 0).is_err());
        assert!(Tileset::grid("t", 8, 8, 64, 64, 2, 2, u32::MAX - 16, 0).is_ok());
    }

    #[test]
    fn test_check_dimensions() {
        assert!(check_tile_dimensions(8, 8).is_ok());
        assert!(check_tile_dimensions(16, 32).is_ok());
        assert!(matches!(
            check_tile_dimensions(12, 16),
            Err(NextileError::UnsupportedTileDimensions { width: 12, height: 16 })
        ));
        assert!(check_tile_dimensions(16, 4).is_err());
        assert!(check_tile_dimensions(0, 8).is_err());
    }

    #[test]
    fn test_sub_tiles_and_packed_len() {
        let tileset = Tileset::grid("t", 16, 24, 64, 64, 3, 4, 0, 0).unwrap();
        assert_eq!(tileset.sub_tiles(), (2, 3));
        assert_eq!(tileset.packed_len(), 3 * 16 * 24 / 2);
    }
}
