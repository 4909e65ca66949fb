//! PNG previews of packed tile bitmaps.
//!
//! Reassembles a 4bpp layer 3 bitmap into tiles laid out on a grid and
//! colours them through an RGB332 palette, so exported data can be checked
//! by eye.

use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::error::{NextileError, Result};
use crate::types::{check_tile_dimensions, Colour, SUB_TILE_SIZE};

use super::pack::unpack_nibbles;

const SUB: usize = SUB_TILE_SIZE as usize;
const SUB_TILE_BYTES: usize = SUB * SUB / 2;

/// Colour used for indices that fall outside the palette.
const MISSING: Rgba<u8> = Rgba([255, 0, 255, 255]);

/// Layout options for a preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewOptions {
    /// Tile width in pixels (multiple of 8).
    pub tile_width: u32,
    /// Tile height in pixels (multiple of 8).
    pub tile_height: u32,
    /// Tiles per preview row.
    pub columns: u32,
    /// 16-colour palette block applied to every tile.
    pub palette_offset: u8,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            tile_width: 8,
            tile_height: 8,
            columns: 16,
            palette_offset: 0,
        }
    }
}

/// Render `packed` through `palette` (one RGB332 byte per entry).
pub fn render_preview(packed: &[u8], palette: &[u8], options: &PreviewOptions) -> Result<RgbaImage> {
    check_tile_dimensions(options.tile_width, options.tile_height)?;

    let sub_cols = options.tile_width as usize / SUB;
    let sub_rows = options.tile_height as usize / SUB;
    let tile_bytes = sub_cols * sub_rows * SUB_TILE_BYTES;

    if packed.len() % tile_bytes != 0 {
        return Err(NextileError::Build {
            message: format!(
                "Bitmap is {} bytes, not a whole number of {}x{} tiles",
                packed.len(),
                options.tile_width,
                options.tile_height
            ),
            help: Some("Pass the tile size the bitmap was exported with".to_string()),
        });
    }

    let tile_count = packed.len() / tile_bytes;
    let columns = (options.columns.max(1) as usize).min(tile_count.max(1));
    let rows = tile_count.div_ceil(columns);

    let width = (columns * options.tile_width as usize) as u32;
    let height = (rows * options.tile_height as usize) as u32;
    let mut img: RgbaImage = ImageBuffer::from_pixel(width, height, Rgba([0, 0, 0, 0]));

    let base = options.palette_offset as usize * 16;
    let samples = unpack_nibbles(packed);
    let sub_tile_samples = SUB * SUB;

    for (sub_index, sub_tile) in samples.chunks_exact(sub_tile_samples).enumerate() {
        let tile = sub_index / (sub_cols * sub_rows);
        let within = sub_index % (sub_cols * sub_rows);
        let origin_x = (tile % columns) * options.tile_width as usize + (within % sub_cols) * SUB;
        let origin_y = (tile / columns) * options.tile_height as usize + (within / sub_cols) * SUB;

        for (i, &sample) in sub_tile.iter().enumerate() {
            let colour = palette
                .get(base + sample as usize)
                .map(|&packed| Rgba(Colour::from_rgb332(packed).to_rgba()))
                .unwrap_or(MISSING);
            let x = (origin_x + i % SUB) as u32;
            let y = (origin_y + i / SUB) as u32;
            img.put_pixel(x, y, colour);
        }
    }

    Ok(img)
}

/// Render a preview and save it as PNG, scaled by an integer factor.
pub fn write_preview(
    packed: &[u8],
    palette: &[u8],
    options: &PreviewOptions,
    path: &Path,
    scale: u32,
) -> Result<()> {
    let img = render_preview(packed, palette, options)?;
    let img = scale_image(&img, scale);

    img.save(path).map_err(|e| NextileError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write PNG: {}", e),
    })?;

    Ok(())
}

/// Nearest-neighbour integer upscale.
pub fn scale_image(img: &RgbaImage, scale: u32) -> RgbaImage {
    let scale = scale.max(1);
    if scale == 1 {
        return img.clone();
    }

    let mut scaled: RgbaImage = ImageBuffer::new(img.width() * scale, img.height() * scale);
    for (x, y, pixel) in img.enumerate_pixels() {
        for sy in 0..scale {
            for sx in 0..scale {
                scaled.put_pixel(x * scale + sx, y * scale + sy, *pixel);
            }
        }
    }
    scaled
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn grey_ramp() -> Vec<u8> {
        (0..16u8).map(|i| Colour::rgb(i * 16, i * 16, i * 16).to_rgb332()).collect()
    }

    #[test]
    fn test_preview_single_sub_tile() {
        // Left half index 0, right half index 15
        let packed: Vec<u8> = (0..8).flat_map(|_| [0x00, 0x00, 0xFF, 0xFF]).collect();

        let palette = vec![Colour::BLACK.to_rgb332(); 15]
            .into_iter()
            .chain([Colour::WHITE.to_rgb332()])
            .collect::<Vec<_>>();
        let img = render_preview(&packed, &palette, &PreviewOptions::default()).unwrap();

        assert_eq!(img.dimensions(), (8, 8));
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(7, 7).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_preview_reassembles_metatiles() {
        // One 16x8 tile: left sub-tile index 1, right sub-tile index 2
        let mut packed = vec![0x11; 32];
        packed.extend(vec![0x22; 32]);
        let palette = grey_ramp();

        let options = PreviewOptions {
            tile_width: 16,
            tile_height: 8,
            ..PreviewOptions::default()
        };
        let img = render_preview(&packed, &palette, &options).unwrap();

        assert_eq!(img.dimensions(), (16, 8));
        let left = Colour::from_rgb332(palette[1]).to_rgba();
        let right = Colour::from_rgb332(palette[2]).to_rgba();
        assert_eq!(img.get_pixel(3, 3).0, left);
        assert_eq!(img.get_pixel(12, 3).0, right);
    }

    #[test]
    fn test_preview_wraps_rows() {
        let packed = vec![0u8; 32 * 5];
        let options = PreviewOptions {
            columns: 2,
            ..PreviewOptions::default()
        };
        let img = render_preview(&packed, &grey_ramp(), &options).unwrap();
        assert_eq!(img.dimensions(), (16, 24));
    }

    #[test]
    fn test_preview_palette_offset_out_of_range() {
        let packed = vec![0u8; 32];
        let options = PreviewOptions {
            palette_offset: 3,
            ..PreviewOptions::default()
        };
        let img = render_preview(&packed, &grey_ramp(), &options).unwrap();
        assert_eq!(*img.get_pixel(0, 0), MISSING);
    }

    #[test]
    fn test_preview_rejects_partial_tiles() {
        let options = PreviewOptions {
            tile_width: 16,
            tile_height: 16,
            ..PreviewOptions::default()
        };
        assert!(render_preview(&[0; 32], &grey_ramp(), &options).is_err());
    }

    #[test]
    fn test_write_preview_scaled() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preview.png");

        write_preview(&[0x00; 32], &grey_ramp(), &PreviewOptions::default(), &path, 2).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.width(), 16);
        assert_eq!(img.height(), 16);
    }
}
