//! Indexed PNG decoding.
//!
//! Just enough PNG to get palette indices and the colour table out of an
//! 8-bit indexed image: chunk splitting in [`container`], inflation and
//! filter stripping in [`scanline`].

mod container;
mod scanline;

pub use container::{
    ImageContainer, ImageHeader, CHUNK_IDAT, CHUNK_IEND, CHUNK_IHDR, CHUNK_PLTE,
    COLOR_INDEXED, PNG_SIGNATURE,
};
pub use scanline::{decode_pixels, inflate, strip_filter_bytes, FILTER_NONE};

use crate::error::Result;
use crate::report::Reporter;

/// Pixel indices and raw palette of an indexed image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage {
    pub width: usize,
    pub height: usize,
    /// One palette index per pixel, row-major, stride = `width`.
    pub pixels: Vec<u8>,
    /// Raw PLTE payload (RGB triples), if the image has one.
    pub palette: Option<Vec<u8>>,
}

/// Decode an indexed PNG whose dimensions are known up front.
///
/// `width` and `height` come from the tileset, not from IHDR; a disagreeing
/// IHDR is reported but the tileset's numbers win.
pub fn decode_indexed<R: Reporter>(
    bytes: &[u8],
    width: usize,
    height: usize,
    reporter: &R,
) -> Result<IndexedImage> {
    let container = ImageContainer::parse(bytes)?;
    reporter.info(
        "nextile::png",
        format!("chunks: {}", container.chunk_names().join(", ")),
    );

    if let Some(header) = container.header() {
        if header.width as usize != width || header.height as usize != height {
            reporter.warning(
                "nextile::png::size",
                format!(
                    "image is {}x{} but the tileset expects {}x{}",
                    header.width, header.height, width, height
                ),
            );
        }
    }

    let palettes = container.palette_count();
    if palettes > 1 {
        reporter.warning(
            "nextile::png::palette",
            format!("{} PLTE chunks found, using the first", palettes),
        );
    }

    let compressed = container.image_data();
    let pixels = decode_pixels(&compressed, width, height, reporter)?;

    Ok(IndexedImage {
        width,
        height,
        pixels,
        palette: container.palette().map(<[u8]>::to_vec),
    })
}
