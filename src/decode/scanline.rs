//! IDAT inflation and scanline filter stripping.
//!
//! Only filter type 0 (none) is understood. Rows carrying any other filter
//! byte are passed through untouched: the filter byte is dropped and the
//! row's samples are used as stored. That is a known limitation, so it is
//! reported as a warning rather than an error.

use std::io::Read;

use flate2::read::ZlibDecoder;

use crate::error::{NextileError, Result};
use crate::report::Reporter;

/// Scanline filter type "none".
pub const FILTER_NONE: u8 = 0;

/// Decompress a zlib stream.
pub fn inflate(compressed: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(compressed);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| NextileError::DecompressionError {
            message: e.to_string(),
        })?;
    Ok(out)
}

/// Drop the leading filter byte of every `width + 1`-byte scanline.
///
/// Returns the samples and the number of rows whose filter byte was not
/// [`FILTER_NONE`]. A trailing partial row keeps whatever samples it has.
pub fn strip_filter_bytes(inflated: &[u8], width: usize) -> (Vec<u8>, usize) {
    let row_len = width + 1;
    let mut pixels = Vec::with_capacity(inflated.len() / row_len * width);
    let mut filtered_rows = 0;

    for row in inflated.chunks(row_len) {
        if row[0] != FILTER_NONE {
            filtered_rows += 1;
        }
        pixels.extend_from_slice(&row[1..]);
    }

    (pixels, filtered_rows)
}

/// Inflate `compressed` and return the flat, row-major pixel buffer.
///
/// Fails with `PixelCountMismatch` unless exactly `width * height` samples
/// come out.
pub fn decode_pixels<R: Reporter>(
    compressed: &[u8],
    width: usize,
    height: usize,
    reporter: &R,
) -> Result<Vec<u8>> {
    let inflated = inflate(compressed)?;
    reporter.info(
        "nextile::inflate",
        format!("inflated {} bytes to {}", compressed.len(), inflated.len()),
    );

    let (pixels, filtered_rows) = strip_filter_bytes(&inflated, width);
    if filtered_rows > 0 {
        reporter.warning(
            "nextile::inflate::filter",
            format!(
                "{} scanline(s) use a PNG filter other than none; their samples are used as stored",
                filtered_rows
            ),
        );
    }

    let expected = width * height;
    if pixels.len() != expected {
        return Err(NextileError::PixelCountMismatch {
            expected,
            actual: pixels.len(),
        });
    }

    reporter.info(
        "nextile::inflate",
        format!("{} pixels ({}x{})", pixels.len(), width, height),
    );
    Ok(pixels)
}
