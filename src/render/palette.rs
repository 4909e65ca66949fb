//! Palette conversion to the Next's 8-bit colour format.

use crate::error::{NextileError, Result};
use crate::report::Reporter;
use crate::types::Colour;

/// Split a PLTE payload into colours.
pub fn palette_entries(payload: &[u8]) -> Result<Vec<Colour>> {
    if payload.len() % 3 != 0 {
        return Err(NextileError::TruncatedPaletteEntry { len: payload.len() });
    }
    Ok(payload
        .chunks_exact(3)
        .map(|rgb| Colour::rgb(rgb[0], rgb[1], rgb[2]))
        .collect())
}

/// Convert a PLTE payload into one RGB332 byte per entry, in order.
pub fn quantize_palette<R: Reporter>(payload: Option<&[u8]>, reporter: &R) -> Result<Vec<u8>> {
    let payload = payload.ok_or(NextileError::MissingPalette)?;
    let entries = palette_entries(payload)?;

    for (index, colour) in entries.iter().enumerate() {
        reporter.info(
            "nextile::palette",
            format!("palette entry {}: {} -> {:#04x}", index, colour, colour.to_rgb332()),
        );
    }

    Ok(entries.into_iter().map(Colour::to_rgb332).collect())
}
