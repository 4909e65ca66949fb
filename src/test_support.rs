//! Helpers for building small indexed PNGs in unit tests.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::decode::PNG_SIGNATURE;

/// zlib-compress `data`.
pub fn zlib(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Prefix every `width`-sample row with a filter-none byte.
pub fn scanlines(pixels: &[u8], width: usize) -> Vec<u8> {
    pixels
        .chunks(width)
        .flat_map(|row| std::iter::once(0).chain(row.iter().copied()))
        .collect()
}

/// One chunk with a zero CRC.
pub fn chunk(kind: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut out = (data.len() as u32).to_be_bytes().to_vec();
    out.extend_from_slice(kind);
    out.extend_from_slice(data);
    out.extend_from_slice(&[0; 4]);
    out
}

/// An 8-bit indexed PNG with the given pixels and PLTE payload.
pub fn indexed_png(width: u32, height: u32, pixels: &[u8], palette: &[u8]) -> Vec<u8> {
    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.extend_from_slice(&[8, 3, 0, 0, 0]);

    let mut png = PNG_SIGNATURE.to_vec();
    png.extend(chunk(b"IHDR", &ihdr));
    png.extend(chunk(b"PLTE", palette));
    png.extend(chunk(b"IDAT", &zlib(&scanlines(pixels, width as usize))));
    png.extend(chunk(b"IEND", &[]));
    png
}
