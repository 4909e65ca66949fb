//! PNG chunk extraction.
//!
//! Splits a PNG byte stream into its chunks without interpreting pixel data.
//! CRCs are skipped.

use crate::error::{NextileError, Result};

/// The 8-byte PNG file signature.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

pub const CHUNK_IHDR: [u8; 4] = *b"IHDR";
pub const CHUNK_PLTE: [u8; 4] = *b"PLTE";
pub const CHUNK_IDAT: [u8; 4] = *b"IDAT";
pub const CHUNK_IEND: [u8; 4] = *b"IEND";

/// Colour type 3: palette indices.
pub const COLOR_INDEXED: u8 = 3;

/// A raw chunk: 4-byte type plus payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk<'a> {
    pub kind: [u8; 4],
    pub data: &'a [u8],
}

impl Chunk<'_> {
    /// Chunk type as text, e.g. "IDAT".
    pub fn name(&self) -> String {
        String::from_utf8_lossy(&self.kind).into_owned()
    }
}

/// Fields of the IHDR chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: u8,
    pub interlace: u8,
}

/// A parsed PNG, borrowing from the input bytes.
#[derive(Debug, Clone)]
pub struct ImageContainer<'a> {
    chunks: Vec<Chunk<'a>>,
}

impl<'a> ImageContainer<'a> {
    /// Split `bytes` into chunks.
    ///
    /// Fails if the signature is missing or a chunk claims more bytes than remain.
    /// Anything after IEND is ignored.
    pub fn parse(bytes: &'a [u8]) -> Result<Self> {
        let rest = bytes
            .strip_prefix(PNG_SIGNATURE.as_slice())
            .ok_or_else(|| malformed("missing PNG signature"))?;

        let mut chunks = Vec::new();
        let mut pos = 0;

        while pos < rest.len() {
            let header = rest
                .get(pos..pos + 8)
                .ok_or_else(|| malformed(format!("truncated chunk header at byte {}", pos + 8)))?;
            let len = u32::from_be_bytes([header[0], header[1], header[2], header[3]]) as usize;
            let kind = [header[4], header[5], header[6], header[7]];

            let data_start = pos + 8;
            let data_end = data_start
                .checked_add(len)
                .filter(|end| end + 4 <= rest.len())
                .ok_or_else(|| {
                    malformed(format!(
                        "chunk {} declares {} bytes but only {} remain",
                        String::from_utf8_lossy(&kind),
                        len,
                        rest.len().saturating_sub(data_start + 4)
                    ))
                })?;

            chunks.push(Chunk {
                kind,
                data: &rest[data_start..data_end],
            });
            pos = data_end + 4;

            if kind == CHUNK_IEND {
                break;
            }
        }

        Ok(Self { chunks })
    }

    /// Chunk names in file order, for diagnostics.
    pub fn chunk_names(&self) -> Vec<String> {
        self.chunks.iter().map(Chunk::name).collect()
    }

    /// Concatenated IDAT payloads, in file order.
    pub fn image_data(&self) -> Vec<u8> {
        self.chunks
            .iter()
            .filter(|c| c.kind == CHUNK_IDAT)
            .flat_map(|c| c.data.iter().copied())
            .collect()
    }

    /// The PLTE payload, if present. Only the first PLTE chunk counts;
    /// see [`palette_count`](Self::palette_count) to detect extras.
    pub fn palette(&self) -> Option<&'a [u8]> {
        self.chunks
            .iter()
            .find(|c| c.kind == CHUNK_PLTE)
            .map(|c| c.data)
    }

    /// Number of PLTE chunks in the file.
    pub fn palette_count(&self) -> usize {
        self.chunks.iter().filter(|c| c.kind == CHUNK_PLTE).count()
    }

    /// Decoded IHDR, if present and well-formed.
    pub fn header(&self) -> Option<ImageHeader> {
        let data = self.chunks.iter().find(|c| c.kind == CHUNK_IHDR)?.data;
        if data.len() < 13 {
            return None;
        }
        Some(ImageHeader {
            width: u32::from_be_bytes([data[0], data[1], data[2], data[3]]),
            height: u32::from_be_bytes([data[4], data[5], data[6], data[7]]),
            bit_depth: data[8],
            color_type: data[9],
            interlace: data[12],
        })
    }
}

fn malformed(message: impl Into<String>) -> NextileError {
    NextileError::MalformedContainer {
        message: message.into(),
    }
}
