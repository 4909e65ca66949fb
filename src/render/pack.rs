//! 4bpp tile bitmap packing.
//!
//! Layer 3 tiles are 4 bits per pixel. Source indices are reduced modulo 16,
//! so a tileset should keep each tile's colours inside one aligned block of
//! 16 palette entries; the block is chosen again at runtime with a palette
//! offset. Indices of 16 and above alias onto 0-15 without complaint.

use crate::error::{NextileError, Result};

use super::plan::SubTileOffsetPlan;

/// Gather planned runs from `pixels` into one linear buffer, in plan order.
pub fn linearize(pixels: &[u8], plan: &SubTileOffsetPlan) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(plan.pixel_count());
    for start in plan.offsets() {
        let run = pixels
            .get(start..start + 8)
            .ok_or(NextileError::TileOutOfBounds {
                offset: start,
                len: pixels.len(),
            })?;
        out.extend_from_slice(run);
    }
    Ok(out)
}

/// Reduce every sample to the 0-15 range.
pub fn normalize(samples: &mut [u8]) {
    for sample in samples {
        *sample %= 16;
    }
}

/// Pack sample pairs into bytes: first sample in the low nibble, second in the high.
pub fn pack_nibbles(samples: &[u8]) -> Result<Vec<u8>> {
    if samples.len() % 2 != 0 {
        return Err(NextileError::OddSampleCount {
            count: samples.len(),
        });
    }
    Ok(samples
        .chunks_exact(2)
        .map(|pair| (pair[0] & 0x0F) | (pair[1] << 4))
        .collect())
}

/// Inverse of [`pack_nibbles`].
pub fn unpack_nibbles(packed: &[u8]) -> Vec<u8> {
    packed
        .iter()
        .flat_map(|&byte| [byte & 0x0F, byte >> 4])
        .collect()
}

/// Build the packed tile bitmap for a planned tileset.
pub fn pack_tiles(pixels: &[u8], plan: &SubTileOffsetPlan) -> Result<Vec<u8>> {
    let mut samples = linearize(pixels, plan)?;
    normalize(&mut samples);
    pack_nibbles(&samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tileset;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pack_pair_nibble_order() {
        assert_eq!(pack_nibbles(&[0x3, 0xA]).unwrap(), vec![0xA3]);
        assert_eq!(unpack_nibbles(&[0xA3]), vec![0x3, 0xA]);
    }

    #[test]
    fn test_pack_recovers_every_pair() {
        for a in 0..16u8 {
            for b in 0..16u8 {
                let packed = pack_nibbles(&[a, b]).unwrap();
                assert_eq!(packed[0] & 0x0F, a);
                assert_eq!(packed[0] >> 4, b);
            }
        }
    }

    #[test]
    fn test_pack_rejects_odd_count() {
        let err = pack_nibbles(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, NextileError::OddSampleCount { count: 3 }));
    }

    #[test]
    fn test_normalize_wraps_at_16() {
        let mut samples = vec![0, 15, 16, 17, 31, 255];
        normalize(&mut samples);
        assert_eq!(samples, vec![0, 15, 0, 1, 15, 15]);
    }

    #[test]
    fn test_uniform_16x16_tile() {
        let tileset = Tileset::grid("t", 16, 16, 16, 16, 1, 1, 0, 0).unwrap();
        let plan = SubTileOffsetPlan::new(&tileset, 16);

        let packed = pack_tiles(&[5; 256], &plan).unwrap();
        assert_eq!(packed, vec![0x55; 128]);
    }

    #[test]
    fn test_linearize_follows_sub_tile_order() {
        // 16x8 image, one 16x8 tile: pixel value = column
        let pixels: Vec<u8> = (0..8).flat_map(|_| 0..16u8).collect();
        let tileset = Tileset::grid("t", 16, 8, 16, 8, 1, 1, 0, 0).unwrap();
        let plan = SubTileOffsetPlan::new(&tileset, 16);

        let linear = linearize(&pixels, &plan).unwrap();
        let left: Vec<u8> = (0..8).flat_map(|_| 0..8u8).collect();
        let right: Vec<u8> = (0..8).flat_map(|_| 8..16u8).collect();
        assert_eq!(&linear[..64], left.as_slice());
        assert_eq!(&linear[64..], right.as_slice());
    }

    #[test]
    fn test_linearize_out_of_bounds() {
        let tileset = Tileset::grid("t", 8, 8, 8, 8, 2, 1, 0, 0).unwrap();
        let plan = SubTileOffsetPlan::new(&tileset, 8);

        let err = linearize(&[0; 64], &plan).unwrap_err();
        assert!(matches!(err, NextileError::TileOutOfBounds { offset: 64, len: 64 }));
    }

    #[test]
    fn test_aliased_indices_pack_like_low_block() {
        let tileset = Tileset::grid("t", 8, 8, 8, 8, 1, 1, 0, 0).unwrap();
        let plan = SubTileOffsetPlan::new(&tileset, 8);

        let low = pack_tiles(&[3; 64], &plan).unwrap();
        let high = pack_tiles(&[35; 64], &plan).unwrap();
        assert_eq!(low, high);
    }
}
