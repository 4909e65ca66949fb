//! Metatile resolution.
//!
//! A map tile larger than 8x8 is a metatile: `factor x factor` hardware
//! sub-tiles. Records are emitted in the order the hardware tilemap is laid
//! out: map row, then sub-tile row, then map column, then sub-tile column.
//!
//! Tiled stores three flip flags per cell (horizontal, vertical,
//! anti-diagonal); layer 3 tile attributes have x mirror, y mirror and a
//! 90 degree rotate. An anti-diagonal flip becomes a rotation plus mirrors.

use crate::report::Reporter;
use crate::types::{Flip, MetaTileRecord, TileGrid, Transform};

/// Hardware attributes for each flip combination, indexed by [`Flip::bits`]
/// (H = bit 2, V = bit 1, D = bit 0).
pub const TRANSFORM_TABLE: [Transform; 8] = [
    Transform::new(false, false, false), // -
    Transform::new(false, true, true),   // D
    Transform::new(false, true, false),  // V
    Transform::new(true, true, true),    // V D
    Transform::new(true, false, false),  // H
    Transform::new(false, false, true),  // H D
    Transform::new(true, true, false),   // H V
    Transform::new(true, false, true),   // H V D
];

/// Hardware attributes for one cell's flip flags.
pub fn resolve_transform(flip: Flip) -> Transform {
    TRANSFORM_TABLE[flip.bits()]
}

/// Expand every cell of `grid` into `factor * factor` sub-tile records.
pub fn resolve_metatiles<G, R>(grid: &G, factor: usize, reporter: &R) -> Vec<MetaTileRecord>
where
    G: TileGrid + ?Sized,
    R: Reporter,
{
    let (width, height) = (grid.width(), grid.height());
    let mut records = Vec::with_capacity(width * height * factor * factor);

    for y in 0..height {
        for sub_row in 0..factor {
            for x in 0..width {
                let cell = grid.cell_at(x, y);
                if cell.tile.is_none() && sub_row == 0 {
                    reporter.info(
                        "nextile::map::missing-tile",
                        format!("No tile found at {}, {}", x, y),
                    );
                }

                let transform = resolve_transform(cell.flip);
                for sub_col in 0..factor {
                    records.push(MetaTileRecord {
                        tile_id: cell.tile,
                        sub_tile_coords: [sub_col, sub_row],
                        x_mirror: transform.x_mirror,
                        y_mirror: transform.y_mirror,
                        rotate: transform.rotate,
                    });
                }
            }
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Collector, Silent};
    use crate::types::{Cell, TileLayer};

    #[test]
    fn test_table_matches_flag_formulas() {
        for bits in 0..8 {
            let flip = Flip::from_bits(bits);
            let (h, v, d) = (flip.horizontal, flip.vertical, flip.anti_diagonal);

            let expected = Transform::new((v && d) || (h && !d), (v && !d) || (!h && d), d);
            assert_eq!(resolve_transform(flip), expected, "H={h} V={v} D={d}");
        }
    }

    #[test]
    fn test_table_rows() {
        assert_eq!(
            resolve_transform(Flip::new(true, false, false)),
            Transform::new(true, false, false)
        );
        assert_eq!(
            resolve_transform(Flip::new(false, false, true)),
            Transform::new(false, true, true)
        );
        assert_eq!(
            resolve_transform(Flip::new(false, true, false)),
            Transform::new(false, true, false)
        );
        assert_eq!(resolve_transform(Flip::NONE), Transform::default());
    }

    #[test]
    fn test_factor_one_is_one_record_per_cell() {
        let layer = TileLayer::new(
            "l",
            2,
            1,
            vec![Cell::new(4, Flip::NONE), Cell::new(9, Flip::new(true, true, false))],
        );

        let records = resolve_metatiles(&layer, 1, &Silent);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].tile_id, Some(4));
        assert_eq!(records[1].tile_id, Some(9));
        assert!(records[1].x_mirror && records[1].y_mirror && !records[1].rotate);
    }

    #[test]
    fn test_raster_order_interleaves_cells() {
        // 2x1 map of 16x16 metatiles
        let layer = TileLayer::new(
            "l",
            2,
            1,
            vec![Cell::new(1, Flip::NONE), Cell::new(2, Flip::NONE)],
        );

        let order: Vec<(Option<u32>, [usize; 2])> = resolve_metatiles(&layer, 2, &Silent)
            .iter()
            .map(|r| (r.tile_id, r.sub_tile_coords))
            .collect();

        assert_eq!(
            order,
            vec![
                (Some(1), [0, 0]),
                (Some(1), [1, 0]),
                (Some(2), [0, 0]),
                (Some(2), [1, 0]),
                (Some(1), [0, 1]),
                (Some(1), [1, 1]),
                (Some(2), [0, 1]),
                (Some(2), [1, 1]),
            ]
        );
    }

    #[test]
    fn test_missing_tile_is_not_tile_zero() {
        let layer = TileLayer::new("l", 2, 1, vec![Cell::EMPTY, Cell::new(0, Flip::NONE)]);
        let collector = Collector::new();

        let records = resolve_metatiles(&layer, 1, &collector);
        assert_eq!(records[0].tile_id, None);
        assert_eq!(records[1].tile_id, Some(0));

        let diagnostics = collector.take();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "No tile found at 0, 0");
    }

    #[test]
    fn test_record_count() {
        let layer = TileLayer::new("l", 3, 2, vec![Cell::new(0, Flip::NONE); 6]);
        assert_eq!(resolve_metatiles(&layer, 4, &Silent).len(), 3 * 2 * 16);
    }
}
