//! Rendering module for nextile.
//!
//! Turns decoded tilesets and map layers into layer 3 data: the sub-tile
//! read plan, the packed 4bpp bitmap, the RGB332 palette and the metatile
//! records. Also renders packed bitmaps back to PNG for inspection.

mod metatile;
mod pack;
mod palette;
mod plan;
mod preview;

pub use metatile::{resolve_metatiles, resolve_transform, TRANSFORM_TABLE};
pub use pack::{linearize, normalize, pack_nibbles, pack_tiles, unpack_nibbles};
pub use palette::{palette_entries, quantize_palette};
pub use plan::{SubTileOffsetPlan, SubTileRows};
pub use preview::{render_preview, scale_image, write_preview, PreviewOptions};
