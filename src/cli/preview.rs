//! Preview command: render a packed bitmap back into a PNG.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::{NextileError, Result};
use crate::export::{palette_path, PALETTE_EXTENSION};
use crate::output::{display_path, Printer};
use crate::render::{write_preview, PreviewOptions};

/// Render an exported bitmap and palette as a PNG for inspection
#[derive(Args, Debug)]
pub struct PreviewArgs {
    /// Packed 4bpp bitmap
    pub bitmap: PathBuf,

    /// RGB332 palette file (defaults to the bitmap's .pal sibling)
    #[arg(long, short)]
    pub palette: Option<PathBuf>,

    /// Tile width the bitmap was exported with
    #[arg(long, default_value = "8")]
    pub tile_width: u32,

    /// Tile height the bitmap was exported with
    #[arg(long, default_value = "8")]
    pub tile_height: u32,

    /// Tiles per row
    #[arg(long, default_value = "16")]
    pub columns: u32,

    /// 16-colour palette block to draw with
    #[arg(long, default_value = "0")]
    pub palette_offset: u8,

    /// Integer upscale factor
    #[arg(long, default_value = "1")]
    pub scale: u32,

    /// Output PNG
    #[arg(long, short)]
    pub output: PathBuf,
}

pub fn run(args: PreviewArgs, printer: &Printer) -> Result<()> {
    let palette_file = args
        .palette
        .clone()
        .unwrap_or_else(|| palette_path(&args.bitmap, PALETTE_EXTENSION));

    let packed = read(&args.bitmap)?;
    let palette = read(&palette_file)?;

    let options = PreviewOptions {
        tile_width: args.tile_width,
        tile_height: args.tile_height,
        columns: args.columns,
        palette_offset: args.palette_offset,
    };
    write_preview(&packed, &palette, &options, &args.output, args.scale)?;

    printer.status(
        "Rendered",
        &format!("{} -> {}", display_path(&args.bitmap), display_path(&args.output)),
    );
    Ok(())
}

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| NextileError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read file: {}", e),
    })
}
