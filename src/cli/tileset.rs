//! Tileset command: export one Tiled tileset as a packed bitmap and palette.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::{NextileError, Result};
use crate::export::{export_tileset_with, palette_path, write_tileset, DirectorySink, PALETTE_EXTENSION};
use crate::output::{display_path, plural, Printer};
use crate::tiled::load_tileset;

/// Export a tileset as a 4bpp bitmap and RGB332 palette
#[derive(Args, Debug)]
pub struct TilesetArgs {
    /// Tiled tileset file (.tsj or .json)
    pub file: PathBuf,

    /// Output directory
    #[arg(long, short, default_value = "dist")]
    pub output: PathBuf,

    /// Extension appended to the bitmap name for the palette file
    #[arg(long, default_value = PALETTE_EXTENSION)]
    pub palette_extension: String,
}

pub fn run(args: TilesetArgs, printer: &Printer) -> Result<()> {
    export_tileset_file(&args.file, &args.output, &args.palette_extension, printer)?;
    Ok(())
}

/// Export `path` into `output` as `<stem>.bin` plus its palette.
/// Returns the bitmap path.
pub fn export_tileset_file(
    path: &Path,
    output: &Path,
    palette_extension: &str,
    printer: &Printer,
) -> Result<PathBuf> {
    let tileset = load_tileset(path)?;
    printer.status(
        "Exporting",
        &format!("{} ({})", display_path(path), plural(tileset.tile_count(), "tile", "tiles")),
    );

    let image = tileset.image.clone().ok_or_else(|| NextileError::Build {
        message: format!("Tileset '{}' has no image", tileset.name),
        help: None,
    })?;
    let export = export_tileset_with(
        &tileset,
        || {
            fs::read(&image).map_err(|e| NextileError::Io {
                path: image.clone(),
                message: format!("Failed to read tileset image: {}", e),
            })
        },
        printer,
    )?;

    let bitmap = PathBuf::from(format!("{}.bin", file_stem(path)));
    let mut sink = DirectorySink::new(output);
    write_tileset(&mut sink, &bitmap, palette_extension, export)?;

    let written = output.join(&bitmap);
    printer.info(
        "Wrote",
        &format!(
            "{} and {}",
            display_path(&written),
            display_path(&palette_path(&written, palette_extension))
        ),
    );
    Ok(written)
}

/// File name without its extension, for naming exports.
pub(crate) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string())
}
