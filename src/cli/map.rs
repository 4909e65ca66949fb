//! Map command: export the first layer of a Tiled map as metatile JSON.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::Result;
use crate::export::{export_map, write_map, DirectorySink};
use crate::output::{display_path, plural, Printer};
use crate::tiled::load_map;

use super::tileset::file_stem;

/// Export a map's first tile layer as a metatile description
#[derive(Args, Debug)]
pub struct MapArgs {
    /// Tiled map file (.tmj or .json)
    pub file: PathBuf,

    /// Output directory
    #[arg(long, short, default_value = "dist")]
    pub output: PathBuf,
}

pub fn run(args: MapArgs, printer: &Printer) -> Result<()> {
    export_map_file(&args.file, &args.output, printer)?;
    Ok(())
}

/// Export `path` into `output` as `<stem>.json`. Returns the written path.
pub fn export_map_file(path: &Path, output: &Path, printer: &Printer) -> Result<PathBuf> {
    let map = load_map(path)?;
    printer.status(
        "Exporting",
        &format!("{} ({})", display_path(path), plural(map.layers.len(), "layer", "layers")),
    );

    let records = export_map(&map, printer)?;

    let name = PathBuf::from(format!("{}.json", file_stem(path)));
    let mut sink = DirectorySink::new(output);
    write_map(&mut sink, &name, &records)?;

    let written = output.join(name);
    printer.info(
        "Wrote",
        &format!("{} ({})", display_path(&written), plural(records.len(), "record", "records")),
    );
    Ok(written)
}
