//! Build command implementation.
//!
//! Discovers every tileset and map in a project and exports them into the
//! output directory.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::discovery::{discover, DiscoveryResult};
use crate::error::Result;
use crate::output::{display_path, plural, Printer};

use super::map::export_map_file;
use super::tileset::export_tileset_file;

/// Export every tileset and map in a project
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Project directory (looks for nextile.yaml)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output directory (overrides the manifest)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Counts of what a build exported.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    pub tilesets: usize,
    pub maps: usize,
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    build_project(&args.path, args.output, printer)?;
    Ok(())
}

/// Discover and export a project. Stops at the first failing document.
pub fn build_project(
    root: &Path,
    output: Option<PathBuf>,
    printer: &Printer,
) -> Result<BuildSummary> {
    let mut project = discover(root)?;
    if let Some(output) = output {
        project.manifest.output = output;
    }
    build_discovered(&project, printer)
}

fn build_discovered(project: &DiscoveryResult, printer: &Printer) -> Result<BuildSummary> {
    let output = project.output_dir();

    if project.scan.is_empty() {
        printer.warning(
            "Warning",
            &format!("No maps or tilesets found in {}", display_path(&project.root)),
        );
        return Ok(BuildSummary::default());
    }

    let mut summary = BuildSummary::default();

    for tileset in &project.scan.tilesets {
        export_tileset_file(tileset, &output, &project.manifest.palette_extension, printer)?;
        summary.tilesets += 1;
    }

    for map in &project.scan.maps {
        export_map_file(map, &output, printer)?;
        summary.maps += 1;
    }

    printer.status(
        "Finished",
        &format!(
            "{} and {} to {}",
            plural(summary.tilesets, "tileset", "tilesets"),
            plural(summary.maps, "map", "maps"),
            display_path(&output)
        ),
    );

    Ok(summary)
}
