pub mod build;
pub mod completions;
pub mod map;
pub mod preview;
pub mod tileset;
pub mod watch;

use clap::{Parser, Subcommand};

use crate::output::Verbosity;

/// nextile - Tiled maps and tilesets to ZX Spectrum Next layer 3 data
#[derive(Parser, Debug)]
#[command(name = "nextile")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show per-stage notes
    #[arg(long, short, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(long, short, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export every tileset and map in a project
    Build(build::BuildArgs),

    /// Export one tileset as a packed bitmap and palette
    Tileset(tileset::TilesetArgs),

    /// Export one map as a metatile description
    Map(map::MapArgs),

    /// Render an exported bitmap as a PNG
    Preview(preview::PreviewArgs),

    /// Rebuild on file changes
    Watch(watch::WatchArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
