//! Watch command: rebuild the project whenever a source file changes.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use clap::Args;
use notify::{Event, EventKind, RecursiveMode, Watcher};

use crate::discovery::discover;
use crate::error::{NextileError, Result};
use crate::output::{display_path, Printer};

use super::build::build_project;

/// Events closer together than this are folded into one rebuild.
const DEBOUNCE: Duration = Duration::from_millis(200);

/// Rebuild on file changes
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Project directory (looks for nextile.yaml)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output directory (overrides the manifest)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

pub fn run(args: WatchArgs, printer: &Printer) -> Result<()> {
    let root = args.path.canonicalize().map_err(|e| NextileError::Io {
        path: args.path.clone(),
        message: format!("Failed to open project: {}", e),
    })?;

    rebuild(&root, &args.output, printer);

    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = notify::recommended_watcher(tx).map_err(|e| watch_error(&root, e))?;
    watcher
        .watch(&root, RecursiveMode::Recursive)
        .map_err(|e| watch_error(&root, e))?;

    printer.status("Watching", &format!("{} for changes", display_path(&root)));

    while let Ok(event) = rx.recv() {
        let output = output_dir(&root, &args.output);
        let mut relevant = is_relevant(&event, &output);

        // Drain the burst an editor save produces.
        while let Ok(event) = rx.recv_timeout(DEBOUNCE) {
            relevant |= is_relevant(&event, &output);
        }

        if relevant {
            rebuild(&root, &args.output, printer);
        }
    }

    Ok(())
}

fn rebuild(root: &Path, output: &Option<PathBuf>, printer: &Printer) {
    if let Err(e) = build_project(root, output.clone(), printer) {
        printer.error("Error", &e.to_string());
    }
}

fn output_dir(root: &Path, output: &Option<PathBuf>) -> PathBuf {
    match output {
        Some(output) if output.is_absolute() => output.clone(),
        Some(output) => root.join(output),
        None => discover(root)
            .map(|project| project.output_dir())
            .unwrap_or_else(|_| root.join("dist")),
    }
}

/// A change matters unless it only touches the output directory.
fn is_relevant(event: &notify::Result<Event>, output: &Path) -> bool {
    let Ok(event) = event else {
        return false;
    };
    if matches!(event.kind, EventKind::Access(_)) {
        return false;
    }
    event.paths.iter().any(|path| !path.starts_with(output))
}

fn watch_error(root: &Path, e: notify::Error) -> NextileError {
    NextileError::Io {
        path: root.to_path_buf(),
        message: format!("Failed to watch directory: {}", e),
    }
}
