//! Export pipelines and output sinks.
//!
//! Two independent pipelines:
//!
//! - tileset: PNG -> pixel indices -> sub-tile plan -> packed 4bpp bitmap,
//!   plus PLTE -> RGB332 palette
//! - map: first tile layer -> metatile records -> JSON
//!
//! Nothing touches the file system until a pipeline has produced every
//! buffer; the results are then handed to an [`ExportSink`] in one call.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::decode::decode_indexed;
use crate::error::{NextileError, Result};
use crate::render::{pack_tiles, quantize_palette, resolve_metatiles, SubTileOffsetPlan};
use crate::report::Reporter;
use crate::types::{
    check_tile_dimensions, Layer, Map, MetaTileRecord, TileGrid, Tileset, SUB_TILE_SIZE,
};

/// Default extension appended to the bitmap file name for the palette.
pub const PALETTE_EXTENSION: &str = "pal";

/// Binary outputs of a tileset export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilesetExport {
    /// Packed 4bpp sub-tiles, no header.
    pub bitmap: Vec<u8>,
    /// One RGB332 byte per palette entry, no header.
    pub palette: Vec<u8>,
}

/// Export a tileset whose image bytes are already in memory.
pub fn export_tileset<R: Reporter>(
    tileset: &Tileset,
    image: &[u8],
    reporter: &R,
) -> Result<TilesetExport> {
    export_tileset_with(tileset, || Ok(image.to_vec()), reporter)
}

/// Export a tileset, loading the image only once the tile size is accepted.
pub fn export_tileset_with<R, F>(tileset: &Tileset, load_image: F, reporter: &R) -> Result<TilesetExport>
where
    R: Reporter,
    F: FnOnce() -> Result<Vec<u8>>,
{
    tileset.check_dimensions()?;

    let (width, height) = (tileset.image_width as usize, tileset.image_height as usize);
    reporter.info(
        "nextile::tileset",
        format!(
            "{}: {} tiles of {}x{}, image {}x{} ({} pixels)",
            tileset.name,
            tileset.tile_count(),
            tileset.tile_width,
            tileset.tile_height,
            width,
            height,
            width * height
        ),
    );

    let plan = SubTileOffsetPlan::new(tileset, width);
    let bytes = load_image()?;
    reporter.info("nextile::tileset", format!("image file length: {}", bytes.len()));

    let image = decode_indexed(&bytes, width, height, reporter)?;
    let bitmap = pack_tiles(&image.pixels, &plan)?;
    reporter.info("nextile::tileset", format!("packed {} bytes", bitmap.len()));

    let palette = quantize_palette(image.palette.as_deref(), reporter)?;

    Ok(TilesetExport { bitmap, palette })
}

/// Resolve the map's first layer into metatile records.
///
/// Only the first layer is exported. Further layers are reported and
/// skipped; there is no rule for composing several layers into one
/// layer 3 tilemap.
pub fn export_map<R: Reporter>(map: &Map, reporter: &R) -> Result<Vec<MetaTileRecord>> {
    let first = map.layers.first().ok_or(NextileError::NoLayers)?;
    let Layer::Tiles(layer) = first else {
        return Err(NextileError::NoTileLayers);
    };

    for ignored in &map.layers[1..] {
        reporter.warning(
            "nextile::map::extra-layer",
            format!("Layer '{}' ignored: only the first layer is exported", ignored.name()),
        );
    }

    check_tile_dimensions(map.tile_width, map.tile_height)?;
    if map.tile_width != map.tile_height {
        return Err(NextileError::Build {
            message: format!(
                "Metatiles must be square, got {}x{}",
                map.tile_width, map.tile_height
            ),
            help: Some("Use the same tile width and height in the map".to_string()),
        });
    }

    let factor = (map.tile_width / SUB_TILE_SIZE) as usize;
    reporter.info(
        "nextile::map",
        format!(
            "{}x{} cells, metatile factor {}",
            layer.width(),
            layer.height(),
            factor
        ),
    );

    Ok(resolve_metatiles(layer, factor, reporter))
}

/// Serialize metatile records as a single line of JSON.
pub fn metatile_json(records: &[MetaTileRecord]) -> Result<String> {
    let mut json = serde_json::to_string(records).map_err(|e| NextileError::Build {
        message: format!("Failed to serialize metatiles: {}", e),
        help: None,
    })?;
    json.push('\n');
    Ok(json)
}

/// The palette file sits next to the bitmap: `tiles.bin` -> `tiles.bin.pal`.
pub fn palette_path(bitmap: &Path, extension: &str) -> PathBuf {
    let mut name = bitmap.as_os_str().to_owned();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// One complete output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl OutputFile {
    pub fn new(path: impl Into<PathBuf>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            bytes: bytes.into(),
        }
    }
}

/// Destination for finished exports.
///
/// A commit either stores every file or none of them.
pub trait ExportSink {
    fn commit(&mut self, files: Vec<OutputFile>) -> Result<()>;
}

/// Writes files under a root directory.
///
/// Each file is first written to a hidden sibling and renamed into place
/// once every file of the commit has been written. Existing targets are
/// moved aside during the swap and restored if any rename fails.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

/// A target that has been replaced by its staged file.
struct Swapped {
    target: PathBuf,
    backup: Option<PathBuf>,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn sibling(target: &Path, suffix: &str) -> PathBuf {
        let name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        target.with_file_name(format!(".{}.{}", name, suffix))
    }

    fn stage(&self, files: &[OutputFile], staged: &mut Vec<(PathBuf, PathBuf)>) -> Result<()> {
        for file in files {
            let target = self.root.join(&file.path);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| NextileError::Io {
                    path: parent.to_path_buf(),
                    message: format!("Failed to create output directory: {}", e),
                })?;
            }

            let staging = Self::sibling(&target, "tmp");
            fs::write(&staging, &file.bytes).map_err(|e| NextileError::Io {
                path: staging.clone(),
                message: format!("Failed to write output: {}", e),
            })?;
            staged.push((staging, target));
        }
        Ok(())
    }

    /// Move `staging` over `target`, keeping any existing file as a backup.
    fn swap(staging: &Path, target: &Path) -> Result<Swapped> {
        let backup = if target.is_file() {
            let backup = Self::sibling(target, "bak");
            fs::rename(target, &backup).map_err(|e| NextileError::Io {
                path: target.to_path_buf(),
                message: format!("Failed to move existing output aside: {}", e),
            })?;
            Some(backup)
        } else {
            None
        };

        if let Err(e) = fs::rename(staging, target) {
            if let Some(backup) = &backup {
                let _ = fs::rename(backup, target);
            }
            return Err(NextileError::Io {
                path: target.to_path_buf(),
                message: format!("Failed to move output into place: {}", e),
            });
        }

        Ok(Swapped {
            target: target.to_path_buf(),
            backup,
        })
    }

    fn roll_back(swapped: &[Swapped]) {
        for done in swapped.iter().rev() {
            let _ = fs::remove_file(&done.target);
            if let Some(backup) = &done.backup {
                let _ = fs::rename(backup, &done.target);
            }
        }
    }
}

impl ExportSink for DirectorySink {
    fn commit(&mut self, files: Vec<OutputFile>) -> Result<()> {
        let mut staged: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(files.len());

        if let Err(e) = self.stage(&files, &mut staged) {
            for (staging, _) in &staged {
                let _ = fs::remove_file(staging);
            }
            return Err(e);
        }

        let mut swapped: Vec<Swapped> = Vec::with_capacity(staged.len());
        for (i, (staging, target)) in staged.iter().enumerate() {
            match Self::swap(staging, target) {
                Ok(done) => swapped.push(done),
                Err(e) => {
                    for (pending, _) in &staged[i..] {
                        let _ = fs::remove_file(pending);
                    }
                    Self::roll_back(&swapped);
                    return Err(e);
                }
            }
        }

        for backup in swapped.iter().filter_map(|done| done.backup.as_ref()) {
            let _ = fs::remove_file(backup);
        }

        Ok(())
    }
}

/// Keeps committed files in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub files: BTreeMap<PathBuf, Vec<u8>>,
    pub commits: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&[u8]> {
        self.files.get(path.as_ref()).map(Vec::as_slice)
    }
}

impl ExportSink for MemorySink {
    fn commit(&mut self, files: Vec<OutputFile>) -> Result<()> {
        for file in files {
            self.files.insert(file.path, file.bytes);
        }
        self.commits += 1;
        Ok(())
    }
}

/// Commit a tileset export as `bitmap` plus its palette sibling.
pub fn write_tileset<S: ExportSink + ?Sized>(
    sink: &mut S,
    bitmap: &Path,
    palette_extension: &str,
    export: TilesetExport,
) -> Result<()> {
    let palette = palette_path(bitmap, palette_extension);
    sink.commit(vec![
        OutputFile::new(bitmap, export.bitmap),
        OutputFile::new(palette, export.palette),
    ])
}

/// Commit metatile records as JSON.
pub fn write_map<S: ExportSink + ?Sized>(
    sink: &mut S,
    path: &Path,
    records: &[MetaTileRecord],
) -> Result<()> {
    let json = metatile_json(records)?;
    sink.commit(vec![OutputFile::new(path, json.into_bytes())])
}
