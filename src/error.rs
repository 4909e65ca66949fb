use miette::Diagnostic;
use thiserror::Error;

/// Main error type for nextile operations
#[derive(Error, Diagnostic, Debug)]
pub enum NextileError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(nextile::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(nextile::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(nextile::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Malformed image container: {message}")]
    #[diagnostic(
        code(nextile::container),
        help("The tileset image must be a PNG file")
    )]
    MalformedContainer { message: String },

    #[error("Failed to decompress image data: {message}")]
    #[diagnostic(code(nextile::inflate))]
    DecompressionError { message: String },

    #[error("Decoded {actual} pixels, expected {expected}")]
    #[diagnostic(
        code(nextile::pixel_count),
        help("Check that the image is 8-bit indexed and matches the tileset's image size")
    )]
    PixelCountMismatch { expected: usize, actual: usize },

    #[error("Cannot pack {count} samples into nibble pairs")]
    #[diagnostic(code(nextile::odd_samples))]
    OddSampleCount { count: usize },

    #[error("Tile run at offset {offset} lies outside the {len}-pixel image")]
    #[diagnostic(
        code(nextile::tile_bounds),
        help("Check the tileset's margin, spacing and image size")
    )]
    TileOutOfBounds { offset: usize, len: usize },

    #[error("Image has no palette")]
    #[diagnostic(
        code(nextile::palette),
        help("Save the tileset image as an indexed-colour PNG")
    )]
    MissingPalette,

    #[error("Palette is {len} bytes, which is not a whole number of RGB entries")]
    #[diagnostic(code(nextile::palette))]
    TruncatedPaletteEntry { len: usize },

    #[error("Tiles must be multiple of 8 pixels in width and height, got {width}x{height}")]
    #[diagnostic(code(nextile::tile_size))]
    UnsupportedTileDimensions { width: u32, height: u32 },

    #[error("No layers to export")]
    #[diagnostic(code(nextile::layers))]
    NoLayers,

    #[error("No tile layers found")]
    #[diagnostic(
        code(nextile::layers),
        help("Only the first layer is exported; move a tile layer to the bottom of the layer list")
    )]
    NoTileLayers,
}

pub type Result<T> = std::result::Result<T, NextileError>;
