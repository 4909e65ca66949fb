//! Tile grid types for map layers.
//!
//! A `TileGrid` is the read-only view the metatile resolver walks. `TileLayer`
//! is the concrete grid loaded from a Tiled map; tests are free to implement
//! the trait on anything else.

/// The three independent flip flags Tiled stores per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flip {
    pub horizontal: bool,
    pub vertical: bool,
    pub anti_diagonal: bool,
}

impl Flip {
    pub const NONE: Self = Self::new(false, false, false);

    pub const fn new(horizontal: bool, vertical: bool, anti_diagonal: bool) -> Self {
        Self {
            horizontal,
            vertical,
            anti_diagonal,
        }
    }

    /// Pack the flags into a 3-bit index: H is bit 2, V is bit 1, D is bit 0.
    pub const fn bits(self) -> usize {
        ((self.horizontal as usize) << 2) | ((self.vertical as usize) << 1) | self.anti_diagonal as usize
    }

    /// Inverse of [`Flip::bits`]; bits above the lowest three are ignored.
    pub const fn from_bits(bits: usize) -> Self {
        Self::new(bits & 0b100 != 0, bits & 0b010 != 0, bits & 0b001 != 0)
    }
}

/// A single map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    /// Tile id local to the layer's tileset; `None` for an empty cell.
    pub tile: Option<u32>,
    pub flip: Flip,
}

impl Cell {
    pub const EMPTY: Self = Self {
        tile: None,
        flip: Flip::NONE,
    };

    pub const fn new(tile: u32, flip: Flip) -> Self {
        Self {
            tile: Some(tile),
            flip,
        }
    }
}

/// Read-only access to a rectangular grid of cells.
pub trait TileGrid {
    /// Width in cells.
    fn width(&self) -> usize;

    /// Height in cells.
    fn height(&self) -> usize;

    /// Cell at (x, y). Out-of-range positions read as empty.
    fn cell_at(&self, x: usize, y: usize) -> Cell;
}

/// A tile layer loaded from a map.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub name: String,
    width: usize,
    height: usize,
    /// Row-major cells.
    cells: Vec<Cell>,
}

impl TileLayer {
    /// Create a layer from row-major cells.
    ///
    /// Missing trailing cells read as empty; surplus cells are ignored.
    pub fn new(name: impl Into<String>, width: usize, height: usize, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            cells,
        }
    }
}

impl TileGrid for TileLayer {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn cell_at(&self, x: usize, y: usize) -> Cell {
        if x >= self.width || y >= self.height {
            return Cell::EMPTY;
        }
        self.cells.get(y * self.width + x).copied().unwrap_or(Cell::EMPTY)
    }
}

/// A map layer. Only tile layers carry exportable data.
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Tiles(TileLayer),
    Other { name: String, kind: String },
}

impl Layer {
    pub fn name(&self) -> &str {
        match self {
            Layer::Tiles(layer) => &layer.name,
            Layer::Other { name, .. } => name,
        }
    }
}

/// A loaded map: tile size plus its layers, bottom-most first.
#[derive(Debug, Clone, PartialEq)]
pub struct Map {
    pub tile_width: u32,
    pub tile_height: u32,
    pub layers: Vec<Layer>,
}
