#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

pub mod glyphs;
pub mod primitives;

pub use cellos_abi::Cell;
pub use primitives::{blit, draw_text, fill_rect, frame, hline, vline};

/// A rectangular grid of cells stored row-major.
///
/// Everything drawn through this crate clips against `width()`/`height()`,
/// so callers may pass coordinates that fall partly or wholly off-grid.
pub trait CellTarget {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    fn cells(&self) -> &[Cell];
    fn cells_mut(&mut self) -> &mut [Cell];

    #[inline]
    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width() || y >= self.height() {
            None
        } else {
            Some((y * self.width() + x) as usize)
        }
    }

    #[inline]
    fn put(&mut self, x: i32, y: i32, cell: Cell) {
        if let Some(i) = self.index_of(x, y) {
            self.cells_mut()[i] = cell;
        }
    }

    #[inline]
    fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index_of(x, y).map(|i| self.cells()[i])
    }

    fn fill(&mut self, cell: Cell) {
        self.cells_mut().fill(cell);
    }
}

/// Borrowed view over a caller-owned cell slice.
pub struct CellView<'a> {
    cells: &'a mut [Cell],
    width: i32,
    height: i32,
}

impl<'a> CellView<'a> {
    /// Returns `None` unless `cells.len() == width * height`.
    pub fn new(cells: &'a mut [Cell], width: i32, height: i32) -> Option<Self> {
        if width < 0 || height < 0 || cells.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            cells,
            width,
            height,
        })
    }
}

impl CellTarget for CellView<'_> {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn cells(&self) -> &[Cell] {
        self.cells
    }

    fn cells_mut(&mut self) -> &mut [Cell] {
        self.cells
    }
}
