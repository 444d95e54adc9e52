use cellos_abi::{Cell, Rect};
use cellos_gfx::{CellTarget, CellView};

/// A window's own cell buffer, handed to its app for drawing.
///
/// Coordinates are window-local; `(0, 0)` is the top-left content cell.
/// Everything clips to the window, so an app cannot reach another window
/// or the desktop.
pub struct Canvas<'a> {
    view: CellView<'a>,
    frame: Rect,
}

impl<'a> Canvas<'a> {
    /// `frame` is the window's screen geometry; its size matches `view`.
    pub fn new(view: CellView<'a>, frame: Rect) -> Self {
        Self { view, frame }
    }

    /// Screen position and size of the content area.
    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn clear(&mut self, attr: u8) {
        self.view.fill(Cell::new(b' ', attr));
    }

    pub fn draw_text(&mut self, x: i32, y: i32, text: &[u8], attr: u8) -> usize {
        cellos_gfx::draw_text(&mut self.view, x, y, text, attr)
    }

    pub fn put_char(&mut self, x: i32, y: i32, ch: u8, attr: u8) {
        self.view.put(x, y, Cell::new(ch, attr));
    }

    /// Map a screen position into window coordinates, if it lies inside.
    pub fn to_local(&self, x: i32, y: i32) -> Option<(i32, i32)> {
        self.frame
            .contains(x, y)
            .then(|| (x - self.frame.x, y - self.frame.y))
    }
}

impl CellTarget for Canvas<'_> {
    fn width(&self) -> i32 {
        self.view.width()
    }

    fn height(&self) -> i32 {
        self.view.height()
    }

    fn cells(&self) -> &[Cell] {
        self.view.cells()
    }

    fn cells_mut(&mut self) -> &mut [Cell] {
        self.view.cells_mut()
    }
}
