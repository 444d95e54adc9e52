use cellos_abi::Cell;

use crate::CellTarget;
use crate::glyphs::FrameGlyphs;

pub fn fill_rect<T: CellTarget + ?Sized>(target: &mut T, x: i32, y: i32, w: i32, h: i32, cell: Cell) {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = x.saturating_add(w).min(target.width());
    let y1 = y.saturating_add(h).min(target.height());
    if x0 >= x1 || y0 >= y1 {
        return;
    }
    let width = target.width();
    let cells = target.cells_mut();
    for row in y0..y1 {
        let start = (row * width + x0) as usize;
        let end = (row * width + x1) as usize;
        cells[start..end].fill(cell);
    }
}

pub fn hline<T: CellTarget + ?Sized>(target: &mut T, x0: i32, x1: i32, y: i32, cell: Cell) {
    if x1 >= x0 {
        fill_rect(target, x0, y, x1 - x0 + 1, 1, cell);
    }
}

pub fn vline<T: CellTarget + ?Sized>(target: &mut T, x: i32, y0: i32, y1: i32, cell: Cell) {
    if y1 >= y0 {
        fill_rect(target, x, y0, 1, y1 - y0 + 1, cell);
    }
}

/// Draw `text` on one row starting at `(x, y)`.
///
/// Stops at the first NUL byte or the right edge; nothing wraps. Returns
/// the number of bytes consumed from `text`, visible or not.
pub fn draw_text<T: CellTarget + ?Sized>(target: &mut T, x: i32, y: i32, text: &[u8], attr: u8) -> usize {
    let mut consumed = 0;
    for (i, &ch) in text.iter().enumerate() {
        if ch == 0 {
            break;
        }
        let col = x.saturating_add(i as i32);
        if col >= target.width() {
            break;
        }
        target.put(col, y, Cell::new(ch, attr));
        consumed += 1;
    }
    consumed
}

/// Copy a `w`x`h` row-major block of `src` cells to `(x, y)`, clipped.
pub fn blit<T: CellTarget + ?Sized>(target: &mut T, x: i32, y: i32, w: i32, h: i32, src: &[Cell]) {
    if w <= 0 || h <= 0 || src.len() < (w as usize) * (h as usize) {
        return;
    }
    let col0 = (-x).max(0);
    let col1 = w.min(target.width() - x);
    if col0 >= col1 {
        return;
    }
    let width = target.width();
    let height = target.height();
    let cells = target.cells_mut();
    for row in 0..h {
        let sy = y + row;
        if sy < 0 || sy >= height {
            continue;
        }
        let src_start = (row * w + col0) as usize;
        let src_end = (row * w + col1) as usize;
        let dst_start = (sy * width + x + col0) as usize;
        cells[dst_start..dst_start + (src_end - src_start)].copy_from_slice(&src[src_start..src_end]);
    }
}

/// Outline the rectangle `(x, y, w, h)` with `glyphs`. The outline occupies
/// the outermost ring of the rectangle.
pub fn frame<T: CellTarget + ?Sized>(
    target: &mut T,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    glyphs: &FrameGlyphs,
    attr: u8,
) {
    if w < 2 || h < 2 {
        return;
    }
    let right = x + w - 1;
    let bottom = y + h - 1;
    hline(target, x + 1, right - 1, y, Cell::new(glyphs.horizontal, attr));
    hline(target, x + 1, right - 1, bottom, Cell::new(glyphs.horizontal, attr));
    vline(target, x, y + 1, bottom - 1, Cell::new(glyphs.vertical, attr));
    vline(target, right, y + 1, bottom - 1, Cell::new(glyphs.vertical, attr));
    target.put(x, y, Cell::new(glyphs.top_left, attr));
    target.put(right, y, Cell::new(glyphs.top_right, attr));
    target.put(x, bottom, Cell::new(glyphs.bottom_left, attr));
    target.put(right, bottom, Cell::new(glyphs.bottom_right, attr));
}
