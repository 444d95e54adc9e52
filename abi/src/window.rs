//! Screen geometry shared by the window manager, compositor and apps.

pub const SCREEN_WIDTH: i32 = 80;
pub const SCREEN_HEIGHT: i32 = 25;
pub const SCREEN_CELLS: usize = (SCREEN_WIDTH * SCREEN_HEIGHT) as usize;

/// Row reserved for the taskbar. Windows never cover it.
pub const TASKBAR_ROW: i32 = 0;

/// Longest window title in bytes.
pub const TITLE_MAX: usize = 31;

/// Axis-aligned rectangle in cell coordinates. Width and height are
/// exclusive extents, so `contains(x + width, _)` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    #[inline]
    pub const fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// The rectangle grown by `n` cells on every side.
    #[inline]
    pub const fn inflate(&self, n: i32) -> Self {
        Self::new(self.x - n, self.y - n, self.width + 2 * n, self.height + 2 * n)
    }

    /// Number of cells covered, or zero when empty.
    #[inline]
    pub const fn area(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.width as usize) * (self.height as usize)
        }
    }
}
