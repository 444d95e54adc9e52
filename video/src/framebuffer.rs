//! Full-screen cell buffer and the sinks that display it.

use alloc::vec::Vec;

use cellos_abi::{Cell, SCREEN_CELLS, SCREEN_HEIGHT, SCREEN_WIDTH};
use cellos_gfx::CellTarget;

/// The composed 80x25 frame. Owned by the compositor while it draws.
#[derive(Clone)]
pub struct ScreenBuffer {
    cells: [Cell; SCREEN_CELLS],
}

impl ScreenBuffer {
    pub const fn new() -> Self {
        Self {
            cells: [Cell::BLANK; SCREEN_CELLS],
        }
    }

    /// Characters of row `y` as a string, for diagnostics and tests.
    pub fn row_text(&self, y: i32) -> alloc::string::String {
        (0..SCREEN_WIDTH)
            .filter_map(|x| self.get(x, y))
            .map(|c| c.ch as char)
            .collect()
    }
}

impl Default for ScreenBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl CellTarget for ScreenBuffer {
    fn width(&self) -> i32 {
        SCREEN_WIDTH
    }

    fn height(&self) -> i32 {
        SCREEN_HEIGHT
    }

    fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }
}

/// Receives finished frames. `present` is called once per composed frame
/// with all `SCREEN_CELLS` cells; a sink never sees a partial frame.
pub trait DisplaySink {
    fn present(&mut self, frame: &[Cell]);
}

/// Keeps a copy of the last presented frame. Used for headless runs.
#[derive(Default)]
pub struct CaptureSink {
    last: Vec<Cell>,
    frames: u64,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> &[Cell] {
        &self.last
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames
    }

    pub fn cell_at(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 || x >= SCREEN_WIDTH || y >= SCREEN_HEIGHT {
            return None;
        }
        self.last.get((y * SCREEN_WIDTH + x) as usize).copied()
    }
}

impl DisplaySink for CaptureSink {
    fn present(&mut self, frame: &[Cell]) {
        self.last.clear();
        self.last.extend_from_slice(frame);
        self.frames += 1;
    }
}

/// Legacy VGA text-mode memory at physical 0xB8000.
#[cfg(all(target_arch = "x86_64", target_os = "none"))]
pub struct VgaTextSink {
    base: *mut u16,
}

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
impl VgaTextSink {
    pub const LEGACY_BASE: usize = 0xB8000;

    /// # Safety
    /// `base` must map at least `SCREEN_CELLS` writable `u16`s of VGA text
    /// memory for the lifetime of the sink.
    pub const unsafe fn new(base: *mut u16) -> Self {
        Self { base }
    }
}

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
impl DisplaySink for VgaTextSink {
    fn present(&mut self, frame: &[Cell]) {
        for (i, cell) in frame.iter().take(SCREEN_CELLS).enumerate() {
            // SAFETY: `new` guarantees SCREEN_CELLS words are mapped.
            unsafe { self.base.add(i).write_volatile(cell.to_vga_word()) };
        }
    }
}
