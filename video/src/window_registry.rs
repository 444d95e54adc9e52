//! Window registry: a fixed pool of window records, the z-order list, and
//! the cell buffers each window owns.
//!
//! Windows are addressed by [`WindowHandle`], a slot index paired with the
//! window's unique id. A handle outlives its window harmlessly: once the
//! slot is closed or reused, every operation taking that handle is a no-op.
//!
//! Buffer allocation is bounded by a cell budget and uses fallible
//! reservation, so running out of memory shows up as a failed `create` or
//! `resize` rather than an abort.

use alloc::vec::Vec;

use bitflags::bitflags;
use cellos_abi::{Cell, Rect, SCREEN_CELLS, TITLE_MAX};
use cellos_gfx::CellView;
use cellos_lib::string::{bytes_as_str, copy_truncated};
use cellos_lib::{klog_debug, klog_warn};

pub const MAX_WINDOWS: usize = 10;

/// Enough for every slot to hold two full-screen buffers at once, which
/// covers resizing a maximized window.
pub const DEFAULT_CELL_BUDGET: usize = SCREEN_CELLS * MAX_WINDOWS * 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle {
    slot: u8,
    id: u32,
}

impl WindowHandle {
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn slot(&self) -> usize {
        self.slot as usize
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct WindowFlags: u8 {
        const FOCUSED = 0x01;
        const MAXIMIZED = 0x02;
    }
}

pub struct Window<S> {
    id: u32,
    rect: Rect,
    saved: Option<Rect>,
    title: [u8; TITLE_MAX + 1],
    flags: WindowFlags,
    buffer: Vec<Cell>,
    app: Option<S>,
}

impl<S> Window<S> {
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn title(&self) -> &str {
        bytes_as_str(&self.title)
    }

    pub fn set_title(&mut self, title: &str) {
        copy_truncated(&mut self.title[..TITLE_MAX], title);
    }

    pub fn flags(&self) -> WindowFlags {
        self.flags
    }

    pub fn is_focused(&self) -> bool {
        self.flags.contains(WindowFlags::FOCUSED)
    }

    pub fn is_maximized(&self) -> bool {
        self.flags.contains(WindowFlags::MAXIMIZED)
    }

    /// Geometry to return to when a maximized window is restored.
    pub fn saved_rect(&self) -> Option<Rect> {
        self.saved
    }

    /// Content cells, row-major, `width * height` long.
    pub fn buffer(&self) -> &[Cell] {
        &self.buffer
    }

    pub fn canvas(&mut self) -> Option<CellView<'_>> {
        CellView::new(&mut self.buffer, self.rect.width, self.rect.height)
    }

    pub fn app(&self) -> Option<&S> {
        self.app.as_ref()
    }

    pub fn app_mut(&mut self) -> Option<&mut S> {
        self.app.as_mut()
    }

    pub fn set_app(&mut self, app: S) {
        self.app = Some(app);
    }

    /// The app state and a canvas over this window's buffer, borrowed
    /// together so an app can draw into its own window.
    pub fn app_and_canvas(&mut self) -> Option<(&mut S, CellView<'_>)> {
        let app = self.app.as_mut()?;
        let view = CellView::new(&mut self.buffer, self.rect.width, self.rect.height)?;
        Some((app, view))
    }
}

pub struct WindowRegistry<S> {
    slots: [Option<Window<S>>; MAX_WINDOWS],
    /// Slot indices, back to front.
    z_order: [u8; MAX_WINDOWS],
    z_len: usize,
    next_id: u32,
    focused: Option<WindowHandle>,
    cell_budget: usize,
    cells_in_use: usize,
}

impl<S> WindowRegistry<S> {
    pub fn new() -> Self {
        Self::with_cell_budget(DEFAULT_CELL_BUDGET)
    }

    pub fn with_cell_budget(cell_budget: usize) -> Self {
        Self {
            slots: core::array::from_fn(|_| None),
            z_order: [0; MAX_WINDOWS],
            z_len: 0,
            next_id: 1,
            focused: None,
            cell_budget,
            cells_in_use: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.z_len
    }

    pub fn is_empty(&self) -> bool {
        self.z_len == 0
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn cells_in_use(&self) -> usize {
        self.cells_in_use
    }

    pub fn cell_budget(&self) -> usize {
        self.cell_budget
    }

    fn slot_of(&self, handle: WindowHandle) -> Option<usize> {
        let slot = handle.slot as usize;
        match self.slots.get(slot)? {
            Some(win) if win.id == handle.id => Some(slot),
            _ => None,
        }
    }

    fn handle_at(&self, slot: usize) -> Option<WindowHandle> {
        let win = self.slots.get(slot)?.as_ref()?;
        Some(WindowHandle {
            slot: slot as u8,
            id: win.id,
        })
    }

    pub fn contains(&self, handle: WindowHandle) -> bool {
        self.slot_of(handle).is_some()
    }

    pub fn get(&self, handle: WindowHandle) -> Option<&Window<S>> {
        let slot = self.slot_of(handle)?;
        self.slots[slot].as_ref()
    }

    pub fn get_mut(&mut self, handle: WindowHandle) -> Option<&mut Window<S>> {
        let slot = self.slot_of(handle)?;
        self.slots[slot].as_mut()
    }

    fn alloc_cells(&mut self, count: usize) -> Option<Vec<Cell>> {
        if self.cells_in_use.saturating_add(count) > self.cell_budget {
            klog_warn!(
                "wm: cell budget exhausted ({} in use, {} requested)",
                self.cells_in_use,
                count
            );
            return None;
        }
        let mut cells = Vec::new();
        if cells.try_reserve_exact(count).is_err() {
            klog_warn!("wm: failed to allocate {} cells", count);
            return None;
        }
        cells.resize(count, Cell::BLANK);
        self.cells_in_use += count;
        Some(cells)
    }

    fn release_cells(&mut self, count: usize) {
        self.cells_in_use = self.cells_in_use.saturating_sub(count);
    }

    /// Create an unfocused window at the front of the z-order.
    ///
    /// Fails without side effects if the pool is full, a dimension is not
    /// positive, or the buffer cannot be allocated.
    pub fn create(&mut self, title: &str, x: i32, y: i32, width: i32, height: i32) -> Option<WindowHandle> {
        let rect = Rect::new(x, y, width, height);
        if rect.is_empty() {
            return None;
        }
        let Some(slot) = self.slots.iter().position(Option::is_none) else {
            klog_debug!("wm: window pool exhausted");
            return None;
        };
        let buffer = self.alloc_cells(rect.area())?;

        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);

        let mut win = Window {
            id,
            rect,
            saved: None,
            title: [0; TITLE_MAX + 1],
            flags: WindowFlags::empty(),
            buffer,
            app: None,
        };
        win.set_title(title);
        self.slots[slot] = Some(win);
        self.z_order[self.z_len] = slot as u8;
        self.z_len += 1;

        Some(WindowHandle {
            slot: slot as u8,
            id,
        })
    }

    /// Destroy a window, releasing its buffer and app state. Clears focus if
    /// the window held it. Returns false for a stale handle.
    pub fn close(&mut self, handle: WindowHandle) -> bool {
        let Some(slot) = self.slot_of(handle) else {
            return false;
        };
        let Some(win) = self.slots[slot].take() else {
            return false;
        };
        self.release_cells(win.buffer.len());
        self.remove_from_z(slot);
        if self.focused == Some(handle) {
            self.focused = None;
        }
        true
    }

    fn remove_from_z(&mut self, slot: usize) {
        let Some(pos) = self.z_order[..self.z_len]
            .iter()
            .position(|&s| s as usize == slot)
        else {
            return;
        };
        self.z_order.copy_within(pos + 1..self.z_len, pos);
        self.z_len -= 1;
    }

    /// Move a window to the front. Returns false for a stale handle.
    pub fn raise(&mut self, handle: WindowHandle) -> bool {
        let Some(slot) = self.slot_of(handle) else {
            return false;
        };
        self.remove_from_z(slot);
        self.z_order[self.z_len] = slot as u8;
        self.z_len += 1;
        true
    }

    /// Handles back to front.
    pub fn z_order(&self) -> impl DoubleEndedIterator<Item = WindowHandle> + '_ {
        self.z_order[..self.z_len]
            .iter()
            .filter_map(|&slot| self.handle_at(slot as usize))
    }

    /// Position of `handle` in the z-order, 0 being the back.
    pub fn z_index(&self, handle: WindowHandle) -> Option<usize> {
        let slot = self.slot_of(handle)?;
        self.z_order[..self.z_len]
            .iter()
            .position(|&s| s as usize == slot)
    }

    /// Front-most window.
    pub fn top(&self) -> Option<WindowHandle> {
        self.z_order().next_back()
    }

    pub fn focused(&self) -> Option<WindowHandle> {
        self.focused
    }

    /// Give focus to `handle`, or to nobody. A stale handle clears focus.
    pub fn set_focus(&mut self, handle: Option<WindowHandle>) {
        let target = handle.filter(|&h| self.contains(h));
        for win in self.slots.iter_mut().flatten() {
            win.flags.remove(WindowFlags::FOCUSED);
        }
        if let Some(h) = target {
            if let Some(win) = self.get_mut(h) {
                win.flags.insert(WindowFlags::FOCUSED);
            }
        }
        self.focused = target;
    }

    pub fn move_to(&mut self, handle: WindowHandle, x: i32, y: i32) -> bool {
        match self.get_mut(handle) {
            Some(win) => {
                win.rect.x = x;
                win.rect.y = y;
                true
            }
            None => false,
        }
    }

    /// Reallocate the buffer, keeping the overlapping top-left block cell
    /// for cell and blanking the rest. On failure the window is untouched.
    pub fn resize(&mut self, handle: WindowHandle, width: i32, height: i32) -> bool {
        let Some(slot) = self.slot_of(handle) else {
            return false;
        };
        let new_rect = Rect::new(0, 0, width, height);
        if new_rect.is_empty() {
            return false;
        }
        let old_rect = match &self.slots[slot] {
            Some(win) => win.rect,
            None => return false,
        };
        if old_rect.width == width && old_rect.height == height {
            return true;
        }

        let Some(mut cells) = self.alloc_cells(new_rect.area()) else {
            return false;
        };
        let Some(win) = self.slots[slot].as_mut() else {
            return false;
        };

        let copy_w = old_rect.width.min(width) as usize;
        let copy_h = old_rect.height.min(height) as usize;
        for row in 0..copy_h {
            let src = row * old_rect.width as usize;
            let dst = row * width as usize;
            cells[dst..dst + copy_w].copy_from_slice(&win.buffer[src..src + copy_w]);
        }

        let old = core::mem::replace(&mut win.buffer, cells);
        win.rect.width = width;
        win.rect.height = height;
        self.release_cells(old.len());
        true
    }

    /// Resize and move in one step; nothing changes if the resize fails.
    pub fn set_geometry(&mut self, handle: WindowHandle, rect: Rect) -> bool {
        if !self.resize(handle, rect.width, rect.height) {
            return false;
        }
        self.move_to(handle, rect.x, rect.y)
    }

    /// Save the current geometry and fill `area`. No-op (true) if already
    /// maximized; false if the window is stale or the resize fails.
    pub fn maximize(&mut self, handle: WindowHandle, area: Rect) -> bool {
        let Some(win) = self.get(handle) else {
            return false;
        };
        if win.is_maximized() {
            return true;
        }
        let saved = win.rect;
        if !self.set_geometry(handle, area) {
            return false;
        }
        if let Some(win) = self.get_mut(handle) {
            win.saved = Some(saved);
            win.flags.insert(WindowFlags::MAXIMIZED);
        }
        true
    }

    /// Return a maximized window to its saved geometry.
    pub fn restore(&mut self, handle: WindowHandle) -> bool {
        let Some(saved) = self.get(handle).and_then(|w| w.saved) else {
            return false;
        };
        if !self.set_geometry(handle, saved) {
            return false;
        }
        if let Some(win) = self.get_mut(handle) {
            win.saved = None;
            win.flags.remove(WindowFlags::MAXIMIZED);
        }
        true
    }
}

impl<S> Default for WindowRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}
