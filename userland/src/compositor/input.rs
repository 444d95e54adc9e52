//! Pointer and keyboard handling for the window manager: hit testing,
//! focus, dragging, maximize/restore and the start menu.

use alloc::boxed::Box;

use cellos_abi::keys::{KEY_ESCAPE, KEY_TAB};
use cellos_abi::{InputEvent, InputEventType, KeyPress, Rect, SCREEN_HEIGHT, SCREEN_WIDTH};
use cellos_lib::klog_debug;
use cellos_video::{WindowHandle, WindowRegistry};

use super::taskbar;
use crate::appkit::{App, AppKind};
use crate::apps::LAUNCH_TABLE;

pub type Windows = WindowRegistry<Box<dyn App>>;

/// Area a maximized window fills: everything below the taskbar, with room
/// for the frame.
pub const MAXIMIZED_AREA: Rect = Rect::new(1, 2, SCREEN_WIDTH - 2, SCREEN_HEIGHT - 3);

/// What lies under a screen cell, front-most window first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Close(WindowHandle),
    Maximize(WindowHandle),
    TitleBar(WindowHandle),
    Content(WindowHandle),
    Desktop,
}

/// Frame (border included) of a window with content rect `r`.
fn frame_rect(r: Rect) -> Rect {
    r.inflate(1)
}

pub fn hit_test(windows: &Windows, x: i32, y: i32) -> Hit {
    for handle in windows.z_order().rev() {
        let Some(win) = windows.get(handle) else {
            continue;
        };
        let r = win.rect();
        if !frame_rect(r).contains(x, y) {
            continue;
        }
        if y == r.y - 1 {
            // Glyphs are only drawn on titles wider than four cells.
            if r.width > 4 && x == r.x + r.width - 1 {
                return Hit::Close(handle);
            }
            if r.width > 4 && x == r.x + r.width - 3 {
                return Hit::Maximize(handle);
            }
            return Hit::TitleBar(handle);
        }
        return Hit::Content(handle);
    }
    Hit::Desktop
}

/// Keys the window manager acts on itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Exit,
    CloseFocused,
    ToggleMaximize,
    ToggleMenu,
    CycleFocus,
    Forward(KeyPress),
}

pub fn classify_key(key: KeyPress) -> KeyAction {
    if key.key == KEY_ESCAPE || key.is_ctrl(b'q') {
        KeyAction::Exit
    } else if key.is_ctrl(b'w') {
        KeyAction::CloseFocused
    } else if key.is_ctrl(b'm') {
        KeyAction::ToggleMaximize
    } else if key.is_ctrl(b'e') {
        KeyAction::ToggleMenu
    } else if key.key == KEY_TAB {
        KeyAction::CycleFocus
    } else {
        KeyAction::Forward(key)
    }
}

/// Outcome of a pointer event after the manager has looked at it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    /// Also offer the event to the focused window.
    Pass,
    /// The manager used the event; nobody else sees it.
    Consumed,
    /// A start-menu entry was picked.
    Launch(AppKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DragSession {
    window: WindowHandle,
    offset_x: i32,
    offset_y: i32,
}

#[derive(Debug, Default)]
pub struct InputHandler {
    drag: Option<DragSession>,
    start_menu_open: bool,
}

impl InputHandler {
    pub const fn new() -> Self {
        Self {
            drag: None,
            start_menu_open: false,
        }
    }

    pub fn start_menu_open(&self) -> bool {
        self.start_menu_open
    }

    pub fn toggle_start_menu(&mut self) {
        self.start_menu_open = !self.start_menu_open;
    }

    pub fn close_start_menu(&mut self) {
        self.start_menu_open = false;
    }

    pub fn dragging(&self) -> Option<WindowHandle> {
        self.drag.map(|d| d.window)
    }

    /// Drop a drag session that refers to `handle`.
    pub fn forget_window(&mut self, handle: WindowHandle) {
        if self.dragging() == Some(handle) {
            self.drag = None;
        }
    }

    pub fn handle_pointer(&mut self, windows: &mut Windows, event: &InputEvent) -> PointerOutcome {
        let (x, y) = (event.x as i32, event.y as i32);
        match event.event_type {
            InputEventType::ButtonDown if event.is_primary() => self.primary_down(windows, x, y),
            InputEventType::ButtonUp if event.is_primary() => {
                self.drag = None;
                PointerOutcome::Pass
            }
            InputEventType::PointerMove => {
                if event.buttons & 0x01 != 0 {
                    self.update_drag(windows, x, y);
                }
                PointerOutcome::Pass
            }
            _ => PointerOutcome::Pass,
        }
    }

    fn primary_down(&mut self, windows: &mut Windows, x: i32, y: i32) -> PointerOutcome {
        if taskbar::hit_start_button(x, y) {
            self.toggle_start_menu();
            return PointerOutcome::Consumed;
        }
        if self.start_menu_open {
            self.start_menu_open = false;
            return match taskbar::menu_item_at(x, y) {
                Some(i) => PointerOutcome::Launch(LAUNCH_TABLE[i].kind),
                None => PointerOutcome::Consumed,
            };
        }

        match hit_test(windows, x, y) {
            Hit::Desktop => windows.set_focus(None),
            Hit::Close(h) => {
                self.close_window(windows, h);
                return PointerOutcome::Consumed;
            }
            Hit::Maximize(h) => {
                toggle_maximize(windows, h);
                focus_window(windows, h);
                return PointerOutcome::Consumed;
            }
            Hit::TitleBar(h) => {
                focus_window(windows, h);
                self.start_drag(windows, h, x, y);
            }
            Hit::Content(h) => focus_window(windows, h),
        }
        PointerOutcome::Pass
    }

    fn start_drag(&mut self, windows: &Windows, handle: WindowHandle, x: i32, y: i32) {
        let Some(win) = windows.get(handle) else {
            return;
        };
        if win.is_maximized() {
            return;
        }
        let r = win.rect();
        self.drag = Some(DragSession {
            window: handle,
            offset_x: x - r.x,
            offset_y: y - r.y,
        });
    }

    fn update_drag(&mut self, windows: &mut Windows, x: i32, y: i32) {
        let Some(drag) = self.drag else {
            return;
        };
        let Some(win) = windows.get(drag.window) else {
            self.drag = None;
            return;
        };
        let r = win.rect();
        let (nx, ny) = clamp_position(x - drag.offset_x, y - drag.offset_y, r.width, r.height);
        windows.move_to(drag.window, nx, ny);
    }

    /// Close `handle` and give focus to whatever is now front-most.
    pub fn close_window(&mut self, windows: &mut Windows, handle: WindowHandle) {
        self.forget_window(handle);
        if windows.close(handle) {
            klog_debug!("wm: closed window {}", handle.id());
        }
        windows.set_focus(windows.top());
    }
}

/// Keep a window's frame on screen and off the taskbar. When the window is
/// too large to fit, the top-left bound wins.
pub fn clamp_position(x: i32, y: i32, width: i32, height: i32) -> (i32, i32) {
    let x = x.min(SCREEN_WIDTH - width - 1).max(1);
    let y = y.min(SCREEN_HEIGHT - height - 1).max(2);
    (x, y)
}

pub fn focus_window(windows: &mut Windows, handle: WindowHandle) {
    if windows.raise(handle) {
        windows.set_focus(Some(handle));
    }
}

/// Maximize or restore. A failed resize leaves the window as it was.
pub fn toggle_maximize(windows: &mut Windows, handle: WindowHandle) -> bool {
    let Some(win) = windows.get(handle) else {
        return false;
    };
    if win.is_maximized() {
        windows.restore(handle)
    } else {
        windows.maximize(handle, MAXIMIZED_AREA)
    }
}

/// Move focus to the next window in z-order, wrapping around, and raise it.
/// With nothing focused the front-most window gets focus.
pub fn cycle_focus(windows: &mut Windows) {
    let len = windows.len();
    if len == 0 {
        return;
    }
    let next = match windows.focused().and_then(|h| windows.z_index(h)) {
        None => windows.top(),
        Some(i) => windows.z_order().nth((i + 1) % len),
    };
    if let Some(h) = next {
        focus_window(windows, h);
    }
}
