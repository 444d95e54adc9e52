//! Taskbar row and start menu: layout, hit testing and drawing.

use cellos_abi::{Cell, SCREEN_WIDTH, TASKBAR_ROW};
use cellos_gfx::glyphs::FrameGlyphs;
use cellos_gfx::{CellTarget, draw_text, fill_rect, frame};

use crate::apps::LAUNCH_TABLE;
use crate::theme::{MENU_ATTR, MENU_SELECTED_ATTR, TASKBAR_ATTR, TASKBAR_LABEL};

pub const START_BUTTON_X: i32 = 1;
pub const START_BUTTON_WIDTH: i32 = 7;
pub const MENU_X: i32 = 1;
pub const MENU_Y: i32 = 1;
pub const MENU_WIDTH: i32 = 28;
const LABEL_X: i32 = SCREEN_WIDTH - 12;

pub const fn menu_height() -> i32 {
    LAUNCH_TABLE.len() as i32 + 2
}

/// The start button spans columns `1..=8` of the taskbar row.
pub fn hit_start_button(x: i32, y: i32) -> bool {
    y == TASKBAR_ROW && x >= START_BUTTON_X && x <= START_BUTTON_X + START_BUTTON_WIDTH
}

pub fn point_in_menu(x: i32, y: i32) -> bool {
    x >= MENU_X && x < MENU_X + MENU_WIDTH && y >= MENU_Y && y < MENU_Y + menu_height()
}

/// Launch-table index of the menu row under `(x, y)`. Border rows and
/// points outside the menu yield `None`.
pub fn menu_item_at(x: i32, y: i32) -> Option<usize> {
    if !point_in_menu(x, y) {
        return None;
    }
    let row = y - (MENU_Y + 1);
    (row >= 0 && (row as usize) < LAUNCH_TABLE.len()).then_some(row as usize)
}

pub fn draw_taskbar<T: CellTarget + ?Sized>(target: &mut T, menu_open: bool) {
    fill_rect(target, 0, TASKBAR_ROW, SCREEN_WIDTH, 1, Cell::new(b' ', TASKBAR_ATTR));
    let label: &[u8] = if menu_open { b"[Start*]" } else { b"[Start]" };
    draw_text(target, START_BUTTON_X, TASKBAR_ROW, label, TASKBAR_ATTR);
    draw_text(target, LABEL_X, TASKBAR_ROW, TASKBAR_LABEL, TASKBAR_ATTR);
}

/// Draw the open start menu. `selected` highlights one entry.
pub fn draw_start_menu<T: CellTarget + ?Sized>(target: &mut T, selected: Option<usize>) {
    let height = menu_height();
    fill_rect(target, MENU_X, MENU_Y, MENU_WIDTH, height, Cell::new(b' ', MENU_ATTR));
    frame(target, MENU_X, MENU_Y, MENU_WIDTH, height, &FrameGlyphs::ASCII, MENU_ATTR);

    for (i, entry) in LAUNCH_TABLE.iter().enumerate() {
        let attr = if selected == Some(i) {
            MENU_SELECTED_ATTR
        } else {
            MENU_ATTR
        };
        let y = MENU_Y + 1 + i as i32;
        fill_rect(target, MENU_X + 1, y, MENU_WIDTH - 2, 1, Cell::new(b' ', attr));
        let text = entry.label.as_bytes();
        let room = (MENU_WIDTH - 3) as usize;
        draw_text(target, MENU_X + 2, y, &text[..text.len().min(room)], attr);
    }
}
