//! Composes the desktop into a [`ScreenBuffer`].
//!
//! Layers, bottom to top: background, windows back to front, taskbar,
//! start menu, pointer. The caller publishes the finished buffer in one
//! `present` call.

use cellos_abi::{Cell, Rect, SCREEN_HEIGHT, SCREEN_WIDTH};
use cellos_gfx::glyphs::FrameGlyphs;
use cellos_gfx::{CellTarget, blit, draw_text, frame};
use cellos_video::ScreenBuffer;

use super::input::Windows;
use super::taskbar;
use crate::theme::{
    DESKTOP_ATTR, DESKTOP_GLYPH, FRAME_ATTR, FRAME_FOCUSED_ATTR, GLYPH_CLOSE, GLYPH_MAXIMIZE,
    GLYPH_RESTORE, POINTER_ATTR, POINTER_GLYPH,
};

pub struct SceneState {
    pub menu_open: bool,
    pub pointer: (i32, i32),
}

pub fn compose(screen: &mut ScreenBuffer, windows: &Windows, scene: &SceneState) {
    screen.fill(Cell::new(DESKTOP_GLYPH, DESKTOP_ATTR));

    for handle in windows.z_order() {
        if let Some(win) = windows.get(handle) {
            draw_window_frame(screen, win.rect(), win.title().as_bytes(), win.is_focused(), win.is_maximized());
            let r = win.rect();
            blit(screen, r.x, r.y, r.width, r.height, win.buffer());
        }
    }

    taskbar::draw_taskbar(screen, scene.menu_open);
    if scene.menu_open {
        let (px, py) = scene.pointer;
        taskbar::draw_start_menu(screen, taskbar::menu_item_at(px, py));
    }

    let (px, py) = scene.pointer;
    if (0..SCREEN_WIDTH).contains(&px) && (0..SCREEN_HEIGHT).contains(&py) {
        screen.put(px, py, Cell::new(POINTER_GLYPH, POINTER_ATTR));
    }
}

/// Border, title and title-bar glyphs around content rect `r`.
fn draw_window_frame<T: CellTarget + ?Sized>(
    target: &mut T,
    r: Rect,
    title: &[u8],
    focused: bool,
    maximized: bool,
) {
    let attr = if focused { FRAME_FOCUSED_ATTR } else { FRAME_ATTR };
    let outer = r.inflate(1);
    frame(target, outer.x, outer.y, outer.width, outer.height, &FrameGlyphs::DOUBLE, attr);

    let title_y = r.y - 1;
    let room = r.width.max(0) as usize;
    draw_text(target, r.x, title_y, &title[..title.len().min(room)], attr);
    if r.width > 4 {
        let max_glyph = if maximized { GLYPH_RESTORE } else { GLYPH_MAXIMIZE };
        target.put(r.x + r.width - 3, title_y, Cell::new(max_glyph, attr));
        target.put(r.x + r.width - 1, title_y, Cell::new(GLYPH_CLOSE, attr));
    }
}
