//! File explorer: browse the current directory, descend into folders and
//! open files in the text editor.

use alloc::vec::Vec;

use cellos_abi::keys::{KEY_DOWN, KEY_F2, KEY_UP};
use cellos_abi::{FsEntry, KeyPress};
use cellos_gfx::CellTarget;
use cellos_lib::klog_debug;

use crate::appkit::{App, AppContext, AppKind, Canvas};
use crate::theme::{ACCENT_ON_BLUE, DIR_ON_BLUE, TEXT_ON_BLUE, TEXT_ON_GREY};

const HINT: &[u8] = b"Enter=open  Backspace=up  F2=edit";

#[derive(Default)]
pub struct FileExplorer {
    selected: usize,
    scroll_top: usize,
}

impl FileExplorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// Keep the selection on an entry and inside the visible rows.
    fn clamp(&mut self, total: usize, visible: usize) {
        if total == 0 {
            self.selected = 0;
        } else if self.selected >= total {
            self.selected = total - 1;
        }
        if self.selected < self.scroll_top {
            self.scroll_top = self.selected;
        }
        if self.selected >= self.scroll_top + visible {
            self.scroll_top = self.selected + 1 - visible;
        }
        self.scroll_top = self.scroll_top.min(total.saturating_sub(visible));
    }

    fn open_selected(&mut self, entries: &[FsEntry], ctx: &mut AppContext<'_>) {
        let Some(entry) = entries.get(self.selected) else {
            return;
        };
        if entry.is_dir() {
            match ctx.fs.change_dir(entry.name()) {
                Ok(()) => self.selected = 0,
                Err(e) => klog_debug!("explorer: cd {} failed: {}", entry.name(), e.as_str()),
            }
        } else {
            ctx.launch(AppKind::Notepad, Some(entry.name()));
        }
    }
}

impl App for FileExplorer {
    fn kind(&self) -> AppKind {
        AppKind::Explorer
    }

    fn on_tick(&mut self, canvas: &mut Canvas<'_>, ctx: &mut AppContext<'_>) {
        let entries: Vec<FsEntry> = ctx.fs.list();
        let visible = (canvas.height() - 2).max(1) as usize;
        self.clamp(entries.len(), visible);

        canvas.clear(TEXT_ON_BLUE);
        canvas.draw_text(0, 0, b"DIR ", ACCENT_ON_BLUE);
        let cwd = ctx.fs.cwd();
        canvas.draw_text(4, 0, cwd.as_bytes(), TEXT_ON_BLUE);

        let mut row = 1;
        for (i, entry) in entries.iter().enumerate().skip(self.scroll_top) {
            if row >= canvas.height() - 1 {
                break;
            }
            let attr = if i == self.selected {
                TEXT_ON_GREY
            } else if entry.is_dir() {
                DIR_ON_BLUE
            } else {
                TEXT_ON_BLUE
            };
            let tag: &[u8] = if entry.is_dir() { b"[D] " } else { b"[F] " };
            let n = canvas.draw_text(0, row, tag, attr);
            canvas.draw_text(n as i32, row, entry.name().as_bytes(), attr);
            row += 1;
        }
        if row < canvas.height() {
            canvas.draw_text(0, row, HINT, ACCENT_ON_BLUE);
        }
    }

    fn on_key(&mut self, _canvas: &mut Canvas<'_>, ctx: &mut AppContext<'_>, key: KeyPress) {
        let entries = ctx.fs.list();
        if entries.is_empty() && !key.is_backspace() {
            return;
        }
        match key.key {
            KEY_UP => self.selected = self.selected.saturating_sub(1),
            KEY_DOWN => {
                if self.selected + 1 < entries.len() {
                    self.selected += 1;
                }
            }
            KEY_F2 => self.open_selected(&entries, ctx),
            _ if key.is_enter() => self.open_selected(&entries, ctx),
            _ if key.is_backspace() => {
                if ctx.fs.cd_up().is_ok() {
                    self.selected = 0;
                }
            }
            _ => {}
        }
    }
}
