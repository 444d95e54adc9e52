//! Text editor window: a small fixed-capacity buffer saved with F2.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use cellos_abi::KeyPress;
use cellos_abi::keys::{KEY_DOWN, KEY_F2, KEY_LEFT, KEY_RIGHT, KEY_UP};
use cellos_fs::FileSystem;
use cellos_gfx::CellTarget;
use cellos_lib::{klog_info, klog_warn};

use crate::appkit::{App, AppContext, AppKind, Canvas};
use crate::theme::{TEXT_ON_BLACK, TEXT_ON_GREY};

/// Buffer capacity in bytes, including room for one terminator the way
/// saved files have always been sized.
pub const NOTE_CAPACITY: usize = 2048;
pub const BLINK_TICKS: u64 = 20;
pub const DEFAULT_FILE: &str = "note.txt";
const GREETING: &[u8] = b"Window editor ready...";

pub struct Notepad {
    text: Vec<u8>,
    cursor: usize,
    preferred_col: Option<usize>,
    filename: Option<String>,
    dirty: bool,
    scroll_row: usize,
    blink_tick: u64,
    cursor_visible: bool,
}

impl Notepad {
    fn empty() -> Self {
        Self {
            text: Vec::with_capacity(NOTE_CAPACITY),
            cursor: 0,
            preferred_col: None,
            filename: None,
            dirty: false,
            scroll_row: 0,
            blink_tick: 0,
            cursor_visible: true,
        }
    }

    /// Open `file` if given (a missing file starts empty under that name),
    /// otherwise start with a greeting.
    pub fn open(file: Option<&str>, fs: &mut dyn FileSystem) -> Self {
        let mut note = Self::empty();
        match file.filter(|f| !f.is_empty()) {
            Some(name) => {
                note.filename = Some(name.to_string());
                match fs.read_to_end(name) {
                    Ok(data) => {
                        let n = data.len().min(NOTE_CAPACITY - 1);
                        note.text.extend_from_slice(&data[..n]);
                    }
                    Err(e) => klog_info!("notepad: {} not loaded: {}", name, e.as_str()),
                }
            }
            None => note.text.extend_from_slice(GREETING),
        }
        note.cursor = note.text.len();
        note
    }

    pub fn text(&self) -> &[u8] {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the buffer out, naming it `note.txt` if it has no name yet.
    pub fn save(&mut self, fs: &mut dyn FileSystem) {
        let name = self.filename.get_or_insert_with(|| DEFAULT_FILE.to_string());
        match fs.write(name, &self.text) {
            Ok(()) => self.dirty = false,
            Err(e) => klog_warn!("notepad: saving {} failed: {}", name, e.as_str()),
        }
    }

    /// Logical (row, col) of byte offset `pos`, counting newlines only.
    fn line_col(&self, pos: usize) -> (usize, usize) {
        let mut row = 0;
        let mut col = 0;
        for &ch in &self.text[..pos.min(self.text.len())] {
            if ch == b'\n' {
                row += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        (row, col)
    }

    /// Byte offset of (row, col), clamped to the end of that row.
    fn offset_of(&self, target_row: usize, target_col: usize) -> usize {
        let mut row = 0;
        let mut col = 0;
        for (i, &ch) in self.text.iter().enumerate() {
            if row == target_row && col == target_col {
                return i;
            }
            if ch == b'\n' {
                if row == target_row {
                    return i;
                }
                row += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        self.text.len()
    }

    fn move_vertical(&mut self, down: bool) {
        let (row, col) = self.line_col(self.cursor);
        let col = *self.preferred_col.get_or_insert(col);
        let target = if down {
            if self.text[self.cursor..].contains(&b'\n') {
                row + 1
            } else {
                row
            }
        } else if row > 0 {
            row - 1
        } else {
            return;
        };
        self.cursor = self.offset_of(target, col);
    }

    fn insert(&mut self, ch: u8) {
        if self.text.len() >= NOTE_CAPACITY - 1 {
            return;
        }
        self.text.insert(self.cursor, ch);
        self.cursor += 1;
        self.dirty = true;
    }

    fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.text.remove(self.cursor);
            self.dirty = true;
        }
    }

    fn scroll_to_cursor(&mut self, text_rows: usize) {
        let (row, _) = self.line_col(self.cursor);
        if row < self.scroll_row {
            self.scroll_row = row;
        }
        if row >= self.scroll_row + text_rows {
            self.scroll_row = row + 1 - text_rows;
        }
    }

    fn draw_text_area(&self, canvas: &mut Canvas<'_>, text_rows: usize) {
        let width = canvas.width().max(1) as usize;
        let mut row = 0;
        let mut col = 0;
        let mut visual_row = 0;
        for &ch in &self.text {
            if visual_row >= text_rows {
                break;
            }
            if row < self.scroll_row {
                if ch == b'\n' {
                    row += 1;
                    col = 0;
                } else {
                    col += 1;
                    if col >= width {
                        row += 1;
                        col = 0;
                    }
                }
                continue;
            }
            if ch == b'\n' || col >= width {
                visual_row += 1;
                col = 0;
                if ch == b'\n' {
                    continue;
                }
            }
            if visual_row < text_rows {
                canvas.put_char(col as i32, visual_row as i32, ch, TEXT_ON_BLACK);
                col += 1;
            }
        }
    }

    fn draw_status(&self, canvas: &mut Canvas<'_>) {
        let y = canvas.height() - 1;
        let mut x = canvas.draw_text(0, y, b"F2 save | ", TEXT_ON_GREY) as i32;
        let name = self.filename.as_deref().unwrap_or("(untitled)");
        x += canvas.draw_text(x, y, name.as_bytes(), TEXT_ON_GREY) as i32;
        if self.dirty {
            canvas.draw_text(x, y, b" *", TEXT_ON_GREY);
        }
    }

    fn touch_cursor(&mut self) {
        self.cursor_visible = true;
    }
}

impl App for Notepad {
    fn kind(&self) -> AppKind {
        AppKind::Notepad
    }

    fn on_tick(&mut self, canvas: &mut Canvas<'_>, ctx: &mut AppContext<'_>) {
        if ctx.ticks.wrapping_sub(self.blink_tick) >= BLINK_TICKS {
            self.blink_tick = ctx.ticks;
            self.cursor_visible = !self.cursor_visible;
        }
        let text_rows = (canvas.height() - 1).max(0) as usize;
        self.scroll_to_cursor(text_rows.max(1));

        canvas.clear(TEXT_ON_BLACK);
        self.draw_text_area(canvas, text_rows);

        if self.cursor_visible {
            let (row, col) = self.line_col(self.cursor);
            if row >= self.scroll_row && row - self.scroll_row < text_rows {
                canvas.put_char(col as i32, (row - self.scroll_row) as i32, b'_', TEXT_ON_GREY);
            }
        }
        self.draw_status(canvas);
    }

    fn on_key(&mut self, _canvas: &mut Canvas<'_>, ctx: &mut AppContext<'_>, key: KeyPress) {
        match key.key {
            KEY_F2 => {
                self.save(ctx.fs);
                return;
            }
            KEY_LEFT => {
                self.cursor = self.cursor.saturating_sub(1);
                self.preferred_col = None;
            }
            KEY_RIGHT => {
                self.cursor = (self.cursor + 1).min(self.text.len());
                self.preferred_col = None;
            }
            KEY_UP => self.move_vertical(false),
            KEY_DOWN => self.move_vertical(true),
            _ if key.is_backspace() => {
                self.backspace();
                self.preferred_col = None;
            }
            _ if key.is_enter() => {
                self.insert(b'\n');
                self.preferred_col = None;
            }
            _ => match key.printable() {
                Some(ch) => {
                    self.insert(ch);
                    self.preferred_col = None;
                }
                None => return,
            },
        }
        self.touch_cursor();
    }
}
