//! Windowed terminal: scrollback, a line editor with history, and a small
//! set of filesystem and launcher commands.

use alloc::string::String;
use alloc::vec::Vec;

use cellos_abi::keys::{KEY_DOWN, KEY_LEFT, KEY_RIGHT, KEY_UP};
use cellos_abi::{InputEvent, InputEventType, KeyPress};
use cellos_fs::FileSystem;
use cellos_gfx::CellTarget;
use cellos_gfx::glyphs::{FULL_BLOCK, LIGHT_SHADE};

use crate::appkit::{App, AppContext, AppKind, Canvas};
use crate::theme::{SCROLL_THUMB_ATTR, SCROLL_TRACK_ATTR, TERM_BG, TERM_OUTPUT, TEXT_ON_BLACK};

pub const MAX_LINES: usize = 80;
/// Longest scrollback line and longest input line, in bytes.
pub const LINE_MAX: usize = 77;
pub const HISTORY_LEN: usize = 16;
/// Rightmost column the input cursor is drawn at.
const CURSOR_COL_MAX: usize = LINE_MAX - 3;
const PROMPT: &str = "> ";

/// Scrollback and input state, independent of any window.
pub struct Shell {
    lines: Vec<String>,
    scroll_top: usize,
    input: String,
    cursor: usize,
    history: [String; HISTORY_LEN],
    history_next: usize,
    history_count: usize,
    /// How far back the user has walked into history; `None` while editing.
    history_nav: Option<usize>,
    saved_input: String,
}

impl Shell {
    pub fn new() -> Self {
        let mut shell = Self {
            lines: Vec::with_capacity(MAX_LINES),
            scroll_top: 0,
            input: String::new(),
            cursor: 0,
            history: core::array::from_fn(|_| String::new()),
            history_next: 0,
            history_count: 0,
            history_nav: None,
            saved_input: String::new(),
        };
        shell.push_line("cellos GUI shell (FS-backed)");
        shell.push_line("Type 'help' for commands.");
        shell
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// Append a line, dropping the oldest when full. Long lines are cut.
    pub fn push_line(&mut self, text: &str) {
        if self.lines.len() >= MAX_LINES {
            self.lines.remove(0);
        }
        let mut end = text.len().min(LINE_MAX);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        self.lines.push(String::from(&text[..end]));
    }

    fn max_top(&self, view_h: usize) -> usize {
        self.lines.len().saturating_sub(view_h)
    }

    fn scroll_to_bottom(&mut self, view_h: usize) {
        self.scroll_top = self.max_top(view_h);
    }

    fn scroll_by(&mut self, wheel: i32, view_h: usize) {
        let top = self.scroll_top as i32 - wheel;
        self.scroll_top = top.max(0).min(self.max_top(view_h) as i32) as usize;
    }

    fn insert_char(&mut self, ch: u8) {
        if self.input.len() >= LINE_MAX {
            return;
        }
        self.input.insert(self.cursor, ch as char);
        self.cursor += 1;
    }

    fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.input.remove(self.cursor);
        }
    }

    fn add_history(&mut self, cmd: &str) {
        if cmd.is_empty() {
            return;
        }
        self.history[self.history_next] = String::from(cmd);
        self.history_next = (self.history_next + 1) % HISTORY_LEN;
        if self.history_count < HISTORY_LEN {
            self.history_count += 1;
        }
    }

    fn history_entry(&self, offset: usize) -> &str {
        &self.history[(self.history_next + HISTORY_LEN - 1 - offset) % HISTORY_LEN]
    }

    fn set_input(&mut self, text: String) {
        self.input = text;
        self.cursor = self.input.len();
    }

    fn history_prev(&mut self) {
        if self.history_count == 0 {
            return;
        }
        let offset = match self.history_nav {
            None => {
                self.saved_input = self.input.clone();
                0
            }
            Some(n) if n + 1 < self.history_count => n + 1,
            Some(n) => n,
        };
        self.history_nav = Some(offset);
        let entry = String::from(self.history_entry(offset));
        self.set_input(entry);
    }

    fn history_next(&mut self) {
        match self.history_nav {
            None => {}
            Some(0) => {
                self.history_nav = None;
                let saved = core::mem::take(&mut self.saved_input);
                self.set_input(saved);
            }
            Some(n) => {
                self.history_nav = Some(n - 1);
                let entry = String::from(self.history_entry(n - 1));
                self.set_input(entry);
            }
        }
    }

    /// Run the current input line and reset the editor.
    pub fn execute(&mut self, ctx: &mut AppContext<'_>, view_h: usize) {
        let cmd = core::mem::take(&mut self.input);
        self.cursor = 0;
        self.history_nav = None;

        if !cmd.is_empty() {
            self.add_history(&cmd);
            let mut echo = String::from(PROMPT);
            echo.push_str(&cmd);
            self.push_line(&echo);
        }
        self.run_command(&cmd, ctx);
        self.scroll_to_bottom(view_h);
    }

    fn report(&mut self, ok: bool, success: &str, failure: &str) {
        self.push_line(if ok { success } else { failure });
    }

    fn run_command(&mut self, cmd: &str, ctx: &mut AppContext<'_>) {
        let (name, rest) = cmd.split_once(' ').unwrap_or((cmd, ""));
        match (name, rest) {
            ("", _) => {}
            ("help", "") => {
                self.push_line("help clear pwd echo cd ls mkdir rmdir");
                self.push_line("new del read write edit");
                self.push_line("snake cubeDip explorer");
            }
            ("clear", "") => {
                self.lines.clear();
                self.scroll_top = 0;
            }
            ("pwd", "") => {
                let cwd = ctx.fs.cwd();
                self.push_line(&cwd);
            }
            ("echo", text) => self.push_line(text),
            ("ls", "") => self.list_dir(ctx.fs),
            ("cd", "..") => {
                let ok = ctx.fs.cd_up().is_ok();
                self.report(ok, "ok", "cd failed");
            }
            ("cd", dir) if !dir.is_empty() => {
                let ok = ctx.fs.change_dir(dir).is_ok();
                self.report(ok, "ok", "cd failed");
            }
            ("mkdir", dir) if !dir.is_empty() => {
                let ok = ctx.fs.create_dir(dir).is_ok();
                self.report(ok, "dir created", "mkdir failed");
            }
            ("rmdir", dir) if !dir.is_empty() => {
                let ok = ctx.fs.delete_dir(dir).is_ok();
                self.report(ok, "dir removed", "rmdir failed");
            }
            ("new", file) if !file.is_empty() => {
                let ok = ctx.fs.create(file).is_ok();
                self.report(ok, "file created", "new failed");
            }
            ("del", file) if !file.is_empty() => {
                let ok = ctx.fs.delete(file).is_ok();
                self.report(ok, "file deleted", "del failed");
            }
            ("write", args) => {
                let args = args.trim_start_matches(' ');
                let (file, text) = args.split_once(' ').unwrap_or((args, ""));
                if file.is_empty() {
                    self.push_line("write <file> <text>");
                } else {
                    let ok = ctx.fs.write(file, text.trim_start_matches(' ').as_bytes()).is_ok();
                    self.report(ok, "written", "write failed");
                }
            }
            ("read", file) if !file.is_empty() => self.read_file(ctx.fs, file),
            ("edit", file) if !file.is_empty() => ctx.launch(AppKind::Notepad, Some(file)),
            ("snake", "") => ctx.launch(AppKind::Snake, None),
            ("cubeDip", "") => ctx.launch(AppKind::CubeDip, None),
            ("explorer", "") => ctx.launch(AppKind::Explorer, None),
            _ => self.push_line("Unknown command"),
        }
    }

    fn list_dir(&mut self, fs: &mut dyn FileSystem) {
        for entry in fs.list() {
            if entry.is_dir() {
                let mut line = String::from("<DIR> ");
                line.push_str(entry.name());
                self.push_line(&line);
            } else {
                self.push_line(entry.name());
            }
        }
    }

    fn read_file(&mut self, fs: &mut dyn FileSystem, file: &str) {
        let Ok(data) = fs.read_to_end(file) else {
            self.push_line("read failed");
            return;
        };
        let text = String::from_utf8_lossy(&data);
        for line in text.lines() {
            let mut rest = line;
            loop {
                let mut cut = rest.len().min(LINE_MAX);
                while !rest.is_char_boundary(cut) {
                    cut -= 1;
                }
                self.push_line(&rest[..cut]);
                rest = &rest[cut..];
                if rest.is_empty() {
                    break;
                }
            }
        }
    }

    fn view_height(canvas: &Canvas<'_>) -> usize {
        (canvas.height() - 1).max(1) as usize
    }

    fn thumb_height(&self, view_h: usize) -> usize {
        (view_h * view_h / self.lines.len().max(1)).max(1)
    }

    fn draw_scrollbar(&self, canvas: &mut Canvas<'_>, view_h: usize) {
        let x = canvas.width() - 1;
        for y in 0..canvas.height() {
            canvas.put_char(x, y, LIGHT_SHADE, SCROLL_TRACK_ATTR);
        }
        let (thumb_y, thumb_h) = if self.lines.len() > view_h {
            let thumb_h = self.thumb_height(view_h);
            // lines > view_h, so max_top is at least 1.
            let max_top = self.max_top(view_h).max(1);
            let thumb_y = self.scroll_top * view_h.saturating_sub(thumb_h).max(1) / max_top;
            (thumb_y, thumb_h)
        } else {
            (0, view_h)
        };
        for y in thumb_y..(thumb_y + thumb_h).min(view_h) {
            canvas.put_char(x, y as i32, FULL_BLOCK, SCROLL_THUMB_ATTR);
        }
    }

    fn draw_prompt(&self, canvas: &mut Canvas<'_>) {
        let text_w = (canvas.width() - 1).max(1) as usize;
        let y = canvas.height() - 1;
        let mut prompt: Vec<u8> = Vec::with_capacity(LINE_MAX + 1);
        prompt.extend_from_slice(PROMPT.as_bytes());
        prompt.extend_from_slice(self.input.as_bytes());
        prompt.truncate(CURSOR_COL_MAX.min(text_w));

        let cursor_col = (PROMPT.len() + self.cursor).min(CURSOR_COL_MAX);
        if prompt.len() <= cursor_col {
            prompt.resize(cursor_col + 1, b' ');
        }
        prompt[cursor_col] = b'_';
        canvas.draw_text(0, y, &prompt, TEXT_ON_BLACK);
    }
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl App for Shell {
    fn kind(&self) -> AppKind {
        AppKind::Shell
    }

    fn on_tick(&mut self, canvas: &mut Canvas<'_>, _ctx: &mut AppContext<'_>) {
        let view_h = Self::view_height(canvas);
        let text_w = (canvas.width() - 1).max(1) as usize;
        self.scroll_top = self.scroll_top.min(self.max_top(view_h));
        self.cursor = self.cursor.min(self.input.len());

        canvas.clear(TERM_BG);
        for (row, line) in self.lines.iter().skip(self.scroll_top).take(view_h).enumerate() {
            let bytes = line.as_bytes();
            canvas.draw_text(0, row as i32, &bytes[..bytes.len().min(text_w)], TERM_OUTPUT);
        }
        self.draw_prompt(canvas);
        self.draw_scrollbar(canvas, view_h);
    }

    fn on_key(&mut self, canvas: &mut Canvas<'_>, ctx: &mut AppContext<'_>, key: KeyPress) {
        match key.key {
            KEY_LEFT => self.cursor = self.cursor.saturating_sub(1),
            KEY_RIGHT => self.cursor = (self.cursor + 1).min(self.input.len()),
            KEY_UP => self.history_prev(),
            KEY_DOWN => self.history_next(),
            _ if key.is_backspace() => self.backspace(),
            _ if key.is_enter() => {
                let view_h = Self::view_height(canvas);
                self.execute(ctx, view_h);
            }
            _ => {
                if let Some(ch) = key.printable() {
                    self.insert_char(ch);
                }
            }
        }
    }

    fn on_pointer(&mut self, canvas: &mut Canvas<'_>, ctx: &mut AppContext<'_>, event: &InputEvent) {
        let view_h = Self::view_height(canvas);
        match event.event_type {
            InputEventType::Scroll if ctx.focused => self.scroll_by(event.wheel as i32, view_h),
            InputEventType::ButtonDown if event.is_primary() => {
                let Some((x, y)) = canvas.to_local(event.x as i32, event.y as i32) else {
                    return;
                };
                if x != canvas.width() - 1 || y as usize >= view_h {
                    return;
                }
                let thumb_h = self.thumb_height(view_h);
                let max_top = self.max_top(view_h);
                let top = y as usize * max_top.max(1) / view_h.saturating_sub(thumb_h).max(1);
                self.scroll_top = top.min(max_top);
            }
            _ => {}
        }
    }
}
