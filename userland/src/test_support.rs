//! Fixtures shared by the userland tests: a scripted platform for the
//! frame loop and a harness that runs one app against a bare buffer.

use std::collections::VecDeque;

use cellos_abi::keys::KEY_ESCAPE;
use cellos_abi::{Cell, InputDevice, InputEvent, KeyPress, Rect};
use cellos_drivers::InputChannel;
use cellos_fs::RamFs;
use cellos_gfx::CellView;
use cellos_video::{CaptureSink, DisplaySink};

use crate::appkit::{App, AppContext, Canvas, LaunchRequest};
use crate::compositor::{Desktop, Platform};
use crate::config::DesktopConfig;

pub struct ScriptedPlatform {
    pub ticks: u64,
    pub keys: VecDeque<KeyPress>,
    pub channel: InputChannel,
    pub sink: CaptureSink,
    pub slept: Vec<u64>,
    /// Press Escape once the tick counter reaches this value.
    pub exit_at: Option<u64>,
}

impl ScriptedPlatform {
    pub fn new() -> Self {
        Self {
            ticks: 0,
            keys: VecDeque::new(),
            channel: InputChannel::new(),
            sink: CaptureSink::new(),
            slept: Vec::new(),
            exit_at: None,
        }
    }

    pub fn key(&mut self, key: KeyPress) {
        self.keys.push_back(key);
    }

    pub fn type_text(&mut self, text: &str) {
        for b in text.bytes() {
            self.key(KeyPress::plain(b));
        }
    }

    /// Report a PS/2 delta that lands the pointer on `(x, y)` with
    /// `buttons` held.
    pub fn pointer_to(&mut self, x: i32, y: i32, buttons: u8) {
        let (cx, cy) = self.channel.pointer_position();
        self.channel
            .report_pointer_delta(InputDevice::Ps2Mouse, x - cx, y - cy, buttons, 0);
    }
}

impl Platform for ScriptedPlatform {
    fn ticks(&self) -> u64 {
        self.ticks
    }

    fn sleep_ms(&mut self, ms: u64) {
        self.slept.push(ms);
        self.ticks += ms;
    }

    fn read_key(&mut self) -> Option<KeyPress> {
        if let Some(key) = self.keys.pop_front() {
            return Some(key);
        }
        let due = self.exit_at.is_some_and(|t| self.ticks >= t);
        due.then_some(KeyPress::plain(KEY_ESCAPE))
    }

    fn channel(&self) -> &InputChannel {
        &self.channel
    }

    fn sink(&mut self) -> &mut dyn DisplaySink {
        &mut self.sink
    }
}

pub fn empty_config() -> DesktopConfig {
    DesktopConfig {
        autostart: Vec::new(),
        ..DesktopConfig::default()
    }
}

pub fn desktop() -> Desktop<RamFs> {
    Desktop::new(empty_config(), RamFs::seeded())
}

pub fn press(x: i32, y: i32) -> InputEvent {
    InputEvent::button(InputDevice::Ps2Mouse, true, 0, x as i16, y as i16, 0x01)
}

pub fn release(x: i32, y: i32) -> InputEvent {
    InputEvent::button(InputDevice::Ps2Mouse, false, 0, x as i16, y as i16, 0x00)
}

pub fn drag_to(x: i32, y: i32) -> InputEvent {
    InputEvent::pointer_move(InputDevice::Ps2Mouse, x as i16, y as i16, 0, 0, 0x01)
}

pub fn hover(x: i32, y: i32) -> InputEvent {
    InputEvent::pointer_move(InputDevice::Ps2Mouse, x as i16, y as i16, 0, 0, 0x00)
}

pub fn wheel(x: i32, y: i32, ticks: i8) -> InputEvent {
    InputEvent::scroll(InputDevice::Ps2Mouse, ticks, x as i16, y as i16, 0)
}

/// One app driven directly, without a window manager.
pub struct AppHarness {
    pub cells: Vec<Cell>,
    pub frame: Rect,
    pub fs: RamFs,
    pub launches: Vec<LaunchRequest>,
    pub ticks: u64,
    pub focused: bool,
    pub pointer: (i32, i32),
}

impl AppHarness {
    pub fn new(frame: Rect) -> Self {
        Self {
            cells: vec![Cell::BLANK; frame.area()],
            frame,
            fs: RamFs::seeded(),
            launches: Vec::new(),
            ticks: 0,
            focused: true,
            pointer: (0, 0),
        }
    }

    fn run<R>(&mut self, f: impl FnOnce(&mut Canvas<'_>, &mut AppContext<'_>) -> R) -> R {
        let view = CellView::new(&mut self.cells, self.frame.width, self.frame.height)
            .expect("harness buffer matches frame");
        let mut canvas = Canvas::new(view, self.frame);
        let mut ctx = AppContext::new(
            self.focused,
            self.pointer,
            self.ticks,
            &mut self.fs,
            &mut self.launches,
        );
        f(&mut canvas, &mut ctx)
    }

    pub fn tick(&mut self, app: &mut dyn App) {
        self.run(|canvas, ctx| app.on_tick(canvas, ctx));
    }

    pub fn key(&mut self, app: &mut dyn App, key: KeyPress) {
        self.run(|canvas, ctx| app.on_key(canvas, ctx, key));
    }

    pub fn keys(&mut self, app: &mut dyn App, text: &str) {
        for b in text.bytes() {
            self.key(app, KeyPress::plain(b));
        }
    }

    pub fn pointer(&mut self, app: &mut dyn App, event: InputEvent) {
        self.run(|canvas, ctx| app.on_pointer(canvas, ctx, &event));
    }

    pub fn row(&self, y: i32) -> String {
        let w = self.frame.width as usize;
        let start = y as usize * w;
        self.cells[start..start + w].iter().map(|c| c.ch as char).collect()
    }

    pub fn cell(&self, x: i32, y: i32) -> Cell {
        self.cells[(y * self.frame.width + x) as usize]
    }
}
