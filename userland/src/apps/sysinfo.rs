//! System monitor: frame counter, pointer position and working directory.

use cellos_lib::NumBuf;

use crate::appkit::{App, AppContext, AppKind, Canvas};
use crate::theme::TEXT_ON_GREY;

#[derive(Default)]
pub struct SystemMonitor {
    frames: u64,
}

impl SystemMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks this window has seen since it was opened.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl App for SystemMonitor {
    fn kind(&self) -> AppKind {
        AppKind::System
    }

    fn on_tick(&mut self, canvas: &mut Canvas<'_>, ctx: &mut AppContext<'_>) {
        self.frames += 1;
        let mut num = NumBuf::new();

        canvas.clear(TEXT_ON_GREY);
        canvas.draw_text(1, 1, b"System", TEXT_ON_GREY);
        canvas.draw_text(1, 2, b"Ticks:", TEXT_ON_GREY);
        canvas.draw_text(8, 2, num.u64(ctx.ticks), TEXT_ON_GREY);
        canvas.draw_text(1, 3, b"Mouse:", TEXT_ON_GREY);
        canvas.draw_text(8, 3, num.i64(ctx.pointer.0 as i64), TEXT_ON_GREY);
        canvas.draw_text(12, 3, b",", TEXT_ON_GREY);
        canvas.draw_text(14, 3, num.i64(ctx.pointer.1 as i64), TEXT_ON_GREY);
        canvas.draw_text(1, 4, b"CWD:", TEXT_ON_GREY);
        let cwd = ctx.fs.cwd();
        canvas.draw_text(6, 4, cwd.as_bytes(), TEXT_ON_GREY);
    }
}
