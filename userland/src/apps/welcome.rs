use crate::appkit::{App, AppContext, AppKind, Canvas};
use crate::theme;

const LINES: [(i32, &[u8]); 5] = [
    (1, b"cellos Display Manager"),
    (3, b"Start menu launches apps and games."),
    (4, b"M/R toggles maximize, X closes."),
    (5, b"Shell and editor use the real FS."),
    (7, b"ESC exits windowed mode."),
];

pub struct Welcome;

impl App for Welcome {
    fn kind(&self) -> AppKind {
        AppKind::Welcome
    }

    fn on_tick(&mut self, canvas: &mut Canvas<'_>, _ctx: &mut AppContext<'_>) {
        canvas.clear(theme::TEXT_ON_BLUE);
        for (row, text) in LINES {
            canvas.draw_text(1, row, text, theme::TEXT_ON_BLUE);
        }
    }
}
