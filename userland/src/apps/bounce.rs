use cellos_abi::KeyPress;
use cellos_gfx::CellTarget;

use crate::appkit::{App, AppContext, AppKind, Canvas};
use crate::theme::{BALL_ATTR, TEXT_ON_BLACK};

/// A ball bouncing off the window edges. WASD picks the direction.
pub struct Bounce {
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
}

impl Bounce {
    pub fn new() -> Self {
        Self {
            x: 5,
            y: 3,
            dx: 1,
            dy: 1,
        }
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn direction(&self) -> (i32, i32) {
        (self.dx, self.dy)
    }

    fn step(&mut self, width: i32, height: i32) {
        self.x += self.dx;
        self.y += self.dy;
        if self.x < 1 || self.x >= width - 1 {
            self.dx = -self.dx;
        }
        if self.y < 1 || self.y >= height - 1 {
            self.dy = -self.dy;
        }
        self.x = self.x.min(width - 2).max(1);
        self.y = self.y.min(height - 2).max(1);
    }
}

impl Default for Bounce {
    fn default() -> Self {
        Self::new()
    }
}

impl App for Bounce {
    fn kind(&self) -> AppKind {
        AppKind::Bounce
    }

    fn on_tick(&mut self, canvas: &mut Canvas<'_>, _ctx: &mut AppContext<'_>) {
        self.step(canvas.width(), canvas.height());
        canvas.clear(TEXT_ON_BLACK);
        canvas.draw_text(1, 0, b"Mini game (WASD changes direction)", TEXT_ON_BLACK);
        canvas.put_char(self.x, self.y, b'O', BALL_ATTR);
    }

    fn on_key(&mut self, _canvas: &mut Canvas<'_>, _ctx: &mut AppContext<'_>, key: KeyPress) {
        match key.key.to_ascii_lowercase() {
            b'w' => self.dy = -1,
            b's' => self.dy = 1,
            b'a' => self.dx = -1,
            b'd' => self.dx = 1,
            _ => {}
        }
    }
}
