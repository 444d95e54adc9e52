//! cubeDip: drop blocks onto a 10-wide stack until a column reaches the top.

use cellos_abi::KeyPress;
use cellos_lib::NumBuf;

use crate::appkit::{App, AppContext, AppKind, Canvas};
use crate::theme::{BLOCK_ATTR, TEXT_ON_BLACK};

pub const COLUMNS: usize = 10;
pub const ROWS: usize = 16;
pub const FALL_TICKS: u64 = 5;
const LAND_SCORE: u32 = 5;
const START_COLUMN: usize = 5;

pub struct CubeDip {
    stack: [[bool; COLUMNS]; ROWS],
    block: (usize, usize),
    alive: bool,
    score: u32,
    last_fall: u64,
}

impl CubeDip {
    pub fn new(ticks: u64) -> Self {
        Self {
            stack: [[false; COLUMNS]; ROWS],
            block: (START_COLUMN, 0),
            alive: true,
            score: 0,
            last_fall: ticks,
        }
    }

    /// Falling block as `(column, row)`.
    pub fn block(&self) -> (usize, usize) {
        self.block
    }

    pub fn is_filled(&self, column: usize, row: usize) -> bool {
        self.stack
            .get(row)
            .and_then(|r| r.get(column))
            .copied()
            .unwrap_or(false)
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Drop the block one row, or land it and spawn the next one.
    pub fn fall(&mut self, ticks: u64) {
        if !self.alive || ticks.wrapping_sub(self.last_fall) < FALL_TICKS {
            return;
        }
        self.last_fall = ticks;

        let (col, row) = self.block;
        if row + 1 >= ROWS || self.stack[row + 1][col] {
            self.stack[row][col] = true;
            self.score += LAND_SCORE;
            self.block = ((ticks % COLUMNS as u64) as usize, 0);
            if self.stack[0][self.block.0] {
                self.alive = false;
            }
        } else {
            self.block.1 += 1;
        }
    }

    fn restart(&mut self) {
        *self = Self {
            last_fall: self.last_fall,
            ..Self::new(0)
        };
    }
}

impl App for CubeDip {
    fn kind(&self) -> AppKind {
        AppKind::CubeDip
    }

    fn on_tick(&mut self, canvas: &mut Canvas<'_>, ctx: &mut AppContext<'_>) {
        canvas.clear(TEXT_ON_BLACK);
        if !self.alive {
            canvas.draw_text(1, 1, b"cubeDip game over. Press R.", TEXT_ON_BLACK);
            return;
        }
        self.fall(ctx.ticks);

        let mut num = NumBuf::new();
        canvas.draw_text(0, 0, b"cubeDip", TEXT_ON_BLACK);
        canvas.draw_text(8, 0, num.u64(self.score as u64), TEXT_ON_BLACK);
        for (row, cells) in self.stack.iter().enumerate() {
            for (col, &filled) in cells.iter().enumerate() {
                if filled || (col, row) == self.block {
                    canvas.put_char(col as i32 + 1, row as i32 + 1, b'#', BLOCK_ATTR);
                }
            }
        }
    }

    fn on_key(&mut self, _canvas: &mut Canvas<'_>, _ctx: &mut AppContext<'_>, key: KeyPress) {
        let key = key.key.to_ascii_lowercase();
        if !self.alive {
            if key == b'r' {
                self.restart();
            }
            return;
        }
        let (col, row) = self.block;
        match key {
            b'a' if col > 0 && !self.stack[row][col - 1] => self.block.0 -= 1,
            b'd' if col + 1 < COLUMNS && !self.stack[row][col + 1] => self.block.0 += 1,
            // Make the next tick drop the block.
            b's' => self.last_fall = 0,
            _ => {}
        }
    }
}
