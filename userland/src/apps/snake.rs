use cellos_abi::KeyPress;
use cellos_gfx::CellTarget;
use cellos_lib::NumBuf;

use crate::appkit::{App, AppContext, AppKind, Canvas};
use crate::theme::{FOOD_ATTR, SNAKE_ATTR, TEXT_ON_BLACK};

pub const MAX_SEGMENTS: usize = 64;
pub const STEP_TICKS: u64 = 10;
const START_LENGTH: usize = 4;
const FOOD_SCORE: u32 = 10;
const FOOD_TRIES: u64 = 100;

/// Playing field for a window of the given content size. The field sits
/// one cell in from the left and below the score row.
pub fn board_size(width: i32, height: i32) -> (i32, i32) {
    ((width - 2).max(8), (height - 2).max(6))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }
}

pub struct Snake {
    body: [(i32, i32); MAX_SEGMENTS],
    length: usize,
    dir: Direction,
    food: (i32, i32),
    alive: bool,
    score: u32,
    last_step: u64,
    board: (i32, i32),
}

impl Snake {
    pub fn new(board: (i32, i32), ticks: u64) -> Self {
        let mut snake = Self {
            body: [(0, 0); MAX_SEGMENTS],
            length: 0,
            dir: Direction::Right,
            food: (0, 0),
            alive: true,
            score: 0,
            last_step: ticks,
            board,
        };
        snake.restart(ticks);
        snake
    }

    fn restart(&mut self, ticks: u64) {
        self.length = START_LENGTH;
        for (i, seg) in self.body[..START_LENGTH].iter_mut().enumerate() {
            *seg = (3 - i as i32, 3);
        }
        self.dir = Direction::Right;
        self.alive = true;
        self.score = 0;
        self.last_step = ticks;
        self.place_food(ticks);
    }

    pub fn segments(&self) -> &[(i32, i32)] {
        &self.body[..self.length]
    }

    pub fn head(&self) -> (i32, i32) {
        self.body[0]
    }

    pub fn food(&self) -> (i32, i32) {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.dir
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    fn occupies(&self, cell: (i32, i32)) -> bool {
        self.segments().contains(&cell)
    }

    /// Pick a free cell from the tick counter, falling back to the corner.
    fn place_food(&mut self, ticks: u64) {
        let (w, h) = (self.board.0 as u64, self.board.1 as u64);
        for attempt in (0..FOOD_TRIES).rev() {
            let x = (ticks.wrapping_add(attempt) % w) as i32;
            let y = (ticks.wrapping_mul(3).wrapping_add(attempt) % h) as i32;
            if !self.occupies((x, y)) {
                self.food = (x, y);
                return;
            }
        }
        self.food = (0, 0);
    }

    /// Advance one cell if a step is due.
    pub fn advance(&mut self, ticks: u64) {
        if !self.alive || ticks.wrapping_sub(self.last_step) < STEP_TICKS {
            return;
        }
        self.last_step = ticks;

        let (dx, dy) = self.dir.delta();
        let next = (self.body[0].0 + dx, self.body[0].1 + dy);
        let (w, h) = self.board;
        if next.0 < 0 || next.0 >= w || next.1 < 0 || next.1 >= h || self.occupies(next) {
            self.alive = false;
            return;
        }

        let keep = self.length.min(MAX_SEGMENTS - 1);
        self.body.copy_within(0..keep, 1);
        self.body[0] = next;

        if next == self.food {
            if self.length < MAX_SEGMENTS - 1 {
                self.length += 1;
            }
            self.score += FOOD_SCORE;
            self.place_food(ticks);
        }
    }

    fn steer(&mut self, dir: Direction) {
        if self.dir != dir.opposite() {
            self.dir = dir;
        }
    }
}

impl App for Snake {
    fn kind(&self) -> AppKind {
        AppKind::Snake
    }

    fn on_tick(&mut self, canvas: &mut Canvas<'_>, ctx: &mut AppContext<'_>) {
        self.board = board_size(canvas.width(), canvas.height());
        canvas.clear(TEXT_ON_BLACK);
        if !self.alive {
            canvas.draw_text(1, 1, b"Snake game over. Press R.", TEXT_ON_BLACK);
            return;
        }
        self.advance(ctx.ticks);

        let mut num = NumBuf::new();
        canvas.draw_text(0, 0, b"snake", TEXT_ON_BLACK);
        canvas.draw_text(7, 0, num.u64(self.score as u64), TEXT_ON_BLACK);
        for (i, &(x, y)) in self.segments().iter().enumerate() {
            let glyph = if i == 0 { b'@' } else { b'o' };
            canvas.put_char(x + 1, y + 1, glyph, SNAKE_ATTR);
        }
        canvas.put_char(self.food.0 + 1, self.food.1 + 1, b'*', FOOD_ATTR);
    }

    fn on_key(&mut self, canvas: &mut Canvas<'_>, ctx: &mut AppContext<'_>, key: KeyPress) {
        let key = key.key.to_ascii_lowercase();
        if !self.alive {
            if key == b'r' {
                self.board = board_size(canvas.width(), canvas.height());
                self.restart(ctx.ticks);
            }
            return;
        }
        match key {
            b'w' => self.steer(Direction::Up),
            b'd' => self.steer(Direction::Right),
            b's' => self.steer(Direction::Down),
            b'a' => self.steer(Direction::Left),
            _ => {}
        }
    }
}
