use cellos_abi::VgaColor::*;
use cellos_abi::attr;

// Desktop
pub const DESKTOP_GLYPH: u8 = cellos_gfx::glyphs::LIGHT_SHADE;
pub const DESKTOP_ATTR: u8 = attr(Blue, Cyan);
pub const POINTER_GLYPH: u8 = cellos_gfx::glyphs::FULL_BLOCK;
pub const POINTER_ATTR: u8 = attr(White, Red);

// Window frames
pub const FRAME_FOCUSED_ATTR: u8 = attr(LightBrown, Blue);
pub const FRAME_ATTR: u8 = attr(LightGrey, Blue);
pub const GLYPH_CLOSE: u8 = b'X';
pub const GLYPH_MAXIMIZE: u8 = b'M';
pub const GLYPH_RESTORE: u8 = b'R';

// Taskbar and start menu
pub const TASKBAR_ATTR: u8 = attr(White, DarkGrey);
pub const TASKBAR_LABEL: &[u8] = b"cellos WM";
pub const MENU_ATTR: u8 = attr(White, Blue);
pub const MENU_SELECTED_ATTR: u8 = attr(Black, LightGrey);

// Apps
pub const TEXT_ON_BLUE: u8 = attr(White, Blue);
pub const TEXT_ON_BLACK: u8 = attr(White, Black);
pub const TEXT_ON_GREY: u8 = attr(Black, LightGrey);
pub const ACCENT_ON_BLUE: u8 = attr(LightCyan, Blue);
pub const DIR_ON_BLUE: u8 = attr(LightGreen, Blue);
pub const TERM_BG: u8 = attr(LightGrey, Black);
pub const TERM_OUTPUT: u8 = attr(LightGreen, Black);
pub const SCROLL_TRACK_ATTR: u8 = attr(DarkGrey, Black);
pub const SCROLL_THUMB_ATTR: u8 = attr(LightGrey, Blue);
pub const BALL_ATTR: u8 = attr(LightRed, Black);
pub const SNAKE_ATTR: u8 = attr(LightGreen, Black);
pub const FOOD_ATTR: u8 = attr(LightRed, Black);
pub const BLOCK_ATTR: u8 = attr(LightCyan, Black);
