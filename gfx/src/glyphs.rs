//! CP437 code points used by the desktop.

pub const LIGHT_SHADE: u8 = 0xB0;
pub const FULL_BLOCK: u8 = 0xDB;

pub const DOUBLE_HORIZONTAL: u8 = 0xCD;
pub const DOUBLE_VERTICAL: u8 = 0xBA;
pub const DOUBLE_TOP_LEFT: u8 = 0xC9;
pub const DOUBLE_TOP_RIGHT: u8 = 0xBB;
pub const DOUBLE_BOTTOM_LEFT: u8 = 0xC8;
pub const DOUBLE_BOTTOM_RIGHT: u8 = 0xBC;

/// Box characters for one frame style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGlyphs {
    pub horizontal: u8,
    pub vertical: u8,
    pub top_left: u8,
    pub top_right: u8,
    pub bottom_left: u8,
    pub bottom_right: u8,
}

impl FrameGlyphs {
    pub const DOUBLE: Self = Self {
        horizontal: DOUBLE_HORIZONTAL,
        vertical: DOUBLE_VERTICAL,
        top_left: DOUBLE_TOP_LEFT,
        top_right: DOUBLE_TOP_RIGHT,
        bottom_left: DOUBLE_BOTTOM_LEFT,
        bottom_right: DOUBLE_BOTTOM_RIGHT,
    };

    /// Plain ASCII box, used by menus.
    pub const ASCII: Self = Self {
        horizontal: b'-',
        vertical: b'|',
        top_left: b'+',
        top_right: b'+',
        bottom_left: b'+',
        bottom_right: b'+',
    };
}
