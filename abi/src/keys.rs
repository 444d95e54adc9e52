//! Normalized key codes.
//!
//! Printable keys are their ASCII byte. Navigation and function keys use
//! reserved bytes above 0x7F so they never collide with text.

use bitflags::bitflags;

pub const KEY_TAB: u8 = b'\t';
pub const KEY_ENTER: u8 = b'\n';
pub const KEY_RETURN: u8 = b'\r';
pub const KEY_ESCAPE: u8 = 0x1B;
/// Backspace as sent by legacy adapters.
pub const KEY_BS_ASCII: u8 = 0x08;
pub const KEY_DEL_ASCII: u8 = 0x7F;

pub const KEY_UP: u8 = 0x80;
pub const KEY_DOWN: u8 = 0x81;
pub const KEY_LEFT: u8 = 0x82;
pub const KEY_RIGHT: u8 = 0x83;
pub const KEY_BACKSPACE: u8 = 0x88;
pub const KEY_F1: u8 = 0x8B;
pub const KEY_F2: u8 = 0x8C;
pub const KEY_F3: u8 = 0x8D;
pub const KEY_F4: u8 = 0x8E;
pub const KEY_F5: u8 = 0x8F;
pub const KEY_F6: u8 = 0x90;
pub const KEY_F7: u8 = 0x91;
pub const KEY_F8: u8 = 0x92;
pub const KEY_F9: u8 = 0x93;
pub const KEY_F10: u8 = 0x94;
pub const KEY_F11: u8 = 0x95;
pub const KEY_F12: u8 = 0x96;

bitflags! {
    /// Modifier keys held when a key was pressed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct KeyModifiers: u8 {
        const SHIFT = 0x01;
        const CTRL = 0x02;
        const ALT = 0x04;
    }
}

/// A single key press after scancode translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyPress {
    pub key: u8,
    pub modifiers: KeyModifiers,
}

impl KeyPress {
    #[inline]
    pub const fn plain(key: u8) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::empty(),
        }
    }

    #[inline]
    pub const fn ctrl(key: u8) -> Self {
        Self {
            key,
            modifiers: KeyModifiers::CTRL,
        }
    }

    /// True for Ctrl plus the given letter, in either case.
    #[inline]
    pub fn is_ctrl(&self, letter: u8) -> bool {
        self.modifiers.contains(KeyModifiers::CTRL) && self.key.eq_ignore_ascii_case(&letter)
    }

    #[inline]
    pub fn is_backspace(&self) -> bool {
        matches!(self.key, KEY_BACKSPACE | KEY_BS_ASCII | KEY_DEL_ASCII)
    }

    #[inline]
    pub fn is_enter(&self) -> bool {
        matches!(self.key, KEY_ENTER | KEY_RETURN)
    }

    /// Printable ASCII without Ctrl/Alt held.
    #[inline]
    pub fn printable(&self) -> Option<u8> {
        if self
            .modifiers
            .intersects(KeyModifiers::CTRL | KeyModifiers::ALT)
        {
            return None;
        }
        (0x20..0x7F).contains(&self.key).then_some(self.key)
    }
}
