//! Text-mode cells and VGA attribute bytes.

/// The sixteen VGA text-mode colours, in palette order.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VgaColor {
    Black = 0,
    Blue = 1,
    Green = 2,
    Cyan = 3,
    Red = 4,
    Magenta = 5,
    Brown = 6,
    LightGrey = 7,
    DarkGrey = 8,
    LightBlue = 9,
    LightGreen = 10,
    LightCyan = 11,
    LightRed = 12,
    LightMagenta = 13,
    LightBrown = 14,
    White = 15,
}

/// Pack a foreground/background pair into an attribute byte.
#[inline]
pub const fn attr(fg: VgaColor, bg: VgaColor) -> u8 {
    ((bg as u8) << 4) | (fg as u8 & 0x0F)
}

/// One character cell: a CP437 code point and its attribute.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: u8,
    pub attr: u8,
}

impl Cell {
    /// White-on-black space. Fresh and grown window buffers are filled with it.
    pub const BLANK: Cell = Cell {
        ch: b' ',
        attr: attr(VgaColor::White, VgaColor::Black),
    };

    #[inline]
    pub const fn new(ch: u8, attr: u8) -> Self {
        Self { ch, attr }
    }

    #[inline]
    pub const fn fg(self) -> u8 {
        self.attr & 0x0F
    }

    #[inline]
    pub const fn bg(self) -> u8 {
        self.attr >> 4
    }

    /// The 16-bit word a VGA text buffer stores for this cell.
    #[inline]
    pub const fn to_vga_word(self) -> u16 {
        ((self.attr as u16) << 8) | self.ch as u16
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::BLANK
    }
}
