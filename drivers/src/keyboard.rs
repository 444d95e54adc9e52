//! Keyboard key stream.
//!
//! The IRQ1 handler feeds raw set-1 scancodes to [`KeyStream::handle_scancode`],
//! which tracks modifiers and queues normalized [`KeyPress`]es. The main
//! loop drains them with [`KeyStream::read`].

use cellos_abi::keys::*;
use cellos_abi::{KeyModifiers, KeyPress};
use cellos_lib::{IrqMutex, RingBuffer};

pub const KEY_QUEUE_CAPACITY: usize = 128;

const SC_EXTENDED: u8 = 0xE0;
const SC_LSHIFT: u8 = 0x2A;
const SC_RSHIFT: u8 = 0x36;
const SC_CTRL: u8 = 0x1D;
const SC_ALT: u8 = 0x38;
const SC_BREAK: u8 = 0x80;

const SCANCODE_PLAIN: [u8; 0x3A] = *b"\0\x1b1234567890-=\0\tqwertyuiop[]\n\0asdfghjkl;'`\0\\zxcvbnm,./\0*\0 ";
const SCANCODE_SHIFTED: [u8; 0x3A] = *b"\0\x1b!@#$%^&*()_+\0\tQWERTYUIOP{}\n\0ASDFGHJKL:\"~\0|ZXCVBNM<>?\0*\0 ";

fn translate(make: u8, extended: bool, shift: bool) -> Option<u8> {
    let key = match make {
        0x48 => KEY_UP,
        0x50 => KEY_DOWN,
        0x4B => KEY_LEFT,
        0x4D => KEY_RIGHT,
        0x0E => KEY_BACKSPACE,
        0x3B..=0x44 => KEY_F1 + (make - 0x3B),
        0x57 => KEY_F11,
        0x58 => KEY_F12,
        _ if extended => return None,
        _ => {
            let table = if shift { &SCANCODE_SHIFTED } else { &SCANCODE_PLAIN };
            *table.get(make as usize)?
        }
    };
    (key != 0).then_some(key)
}

struct KeyboardState {
    modifiers: KeyModifiers,
    extended: bool,
    queue: RingBuffer<KeyPress, KEY_QUEUE_CAPACITY>,
}

pub struct KeyStream {
    state: IrqMutex<KeyboardState>,
}

impl KeyStream {
    pub const fn new() -> Self {
        Self {
            state: IrqMutex::new(KeyboardState {
                modifiers: KeyModifiers::empty(),
                extended: false,
                queue: RingBuffer::new_with(KeyPress::plain(0)),
            }),
        }
    }

    /// Process one scancode. Returns true if a key press was queued.
    pub fn handle_scancode(&self, scancode: u8) -> bool {
        let mut state = self.state.lock();
        if scancode == SC_EXTENDED {
            state.extended = true;
            return false;
        }
        let extended = core::mem::take(&mut state.extended);
        let released = scancode & SC_BREAK != 0;
        let make = scancode & !SC_BREAK;

        let modifier = match make {
            SC_LSHIFT | SC_RSHIFT if !extended => Some(KeyModifiers::SHIFT),
            SC_CTRL => Some(KeyModifiers::CTRL),
            SC_ALT => Some(KeyModifiers::ALT),
            _ => None,
        };
        if let Some(flag) = modifier {
            state.modifiers.set(flag, !released);
            return false;
        }
        if released {
            return false;
        }

        let shift = state.modifiers.contains(KeyModifiers::SHIFT);
        match translate(make, extended, shift) {
            Some(key) => {
                let press = KeyPress {
                    key,
                    modifiers: state.modifiers,
                };
                state.queue.try_push(press)
            }
            None => false,
        }
    }

    /// Queue an already-translated key, e.g. from a serial console.
    pub fn push(&self, press: KeyPress) -> bool {
        self.state.lock().queue.try_push(press)
    }

    pub fn read(&self) -> Option<KeyPress> {
        self.state.lock().queue.try_pop()
    }

    pub fn has_key(&self) -> bool {
        !self.state.lock().queue.is_empty()
    }

    pub fn modifiers(&self) -> KeyModifiers {
        self.state.lock().modifiers
    }

    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.modifiers = KeyModifiers::empty();
        state.extended = false;
        state.queue.reset();
    }
}

impl Default for KeyStream {
    fn default() -> Self {
        Self::new()
    }
}

static KEY_STREAM: KeyStream = KeyStream::new();

pub fn key_stream() -> &'static KeyStream {
    &KEY_STREAM
}

/// IRQ1 entry point.
pub fn handle_irq(scancode: u8) {
    KEY_STREAM.handle_scancode(scancode);
}
