//! Pointer events as queued by the input channel.

use bitflags::bitflags;

/// Kind of pointer event.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputEventType {
    /// Absolute position changed
    #[default]
    PointerMove = 0,
    /// A button went from released to pressed
    ButtonDown = 1,
    /// A button went from pressed to released
    ButtonUp = 2,
    /// Wheel moved by `wheel` ticks
    Scroll = 3,
}

impl InputEventType {
    #[inline]
    pub fn from_u8(val: u8) -> Option<Self> {
        match val {
            0 => Some(Self::PointerMove),
            1 => Some(Self::ButtonDown),
            2 => Some(Self::ButtonUp),
            3 => Some(Self::Scroll),
            _ => None,
        }
    }

    #[inline]
    pub fn is_button_event(self) -> bool {
        matches!(self, Self::ButtonDown | Self::ButtonUp)
    }
}

/// Which pointing device produced a report.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputDevice {
    #[default]
    None = 0,
    /// Legacy PS/2 auxiliary port
    Ps2Mouse = 1,
    /// Hot-plugged USB HID boot mouse
    UsbMouse = 2,
    /// Hot-plugged USB HID touchpad
    UsbTouchpad = 3,
}

impl InputDevice {
    /// True for devices that arrive through the hot-plug bus and latch out
    /// the legacy port once they report.
    #[inline]
    pub const fn is_hotplug(self) -> bool {
        matches!(self, Self::UsbMouse | Self::UsbTouchpad)
    }
}

bitflags! {
    /// Pointer button mask. Only the low three bits are meaningful.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PointerButtons: u8 {
        const LEFT = 0x01;
        const RIGHT = 0x02;
        const MIDDLE = 0x04;
    }
}

/// One pointer event.
///
/// `x`/`y` are absolute, already clamped to the channel bounds. `button` is
/// the bit index for button events and zero otherwise; `buttons` is always
/// the full mask after the report that produced the event.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputEvent {
    pub event_type: InputEventType,
    pub device: InputDevice,
    pub x: i16,
    pub y: i16,
    pub dx: i16,
    pub dy: i16,
    pub wheel: i8,
    pub button: u8,
    pub buttons: u8,
}

impl InputEvent {
    pub fn pointer_move(device: InputDevice, x: i16, y: i16, dx: i16, dy: i16, buttons: u8) -> Self {
        Self {
            event_type: InputEventType::PointerMove,
            device,
            x,
            y,
            dx,
            dy,
            wheel: 0,
            button: 0,
            buttons,
        }
    }

    pub fn button(device: InputDevice, pressed: bool, bit: u8, x: i16, y: i16, buttons: u8) -> Self {
        Self {
            event_type: if pressed {
                InputEventType::ButtonDown
            } else {
                InputEventType::ButtonUp
            },
            device,
            x,
            y,
            dx: 0,
            dy: 0,
            wheel: 0,
            button: bit,
            buttons,
        }
    }

    pub fn scroll(device: InputDevice, wheel: i8, x: i16, y: i16, buttons: u8) -> Self {
        Self {
            event_type: InputEventType::Scroll,
            device,
            x,
            y,
            dx: 0,
            dy: 0,
            wheel,
            button: 0,
            buttons,
        }
    }

    #[inline]
    pub fn buttons(&self) -> PointerButtons {
        PointerButtons::from_bits_truncate(self.buttons)
    }

    /// True when this is a press or release of the primary (bit 0) button.
    #[inline]
    pub fn is_primary(&self) -> bool {
        self.event_type.is_button_event() && self.button == 0
    }
}
