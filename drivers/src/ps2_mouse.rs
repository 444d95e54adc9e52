//! PS/2 auxiliary-port packet decoder.
//!
//! Bytes arrive one per IRQ12 and are assembled into 3-byte packets. Each
//! complete packet becomes one relative report on the input channel, one
//! cell per count.

use cellos_abi::InputDevice;
use cellos_lib::IrqMutex;

use crate::input_event::InputChannel;

const PACKET_SYNC: u8 = 0x08;
const PACKET_X_SIGN: u8 = 0x10;
const PACKET_Y_SIGN: u8 = 0x20;
const PACKET_OVERFLOW: u8 = 0xC0;

#[derive(Debug, Clone, Copy)]
struct PacketState {
    packet: [u8; 3],
    index: u8,
}

pub struct Ps2Mouse {
    state: IrqMutex<PacketState>,
}

impl Ps2Mouse {
    pub const fn new() -> Self {
        Self {
            state: IrqMutex::new(PacketState {
                packet: [0; 3],
                index: 0,
            }),
        }
    }

    /// Feed one byte from the data port.
    ///
    /// A first byte without the sync bit is discarded so the decoder
    /// re-aligns after a lost byte. Overflowed packets are dropped whole.
    /// Returns the number of events queued.
    pub fn handle_byte(&self, channel: &InputChannel, data: u8) -> usize {
        let packet = {
            let mut state = self.state.lock();
            if state.index == 0 && data & PACKET_SYNC == 0 {
                return 0;
            }
            let index = state.index as usize;
            state.packet[index] = data;
            state.index = (state.index + 1) % 3;
            if state.index != 0 {
                return 0;
            }
            state.packet
        };

        let flags = packet[0];
        if flags & PACKET_OVERFLOW != 0 {
            return 0;
        }

        let mut dx = packet[1] as i32;
        if flags & PACKET_X_SIGN != 0 {
            dx -= 256;
        }
        let mut dy = packet[2] as i32;
        if flags & PACKET_Y_SIGN != 0 {
            dy -= 256;
        }

        channel.report_pointer_delta(InputDevice::Ps2Mouse, dx, -dy, flags & 0x07, 0)
    }

    pub fn reset(&self) {
        self.state.lock().index = 0;
    }
}

impl Default for Ps2Mouse {
    fn default() -> Self {
        Self::new()
    }
}

static PS2_MOUSE: Ps2Mouse = Ps2Mouse::new();

/// IRQ12 entry point.
pub fn handle_irq(data: u8) {
    PS2_MOUSE.handle_byte(crate::input_event::channel(), data);
}
