//! Hot-plug (USB HID boot protocol) pointer health.
//!
//! The bus driver registers the device when enumeration finds a boot
//! pointer and forwards each interrupt-transfer report here. A controller
//! fault soft-locks the device: its reports are refused until `reset`, and
//! the input channel falls back to the legacy PS/2 port.

use cellos_abi::InputDevice;
use cellos_lib::{IrqMutex, klog_info, klog_warn};

use crate::input_event::InputChannel;

/// Reports longer than a plain boot mouse packet come from touchpads.
const BOOT_MOUSE_REPORT_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HotplugState {
    present: bool,
    touchpad: bool,
    faulted: bool,
}

pub struct HotplugPointer {
    state: IrqMutex<HotplugState>,
}

impl HotplugPointer {
    pub const fn new() -> Self {
        Self {
            state: IrqMutex::new(HotplugState {
                present: false,
                touchpad: false,
                faulted: false,
            }),
        }
    }

    /// Record whether enumeration found a boot pointer.
    pub fn register(&self, present: bool, touchpad: bool) {
        let mut state = self.state.lock();
        state.present = present;
        state.touchpad = present && touchpad;
        if present {
            klog_info!(
                "hotplug: boot {} registered",
                if touchpad { "touchpad" } else { "mouse" }
            );
        }
    }

    pub fn is_present(&self) -> bool {
        self.state.lock().present
    }

    pub fn is_faulted(&self) -> bool {
        self.state.lock().faulted
    }

    /// Soft-lock after a controller fault and hand the pointer back to the
    /// legacy port. Repeated faults are quiet.
    pub fn report_fault(&self, channel: &InputChannel) {
        let first = {
            let mut state = self.state.lock();
            let first = !state.faulted;
            state.faulted = true;
            state.present = false;
            state.touchpad = false;
            first
        };
        channel.set_hotplug_pointer_active(false);
        if first {
            klog_warn!("hotplug: pointer faulted, falling back to PS/2");
        }
    }

    /// Clear the fault latch, e.g. after the controller was reset.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.faulted = false;
        state.present = false;
        state.touchpad = false;
    }

    /// Decode a boot-protocol report: buttons, dx, dy, optional wheel.
    /// Returns the number of events queued on `channel`.
    pub fn handle_boot_report(&self, channel: &InputChannel, report: &[u8]) -> usize {
        let device = {
            let mut state = self.state.lock();
            if report.len() < 3 || !state.present || state.faulted {
                return 0;
            }
            if report.len() > BOOT_MOUSE_REPORT_LEN {
                state.touchpad = true;
            }
            if state.touchpad {
                InputDevice::UsbTouchpad
            } else {
                InputDevice::UsbMouse
            }
        };

        let buttons = report[0] & 0x07;
        let dx = report[1] as i8 as i32;
        let dy = -(report[2] as i8 as i32);
        let wheel = report.get(3).map_or(0, |&w| w as i8);

        channel.report_pointer_delta(device, dx, dy, buttons, wheel)
    }
}

impl Default for HotplugPointer {
    fn default() -> Self {
        Self::new()
    }
}

static HOTPLUG_POINTER: HotplugPointer = HotplugPointer::new();

pub fn pointer() -> &'static HotplugPointer {
    &HOTPLUG_POINTER
}
