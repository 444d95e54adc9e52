//! Input event channel
//!
//! Pointer reports arrive from interrupt handlers as relative deltas. The
//! channel folds them into an absolute, clamped [`PointerState`] and queues
//! the resulting [`InputEvent`]s for the main loop.
//!
//! Producers are serialized by an interrupt-masking lock around the pointer
//! state; the queue itself is a lock-free SPSC ring, so the consumer never
//! blocks an interrupt and an interrupt never waits for the consumer.
//!
//! Arbitration: once a hot-plug pointer reports, the legacy PS/2 device is
//! latched out until the hot-plug side is explicitly deactivated or faults.

use core::sync::atomic::{AtomicBool, Ordering};

use cellos_abi::{InputDevice, InputEvent, PointerButtons, SCREEN_HEIGHT, SCREEN_WIDTH};
use cellos_lib::{IrqMutex, SpscRing, klog_debug};

pub const INPUT_QUEUE_CAPACITY: usize = 128;

const INITIAL_X: i32 = SCREEN_WIDTH / 2;
const INITIAL_Y: i32 = SCREEN_HEIGHT / 2;

/// Pointer state shared between producers and readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerState {
    pub x: i32,
    pub y: i32,
    pub buttons: u8,
    pub max_width: i32,
    pub max_height: i32,
    pub active: InputDevice,
    /// Set once a hot-plug device has reported; locks the legacy port out.
    pub hotplug_latched: bool,
}

impl PointerState {
    pub const fn new() -> Self {
        Self {
            x: INITIAL_X,
            y: INITIAL_Y,
            buttons: 0,
            max_width: SCREEN_WIDTH,
            max_height: SCREEN_HEIGHT,
            active: InputDevice::Ps2Mouse,
            hotplug_latched: false,
        }
    }

    fn allows(&self, device: InputDevice) -> bool {
        !(device == InputDevice::Ps2Mouse && self.hotplug_latched)
    }

    fn clamp(&mut self) {
        self.x = self.x.clamp(0, self.max_width - 1);
        self.y = self.y.clamp(0, self.max_height - 1);
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new()
    }
}

pub struct InputChannel {
    pointer: IrqMutex<PointerState>,
    queue: SpscRing<InputEvent, INPUT_QUEUE_CAPACITY>,
    consumer_busy: AtomicBool,
}

impl InputChannel {
    pub const fn new() -> Self {
        Self {
            pointer: IrqMutex::new(PointerState::new()),
            queue: SpscRing::new(),
            consumer_busy: AtomicBool::new(false),
        }
    }

    /// Restore the initial pointer state and discard queued events.
    pub fn reset(&self) {
        let mut state = self.pointer.lock();
        *state = PointerState::new();
        while self.poll().is_some() {}
    }

    /// Queue a pre-built event. Returns false and drops it when full.
    pub fn push(&self, event: InputEvent) -> bool {
        let _producer = self.pointer.lock();
        self.push_locked(event)
    }

    // Caller holds `self.pointer`, which makes it the only producer.
    fn push_locked(&self, event: InputEvent) -> bool {
        // SAFETY: every producer path goes through `self.pointer`.
        let queued = unsafe { self.queue.push(event) };
        if !queued {
            klog_debug!("input: queue full, dropping {:?}", event.event_type);
        }
        queued
    }

    /// Remove the oldest event.
    ///
    /// Returns `None` when the queue is empty, or when another consumer is
    /// already draining; the main loop is the only intended consumer.
    pub fn poll(&self) -> Option<InputEvent> {
        if self
            .consumer_busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return None;
        }
        // SAFETY: `consumer_busy` admits a single consumer at a time.
        let event = unsafe { self.queue.pop() };
        self.consumer_busy.store(false, Ordering::Release);
        event
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Set pointer bounds; non-positive dimensions are ignored. The current
    /// position is re-clamped.
    pub fn set_bounds(&self, width: i32, height: i32) {
        let mut state = self.pointer.lock();
        if width > 0 {
            state.max_width = width;
        }
        if height > 0 {
            state.max_height = height;
        }
        state.clamp();
    }

    /// Explicit latch control for the hot-plug bus. Deactivating lifts the
    /// legacy lockout and makes the legacy port the active pointer again.
    pub fn set_hotplug_pointer_active(&self, active: bool) {
        let mut state = self.pointer.lock();
        state.hotplug_latched = active;
        state.active = if active {
            InputDevice::UsbMouse
        } else {
            InputDevice::Ps2Mouse
        };
    }

    pub fn pointer_state(&self) -> PointerState {
        *self.pointer.lock()
    }

    pub fn pointer_position(&self) -> (i32, i32) {
        let state = self.pointer.lock();
        (state.x, state.y)
    }

    pub fn pointer_buttons(&self) -> PointerButtons {
        PointerButtons::from_bits_truncate(self.pointer.lock().buttons)
    }

    pub fn active_pointer(&self) -> InputDevice {
        self.pointer.lock().active
    }

    /// Fold one relative report into the pointer state and queue its events.
    ///
    /// Button transitions come first in ascending bit order, then a move if
    /// the clamped position changed, then a scroll if `wheel` is nonzero.
    /// Reports from a latched-out device are dropped without a trace.
    /// Returns the number of events queued.
    pub fn report_pointer_delta(
        &self,
        device: InputDevice,
        dx: i32,
        dy: i32,
        buttons: u8,
        wheel: i8,
    ) -> usize {
        let mut state = self.pointer.lock();
        if !state.allows(device) {
            return 0;
        }

        if device.is_hotplug() {
            state.hotplug_latched = true;
        }
        state.active = device;

        let old_buttons = state.buttons;
        let (old_x, old_y) = (state.x, state.y);
        state.x = state.x.saturating_add(dx);
        state.y = state.y.saturating_add(dy);
        state.clamp();
        state.buttons = buttons & PointerButtons::all().bits();

        let (x, y, mask) = (state.x as i16, state.y as i16, state.buttons);
        let mut queued = 0;

        let changed = old_buttons ^ mask;
        for bit in 0..3u8 {
            let bit_mask = 1 << bit;
            if changed & bit_mask == 0 {
                continue;
            }
            let pressed = mask & bit_mask != 0;
            let ev = InputEvent::button(device, pressed, bit, x, y, mask);
            queued += usize::from(self.push_locked(ev));
        }

        if state.x != old_x || state.y != old_y {
            let ev = InputEvent::pointer_move(device, x, y, clamp_i16(dx), clamp_i16(dy), mask);
            queued += usize::from(self.push_locked(ev));
        }

        if wheel != 0 {
            let ev = InputEvent::scroll(device, wheel, x, y, mask);
            queued += usize::from(self.push_locked(ev));
        }

        queued
    }
}

impl Default for InputChannel {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_i16(v: i32) -> i16 {
    v.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

static CHANNEL: InputChannel = InputChannel::new();

/// The system-wide channel fed by the interrupt handlers.
pub fn channel() -> &'static InputChannel {
    &CHANNEL
}
