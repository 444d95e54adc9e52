//! Monotonic tick counter driven by the timer interrupt (1 tick = 1 ms).

use core::sync::atomic::{AtomicU64, Ordering};

pub const TICKS_PER_SECOND: u64 = 1000;

static TICKS: AtomicU64 = AtomicU64::new(0);

/// Timer IRQ entry point.
#[inline]
pub fn on_tick() {
    TICKS.fetch_add(1, Ordering::Relaxed);
}

#[inline]
pub fn ticks() -> u64 {
    TICKS.load(Ordering::Relaxed)
}

/// Wait until `ms` ticks have elapsed, halting between interrupts.
#[cfg(all(target_arch = "x86_64", target_os = "none"))]
pub fn sleep_ms(ms: u64) {
    let start = ticks();
    while ticks().wrapping_sub(start) < ms {
        x86_64::instructions::hlt();
    }
}
