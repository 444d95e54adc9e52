#![cfg_attr(not(test), no_std)]

pub mod cmdline;
pub mod cpu;
pub mod klog;
pub mod numfmt;
pub mod ring_buffer;
pub mod spinlock;
pub mod spsc_ring;
pub mod string;

pub use klog::{KlogLevel, klog_get_level, klog_init, klog_register_backend, klog_set_level};
pub use numfmt::NumBuf;
pub use ring_buffer::RingBuffer;
pub use spinlock::{IrqMutex, IrqMutexGuard};
pub use spsc_ring::SpscRing;

#[cfg(test)]
mod support_tests;
