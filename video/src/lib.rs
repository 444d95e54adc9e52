#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod framebuffer;
pub mod window_registry;

pub use framebuffer::{CaptureSink, DisplaySink, ScreenBuffer};
pub use window_registry::{
    DEFAULT_CELL_BUDGET, MAX_WINDOWS, Window, WindowFlags, WindowHandle, WindowRegistry,
};
