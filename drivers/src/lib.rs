#![cfg_attr(not(test), no_std)]

pub mod hotplug;
pub mod input_event;
pub mod keyboard;
pub mod ps2_mouse;
pub mod timer;

pub use input_event::InputChannel;
pub use keyboard::KeyStream;

#[cfg(test)]
mod input_event_tests;
