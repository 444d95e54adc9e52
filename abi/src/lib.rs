//! cellos shared ABI types
//!
//! Value types exchanged between interrupt-time producers, the window
//! manager and hosted applications. Everything that crosses the input
//! channel is `#[repr(C)]` so that adapters written against the raw layout
//! keep working.

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod fs;
pub mod input;
pub mod keys;
pub mod window;

pub use cell::{Cell, VgaColor, attr};
pub use fs::{FS_NAME_MAX, FsEntry, FsEntryKind, FsError, FsResult};
pub use input::{InputDevice, InputEvent, InputEventType, PointerButtons};
pub use keys::{KeyModifiers, KeyPress};
pub use window::{Rect, SCREEN_CELLS, SCREEN_HEIGHT, SCREEN_WIDTH, TASKBAR_ROW, TITLE_MAX};

#[cfg(test)]
mod abi_tests;
