//! cellos desktop: the window manager, compositor and the apps it hosts.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod appkit;
pub mod apps;
pub mod compositor;
pub mod config;
pub mod theme;

pub use appkit::{App, AppContext, AppKind, Canvas, LaunchRequest};
pub use compositor::{Desktop, Platform};
pub use config::DesktopConfig;

#[cfg(test)]
mod test_support;
