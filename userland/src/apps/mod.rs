//! The apps the desktop can launch, and the table the start menu shows.

pub mod bounce;
pub mod cubedip;
pub mod file_manager;
pub mod notepad;
pub mod shell;
pub mod snake;
pub mod sysinfo;
pub mod welcome;

use alloc::boxed::Box;

use cellos_abi::Rect;
use cellos_fs::FileSystem;

use crate::appkit::{App, AppKind};

/// One start-menu entry: label, app, and the geometry a fresh window gets.
#[derive(Debug, Clone, Copy)]
pub struct LaunchEntry {
    pub label: &'static str,
    pub kind: AppKind,
    pub geometry: Rect,
}

/// Start menu order. The label doubles as the window title.
pub const LAUNCH_TABLE: [LaunchEntry; 8] = [
    LaunchEntry {
        label: "Welcome",
        kind: AppKind::Welcome,
        geometry: Rect::new(3, 3, 38, 10),
    },
    LaunchEntry {
        label: "System Monitor",
        kind: AppKind::System,
        geometry: Rect::new(44, 2, 33, 8),
    },
    LaunchEntry {
        label: "Bounce Demo",
        kind: AppKind::Bounce,
        geometry: Rect::new(24, 14, 30, 9),
    },
    LaunchEntry {
        label: "Shell",
        kind: AppKind::Shell,
        geometry: Rect::new(6, 5, 54, 13),
    },
    LaunchEntry {
        label: "Text Editor",
        kind: AppKind::Notepad,
        geometry: Rect::new(16, 4, 50, 15),
    },
    LaunchEntry {
        label: "snake",
        kind: AppKind::Snake,
        geometry: Rect::new(10, 6, 32, 14),
    },
    LaunchEntry {
        label: "cubeDip",
        kind: AppKind::CubeDip,
        geometry: Rect::new(45, 6, 24, 20),
    },
    LaunchEntry {
        label: "File Explorer",
        kind: AppKind::Explorer,
        geometry: Rect::new(42, 5, 34, 16),
    },
];

pub fn launch_entry(kind: AppKind) -> &'static LaunchEntry {
    match kind {
        AppKind::Welcome => &LAUNCH_TABLE[0],
        AppKind::System => &LAUNCH_TABLE[1],
        AppKind::Bounce => &LAUNCH_TABLE[2],
        AppKind::Shell => &LAUNCH_TABLE[3],
        AppKind::Notepad => &LAUNCH_TABLE[4],
        AppKind::Snake => &LAUNCH_TABLE[5],
        AppKind::CubeDip => &LAUNCH_TABLE[6],
        AppKind::Explorer => &LAUNCH_TABLE[7],
    }
}

/// Build the state for a new window of `kind`. `geometry` is the window's
/// content size; `arg` is the launch argument (a file name for the editor).
pub fn instantiate(
    kind: AppKind,
    arg: Option<&str>,
    geometry: Rect,
    fs: &mut dyn FileSystem,
    ticks: u64,
) -> Box<dyn App> {
    match kind {
        AppKind::Welcome => Box::new(welcome::Welcome),
        AppKind::System => Box::new(sysinfo::SystemMonitor::new()),
        AppKind::Bounce => Box::new(bounce::Bounce::new()),
        AppKind::Shell => Box::new(shell::Shell::new()),
        AppKind::Notepad => Box::new(notepad::Notepad::open(arg, fs)),
        AppKind::Snake => Box::new(snake::Snake::new(
            snake::board_size(geometry.width, geometry.height),
            ticks,
        )),
        AppKind::CubeDip => Box::new(cubedip::CubeDip::new(ticks)),
        AppKind::Explorer => Box::new(file_manager::FileExplorer::new()),
    }
}

#[cfg(test)]
mod apps_tests;
