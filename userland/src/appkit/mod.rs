//! Contract between the window manager and the apps it hosts.
//!
//! Every app is a boxed [`App`] bound to exactly one window. The manager
//! calls `on_tick` for every window on every frame, `on_key` for keys the
//! focused window receives, and `on_pointer` for pointer events while the
//! window is focused. Apps draw only through the [`Canvas`] they are handed,
//! which covers their own window and nothing else.
//!
//! ```rust,ignore
//! struct Clock;
//!
//! impl App for Clock {
//!     fn kind(&self) -> AppKind {
//!         AppKind::System
//!     }
//!
//!     fn on_tick(&mut self, canvas: &mut Canvas<'_>, ctx: &mut AppContext<'_>) {
//!         canvas.clear(theme::TEXT_ON_BLACK);
//!         canvas.draw_text(0, 0, NumBuf::new().u64(ctx.ticks), theme::TEXT_ON_BLACK);
//!     }
//! }
//! ```

pub mod canvas;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use cellos_abi::{InputEvent, KeyPress};
use cellos_fs::FileSystem;

pub use canvas::Canvas;

/// Which app a window hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppKind {
    Welcome,
    System,
    Bounce,
    Shell,
    Notepad,
    Snake,
    CubeDip,
    Explorer,
}

impl AppKind {
    /// Short names accepted on the command line (`wm.autostart=`).
    pub fn from_name(name: &str) -> Option<Self> {
        const NAMES: [(&str, AppKind); 11] = [
            ("welcome", AppKind::Welcome),
            ("system", AppKind::System),
            ("sysinfo", AppKind::System),
            ("bounce", AppKind::Bounce),
            ("shell", AppKind::Shell),
            ("notepad", AppKind::Notepad),
            ("editor", AppKind::Notepad),
            ("snake", AppKind::Snake),
            ("cubedip", AppKind::CubeDip),
            ("explorer", AppKind::Explorer),
            ("files", AppKind::Explorer),
        ];
        NAMES
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|&(_, kind)| kind)
    }
}

/// An app asking the manager to open another app once the current
/// callback returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub kind: AppKind,
    pub arg: Option<String>,
}

/// What an app may see and ask for during one callback.
pub struct AppContext<'a> {
    /// True when the window being called holds keyboard focus.
    pub focused: bool,
    /// Pointer position in screen cells.
    pub pointer: (i32, i32),
    /// Timer ticks at the start of this frame.
    pub ticks: u64,
    pub fs: &'a mut dyn FileSystem,
    launches: &'a mut Vec<LaunchRequest>,
}

impl<'a> AppContext<'a> {
    pub fn new(
        focused: bool,
        pointer: (i32, i32),
        ticks: u64,
        fs: &'a mut dyn FileSystem,
        launches: &'a mut Vec<LaunchRequest>,
    ) -> Self {
        Self {
            focused,
            pointer,
            ticks,
            fs,
            launches,
        }
    }

    /// Queue a launch. The new window is raised and focused after the
    /// callback returns.
    pub fn launch(&mut self, kind: AppKind, arg: Option<&str>) {
        self.launches.push(LaunchRequest {
            kind,
            arg: arg.map(ToString::to_string),
        });
    }
}

/// A hosted application. Callbacks must return promptly; the desktop loop
/// is cooperative.
pub trait App {
    fn kind(&self) -> AppKind;

    /// Runs once per frame for every window, focused or not.
    fn on_tick(&mut self, canvas: &mut Canvas<'_>, ctx: &mut AppContext<'_>);

    /// A key the window manager did not consume, delivered to the focused
    /// window only.
    fn on_key(&mut self, _canvas: &mut Canvas<'_>, _ctx: &mut AppContext<'_>, _key: KeyPress) {}

    /// A pointer event, delivered to the focused window after the manager
    /// has handled it. Coordinates are in screen cells.
    fn on_pointer(&mut self, _canvas: &mut Canvas<'_>, _ctx: &mut AppContext<'_>, _event: &InputEvent) {}
}
