//! The desktop: window manager, event dispatch and the frame loop.
//!
//! One [`Desktop::step`] is one frame:
//!
//! 1. drain the key stream; window-manager chords are handled here, every
//!    other key goes to the focused window
//! 2. drain the pointer channel through [`InputHandler`], then offer each
//!    event to the focused window
//! 3. tick every window's app
//! 4. compose and present the frame
//!
//! Apps may queue launches from any callback; they are serviced right
//! after the callback returns.

pub mod input;
pub mod renderer;
pub mod taskbar;


use alloc::vec::Vec;

use cellos_abi::{InputEvent, KeyPress};
use cellos_drivers::InputChannel;
use cellos_fs::FileSystem;
use cellos_gfx::CellTarget;
use cellos_lib::{klog_debug, klog_info, klog_warn};
use cellos_video::{DisplaySink, ScreenBuffer, WindowHandle};

use crate::appkit::{App, AppContext, AppKind, Canvas, LaunchRequest};
use crate::apps::{self, launch_entry};
use crate::config::DesktopConfig;
use input::{InputHandler, KeyAction, PointerOutcome, Windows};
use renderer::SceneState;

/// Everything the frame loop needs from the machine it runs on.
pub trait Platform {
    /// Monotonic tick counter.
    fn ticks(&self) -> u64;

    /// Yield until roughly `ms` milliseconds have passed.
    fn sleep_ms(&mut self, ms: u64);

    fn read_key(&mut self) -> Option<KeyPress>;

    fn channel(&self) -> &InputChannel;

    fn sink(&mut self) -> &mut dyn DisplaySink;
}

pub struct Desktop<F: FileSystem> {
    config: DesktopConfig,
    windows: Windows,
    input: InputHandler,
    screen: ScreenBuffer,
    fs: F,
    launches: Vec<LaunchRequest>,
    pointer: (i32, i32),
    running: bool,
}

impl<F: FileSystem> Desktop<F> {
    pub fn new(config: DesktopConfig, fs: F) -> Self {
        Self {
            windows: Windows::with_cell_budget(config.cell_budget),
            input: InputHandler::new(),
            screen: ScreenBuffer::new(),
            fs,
            launches: Vec::new(),
            pointer: (0, 0),
            running: true,
            config,
        }
    }

    pub fn config(&self) -> &DesktopConfig {
        &self.config
    }

    pub fn windows(&self) -> &Windows {
        &self.windows
    }

    pub fn windows_mut(&mut self) -> &mut Windows {
        &mut self.windows
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    pub fn fs_mut(&mut self) -> &mut F {
        &mut self.fs
    }

    pub fn screen(&self) -> &ScreenBuffer {
        &self.screen
    }

    pub fn start_menu_open(&self) -> bool {
        self.input.start_menu_open()
    }

    pub fn dragging(&self) -> Option<WindowHandle> {
        self.input.dragging()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn pointer(&self) -> (i32, i32) {
        self.pointer
    }

    /// Open the configured autostart apps; the last one ends up focused.
    pub fn start(&mut self, ticks: u64) {
        klog_info!("wm: desktop starting ({} autostart apps)", self.config.autostart.len());
        let autostart = self.config.autostart.clone();
        for kind in autostart {
            self.launch(kind, None, ticks);
        }
        let top = self.windows.top();
        self.windows.set_focus(top);
    }

    /// Open a window for `kind` at its default geometry, raised and focused.
    pub fn launch(&mut self, kind: AppKind, arg: Option<&str>, ticks: u64) -> Option<WindowHandle> {
        let entry = launch_entry(kind);
        let g = entry.geometry;
        let Some(handle) = self.windows.create(entry.label, g.x, g.y, g.width, g.height) else {
            klog_warn!("wm: cannot open {}", entry.label);
            return None;
        };
        let app = apps::instantiate(kind, arg, g, &mut self.fs, ticks);
        if let Some(win) = self.windows.get_mut(handle) {
            win.set_app(app);
        }
        input::focus_window(&mut self.windows, handle);
        klog_info!("wm: launched {} as window {}", entry.label, handle.id());
        Some(handle)
    }

    /// Close a window; focus falls to the new front-most window.
    pub fn close(&mut self, handle: WindowHandle) {
        self.input.close_window(&mut self.windows, handle);
    }

    fn service_launches(&mut self, ticks: u64) {
        while !self.launches.is_empty() {
            let pending = core::mem::take(&mut self.launches);
            for req in pending {
                self.launch(req.kind, req.arg.as_deref(), ticks);
            }
        }
    }

    /// Run `f` against the app in `handle` with a canvas over its buffer.
    fn with_app<R>(
        &mut self,
        handle: WindowHandle,
        ticks: u64,
        f: impl FnOnce(&mut dyn App, &mut Canvas<'_>, &mut AppContext<'_>) -> R,
    ) -> Option<R> {
        let pointer = self.pointer;
        let win = self.windows.get_mut(handle)?;
        let frame = win.rect();
        let focused = win.is_focused();
        let (app, view) = win.app_and_canvas()?;
        let mut canvas = Canvas::new(view, frame);
        let mut ctx = AppContext::new(focused, pointer, ticks, &mut self.fs, &mut self.launches);
        Some(f(app.as_mut(), &mut canvas, &mut ctx))
    }

    pub fn handle_key(&mut self, key: KeyPress, ticks: u64) {
        match input::classify_key(key) {
            KeyAction::Exit => {
                klog_info!("wm: leaving windowed mode");
                self.running = false;
            }
            KeyAction::CloseFocused => {
                if let Some(h) = self.windows.focused() {
                    self.close(h);
                }
            }
            KeyAction::ToggleMaximize => {
                if let Some(h) = self.windows.focused() {
                    input::toggle_maximize(&mut self.windows, h);
                }
            }
            KeyAction::ToggleMenu => self.input.toggle_start_menu(),
            KeyAction::CycleFocus => input::cycle_focus(&mut self.windows),
            KeyAction::Forward(key) => {
                if let Some(h) = self.windows.focused() {
                    self.with_app(h, ticks, |app, canvas, ctx| app.on_key(canvas, ctx, key));
                    self.service_launches(ticks);
                }
            }
        }
    }

    pub fn handle_pointer(&mut self, event: &InputEvent, ticks: u64) {
        self.pointer = (event.x as i32, event.y as i32);
        match self.input.handle_pointer(&mut self.windows, event) {
            PointerOutcome::Consumed => {}
            PointerOutcome::Launch(kind) => {
                self.launch(kind, None, ticks);
            }
            PointerOutcome::Pass => {
                if let Some(h) = self.windows.focused() {
                    self.with_app(h, ticks, |app, canvas, ctx| app.on_pointer(canvas, ctx, event));
                    self.service_launches(ticks);
                }
            }
        }
    }

    /// Tick every window, back to front.
    pub fn tick_apps(&mut self, ticks: u64) {
        let handles: Vec<WindowHandle> = self.windows.z_order().collect();
        for h in handles {
            self.with_app(h, ticks, |app, canvas, ctx| app.on_tick(canvas, ctx));
        }
        self.service_launches(ticks);
    }

    pub fn compose(&mut self) -> &ScreenBuffer {
        let scene = SceneState {
            menu_open: self.input.start_menu_open(),
            pointer: self.pointer,
        };
        renderer::compose(&mut self.screen, &self.windows, &scene);
        &self.screen
    }

    /// Run one frame. Returns false once the user has asked to leave.
    pub fn step<P: Platform + ?Sized>(&mut self, platform: &mut P) -> bool {
        let ticks = platform.ticks();
        while self.running {
            let Some(key) = platform.read_key() else {
                break;
            };
            self.handle_key(key, ticks);
        }
        if !self.running {
            return false;
        }

        self.pointer = platform.channel().pointer_position();
        while let Some(event) = platform.channel().poll() {
            self.handle_pointer(&event, ticks);
        }

        self.tick_apps(ticks);
        self.compose();
        platform.sink().present(self.screen.cells());
        true
    }

    /// Autostart, then run frames until exit. Every window is closed on
    /// the way out.
    pub fn run<P: Platform + ?Sized>(&mut self, platform: &mut P) {
        self.start(platform.ticks());
        while self.step(platform) {
            platform.sleep_ms(self.config.frame_ms as u64);
        }
        let handles: Vec<WindowHandle> = self.windows.z_order().collect();
        for h in handles {
            self.close(h);
        }
        klog_debug!("wm: desktop stopped");
    }
}

/// Hardware platform: PIT ticks, the PS/2 key stream and pointer channel,
/// and VGA text memory.
#[cfg(all(target_arch = "x86_64", target_os = "none"))]
pub mod hw {
    use cellos_abi::KeyPress;
    use cellos_drivers::{InputChannel, input_event, keyboard, timer};
    use cellos_video::DisplaySink;
    use cellos_video::framebuffer::VgaTextSink;

    use super::{Desktop, Platform};
    use crate::config::DesktopConfig;

    pub struct HwPlatform {
        sink: VgaTextSink,
    }

    impl HwPlatform {
        /// # Safety
        /// VGA text memory must be identity-mapped at its legacy address.
        pub unsafe fn new() -> Self {
            // SAFETY: forwarded to the caller.
            let sink = unsafe { VgaTextSink::new(VgaTextSink::LEGACY_BASE as *mut u16) };
            Self { sink }
        }
    }

    impl Platform for HwPlatform {
        fn ticks(&self) -> u64 {
            timer::ticks()
        }

        fn sleep_ms(&mut self, ms: u64) {
            timer::sleep_ms(ms);
        }

        fn read_key(&mut self) -> Option<KeyPress> {
            keyboard::key_stream().read()
        }

        fn channel(&self) -> &InputChannel {
            input_event::channel()
        }

        fn sink(&mut self) -> &mut dyn DisplaySink {
            &mut self.sink
        }
    }

    /// Enter windowed mode on the shared filesystem until the user exits.
    ///
    /// # Safety
    /// See [`HwPlatform::new`].
    pub unsafe fn run_desktop(cmdline: Option<&str>) {
        let config = DesktopConfig::from_cmdline(cmdline);
        config.apply_log_level();
        // SAFETY: forwarded to the caller.
        let mut platform = unsafe { HwPlatform::new() };
        let mut desktop = Desktop::new(config, cellos_fs::RootFs);
        desktop.run(&mut platform);
    }
}
