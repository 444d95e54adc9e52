//! Kernel logging.
//!
//! Every log line funnels through one backend function pointer. Until a
//! backend is registered, bare-metal builds write straight to COM1 and
//! hosted builds discard the line.
//!
//! ```ignore
//! cellos_lib::klog::klog_register_backend(my_backend_fn);
//! cellos_lib::klog_info!("compositor: started with {} windows", n);
//! ```

use core::fmt;
use core::sync::atomic::{AtomicPtr, AtomicU8, Ordering};

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum KlogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl KlogLevel {
    fn from_raw(raw: u8) -> Self {
        match raw {
            0 => KlogLevel::Error,
            1 => KlogLevel::Warn,
            2 => KlogLevel::Info,
            3 => KlogLevel::Debug,
            _ => KlogLevel::Trace,
        }
    }

    /// Parse a level name as written on the boot command line.
    pub fn parse(value: &str) -> Option<Self> {
        const NAMES: [(&str, KlogLevel); 5] = [
            ("error", KlogLevel::Error),
            ("warn", KlogLevel::Warn),
            ("info", KlogLevel::Info),
            ("debug", KlogLevel::Debug),
            ("trace", KlogLevel::Trace),
        ];
        NAMES
            .iter()
            .find(|(name, _)| value.eq_ignore_ascii_case(name))
            .map(|&(_, level)| level)
    }
}

static CURRENT_LEVEL: AtomicU8 = AtomicU8::new(KlogLevel::Info as u8);

/// The backend writes one formatted line plus its trailing newline.
pub type KlogBackend = fn(fmt::Arguments<'_>);

/// Null means "use the fallback".
static BACKEND: AtomicPtr<()> = AtomicPtr::new(core::ptr::null_mut());

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
fn fallback_backend(args: fmt::Arguments<'_>) {
    use x86_64::instructions::port::Port;

    const COM1: u16 = 0x3F8;
    const LSR_TX_EMPTY: u8 = 0x20;

    struct Com1;

    impl Com1 {
        fn putc(&mut self, byte: u8) {
            let mut lsr: Port<u8> = Port::new(COM1 + 5);
            let mut thr: Port<u8> = Port::new(COM1);
            // SAFETY: COM1 is a fixed legacy port; reading LSR and writing
            // THR has no side effects beyond transmitting `byte`.
            unsafe {
                while lsr.read() & LSR_TX_EMPTY == 0 {
                    core::hint::spin_loop();
                }
                thr.write(byte);
            }
        }
    }

    impl fmt::Write for Com1 {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            for b in s.bytes() {
                if b == b'\n' {
                    self.putc(b'\r');
                }
                self.putc(b);
            }
            Ok(())
        }
    }

    let mut port = Com1;
    let _ = fmt::write(&mut port, args);
    let _ = fmt::Write::write_str(&mut port, "\n");
}

#[cfg(not(all(target_arch = "x86_64", target_os = "none")))]
fn fallback_backend(_args: fmt::Arguments<'_>) {}

#[inline]
fn dispatch(args: fmt::Arguments<'_>) {
    let ptr = BACKEND.load(Ordering::Acquire);
    if ptr.is_null() {
        fallback_backend(args);
    } else {
        // SAFETY: `klog_register_backend` only stores `KlogBackend` fn
        // pointers, which have the same size as `*mut ()`.
        let backend: KlogBackend = unsafe { core::mem::transmute(ptr) };
        backend(args);
    }
}

pub fn klog_register_backend(backend: KlogBackend) {
    BACKEND.store(backend as *mut (), Ordering::Release);
}

/// Drop the registered backend and go back to the fallback.
pub fn klog_clear_backend() {
    BACKEND.store(core::ptr::null_mut(), Ordering::Release);
}

pub fn klog_init() {
    CURRENT_LEVEL.store(KlogLevel::Info as u8, Ordering::Relaxed);
}

pub fn klog_set_level(level: KlogLevel) {
    CURRENT_LEVEL.store(level as u8, Ordering::Relaxed);
}

pub fn klog_get_level() -> KlogLevel {
    KlogLevel::from_raw(CURRENT_LEVEL.load(Ordering::Relaxed))
}

#[inline]
pub fn is_enabled(level: KlogLevel) -> bool {
    level as u8 <= CURRENT_LEVEL.load(Ordering::Relaxed)
}

/// Emit one line at `level`. Callers do not add a trailing newline.
pub fn log_args(level: KlogLevel, args: fmt::Arguments<'_>) {
    if is_enabled(level) {
        dispatch(args);
    }
}

#[macro_export]
macro_rules! klog {
    ($level:expr, $($arg:tt)*) => {{
        $crate::klog::log_args($level, ::core::format_args!($($arg)*));
    }};
}

#[macro_export]
macro_rules! klog_error {
    ($($arg:tt)*) => {
        $crate::klog::log_args($crate::klog::KlogLevel::Error, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! klog_warn {
    ($($arg:tt)*) => {
        $crate::klog::log_args($crate::klog::KlogLevel::Warn, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! klog_info {
    ($($arg:tt)*) => {
        $crate::klog::log_args($crate::klog::KlogLevel::Info, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! klog_debug {
    ($($arg:tt)*) => {
        $crate::klog::log_args($crate::klog::KlogLevel::Debug, ::core::format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! klog_trace {
    ($($arg:tt)*) => {
        $crate::klog::log_args($crate::klog::KlogLevel::Trace, ::core::format_args!($($arg)*))
    };
}
