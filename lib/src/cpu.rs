//! Interrupt flag management (irqsave/irqrestore).
//!
//! On bare-metal x86_64 these mask and restore the IF bit. Hosted builds
//! have no interrupts to mask, so the same calls compile to nothing and the
//! locks built on top degrade to plain spinlocks.

/// RFLAGS interrupt-enable bit.
pub const RFLAGS_IF: u64 = 1 << 9;

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
mod imp {
    use x86_64::instructions::interrupts;
    use x86_64::registers::rflags;

    #[inline(always)]
    pub fn save_flags_cli() -> u64 {
        let flags = rflags::read_raw();
        interrupts::disable();
        flags
    }

    #[inline(always)]
    pub fn restore_flags(flags: u64) {
        if flags & super::RFLAGS_IF != 0 {
            interrupts::enable();
        }
    }

    #[inline(always)]
    pub fn are_interrupts_enabled() -> bool {
        interrupts::are_enabled()
    }
}

#[cfg(not(all(target_arch = "x86_64", target_os = "none")))]
mod imp {
    #[inline(always)]
    pub fn save_flags_cli() -> u64 {
        0
    }

    #[inline(always)]
    pub fn restore_flags(_flags: u64) {}

    #[inline(always)]
    pub fn are_interrupts_enabled() -> bool {
        false
    }
}

/// Save RFLAGS and disable interrupts. Returns the saved flags.
pub use imp::save_flags_cli;

/// Re-enable interrupts only if they were enabled in `flags`.
pub use imp::restore_flags;

pub use imp::are_interrupts_enabled;
