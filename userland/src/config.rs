//! Desktop settings taken from the boot command line.
//!
//! Recognised tokens:
//! - `wm.frame_ms=16` (or `16ms`): pause between frames
//! - `wm.autostart=welcome,system,shell`: apps opened at start, `none` for
//!   an empty desktop
//! - `wm.cell_budget=40000`: cap on cells held by window buffers
//! - `klog=debug`: log level
//!
//! Anything unknown or malformed keeps the default.

use alloc::vec;
use alloc::vec::Vec;

use cellos_lib::cmdline::{parse_bool, parse_u32, tokens};
use cellos_lib::{KlogLevel, klog_set_level};
use cellos_video::DEFAULT_CELL_BUDGET;

use crate::appkit::AppKind;

const DEFAULT_FRAME_MS: u32 = 16;
const DEFAULT_LOG_LEVEL: KlogLevel = KlogLevel::Info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopConfig {
    pub frame_ms: u32,
    pub autostart: Vec<AppKind>,
    pub cell_budget: usize,
    pub log_level: KlogLevel,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            frame_ms: DEFAULT_FRAME_MS,
            autostart: vec![AppKind::Welcome, AppKind::System, AppKind::Shell],
            cell_budget: DEFAULT_CELL_BUDGET,
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

impl DesktopConfig {
    pub fn from_cmdline(cmdline: Option<&str>) -> Self {
        let mut cfg = Self::default();
        let Some(cmdline) = cmdline else {
            return cfg;
        };
        for (key, value) in tokens(cmdline) {
            match key {
                "wm.frame_ms" => {
                    if let Some(ms) = parse_u32(value) {
                        cfg.frame_ms = ms;
                    }
                }
                "wm.autostart" => {
                    if let Some(list) = parse_autostart(value) {
                        cfg.autostart = list;
                    }
                }
                "wm.cell_budget" => {
                    if let Some(cells) = parse_u32(value) {
                        cfg.cell_budget = cells as usize;
                    }
                }
                "klog" => {
                    if let Some(level) = KlogLevel::parse(value) {
                        cfg.log_level = level;
                    } else if parse_bool(value) == Some(false) {
                        cfg.log_level = KlogLevel::Error;
                    }
                }
                _ => {}
            }
        }
        cfg
    }

    pub fn apply_log_level(&self) {
        klog_set_level(self.log_level);
    }
}

/// Comma-separated app names. Unknown names are skipped; a list with no
/// known names is rejected unless it is `none`/`off`.
fn parse_autostart(value: &str) -> Option<Vec<AppKind>> {
    if value.eq_ignore_ascii_case("none") || parse_bool(value) == Some(false) {
        return Some(Vec::new());
    }
    let list: Vec<AppKind> = value
        .split(',')
        .filter_map(|name| AppKind::from_name(name.trim()))
        .collect();
    (!list.is_empty()).then_some(list)
}
