//! Boot command-line helpers.
//!
//! The command line is a whitespace-separated list of `key=value` tokens.
//! Unknown keys and malformed values are ignored so a typo never blocks
//! boot.

pub fn parse_bool(value: &str) -> Option<bool> {
    const TRUE: [&str; 5] = ["on", "true", "yes", "enabled", "1"];
    const FALSE: [&str; 5] = ["off", "false", "no", "disabled", "0"];
    if TRUE.iter().any(|t| value.eq_ignore_ascii_case(t)) {
        Some(true)
    } else if FALSE.iter().any(|f| value.eq_ignore_ascii_case(f)) {
        Some(false)
    } else {
        None
    }
}

/// Parse a decimal number, accepting an optional `ms` suffix.
pub fn parse_u32(value: &str) -> Option<u32> {
    value.trim_end_matches("ms").parse::<u32>().ok()
}

/// Iterate `(key, value)` pairs. Tokens without `=` yield an empty value.
pub fn tokens(cmdline: &str) -> impl Iterator<Item = (&str, &str)> {
    cmdline
        .split_whitespace()
        .map(|token| token.split_once('=').unwrap_or((token, "")))
}
