//! Stack-only decimal formatting.
//!
//! Apps draw numbers into cell buffers every tick; formatting into a small
//! stack buffer keeps that path free of heap traffic.

/// Format `value` into the tail of `buf` and return the digits.
///
/// Returns `b"0"` when `buf` is too short to hold every digit.
pub fn fmt_u64(value: u64, buf: &mut [u8]) -> &[u8] {
    if value == 0 || buf.is_empty() {
        return b"0";
    }
    let mut pos = buf.len();
    let mut n = value;
    while n != 0 {
        if pos == 0 {
            return b"0";
        }
        pos -= 1;
        buf[pos] = b'0' + (n % 10) as u8;
        n /= 10;
    }
    &buf[pos..]
}

/// Signed variant of [`fmt_u64`]; negative values get a leading `-`.
pub fn fmt_i64(value: i64, buf: &mut [u8]) -> &[u8] {
    if value >= 0 {
        return fmt_u64(value as u64, buf);
    }
    let len = buf.len();
    let digits = fmt_u64(value.unsigned_abs(), buf).len();
    let start = len - digits;
    if start == 0 {
        return b"0";
    }
    buf[start - 1] = b'-';
    &buf[start - 1..]
}

/// A stack buffer sized for any `u64`/`i64`.
pub struct NumBuf {
    buf: [u8; 20],
}

impl NumBuf {
    pub const fn new() -> Self {
        Self { buf: [0; 20] }
    }

    pub fn u64(&mut self, value: u64) -> &[u8] {
        fmt_u64(value, &mut self.buf)
    }

    pub fn i64(&mut self, value: i64) -> &[u8] {
        fmt_i64(value, &mut self.buf)
    }
}

impl Default for NumBuf {
    fn default() -> Self {
        Self::new()
    }
}
