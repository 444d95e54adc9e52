/// Interpret a NUL-padded byte array as `&str`, stopping at the first NUL.
#[inline]
pub fn bytes_as_str(buf: &[u8]) -> &str {
    let len = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    core::str::from_utf8(&buf[..len]).unwrap_or("<invalid>")
}

/// Copy `src` into a fixed NUL-padded buffer, truncating at a char
/// boundary so the result stays valid UTF-8. Returns the copied length.
pub fn copy_truncated(dst: &mut [u8], src: &str) -> usize {
    dst.fill(0);
    let mut len = src.len().min(dst.len());
    while !src.is_char_boundary(len) {
        len -= 1;
    }
    dst[..len].copy_from_slice(&src.as_bytes()[..len]);
    len
}
