//! Formatting.

/// Format the first `max` bytes of `bytes` as lower-case hex.
///
/// An ellipsis is appended if anything was cut off.
///
/// ```rust
/// # use timecoin_helper::fmt::hex_preview;
/// assert_eq!(hex_preview(&[0xde, 0xad, 0xbe, 0xef], 8), "deadbeef");
/// assert_eq!(hex_preview(&[0xde, 0xad, 0xbe, 0xef], 2), "dead...");
/// assert_eq!(hex_preview(&[], 2), "");
/// ```
pub fn hex_preview(bytes: &[u8], max: usize) -> String {
    let shown = &bytes[..bytes.len().min(max)];
    let mut s = hex::encode(shown);
    if shown.len() < bytes.len() {
        s.push_str("...");
    }
    s
}

/// Format a hash as `<first 8 bytes in hex>...`.
///
/// ```rust
/// # use timecoin_helper::fmt::short_hash;
/// assert_eq!(short_hash(&[0x11; 32]), "1111111111111111...");
/// ```
pub fn short_hash(hash: &[u8; 32]) -> String {
    hex_preview(hash, 8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_exact_length_has_no_ellipsis() {
        assert_eq!(hex_preview(&[1, 2, 3], 3), "010203");
        assert_eq!(hex_preview(&[1, 2, 3, 4], 3), "010203...");
    }
}
