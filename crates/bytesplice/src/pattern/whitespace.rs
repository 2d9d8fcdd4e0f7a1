// Whitespace probes used by whitespace-mode splitting
//
// The predicate is the fixed ASCII set: space, \t, \n, \v, \f, \r.
// Note that `u8::is_ascii_whitespace` leaves out \v, so it is not used here.

#[inline(always)]
pub fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Offset of the first non-whitespace byte at or after `from`.
/// `None` when only whitespace (or nothing) remains.
pub fn skip_whitespace(haystack: &[u8], from: usize) -> Option<usize> {
    haystack
        .get(from..)?
        .iter()
        .position(|&b| !is_space(b))
        .map(|pos| from + pos)
}

/// Offset of the first whitespace byte at or after `from`, or the end of
/// the buffer when the run reaches it. `None` when `from` is already past
/// the last byte.
pub fn search_whitespace(haystack: &[u8], from: usize) -> Option<usize> {
    if from >= haystack.len() {
        return None;
    }
    let pos = haystack[from..]
        .iter()
        .position(|&b| is_space(b))
        .unwrap_or(haystack.len() - from);
    Some(from + pos)
}
