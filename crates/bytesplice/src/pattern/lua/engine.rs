// Backtracking matcher over raw bytes
//
// The pattern is interpreted in place. Captures live in a fixed array on the
// MatchState. Every recursive step counts against `max_depth` (stack) and
// against MAX_PATTERN_STEPS for the whole search (backtracking work); going
// over either fails with "pattern too complex". Results come back as
// absolute byte spans.

use super::class::{element_end, singlematch};
use crate::byte_string::ByteRange;
use crate::limits::{MAX_CAPTURES, MAX_PATTERN_STEPS};
use crate::pattern::{Captures, Match};

/// Check that a pattern has no special bytes (can be matched as plain text).
#[inline]
pub fn is_plain_pattern(pat: &[u8]) -> bool {
    !pat.iter().any(|&c| {
        matches!(
            c,
            b'%' | b'.' | b'[' | b'*' | b'+' | b'-' | b'?' | b'^' | b'$' | b'(' | b')'
        )
    })
}

/// Validate a pattern for syntax errors before any matching happens.
pub fn validate_pattern(pat: &[u8]) -> Result<(), String> {
    let mut i = usize::from(pat.first() == Some(&b'^'));
    let mut open = 0usize;
    while i < pat.len() {
        match pat[i] {
            b'%' => {
                if i + 1 >= pat.len() {
                    return Err("malformed pattern (ends with '%')".to_string());
                }
                match pat[i + 1] {
                    b'b' => {
                        if i + 3 >= pat.len() {
                            return Err("malformed pattern (missing arguments to '%b')".to_string());
                        }
                        i += 4;
                    }
                    b'f' => {
                        i += 2;
                        if i >= pat.len() || pat[i] != b'[' {
                            return Err("missing '[' after '%f' in pattern".to_string());
                        }
                        i = validate_set(pat, i)?;
                    }
                    d @ b'1'..=b'9' => {
                        let n = usize::from(d - b'0');
                        if n > open {
                            return Err(format!("invalid capture index %{n}"));
                        }
                        i += 2;
                    }
                    b'0' => return Err("invalid capture index %0".to_string()),
                    _ => i += 2,
                }
            }
            b'[' => i = validate_set(pat, i)?,
            b'(' => {
                open += 1;
                if open > MAX_CAPTURES {
                    return Err("too many captures".to_string());
                }
                i += 1;
            }
            _ => i += 1,
        }
        if i < pat.len() && matches!(pat[i], b'*' | b'+' | b'-' | b'?') {
            i += 1;
        }
    }
    Ok(())
}

/// Validate a [set] starting at pat[i] (i points to '['). Returns index past ']'.
fn validate_set(pat: &[u8], i: usize) -> Result<usize, String> {
    let mut j = i + 1;
    if j < pat.len() && pat[j] == b'^' {
        j += 1;
    }
    if j < pat.len() && pat[j] == b']' {
        j += 1;
    }
    while j < pat.len() && pat[j] != b']' {
        if pat[j] == b'%' {
            j += 1;
            if j >= pat.len() {
                return Err("malformed pattern (ends with '%')".to_string());
            }
        }
        j += 1;
    }
    if j >= pat.len() {
        return Err("malformed pattern (missing ']')".to_string());
    }
    Ok(j + 1)
}

/// Capture length: a byte count, a position marker, or still open
#[derive(Debug, Clone, Copy)]
enum CaptureLen {
    Len(usize),
    Position,
    Unfinished,
}

#[derive(Debug, Clone, Copy)]
struct Capture {
    start: usize,
    len: CaptureLen,
}

/// Match state, all matching context lives on the stack
struct MatchState<'a> {
    text: &'a [u8],
    pat: &'a [u8],
    captures: [Capture; MAX_CAPTURES],
    level: usize,
    depth: usize,
    max_depth: usize,
    steps: usize,
    error: Option<String>,
}

impl<'a> MatchState<'a> {
    fn new(text: &'a [u8], pat: &'a [u8], max_depth: usize) -> Self {
        Self {
            text,
            pat,
            captures: [Capture {
                start: 0,
                len: CaptureLen::Unfinished,
            }; MAX_CAPTURES],
            level: 0,
            depth: 0,
            max_depth,
            steps: 0,
            error: None,
        }
    }

    /// Reset for the next start position (captures are overwritten lazily).
    /// `steps` keeps counting across start positions.
    #[inline]
    fn reset(&mut self) {
        self.level = 0;
        self.depth = 0;
        self.error = None;
    }

    fn captures(&self) -> Result<Captures, String> {
        let mut result = Captures::new();
        for cap in &self.captures[..self.level] {
            match cap.len {
                CaptureLen::Len(len) => result.push(ByteRange::new(cap.start, cap.start + len)),
                CaptureLen::Position => result.push(ByteRange::empty(cap.start)),
                CaptureLen::Unfinished => return Err("unfinished capture".to_string()),
            }
        }
        Ok(result)
    }
}

/// Try to match pattern starting at `pat[pp]` against text starting at `text[si]`.
/// Returns `Some(end_si)` on success (index past the match), `None` on failure.
fn match_impl(ms: &mut MatchState, si: usize, pp: usize) -> Option<usize> {
    if ms.error.is_some() {
        return None;
    }
    ms.depth += 1;
    ms.steps += 1;
    if ms.depth > ms.max_depth || ms.steps > MAX_PATTERN_STEPS {
        ms.error = Some("pattern too complex".to_string());
        ms.depth -= 1;
        return None;
    }
    let result = match_inner(ms, si, pp);
    ms.depth -= 1;
    result
}

fn match_inner(ms: &mut MatchState, mut si: usize, mut pp: usize) -> Option<usize> {
    // Loop instead of recursing for sequential single elements
    loop {
        if pp >= ms.pat.len() {
            return Some(si);
        }

        match ms.pat[pp] {
            b'(' => {
                return if ms.pat.get(pp + 1) == Some(&b')') {
                    start_capture(ms, si, pp + 2, CaptureLen::Position)
                } else {
                    start_capture(ms, si, pp + 1, CaptureLen::Unfinished)
                };
            }
            b')' => return close_capture(ms, si, pp + 1),
            b'$' if pp + 1 == ms.pat.len() => {
                return (si == ms.text.len()).then_some(si);
            }
            b'%' if pp + 1 < ms.pat.len() => match ms.pat[pp + 1] {
                b'b' => return match_balanced(ms, si, pp),
                b'f' => return match_frontier(ms, si, pp),
                d if d.is_ascii_digit() => return match_backref(ms, si, pp),
                _ => {}
            },
            _ => {}
        }

        let ep = element_end(ms.pat, pp);

        if let Some(&suffix) = ms.pat.get(ep) {
            match suffix {
                b'*' => return match_greedy(ms, si, pp, ep + 1, 0),
                b'+' => return match_greedy(ms, si, pp, ep + 1, 1),
                b'-' => return match_lazy(ms, si, pp, ep + 1),
                b'?' => return match_optional(ms, si, pp, ep + 1),
                _ => {}
            }
        }

        if si < ms.text.len() && singlematch(ms.text[si], ms.pat, pp) {
            si += 1;
            pp = ep;
            continue;
        }
        return None;
    }
}

/// Greedy repetition (*, +); `min` is 0 for *, 1 for +
fn match_greedy(ms: &mut MatchState, si: usize, pp: usize, rp: usize, min: usize) -> Option<usize> {
    let mut count = 0;
    while si + count < ms.text.len() && singlematch(ms.text[si + count], ms.pat, pp) {
        count += 1;
    }
    while count >= min {
        if let Some(end) = match_impl(ms, si + count, rp) {
            return Some(end);
        }
        if count == 0 {
            break;
        }
        count -= 1;
    }
    None
}

/// Lazy repetition (-)
fn match_lazy(ms: &mut MatchState, si: usize, pp: usize, rp: usize) -> Option<usize> {
    let mut i = si;
    loop {
        if let Some(end) = match_impl(ms, i, rp) {
            return Some(end);
        }
        if i < ms.text.len() && singlematch(ms.text[i], ms.pat, pp) {
            i += 1;
        } else {
            return None;
        }
    }
}

/// Optional repetition (?)
fn match_optional(ms: &mut MatchState, si: usize, pp: usize, rp: usize) -> Option<usize> {
    if si < ms.text.len()
        && singlematch(ms.text[si], ms.pat, pp)
        && let Some(end) = match_impl(ms, si + 1, rp)
    {
        return Some(end);
    }
    match_impl(ms, si, rp)
}

/// Open a capture (normal or position)
fn start_capture(ms: &mut MatchState, si: usize, pp: usize, len: CaptureLen) -> Option<usize> {
    let n = ms.level;
    if n >= MAX_CAPTURES {
        ms.error = Some("too many captures".to_string());
        return None;
    }
    ms.captures[n] = Capture { start: si, len };
    ms.level = n + 1;
    let result = match_impl(ms, si, pp);
    if result.is_none() {
        ms.level = n;
    }
    result
}

/// Close the most recent unfinished capture
fn close_capture(ms: &mut MatchState, si: usize, pp: usize) -> Option<usize> {
    let Some(n) = (0..ms.level)
        .rev()
        .find(|&i| matches!(ms.captures[i].len, CaptureLen::Unfinished))
    else {
        ms.error = Some("invalid pattern capture".to_string());
        return None;
    };
    ms.captures[n].len = CaptureLen::Len(si - ms.captures[n].start);
    let result = match_impl(ms, si, pp);
    if result.is_none() {
        ms.captures[n].len = CaptureLen::Unfinished;
    }
    result
}

/// Balanced match %bxy
fn match_balanced(ms: &mut MatchState, si: usize, pp: usize) -> Option<usize> {
    let (open, close) = (ms.pat[pp + 2], ms.pat[pp + 3]);
    if si >= ms.text.len() || ms.text[si] != open {
        return None;
    }

    let mut depth = 1usize;
    let mut i = si + 1;
    while i < ms.text.len() {
        let c = ms.text[i];
        i += 1;
        if c == close {
            depth -= 1;
            if depth == 0 {
                return match_impl(ms, i, pp + 4);
            }
        } else if c == open {
            depth += 1;
        }
    }
    None
}

/// Frontier pattern %f[set]
fn match_frontier(ms: &mut MatchState, si: usize, pp: usize) -> Option<usize> {
    let set_start = pp + 2;
    let set_end = element_end(ms.pat, set_start);

    let prev = if si > 0 { ms.text[si - 1] } else { 0 };
    let curr = ms.text.get(si).copied().unwrap_or(0);

    if !singlematch(prev, ms.pat, set_start) && singlematch(curr, ms.pat, set_start) {
        match_impl(ms, si, set_end)
    } else {
        None
    }
}

/// Back reference %1-%9
fn match_backref(ms: &mut MatchState, si: usize, pp: usize) -> Option<usize> {
    let n = usize::from(ms.pat[pp + 1] - b'0');
    let cap_len = match n.checked_sub(1).map(|i| (i, ms.captures[i].len)) {
        Some((_, CaptureLen::Len(len))) if n <= ms.level => len,
        _ => {
            ms.error = Some(format!("invalid capture index %{n}"));
            return None;
        }
    };
    let cap_start = ms.captures[n - 1].start;

    let end = si + cap_len;
    if end > ms.text.len() || ms.text[si..end] != ms.text[cap_start..cap_start + cap_len] {
        return None;
    }
    match_impl(ms, end, pp + 2)
}

/// Find the first match at or after `init`.
///
/// `anchored` patterns (leading `^`, already stripped from `pat`) are only
/// tried at `init` itself.
pub fn find_at(
    text: &[u8],
    pat: &[u8],
    anchored: bool,
    init: usize,
    max_depth: usize,
) -> Result<Option<Match>, String> {
    if init > text.len() {
        return Ok(None);
    }

    if !anchored && is_plain_pattern(pat) {
        return Ok(crate::pattern::find_literal(text, pat, init).map(Match::new));
    }

    let mut ms = MatchState::new(text, pat, max_depth);
    let mut si = init;
    loop {
        ms.reset();
        if let Some(end) = match_impl(&mut ms, si, 0) {
            let captures = ms.captures()?;
            return Ok(Some(Match::with_captures(ByteRange::new(si, end), captures)));
        }
        if let Some(err) = ms.error.take() {
            return Err(err);
        }
        if anchored || si >= text.len() {
            return Ok(None);
        }
        si += 1;
    }
}
