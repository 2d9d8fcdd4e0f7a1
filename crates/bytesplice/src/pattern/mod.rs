// Pattern capability: "find me in this buffer from offset N"
//
// Literal byte strings are patterns (exact substring search). LuaPattern is a
// full engine that also reports captures. The engines in this crate only ever
// talk to `PatternLike`, so anything that can locate a half-open byte span can
// drive split, sub/gsub and line iteration.

pub mod lua;
pub mod whitespace;

use crate::byte_string::{ByteRange, ByteString};
use crate::error::SpliceResult;
use crate::limits::MAX_CAPTURES;

pub use lua::LuaPattern;

/// Fixed-size capture results, no Vec allocation per match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Captures {
    data: [ByteRange; MAX_CAPTURES],
    count: usize,
}

impl Captures {
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            data: [ByteRange::empty(0); MAX_CAPTURES],
            count: 0,
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Capture `index` (0-based), if the pattern recorded that many.
    #[inline(always)]
    pub fn get(&self, index: usize) -> Option<ByteRange> {
        if index < self.count {
            Some(self.data[index])
        } else {
            None
        }
    }

    #[inline(always)]
    pub fn iter(&self) -> std::slice::Iter<'_, ByteRange> {
        self.data[..self.count].iter()
    }

    pub(crate) fn push(&mut self, span: ByteRange) {
        if self.count < MAX_CAPTURES {
            self.data[self.count] = span;
            self.count += 1;
        }
    }
}

impl Default for Captures {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a Captures {
    type Item = &'a ByteRange;
    type IntoIter = std::slice::Iter<'a, ByteRange>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.data[..self.count].iter()
    }
}

/// A located match: the whole span plus whatever groups the pattern captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub span: ByteRange,
    pub captures: Captures,
}

impl Match {
    #[inline]
    pub const fn new(span: ByteRange) -> Self {
        Self {
            span,
            captures: Captures::new(),
        }
    }

    #[inline]
    pub fn with_captures(span: ByteRange, captures: Captures) -> Self {
        Self { span, captures }
    }

    /// Group `n`: 0 is the whole match, 1.. are captures.
    pub fn group(&self, n: usize) -> Option<ByteRange> {
        if n == 0 {
            Some(self.span)
        } else {
            self.captures.get(n - 1)
        }
    }
}

/// Anything that can locate the next occurrence of itself in a byte buffer.
pub trait PatternLike {
    /// First match whose span begins at or after `start`.
    ///
    /// `start == haystack.len()` is a valid probe (zero-width matches at the
    /// end of the buffer); `start > haystack.len()` never matches.
    fn locate(&self, haystack: &[u8], start: usize) -> SpliceResult<Option<Match>>;

    /// Raw bytes when this is a plain literal.
    fn as_literal(&self) -> Option<&[u8]> {
        None
    }

    /// True for the empty pattern (matches between every byte).
    fn is_empty_pattern(&self) -> bool {
        self.as_literal().is_some_and(<[u8]>::is_empty)
    }
}

impl<P: PatternLike + ?Sized> PatternLike for &P {
    #[inline]
    fn locate(&self, haystack: &[u8], start: usize) -> SpliceResult<Option<Match>> {
        (**self).locate(haystack, start)
    }

    fn as_literal(&self) -> Option<&[u8]> {
        (**self).as_literal()
    }

    fn is_empty_pattern(&self) -> bool {
        (**self).is_empty_pattern()
    }
}

impl PatternLike for [u8] {
    #[inline]
    fn locate(&self, haystack: &[u8], start: usize) -> SpliceResult<Option<Match>> {
        Ok(find_literal(haystack, self, start).map(Match::new))
    }

    fn as_literal(&self) -> Option<&[u8]> {
        Some(self)
    }
}

impl PatternLike for str {
    #[inline]
    fn locate(&self, haystack: &[u8], start: usize) -> SpliceResult<Option<Match>> {
        self.as_bytes().locate(haystack, start)
    }

    fn as_literal(&self) -> Option<&[u8]> {
        Some(self.as_bytes())
    }
}

impl<const N: usize> PatternLike for [u8; N] {
    #[inline]
    fn locate(&self, haystack: &[u8], start: usize) -> SpliceResult<Option<Match>> {
        self.as_slice().locate(haystack, start)
    }

    fn as_literal(&self) -> Option<&[u8]> {
        Some(self.as_slice())
    }
}

impl PatternLike for ByteString {
    #[inline]
    fn locate(&self, haystack: &[u8], start: usize) -> SpliceResult<Option<Match>> {
        self.as_bytes().locate(haystack, start)
    }

    fn as_literal(&self) -> Option<&[u8]> {
        Some(self.as_bytes())
    }
}

/// Find a byte needle in `haystack[start..]`, returning the absolute span.
#[inline]
pub(crate) fn find_literal(haystack: &[u8], needle: &[u8], start: usize) -> Option<ByteRange> {
    if start > haystack.len() {
        return None;
    }
    let rest = &haystack[start..];
    let pos = if needle.is_empty() {
        Some(0)
    } else if needle.len() > rest.len() {
        None
    } else {
        rest.windows(needle.len()).position(|w| w == needle)
    }?;
    Some(ByteRange::new(start + pos, start + pos + needle.len()))
}

/// Locate the next match that makes progress from `cursor`.
///
/// A zero-width match sitting exactly on the cursor would never advance the
/// scan, so the search is retried one byte further on.
pub(crate) fn locate_advancing<P: PatternLike + ?Sized>(
    pattern: &P,
    haystack: &[u8],
    cursor: usize,
) -> SpliceResult<Option<Match>> {
    match pattern.locate(haystack, cursor)? {
        Some(m) if m.span.is_empty() && m.span.begin == cursor => {
            if cursor < haystack.len() {
                pattern.locate(haystack, cursor + 1)
            } else {
                Ok(None)
            }
        }
        found => Ok(found),
    }
}
