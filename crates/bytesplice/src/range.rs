// Range resolution: index arguments -> half-open byte spans
//
// Negative offsets count from the end (`effective = len + offset`). A begin
// equal to the length is valid and selects the empty tail; a begin past the
// length, or still negative after normalization, selects nothing.

use std::fmt;
use std::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo, RangeToInclusive};

use crate::byte_string::ByteRange;
use crate::error::SpliceResult;
use crate::pattern::PatternLike;

/// A range argument with optional bounds, either inclusive or exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeArg {
    /// `None` means from the start
    pub begin: Option<i64>,
    /// `None` means to the end
    pub end: Option<i64>,
    pub exclusive: bool,
}

impl RangeArg {
    pub const fn inclusive(begin: i64, end: i64) -> Self {
        Self {
            begin: Some(begin),
            end: Some(end),
            exclusive: false,
        }
    }

    pub const fn exclusive(begin: i64, end: i64) -> Self {
        Self {
            begin: Some(begin),
            end: Some(end),
            exclusive: true,
        }
    }

    pub const fn starting_at(begin: i64) -> Self {
        Self {
            begin: Some(begin),
            end: None,
            exclusive: false,
        }
    }
}

impl fmt::Display for RangeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(b) = self.begin {
            write!(f, "{b}")?;
        }
        f.write_str(if self.exclusive { "..." } else { ".." })?;
        if let Some(e) = self.end {
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl From<Range<i64>> for RangeArg {
    fn from(r: Range<i64>) -> Self {
        Self::exclusive(r.start, r.end)
    }
}

impl From<RangeInclusive<i64>> for RangeArg {
    fn from(r: RangeInclusive<i64>) -> Self {
        Self::inclusive(*r.start(), *r.end())
    }
}

impl From<RangeFrom<i64>> for RangeArg {
    fn from(r: RangeFrom<i64>) -> Self {
        Self::starting_at(r.start)
    }
}

impl From<RangeTo<i64>> for RangeArg {
    fn from(r: RangeTo<i64>) -> Self {
        Self {
            begin: None,
            end: Some(r.end),
            exclusive: true,
        }
    }
}

impl From<RangeToInclusive<i64>> for RangeArg {
    fn from(r: RangeToInclusive<i64>) -> Self {
        Self {
            begin: None,
            end: Some(r.end),
            exclusive: false,
        }
    }
}

impl From<RangeFull> for RangeArg {
    fn from(_: RangeFull) -> Self {
        Self {
            begin: None,
            end: None,
            exclusive: false,
        }
    }
}

/// The argument shapes accepted by slice and replace_range.
#[derive(Clone, Copy)]
pub enum IndexArg<'p> {
    /// One byte at an offset
    Index(i64),
    /// Offset plus byte count
    IndexLen(i64, i64),
    Range(RangeArg),
    /// First match of a pattern
    Pattern(&'p dyn PatternLike),
}

impl fmt::Debug for IndexArg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexArg::Index(i) => f.debug_tuple("Index").field(i).finish(),
            IndexArg::IndexLen(i, n) => f.debug_tuple("IndexLen").field(i).field(n).finish(),
            IndexArg::Range(r) => f.debug_tuple("Range").field(r).finish(),
            IndexArg::Pattern(_) => f.write_str("Pattern(..)"),
        }
    }
}

impl From<i64> for IndexArg<'_> {
    fn from(i: i64) -> Self {
        IndexArg::Index(i)
    }
}

impl From<(i64, i64)> for IndexArg<'_> {
    fn from((i, n): (i64, i64)) -> Self {
        IndexArg::IndexLen(i, n)
    }
}

impl From<RangeArg> for IndexArg<'_> {
    fn from(r: RangeArg) -> Self {
        IndexArg::Range(r)
    }
}

macro_rules! index_arg_from_range {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for IndexArg<'_> {
                fn from(r: $ty) -> Self {
                    IndexArg::Range(r.into())
                }
            }
        )*
    };
}

index_arg_from_range!(
    Range<i64>,
    RangeInclusive<i64>,
    RangeFrom<i64>,
    RangeTo<i64>,
    RangeToInclusive<i64>,
    RangeFull,
);

/// Normalize a possibly negative offset; `None` if it lands outside `[0, len]`.
#[inline]
pub(crate) fn normalize_offset(offset: i64, len: usize) -> Option<usize> {
    let len = len as i64;
    let offset = if offset < 0 { offset + len } else { offset };
    if offset < 0 || offset > len {
        None
    } else {
        Some(offset as usize)
    }
}

/// Resolve `arg` against `subject`. `Ok(None)` means "no match".
pub fn resolve(subject: &[u8], arg: &IndexArg<'_>) -> SpliceResult<Option<ByteRange>> {
    let len = subject.len();
    let span = match *arg {
        IndexArg::Index(i) => {
            normalize_offset(i, len).map(|begin| ByteRange::new(begin, (begin + 1).min(len)))
        }
        IndexArg::IndexLen(i, n) => resolve_index_len(i, n, len),
        IndexArg::Range(r) => resolve_range(&r, len),
        IndexArg::Pattern(pattern) => return resolve_pattern(subject, pattern, 0),
    };
    Ok(span)
}

fn resolve_index_len(i: i64, n: i64, len: usize) -> Option<ByteRange> {
    if n < 0 {
        return None;
    }
    let begin = normalize_offset(i, len)?;
    let count = usize::try_from(n).unwrap_or(usize::MAX).min(len - begin);
    Some(ByteRange::new(begin, begin + count))
}

fn resolve_range(r: &RangeArg, len: usize) -> Option<ByteRange> {
    let begin = normalize_offset(r.begin.unwrap_or(0), len)?;
    let end = match r.end {
        None => len,
        Some(e) => {
            let e = if e < 0 { e + len as i64 } else { e };
            let e = if r.exclusive { e } else { e.saturating_add(1) };
            // begin > end selects the empty span at begin
            e.clamp(begin as i64, len as i64) as usize
        }
    };
    Some(ByteRange::new(begin, end))
}

/// First match of `pattern` at or after `start`.
pub fn resolve_pattern<P: PatternLike + ?Sized>(
    subject: &[u8],
    pattern: &P,
    start: usize,
) -> SpliceResult<Option<ByteRange>> {
    Ok(pattern.locate(subject, start)?.map(|m| m.span))
}
