// Slice / replace: read and write a span chosen by the range resolver

use crate::byte_string::{ByteRange, ByteString};
use crate::error::{SpliceError, SpliceResult};
use crate::option::SpliceOption;
use crate::pattern::PatternLike;
use crate::range::{IndexArg, normalize_offset, resolve};

/// Bytes selected by `arg`, or `None` when resolution fails.
pub fn slice(subject: &[u8], arg: &IndexArg<'_>) -> SpliceResult<Option<ByteString>> {
    Ok(resolve(subject, arg)?.map(|span| ByteString::from(span.of(subject))))
}

/// Splice `content` in place of the span selected by `arg`.
///
/// Fails with ImmutableValue on a frozen subject and with IndexOutOfRange when
/// the argument selects nothing.
pub fn replace_range(
    subject: &mut ByteString,
    arg: &IndexArg<'_>,
    content: &[u8],
) -> SpliceResult<()> {
    replace_range_with_option(subject, arg, content, &SpliceOption::default())
}

pub fn replace_range_with_option(
    subject: &mut ByteString,
    arg: &IndexArg<'_>,
    content: &[u8],
    option: &SpliceOption,
) -> SpliceResult<()> {
    subject.check_mutable()?;
    let Some(span) = resolve(subject, arg)? else {
        return Err(out_of_range(arg));
    };
    option.check_size(subject.len() - span.len() + content.len())?;
    subject.splice(span, content)
}

fn out_of_range(arg: &IndexArg<'_>) -> SpliceError {
    match *arg {
        IndexArg::Index(i) | IndexArg::IndexLen(i, _) => SpliceError::index_out_of_string(i),
        IndexArg::Range(r) => SpliceError::IndexOutOfRange(format!("{r} out of range")),
        IndexArg::Pattern(_) => SpliceError::IndexOutOfRange("string not matched".to_string()),
    }
}

/// Byte offset of the first match at or after `start` (negative counts from
/// the end). `None` when the start is out of range or nothing matches.
pub fn index<P: PatternLike + ?Sized>(
    subject: &[u8],
    pattern: &P,
    start: i64,
) -> SpliceResult<Option<usize>> {
    let Some(start) = normalize_offset(start, subject.len()) else {
        return Ok(None);
    };
    Ok(pattern.locate(subject, start)?.map(|m| m.span.begin))
}

/// Like `index`, but returns the whole matched span.
pub fn find<P: PatternLike + ?Sized>(
    subject: &[u8],
    pattern: &P,
    start: i64,
) -> SpliceResult<Option<ByteRange>> {
    let Some(start) = normalize_offset(start, subject.len()) else {
        return Ok(None);
    };
    Ok(pattern.locate(subject, start)?.map(|m| m.span))
}
