// Split engine
//
// Two scanning modes share one cursor `beg` over `[0, term)`:
//
// - whitespace mode (no pattern, or the single-space literal): runs of
//   whitespace separate fields and leading whitespace never yields a field;
// - pattern mode: every match of the pattern is a delimiter. Adjacent
//   delimiters produce blank fields, which are held back in a counter until a
//   non-blank field arrives, so trailing blanks can be dropped.
//
// Limit semantics: omitted (or 0) drops trailing blank fields; positive caps
// the number of fields, the last one holding the unsplit remainder; negative
// keeps every field including trailing blanks. A limit of 1 yields the whole
// subject untouched.

use crate::byte_string::ByteString;
use crate::error::SpliceResult;
use crate::pattern::whitespace::{search_whitespace, skip_whitespace};
use crate::pattern::{PatternLike, locate_advancing};

/// Split `subject` and collect the fields.
pub fn split<P: PatternLike + ?Sized>(
    subject: &[u8],
    pattern: Option<&P>,
    limit: Option<i64>,
) -> SpliceResult<Vec<ByteString>> {
    let mut fields = Vec::new();
    split_with(subject, pattern, limit, |field| {
        fields.push(ByteString::from(field));
    })?;
    Ok(fields)
}

/// Whitespace-mode split, collected.
pub fn split_whitespace(subject: &[u8], limit: Option<i64>) -> Vec<ByteString> {
    let mut fields = Vec::new();
    split_whitespace_with(subject, limit, |field| fields.push(ByteString::from(field)));
    fields
}

/// Whitespace-mode split, pushing each field to `emit`.
pub fn split_whitespace_with<F: FnMut(&[u8])>(subject: &[u8], limit: Option<i64>, mut emit: F) {
    let limit = limit.filter(|&l| l != 0);
    tracing::trace!(len = subject.len(), ?limit, "split on whitespace");
    if limit == Some(1) {
        if !subject.is_empty() {
            emit(subject);
        }
        return;
    }
    split_on_whitespace(subject, limit, &mut emit);
}

/// Split `subject`, pushing each field to `emit` in order.
pub fn split_with<P, F>(
    subject: &[u8],
    pattern: Option<&P>,
    limit: Option<i64>,
    mut emit: F,
) -> SpliceResult<()>
where
    P: PatternLike + ?Sized,
    F: FnMut(&[u8]),
{
    let limit = limit.filter(|&l| l != 0);
    tracing::trace!(len = subject.len(), ?limit, "split");

    if limit == Some(1) {
        if !subject.is_empty() {
            emit(subject);
        }
        return Ok(());
    }

    match pattern {
        Some(pattern) if !matches!(pattern.as_literal(), Some(b" ")) => {
            split_on_pattern(subject, pattern, limit, &mut emit)
        }
        _ => {
            split_on_whitespace(subject, limit, &mut emit);
            Ok(())
        }
    }
}

fn split_on_whitespace<F: FnMut(&[u8])>(subject: &[u8], limit: Option<i64>, emit: &mut F) {
    let term = subject.len();
    let mut remaining = limit.filter(|&l| l > 0);
    let mut beg = 0;

    loop {
        let Some(pre) = skip_whitespace(subject, beg) else {
            // trailing whitespace after a field forms one empty field under a limit
            if limit.is_some() && beg > 0 && beg < term {
                emit(b"");
            }
            return;
        };
        let post = search_whitespace(subject, pre).unwrap_or(term);
        emit(&subject[pre..post]);
        beg = post;

        if let Some(n) = remaining.as_mut() {
            *n -= 1;
            if *n <= 1 {
                if beg < term {
                    let tail = skip_whitespace(subject, beg).unwrap_or(term);
                    emit(&subject[tail..]);
                }
                return;
            }
        }
    }
}

fn split_on_pattern<P, F>(
    subject: &[u8],
    pattern: &P,
    limit: Option<i64>,
    emit: &mut F,
) -> SpliceResult<()>
where
    P: PatternLike + ?Sized,
    F: FnMut(&[u8]),
{
    let term = subject.len();
    let mut remaining = limit.filter(|&l| l > 0);
    let mut beg = 0;
    let mut blanks = 0usize;
    let mut exhausted = false;

    loop {
        let Some(m) = locate_advancing(pattern, subject, beg)? else {
            if beg < term {
                // no delimiter left: the rest is the last field
                flush_blanks(&mut blanks, emit);
                emit(&subject[beg..]);
                beg = term;
            }
            break;
        };
        let (pre, post) = (m.span.begin, m.span.end);

        if pre == beg {
            blanks += 1;
        } else {
            flush_blanks(&mut blanks, emit);
            emit(&subject[beg..pre]);
        }
        beg = post;

        if let Some(n) = remaining.as_mut() {
            *n -= 1;
            if *n <= 1 {
                exhausted = true;
                break;
            }
        }

        // a delimiter that ends the subject leaves an empty field behind it
        if post == term {
            blanks += 1;
        }
    }

    if exhausted {
        flush_blanks(&mut blanks, emit);
        emit(&subject[beg..]);
    } else if limit.is_some() {
        flush_blanks(&mut blanks, emit);
        if beg < term {
            emit(&subject[beg..]);
        }
    }
    Ok(())
}

#[inline]
fn flush_blanks<F: FnMut(&[u8])>(blanks: &mut usize, emit: &mut F) {
    for _ in 0..*blanks {
        emit(b"");
    }
    *blanks = 0;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(subject: &str, pattern: Option<&str>, limit: Option<i64>) -> Vec<String> {
        split(subject.as_bytes(), pattern, limit)
            .unwrap()
            .iter()
            .map(|f| f.to_string())
            .collect()
    }

    #[test]
    fn test_whitespace_mode() {
        assert_eq!(fields("  now's  the time", None, None), ["now's", "the", "time"]);
        assert_eq!(fields(" now's  the time", Some(" "), None), ["now's", "the", "time"]);
        assert_eq!(fields("a\tb\nc\x0bd", None, None), ["a", "b", "c", "d"]);
        assert!(fields("   ", None, None).is_empty());
        assert!(fields("", None, None).is_empty());
    }

    #[test]
    fn test_whitespace_mode_with_limit() {
        assert_eq!(fields("a b c", None, Some(2)), ["a", "b c"]);
        assert_eq!(fields("a  b c  ", None, Some(3)), ["a", "b", "c  "]);
        assert_eq!(fields("a ", None, Some(2)), ["a", ""]);
        assert_eq!(fields("a", None, Some(2)), ["a"]);
        assert_eq!(fields("a b ", None, Some(-1)), ["a", "b", ""]);
        assert_eq!(fields("a b", None, Some(-1)), ["a", "b"]);
    }

    #[test]
    fn test_all_whitespace_with_limit_is_empty() {
        assert!(split_whitespace(b"   ", Some(-1)).is_empty());
        assert!(split_whitespace(b"   ", Some(3)).is_empty());
        assert!(split_whitespace(b"", Some(-1)).is_empty());
        assert!(fields(" \t\n", Some(" "), Some(2)).is_empty());
        assert_eq!(fields(" a", None, Some(-1)), ["a"]);
    }

    #[test]
    fn test_pattern_mode() {
        assert_eq!(fields("mellow yellow", Some("ello"), None), ["m", "w y", "w"]);
        assert_eq!(fields("1,2,,3,4,,", Some(","), None), ["1", "2", "", "3", "4"]);
        assert_eq!(fields(",a", Some(","), None), ["", "a"]);
        assert!(fields(",,,", Some(","), None).is_empty());
    }

    #[test]
    fn test_pattern_mode_with_limit() {
        assert_eq!(fields("1,2,,3,4,,", Some(","), Some(4)), ["1", "2", "", "3,4,,"]);
        assert_eq!(
            fields("1,2,,3,4,,", Some(","), Some(-4)),
            ["1", "2", "", "3", "4", "", ""]
        );
        assert_eq!(fields("a,", Some(","), Some(2)), ["a", ""]);
        assert_eq!(fields("a", Some(","), Some(2)), ["a"]);
        assert_eq!(fields(",", Some(","), Some(2)), ["", ""]);
        assert_eq!(fields("a,b", Some(","), Some(-1)), ["a", "b"]);
    }

    #[test]
    fn test_empty_pattern_splits_bytes() {
        assert_eq!(fields("abc", Some(""), None), ["a", "b", "c"]);
        assert_eq!(fields("abc", Some(""), Some(-1)), ["a", "b", "c", ""]);
        assert_eq!(fields("abc", Some(""), Some(2)), ["a", "bc"]);
    }

    #[test]
    fn test_limit_one_and_zero() {
        assert_eq!(fields("a,b,c", Some(","), Some(1)), ["a,b,c"]);
        assert!(fields("", Some(","), Some(1)).is_empty());
        assert_eq!(fields("a,b,,", Some(","), Some(0)), ["a", "b"]);
    }

    #[test]
    fn test_streaming_sink_sees_fields_in_order() {
        let mut seen = Vec::new();
        split_with(b"x-y-z", Some("-"), None, |f| seen.push(f.to_vec())).unwrap();
        assert_eq!(seen, [b"x".to_vec(), b"y".to_vec(), b"z".to_vec()]);
    }

    #[test]
    fn test_split_whitespace_helper() {
        let got = split_whitespace(b" a  b ", None);
        assert_eq!(got, [ByteString::from("a"), ByteString::from("b")]);
    }
}
