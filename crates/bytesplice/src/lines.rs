// Line and byte iteration
//
// A line is `[cursor, match_end)`: the separator stays attached to the line it
// terminates. The empty separator selects paragraph mode, where the
// separator is a blank line and any further newlines are folded into the
// paragraph before them.

use crate::byte_string::ByteString;
use crate::error::SpliceResult;
use crate::limits::PARAGRAPH_SEPARATOR;
use crate::pattern::{PatternLike, locate_advancing};

/// Push every line of `subject` to `emit`.
///
/// With no separator the whole subject is one line.
pub fn each_line<P, F>(subject: &[u8], separator: Option<&P>, mut emit: F) -> SpliceResult<()>
where
    P: PatternLike + ?Sized,
    F: FnMut(&[u8]),
{
    let Some(separator) = separator else {
        emit(subject);
        return Ok(());
    };
    if separator.is_empty_pattern() {
        tracing::trace!(len = subject.len(), "each_line, paragraph mode");
        scan_lines(subject, PARAGRAPH_SEPARATOR, true, &mut emit)
    } else {
        tracing::trace!(len = subject.len(), "each_line");
        scan_lines(subject, separator, false, &mut emit)
    }
}

/// Collected form of `each_line`.
pub fn lines<P: PatternLike + ?Sized>(
    subject: &[u8],
    separator: Option<&P>,
) -> SpliceResult<Vec<ByteString>> {
    let mut out = Vec::new();
    each_line(subject, separator, |line| out.push(ByteString::from(line)))?;
    Ok(out)
}

fn scan_lines<P, F>(subject: &[u8], separator: &P, paragraph: bool, emit: &mut F) -> SpliceResult<()>
where
    P: PatternLike + ?Sized,
    F: FnMut(&[u8]),
{
    let len = subject.len();
    let mut start = 0;
    while let Some(m) = locate_advancing(separator, subject, start)? {
        let mut end = m.span.end;
        if paragraph {
            while end < len && subject[end] == b'\n' {
                end += 1;
            }
        }
        emit(&subject[start..end]);
        start = end;
    }
    if start < len {
        emit(&subject[start..]);
    }
    Ok(())
}

/// Push every byte of `subject` to `emit`, in order.
pub fn each_byte<F: FnMut(u8)>(subject: &[u8], mut emit: F) {
    for &b in subject {
        emit(b);
    }
}

/// Collected form of `each_byte`.
pub fn bytes(subject: &[u8]) -> Vec<u8> {
    subject.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::DEFAULT_LINE_SEPARATOR;

    fn collect(subject: &str, separator: Option<&str>) -> Vec<String> {
        lines(subject.as_bytes(), separator)
            .unwrap()
            .iter()
            .map(|l| l.to_string())
            .collect()
    }

    #[test]
    fn test_lines_keep_their_separator() {
        assert_eq!(collect("a\nb\nc", Some("\n")), ["a\n", "b\n", "c"]);
        assert_eq!(collect("a\nb\n", Some("\n")), ["a\n", "b\n"]);
        assert_eq!(collect("a--b", Some("--")), ["a--", "b"]);
    }

    #[test]
    fn test_no_separator_occurrence_emits_whole_subject() {
        assert_eq!(collect("abc", Some("\n")), ["abc"]);
        assert!(collect("", Some("\n")).is_empty());
    }

    #[test]
    fn test_nil_separator() {
        assert_eq!(collect("a\nb", None), ["a\nb"]);
    }

    #[test]
    fn test_paragraph_mode() {
        assert_eq!(
            collect("p1\nstill p1\n\n\n\np2\n\np3", Some("")),
            ["p1\nstill p1\n\n\n\n", "p2\n\n", "p3"]
        );
    }

    #[test]
    fn test_default_separator_constant() {
        let got = lines(b"x\ny", Some(DEFAULT_LINE_SEPARATOR)).unwrap();
        assert_eq!(got, [ByteString::from("x\n"), ByteString::from("y")]);
    }

    #[test]
    fn test_each_byte() {
        let mut seen = Vec::new();
        each_byte(b"ab\xff", |b| seen.push(b));
        assert_eq!(seen, [b'a', b'b', 0xff]);
        assert_eq!(bytes(b"hi"), b"hi".to_vec());
    }
}
