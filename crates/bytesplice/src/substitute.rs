// Substitution engine: sub / gsub and their in-place variants
//
// The scan copies the gap before each match verbatim, then the replacement.
// A zero-width match also copies the single byte after it, so the next probe
// starts strictly further on. The in-place variants compute the whole result
// first and only then swap it into the subject.

use std::iter::FusedIterator;

use crate::byte_string::ByteString;
use crate::error::SpliceResult;
use crate::limits::MAX_BACKREFS;
use crate::option::SpliceOption;
use crate::pattern::{Match, PatternLike};

/// What a match is replaced with.
pub enum Replacement<'a> {
    /// Replacement text; backslash escapes are expanded per match.
    Literal(&'a [u8]),
    /// Called with the matched bytes; its result is inserted as-is.
    Callback(&'a mut dyn FnMut(&[u8]) -> SpliceResult<Vec<u8>>),
}

impl<'a> From<&'a [u8]> for Replacement<'a> {
    fn from(text: &'a [u8]) -> Self {
        Replacement::Literal(text)
    }
}

impl<'a> From<&'a str> for Replacement<'a> {
    fn from(text: &'a str) -> Self {
        Replacement::Literal(text.as_bytes())
    }
}

/// Replace the first match of `pattern`.
pub fn sub<'r, P: PatternLike + ?Sized>(
    subject: &[u8],
    pattern: &P,
    replacement: impl Into<Replacement<'r>>,
) -> SpliceResult<ByteString> {
    let option = SpliceOption::default();
    let (out, _) = sub_or_gsub(subject, pattern, replacement.into(), false, &option)?;
    Ok(out)
}

/// Replace every match of `pattern`.
pub fn gsub<'r, P: PatternLike + ?Sized>(
    subject: &[u8],
    pattern: &P,
    replacement: impl Into<Replacement<'r>>,
) -> SpliceResult<ByteString> {
    let option = SpliceOption::default();
    let (out, _) = sub_or_gsub(subject, pattern, replacement.into(), true, &option)?;
    Ok(out)
}

/// In-place `sub`. `Ok(None)` when nothing matched and the subject is untouched.
pub fn sub_in_place<'r, P: PatternLike + ?Sized>(
    subject: &mut ByteString,
    pattern: &P,
    replacement: impl Into<Replacement<'r>>,
) -> SpliceResult<Option<usize>> {
    let option = SpliceOption::default();
    sub_or_gsub_in_place(subject, pattern, replacement.into(), false, &option)
}

/// In-place `gsub`. Returns the number of replacements made, or `Ok(None)`.
pub fn gsub_in_place<'r, P: PatternLike + ?Sized>(
    subject: &mut ByteString,
    pattern: &P,
    replacement: impl Into<Replacement<'r>>,
) -> SpliceResult<Option<usize>> {
    let option = SpliceOption::default();
    sub_or_gsub_in_place(subject, pattern, replacement.into(), true, &option)
}

/// Core scan shared by every substitution entry point.
///
/// Returns the rewritten bytes and the number of matches replaced.
pub fn sub_or_gsub<P: PatternLike + ?Sized>(
    subject: &[u8],
    pattern: &P,
    mut replacement: Replacement<'_>,
    global: bool,
    option: &SpliceOption,
) -> SpliceResult<(ByteString, usize)> {
    let len = subject.len();
    tracing::trace!(len, global, "substitute");

    let mut out = Vec::with_capacity(len);
    let mut offset = 0;
    let mut count = 0;

    while let Some(m) = pattern.locate(subject, offset)? {
        out.extend_from_slice(&subject[offset..m.span.begin]);
        match &mut replacement {
            Replacement::Literal(text) => expand_backrefs(text, subject, &m, &mut out),
            Replacement::Callback(f) => out.extend_from_slice(&(*f)(m.span.of(subject))?),
        }
        option.check_size(out.len())?;
        count += 1;
        offset = m.span.end;

        if m.span.is_empty() {
            if offset >= len {
                break;
            }
            out.push(subject[offset]);
            offset += 1;
        }
        if !global {
            break;
        }
    }

    out.extend_from_slice(&subject[offset..]);
    option.check_size(out.len())?;
    Ok((ByteString::from(out), count))
}

/// In-place core. Fails on a frozen subject before scanning.
pub fn sub_or_gsub_in_place<P: PatternLike + ?Sized>(
    subject: &mut ByteString,
    pattern: &P,
    replacement: Replacement<'_>,
    global: bool,
    option: &SpliceOption,
) -> SpliceResult<Option<usize>> {
    subject.check_mutable()?;
    let (out, count) = sub_or_gsub(subject, pattern, replacement, global, option)?;
    if count == 0 {
        tracing::debug!(global, "no match, subject left unchanged");
        return Ok(None);
    }
    tracing::debug!(global, count, new_len = out.len(), "subject rewritten");
    subject.replace(out.into_bytes())?;
    Ok(Some(count))
}

/// Append `template` to `out`, expanding backslash escapes against `m`.
///
/// `\\` backslash, `` \` `` prefix, `\&` and `\0` the match, `\'` suffix,
/// `\1`..`\9` capture groups (empty when the pattern has no such group).
/// Other escapes, and a trailing lone backslash, are copied literally.
pub fn expand_backrefs(template: &[u8], subject: &[u8], m: &Match, out: &mut Vec<u8>) {
    let mut rest = template;
    while let Some(pos) = rest.iter().position(|&c| c == b'\\') {
        out.extend_from_slice(&rest[..pos]);
        let Some(&esc) = rest.get(pos + 1) else {
            out.push(b'\\');
            return;
        };
        match esc {
            b'\\' => out.push(b'\\'),
            b'`' => out.extend_from_slice(&subject[..m.span.begin]),
            b'&' | b'0' => out.extend_from_slice(m.span.of(subject)),
            b'\'' => out.extend_from_slice(&subject[m.span.end..]),
            d if d.is_ascii_digit() && usize::from(d - b'0') <= MAX_BACKREFS => {
                if let Some(group) = m.group(usize::from(d - b'0')) {
                    out.extend_from_slice(group.of(subject));
                }
            }
            _ => out.extend_from_slice(&[b'\\', esc]),
        }
        rest = &rest[pos + 2..];
    }
    out.extend_from_slice(rest);
}

/// Lazy sequence of successive matches, advancing like `gsub` does.
pub fn matches<'s, P: PatternLike + ?Sized>(subject: &'s [u8], pattern: &'s P) -> Matches<'s, P> {
    Matches {
        subject,
        pattern,
        offset: 0,
        done: false,
    }
}

pub struct Matches<'s, P: ?Sized> {
    subject: &'s [u8],
    pattern: &'s P,
    offset: usize,
    done: bool,
}

impl<P: PatternLike + ?Sized> Matches<'_, P> {
    /// Rewind to the start of the subject.
    pub fn restart(&mut self) {
        self.offset = 0;
        self.done = false;
    }
}

impl<P: ?Sized> Clone for Matches<'_, P> {
    fn clone(&self) -> Self {
        Self {
            subject: self.subject,
            pattern: self.pattern,
            offset: self.offset,
            done: self.done,
        }
    }
}

impl<P: PatternLike + ?Sized> Iterator for Matches<'_, P> {
    type Item = SpliceResult<Match>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let m = match self.pattern.locate(self.subject, self.offset) {
            Ok(Some(m)) => m,
            Ok(None) => {
                self.done = true;
                return None;
            }
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };
        self.offset = m.span.end;
        if m.span.is_empty() {
            if self.offset >= self.subject.len() {
                self.done = true;
            } else {
                self.offset += 1;
            }
        }
        Some(Ok(m))
    }
}

impl<P: PatternLike + ?Sized> FusedIterator for Matches<'_, P> {}
