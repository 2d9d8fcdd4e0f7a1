// Owned byte strings and half-open byte spans
//
// Every offset handled by the engine is a byte offset. A ByteString may be
// frozen, after which every in-place operation fails with ImmutableValue.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;

use crate::error::{SpliceError, SpliceResult};

/// Half-open span `[begin, end)` inside a byte buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ByteRange {
    pub begin: usize,
    pub end: usize,
}

impl ByteRange {
    #[inline]
    pub const fn new(begin: usize, end: usize) -> Self {
        debug_assert!(begin <= end);
        Self { begin, end }
    }

    /// Zero-width span at `at`.
    #[inline]
    pub const fn empty(at: usize) -> Self {
        Self { begin: at, end: at }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.end - self.begin
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    #[inline]
    pub fn of<'a>(&self, bytes: &'a [u8]) -> &'a [u8] {
        &bytes[self.begin..self.end]
    }
}

/// Owned, byte-indexed string with a frozen flag.
///
/// Equality, ordering and hashing look at the bytes only.
#[derive(Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ByteString {
    bytes: Vec<u8>,
    #[cfg_attr(feature = "serde", serde(default))]
    frozen: bool,
}

impl ByteString {
    pub const fn new() -> Self {
        Self {
            bytes: Vec::new(),
            frozen: false,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            frozen: false,
        }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Lossy UTF-8 view, for display and assertions.
    pub fn to_str_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    /// Marks the string immutable. There is no way back.
    pub fn freeze(&mut self) -> &mut Self {
        self.frozen = true;
        self
    }

    #[must_use]
    pub fn frozen(mut self) -> Self {
        self.frozen = true;
        self
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Fails with ImmutableValue when the string is frozen.
    #[inline]
    pub fn check_mutable(&self) -> SpliceResult<()> {
        if self.frozen {
            return Err(SpliceError::ImmutableValue);
        }
        Ok(())
    }

    /// Replaces the whole contents in one step.
    pub fn replace(&mut self, bytes: Vec<u8>) -> SpliceResult<()> {
        self.check_mutable()?;
        self.bytes = bytes;
        Ok(())
    }

    /// Replaces `span` with `content`, growing or shrinking the buffer.
    pub(crate) fn splice(&mut self, span: ByteRange, content: &[u8]) -> SpliceResult<()> {
        self.check_mutable()?;
        self.bytes.splice(span.begin..span.end, content.iter().copied());
        Ok(())
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) -> SpliceResult<()> {
        self.check_mutable()?;
        self.bytes.extend_from_slice(bytes);
        Ok(())
    }
}

impl Deref for ByteString {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsRef<[u8]> for ByteString {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Vec<u8>> for ByteString {
    fn from(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            frozen: false,
        }
    }
}

impl From<&[u8]> for ByteString {
    fn from(bytes: &[u8]) -> Self {
        Self::from(bytes.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for ByteString {
    fn from(bytes: &[u8; N]) -> Self {
        Self::from(bytes.to_vec())
    }
}

impl From<&str> for ByteString {
    fn from(s: &str) -> Self {
        Self::from(s.as_bytes().to_vec())
    }
}

impl From<String> for ByteString {
    fn from(s: String) -> Self {
        Self::from(s.into_bytes())
    }
}

impl PartialEq for ByteString {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for ByteString {}

impl Hash for ByteString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl PartialOrd for ByteString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ByteString {
    fn cmp(&self, other: &Self) -> Ordering {
        self.bytes.cmp(&other.bytes)
    }
}

impl PartialEq<str> for ByteString {
    fn eq(&self, other: &str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<&str> for ByteString {
    fn eq(&self, other: &&str) -> bool {
        self.bytes == other.as_bytes()
    }
}

impl PartialEq<[u8]> for ByteString {
    fn eq(&self, other: &[u8]) -> bool {
        self.bytes == other
    }
}

impl fmt::Display for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_str_lossy())
    }
}

impl fmt::Debug for ByteString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.to_str_lossy())?;
        if self.frozen {
            f.write_str(" (frozen)")?;
        }
        Ok(())
    }
}
