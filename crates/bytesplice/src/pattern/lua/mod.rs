// Byte-oriented pattern engine in the Lua pattern dialect
//
// 1. No AST: the pattern is validated once, then interpreted directly
// 2. Fixed-size capture array, no heap allocation while matching
// 3. Recursion depth is capped per pattern
//
// LuaPattern is the full engine that can stand in wherever a literal works:
// split, sub/gsub, each_line and the range resolver all accept it.

mod class;
mod engine;

use crate::error::{SpliceError, SpliceResult};
use crate::limits::MAXCCALLS_PATTERN;
use crate::option::SpliceOption;
use crate::pattern::{Match, PatternLike};

/// A validated engine pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuaPattern {
    source: Vec<u8>,
    anchored: bool,
    max_depth: usize,
}

impl LuaPattern {
    pub fn new(source: impl AsRef<[u8]>) -> SpliceResult<Self> {
        Self::build(source.as_ref(), MAXCCALLS_PATTERN)
    }

    pub fn with_option(source: impl AsRef<[u8]>, option: &SpliceOption) -> SpliceResult<Self> {
        Self::build(source.as_ref(), option.max_pattern_depth)
    }

    fn build(source: &[u8], max_depth: usize) -> SpliceResult<Self> {
        let anchored = source.first() == Some(&b'^');
        let body = if anchored { &source[1..] } else { source };
        if let Err(msg) = engine::validate_pattern(body) {
            tracing::debug!(pattern = %String::from_utf8_lossy(source), %msg, "rejected pattern");
            return Err(SpliceError::Pattern(msg));
        }
        Ok(Self {
            source: source.to_vec(),
            anchored,
            max_depth,
        })
    }

    /// The pattern text as given, including any leading `^`.
    pub fn source(&self) -> &[u8] {
        &self.source
    }

    pub fn is_anchored(&self) -> bool {
        self.anchored
    }

    fn body(&self) -> &[u8] {
        if self.anchored {
            &self.source[1..]
        } else {
            &self.source
        }
    }
}

impl PatternLike for LuaPattern {
    fn locate(&self, haystack: &[u8], start: usize) -> SpliceResult<Option<Match>> {
        // `^` pins the match to the start of the subject, not to the probe
        if self.anchored && start > 0 {
            return Ok(None);
        }
        engine::find_at(haystack, self.body(), self.anchored, start, self.max_depth)
            .map_err(SpliceError::Pattern)
    }

    fn is_empty_pattern(&self) -> bool {
        self.source.is_empty()
    }
}
