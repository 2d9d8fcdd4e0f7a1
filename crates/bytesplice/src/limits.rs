//! Centralized engine limits and constants.
//!
//! All magic numbers that control engine behavior are collected here
//! for easy tuning, the way a VM keeps its `luaconf.h` knobs together.

// ===== Patterns =====

/// Maximum number of captures an engine pattern may record.
pub const MAX_CAPTURES: usize = 32;

/// Recursion limit of the pattern engine's backtracking matcher.
pub const MAXCCALLS_PATTERN: usize = 200;

/// Matcher steps one search may take across all start positions.
pub const MAX_PATTERN_STEPS: usize = 10_000_000;

/// Numbered backreferences `\1`..`\9` in replacement text.
pub const MAX_BACKREFS: usize = 9;

// ===== Strings =====

/// Default upper bound on the size of any string the engine produces.
pub const MAX_STRING_SIZE: usize = 1 << 30;

// ===== Lines =====

/// Separator used by line iteration when the caller gives none.
pub const DEFAULT_LINE_SEPARATOR: &[u8] = b"\n";

/// Effective separator in paragraph mode (empty separator).
pub const PARAGRAPH_SEPARATOR: &[u8] = b"\n\n";
