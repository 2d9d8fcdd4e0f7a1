use crate::limits::{MAX_STRING_SIZE, MAXCCALLS_PATTERN};

/// Tunable limits for a `StringLib` dispatcher and engine patterns.
#[derive(Debug, Clone)]
pub struct SpliceOption {
    /// Largest string substitution or range replacement may produce
    pub max_string_size: usize,
    /// Recursion limit handed to `LuaPattern`
    pub max_pattern_depth: usize,
}

impl Default for SpliceOption {
    fn default() -> Self {
        Self {
            max_string_size: MAX_STRING_SIZE,
            max_pattern_depth: MAXCCALLS_PATTERN,
        }
    }
}

impl SpliceOption {
    pub(crate) fn check_size(&self, size: usize) -> crate::SpliceResult<()> {
        if size > self.max_string_size {
            return Err(crate::SpliceError::ResultTooLarge {
                size,
                max: self.max_string_size,
            });
        }
        Ok(())
    }
}
