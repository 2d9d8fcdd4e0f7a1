// Error kinds surfaced by the engine
//
// Every failure stems from a caller-supplied argument, so nothing here is
// retried or swallowed internally. "Found nothing" is not an error: those
// paths return `None`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpliceError {
    /// Argument does not satisfy the required capability or conversion
    #[error("{0}")]
    TypeMismatch(String),
    /// Wrong number of positional arguments
    #[error("wrong number of arguments (given {given}, expected {expected})")]
    ArgumentCount { given: usize, expected: &'static str },
    /// An in-place range replacement resolved to an invalid span
    #[error("{0}")]
    IndexOutOfRange(String),
    /// In-place mutation of a frozen string
    #[error("can't modify frozen String")]
    ImmutableValue,
    /// Malformed or too complex engine pattern
    #[error("invalid pattern: {0}")]
    Pattern(String),
    /// A produced string would exceed the configured maximum size
    #[error("resulting string too large ({size} > {max})")]
    ResultTooLarge { size: usize, max: usize },
    /// Dispatch to a name the method table does not know
    #[error("undefined method '{0}' for String")]
    NoMethod(String),
}

pub type SpliceResult<T> = Result<T, SpliceError>;

impl SpliceError {
    pub(crate) fn no_implicit_conversion(from: &str, into: &str) -> Self {
        SpliceError::TypeMismatch(format!("no implicit conversion of {from} into {into}"))
    }

    pub(crate) fn index_out_of_string(index: i64) -> Self {
        SpliceError::IndexOutOfRange(format!("index {index} out of string"))
    }

    /// Checks an argument count against an inclusive range.
    pub(crate) fn check_arity(
        given: usize,
        min: usize,
        max: usize,
        expected: &'static str,
    ) -> SpliceResult<()> {
        if given < min || given > max {
            return Err(SpliceError::ArgumentCount { given, expected });
        }
        Ok(())
    }
}
