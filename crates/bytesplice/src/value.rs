// Dynamic values passed to and returned from the method table
//
// Conversions mirror the implicit coercions of a dynamic string library:
// `to_str` only accepts strings, `to_int` accepts integers and integral
// floats, `to_s` renders anything for display.

use std::fmt;

use crate::byte_string::ByteString;
use crate::error::{SpliceError, SpliceResult};
use crate::pattern::{LuaPattern, PatternLike};
use crate::range::RangeArg;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(ByteString),
    Range(RangeArg),
    Pattern(LuaPattern),
    Array(Vec<Value>),
}

impl Value {
    /// Class-like name used in conversion errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(true) => "true",
            Value::Bool(false) => "false",
            Value::Int(_) => "Integer",
            Value::Float(_) => "Float",
            Value::Str(_) => "String",
            Value::Range(_) => "Range",
            Value::Pattern(_) => "Pattern",
            Value::Array(_) => "Array",
        }
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_str(&self) -> Option<&ByteString> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Strings and engine patterns both satisfy the pattern capability.
    pub fn as_pattern(&self) -> Option<&dyn PatternLike> {
        match self {
            Value::Str(s) => Some(s),
            Value::Pattern(p) => Some(p),
            _ => None,
        }
    }

    /// Implicit string conversion.
    pub fn to_str(&self) -> SpliceResult<&ByteString> {
        self.as_str()
            .ok_or_else(|| SpliceError::no_implicit_conversion(self.type_name(), "String"))
    }

    /// Implicit integer conversion. Floats must be integral.
    pub fn to_int(&self) -> SpliceResult<i64> {
        match *self {
            Value::Int(i) => Ok(i),
            Value::Float(f) => {
                if f == f.floor() && f.is_finite() && f >= (i64::MIN as f64) && f < (i64::MAX as f64) {
                    Ok(f as i64)
                } else {
                    Err(SpliceError::TypeMismatch(
                        "number has no integer representation".to_string(),
                    ))
                }
            }
            _ => Err(SpliceError::no_implicit_conversion(self.type_name(), "Integer")),
        }
    }

    /// Display conversion, never fails.
    pub fn to_s(&self) -> ByteString {
        match self {
            Value::Nil => ByteString::new(),
            Value::Int(i) => {
                let mut buf = itoa::Buffer::new();
                ByteString::from(buf.format(*i))
            }
            Value::Str(s) => ByteString::from(s.as_bytes()),
            Value::Pattern(p) => ByteString::from(p.source()),
            other => ByteString::from(other.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => f.write_str(itoa::Buffer::new().format(*i)),
            Value::Float(x) => {
                if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 {
                    write!(f, "{x:.1}")
                } else {
                    write!(f, "{x}")
                }
            }
            Value::Str(s) => write!(f, "{s}"),
            Value::Range(r) => write!(f, "{r}"),
            Value::Pattern(p) => write!(f, "{}", String::from_utf8_lossy(p.source())),
            Value::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    match item {
                        Value::Str(s) => write!(f, "{s:?}")?,
                        Value::Nil => f.write_str("nil")?,
                        other => write!(f, "{other}")?,
                    }
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<usize> for Value {
    fn from(i: usize) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(ByteString::from(s))
    }
}

impl From<&[u8]> for Value {
    fn from(s: &[u8]) -> Self {
        Value::Str(ByteString::from(s))
    }
}

impl From<ByteString> for Value {
    fn from(s: ByteString) -> Self {
        Value::Str(s)
    }
}

impl From<RangeArg> for Value {
    fn from(r: RangeArg) -> Self {
        Value::Range(r)
    }
}

impl From<LuaPattern> for Value {
    fn from(p: LuaPattern) -> Self {
        Value::Pattern(p)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Nil, Into::into)
    }
}
