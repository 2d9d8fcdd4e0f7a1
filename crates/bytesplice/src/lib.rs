// Byte-oriented string engine
// Slicing, splitting, substitution and line iteration over raw byte buffers,
// driven by a pluggable pattern capability

#[cfg(test)]
mod test;

pub mod byte_string;
pub mod error;
pub mod lib_registry;
pub mod limits;
pub mod lines;
pub mod option;
pub mod pattern;
pub mod range;
pub mod slice;
pub mod split;
pub mod string_lib;
pub mod substitute;
pub mod value;

pub use byte_string::{ByteRange, ByteString};
pub use error::{SpliceError, SpliceResult};
pub use lib_registry::{Block, CallContext, MethodModule, StringLib};
pub use lines::{bytes, each_byte, each_line, lines};
pub use option::SpliceOption;
pub use pattern::{Captures, LuaPattern, Match, PatternLike};
pub use range::{IndexArg, RangeArg, resolve};
pub use slice::{find, index, replace_range, replace_range_with_option, slice};
pub use split::{split, split_whitespace, split_whitespace_with, split_with};
pub use substitute::{
    Matches, Replacement, expand_backrefs, gsub, gsub_in_place, matches, sub, sub_in_place,
    sub_or_gsub, sub_or_gsub_in_place,
};
pub use value::Value;
