// String method library
// Implements: [], slice, []=, byteslice, index, split, sub, sub!, gsub, gsub!,
// each_line, each_byte
//
// Block-taking methods called without a block return an Array of what the
// block would have received.

use crate::byte_string::ByteString;
use crate::error::{SpliceError, SpliceResult};
use crate::lib_registry::{Block, CallContext, MethodModule};
use crate::limits::DEFAULT_LINE_SEPARATOR;
use crate::lines::{each_byte, each_line};
use crate::pattern::PatternLike;
use crate::range::IndexArg;
use crate::slice::{index, replace_range_with_option, slice};
use crate::split::split_with;
use crate::substitute::{Replacement, matches, sub_or_gsub, sub_or_gsub_in_place};
use crate::value::Value;

pub fn create_string_lib() -> MethodModule {
    crate::method_module!("String", {
        "[]" => string_slice,
        "slice" => string_slice,
        "[]=" => string_aset,
        "byteslice" => string_byteslice,
        "index" => string_index,
        "split" => string_split,
        "sub" => string_sub,
        "sub!" => string_sub_bang,
        "gsub" => string_gsub,
        "gsub!" => string_gsub_bang,
        "each_line" => string_each_line,
        "each_byte" => string_each_byte,
    })
}

fn pattern_arg(v: &Value) -> SpliceResult<&dyn PatternLike> {
    v.as_pattern().ok_or_else(|| {
        SpliceError::TypeMismatch(format!(
            "wrong argument type {} (expected Regexp)",
            v.type_name()
        ))
    })
}

/// Build an index argument from one or two positional values.
fn index_arg(args: &[Value]) -> SpliceResult<IndexArg<'_>> {
    match args {
        [start, len] => Ok(IndexArg::IndexLen(start.to_int()?, len.to_int()?)),
        [Value::Range(r)] => Ok(IndexArg::Range(*r)),
        [v @ (Value::Str(_) | Value::Pattern(_))] => Ok(IndexArg::Pattern(pattern_arg(v)?)),
        [v] => Ok(IndexArg::Index(v.to_int()?)),
        _ => Err(SpliceError::ArgumentCount {
            given: args.len(),
            expected: "1..2",
        }),
    }
}

/// Feed produced values to the block, or collect them when there is none.
///
/// The first block failure stops further calls and is returned once the
/// scan has finished.
fn yield_or_collect<F>(block: Option<&mut Block<'_>>, drive: F) -> SpliceResult<Option<Vec<Value>>>
where
    F: FnOnce(&mut dyn FnMut(Value)) -> SpliceResult<()>,
{
    match block {
        Some(block) => {
            let mut failure = None;
            drive(&mut |v: Value| {
                if failure.is_none()
                    && let Err(e) = block(v)
                {
                    failure = Some(e);
                }
            })?;
            failure.map_or(Ok(None), Err)
        }
        None => {
            let mut out = Vec::new();
            drive(&mut |v: Value| out.push(v))?;
            Ok(Some(out))
        }
    }
}

/// str[index], str[start, len], str[range], str[pattern]
fn string_slice(ctx: &mut CallContext<'_, '_>) -> SpliceResult<Value> {
    ctx.check_arity(1, 2, "1..2")?;
    let arg = index_arg(ctx.args())?;
    Ok(slice(ctx.subject.as_bytes(), &arg)?.into())
}

/// str[index] = s, str[start, len] = s, str[range] = s, str[pattern] = s
fn string_aset(ctx: &mut CallContext<'_, '_>) -> SpliceResult<Value> {
    ctx.check_arity(2, 3, "2..3")?;
    let args = ctx.args();
    let Some((content, selector)) = args.split_last() else {
        return Err(SpliceError::ArgumentCount {
            given: 0,
            expected: "2..3",
        });
    };
    let content = content.to_str()?;
    let arg = index_arg(selector)?;
    replace_range_with_option(&mut *ctx.subject, &arg, content, ctx.option)?;
    Ok(Value::Str(content.clone()))
}

/// byteslice(index), byteslice(start, len), byteslice(range)
fn string_byteslice(ctx: &mut CallContext<'_, '_>) -> SpliceResult<Value> {
    ctx.check_arity(1, 2, "1..2")?;
    let args = ctx.args();
    if let [v @ (Value::Str(_) | Value::Pattern(_))] = args {
        return Err(SpliceError::no_implicit_conversion(v.type_name(), "Integer"));
    }
    let arg = index_arg(args)?;
    Ok(slice(ctx.subject.as_bytes(), &arg)?.into())
}

/// index(pattern [, start])
fn string_index(ctx: &mut CallContext<'_, '_>) -> SpliceResult<Value> {
    ctx.check_arity(1, 2, "1..2")?;
    let args = ctx.args();
    let pattern = pattern_arg(&args[0])?;
    let start = args.get(1).map(Value::to_int).transpose()?.unwrap_or(0);
    Ok(index(ctx.subject.as_bytes(), pattern, start)?.into())
}

/// split([pattern [, limit]])
fn string_split(ctx: &mut CallContext<'_, '_>) -> SpliceResult<Value> {
    ctx.check_arity(0, 2, "0..2")?;
    let args = ctx.args();
    let pattern = match args.first() {
        None | Some(Value::Nil) => None,
        Some(v) => Some(pattern_arg(v)?),
    };
    let limit = args.get(1).map(Value::to_int).transpose()?;

    let subject: &ByteString = ctx.subject;
    let collected = yield_or_collect(ctx.block.as_deref_mut(), |emit| {
        split_with(subject, pattern, limit, |field| emit(Value::from(field)))
    })?;
    Ok(collected.map_or_else(|| Value::Str(subject.clone()), Value::Array))
}

/// Shared argument handling of sub, sub!, gsub and gsub!.
fn substitute(ctx: &mut CallContext<'_, '_>, global: bool, in_place: bool) -> SpliceResult<Value> {
    ctx.check_arity(1, 2, "1..2")?;
    let args = ctx.args();
    let pattern = pattern_arg(&args[0])?;
    if in_place {
        ctx.subject.check_mutable()?;
    }

    let mut callback;
    let replacement = match (args.get(1), ctx.block.as_deref_mut()) {
        (Some(repl), _) => Replacement::Literal(repl.to_str()?),
        (None, Some(block)) => {
            callback = move |m: &[u8]| -> SpliceResult<Vec<u8>> {
                Ok(block(Value::from(m))?.to_s().into_bytes())
            };
            Replacement::Callback(&mut callback)
        }
        (None, None) if global => {
            let subject = ctx.subject.as_bytes();
            let found = matches(subject, pattern)
                .map(|m| m.map(|m| Value::from(m.span.of(subject))))
                .collect::<SpliceResult<Vec<_>>>()?;
            return Ok(Value::Array(found));
        }
        (None, None) => {
            return Err(SpliceError::ArgumentCount {
                given: 1,
                expected: "2",
            });
        }
    };

    if in_place {
        let changed =
            sub_or_gsub_in_place(&mut *ctx.subject, pattern, replacement, global, ctx.option)?;
        Ok(changed.map_or(Value::Nil, |_| Value::Str(ctx.subject.clone())))
    } else {
        let (out, _) =
            sub_or_gsub(ctx.subject.as_bytes(), pattern, replacement, global, ctx.option)?;
        Ok(Value::Str(out))
    }
}

/// sub(pattern, replacement), sub(pattern) { |match| ... }
fn string_sub(ctx: &mut CallContext<'_, '_>) -> SpliceResult<Value> {
    substitute(ctx, false, false)
}

/// sub!(pattern, replacement): nil when nothing matched
fn string_sub_bang(ctx: &mut CallContext<'_, '_>) -> SpliceResult<Value> {
    substitute(ctx, false, true)
}

/// gsub(pattern, replacement), gsub(pattern) { |match| ... }, gsub(pattern)
fn string_gsub(ctx: &mut CallContext<'_, '_>) -> SpliceResult<Value> {
    substitute(ctx, true, false)
}

fn string_gsub_bang(ctx: &mut CallContext<'_, '_>) -> SpliceResult<Value> {
    substitute(ctx, true, true)
}

/// each_line([separator])
fn string_each_line(ctx: &mut CallContext<'_, '_>) -> SpliceResult<Value> {
    ctx.check_arity(0, 1, "0..1")?;
    let separator: Option<&dyn PatternLike> = match ctx.arg(0) {
        None => Some(&DEFAULT_LINE_SEPARATOR),
        Some(Value::Nil) => None,
        Some(v) => Some(pattern_arg(v)?),
    };

    let subject: &ByteString = ctx.subject;
    let collected = yield_or_collect(ctx.block.as_deref_mut(), |emit| {
        each_line(subject, separator, |line| emit(Value::from(line)))
    })?;
    Ok(collected.map_or_else(|| Value::Str(subject.clone()), Value::Array))
}

fn string_each_byte(ctx: &mut CallContext<'_, '_>) -> SpliceResult<Value> {
    ctx.check_arity(0, 0, "0")?;
    let subject: &ByteString = ctx.subject;
    let collected = yield_or_collect(ctx.block.as_deref_mut(), |emit| {
        each_byte(subject, |b| emit(Value::Int(i64::from(b))));
        Ok(())
    })?;
    Ok(collected.map_or_else(|| Value::Str(subject.clone()), Value::Array))
}
