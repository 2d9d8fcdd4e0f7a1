// Tests for the dynamic method table
use pretty_assertions::assert_eq;

use super::init_tracing;
use crate::*;

fn call(lib: &StringLib, subject: &mut ByteString, name: &str, args: &[Value]) -> SpliceResult<Value> {
    lib.call(name, subject, args, None)
}

fn strs(items: &[&str]) -> Value {
    Value::Array(items.iter().map(|s| Value::from(*s)).collect())
}

#[test]
fn test_registered_methods() {
    let lib = StringLib::new();
    for name in [
        "[]", "slice", "[]=", "byteslice", "index", "split", "sub", "sub!", "gsub", "gsub!",
        "each_line", "each_byte",
    ] {
        assert!(lib.responds_to(name), "{name}");
    }
    assert_eq!(lib.method_names().count(), 12);
}

#[test]
fn test_element_reference() {
    let lib = StringLib::new();
    let mut s = ByteString::from("hello world");
    assert_eq!(call(&lib, &mut s, "[]", &[Value::Int(1)]).unwrap(), Value::from("e"));
    assert_eq!(call(&lib, &mut s, "[]", &[Value::Float(1.0)]).unwrap(), Value::from("e"));
    assert_eq!(
        call(&lib, &mut s, "slice", &[Value::Int(0), Value::Int(5)]).unwrap(),
        Value::from("hello")
    );
    assert_eq!(
        call(&lib, &mut s, "[]", &[RangeArg::inclusive(-5, -1).into()]).unwrap(),
        Value::from("world")
    );
    assert_eq!(call(&lib, &mut s, "[]", &["lo w".into()]).unwrap(), Value::from("lo w"));
    assert_eq!(call(&lib, &mut s, "[]", &["xyz".into()]).unwrap(), Value::Nil);
    assert_eq!(call(&lib, &mut s, "[]", &[Value::Int(99)]).unwrap(), Value::Nil);
}

#[test]
fn test_element_reference_arity() {
    let lib = StringLib::new();
    let mut s = ByteString::from("abc");
    let three = [Value::Int(0), Value::Int(1), Value::Int(2)];
    assert_eq!(
        call(&lib, &mut s, "[]", &three),
        Err(SpliceError::ArgumentCount {
            given: 3,
            expected: "1..2"
        })
    );
    assert_eq!(
        call(&lib, &mut s, "[]", &[Value::Nil]),
        Err(SpliceError::TypeMismatch(
            "no implicit conversion of nil into Integer".to_string()
        ))
    );
}

#[test]
fn test_element_assignment() {
    let lib = StringLib::new();
    let mut s = ByteString::from("abcdefg");
    let got = call(&lib, &mut s, "[]=", &[RangeArg::inclusive(2, 4).into(), "CDE".into()]);
    assert_eq!(got.unwrap(), Value::from("CDE"));
    assert_eq!(s, "abCDEfg");

    call(&lib, &mut s, "[]=", &[Value::Int(0), Value::Int(2), "".into()]).unwrap();
    assert_eq!(s, "CDEfg");

    assert_eq!(
        call(&lib, &mut s, "[]=", &[Value::Int(9), "x".into()]),
        Err(SpliceError::IndexOutOfRange("index 9 out of string".to_string()))
    );
    assert_eq!(
        call(&lib, &mut s, "[]=", &[Value::Int(0), Value::Int(1)]),
        Err(SpliceError::TypeMismatch(
            "no implicit conversion of Integer into String".to_string()
        ))
    );

    let mut frozen = ByteString::from("abc").frozen();
    assert_eq!(
        call(&lib, &mut frozen, "[]=", &[Value::Int(0), "x".into()]),
        Err(SpliceError::ImmutableValue)
    );
}

#[test]
fn test_byteslice_rejects_patterns() {
    let lib = StringLib::new();
    let mut s = ByteString::from("hello");
    assert_eq!(
        call(&lib, &mut s, "byteslice", &[Value::Int(1), Value::Int(3)]).unwrap(),
        Value::from("ell")
    );
    assert!(matches!(
        call(&lib, &mut s, "byteslice", &["ell".into()]),
        Err(SpliceError::TypeMismatch(_))
    ));
}

#[test]
fn test_index_method() {
    let lib = StringLib::new();
    let mut s = ByteString::from("hello");
    assert_eq!(call(&lib, &mut s, "index", &["l".into()]).unwrap(), Value::Int(2));
    assert_eq!(
        call(&lib, &mut s, "index", &["l".into(), Value::Int(-2)]).unwrap(),
        Value::Int(3)
    );
    assert_eq!(call(&lib, &mut s, "index", &["z".into()]).unwrap(), Value::Nil);
}

#[test]
fn test_split_method() {
    init_tracing();
    let lib = StringLib::new();
    let mut s = ByteString::from("1,2,,3,4,,");
    assert_eq!(
        call(&lib, &mut s, "split", &[",".into()]).unwrap(),
        strs(&["1", "2", "", "3", "4"])
    );
    assert_eq!(
        call(&lib, &mut s, "split", &[",".into(), Value::Int(4)]).unwrap(),
        strs(&["1", "2", "", "3,4,,"])
    );
    assert_eq!(
        call(&lib, &mut s, "split", &[Value::Nil, Value::Int(-1)]).unwrap(),
        strs(&["1,2,,3,4,,"])
    );

    let mut words = ByteString::from("  now's  the time");
    assert_eq!(
        call(&lib, &mut words, "split", &[]).unwrap(),
        strs(&["now's", "the", "time"])
    );
}

#[test]
fn test_split_argument_errors() {
    let lib = StringLib::new();
    let mut s = ByteString::from("a b");
    assert!(matches!(
        call(&lib, &mut s, "split", &[Value::Int(1)]),
        Err(SpliceError::TypeMismatch(_))
    ));
    assert!(matches!(
        call(&lib, &mut s, "split", &[" ".into(), "x".into()]),
        Err(SpliceError::TypeMismatch(_))
    ));
    assert_eq!(
        call(&lib, &mut s, "split", &[" ".into(), Value::Int(1), Value::Int(2)]),
        Err(SpliceError::ArgumentCount {
            given: 3,
            expected: "0..2"
        })
    );
}

#[test]
fn test_split_with_block() {
    let lib = StringLib::new();
    let mut s = ByteString::from("a-b-c");
    let mut seen = Vec::new();
    let mut block = |v: Value| -> SpliceResult<Value> {
        seen.push(v);
        Ok(Value::Nil)
    };
    let ret = lib.call("split", &mut s, &["-".into()], Some(&mut block)).unwrap();
    assert_eq!(ret, Value::from("a-b-c"));
    assert_eq!(seen, [Value::from("a"), Value::from("b"), Value::from("c")]);
}

#[test]
fn test_block_error_stops_iteration() {
    let lib = StringLib::new();
    let mut s = ByteString::from("a\nb\nc");
    let mut calls = 0;
    let mut block = |_: Value| -> SpliceResult<Value> {
        calls += 1;
        Err(SpliceError::TypeMismatch("stop".to_string()))
    };
    let err = lib.call("each_line", &mut s, &[], Some(&mut block));
    assert_eq!(err, Err(SpliceError::TypeMismatch("stop".to_string())));
    assert_eq!(calls, 1);
}

#[test]
fn test_sub_and_gsub_methods() {
    let lib = StringLib::new();
    let mut s = ByteString::from("hello");
    assert_eq!(
        call(&lib, &mut s, "gsub", &["l".into(), "L".into()]).unwrap(),
        Value::from("heLLo")
    );
    assert_eq!(
        call(&lib, &mut s, "sub", &["l".into(), "L".into()]).unwrap(),
        Value::from("heLlo")
    );
    assert_eq!(s, "hello");

    let digits = LuaPattern::new("%d+").unwrap();
    let mut nums = ByteString::from("a1b22c333");
    assert_eq!(
        call(&lib, &mut nums, "gsub", &[digits.into()]).unwrap(),
        strs(&["1", "22", "333"])
    );
    assert_eq!(
        call(&lib, &mut nums, "sub", &["1".into()]),
        Err(SpliceError::ArgumentCount {
            given: 1,
            expected: "2"
        })
    );
    assert_eq!(
        call(&lib, &mut nums, "sub", &[]),
        Err(SpliceError::ArgumentCount {
            given: 0,
            expected: "1..2"
        })
    );
}

#[test]
fn test_gsub_with_block_stringifies_result() {
    let lib = StringLib::new();
    let mut s = ByteString::from("a1b2");
    let mut block = |v: Value| -> SpliceResult<Value> {
        let digit = v.to_str()?[0] - b'0';
        Ok(Value::Int(i64::from(digit) * 10))
    };
    let pattern = LuaPattern::new("%d").unwrap();
    let out = lib.call("gsub", &mut s, &[pattern.into()], Some(&mut block)).unwrap();
    assert_eq!(out, Value::from("a10b20"));
}

#[test]
fn test_bang_methods() {
    let lib = StringLib::new();
    let mut s = ByteString::from("hello");
    assert_eq!(
        call(&lib, &mut s, "gsub!", &["l".into(), "L".into()]).unwrap(),
        Value::from("heLLo")
    );
    assert_eq!(s, "heLLo");
    assert_eq!(call(&lib, &mut s, "sub!", &["z".into(), "!".into()]).unwrap(), Value::Nil);
    assert_eq!(s, "heLLo");

    let mut frozen = ByteString::from("abc").frozen();
    assert_eq!(
        call(&lib, &mut frozen, "sub!", &["z".into(), "!".into()]),
        Err(SpliceError::ImmutableValue)
    );
    assert_eq!(
        call(&lib, &mut frozen, "gsub!", &["b".into()]),
        Err(SpliceError::ImmutableValue)
    );
    assert_eq!(frozen, "abc");
}

#[test]
fn test_each_line_method() {
    let lib = StringLib::new();
    let mut s = ByteString::from("a\nb\n\n\nc");
    assert_eq!(
        call(&lib, &mut s, "each_line", &[]).unwrap(),
        strs(&["a\n", "b\n", "\n", "\n", "c"])
    );
    assert_eq!(
        call(&lib, &mut s, "each_line", &["".into()]).unwrap(),
        strs(&["a\nb\n\n\n", "c"])
    );
    assert_eq!(
        call(&lib, &mut s, "each_line", &[Value::Nil]).unwrap(),
        strs(&["a\nb\n\n\nc"])
    );
    assert!(matches!(
        call(&lib, &mut s, "each_line", &[Value::Int(0)]),
        Err(SpliceError::TypeMismatch(_))
    ));
}

#[test]
fn test_each_byte_method() {
    let lib = StringLib::new();
    let mut s = ByteString::from("AB");
    assert_eq!(
        call(&lib, &mut s, "each_byte", &[]).unwrap(),
        Value::Array(vec![Value::Int(65), Value::Int(66)])
    );
    let mut sum = 0;
    let mut block = |v: Value| -> SpliceResult<Value> {
        sum += v.to_int()?;
        Ok(Value::Nil)
    };
    let ret = lib.call("each_byte", &mut s, &[], Some(&mut block)).unwrap();
    assert_eq!(ret, Value::from("AB"));
    assert_eq!(sum, 131);
}

#[test]
fn test_option_limits_results() {
    let lib = StringLib::with_option(SpliceOption {
        max_string_size: 4,
        ..SpliceOption::default()
    });
    assert_eq!(lib.option().max_string_size, 4);
    let mut s = ByteString::from("ab");
    assert!(matches!(
        call(&lib, &mut s, "gsub", &["".into(), "xx".into()]),
        Err(SpliceError::ResultTooLarge { .. })
    ));
}
