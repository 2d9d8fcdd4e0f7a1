// Tests for the split engine
use pretty_assertions::assert_eq;

use super::{init_tracing, strings};
use crate::*;

fn split_str(subject: &str, pattern: Option<&str>, limit: Option<i64>) -> Vec<String> {
    strings(&split(subject.as_bytes(), pattern, limit).unwrap())
}

#[test]
fn test_split_whitespace_runs() {
    init_tracing();
    assert_eq!(split_str("  now's  the time", None, None), ["now's", "the", "time"]);
}

#[test]
fn test_split_drops_trailing_empties() {
    assert_eq!(split_str("1,2,,3,4,,", Some(","), None), ["1", "2", "", "3", "4"]);
}

#[test]
fn test_split_positive_limit_keeps_remainder() {
    assert_eq!(split_str("1,2,,3,4,,", Some(","), Some(4)), ["1", "2", "", "3,4,,"]);
}

#[test]
fn test_split_negative_limit_keeps_trailing_empties() {
    assert_eq!(
        split_str("1,2,,3,4,,", Some(","), Some(-4)),
        ["1", "2", "", "3", "4", "", ""]
    );
}

#[test]
fn test_split_single_space_literal_is_whitespace_mode() {
    assert_eq!(split_str("a \t b\n c", Some(" "), None), ["a", "b", "c"]);
    assert_eq!(split_str("a  b", Some("  "), None), ["a", "b"]);
}

#[test]
fn test_split_with_engine_pattern() {
    let p = LuaPattern::new("%s*,%s*").unwrap();
    let got = split(b"a , b,c ,d", Some(&p), None).unwrap();
    assert_eq!(strings(&got), ["a", "b", "c", "d"]);

    let digits = LuaPattern::new("%d").unwrap();
    let got = split(b"a1b22c", Some(&digits), None).unwrap();
    assert_eq!(strings(&got), ["a", "b", "", "c"]);
}

#[test]
fn test_split_zero_width_engine_pattern_progresses() {
    let p = LuaPattern::new("x*").unwrap();
    let got = split(b"abc", Some(&p), None).unwrap();
    assert_eq!(strings(&got), ["a", "b", "c"]);
}

#[test]
fn test_split_reports_engine_errors() {
    let option = SpliceOption {
        max_pattern_depth: 2,
        ..SpliceOption::default()
    };
    let p = LuaPattern::with_option("a-a-a-b", &option).unwrap();
    assert!(matches!(
        split(b"aaaaaa", Some(&p), None),
        Err(SpliceError::Pattern(_))
    ));
}

#[test]
fn test_split_non_utf8_bytes() {
    let got = split(b"\xff,\xfe", Some(","), None).unwrap();
    assert_eq!(got, [ByteString::from(&b"\xff"[..]), ByteString::from(&b"\xfe"[..])]);
}

#[test]
fn test_split_whitespace_collected() {
    assert_eq!(strings(&split_whitespace(b"\ta b  c", Some(2))), ["a", "b  c"]);
}
