//! Parser tests: literals, trivia, keyword elision, and error reporting.

use super::test_interpreter;
use crate::parser::{ParseError, ParseErrorKind};
use crate::Value;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn parse(source: &str) -> Result<Value, ParseError> {
    test_interpreter().parse(source)
}

fn parse_kind(source: &str) -> ParseErrorKind {
    parse(source).unwrap_err().kind
}

#[test]
fn number_stops_at_first_non_digit() {
    assert_eq!(parse("123abc").unwrap(), Value::Number(123));
    assert_eq!(parse("007").unwrap(), Value::Number(7));
}

#[test]
fn number_literal_wraps() {
    assert_eq!(
        parse("9223372036854775808").unwrap(),
        Value::Number(i64::MIN)
    );
}

#[test]
fn quoted_text_has_no_escapes() {
    assert_eq!(parse("'hello'").unwrap(), Value::text("hello"));
    assert_eq!(parse(r#""a\nb""#).unwrap(), Value::text(r"a\nb"));
    assert_eq!(parse(r#""it's""#).unwrap(), Value::text("it's"));
    assert_eq!(parse("'multi\nline'").unwrap(), Value::text("multi\nline"));
}

#[test]
fn unmatched_quote() {
    assert_eq!(
        parse("  'abc").unwrap_err(),
        ParseError::new(ParseErrorKind::UnmatchedQuote { quote: '\'' }, 2)
    );
}

#[test]
fn keyword_literals_elide_their_tail() {
    assert_eq!(parse("NULL").unwrap(), Value::Null);
    assert_eq!(parse("TRUE").unwrap(), Value::Boolean(true));
    assert_eq!(parse("F_A_L_S_E").unwrap(), Value::Boolean(false));
    assert_eq!(parse("@").unwrap(), Value::empty_sequence());
}

#[test]
fn keyword_functions_elide_their_tail() {
    let mut interp = test_interpreter();
    let program = interp.parse("IF TRUE 1 2").unwrap();
    assert_eq!(interp.run(&program).unwrap(), Value::Number(1));

    match interp.parse("OUTPUT_LINE 'x'").unwrap() {
        Value::Function(thunk) => {
            assert_eq!(thunk.name(), 'O');
            assert_eq!(thunk.args(), &[Value::text("x")]);
        }
        other => panic!("expected a function, got {other:?}"),
    }
}

#[test]
fn symbol_functions_do_not_elide() {
    match parse("!TRUE").unwrap() {
        Value::Function(thunk) => {
            assert_eq!(thunk.name(), '!');
            assert_eq!(thunk.args(), &[Value::Boolean(true)]);
        }
        other => panic!("expected a function, got {other:?}"),
    }
}

#[test]
fn trivia_is_skipped() {
    assert_eq!(parse("  \t\n(1)").unwrap(), Value::Number(1));
    assert_eq!(parse("# comment\n: 5").unwrap(), Value::Number(5));
    assert_eq!(parse("#only a comment\n\x0b\x0c42").unwrap(), Value::Number(42));
}

#[test]
fn only_first_value_is_parsed() {
    assert_eq!(parse("1 2 3").unwrap(), Value::Number(1));
    assert_eq!(parse("1 ~~~ '").unwrap(), Value::Number(1));
}

#[test]
fn empty_program() {
    assert_eq!(parse_kind(""), ParseErrorKind::EmptyProgram);
    assert_eq!(parse_kind("  # nothing\n ( )"), ParseErrorKind::EmptyProgram);
}

#[test]
fn invalid_character() {
    assert_eq!(
        parse("  $").unwrap_err(),
        ParseError::new(ParseErrorKind::InvalidCharacter('$'), 2)
    );
    assert_eq!(parse_kind("é"), ParseErrorKind::InvalidCharacter('é'));
    assert_eq!(parse_kind("X"), ParseErrorKind::InvalidCharacter('X'));
    assert_eq!(parse_kind("\0"), ParseErrorKind::InvalidCharacter('\0'));
}

#[test]
fn missing_arguments() {
    assert_eq!(
        parse("; 1").unwrap_err(),
        ParseError::new(
            ParseErrorKind::MissingArgument {
                function: ';',
                expected: 2,
                found: 1
            },
            0
        )
    );
    assert_eq!(
        parse_kind("SET 'abc' 1"),
        ParseErrorKind::MissingArgument {
            function: 'S',
            expected: 4,
            found: 2
        }
    );
}

#[test]
fn nested_missing_argument_reports_innermost() {
    assert_eq!(
        parse_kind("+ 1 - 2"),
        ParseErrorKind::MissingArgument {
            function: '-',
            expected: 2,
            found: 1
        }
    );
}

#[test]
fn identifiers_resolve_to_one_cell() {
    let mut interp = test_interpreter();
    let a = interp.parse("foo_1").unwrap();
    let b = interp.parse("foo_1").unwrap();
    assert_eq!(a, b);
    assert_eq!(interp.env().len(), 1);
    assert_ne!(interp.parse("foo").unwrap(), a);
}

#[test]
fn identifier_stops_at_uppercase() {
    let mut interp = test_interpreter();
    interp.parse("abcDEF").unwrap();
    assert!(interp.env().lookup("abc").is_some());
}

#[test]
fn deeply_nested_program_parses() {
    let depth = 50_000;
    let source = format!("{}0", "~".repeat(depth));
    assert!(parse(&source).is_ok());
}

#[test]
fn million_deep_program_runs_and_drops() {
    let source = format!("{}0", "~".repeat(1_000_000));
    let mut interp = test_interpreter();
    let program = interp.parse(&source).unwrap();
    assert_eq!(interp.run(&program).unwrap(), Value::Number(0));
    drop(program);
}

proptest! {
    #[test]
    fn any_digit_run_parses_leading_number(n in 0u32..1_000_000, tail in "[a-z ]{0,8}") {
        let source = format!("{n}{tail}");
        prop_assert_eq!(parse(&source).unwrap(), Value::Number(i64::from(n)));
    }

    #[test]
    fn quoted_text_round_trips(body in "[^'\"]{0,40}") {
        prop_assert_eq!(parse(&format!("'{body}'")).unwrap(), Value::text(body.as_str()));
        prop_assert_eq!(parse(&format!("\"{body}\"")).unwrap(), Value::text(body.as_str()));
    }

    #[test]
    fn unterminated_text_is_always_rejected(body in "[^']{0,40}") {
        let is_unmatched = matches!(
            parse_kind(&format!("'{body}")),
            ParseErrorKind::UnmatchedQuote { .. }
        );
        prop_assert!(is_unmatched);
    }
}
