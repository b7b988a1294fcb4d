//! Recursive-descent parser from Knight source to a [`Value`] tree.
//!
//! Single pass, one byte of lookahead, no backtracking. Literals become
//! reduced values, identifiers become [`Value::Variable`] handles resolved
//! once through the [`Environment`], and function names become
//! [`Value::Function`] thunks holding their parsed, unevaluated arguments.

mod cursor;
mod error;

pub use cursor::Cursor;
pub use error::{ParseError, ParseErrorKind};

use crate::environment::Environment;
use crate::function::{FunctionRegistry, Thunk, ThunkArgs};
use crate::stack::ensure_sufficient_stack;
use crate::string_cache::StringCache;
use crate::value::Value;

/// Whitespace, including the brackets and colon Knight treats as spacing.
#[inline]
fn is_whitespace(b: u8) -> bool {
    matches!(
        b,
        b' ' | b'\t' | b'\r' | b'\n' | 0x0B | 0x0C | b'(' | b')' | b':'
    )
}

#[inline]
fn is_upper_word(b: u8) -> bool {
    b.is_ascii_uppercase() || b == b'_'
}

#[inline]
fn is_identifier_start(b: u8) -> bool {
    b.is_ascii_lowercase() || b == b'_'
}

#[inline]
fn is_identifier_continue(b: u8) -> bool {
    b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_'
}

/// Parser over one source string.
///
/// Identifiers are interned into `env` as they are seen, so parsing the same
/// name twice yields the same cell.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    env: &'a mut Environment,
    functions: &'a FunctionRegistry,
    strings: &'a mut StringCache,
}

impl<'a> Parser<'a> {
    pub fn new(
        source: &'a str,
        env: &'a mut Environment,
        functions: &'a FunctionRegistry,
        strings: &'a mut StringCache,
    ) -> Self {
        Self {
            cursor: Cursor::new(source),
            env,
            functions,
            strings,
        }
    }

    /// Byte offset of the next unread character.
    pub fn offset(&self) -> usize {
        self.cursor.pos()
    }

    /// Parse the next value, or `None` if only trivia remains.
    pub fn parse_value(&mut self) -> Result<Option<Value>, ParseError> {
        ensure_sufficient_stack(|| self.parse_value_inner())
    }

    fn parse_value_inner(&mut self) -> Result<Option<Value>, ParseError> {
        self.skip_trivia();
        if self.cursor.is_eof() {
            return Ok(None);
        }

        let b = self.cursor.current();
        tracing::trace!(offset = self.cursor.pos(), byte = %char::from(b), "parse value");

        let value = match b {
            b'0'..=b'9' => self.parse_number(),
            b'\'' | b'"' => self.parse_text(b)?,
            b'N' => {
                self.eat_keyword();
                Value::Null
            }
            b'T' | b'F' => {
                self.eat_keyword();
                Value::Boolean(b == b'T')
            }
            b'@' => {
                self.cursor.advance();
                Value::empty_sequence()
            }
            _ if is_identifier_start(b) => self.parse_variable(),
            _ => match self.parse_function()? {
                Some(function) => function,
                None => {
                    let c = self.cursor.current_char().unwrap_or('\0');
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidCharacter(c),
                        self.cursor.pos(),
                    ));
                }
            },
        };
        Ok(Some(value))
    }

    /// Parse a function application if the next character names a
    /// registered builtin.
    ///
    /// Returns `Ok(None)` without consuming anything otherwise. An uppercase
    /// name also swallows the rest of its keyword (`OUTPUT`, `WHILE`), and
    /// then exactly `arity` argument values are parsed.
    pub fn parse_function(&mut self) -> Result<Option<Value>, ParseError> {
        let Some(name) = self.cursor.current_char() else {
            return Ok(None);
        };
        let Some(builtin) = self.functions.get(name) else {
            return Ok(None);
        };

        let start = self.cursor.pos();
        self.cursor.advance_char();
        if name.is_ascii_uppercase() {
            self.cursor.eat_while(is_upper_word);
        }

        let mut args = ThunkArgs::with_capacity(builtin.arity);
        for found in 0..builtin.arity {
            match self.parse_value()? {
                Some(arg) => args.push(arg),
                None => {
                    return Err(ParseError::new(
                        ParseErrorKind::MissingArgument {
                            function: name,
                            expected: builtin.arity,
                            found,
                        },
                        start,
                    ))
                }
            }
        }

        Ok(Some(Value::Function(Thunk::new(builtin, args))))
    }

    /// Skip whitespace and `#` comments.
    fn skip_trivia(&mut self) {
        loop {
            match self.cursor.current() {
                b if is_whitespace(b) => self.cursor.eat_while(is_whitespace),
                b'#' => self.cursor.eat_until_newline_or_eof(),
                _ => return,
            }
        }
    }

    /// `[0-9]+`, accumulated left to right with wrapping.
    fn parse_number(&mut self) -> Value {
        let start = self.cursor.pos();
        self.cursor.eat_while(|b| b.is_ascii_digit());
        let n = self
            .cursor
            .slice_from(start)
            .bytes()
            .fold(0i64, |acc, d| acc.wrapping_mul(10).wrapping_add(i64::from(d - b'0')));
        Value::Number(n)
    }

    /// Quoted text. No escapes: the next matching quote ends it.
    fn parse_text(&mut self, quote: u8) -> Result<Value, ParseError> {
        let start = self.cursor.pos();
        self.cursor.advance();
        let body_start = self.cursor.pos();
        if !self.cursor.eat_until(quote) {
            return Err(ParseError::new(
                ParseErrorKind::UnmatchedQuote {
                    quote: char::from(quote),
                },
                start,
            ));
        }
        let body = self.cursor.slice_from(body_start);
        self.cursor.advance();
        Ok(Value::Text(self.strings.fetch(body)))
    }

    /// A one-letter literal plus its elided keyword tail (`NULL`, `TRUE`).
    fn eat_keyword(&mut self) {
        self.cursor.advance();
        self.cursor.eat_while(is_upper_word);
    }

    fn parse_variable(&mut self) -> Value {
        let start = self.cursor.pos();
        self.cursor.eat_while(is_identifier_continue);
        Value::Variable(self.env.lookup_or_create(self.cursor.slice_from(start)))
    }
}
