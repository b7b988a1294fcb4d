//! Parse errors.

use std::fmt;

/// What went wrong while parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Nothing but whitespace and comments.
    EmptyProgram,
    /// A `'` or `"` with no closing partner.
    UnmatchedQuote { quote: char },
    /// A character that starts no literal, variable, or function.
    InvalidCharacter(char),
    /// Input ended before a function received all its arguments.
    MissingArgument {
        function: char,
        expected: usize,
        found: usize,
    },
}

/// A parse failure and the byte offset it was detected at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub offset: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::EmptyProgram => write!(f, "no program given"),
            ParseErrorKind::UnmatchedQuote { quote } => {
                write!(f, "unmatched quote {quote} starting at offset {}", self.offset)
            }
            ParseErrorKind::InvalidCharacter(c) => {
                write!(f, "invalid character {c:?} at offset {}", self.offset)
            }
            ParseErrorKind::MissingArgument {
                function,
                expected,
                found,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                write!(
                    f,
                    "{function} expects {expected} {arg_word}, got {found} before end of input"
                )
            }
        }
    }
}

impl std::error::Error for ParseError {}
