//! Error types for parsing and evaluation.
//!
//! `EvalErrorKind` is the structured category; `EvalError` wraps it with the
//! builtin backtrace captured at the error site. Errors are built through the
//! factory functions at the bottom of this module rather than by hand, so the
//! message text stays in one place.

use std::fmt;

use crate::parser::ParseError;
use crate::value::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Source
    Parse(ParseError),

    // Access
    UnassignedVariable {
        name: String,
    },

    // Type/Operator
    WrongType {
        op: String,
        type_name: &'static str,
    },

    // Arithmetic
    DivisionByZero,
    ModuloByZero,

    // Arguments
    InvalidArgument {
        message: String,
    },
    EmptyContainer {
        op: String,
    },

    // Resources
    StackOverflow {
        depth: usize,
    },
    MissingCapability {
        capability: String,
    },
    Io {
        message: String,
    },

    /// Program requested termination. Not a failure; carries the exit code.
    Quit {
        code: i64,
    },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::UnassignedVariable { name } => {
                write!(f, "undefined variable {name} accessed")
            }
            Self::WrongType { op, type_name } => {
                write!(f, "`{op}` cannot be applied to {type_name}")
            }
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::ModuloByZero => write!(f, "modulo by zero"),
            Self::InvalidArgument { message } => write!(f, "invalid argument: {message}"),
            Self::EmptyContainer { op } => write!(f, "`{op}` on an empty container"),
            Self::StackOverflow { depth } => {
                write!(f, "maximum recursion depth exceeded (limit: {depth})")
            }
            Self::MissingCapability { capability } => {
                write!(f, "missing capability: {capability}")
            }
            Self::Io { message } => write!(f, "i/o error: {message}"),
            Self::Quit { code } => write!(f, "quit with status {code}"),
        }
    }
}

/// A single frame in an evaluation backtrace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BacktraceFrame {
    /// Name of the builtin that was executing.
    pub name: char,
    /// Nesting depth of the frame, outermost call is 1.
    pub depth: usize,
}

/// Immutable snapshot of the builtin call chain at an error site.
///
/// Frames are ordered most recent call first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<BacktraceFrame>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<BacktraceFrame>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[BacktraceFrame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "stack backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            writeln!(f, "  {i}: {} (depth {})", frame.name, frame.depth)?;
        }
        Ok(())
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Builtin call chain at the error site.
    ///
    /// Filled in by the innermost builtin frame the error passes through;
    /// outer frames leave it alone.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        Self {
            kind,
            backtrace: None,
        }
    }

    /// Attach a backtrace to this error.
    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }

    /// Exit code if this is a `QUIT` signal rather than a failure.
    #[inline]
    pub fn quit_code(&self) -> Option<i64> {
        match self.kind {
            EvalErrorKind::Quit { code } => Some(code),
            _ => None,
        }
    }

    #[inline]
    pub fn is_quit(&self) -> bool {
        self.quit_code().is_some()
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for EvalError {}

impl From<ParseError> for EvalError {
    fn from(err: ParseError) -> Self {
        EvalError::from_kind(EvalErrorKind::Parse(err))
    }
}

// Type Errors

/// Operator or builtin applied to a variant it does not support.
#[cold]
pub fn wrong_type(op: impl Into<String>, value: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::WrongType {
        op: op.into(),
        type_name: value.type_name(),
    })
}

// Arithmetic Errors

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

// Argument Errors

#[cold]
pub fn invalid_argument(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidArgument {
        message: message.into(),
    })
}

/// Text or sequence repeated a negative number of times.
#[cold]
pub fn negative_repetition(count: i64) -> EvalError {
    invalid_argument(format!("cannot repeat a negative number of times ({count})"))
}

/// Left operand of `=` was not a variable.
#[cold]
pub fn invalid_assignment_target(value: &Value) -> EvalError {
    invalid_argument(format!(
        "can only assign to a variable, not {}",
        value.type_name()
    ))
}

/// `GET`/`SET` range does not fit inside the container.
#[cold]
pub fn slice_out_of_range(start: i64, length: i64, len: usize) -> EvalError {
    invalid_argument(format!(
        "range {start}..{start}+{length} is out of bounds for length {len}"
    ))
}

#[cold]
pub fn empty_container(op: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::EmptyContainer { op: op.into() })
}

// Access Errors

#[cold]
pub fn unassigned_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnassignedVariable {
        name: name.to_string(),
    })
}

// Resource Errors

#[cold]
pub fn recursion_limit_exceeded(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth })
}

#[cold]
pub fn missing_capability(capability: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingCapability {
        capability: capability.to_string(),
    })
}

#[cold]
pub fn io_error(err: &std::io::Error) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Io {
        message: err.to_string(),
    })
}

// Signals

/// `QUIT` signal carrying the requested exit code.
pub fn quit(code: i64) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Quit { code })
}
