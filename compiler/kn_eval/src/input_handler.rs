//! Input sources for `PROMPT`.
//!
//! Mirrors the print handler: a small enum over concrete sources behind an
//! `Arc`, so tests can feed canned lines instead of touching stdin.

use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::sync::Arc;

use parking_lot::Mutex;

/// Reads lines from the process's standard input.
#[derive(Default)]
pub struct StdinInputHandler;

impl StdinInputHandler {
    /// Next line including its terminator, or `None` at end of input.
    pub fn read_line(&self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        Ok((read > 0).then_some(line))
    }
}

/// Serves pre-supplied lines, then end of input.
pub struct BufferInputHandler {
    lines: Mutex<VecDeque<String>>,
}

impl BufferInputHandler {
    /// Split `text` into lines, each keeping its `\n`.
    pub fn new(text: &str) -> Self {
        BufferInputHandler {
            lines: Mutex::new(text.split_inclusive('\n').map(str::to_owned).collect()),
        }
    }

    pub fn read_line(&self) -> Option<String> {
        self.lines.lock().pop_front()
    }

    /// Lines not consumed yet.
    pub fn remaining(&self) -> usize {
        self.lines.lock().len()
    }
}

/// Input handler implementation using enum dispatch.
pub enum InputHandlerImpl {
    Stdin(StdinInputHandler),
    Buffer(BufferInputHandler),
    /// Always at end of input.
    Empty,
}

impl InputHandlerImpl {
    /// Next raw line, terminator included, or `None` at end of input.
    pub fn read_line(&self) -> io::Result<Option<String>> {
        match self {
            Self::Stdin(h) => h.read_line(),
            Self::Buffer(h) => Ok(h.read_line()),
            Self::Empty => Ok(None),
        }
    }
}

/// Shared input handler that can be passed around.
pub type SharedInputHandler = Arc<InputHandlerImpl>;

pub fn stdin_input() -> SharedInputHandler {
    Arc::new(InputHandlerImpl::Stdin(StdinInputHandler))
}

/// Input handler that serves the lines of `text`.
pub fn buffer_input(text: &str) -> SharedInputHandler {
    Arc::new(InputHandlerImpl::Buffer(BufferInputHandler::new(text)))
}

pub fn empty_input() -> SharedInputHandler {
    Arc::new(InputHandlerImpl::Empty)
}
