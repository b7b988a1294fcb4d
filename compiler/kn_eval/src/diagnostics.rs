//! Builtin call tracking.
//!
//! Every function-thunk invocation pushes a [`CallFrame`] onto the
//! interpreter's [`CallStack`]. The stack enforces the optional nesting
//! limit and, when an error escapes a builtin, snapshots itself into the
//! error's [`EvalBacktrace`].

use crate::errors::{recursion_limit_exceeded, BacktraceFrame, EvalBacktrace, EvalError};

/// A single frame in the live call stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CallFrame {
    /// One-character builtin name.
    pub name: char,
}

/// Live call stack for the interpreter.
///
/// Also keeps two counters for `--stats`: total builtin calls and the
/// deepest nesting reached.
#[derive(Clone, Debug)]
pub struct CallStack {
    frames: Vec<CallFrame>,
    max_depth: Option<usize>,
    total_calls: u64,
    peak_depth: usize,
}

impl CallStack {
    /// Create an empty call stack. `None` means no depth limit.
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            frames: Vec::new(),
            max_depth,
            total_calls: 0,
            peak_depth: 0,
        }
    }

    /// Push a call frame, checking the depth limit.
    ///
    /// The frame is NOT pushed on overflow.
    pub fn push(&mut self, frame: CallFrame) -> Result<(), EvalError> {
        if let Some(max) = self.max_depth {
            if self.frames.len() >= max {
                return Err(recursion_limit_exceeded(max));
            }
        }
        self.frames.push(frame);
        self.total_calls = self.total_calls.wrapping_add(1);
        self.peak_depth = self.peak_depth.max(self.frames.len());
        Ok(())
    }

    /// Pop the most recent call frame.
    pub fn pop(&mut self) {
        debug_assert!(
            !self.frames.is_empty(),
            "CallStack::pop() called on empty stack"
        );
        self.frames.pop();
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    #[inline]
    pub fn total_calls(&self) -> u64 {
        self.total_calls
    }

    #[inline]
    pub fn peak_depth(&self) -> usize {
        self.peak_depth
    }

    /// Snapshot the live frames, most recent call first.
    pub fn capture(&self) -> EvalBacktrace {
        let frames = self
            .frames
            .iter()
            .enumerate()
            .rev()
            .map(|(i, f)| BacktraceFrame {
                name: f.name,
                depth: i + 1,
            })
            .collect();
        EvalBacktrace::new(frames)
    }

    /// Attach a backtrace to `err` unless it already has one or is a
    /// `QUIT` signal.
    ///
    /// Called while the failing frame is still pushed, so the innermost
    /// builtin is the first frame of the snapshot.
    pub fn annotate(&self, err: EvalError) -> EvalError {
        if err.backtrace.is_some() || err.is_quit() || self.frames.is_empty() {
            return err;
        }
        err.with_backtrace(self.capture())
    }
}

impl Default for CallStack {
    /// Unlimited call stack.
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Tests use expect for brevity")]
mod tests;
