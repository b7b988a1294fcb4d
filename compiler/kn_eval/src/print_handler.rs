//! Output sinks for `OUTPUT` and `DUMP`.
//!
//! Programs print through a [`SharedPrintHandler`] so the CLI can write to
//! stdout while tests capture into a buffer. Enum dispatch keeps the hot
//! `OUTPUT` path free of vtable calls.

use std::io::{self, BufWriter, Stdout, Write};
use std::sync::Arc;

use parking_lot::Mutex;

/// Buffered stdout writer.
///
/// Output is only pushed to the terminal on [`flush`](Self::flush), which
/// the interpreter calls before reading input and at program exit.
pub struct StdoutPrintHandler {
    out: Mutex<BufWriter<Stdout>>,
}

impl StdoutPrintHandler {
    pub fn new() -> Self {
        StdoutPrintHandler {
            out: Mutex::new(BufWriter::new(io::stdout())),
        }
    }

    pub fn println(&self, msg: &str) -> io::Result<()> {
        let mut out = self.out.lock();
        out.write_all(msg.as_bytes())?;
        out.write_all(b"\n")
    }

    pub fn print(&self, msg: &str) -> io::Result<()> {
        self.out.lock().write_all(msg.as_bytes())
    }

    pub fn flush(&self) -> io::Result<()> {
        self.out.lock().flush()
    }
}

impl Default for StdoutPrintHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Print handler that captures output to a buffer.
pub struct BufferPrintHandler {
    buffer: Mutex<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        BufferPrintHandler {
            buffer: Mutex::new(String::new()),
        }
    }

    pub fn println(&self, msg: &str) {
        let mut buf = self.buffer.lock();
        buf.push_str(msg);
        buf.push('\n');
    }

    pub fn print(&self, msg: &str) {
        self.buffer.lock().push_str(msg);
    }

    /// Everything printed so far.
    pub fn get_output(&self) -> String {
        self.buffer.lock().clone()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Default for BufferPrintHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Print handler implementation using enum dispatch.
pub enum PrintHandlerImpl {
    /// Writes to stdout (default).
    Stdout(StdoutPrintHandler),
    /// Captures to a buffer (tests, embedding).
    Buffer(BufferPrintHandler),
    /// Discards all output.
    Silent,
}

impl PrintHandlerImpl {
    /// Print `msg` followed by a newline.
    pub fn println(&self, msg: &str) -> io::Result<()> {
        match self {
            Self::Stdout(h) => h.println(msg),
            Self::Buffer(h) => {
                h.println(msg);
                Ok(())
            }
            Self::Silent => Ok(()),
        }
    }

    /// Print `msg` as-is.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        match self {
            Self::Stdout(h) => h.print(msg),
            Self::Buffer(h) => {
                h.print(msg);
                Ok(())
            }
            Self::Silent => Ok(()),
        }
    }

    /// Push buffered output to its destination. No-op unless writing to stdout.
    pub fn flush(&self) -> io::Result<()> {
        match self {
            Self::Stdout(h) => h.flush(),
            Self::Buffer(_) | Self::Silent => Ok(()),
        }
    }

    /// Captured output. Empty for handlers that don't capture.
    pub fn get_output(&self) -> String {
        match self {
            Self::Buffer(h) => h.get_output(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }

    /// Clear captured output.
    pub fn clear(&self) {
        if let Self::Buffer(h) = self {
            h.clear();
        }
    }
}

/// Shared print handler that can be passed around.
pub type SharedPrintHandler = Arc<PrintHandlerImpl>;

/// Create a buffered stdout print handler.
pub fn stdout_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Stdout(StdoutPrintHandler::new()))
}

/// Create a buffer print handler for capturing output.
pub fn buffer_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

/// Create a print handler that discards all output.
pub fn silent_handler() -> SharedPrintHandler {
    Arc::new(PrintHandlerImpl::Silent)
}
