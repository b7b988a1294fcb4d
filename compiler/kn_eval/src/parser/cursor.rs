//! Byte cursor over Knight source text.
//!
//! Every syntactically significant character is ASCII, so the parser looks
//! at one byte at a time. Non-ASCII characters only occur inside quoted
//! text and comments (skipped wholesale) or as invalid characters, which
//! are decoded whole for the error message.

/// Cursor over a `&str`.
///
/// `current()` returns `0x00` past the end; use [`is_eof`](Self::is_eof) to
/// tell that apart from an interior NUL.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    /// The byte at the current position, or `0x00` at EOF.
    #[inline]
    pub fn current(&self) -> u8 {
        self.src.as_bytes().get(self.pos).copied().unwrap_or(0)
    }

    /// The full character at the current position.
    #[inline]
    pub fn current_char(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    /// Advance by one byte. Only valid on an ASCII byte.
    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    /// Advance past one full character.
    #[inline]
    pub fn advance_char(&mut self) {
        self.pos += self.current_char().map_or(1, char::len_utf8);
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Source text from `start` to the current position.
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.src[start..self.pos]
    }

    /// Advance while `pred` holds for the current byte.
    ///
    /// `pred(0)` must be `false`, which stops the loop at EOF.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.current()) {
            self.pos += 1;
        }
    }

    /// Advance to the next `\n` or EOF.
    pub fn eat_until_newline_or_eof(&mut self) {
        self.eat_until(b'\n');
    }

    /// Advance to the next occurrence of `byte`, leaving the cursor on it.
    ///
    /// Returns `false`, with the cursor at EOF, if there is none.
    pub fn eat_until(&mut self, byte: u8) -> bool {
        match memchr::memchr(byte, &self.src.as_bytes()[self.pos..]) {
            Some(offset) => {
                self.pos += offset;
                true
            }
            None => {
                self.pos = self.src.len();
                false
            }
        }
    }
}
