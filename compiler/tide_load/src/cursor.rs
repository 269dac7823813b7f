//! Byte cursor over source text.
//!
//! Multi-byte UTF-8 only ever appears inside strings, comments and word
//! runs; all structural characters are ASCII, so the cursor works on bytes
//! and slices on char boundaries found by scanning for ASCII delimiters.

pub(crate) struct Cursor<'a> {
    source: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    /// Current byte, `None` at end of input.
    #[inline]
    pub(crate) fn current(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos).copied()
    }

    #[inline]
    pub(crate) fn advance(&mut self) {
        self.pos = (self.pos + 1).min(self.source.len());
    }

    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) fn slice_from(&self, start: usize) -> &'a str {
        self.source.get(start..self.pos).unwrap_or("")
    }

    /// Advance past one full UTF-8 character.
    pub(crate) fn advance_char(&mut self) {
        let width = self.current_char().map_or(1, char::len_utf8);
        self.pos = (self.pos + width).min(self.source.len());
    }

    /// Current character, `None` at end of input.
    pub(crate) fn current_char(&self) -> Option<char> {
        self.source.get(self.pos..).and_then(|rest| rest.chars().next())
    }

    /// Skip a `;` comment up to, not including, the newline.
    pub(crate) fn eat_until_newline_or_eof(&mut self) {
        let remaining = &self.source.as_bytes()[self.pos..];
        self.pos += memchr::memchr(b'\n', remaining).unwrap_or(remaining.len());
    }

    /// Skip to the next byte that can end or escape a quoted string.
    ///
    /// Returns that byte, or `None` at end of input.
    pub(crate) fn skip_to_string_delim(&mut self) -> Option<u8> {
        let remaining = &self.source.as_bytes()[self.pos..];
        match memchr::memchr3(b'"', b'^', b'\n', remaining) {
            Some(offset) => {
                self.pos += offset;
                self.current()
            }
            None => {
                self.pos = self.source.len();
                None
            }
        }
    }

    /// Skip to the next byte that can nest, end or escape a brace string.
    pub(crate) fn skip_to_brace_delim(&mut self) -> Option<u8> {
        let remaining = &self.source.as_bytes()[self.pos..];
        match memchr::memchr3(b'{', b'}', b'^', remaining) {
            Some(offset) => {
                self.pos += offset;
                self.current()
            }
            None => {
                self.pos = self.source.len();
                None
            }
        }
    }
}

#[cfg(test)]
mod tests;
