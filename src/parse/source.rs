//! UTF-8 character source with a single slot of lookahead.

use std::io::{self, BufRead};

use utf8_chars::BufReadCharsExt;

use super::types::Position;

/// Reads characters from a buffered byte stream.
///
/// `peek_char` fills one lookahead slot that the following `next_char`
/// drains. There is never more than one character held back.
pub struct CharSource<R> {
    inner: R,
    /// `Some(None)` records a peeked end of stream.
    slot: Option<Option<char>>,
    position: Position,
    after_newline: bool,
}

impl<R: BufRead> CharSource<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            slot: None,
            position: Position::new(1, 0),
            after_newline: false,
        }
    }

    /// Consume the next character, or `None` at end of stream.
    pub fn next_char(&mut self) -> io::Result<Option<char>> {
        let c = match self.slot.take() {
            Some(c) => c,
            None => self.read()?,
        };
        if let Some(c) = c {
            self.advance(c);
        }
        Ok(c)
    }

    /// Look at the next character without consuming it.
    pub fn peek_char(&mut self) -> io::Result<Option<char>> {
        if let Some(c) = self.slot {
            return Ok(c);
        }
        let c = self.read()?;
        self.slot = Some(c);
        Ok(c)
    }

    /// Consume the next character only if it satisfies `pred`.
    pub fn next_if(&mut self, pred: impl FnOnce(char) -> bool) -> io::Result<Option<char>> {
        match self.peek_char()? {
            Some(c) if pred(c) => self.next_char(),
            _ => Ok(None),
        }
    }

    /// Position of the most recently consumed character.
    pub fn position(&self) -> Position {
        self.position
    }

    fn read(&mut self) -> io::Result<Option<char>> {
        loop {
            match self.inner.read_char() {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                other => return other,
            }
        }
    }

    fn advance(&mut self, c: char) {
        if self.after_newline {
            self.position.line += 1;
            self.position.column = 1;
        } else {
            self.position.column += 1;
        }
        self.after_newline = c == '\n';
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_does_not_consume() {
        let mut src = CharSource::new("ab".as_bytes());
        assert_eq!(src.peek_char().unwrap(), Some('a'));
        assert_eq!(src.peek_char().unwrap(), Some('a'));
        assert_eq!(src.next_char().unwrap(), Some('a'));
        assert_eq!(src.next_char().unwrap(), Some('b'));
        assert_eq!(src.peek_char().unwrap(), None);
        assert_eq!(src.next_char().unwrap(), None);
    }

    #[test]
    fn next_if_leaves_mismatch_in_slot() {
        let mut src = CharSource::new("(x".as_bytes());
        assert_eq!(src.next_if(|c| c == '(').unwrap(), Some('('));
        assert_eq!(src.next_if(|c| c == '(').unwrap(), None);
        assert_eq!(src.next_char().unwrap(), Some('x'));
    }

    #[test]
    fn decodes_multibyte() {
        let mut src = CharSource::new("é✓".as_bytes());
        assert_eq!(src.next_char().unwrap(), Some('é'));
        assert_eq!(src.next_char().unwrap(), Some('✓'));
        assert_eq!(src.next_char().unwrap(), None);
    }

    #[test]
    fn invalid_utf8_is_a_read_error() {
        let bytes: &[u8] = &[b'a', 0xff, b'b'];
        let mut src = CharSource::new(bytes);
        assert_eq!(src.next_char().unwrap(), Some('a'));
        assert!(src.next_char().is_err());
    }

    #[test]
    fn tracks_line_and_column() {
        let mut src = CharSource::new("ab\ncd".as_bytes());
        src.next_char().unwrap();
        assert_eq!(src.position(), Position::new(1, 1));
        src.next_char().unwrap();
        src.next_char().unwrap();
        assert_eq!(src.position(), Position::new(1, 3));
        src.peek_char().unwrap();
        assert_eq!(src.position(), Position::new(1, 3));
        src.next_char().unwrap();
        assert_eq!(src.position(), Position::new(2, 1));
        src.next_char().unwrap();
        assert_eq!(src.position(), Position::new(2, 2));
    }
}
