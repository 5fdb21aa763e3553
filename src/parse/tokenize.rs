use std::io::{self, BufRead, BufReader, Read};

use log::{debug, trace};

use super::classify::{
    BACKSLASH, DOLLAR, HASH, LBRACE, LPAREN, RPAREN, is_brace_open, is_comment_start,
    is_delimiter, is_dollar, is_paren_open, is_quote, is_space, is_word_boundary,
};
use super::source::CharSource;
use super::types::{Construct, Frame, Position};
use crate::error::{Error, SplitError};

/// Split a byte stream into shell tokens.
///
/// On failure the returned [`SplitError`] holds every token committed before
/// the failing one.
pub fn split<R: Read>(input: R) -> Result<Vec<String>, SplitError> {
    collect(Tokenizer::new(BufReader::new(input)))
}

/// Split a string into shell tokens.
pub fn split_str(input: &str) -> Result<Vec<String>, SplitError> {
    collect(Tokenizer::new(input.as_bytes()))
}

fn collect<R: BufRead>(mut tokenizer: Tokenizer<R>) -> Result<Vec<String>, SplitError> {
    let mut tokens = Vec::new();
    loop {
        match tokenizer.next_token() {
            Ok(Some(token)) => tokens.push(token),
            Ok(None) => return Ok(tokens),
            Err(error) => {
                debug!("split aborted after {} token(s): {error}", tokens.len());
                return Err(SplitError { tokens, error });
            }
        }
    }
}

/// Single-pass tokenizer over a buffered reader.
///
/// Each call to [`next_token`](Tokenizer::next_token) skips separating blanks
/// and newlines, then reads exactly one token. Quotes, substitutions,
/// arithmetic expressions and groups come back whole; their contents are
/// only scanned far enough to find the matching closer.
///
/// As an [`Iterator`] it yields `Ok(token)` until end of input and stops for
/// good after the first `Err`.
pub struct Tokenizer<R> {
    source: CharSource<R>,
    buf: String,
    failed: bool,
}

impl<R: BufRead> Tokenizer<R> {
    pub fn new(reader: R) -> Self {
        Self {
            source: CharSource::new(reader),
            buf: String::new(),
            failed: false,
        }
    }

    /// Read the next token, or `None` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Option<String>, Error> {
        loop {
            let Some(c) = self.source.next_char()? else {
                return Ok(None);
            };
            if is_space(c) {
                self.skip_spaces()?;
                continue;
            }
            let at = self.source.position();
            if let Err(e) = self.dispatch(c, at) {
                self.buf.clear();
                return Err(e);
            }
            let token = std::mem::take(&mut self.buf);
            trace!("token {token:?} at {at}");
            return Ok(Some(token));
        }
    }

    fn dispatch(&mut self, c: char, at: Position) -> Result<(), Error> {
        match c {
            c if is_brace_open(c) => self.read_nested(Frame::Brace, at),
            c if is_paren_open(c) => self.read_nested(Frame::Group, at),
            c if is_dollar(c) => self.read_dollar(at),
            c if is_quote(c) => self.read_quote(c, at),
            c if is_delimiter(c) => Ok(self.read_delimiter(c)?),
            c if is_comment_start(c) => Ok(self.read_comment()?),
            c => Ok(self.read_word(c, None)?),
        }
    }

    fn skip_spaces(&mut self) -> io::Result<()> {
        while self.source.next_if(is_space)?.is_some() {}
        Ok(())
    }

    /// Copy `first` and the characters after it up to a word boundary.
    ///
    /// The boundary itself stays in the source for the next read.
    fn read_word(&mut self, first: char, closer: Option<char>) -> io::Result<()> {
        self.buf.push(first);
        while let Some(c) = self.source.next_if(|c| !is_word_boundary(c, closer))? {
            self.buf.push(c);
        }
        Ok(())
    }

    fn read_delimiter(&mut self, first: char) -> io::Result<()> {
        self.buf.push(first);
        while let Some(c) = self.source.next_if(is_delimiter)? {
            self.buf.push(c);
        }
        Ok(())
    }

    /// Copy the body of a quoted string, dropping the quotes.
    ///
    /// A quote character preceded by a backslash is part of the body, and so
    /// is the backslash.
    fn read_quote(&mut self, quote: char, at: Position) -> Result<(), Error> {
        let mut prev = None;
        loop {
            let Some(c) = self.source.next_char()? else {
                return Err(Error::InvalidToken {
                    construct: Construct::Quote(quote),
                    position: at,
                });
            };
            if c == quote && prev != Some(BACKSLASH) {
                return Ok(());
            }
            prev = Some(c);
            self.buf.push(c);
        }
    }

    // Comments run to the end of the input, newlines included.
    fn read_comment(&mut self) -> io::Result<()> {
        self.buf.push(HASH);
        while let Some(c) = self.source.next_char()? {
            self.buf.push(c);
        }
        Ok(())
    }

    fn read_dollar(&mut self, at: Position) -> Result<(), Error> {
        match self.dollar_frame()? {
            Some(frame) => self.read_nested(frame, at),
            None => Ok(self.read_word(DOLLAR, None)?),
        }
    }

    /// Decide what follows a consumed `$`: `$((` opens an arithmetic
    /// expression, `$(` a command substitution, anything else is a word.
    fn dollar_frame(&mut self) -> io::Result<Option<Frame>> {
        if self.source.next_if(is_paren_open)?.is_none() {
            return Ok(None);
        }
        if self.source.next_if(is_paren_open)?.is_some() {
            Ok(Some(Frame::Arithmetic { prev: None }))
        } else {
            Ok(Some(Frame::Substitution))
        }
    }

    /// Copy a nested construct through its matching closer.
    ///
    /// Open constructs live on an explicit stack so arbitrarily deep input
    /// does not grow the call stack. Running out of input with a frame still
    /// open reports the innermost one.
    fn read_nested(&mut self, outer: Frame, at: Position) -> Result<(), Error> {
        self.buf.push_str(outer.opener());
        let mut stack = vec![(outer, at)];

        while let Some(&(frame, opened)) = stack.last() {
            let Some(c) = self.source.next_char()? else {
                return Err(Error::InvalidToken {
                    construct: frame.construct(),
                    position: opened,
                });
            };
            match frame {
                _ if c == DOLLAR && frame.expands_dollar() => {
                    let at = self.source.position();
                    match self.dollar_frame()? {
                        Some(inner) => {
                            self.buf.push_str(inner.opener());
                            stack.push((inner, at));
                        }
                        None => self.read_word(DOLLAR, Some(frame.closer()))?,
                    }
                }
                Frame::Arithmetic { prev } if c == RPAREN && prev == Some(RPAREN) => {
                    self.buf.push(c);
                    stack.pop();
                }
                Frame::Arithmetic { .. } if c == LPAREN => {
                    self.buf.push(c);
                    stack.push((Frame::Group, self.source.position()));
                }
                Frame::Arithmetic { .. } => {
                    self.buf.push(c);
                    if let Some(top) = stack.last_mut() {
                        top.0 = Frame::Arithmetic { prev: Some(c) };
                    }
                }
                Frame::Brace if c == LBRACE => {
                    self.buf.push(c);
                    stack.push((Frame::Brace, self.source.position()));
                }
                Frame::Group | Frame::Substitution if c == LPAREN => {
                    self.buf.push(c);
                    stack.push((Frame::Group, self.source.position()));
                }
                _ if c == frame.closer() => {
                    self.buf.push(c);
                    stack.pop();
                }
                _ => self.buf.push(c),
            }
        }
        Ok(())
    }
}

impl<R: BufRead> Iterator for Tokenizer<R> {
    type Item = Result<String, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_token() {
            Ok(token) => token.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
