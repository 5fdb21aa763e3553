//! Types shared by the character source, the tokenizer and the error layer.

use std::fmt;

use super::classify::{RBRACE, RPAREN};

/// Location of a character in the input, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} column {}", self.line, self.column)
    }
}

/// A construct that must be closed before its token can be committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    /// `'...'` or `"..."`, carrying the quote character.
    Quote(char),
    /// `$(...)`
    Substitution,
    /// `$((...))`
    Arithmetic,
    /// `{...}`
    Brace,
    /// `(...)`
    Group,
}

impl Construct {
    pub fn describe(&self) -> &'static str {
        match self {
            Construct::Quote('\'') => "single-quoted string",
            Construct::Quote(_) => "double-quoted string",
            Construct::Substitution => "command substitution",
            Construct::Arithmetic => "arithmetic expression",
            Construct::Brace => "brace group",
            Construct::Group => "parenthesized group",
        }
    }
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// One open nested construct on the tokenizer's frame stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Frame {
    Substitution,
    /// `prev` is the last character copied at this level; two `)` in a row
    /// close the expression.
    Arithmetic { prev: Option<char> },
    Brace,
    Group,
}

impl Frame {
    /// Text written to the token when the frame is opened.
    pub fn opener(&self) -> &'static str {
        match self {
            Frame::Substitution => "$(",
            Frame::Arithmetic { .. } => "$((",
            Frame::Brace => "{",
            Frame::Group => "(",
        }
    }

    pub fn closer(&self) -> char {
        match self {
            Frame::Brace => RBRACE,
            _ => RPAREN,
        }
    }

    /// Whether `$` starts a nested substitution inside this frame.
    pub fn expands_dollar(&self) -> bool {
        matches!(self, Frame::Substitution | Frame::Arithmetic { .. })
    }

    pub fn construct(&self) -> Construct {
        match self {
            Frame::Substitution => Construct::Substitution,
            Frame::Arithmetic { .. } => Construct::Arithmetic,
            Frame::Brace => Construct::Brace,
            Frame::Group => Construct::Group,
        }
    }
}
