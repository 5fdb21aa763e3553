use std::io;

use thiserror::Error;

use crate::parse::types::{Construct, Position};

/// Why tokenization stopped early.
#[derive(Debug, Error)]
pub enum Error {
    /// A quote, substitution, arithmetic expression or group was opened and
    /// the input ended before its closer.
    #[error("invalid token: unterminated {construct} opened at {position}")]
    InvalidToken {
        construct: Construct,
        position: Position,
    },
    /// The underlying reader failed with something other than end of stream.
    #[error(transparent)]
    Read(#[from] io::Error),
}

impl Error {
    pub fn is_invalid_token(&self) -> bool {
        matches!(self, Error::InvalidToken { .. })
    }
}

/// Failure of a whole [`split`](crate::split) call.
///
/// Carries every token committed before the failure alongside its cause.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct SplitError {
    pub tokens: Vec<String>,
    #[source]
    pub error: Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_token_message_names_construct_and_position() {
        let err = Error::InvalidToken {
            construct: Construct::Substitution,
            position: Position::new(1, 6),
        };
        assert_eq!(
            err.to_string(),
            "invalid token: unterminated command substitution opened at line 1 column 6"
        );
        assert!(err.is_invalid_token());
    }

    #[test]
    fn read_error_is_transparent() {
        let err = Error::from(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
        assert_eq!(err.to_string(), "pipe closed");
        assert!(!err.is_invalid_token());
        match err {
            Error::Read(e) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("unexpected {other:?}"),
        }
    }
}
