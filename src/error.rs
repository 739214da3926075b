use std::{io, string::FromUtf8Error};

use thiserror::Error;

/// Reasons for rejecting an argument. Always detected before any I/O happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArgumentError {
    /// No stream was passed in
    #[error("no stream to index")]
    MissingStream,
    /// Requested a line outside of `1..=count`
    #[error("line {line} is out of range 1..={count}")]
    LineOutOfRange { line: u64, count: u64 },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ArgumentError),

    #[error("io failure: {0}")]
    Io(#[from] io::Error),

    /// The stream could not supply the whole line. `partial` holds everything that was read.
    #[error("short read: got {} of {expected} bytes: {source}", .partial.len())]
    ShortRead {
        partial: Vec<u8>,
        expected: usize,
        #[source]
        source: io::Error,
    },

    /// The line is longer than the configured maximum. `prefix` holds exactly the maximum amount
    /// of bytes from the start of the line.
    #[error("line truncated to {} of {line_len} bytes", .prefix.len())]
    LineTruncated { prefix: Vec<u8>, line_len: u64 },

    #[error("line is not valid utf-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

impl Error {
    /// Returns `true` if the error only signals that the returned content is incomplete in an
    /// expected way, i.e. the line was truncated.
    #[inline]
    pub fn is_soft(&self) -> bool {
        matches!(self, Self::LineTruncated { .. })
    }

    #[inline]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Bytes of the line which could be read before the error occurred, if any.
    pub fn partial_content(&self) -> Option<&[u8]> {
        match self {
            Self::ShortRead { partial, .. } => Some(partial),
            Self::LineTruncated { prefix, .. } => Some(prefix),
            Self::Utf8(e) => Some(e.as_bytes()),
            _ => None,
        }
    }

    /// Same as `partial_content` but takes ownership of the bytes.
    pub fn into_partial(self) -> Option<Vec<u8>> {
        match self {
            Self::ShortRead { partial, .. } => Some(partial),
            Self::LineTruncated { prefix, .. } => Some(prefix),
            Self::Utf8(e) => Some(e.into_bytes()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soft() {
        let truncated = Error::LineTruncated {
            prefix: b"abc".to_vec(),
            line_len: 10,
        };
        assert!(truncated.is_soft());
        assert_eq!(truncated.partial_content(), Some(&b"abc"[..]));
        assert_eq!(truncated.to_string(), "line truncated to 3 of 10 bytes");

        let short = Error::ShortRead {
            partial: b"ab".to_vec(),
            expected: 5,
            source: io::ErrorKind::UnexpectedEof.into(),
        };
        assert!(!short.is_soft());
        assert_eq!(short.into_partial(), Some(b"ab".to_vec()));
    }

    #[test]
    fn test_invalid_argument() {
        let err: Error = ArgumentError::LineOutOfRange { line: 0, count: 3 }.into();
        assert!(err.is_invalid_argument());
        assert!(err.partial_content().is_none());
        assert_eq!(
            err.to_string(),
            "invalid argument: line 0 is out of range 1..=3"
        );
    }
}
