use std::io::{self, ErrorKind, Read};

use tracing::{debug, trace};

use crate::{
    error::{ArgumentError, Error},
    index::LineIndex,
    Result,
};

/// Describes which bytes have to be read to retrieve a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReadPlan {
    pub(crate) line: u64,
    /// Offset to seek to
    pub(crate) begin: u64,
    /// Amount of bytes to read, never more than the maximum line length
    pub(crate) len: usize,
    /// Length of the full line
    pub(crate) line_len: u64,
}

impl ReadPlan {
    /// Plan reading the 1-based `line`. Fails without touching the stream if `line` doesn't
    /// exist.
    pub(crate) fn new(index: &LineIndex, line: u64, max_line_len: u64) -> Result<Self> {
        let span = index.span(line).ok_or(ArgumentError::LineOutOfRange {
            line,
            count: index.count(),
        })?;

        let line_len = span.len();
        Ok(Self {
            line,
            begin: span.begin,
            len: line_len.min(max_line_len) as usize,
            line_len,
        })
    }

    #[inline]
    pub(crate) fn is_truncated(&self) -> bool {
        self.line_len > self.len as u64
    }

    /// Turns the bytes read and the result of reading them into the lines final result.
    pub(crate) fn finish(&self, buf: Vec<u8>, res: io::Result<()>) -> Result<Vec<u8>> {
        if let Err(source) = res {
            debug!(
                line = self.line,
                read = buf.len(),
                expected = self.len,
                "short read: {}",
                source
            );
            return Err(Error::ShortRead {
                partial: buf,
                expected: self.len,
                source,
            });
        }

        if self.is_truncated() {
            debug!(
                line = self.line,
                line_len = self.line_len,
                "truncated line to {} bytes",
                self.len
            );
            return Err(Error::LineTruncated {
                prefix: buf,
                line_len: self.line_len,
            });
        }

        trace!(line = self.line, len = self.len, "read line");
        Ok(buf)
    }
}

/// Reads exactly `len` bytes from `reader` and appends them to `buf`. If the stream fails or ends
/// early, everything read until then is kept in `buf`.
pub(crate) fn read_exact_into<R: Read>(reader: R, len: usize, buf: &mut Vec<u8>) -> io::Result<()> {
    let n = reader.take(len as u64).read_to_end(buf)?;
    check_len(n, len)
}

#[inline]
pub(crate) fn check_len(read: usize, expected: usize) -> io::Result<()> {
    if read < expected {
        return Err(io::Error::new(
            ErrorKind::UnexpectedEof,
            format!("stream ended after {} of {} bytes", read, expected),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn index(s: &str) -> LineIndex {
        LineIndex::build(&mut Cursor::new(s), 64).unwrap()
    }

    #[test]
    fn test_plan() {
        let index = index("abc\nlonger line");

        let plan = ReadPlan::new(&index, 2, 100).unwrap();
        assert_eq!(plan.begin, 4);
        assert_eq!(plan.len, 11);
        assert!(!plan.is_truncated());

        let plan = ReadPlan::new(&index, 2, 6).unwrap();
        assert_eq!(plan.len, 6);
        assert_eq!(plan.line_len, 11);
        assert!(plan.is_truncated());
    }

    #[test]
    fn test_plan_out_of_range() {
        let index = index("abc\n");
        for line in &[0, 3, u64::MAX] {
            let err = ReadPlan::new(&index, *line, 100).unwrap_err();
            assert!(err.is_invalid_argument());
        }
    }

    #[test]
    fn test_finish() {
        let index = index("0123456789");
        let plan = ReadPlan::new(&index, 1, 4).unwrap();

        match plan.finish(b"0123".to_vec(), Ok(())) {
            Err(Error::LineTruncated { prefix, line_len }) => {
                assert_eq!(prefix, b"0123");
                assert_eq!(line_len, 10);
            }
            res => panic!("unexpected result: {:?}", res),
        }

        // A failed read takes precedence over truncation
        let res = plan.finish(b"01".to_vec(), Err(ErrorKind::UnexpectedEof.into()));
        match res {
            Err(Error::ShortRead {
                partial, expected, ..
            }) => {
                assert_eq!(partial, b"01");
                assert_eq!(expected, 4);
            }
            res => panic!("unexpected result: {:?}", res),
        }
    }

    #[test]
    fn test_read_exact_into() {
        let mut buf = b"x".to_vec();
        read_exact_into(&mut Cursor::new("abcdef"), 3, &mut buf).unwrap();
        assert_eq!(buf, b"xabc");

        let mut buf = Vec::new();
        let err = read_exact_into(&mut Cursor::new("ab"), 3, &mut buf).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
        assert_eq!(buf, b"ab");
    }
}
