use std::io::{ErrorKind, Read, Seek, SeekFrom};

use itertools::Itertools;
use memchr::memchr_iter;
use tracing::debug;

use crate::Result;

/// Byte which separates two lines
pub const DELIMITER: u8 = b'\n';

/// Position of a single line within the stream. `begin..end` is the lines content, the
/// delimiter is not included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineSpan {
    pub begin: u64,
    pub end: u64,
}

impl LineSpan {
    #[inline]
    pub fn len(&self) -> u64 {
        self.end - self.begin
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }
}

/// Contains an in-memory line-index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Start offset of every line, followed by one sentinel entry of `stream_len + 1`. This way
    /// line `i` always ends one byte before line `i + 1` starts, including the last one.
    starts: Vec<u64>,
}

impl LineIndex {
    /// Scans all of `reader` from its start and records the boundaries of each line. Any io error
    /// aborts the scan.
    pub fn build<R: Read + Seek>(reader: &mut R, chunk_size: usize) -> Result<Self> {
        reader.seek(SeekFrom::Start(0))?;

        let mut builder = IndexBuilder::new();
        let mut buf = vec![0; chunk_size.max(1)];

        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            builder.feed(&buf[..n]);
        }

        Ok(builder.finish())
    }

    /// Returns the amount of lines. This is always at least 1, since an empty stream consists of
    /// a single empty line.
    #[inline]
    pub fn count(&self) -> u64 {
        (self.starts.len() - 1) as u64
    }

    /// Amount of bytes the stream had while it was indexed
    #[inline]
    pub fn stream_len(&self) -> u64 {
        self.starts[self.starts.len() - 1] - 1
    }

    /// Get the span of the 1-based `line`. Returns `None` for `0` and lines past the end.
    pub fn span(&self, line: u64) -> Option<LineSpan> {
        if line == 0 || line > self.count() {
            return None;
        }

        let pos = (line - 1) as usize;
        Some(LineSpan {
            begin: self.starts[pos],
            end: self.starts[pos + 1] - 1,
        })
    }

    /// Iterate over the spans of all lines in order.
    pub fn spans(&self) -> impl Iterator<Item = LineSpan> + '_ {
        self.starts
            .iter()
            .tuple_windows()
            .map(|(begin, next)| LineSpan {
                begin: *begin,
                end: next - 1,
            })
    }
}

/// Incrementally builds a `LineIndex` out of consecutive chunks of a stream.
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    starts: Vec<u64>,
    offset: u64,
}

impl IndexBuilder {
    #[inline]
    pub fn new() -> Self {
        Self {
            starts: vec![0],
            offset: 0,
        }
    }

    /// Feed the next chunk of the stream. Chunks must be passed in order and without gaps.
    pub fn feed(&mut self, chunk: &[u8]) {
        let offset = self.offset;
        self.starts
            .extend(memchr_iter(DELIMITER, chunk).map(|pos| offset + pos as u64 + 1));
        self.offset += chunk.len() as u64;
    }

    /// Finish the index. The trailing segment is always a line, even if it is empty.
    pub fn finish(self) -> LineIndex {
        let mut starts = self.starts;
        starts.push(self.offset + 1);

        let index = LineIndex { starts };
        debug!(
            lines = index.count(),
            bytes = index.stream_len(),
            "built line index"
        );
        index
    }
}

impl Default for IndexBuilder {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
