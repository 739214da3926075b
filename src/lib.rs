//!A simple library to read single lines of large, line delimited streams using an index which
//!gets built once

pub mod error;
/// Async wrapper around async_std::fs::File
pub mod file;
/// Basic implementation for any std::io::Read + Seek
pub mod getter;
/// The index of line boundaries
pub mod index;
pub mod options;
mod read;
/// Cheaply clonable in-memory reader
pub mod shared;

pub use error::{ArgumentError, Error};
pub use file::{AsyncReadByLine, LineFile};
pub use getter::LineGetter;
pub use index::{LineIndex, LineSpan};
pub use options::Options;
pub use shared::SharedLineGetter;

use std::io;

use read::ReadPlan;

pub type Result<T> = std::result::Result<T, error::Error>;

pub trait Indexable {
    /// Returns a reference to the line index.
    fn get_index(&self) -> &LineIndex;

    /// Returns the total amount of lines.
    #[inline]
    fn count(&self) -> u64 {
        self.get_index().count()
    }
}

pub trait IndexableFile: Indexable {
    /// Should seek the underlying stream to `offset`
    fn seek_to(&mut self, offset: u64) -> Result<()>;

    /// Should read exactly `len` bytes from the current position and append them to `buf`. If
    /// that's not possible, `buf` has to contain all bytes that could be read.
    fn read_current(&mut self, len: usize, buf: &mut Vec<u8>) -> io::Result<()>;

    /// Lines longer than the returned value get truncated
    fn max_line_len(&self) -> u64;
}

/// A trait defining behavior for reading certain lines directly from indexed streams. Lines are
/// numbered from 1 to `count()`.
pub trait ReadByLine: IndexableFile {
    /// Reads the given line.
    ///
    /// * If the line doesn't exist, `Error::InvalidArgument` is returned and no io happens.
    /// * If the line is longer than `max_line_len`, `Error::LineTruncated` holding the first
    ///   `max_line_len` bytes is returned.
    /// * If the stream can't deliver the whole line, `Error::ShortRead` holding everything read is
    ///   returned.
    fn get_line(&mut self, line: u64) -> Result<Vec<u8>> {
        let plan = ReadPlan::new(self.get_index(), line, self.max_line_len())?;
        self.seek_to(plan.begin)?;

        let mut buf = Vec::with_capacity(plan.len);
        let res = self.read_current(plan.len, &mut buf);
        plan.finish(buf, res)
    }

    /// Reads the given line as `String`
    fn read_line(&mut self, line: u64) -> Result<String> {
        Ok(String::from_utf8(self.get_line(line)?)?)
    }

    /// Reads the given line and appends it to `buf`. On errors carrying partial content, `buf`
    /// receives that content too.
    fn read_line_raw(&mut self, line: u64, buf: &mut Vec<u8>) -> Result<usize> {
        match self.get_line(line) {
            Ok(data) => {
                buf.extend_from_slice(&data);
                Ok(data.len())
            }
            Err(err) => {
                if let Some(partial) = err.partial_content() {
                    buf.extend_from_slice(partial);
                }
                Err(err)
            }
        }
    }

    /// Returns an iterator over all lines, in order
    #[inline]
    fn lines(&mut self) -> Lines<'_, Self>
    where
        Self: Sized,
    {
        Lines {
            reader: self,
            next: 1,
        }
    }
}

/// Iterator over the lines of a `ReadByLine`. Created by `ReadByLine::lines`.
#[derive(Debug)]
pub struct Lines<'a, R> {
    reader: &'a mut R,
    next: u64,
}

impl<'a, R: ReadByLine> Iterator for Lines<'a, R> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.reader.count() {
            return None;
        }
        let line = self.reader.get_line(self.next);
        self.next += 1;
        Some(line)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.reader.count() + 1).saturating_sub(self.next) as usize;
        (left, Some(left))
    }
}
