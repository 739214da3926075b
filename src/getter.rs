use std::{
    io::{self, Read, Seek, SeekFrom},
    sync::Arc,
};

use crate::{
    error::ArgumentError, index::LineIndex, options::Options, read::read_exact_into, Indexable,
    IndexableFile, ReadByLine, Result,
};

/// A wrapper around any seekable reader which implements `ReadByLine` and holds an index of the
/// lines.
///
/// The getter doesn't lock the reader. Each concurrent user needs its own reader, which can share
/// the index using `duplicate`.
#[derive(Debug)]
pub struct LineGetter<R: Read + Seek> {
    reader: R,
    index: Arc<LineIndex>,
    options: Options,
}

impl<R: Read + Seek> LineGetter<R> {
    /// Scans `reader` once and creates a new `LineGetter` for it.
    ///
    /// Returns an error if an io error occurs while scanning
    #[inline]
    pub fn new(reader: R) -> Result<LineGetter<R>> {
        Self::with_options(reader, Options::default())
    }

    /// Same as `new` but uses custom `options`.
    pub fn with_options(mut reader: R, options: Options) -> Result<LineGetter<R>> {
        let index = LineIndex::build(&mut reader, options.chunk_size)?;
        Ok(Self::with_index(reader, Arc::new(index), options))
    }

    /// Creates a new `LineGetter` out of an optional reader. Returns
    /// `ArgumentError::MissingStream` if there is none.
    #[inline]
    pub fn from_optional(reader: Option<R>) -> Result<LineGetter<R>> {
        let reader = reader.ok_or(ArgumentError::MissingStream)?;
        Self::new(reader)
    }

    /// Creates a new `LineGetter` using an existing index. The index won't be validated. Using an
    /// index built for other data results in garbage or `ShortRead` errors.
    #[inline]
    pub fn with_index(reader: R, index: Arc<LineIndex>, options: Options) -> LineGetter<R> {
        Self {
            reader,
            index,
            options,
        }
    }

    /// Creates a new `LineGetter` with the current index. `reader` should contain the same
    /// data used in `&self` or the index might be invalid for the given reader
    #[inline]
    pub fn duplicate<U: Read + Seek>(&self, reader: U) -> LineGetter<U> {
        LineGetter::with_index(reader, Arc::clone(&self.index), self.options)
    }

    /// Returns a shared reference to the index
    #[inline]
    pub fn index(&self) -> &Arc<LineIndex> {
        &self.index
    }

    #[inline]
    pub fn options(&self) -> &Options {
        &self.options
    }

    #[inline]
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Note that the getter assumes the data to stay the same.
    #[inline]
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    #[inline]
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read + Seek> Indexable for LineGetter<R> {
    #[inline(always)]
    fn get_index(&self) -> &LineIndex {
        &self.index
    }
}

impl<R: Read + Seek> IndexableFile for LineGetter<R> {
    #[inline]
    fn seek_to(&mut self, offset: u64) -> Result<()> {
        self.reader.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    #[inline]
    fn read_current(&mut self, len: usize, buf: &mut Vec<u8>) -> io::Result<()> {
        read_exact_into(&mut self.reader, len, buf)
    }

    #[inline(always)]
    fn max_line_len(&self) -> u64 {
        self.options.max_line_len
    }
}

impl<R: Read + Seek> ReadByLine for LineGetter<R> {}

#[cfg(test)]
mod tests {
    use std::{io::Cursor, thread};

    use super::*;

    #[test]
    fn test_duplicate_shares_index() {
        let text = b"a\nbb\nccc".to_vec();
        let getter = LineGetter::new(Cursor::new(text.clone())).unwrap();
        let mut dup = getter.duplicate(Cursor::new(text));

        assert!(Arc::ptr_eq(getter.index(), dup.index()));
        assert_eq!(dup.get_line(3).unwrap(), b"ccc");
    }

    #[test]
    fn test_concurrent_readers() {
        let text: String = (1..=200).map(|i| format!("{}\n", i)).collect();
        let getter = LineGetter::new(Cursor::new(text.clone())).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let mut reader = getter.duplicate(Cursor::new(text.clone()));
                thread::spawn(move || {
                    for line in (1..=200).filter(|i| i % 4 == t) {
                        assert_eq!(reader.read_line(line).unwrap(), line.to_string());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn test_into_inner() {
        let getter = LineGetter::new(Cursor::new("x\ny")).unwrap();
        assert_eq!(getter.options(), &Options::default());
        assert_eq!(getter.get_ref().get_ref(), &"x\ny");
        assert_eq!(getter.into_inner().into_inner(), "x\ny");
    }
}
