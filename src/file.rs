use std::{io::ErrorKind, sync::Arc};

use async_std::{
    fs,
    io::{self, prelude::*, SeekFrom},
    path::Path,
};
use async_trait::async_trait;

use crate::{
    index::{IndexBuilder, LineIndex},
    options::Options,
    read::{check_len, ReadPlan},
    Indexable, Result,
};

/// A wrapper around `async_std::fs::File` which implements `AsyncReadByLine` and holds an index
/// of the lines.
#[derive(Debug)]
pub struct LineFile {
    inner_file: fs::File,
    index: Arc<LineIndex>,
    options: Options,
}

impl LineFile {
    /// Open a file and index its lines.
    ///
    /// Returns an error if an io error occurs while opening or scanning the file
    #[inline]
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<LineFile> {
        Self::open_with(path, Options::default()).await
    }

    /// Same as `open` but uses custom `options`.
    pub async fn open_with<P: AsRef<Path>>(path: P, options: Options) -> Result<LineFile> {
        let mut inner_file = fs::File::open(path).await?;
        let index = scan(&mut inner_file, options.chunk_size).await?;

        Ok(Self {
            inner_file,
            index: Arc::new(index),
            options,
        })
    }

    /// Open a file which was already indexed and use `index` as index.
    /// Expects the index to be built for the files current content.
    pub async fn open_with_index<P: AsRef<Path>>(
        path: P,
        index: Arc<LineIndex>,
        options: Options,
    ) -> Result<LineFile> {
        let inner_file = fs::File::open(path).await?;

        Ok(Self {
            inner_file,
            index,
            options,
        })
    }

    /// Returns a shared reference to the index
    #[inline]
    pub fn index(&self) -> &Arc<LineIndex> {
        &self.index
    }
}

async fn scan(file: &mut fs::File, chunk_size: usize) -> Result<LineIndex> {
    file.seek(SeekFrom::Start(0)).await?;

    let mut builder = IndexBuilder::new();
    let mut buf = vec![0; chunk_size.max(1)];

    loop {
        let n = match file.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        builder.feed(&buf[..n]);
    }

    Ok(builder.finish())
}

impl Indexable for LineFile {
    #[inline]
    fn get_index(&self) -> &LineIndex {
        &self.index
    }
}

/// Async version of `ReadByLine`. Lines are numbered from 1 to `count()`.
#[async_trait]
pub trait AsyncReadByLine: Indexable + Send {
    /// Should seek the underlying stream to `offset`
    async fn seek_to(&mut self, offset: u64) -> Result<()>;

    /// Should read exactly `len` bytes from the current position and append them to `buf`,
    /// keeping the bytes read so far on failure.
    async fn read_current(&mut self, len: usize, buf: &mut Vec<u8>) -> io::Result<()>;

    /// Lines longer than the returned value get truncated
    fn max_line_len(&self) -> u64;

    /// Reads the given line. Errors are the same as for `ReadByLine::get_line`.
    async fn get_line(&mut self, line: u64) -> Result<Vec<u8>> {
        let plan = ReadPlan::new(self.get_index(), line, self.max_line_len())?;
        self.seek_to(plan.begin).await?;

        let mut buf = Vec::with_capacity(plan.len);
        let res = self.read_current(plan.len, &mut buf).await;
        plan.finish(buf, res)
    }

    /// Reads the given line as `String`
    async fn read_line(&mut self, line: u64) -> Result<String> {
        Ok(String::from_utf8(self.get_line(line).await?)?)
    }
}

#[async_trait]
impl AsyncReadByLine for LineFile {
    #[inline]
    async fn seek_to(&mut self, offset: u64) -> Result<()> {
        self.inner_file.seek(SeekFrom::Start(offset)).await?;
        Ok(())
    }

    async fn read_current(&mut self, len: usize, buf: &mut Vec<u8>) -> io::Result<()> {
        let n = (&mut self.inner_file)
            .take(len as u64)
            .read_to_end(buf)
            .await?;
        check_len(n, len)
    }

    #[inline]
    fn max_line_len(&self) -> u64 {
        self.options.max_line_len
    }
}
