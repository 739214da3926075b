use std::{
    io::{self, Cursor},
    sync::Arc,
};

use crate::{
    getter::LineGetter, index::LineIndex, options::Options, Indexable, IndexableFile, ReadByLine,
    Result,
};

// little shortcut
pub trait Shareable: AsRef<[u8]> + Send + Sync {}
impl<T: AsRef<[u8]> + Send + Sync> Shareable for T {}

/// A wrapper around `LineGetter` over in-memory data which can be cloned very cheaply. Every
/// clone has its own cursor, so clones can be moved to different threads.
#[derive(Debug)]
pub struct SharedLineGetter<T: Shareable> {
    // requried to allow duplicating the getter
    data: SharedData<T>,
    getter: LineGetter<Cursor<SharedData<T>>>,
}

/// A wrapper around Arc<T> to allow using an arc as reader for Cursor<Arc<T>>
#[derive(Debug)]
pub struct SharedData<T: Shareable>(Arc<T>);

impl<T: Shareable> Clone for SharedData<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: Shareable> AsRef<[u8]> for SharedData<T> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref().as_ref()
    }
}

impl<T: Shareable> From<T> for SharedData<T> {
    #[inline]
    fn from(s: T) -> Self {
        Self(Arc::new(s))
    }
}

impl<T: Shareable> From<Arc<T>> for SharedData<T> {
    #[inline]
    fn from(s: Arc<T>) -> Self {
        Self(s)
    }
}

impl From<&str> for SharedData<String> {
    #[inline]
    fn from(s: &str) -> Self {
        Self(Arc::new(s.to_owned()))
    }
}

impl<T: Shareable> SharedLineGetter<T> {
    /// Indexes `s` and creates a new `SharedLineGetter`.
    #[inline]
    pub fn new<U: Into<SharedData<T>>>(s: U) -> Result<SharedLineGetter<T>> {
        Self::with_options(s, Options::default())
    }

    /// Same as `new` but uses custom `options`.
    pub fn with_options<U: Into<SharedData<T>>>(
        s: U,
        options: Options,
    ) -> Result<SharedLineGetter<T>> {
        let data = s.into();
        let getter = LineGetter::with_options(Cursor::new(data.clone()), options)?;
        Ok(Self { data, getter })
    }

    /// Returns the data lines are read from
    #[inline]
    pub fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    /// Returns a shared reference to the index
    #[inline]
    pub fn index(&self) -> &Arc<LineIndex> {
        self.getter.index()
    }
}

impl<T: Shareable> Indexable for SharedLineGetter<T> {
    #[inline]
    fn get_index(&self) -> &LineIndex {
        self.getter.get_index()
    }
}

impl<T: Shareable> IndexableFile for SharedLineGetter<T> {
    #[inline]
    fn seek_to(&mut self, offset: u64) -> Result<()> {
        self.getter.seek_to(offset)
    }

    #[inline]
    fn read_current(&mut self, len: usize, buf: &mut Vec<u8>) -> io::Result<()> {
        self.getter.read_current(len, buf)
    }

    #[inline]
    fn max_line_len(&self) -> u64 {
        self.getter.max_line_len()
    }
}

impl<T: Shareable> Clone for SharedLineGetter<T> {
    /// Does not clone the data or the index but the references to them
    #[inline]
    fn clone(&self) -> Self {
        let data = self.data.clone();
        Self {
            getter: self.getter.duplicate(Cursor::new(data.clone())),
            data,
        }
    }
}

impl<T: Shareable> ReadByLine for SharedLineGetter<T> {}
