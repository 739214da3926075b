/// Default ceiling for the length of a single line (0x3FFF)
pub const MAX_LINE_LEN: u64 = 16383;

/// Default amount of bytes read at once while indexing
pub const CHUNK_SIZE: usize = 16383;

/// Settings used for building an index and reading lines from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub(crate) max_line_len: u64,
    pub(crate) chunk_size: usize,
}

impl Options {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines longer than `max_line_len` get truncated to `max_line_len` bytes when read.
    #[inline]
    pub fn max_line_len(mut self, max_line_len: u64) -> Self {
        self.max_line_len = max_line_len;
        self
    }

    /// Size of the buffer used while scanning the stream. Has no effect on the resulting index.
    #[inline]
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    #[inline]
    pub fn get_max_line_len(&self) -> u64 {
        self.max_line_len
    }

    #[inline]
    pub fn get_chunk_size(&self) -> usize {
        self.chunk_size
    }
}

impl Default for Options {
    #[inline]
    fn default() -> Self {
        Self {
            max_line_len: MAX_LINE_LEN,
            chunk_size: CHUNK_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = Options::new();
        assert_eq!(opts.get_max_line_len(), 16383);
        assert_eq!(opts.get_chunk_size(), 16383);
    }

    #[test]
    fn test_zero_chunk() {
        let opts = Options::new().chunk_size(0).max_line_len(0);
        assert_eq!(opts.get_chunk_size(), 1);
        assert_eq!(opts.get_max_line_len(), 0);
    }
}
