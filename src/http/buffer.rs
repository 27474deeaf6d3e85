use bytes::{Buf, BytesMut};

/// Accumulates raw socket bytes for a single connection.
///
/// Consumed bytes are dropped from the front of the buffer rather than
/// tracked by offset, so the buffer never holds more than the unparsed tail.
#[derive(Debug, Default)]
pub struct ByteBuffer {
    inner: BytesMut,
}

impl ByteBuffer {
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: BytesMut::with_capacity(capacity),
        }
    }

    /// Appends a freshly read chunk.
    pub fn extend_from_slice(&mut self, chunk: &[u8]) {
        self.inner.extend_from_slice(chunk);
    }

    /// Returns the index of the first occurrence of `marker`, if any.
    pub fn find(&self, marker: &[u8]) -> Option<usize> {
        if marker.is_empty() || marker.len() > self.inner.len() {
            return None;
        }
        self.inner
            .windows(marker.len())
            .position(|w| w == marker)
    }

    pub fn starts_with(&self, prefix: &[u8]) -> bool {
        self.inner.starts_with(prefix)
    }

    /// Removes and returns the first `n` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `n` is greater than the buffered length.
    pub fn consume(&mut self, n: usize) -> BytesMut {
        self.inner.split_to(n)
    }

    /// Drops the first `n` bytes without returning them.
    pub fn discard(&mut self, n: usize) {
        self.inner.advance(n);
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.inner
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
