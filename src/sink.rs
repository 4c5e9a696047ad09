use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// In-memory destination for formatted log output.
///
/// Clones share one buffer: the logger writes through one handle while the
/// monitor reads through another. Nothing is ever removed from the buffer.
#[derive(Clone, Default)]
pub struct CaptureSink {
    buf: Rc<RefCell<Vec<u8>>>,
}

impl CaptureSink {
    /// Create an empty sink
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, decoded as UTF-8 (invalid bytes replaced).
    #[must_use]
    pub fn snapshot(&self) -> String {
        String::from_utf8_lossy(&self.buf.borrow()).into_owned()
    }

    /// Raw copy of the buffer
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buf.borrow().clone()
    }

    /// Number of buffered bytes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.borrow().len()
    }

    /// Check if nothing has been written
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.borrow().is_empty()
    }
}

impl Write for CaptureSink {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.borrow_mut().extend_from_slice(bytes);
        Ok(bytes.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl core::fmt::Debug for CaptureSink {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CaptureSink")
            .field("len", &self.len())
            .finish()
    }
}
