//! Byte sinks the formatter writes to.

use crate::defs::Error;

#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

/// Destination for formatted bytes.
pub trait Sink {
    /// Writes all of `bytes`, or fails without writing any of them.
    fn write(&mut self, bytes: &[u8]) -> Result<(), Error>;
}

impl<S: Sink + ?Sized> Sink for &mut S {
    #[inline]
    fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        (**self).write(bytes)
    }
}

/// Sink over a caller-provided fixed buffer.
#[derive(Debug)]
pub struct SliceSink<'a> {
    buf: &'a mut [u8],
    count: usize,
}

impl<'a> SliceSink<'a> {
    /// Creates an empty sink over `buf`.
    pub fn new(buf: &'a mut [u8]) -> Self {
        SliceSink { buf, count: 0 }
    }

    /// Number of bytes written so far.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Free space left in the buffer.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.count
    }

    /// Bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.count]
    }

    /// Bytes written so far as text.
    ///
    /// ## Errors
    ///
    ///  - InvalidArgument: the content is not valid UTF-8.
    pub fn as_str(&self) -> Result<&str, Error> {
        core::str::from_utf8(self.as_bytes()).map_err(|_| Error::InvalidArgument)
    }
}

impl Sink for SliceSink<'_> {
    fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        if bytes.len() > self.remaining() {
            return Err(Error::BufferInsufficient);
        }

        self.buf[self.count..self.count + bytes.len()].copy_from_slice(bytes);
        self.count += bytes.len();

        Ok(())
    }
}

impl Sink for Vec<u8> {
    fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.try_reserve(bytes.len())
            .map_err(|_| Error::MemoryAllocation)?;
        self.extend_from_slice(bytes);
        Ok(())
    }
}

impl Sink for String {
    fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let s = core::str::from_utf8(bytes).map_err(|_| Error::InvalidArgument)?;
        self.try_reserve(s.len())
            .map_err(|_| Error::MemoryAllocation)?;
        self.push_str(s);
        Ok(())
    }
}

/// Console stream a [`Console`] writes to.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleHandle {
    /// Standard output.
    Output,

    /// Standard error.
    Error,
}

/// Sink writing to a console stream.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy)]
pub struct Console {
    handle: ConsoleHandle,
}

#[cfg(feature = "std")]
impl Console {
    /// Console over `handle`.
    pub fn new(handle: ConsoleHandle) -> Self {
        Console { handle }
    }

    /// Console over standard output.
    pub fn stdout() -> Self {
        Self::new(ConsoleHandle::Output)
    }

    /// Console over standard error.
    pub fn stderr() -> Self {
        Self::new(ConsoleHandle::Error)
    }

    /// Stream the console writes to.
    pub fn handle(&self) -> ConsoleHandle {
        self.handle
    }
}

#[cfg(feature = "std")]
impl Sink for Console {
    fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        use std::io::Write;

        let res = match self.handle {
            ConsoleHandle::Output => std::io::stdout().lock().write_all(bytes),
            ConsoleHandle::Error => std::io::stderr().lock().write_all(bytes),
        };

        res.map_err(|e| {
            tracing::debug!(error = %e, handle = ?self.handle, "console write failed");
            Error::OutputFailed
        })
    }
}
