//! # Length-Prefixed Wire Reader
//!
//! Cursor over the SSH wire encoding: big-endian `u32` lengths followed by
//! exactly that many bytes. Every read is bounds-checked before slicing.

use super::errors::KeyContainerError;

/// Forward-only cursor over a borrowed buffer.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    buf: &'a [u8],
}

impl<'a> WireReader<'a> {
    /// Start reading at the beginning of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len()
    }

    /// Whether the buffer is fully consumed.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Take exactly `n` bytes.
    pub fn read_bytes(&mut self, n: usize, field: &'static str) -> Result<&'a [u8], KeyContainerError> {
        if n > self.buf.len() {
            return Err(KeyContainerError::Parse {
                field,
                needed: n,
                available: self.buf.len(),
            });
        }
        let (head, rest) = self.buf.split_at(n);
        self.buf = rest;
        Ok(head)
    }

    /// Take a big-endian `u32`.
    pub fn read_u32(&mut self, field: &'static str) -> Result<u32, KeyContainerError> {
        let bytes = self.read_bytes(4, field)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Take a length-prefixed string.
    pub fn read_string(&mut self, field: &'static str) -> Result<&'a [u8], KeyContainerError> {
        let len = self.read_u32(field)? as usize;
        self.read_bytes(len, field)
    }

    /// Take a length-prefixed string and hand back a reader over its contents.
    pub fn read_section(&mut self, field: &'static str) -> Result<WireReader<'a>, KeyContainerError> {
        self.read_string(field).map(WireReader::new)
    }
}
