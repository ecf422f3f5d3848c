//! Raw binary import and export of row storage.
//!
//! The transferred bytes are the row storage exactly as it sits in memory:
//! native-endian, tightly packed, row-major. No schema travels with them, so a
//! dump can only be loaded meaningfully into a buffer with the same layout on
//! a machine with the same word size and byte order.

use alloc::vec::Vec;

use crate::buffer::Buffer;
use crate::config::check;
use crate::error::ConstructError;

impl Buffer {
    /// Returns an owned copy of the row storage.
    #[must_use]
    pub fn dump(&self) -> Vec<u8> {
        self.data.clone()
    }

    /// Replaces the row storage with `bytes`.
    ///
    /// When `bytes` differs in length from the current storage, the buffer is
    /// first resized to `bytes.len() / stride` rows.
    ///
    /// # Errors
    ///
    /// Returns `ConstructError::InvalidData` if `bytes.len()` is not a whole
    /// number of rows.
    pub fn load(&mut self, bytes: &[u8]) -> Result<(), ConstructError> {
        let stride = self.stride();
        check!(
            bytes.len() % stride == 0,
            ConstructError::InvalidData {
                expected: bytes.len() / stride * stride,
                provided: bytes.len(),
            }
        );
        if bytes.len() != self.byte_len() {
            log::trace!(
                "loading {} bytes resizes buffer from {} bytes",
                bytes.len(),
                self.byte_len()
            );
            self.resize(bytes.len() / stride)?;
        }
        self.data.copy_from_slice(bytes);
        Ok(())
    }
}
