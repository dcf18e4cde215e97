use crate::error::{Error, Result};

/// Read access to the debuggee's address space.
///
/// Implementations report unreadable memory as [`Error::Unmapped`] rather
/// than returning zero-filled buffers.
pub trait ReadMemory {
    /// Read exactly `size` bytes starting at `address`.
    fn read_bytes(&self, address: u32, size: usize) -> Result<Vec<u8>>;

    /// Read a little-endian doubleword.
    fn read_u32(&self, address: u32) -> Result<u32> {
        let bytes = self.read_bytes(address, 4)?;
        let array: [u8; 4] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| Error::Unmapped { address })?;
        Ok(u32::from_le_bytes(array))
    }

    /// Check whether at least the byte at `address` is readable.
    fn is_mapped(&self, address: u32) -> bool {
        self.read_bytes(address, 1).is_ok()
    }
}

impl<T: ReadMemory + ?Sized> ReadMemory for &T {
    fn read_bytes(&self, address: u32, size: usize) -> Result<Vec<u8>> {
        (**self).read_bytes(address, size)
    }

    fn read_u32(&self, address: u32) -> Result<u32> {
        (**self).read_u32(address)
    }

    fn is_mapped(&self, address: u32) -> bool {
        (**self).is_mapped(address)
    }
}
