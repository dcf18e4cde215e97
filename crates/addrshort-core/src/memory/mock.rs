//! Sparse in-memory reader for unit tests.

use std::collections::BTreeMap;

use super::ReadMemory;
use crate::error::{Error, Result};

/// Memory double where only explicitly written bytes are mapped
#[derive(Debug, Clone, Default)]
pub struct MockMemoryReader {
    bytes: BTreeMap<u32, u8>,
}

impl ReadMemory for MockMemoryReader {
    fn read_bytes(&self, address: u32, size: usize) -> Result<Vec<u8>> {
        (0..size)
            .map(|i| {
                u32::try_from(i)
                    .ok()
                    .and_then(|i| address.checked_add(i))
                    .and_then(|a| self.bytes.get(&a).copied())
                    .ok_or(Error::Unmapped { address })
            })
            .collect()
    }
}

/// Builder for [`MockMemoryReader`]
#[derive(Debug, Clone, Default)]
pub struct MockMemoryBuilder {
    reader: MockMemoryReader,
}

impl MockMemoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_bytes(mut self, address: u32, data: &[u8]) -> Self {
        for (i, byte) in data.iter().enumerate() {
            self.reader.bytes.insert(address + i as u32, *byte);
        }
        self
    }

    pub fn write_u32(self, address: u32, value: u32) -> Self {
        self.write_bytes(address, &value.to_le_bytes())
    }

    /// Map `size` zero bytes at `address`
    pub fn zeroed(self, address: u32, size: usize) -> Self {
        self.write_bytes(address, &vec![0; size])
    }

    pub fn build(self) -> MockMemoryReader {
        self.reader
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_u32_little_endian() {
        let reader = MockMemoryBuilder::new().write_u32(0x1000, 0x004026C0).build();
        assert_eq!(reader.read_u32(0x1000).unwrap(), 0x004026C0);
        assert_eq!(reader.read_bytes(0x1000, 2).unwrap(), vec![0xC0, 0x26]);
    }

    #[test]
    fn test_partial_read_fails() {
        let reader = MockMemoryBuilder::new().write_bytes(0x1000, &[1, 2]).build();
        assert!(matches!(
            reader.read_u32(0x1000),
            Err(Error::Unmapped { address: 0x1000 })
        ));
        assert!(reader.is_mapped(0x1001));
        assert!(!reader.is_mapped(0x1002));
    }
}
