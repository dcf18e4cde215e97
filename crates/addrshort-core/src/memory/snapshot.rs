//! Captured memory regions of a debuggee.
//!
//! A snapshot is the offline counterpart of the debugger's memory map: a set
//! of non-overlapping regions, each with the bytes that were readable when it
//! was taken. Reads that leave a region, or start outside every region, fail
//! the same way a faulting read in the live process would.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::ReadMemory;
use crate::error::{Error, Result};
use crate::hexfmt;

/// A contiguous block of readable memory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryRegion {
    #[serde(with = "hexfmt::serde_u32")]
    pub address: u32,
    #[serde(with = "hexfmt::serde_bytes")]
    pub bytes: Vec<u8>,
}

impl MemoryRegion {
    pub fn new(address: u32, bytes: Vec<u8>) -> Self {
        Self { address, bytes }
    }

    /// One past the last address, widened so regions touching 4 GiB still fit
    pub fn end(&self) -> u64 {
        self.address as u64 + self.bytes.len() as u64
    }

    pub fn contains(&self, address: u32) -> bool {
        address >= self.address && (address as u64) < self.end()
    }
}

/// Memory image made of sorted, non-overlapping regions
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshot {
    regions: Vec<MemoryRegion>,
}

impl MemorySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a snapshot, dropping regions that overlap an earlier one.
    pub fn from_regions(regions: impl IntoIterator<Item = MemoryRegion>) -> Self {
        let mut snapshot = Self::new();
        for region in regions {
            snapshot.insert(region);
        }
        snapshot
    }

    /// Add a region. Returns `false` if it overlaps an existing region or is empty.
    pub fn insert(&mut self, region: MemoryRegion) -> bool {
        if region.bytes.is_empty() {
            return false;
        }

        let overlaps = self
            .regions
            .iter()
            .any(|r| (region.address as u64) < r.end() && (r.address as u64) < region.end());
        if overlaps {
            debug!(
                "Skipping memory region at {:#010x}: overlaps an existing region",
                region.address
            );
            return false;
        }

        let idx = self
            .regions
            .partition_point(|r| r.address < region.address);
        self.regions.insert(idx, region);
        true
    }

    pub fn regions(&self) -> &[MemoryRegion] {
        &self.regions
    }

    fn region_containing(&self, address: u32) -> Option<&MemoryRegion> {
        let idx = self.regions.partition_point(|r| r.address <= address);
        idx.checked_sub(1)
            .map(|i| &self.regions[i])
            .filter(|r| r.contains(address))
    }
}

impl ReadMemory for MemorySnapshot {
    fn read_bytes(&self, address: u32, size: usize) -> Result<Vec<u8>> {
        let region = self
            .region_containing(address)
            .ok_or(Error::Unmapped { address })?;

        let start = (address - region.address) as usize;
        let end = start
            .checked_add(size)
            .filter(|&end| end <= region.bytes.len())
            .ok_or(Error::Unmapped { address })?;

        Ok(region.bytes[start..end].to_vec())
    }

    fn is_mapped(&self, address: u32) -> bool {
        self.region_containing(address).is_some()
    }
}
