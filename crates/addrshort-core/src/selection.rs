//! Selection snapshots of debugger views.

use crate::error::{Error, Result};

/// Half-open address range `[sel0, sel1)` highlighted in a view.
///
/// Taken fresh on every command invocation; a view that has nothing selected
/// reports an empty range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub sel0: u32,
    pub sel1: u32,
}

impl Selection {
    pub fn new(sel0: u32, sel1: u32) -> Self {
        Self { sel0, sel1 }
    }

    /// A view without selection data
    pub fn none() -> Self {
        Self::default()
    }

    /// A one-byte selection at `address`
    pub fn at(address: u32) -> Self {
        Self::new(address, address.saturating_add(1))
    }

    /// First selected address, or `None` when the range is empty or inverted
    pub fn first_address(&self) -> Option<u32> {
        (self.sel0 < self.sel1).then_some(self.sel0)
    }

    pub fn require_address(&self) -> Result<u32> {
        self.first_address().ok_or(Error::NoSelection)
    }

}
