mod reader;
mod snapshot;

#[cfg(test)]
pub mod mock;

pub use reader::ReadMemory;
pub use snapshot::{MemoryRegion, MemorySnapshot};

#[cfg(test)]
pub use mock::{MockMemoryBuilder, MockMemoryReader};
