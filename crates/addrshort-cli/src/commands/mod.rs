//! CLI command implementations.
//!
//! This module contains the implementation of each CLI command.

pub mod about;
pub mod copy;
pub mod follow;
pub mod menu;
pub mod pe;
pub mod resolve;

use std::path::Path;

use addrshort_core::{MemorySnapshot, ModuleTable, TargetMap};
use anyhow::{Context, Result};
use tracing::info;

/// Load a target map and build its lookup tables.
pub fn load_target(path: &Path) -> Result<(ModuleTable, MemorySnapshot)> {
    let map = TargetMap::load(path)
        .with_context(|| format!("loading target map {}", path.display()))?;
    let (modules, memory) = map.into_parts();
    info!(
        "Target map: {} modules, {} memory regions",
        modules.len(),
        memory.regions().len()
    );
    Ok((modules, memory))
}


#[cfg(test)]
mod tests {
    use super::*;
    use addrshort_core::ReadMemory;

    #[test]
    fn test_load_target() {
        let (_dir, path) = fixtures::target_map();
        let (modules, memory) = load_target(&path).unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(memory.regions().len(), 2);
    }

    #[test]
    fn test_sample_pointer_targets() {
        let (_dir, path) = fixtures::target_map();
        let (_, memory) = load_target(&path).unwrap();
        assert_eq!(memory.read_u32(0x0012_FF80).unwrap(), 0x0040_26C0);
        assert!(memory.is_mapped(0x0040_26C0));
        assert!(!memory.is_mapped(0x0BAD_F00D));
    }

    #[test]
    fn test_load_target_missing() {
        assert!(load_target(Path::new("/nonexistent/target.json")).is_err());
    }
}
