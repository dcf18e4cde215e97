//! Offline description of a debuggee: its modules and readable memory.
//!
//! ```json
//! {
//!   "modules": [
//!     { "name": "app", "path": "C:\\app.exe", "base": "0x00400000", "size": "0x10000",
//!       "headers_size": "0x400",
//!       "sections": [ { "name": ".text", "virtual_address": "0x1000", "virtual_size": "0x2800",
//!                       "raw_offset": "0x400", "raw_size": "0x2A00" } ] }
//!   ],
//!   "memory": [ { "address": "0x0012FF80", "bytes": "C0 26 40 00" } ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::memory::{MemoryRegion, MemorySnapshot};
use crate::module::{Module, ModuleTable};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetMap {
    #[serde(default)]
    pub modules: Vec<Module>,
    #[serde(default)]
    pub memory: Vec<MemoryRegion>,
}

impl TargetMap {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a map from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let map = Self::from_json(&content)?;
        debug!(
            "Loaded target map {:?}: {} modules, {} memory regions",
            path,
            map.modules.len(),
            map.memory.len()
        );
        Ok(map)
    }

    /// Save map to JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Build the lookup structures, skipping overlapping entries.
    pub fn into_parts(self) -> (ModuleTable, MemorySnapshot) {
        let module_count = self.modules.len();
        let region_count = self.memory.len();

        let modules = ModuleTable::from_modules(self.modules);
        let memory = MemorySnapshot::from_regions(self.memory);

        if modules.len() != module_count {
            warn!(
                "{} of {} modules were skipped (empty or overlapping)",
                module_count - modules.len(),
                module_count
            );
        }
        if memory.regions().len() != region_count {
            warn!(
                "{} of {} memory regions were skipped (empty or overlapping)",
                region_count - memory.regions().len(),
                region_count
            );
        }

        (modules, memory)
    }
}
