use tracing::debug;

use super::Module;

/// Module lookup as exposed by the debugger.
pub trait ModuleLookup {
    /// Find the module whose mapped range contains `address`.
    fn find_module(&self, address: u32) -> Option<&Module>;
}

impl<T: ModuleLookup + ?Sized> ModuleLookup for &T {
    fn find_module(&self, address: u32) -> Option<&Module> {
        (**self).find_module(address)
    }
}

/// Modules sorted by base address with non-overlapping ranges
#[derive(Debug, Clone, Default)]
pub struct ModuleTable {
    modules: Vec<Module>,
}

impl ModuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_modules(modules: impl IntoIterator<Item = Module>) -> Self {
        let mut table = Self::new();
        for module in modules {
            table.insert(module);
        }
        table
    }

    /// Add a module. Returns `false` if it is empty or overlaps a loaded module.
    pub fn insert(&mut self, module: Module) -> bool {
        if module.size == 0 {
            debug!("Ignoring empty module {}", module.name);
            return false;
        }

        if let Some(existing) = self
            .modules
            .iter()
            .find(|m| (module.base as u64) < m.end() && (m.base as u64) < module.end())
        {
            debug!(
                "Ignoring module {} at {:#010x}: overlaps {}",
                module.name, module.base, existing.name
            );
            return false;
        }

        let idx = self.modules.partition_point(|m| m.base < module.base);
        self.modules.insert(idx, module);
        true
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn by_name(&self, name: &str) -> Option<&Module> {
        self.modules
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }
}

impl ModuleLookup for ModuleTable {
    fn find_module(&self, address: u32) -> Option<&Module> {
        let idx = self.modules.partition_point(|m| m.base <= address);
        idx.checked_sub(1)
            .map(|i| &self.modules[i])
            .filter(|m| m.contains(address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ModuleTable {
        ModuleTable::from_modules([
            Module::new("kernel32", 0x7C80_0000, 0xF_6000),
            Module::new("app", 0x0040_0000, 0x1_0000),
            Module::new("msvcrt", 0x77C1_0000, 0x5_8000),
        ])
    }

    #[test]
    fn test_find_module_by_containment() {
        let table = table();
        assert_eq!(table.find_module(0x0040_26C0).unwrap().name, "app");
        assert_eq!(table.find_module(0x77C1_0000).unwrap().name, "msvcrt");
        assert_eq!(table.find_module(0x7C8F_5FFF).unwrap().name, "kernel32");
    }

    #[test]
    fn test_find_module_misses_gaps() {
        let table = table();
        assert!(table.find_module(0).is_none());
        assert!(table.find_module(0x0041_0000).is_none());
        assert!(table.find_module(0x7C8F_6000).is_none());
        assert!(table.find_module(0xFFFF_FFFF).is_none());
    }

    #[test]
    fn test_insert_rejects_overlap_and_empty() {
        let mut table = table();
        assert!(!table.insert(Module::new("dup", 0x0040_8000, 0x1000)));
        assert!(!table.insert(Module::new("empty", 0x1000_0000, 0)));
        assert!(table.insert(Module::new("next", 0x0041_0000, 0x1000)));
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_by_name_is_case_insensitive() {
        let table = table();
        assert_eq!(table.by_name("KERNEL32").unwrap().base, 0x7C80_0000);
        assert!(table.by_name("ntdll").is_none());
    }
}
