//! Address resolution against the debugger's module list and memory.
//!
//! ```text
//! address ──resolve_module──► Module ──base_relative_offset──► RVA
//!                                    └─file_relative_offset──► file offset
//! address ──dereference──► DWORD stored at address
//! ```

use tracing::debug;

use crate::error::{Error, Result};
use crate::format::OffsetKind;
use crate::memory::ReadMemory;
use crate::module::{Module, ModuleLookup};

/// An offset together with the module it is relative to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedOffset<'m> {
    pub module: &'m Module,
    pub kind: OffsetKind,
    pub offset: u32,
}

/// Read-only view over the host's module table and memory image
pub struct AddressResolver<'a, M: ModuleLookup + ?Sized, R: ReadMemory + ?Sized> {
    modules: &'a M,
    memory: &'a R,
}

impl<'a, M: ModuleLookup + ?Sized, R: ReadMemory + ?Sized> AddressResolver<'a, M, R> {
    pub fn new(modules: &'a M, memory: &'a R) -> Self {
        Self { modules, memory }
    }

    /// Find the module that owns `address`.
    pub fn resolve_module(&self, address: u32) -> Result<&'a Module> {
        self.modules
            .find_module(address)
            .ok_or(Error::ModuleNotFound { address })
    }

    /// Offset of `address` from the module's load base.
    ///
    /// `address` must lie inside `module`; use [`Self::resolve_module`] first.
    pub fn base_relative_offset(&self, address: u32, module: &Module) -> u32 {
        debug_assert!(module.contains(address));
        address.wrapping_sub(module.base)
    }

    /// Position of `address` within the module's on-disk image.
    pub fn file_relative_offset(&self, address: u32, module: &Module) -> Result<u32> {
        if !module.contains(address) {
            return Err(Error::ModuleNotFound { address });
        }
        if address == module.base {
            return Ok(0);
        }

        let rva = address - module.base;
        if rva < module.headers_size {
            return Ok(rva);
        }

        module
            .section_containing(rva)
            .and_then(|section| section.file_offset(rva))
            .ok_or(Error::NoFileMapping { address })
    }

    /// Read the doubleword stored at `address`.
    pub fn dereference(&self, address: u32) -> Result<u32> {
        let value = self
            .memory
            .read_u32(address)
            .map_err(|_| Error::Unmapped { address })?;
        debug!("Dereferenced {:#010x} -> {:#010x}", address, value);
        Ok(value)
    }

    /// Dereference `address` and require the pointee to be mapped.
    pub fn follow_pointer(&self, address: u32) -> Result<u32> {
        let target = self.dereference(address)?;
        if !self.memory.is_mapped(target) {
            return Err(Error::Unmapped { address: target });
        }
        Ok(target)
    }

    /// Look up the owning module and compute the requested offset.
    pub fn resolve(&self, address: u32, kind: OffsetKind) -> Result<ResolvedOffset<'a>> {
        let module = self.resolve_module(address)?;
        let offset = match kind {
            OffsetKind::Base => self.base_relative_offset(address, module),
            OffsetKind::File => self.file_relative_offset(address, module)?,
        };
        Ok(ResolvedOffset {
            module,
            kind,
            offset,
        })
    }
}
