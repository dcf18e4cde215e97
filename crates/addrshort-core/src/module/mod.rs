//! Loaded modules and their section layout.

mod table;

pub use table::{ModuleLookup, ModuleTable};

use serde::{Deserialize, Serialize};

use crate::hexfmt;

/// A section of a loaded image.
///
/// `virtual_address` is relative to the module base. The tail of the section
/// past `raw_size` exists only in memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    #[serde(with = "hexfmt::serde_u32")]
    pub virtual_address: u32,
    #[serde(with = "hexfmt::serde_u32")]
    pub virtual_size: u32,
    #[serde(default, with = "hexfmt::serde_u32")]
    pub raw_offset: u32,
    #[serde(default, with = "hexfmt::serde_u32")]
    pub raw_size: u32,
}

impl Section {
    pub fn new(name: impl Into<String>, virtual_address: u32, virtual_size: u32) -> Self {
        Self {
            name: name.into(),
            virtual_address,
            virtual_size,
            raw_offset: 0,
            raw_size: 0,
        }
    }

    /// Set the on-disk location of the section data
    pub fn with_raw(mut self, raw_offset: u32, raw_size: u32) -> Self {
        self.raw_offset = raw_offset;
        self.raw_size = raw_size;
        self
    }

    /// Size of the section in memory; never smaller than its raw data
    pub fn mapped_size(&self) -> u32 {
        self.virtual_size.max(self.raw_size)
    }

    pub fn contains_rva(&self, rva: u32) -> bool {
        rva >= self.virtual_address
            && (rva as u64) < self.virtual_address as u64 + self.mapped_size() as u64
    }

    /// Whether the section has no file backing at all (e.g. `.bss`)
    pub fn is_uninitialized(&self) -> bool {
        self.raw_size == 0
    }

    /// Translate an RVA inside this section to a file offset.
    ///
    /// Returns `None` when the RVA is outside the section or in its
    /// memory-only tail.
    pub fn file_offset(&self, rva: u32) -> Option<u32> {
        if !self.contains_rva(rva) {
            return None;
        }
        let delta = rva - self.virtual_address;
        if delta >= self.raw_size {
            return None;
        }
        self.raw_offset.checked_add(delta)
    }
}

/// A binary image mapped into the debuggee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Short module name as shown by the debugger (usually the file stem)
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(with = "hexfmt::serde_u32")]
    pub base: u32,
    #[serde(with = "hexfmt::serde_u32")]
    pub size: u32,
    /// Size of the image headers, which are mapped 1:1 from file offset 0
    #[serde(default, with = "hexfmt::serde_u32")]
    pub headers_size: u32,
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Module {
    pub fn new(name: impl Into<String>, base: u32, size: u32) -> Self {
        Self {
            name: name.into(),
            path: String::new(),
            base,
            size,
            headers_size: 0,
            sections: Vec::new(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_headers_size(mut self, headers_size: u32) -> Self {
        self.headers_size = headers_size;
        self
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// One past the last mapped address
    pub fn end(&self) -> u64 {
        self.base as u64 + self.size as u64
    }

    pub fn contains(&self, address: u32) -> bool {
        address >= self.base && (address as u64) < self.end()
    }

    /// File name component of `path`, falling back to the module name
    pub fn file_name(&self) -> &str {
        self.path
            .rsplit(['/', '\\'])
            .next()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.name)
    }

    /// Section owning `rva`.
    ///
    /// Raw data may run past the start of the next section; the section
    /// starting closest below `rva` wins.
    pub fn section_containing(&self, rva: u32) -> Option<&Section> {
        self.sections
            .iter()
            .filter(|s| s.contains_rva(rva))
            .max_by_key(|s| s.virtual_address)
    }
}
