//! Build [`Module`] descriptions from PE images on disk.
//!
//! Lets the offline tools compute file offsets exactly the way the debugger
//! does for a loaded module, using the section table of the real binary.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::module::{Module, Section};

/// Parse a PE file and describe it as a module.
///
/// `base` overrides the preferred image base (for relocated DLLs).
pub fn module_from_pe_file<P: AsRef<Path>>(path: P, base: Option<u32>) -> Result<Module> {
    let path = path.as_ref();
    let data = fs::read(path)?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut module = module_from_pe(&name, &data, base)?;
    module.path = path.to_string_lossy().into_owned();
    info!(
        "Loaded {} at {:#010x} ({} sections)",
        module.name,
        module.base,
        module.sections.len()
    );
    Ok(module)
}

/// Parse PE bytes and describe them as a module named `name`.
pub fn module_from_pe(name: &str, data: &[u8], base: Option<u32>) -> Result<Module> {
    let pe = goblin::pe::PE::parse(data).map_err(|e| Error::InvalidImage(e.to_string()))?;

    if pe.is_64 {
        return Err(Error::InvalidImage(
            "64-bit images cannot be mapped into a 32-bit address space".to_string(),
        ));
    }

    let windows_fields = pe
        .header
        .optional_header
        .map(|h| h.windows_fields)
        .ok_or_else(|| Error::InvalidImage("missing optional header".to_string()))?;

    let image_base = match base {
        Some(base) => base,
        None => u32::try_from(pe.image_base)
            .map_err(|_| Error::InvalidImage(format!("image base {:#x} out of range", pe.image_base)))?,
    };

    let sections = pe
        .sections
        .iter()
        .map(|s| {
            let name = String::from_utf8_lossy(&s.name)
                .trim_end_matches('\0')
                .to_string();
            debug!(
                "Section {} va={:#x} vsize={:#x} raw={:#x}+{:#x}",
                name, s.virtual_address, s.virtual_size, s.pointer_to_raw_data, s.size_of_raw_data
            );
            Section::new(name, s.virtual_address, s.virtual_size)
                .with_raw(s.pointer_to_raw_data, s.size_of_raw_data)
        })
        .collect();

    Ok(Module {
        name: name.to_string(),
        path: String::new(),
        base: image_base,
        size: windows_fields.size_of_image,
        headers_size: windows_fields.size_of_headers,
        sections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::OffsetKind;
    use crate::memory::MockMemoryBuilder;
    use crate::module::ModuleTable;
    use crate::resolver::AddressResolver;

    const PE_OFFSET: usize = 0x80;
    const OPTIONAL_HEADER_SIZE: usize = 0xE0;

    fn put_u16(buf: &mut [u8], at: usize, value: u16) {
        buf[at..at + 2].copy_from_slice(&value.to_le_bytes());
    }

    fn put_u32(buf: &mut [u8], at: usize, value: u32) {
        buf[at..at + 4].copy_from_slice(&value.to_le_bytes());
    }

    /// Minimal PE32 image: .text (0x1000, raw 0x400+0x200) and .bss (0x2000, no raw data)
    fn tiny_pe32() -> Vec<u8> {
        let mut buf = vec![0u8; 0x600];
        buf[0] = b'M';
        buf[1] = b'Z';
        put_u32(&mut buf, 0x3C, PE_OFFSET as u32);
        buf[PE_OFFSET..PE_OFFSET + 4].copy_from_slice(b"PE\0\0");

        let coff = PE_OFFSET + 4;
        put_u16(&mut buf, coff, 0x014C); // i386
        put_u16(&mut buf, coff + 2, 2);
        put_u16(&mut buf, coff + 16, OPTIONAL_HEADER_SIZE as u16);
        put_u16(&mut buf, coff + 18, 0x0102);

        let opt = coff + 20;
        put_u16(&mut buf, opt, 0x010B);
        put_u32(&mut buf, opt + 16, 0x1000); // entry point
        put_u32(&mut buf, opt + 28, 0x0040_0000); // image base
        put_u32(&mut buf, opt + 32, 0x1000); // section alignment
        put_u32(&mut buf, opt + 36, 0x200); // file alignment
        put_u16(&mut buf, opt + 40, 4);
        put_u16(&mut buf, opt + 48, 4);
        put_u32(&mut buf, opt + 56, 0x3000); // size of image
        put_u32(&mut buf, opt + 60, 0x400); // size of headers
        put_u16(&mut buf, opt + 68, 2); // subsystem
        put_u32(&mut buf, opt + 92, 16); // number of rva and sizes

        let sections = opt + OPTIONAL_HEADER_SIZE;
        buf[sections..sections + 5].copy_from_slice(b".text");
        put_u32(&mut buf, sections + 8, 0x180);
        put_u32(&mut buf, sections + 12, 0x1000);
        put_u32(&mut buf, sections + 16, 0x200);
        put_u32(&mut buf, sections + 20, 0x400);
        put_u32(&mut buf, sections + 36, 0x6000_0020);

        let bss = sections + 40;
        buf[bss..bss + 4].copy_from_slice(b".bss");
        put_u32(&mut buf, bss + 8, 0x800);
        put_u32(&mut buf, bss + 12, 0x2000);
        put_u32(&mut buf, bss + 36, 0xC000_0080);

        buf
    }

    #[test]
    fn test_module_from_pe() {
        let module = module_from_pe("tiny", &tiny_pe32(), None).unwrap();

        assert_eq!(module.name, "tiny");
        assert_eq!(module.base, 0x0040_0000);
        assert_eq!(module.size, 0x3000);
        assert_eq!(module.headers_size, 0x400);
        assert_eq!(module.sections.len(), 2);
        assert_eq!(module.sections[0].name, ".text");
        assert_eq!(module.sections[0].raw_offset, 0x400);
        assert!(module.sections[1].is_uninitialized());
    }

    #[test]
    fn test_module_from_pe_with_rebased_image() {
        let module = module_from_pe("tiny", &tiny_pe32(), Some(0x1000_0000)).unwrap();
        let modules = ModuleTable::from_modules([module]);
        let memory = MockMemoryBuilder::new().build();
        let resolver = AddressResolver::new(&modules, &memory);

        assert_eq!(
            resolver.resolve(0x1000_1010, OffsetKind::File).unwrap().offset,
            0x410
        );
        assert_eq!(
            resolver.resolve(0x1000_1010, OffsetKind::Base).unwrap().offset,
            0x1010
        );
        assert!(resolver.resolve(0x1000_2000, OffsetKind::File).is_err());
    }

    #[test]
    fn test_module_from_pe_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiny.exe");
        fs::write(&path, tiny_pe32()).unwrap();

        let module = module_from_pe_file(&path, None).unwrap();
        assert_eq!(module.name, "tiny");
        assert_eq!(module.file_name(), "tiny.exe");
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            module_from_pe("junk", b"not a portable executable", None),
            Err(Error::InvalidImage(_))
        ));
    }
}
