//! Resolve command implementation.
//!
//! Prints every offset the copy shortcuts can produce for one address, in the
//! configured display style.

use std::path::Path;

use addrshort_core::{
    AddressResolver, DisplayStyle, MemorySnapshot, ModuleTable, OffsetKind, format_offset,
};
use anyhow::Result;

use super::load_target;

/// Run the resolve command
pub fn run(map: &Path, address: u32, style: DisplayStyle) -> Result<()> {
    let (modules, memory) = load_target(map)?;
    for line in describe(&modules, &memory, address, style) {
        println!("{}", line);
    }
    Ok(())
}

fn describe(
    modules: &ModuleTable,
    memory: &MemorySnapshot,
    address: u32,
    style: DisplayStyle,
) -> Vec<String> {
    let resolver = AddressResolver::new(modules, memory);
    let mut lines = vec![format!("Address: {:08X}", address)];

    let module = match resolver.resolve_module(address) {
        Ok(module) => module,
        Err(e) => {
            lines.push(format!("Module:  (none) {}", e));
            return lines;
        }
    };
    lines.push(format!(
        "Module:  {} [{:08X}..{:08X}) {}",
        module.name,
        module.base,
        module.end(),
        module.file_name()
    ));
    lines.push(String::new());

    for kind in [OffsetKind::Base, OffsetKind::File] {
        lines.push(match resolver.resolve(address, kind) {
            Ok(resolved) => format!("{:<5} {}", kind, format_offset(style, &resolved)),
            Err(e) => format!("{:<5} {}", kind, e),
        });
    }

    if let Ok(value) = resolver.dereference(address) {
        lines.push(String::new());
        lines.push(format!("DWORD: {:08X}", value));
    }

    lines
}
