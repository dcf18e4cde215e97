//! Copy command implementation.

use std::path::Path;

use addrshort_core::{
    AddressResolver, BufferClipboard, Clipboard, Command, CopyMode, Dispatcher, MemorySnapshot,
    ModuleTable, Outcome, Selection, SystemClipboard,
};
use anyhow::{Result, bail};
use tracing::debug;

use super::load_target;
use crate::console::ConsoleView;

/// Run the copy command
pub fn run(map: &Path, mode: CopyMode, address: u32, system_clipboard: bool) -> Result<()> {
    let (modules, memory) = load_target(map)?;

    if system_clipboard {
        copy_with(&modules, &memory, mode, address, SystemClipboard)?;
    } else {
        let buffer = copy_with(&modules, &memory, mode, address, BufferClipboard::new())?;
        if let Some(text) = buffer.contents() {
            println!("{}", text);
        }
    }

    Ok(())
}

/// Execute the copy shortcut at `address` into `clipboard` and hand it back.
fn copy_with<C: Clipboard>(
    modules: &ModuleTable,
    memory: &MemorySnapshot,
    mode: CopyMode,
    address: u32,
    clipboard: C,
) -> Result<C> {
    let resolver = AddressResolver::new(modules, memory);
    let selection = Selection::at(address);
    let command = Command::Copy(mode);

    let mut dispatcher = Dispatcher::new(clipboard, ConsoleView::default());
    debug!(
        "verify {:?}: {:?}",
        command,
        dispatcher.verify(command, &selection, &resolver)
    );
    let outcome = dispatcher.execute(command, &selection, &resolver)?;
    let (clipboard, view) = dispatcher.into_parts();

    if outcome != Outcome::NoRedraw {
        bail!(
            "copy {} failed: {}",
            mode,
            view.flashes.last().map_or("no selection", String::as_str)
        );
    }
    Ok(clipboard)
}
