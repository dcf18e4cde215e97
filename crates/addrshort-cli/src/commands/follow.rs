//! Follow command implementation.

use std::path::Path;

use addrshort_core::{
    AddressResolver, BufferClipboard, Command, Dispatcher, Outcome, Pane, Selection,
};
use anyhow::{Result, bail};

use super::load_target;
use crate::console::ConsoleView;

/// Run the follow command
pub fn run(map: &Path, pane: Pane, address: u32) -> Result<()> {
    let (modules, memory) = load_target(map)?;
    let resolver = AddressResolver::new(&modules, &memory);
    let selection = Selection::at(address);

    let mut dispatcher = Dispatcher::new(BufferClipboard::new(), ConsoleView::default());
    let outcome = dispatcher.execute(Command::Follow(pane), &selection, &resolver)?;

    if outcome != Outcome::NoRedraw {
        let (_, view) = dispatcher.into_parts();
        bail!(
            "follow in {} failed: {}",
            pane,
            view.flashes.last().map_or("no selection", String::as_str)
        );
    }

    Ok(())
}
