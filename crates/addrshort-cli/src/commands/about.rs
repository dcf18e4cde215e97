//! About command implementation.

use addrshort_core::{Action, BufferClipboard, Dispatcher, PluginInfo};
use anyhow::Result;

use crate::console::ConsoleView;

/// Run the about command
pub fn run() -> Result<()> {
    let mut dispatcher = Dispatcher::new(BufferClipboard::new(), ConsoleView::default());
    dispatcher.apply(Action::ShowAbout)?;

    if let Some(info) = PluginInfo::query(PluginInfo::MIN_HOST_VERSION) {
        println!();
        println!("Version {} (host >= {})", info.version, PluginInfo::MIN_HOST_VERSION);
    }
    Ok(())
}
