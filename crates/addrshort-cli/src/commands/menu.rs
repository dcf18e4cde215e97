//! Menu command implementation.
//!
//! Lists the shortcut table the host would show for a menu context.

use addrshort_core::{MenuContext, menu_for};
use anyhow::Result;
use owo_colors::OwoColorize;

/// Run the menu command
pub fn run(context: MenuContext) -> Result<()> {
    println!("{} menu:", context);

    for entry in menu_for(context) {
        if entry.separator {
            println!("  {}", "-".repeat(40).dimmed());
        }
        let hotkey = entry
            .hotkey
            .map(|h| h.to_string())
            .unwrap_or_default();
        println!("  {:<30} {:>10}", entry.label, hotkey.cyan());
        println!("    {}", entry.help.dimmed());
    }

    Ok(())
}
