//! Terminal stand-in for the debugger's views.

use addrshort_core::{HostView, Pane, Result, ViewFlags};
use tracing::debug;

/// Prints view changes instead of moving a CPU window
#[derive(Debug, Default)]
pub struct ConsoleView {
    /// Status messages shown during the run
    pub flashes: Vec<String>,
}

impl HostView for ConsoleView {
    fn follow(&mut self, pane: Pane, address: u32, flags: ViewFlags) -> Result<()> {
        debug!("View flags for {}: {:?}", pane, flags);
        println!("{}: {:08X}", pane, address);
        Ok(())
    }

    fn flash(&mut self, message: &str) {
        eprintln!("{}", message);
        self.flashes.push(message.to_string());
    }

    fn show_message(&mut self, title: &str, text: &str) -> Result<()> {
        println!("{}", title);
        println!();
        for line in text.lines() {
            println!("{}", line.trim_end_matches('\r'));
        }
        Ok(())
    }

    fn suspend_all_threads(&mut self) {
        debug!("suspend_all_threads (no debuggee)");
    }

    fn resume_all_threads(&mut self) {
        debug!("resume_all_threads (no debuggee)");
    }
}
