//! Host-facing command dispatch.
//!
//! Mirrors the host's two-phase menu protocol: a verify query decides whether
//! an entry is shown, an execute call performs it. The dispatcher owns the
//! side-effecting collaborators; everything it applies comes from
//! [`command::execute`](crate::command::execute).

use tracing::{debug, info, warn};

use crate::clipboard::Clipboard;
use crate::command::{self, Action, Applicability, Command, Pane, ViewFlags};
use crate::error::Result;
use crate::format::is_display_string;
use crate::memory::ReadMemory;
use crate::menu::{PluginInfo, about_text};
use crate::module::ModuleLookup;
use crate::resolver::AddressResolver;
use crate::selection::Selection;

/// View and UI services provided by the debugger
pub trait HostView {
    /// Reposition `pane` of the CPU window to `address`.
    fn follow(&mut self, pane: Pane, address: u32, flags: ViewFlags) -> Result<()>;

    /// Show a transient status-bar message.
    fn flash(&mut self, message: &str);

    /// Show a modal information dialog.
    fn show_message(&mut self, title: &str, text: &str) -> Result<()>;

    fn suspend_all_threads(&mut self);

    fn resume_all_threads(&mut self);
}

/// Result of one menu callback, in the host's terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Entry is hidden / command did not apply
    Absent,
    /// Entry is shown and enabled (verify phase)
    Normal,
    /// Command ran; views need no refresh
    NoRedraw,
    /// Command ran and changed what the views should show
    Redraw,
}

pub struct Dispatcher<C: Clipboard, V: HostView> {
    clipboard: C,
    view: V,
}

impl<C: Clipboard, V: HostView> Dispatcher<C, V> {
    pub fn new(clipboard: C, view: V) -> Self {
        Self { clipboard, view }
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_parts(self) -> (C, V) {
        (self.clipboard, self.view)
    }

    /// Verify phase of the menu protocol.
    pub fn verify<M, R>(
        &self,
        command: Command,
        selection: &Selection,
        resolver: &AddressResolver<'_, M, R>,
    ) -> Outcome
    where
        M: ModuleLookup + ?Sized,
        R: ReadMemory + ?Sized,
    {
        match command::verify(command, selection, resolver) {
            Applicability::Available => Outcome::Normal,
            Applicability::Absent => Outcome::Absent,
        }
    }

    /// Execute phase of the menu protocol.
    pub fn execute<M, R>(
        &mut self,
        command: Command,
        selection: &Selection,
        resolver: &AddressResolver<'_, M, R>,
    ) -> Result<Outcome>
    where
        M: ModuleLookup + ?Sized,
        R: ReadMemory + ?Sized,
    {
        let action = command::execute(command, selection, resolver);
        debug!("{:?} -> {:?}", command, action);
        self.apply(action)
    }

    /// Perform the side effects of an action.
    pub fn apply(&mut self, action: Action) -> Result<Outcome> {
        match action {
            Action::Copy(text) => {
                if !is_display_string(&text) {
                    warn!("Copying unexpected text shape {:?}", text);
                }
                self.clipboard.set_text(&text)?;
                info!("Copied {} to clipboard", text);
                Ok(Outcome::NoRedraw)
            }
            Action::Follow {
                pane,
                address,
                flags,
            } => {
                self.view.follow(pane, address, flags)?;
                info!("Following {:#010x} in {}", address, pane);
                Ok(Outcome::NoRedraw)
            }
            Action::Flash(message) => {
                warn!("{}", message);
                self.view.flash(message);
                Ok(Outcome::Redraw)
            }
            Action::ShowAbout => {
                // Debuggee threads are frozen while the host UI runs; let them
                // go for the duration of the modal dialog.
                self.view.resume_all_threads();
                let shown = self.view.show_message(PluginInfo::NAME, about_text());
                self.view.suspend_all_threads();
                shown.map(|_| Outcome::NoRedraw)
            }
            Action::Nothing => Ok(Outcome::Absent),
        }
    }
}
