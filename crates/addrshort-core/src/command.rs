//! Shortcut commands.
//!
//! The host asks about each menu entry twice: once to decide whether to show
//! it ([`verify`]) and once when the user picks it ([`execute`]). Both are
//! pure functions of the selection and the resolver; side effects happen only
//! when a [`Dispatcher`](crate::dispatch::Dispatcher) applies the returned
//! [`Action`].

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::format::{DisplayStyle, OffsetKind, format_offset};
use crate::memory::ReadMemory;
use crate::module::ModuleLookup;
use crate::resolver::AddressResolver;
use crate::selection::Selection;

/// CPU window pane a follow command repositions
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Pane {
    #[strum(to_string = "disassembler", serialize = "disasm")]
    Disassembler,
    Dump,
    Stack,
}

bitflags! {
    /// How the host should reposition a pane
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ViewFlags: u32 {
        /// Record the jump in the pane's navigation history
        const HISTORY = 0x1;
        /// Scroll so the address is centered
        const CENTER = 0x2;
        /// Move keyboard focus to the pane
        const FOCUS = 0x4;
    }
}

impl Pane {
    pub fn view_flags(&self) -> ViewFlags {
        match self {
            Self::Disassembler => ViewFlags::HISTORY | ViewFlags::CENTER | ViewFlags::FOCUS,
            Self::Dump => ViewFlags::HISTORY | ViewFlags::FOCUS,
            Self::Stack => ViewFlags::CENTER | ViewFlags::FOCUS,
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CopyMode {
    Rva,
    RvaPretty,
    FileOffset,
    FileOffsetPretty,
}

impl CopyMode {
    pub fn kind(&self) -> OffsetKind {
        match self {
            Self::Rva | Self::RvaPretty => OffsetKind::Base,
            Self::FileOffset | Self::FileOffsetPretty => OffsetKind::File,
        }
    }

    pub fn style(&self) -> DisplayStyle {
        match self {
            Self::Rva | Self::FileOffset => DisplayStyle::Plain,
            Self::RvaPretty | Self::FileOffsetPretty => DisplayStyle::Named,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Dereference the selected DWORD and show the pointee in a pane
    Follow(Pane),
    /// Copy the selected address as an offset
    Copy(CopyMode),
    About,
}

impl Command {
    /// Whether the command reads through the selected address
    pub fn is_dword_variant(&self) -> bool {
        matches!(self, Self::Follow(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applicability {
    Available,
    Absent,
}

/// Effect requested by an executed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Place text on the clipboard
    Copy(String),
    /// Reposition a pane
    Follow {
        pane: Pane,
        address: u32,
        flags: ViewFlags,
    },
    /// Show a transient status message and do nothing else
    Flash(&'static str),
    ShowAbout,
    Nothing,
}

/// Decide whether `command` should be offered for the current selection.
pub fn verify<M, R>(
    command: Command,
    selection: &Selection,
    resolver: &AddressResolver<'_, M, R>,
) -> Applicability
where
    M: ModuleLookup + ?Sized,
    R: ReadMemory + ?Sized,
{
    let available = match command {
        Command::About => true,
        _ => selection.first_address().is_some_and(|address| {
            !command.is_dword_variant() || resolver.follow_pointer(address).is_ok()
        }),
    };

    if available {
        Applicability::Available
    } else {
        Applicability::Absent
    }
}

/// Run `command` against the current selection.
///
/// Recoverable failures become [`Action::Flash`]; a missing selection is a no-op.
pub fn execute<M, R>(
    command: Command,
    selection: &Selection,
    resolver: &AddressResolver<'_, M, R>,
) -> Action
where
    M: ModuleLookup + ?Sized,
    R: ReadMemory + ?Sized,
{
    match try_execute(command, selection, resolver) {
        Ok(action) => action,
        Err(Error::NoSelection) => Action::Nothing,
        Err(e) if e.is_recoverable() => {
            debug!("{:?} aborted: {}", command, e);
            e.status_message().map_or(Action::Nothing, Action::Flash)
        }
        Err(e) => {
            warn!("{:?} failed: {}", command, e);
            Action::Nothing
        }
    }
}

fn try_execute<M, R>(
    command: Command,
    selection: &Selection,
    resolver: &AddressResolver<'_, M, R>,
) -> Result<Action>
where
    M: ModuleLookup + ?Sized,
    R: ReadMemory + ?Sized,
{
    match command {
        Command::About => Ok(Action::ShowAbout),
        Command::Copy(mode) => {
            let address = selection.require_address()?;
            let resolved = resolver.resolve(address, mode.kind())?;
            Ok(Action::Copy(format_offset(mode.style(), &resolved)))
        }
        Command::Follow(pane) => {
            let address = selection.require_address()?;
            let target = resolver.follow_pointer(address)?;
            Ok(Action::Follow {
                pane,
                address: target,
                flags: pane.view_flags(),
            })
        }
    }
}
