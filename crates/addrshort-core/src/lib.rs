//! # addrshort-core
//!
//! Core library for the Address Shortcuts debugger extension.
//!
//! This crate provides:
//! - Selection snapshots of debugger views
//! - Module tables and section-aware file offset translation
//! - Process memory access behind the [`ReadMemory`] trait
//! - Address resolution (base-relative and file-relative offsets, DWORD dereference)
//! - Display formatting for clipboard strings
//! - Command verify/execute logic and the host-facing dispatcher
//!
//! The debugger itself is never linked in. Its module list, memory image,
//! clipboard and views are reached through traits so that an in-memory
//! [`TargetMap`] can stand in for a live session.

pub mod clipboard;
pub mod command;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod hexfmt;
pub mod image;
pub mod memory;
pub mod menu;
pub mod module;
pub mod resolver;
pub mod selection;
pub mod target;

pub use clipboard::{BufferClipboard, Clipboard, SystemClipboard};
pub use command::{Action, Applicability, Command, CopyMode, Pane, ViewFlags, execute, verify};
pub use dispatch::{Dispatcher, HostView, Outcome};
pub use error::{Error, Result};
pub use format::{DisplayStyle, OffsetKind, format_named, format_offset, format_plain};
pub use image::{module_from_pe, module_from_pe_file};
pub use memory::{MemoryRegion, MemorySnapshot, ReadMemory};
pub use menu::{Hotkey, Key, MenuContext, MenuEntry, PluginInfo, about_text, menu_for};
pub use module::{Module, ModuleLookup, ModuleTable, Section};
pub use resolver::{AddressResolver, ResolvedOffset};
pub use selection::Selection;
pub use target::TargetMap;
