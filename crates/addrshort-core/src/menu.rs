//! Menu tables and plugin metadata handed to the host.
//!
//! The disassembler, dump and stack views share one context menu; the
//! debugger's main menu only carries the About entry.

use std::fmt;

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::command::{Command, CopyMode, Pane};

/// Menu slot the host asks the plugin to populate
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum MenuContext {
    Main,
    Disasm,
    Dump,
    Stack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Key {
    Enter,
    #[strum(to_string = "=")]
    Equals,
}

/// Keyboard shortcut that triggers a menu entry directly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hotkey {
    pub ctrl: bool,
    pub alt: bool,
    pub key: Key,
}

impl Hotkey {
    pub const fn ctrl(key: Key) -> Self {
        Self {
            ctrl: true,
            alt: false,
            key,
        }
    }

    pub const fn alt(key: Key) -> Self {
        Self {
            ctrl: false,
            alt: true,
            key,
        }
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            f.write_str("Ctrl+")?;
        }
        if self.alt {
            f.write_str("Alt+")?;
        }
        write!(f, "{}", self.key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: &'static str,
    /// Status-bar help text
    pub help: &'static str,
    pub hotkey: Option<Hotkey>,
    pub command: Command,
    /// Draw a separator above the entry
    pub separator: bool,
}

impl MenuEntry {
    const fn new(label: &'static str, help: &'static str, command: Command) -> Self {
        Self {
            label,
            help,
            hotkey: None,
            command,
            separator: false,
        }
    }

    const fn hotkey(mut self, hotkey: Hotkey) -> Self {
        self.hotkey = Some(hotkey);
        self
    }

    const fn separated(mut self) -> Self {
        self.separator = true;
        self
    }
}

static MAIN_MENU: [MenuEntry; 1] = [MenuEntry::new(
    "About Address Shortcuts...",
    "About Address Shortcuts",
    Command::About,
)
.separated()];

static CONTEXT_MENU: [MenuEntry; 7] = [
    MenuEntry::new(
        "Follow DWORD in Disassembler",
        "Follow doubleword in CPU Disassembler",
        Command::Follow(Pane::Disassembler),
    )
    .hotkey(Hotkey::ctrl(Key::Enter)),
    MenuEntry::new(
        "Follow DWORD in Dump",
        "Follow doubleword in CPU Dump",
        Command::Follow(Pane::Dump),
    )
    .hotkey(Hotkey::alt(Key::Enter)),
    MenuEntry::new(
        "Follow DWORD in Stack",
        "Follow doubleword in CPU Stack",
        Command::Follow(Pane::Stack),
    ),
    MenuEntry::new(
        "Copy RVA",
        "Copy RVA of selection to clipboard",
        Command::Copy(CopyMode::Rva),
    ),
    MenuEntry::new(
        "Copy RVA (pretty)",
        "Copy RVA of selection to clipboard in the format module_base+offset",
        Command::Copy(CopyMode::RvaPretty),
    )
    .hotkey(Hotkey::alt(Key::Equals)),
    MenuEntry::new(
        "Copy file offset",
        "Copy file offset of selection to clipboard",
        Command::Copy(CopyMode::FileOffset),
    ),
    MenuEntry::new(
        "Copy file offset (pretty)",
        "Copy file offset of selection to clipboard in the format module_file+offset",
        Command::Copy(CopyMode::FileOffsetPretty),
    )
    .hotkey(Hotkey::ctrl(Key::Equals)),
];

pub fn menu_for(context: MenuContext) -> &'static [MenuEntry] {
    match context {
        MenuContext::Main => &MAIN_MENU,
        MenuContext::Disasm | MenuContext::Dump | MenuContext::Stack => &CONTEXT_MENU,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginInfo {
    pub name: &'static str,
    pub version: &'static str,
}

impl PluginInfo {
    pub const NAME: &'static str = "Address Shortcuts";
    pub const VERSION: &'static str = "0";
    /// Oldest host version whose plugin interface is supported (2.01)
    pub const MIN_HOST_VERSION: u32 = 201;

    /// Answer the host's capability query; `None` declines to load.
    pub fn query(host_version: u32) -> Option<Self> {
        (host_version >= Self::MIN_HOST_VERSION).then_some(Self {
            name: Self::NAME,
            version: Self::VERSION,
        })
    }
}

pub fn about_text() -> &'static str {
    "Address Shortcuts\r\n\
     \r\n\
     Copy module-relative and file offsets of the selection, and follow\r\n\
     doubleword pointers in the disassembler, dump and stack panes.\r\n\
     \r\n\
     Authors: Andrew D'Addesio\r\n\
     URL: https://github.com/daddesio/ollydbg-address-shortcuts\r\n\
     \r\n\
     This plugin is public domain software released under the UNLICENSE."
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_views_share_context_menu() {
        let disasm = menu_for(MenuContext::Disasm);
        assert_eq!(disasm.len(), 7);
        assert!(std::ptr::eq(disasm, menu_for(MenuContext::Dump)));
        assert!(std::ptr::eq(disasm, menu_for(MenuContext::Stack)));
    }

    #[test]
    fn test_main_menu_has_about_only() {
        let main = menu_for(MenuContext::Main);
        assert_eq!(main.len(), 1);
        assert_eq!(main[0].command, Command::About);
        assert!(main[0].separator);
    }

    #[test]
    fn test_hotkeys_are_unique() {
        let keys: Vec<Hotkey> = menu_for(MenuContext::Dump)
            .iter()
            .filter_map(|e| e.hotkey)
            .collect();
        assert_eq!(keys.len(), 4);
        for (i, a) in keys.iter().enumerate() {
            assert!(keys[i + 1..].iter().all(|b| a != b));
        }
    }

    #[test]
    fn test_hotkey_bindings() {
        let bound = |context: MenuContext, hotkey: Hotkey| {
            menu_for(context)
                .iter()
                .find(|entry| entry.hotkey == Some(hotkey))
                .map(|entry| entry.command)
        };

        assert_eq!(
            bound(MenuContext::Disasm, Hotkey::ctrl(Key::Enter)),
            Some(Command::Follow(Pane::Disassembler))
        );
        assert_eq!(
            bound(MenuContext::Stack, Hotkey::alt(Key::Equals)),
            Some(Command::Copy(CopyMode::RvaPretty))
        );
        assert_eq!(bound(MenuContext::Main, Hotkey::ctrl(Key::Enter)), None);
    }

    #[test]
    fn test_hotkey_display() {
        assert_eq!(Hotkey::ctrl(Key::Enter).to_string(), "Ctrl+Enter");
        assert_eq!(Hotkey::alt(Key::Equals).to_string(), "Alt+=");
    }

    #[test]
    fn test_context_parses_host_names() {
        assert_eq!("DISASM".parse::<MenuContext>().unwrap(), MenuContext::Disasm);
        assert_eq!("main".parse::<MenuContext>().unwrap(), MenuContext::Main);
        assert!("REGISTERS".parse::<MenuContext>().is_err());
    }

    #[test]
    fn test_plugin_query_checks_host_version() {
        assert_eq!(PluginInfo::query(200), None);
        let info = PluginInfo::query(201).unwrap();
        assert_eq!(info.name, "Address Shortcuts");
        assert_eq!(info.version, "0");
        assert!(PluginInfo::query(210).is_some());
    }

    #[test]
    fn test_about_text_names_plugin() {
        assert!(about_text().starts_with(PluginInfo::NAME));
    }

    #[test]
    fn test_about_text_credits() {
        let text = about_text();
        assert!(text.contains("Authors: Andrew D'Addesio"));
        assert!(text.contains("URL: https://github.com/daddesio/ollydbg-address-shortcuts"));
        assert!(text.ends_with("released under the UNLICENSE."));
    }
}
