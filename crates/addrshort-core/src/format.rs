//! Display strings for resolved offsets.
//!
//! Two forms are produced:
//!
//! ```text
//! 000026C0            plain, 8 upper-case hex digits
//! app_base+0x26c0     named, module name + offset kind suffix
//! app_file+0x1ac0
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::resolver::ResolvedOffset;

/// Which coordinate system an offset is expressed in
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OffsetKind {
    /// Relative to the module's load base (RVA)
    Base,
    /// Position within the on-disk image
    File,
}

impl OffsetKind {
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Base => "_base",
            Self::File => "_file",
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DisplayStyle {
    Plain,
    #[default]
    Named,
}

pub fn format_plain(offset: u32) -> String {
    format!("{:08X}", offset)
}

pub fn format_named(module_name: &str, kind: OffsetKind, offset: u32) -> String {
    format!("{}{}+0x{:x}", module_name, kind.suffix(), offset)
}

pub fn format_offset(style: DisplayStyle, resolved: &ResolvedOffset<'_>) -> String {
    match style {
        DisplayStyle::Plain => format_plain(resolved.offset),
        DisplayStyle::Named => format_named(&resolved.module.name, resolved.kind, resolved.offset),
    }
}

static DISPLAY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[^+\s]+(?:_base|_file)?\+0x[0-9A-Fa-f]+|[0-9A-Fa-f]{8})$")
        .expect("display pattern is valid")
});

/// Check that `s` has one of the shapes produced by this module.
pub fn is_display_string(s: &str) -> bool {
    DISPLAY_PATTERN.is_match(s)
}
