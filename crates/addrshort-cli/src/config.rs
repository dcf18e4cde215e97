//! CLI configuration file (`addrshort.toml`).
//!
//! ```toml
//! map = "target.json"
//! display_style = "plain"
//! system_clipboard = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use addrshort_core::DisplayStyle;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target map used when `--map` is not given
    pub map: PathBuf,
    /// How `resolve` prints offsets
    pub display_style: DisplayStyle,
    /// Write copy results to the OS clipboard instead of stdout
    pub system_clipboard: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            map: PathBuf::from("target.json"),
            display_style: DisplayStyle::Named,
            system_clipboard: false,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }
}
