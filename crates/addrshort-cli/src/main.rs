mod commands;
mod config;
mod console;

use std::path::{Path, PathBuf};

use addrshort_core::hexfmt::parse_hex_u32;
use addrshort_core::{CopyMode, MenuContext, Pane};
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "addrshort")]
#[command(about = "Module-relative address shortcuts for debugger sessions")]
struct Args {
    #[arg(short, long, default_value = "addrshort.toml")]
    config: PathBuf,

    /// Target map (modules and memory) to resolve against
    #[arg(short, long, env = "ADDRSHORT_MAP")]
    map: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show base and file offsets of an address
    Resolve {
        #[arg(value_parser = parse_address)]
        address: u32,
    },
    /// Run a copy shortcut on an address
    Copy {
        /// rva, rva-pretty, file-offset, file-offset-pretty
        mode: CopyMode,
        #[arg(value_parser = parse_address)]
        address: u32,
        /// Write to the system clipboard instead of stdout
        #[arg(long)]
        clipboard: bool,
    },
    /// Dereference the DWORD at an address and show where it points
    Follow {
        /// disassembler, dump, stack
        pane: Pane,
        #[arg(value_parser = parse_address)]
        address: u32,
    },
    /// List the shortcut menu for a view
    Menu {
        #[arg(default_value = "DISASM")]
        context: MenuContext,
    },
    /// Describe a PE image as a target map module
    Pe {
        file: PathBuf,
        /// Load address, if the image was relocated
        #[arg(long, value_parser = parse_address)]
        base: Option<u32>,
        /// Target map to add the module to (printed to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show plugin information
    About,
}

fn parse_address(s: &str) -> std::result::Result<u32, String> {
    parse_hex_u32(s).map_err(|e| format!("invalid hex address {s:?}: {e}"))
}

/// Load the config file, falling back to defaults when it is missing or invalid
fn load_config(path: &Path) -> Config {
    match Config::load(path) {
        Ok(c) => {
            info!("Loaded config from {:?}", path);
            c
        }
        Err(e) => {
            warn!("Failed to load config: {:#}, using defaults", e);
            Config::default()
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("addrshort=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = load_config(&args.config);
    let map = args.map.unwrap_or(config.map);

    match args.command {
        Commands::Resolve { address } => {
            commands::resolve::run(&map, address, config.display_style)
        }
        Commands::Copy {
            mode,
            address,
            clipboard,
        } => commands::copy::run(&map, mode, address, clipboard || config.system_clipboard),
        Commands::Follow { pane, address } => commands::follow::run(&map, pane, address),
        Commands::Menu { context } => commands::menu::run(context),
        Commands::Pe { file, base, output } => commands::pe::run(&file, base, output.as_deref()),
        Commands::About => commands::about::run(),
    }
}
