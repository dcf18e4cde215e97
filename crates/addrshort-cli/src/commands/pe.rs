//! PE command implementation.
//!
//! Adds a module described by a PE file to a target map.

use std::path::Path;

use addrshort_core::{TargetMap, module_from_pe_file};
use anyhow::{Context, Result};
use tracing::{info, warn};

/// Run the pe command
pub fn run(file: &Path, base: Option<u32>, output: Option<&Path>) -> Result<()> {
    let module = module_from_pe_file(file, base)
        .with_context(|| format!("reading image {}", file.display()))?;

    let Some(output) = output else {
        let map = TargetMap {
            modules: vec![module],
            memory: Vec::new(),
        };
        println!("{}", serde_json::to_string_pretty(&map)?);
        return Ok(());
    };

    let mut map = match TargetMap::load(output) {
        Ok(map) => map,
        Err(e) if e.is_not_found() => TargetMap::default(),
        Err(e) => return Err(e).with_context(|| format!("loading {}", output.display())),
    };

    if let Some(existing) = map.modules.iter_mut().find(|m| m.name == module.name) {
        warn!("Replacing existing module {}", existing.name);
        *existing = module;
    } else {
        map.modules.push(module);
    }

    map.save(output)
        .with_context(|| format!("writing {}", output.display()))?;
    info!("Saved {} modules to {}", map.modules.len(), output.display());
    Ok(())
}
