//! Flush command implementation.

use anyhow::Result;
use std::path::Path;

/// Run the flush command
pub fn run(name: Option<&str>, all: bool, config_path: &Path) -> Result<()> {
    let (_, ipset) = super::open(config_path)?;

    match (name, all) {
        (Some(name), _) => {
            ipset.flush(name, &[])?;
            println!("[OK] Flushed set {}", name);
        }
        (None, true) => {
            ipset.flush_all()?;
            println!("[OK] Flushed all sets");
        }
        (None, false) => anyhow::bail!("Specify a set name, or --all to flush every set"),
    }
    Ok(())
}
