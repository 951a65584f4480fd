//! Destroy command implementation.

use anyhow::Result;
use std::path::Path;

/// Run the destroy command
pub fn run(name: Option<&str>, all: bool, config_path: &Path) -> Result<()> {
    let (_, ipset) = super::open(config_path)?;

    match (name, all) {
        (Some(name), _) => {
            ipset.destroy(name, &[])?;
            println!("[OK] Destroyed set {}", name);
        }
        (None, true) => {
            ipset.destroy_all()?;
            println!("[OK] Destroyed all sets");
        }
        (None, false) => anyhow::bail!("Specify a set name, or --all to destroy every set"),
    }
    Ok(())
}
