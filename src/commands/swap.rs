//! Swap command implementation.

use anyhow::Result;
use std::path::Path;

/// Run the swap command
pub fn run(from: &str, to: &str, config_path: &Path) -> Result<()> {
    let (_, ipset) = super::open(config_path)?;
    ipset.swap(from, to)?;
    println!("[OK] Swapped {} and {}", from, to);
    Ok(())
}
