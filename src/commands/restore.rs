//! Restore command implementation.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

use crate::lock::LockGuard;

/// Run the restore command
pub fn run(file: Option<&Path>, config_path: &Path) -> Result<()> {
    let data = read_input(file)?;
    if data.is_empty() {
        anyhow::bail!("Nothing to restore: input is empty");
    }

    let (config, ipset) = super::open(config_path)?;
    let _lock = LockGuard::acquire(&config.lock_file)?;
    ipset.restore(&data)?;

    println!("[OK] Restored {} lines", count_lines(&data));
    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<Vec<u8>> {
    match file {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("Failed to read restore file: {:?}", path))
        }
        None => {
            let mut data = Vec::new();
            std::io::stdin()
                .lock()
                .read_to_end(&mut data)
                .context("Failed to read restore data from stdin")?;
            Ok(data)
        }
    }
}

fn count_lines(data: &[u8]) -> usize {
    data.split(|b| *b == b'\n')
        .filter(|line| !line.iter().all(u8::is_ascii_whitespace))
        .count()
}
