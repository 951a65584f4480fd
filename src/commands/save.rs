//! Save command implementation.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::cmd_abstraction::CommandExecutor;
use crate::ipset::IpSet;

/// Run the save command
pub fn run(name: Option<&str>, output: Option<&Path>, config_path: &Path) -> Result<()> {
    let (_, ipset) = super::open(config_path)?;
    let dump = execute(&ipset, name)?;

    match output {
        Some(path) => {
            write_atomic(path, &dump)?;
            info!("Saved {} bytes to {:?}", dump.len(), path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&dump)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

pub fn execute<E: CommandExecutor>(ipset: &IpSet<E>, name: Option<&str>) -> Result<Vec<u8>> {
    let dump = match name {
        Some(name) => ipset.save_set(name)?,
        None => ipset.save()?,
    };
    Ok(dump)
}

/// Write via tempfile + rename so an interrupted save never leaves a
/// truncated dump where a good one used to be.
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    use tempfile::NamedTempFile;

    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut temp_file = NamedTempFile::new_in(parent_dir)
        .with_context(|| format!("Failed to create temporary file in {:?}", parent_dir))?;
    temp_file.write_all(data)?;
    temp_file.as_file().sync_all()?;
    temp_file
        .persist(path)
        .with_context(|| format!("Failed to write {:?}", path))?;
    Ok(())
}
