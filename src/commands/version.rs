//! Version command implementation.

use anyhow::Result;
use std::path::Path;

use crate::cmd_abstraction::{CommandExecutor, SystemExecutor};
use crate::config::Config;
use crate::error::IpsetError;
use crate::ipset::IpSet;
use crate::system::find_binary;
use crate::version::MIN_IPSET_VERSION;

/// Run the version command
///
/// Works without root and reports an unsupported ipset rather than failing.
pub fn run(config_path: &Path) -> Result<()> {
    println!("ipsetcmd {}", env!("CARGO_PKG_VERSION"));

    let config = Config::load_or_default(config_path)?;
    let path = match config.ipset_path.clone().or_else(|| find_binary("ipset")) {
        Some(path) => path,
        None => {
            println!("ipset:    {}", IpsetError::BinaryNotFound);
            return Ok(());
        }
    };

    let ipset = IpSet::unchecked(path, SystemExecutor::new());
    println!("ipset:    {}", describe(&ipset));
    Ok(())
}

fn describe<E: CommandExecutor>(ipset: &IpSet<E>) -> String {
    match ipset.version() {
        Ok(version) if version.is_supported() => {
            format!("{} ({})", version, ipset.path().display())
        }
        Ok(version) => format!(
            "{} ({}) - UNSUPPORTED, minimum is {}",
            version,
            ipset.path().display(),
            MIN_IPSET_VERSION
        ),
        Err(e) => format!("unknown ({})", e),
    }
}
