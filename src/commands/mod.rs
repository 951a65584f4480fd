//! CLI command implementations.
//!
//! Each command has a `run` entry point that loads the configuration and
//! opens ipset. Commands that shape ipset's output also expose an `execute`
//! function generic over the executor, tested against scripted responses.

pub mod create;
pub mod destroy;
pub mod entry;
pub mod flush;
pub mod init;
pub mod list;
pub mod replace;
pub mod restore;
pub mod save;
pub mod swap;
pub mod version;

use anyhow::Result;
use std::path::Path;

use crate::cmd_abstraction::SystemExecutor;
use crate::config::Config;
use crate::error::IpsetError;
use crate::ipset::IpSet;

/// Load the config (or defaults) and open the ipset binary it names.
pub(crate) fn open(config_path: &Path) -> Result<(Config, IpSet<SystemExecutor>)> {
    let config = Config::load_or_default(config_path)?;
    let ipset = config.open_ipset()?;
    Ok((config, ipset))
}

/// Process exit status for a failed command.
///
/// When ipset itself failed, its exit status is passed through so scripts
/// can tell a parameter problem (2) from other errors (1).
pub fn exit_status(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<IpsetError>())
        .and_then(IpsetError::exit_code)
        .filter(|code| *code != 0)
        .unwrap_or(1)
}
