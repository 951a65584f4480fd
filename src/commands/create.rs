//! Create command implementation.

use anyhow::Result;
use std::path::Path;

use crate::cmd_abstraction::CommandExecutor;
use crate::ipset::IpSet;
use crate::params::{CreateParams, Family};

/// Creation parameters given on the command line
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    pub family: Option<Family>,
    pub hash_size: Option<u32>,
    pub max_elem: Option<u32>,
    pub timeout: Option<u32>,
}

impl CreateArgs {
    /// Command-line values win; the rest come from the config `defaults`.
    pub fn params(&self, defaults: &CreateParams) -> CreateParams {
        CreateParams {
            family: self.family.or(defaults.family),
            hash_size: self.hash_size.unwrap_or(defaults.hash_size),
            max_elem: self.max_elem.unwrap_or(defaults.max_elem),
            timeout: self.timeout.unwrap_or(defaults.timeout),
        }
    }
}

/// Run the create command
pub fn run(
    name: &str,
    set_type: &str,
    args: &CreateArgs,
    opts: &[String],
    config_path: &Path,
) -> Result<()> {
    let (config, ipset) = super::open(config_path)?;
    execute(&ipset, name, set_type, &args.params(&config.defaults), opts)?;
    println!("[OK] Created set {} ({})", name, set_type);
    Ok(())
}

pub fn execute<E: CommandExecutor>(
    ipset: &IpSet<E>,
    name: &str,
    set_type: &str,
    params: &CreateParams,
    opts: &[String],
) -> Result<()> {
    let opts: Vec<&str> = opts.iter().map(String::as_str).collect();
    ipset.create(name, set_type, params, &opts)?;
    Ok(())
}
