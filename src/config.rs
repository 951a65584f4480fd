//! Configuration management for ipsetcmd.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cmd_abstraction::SystemExecutor;
use crate::ipset::IpSet;
use crate::params::CreateParams;

pub const DEFAULT_CONFIG_PATH: &str = "/etc/ipsetcmd/config.yaml";
pub const DEFAULT_LOCK_FILE: &str = "/run/ipsetcmd.lock";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Explicit ipset binary (default: search PATH and the sbin directories)
    pub ipset_path: Option<PathBuf>,

    /// Skip the minimum-version check when opening ipset
    pub skip_version_check: bool,

    /// Lock file serializing multi-step operations (replace, restore)
    pub lock_file: PathBuf,

    /// Parameters used by `create` when not given on the command line
    pub defaults: CreateParams,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ipset_path: None,
            skip_version_check: false,
            lock_file: PathBuf::from(DEFAULT_LOCK_FILE),
            defaults: CreateParams::default(),
        }
    }
}

impl Config {
    /// Load configuration from YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;

        config.validate()?;

        Ok(config)
    }

    /// Load the file if it exists, otherwise fall back to defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No config file at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(ref path) = self.ipset_path {
            if !path.is_absolute() {
                anyhow::bail!("ipset_path must be an absolute path: {:?}", path);
            }
        }

        if self.lock_file.as_os_str().is_empty() {
            anyhow::bail!("lock_file must not be empty");
        }

        Ok(())
    }

    /// Save configuration to YAML file atomically
    ///
    /// Uses tempfile + rename so a crash never leaves a truncated config.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let path = path.as_ref();
        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;

        let parent_dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent_dir)
            .with_context(|| format!("Failed to create config directory: {:?}", parent_dir))?;

        let mut temp_file = NamedTempFile::new_in(parent_dir)
            .context("Failed to create temporary file for config")?;

        temp_file.write_all(content.as_bytes())?;
        temp_file.as_file().sync_all()?;

        temp_file
            .persist(path)
            .with_context(|| format!("Failed to persist config file: {:?}", path))?;

        Ok(())
    }

    /// Open the ipset binary this configuration points at.
    pub fn open_ipset(&self) -> Result<IpSet<SystemExecutor>> {
        let ipset = match (&self.ipset_path, self.skip_version_check) {
            (Some(path), false) => IpSet::with_path(path)?,
            (Some(path), true) => IpSet::unchecked(path, SystemExecutor::new()),
            (None, false) => IpSet::new()?,
            (None, true) => {
                let path = crate::system::find_binary("ipset")
                    .ok_or(crate::error::IpsetError::BinaryNotFound)?;
                IpSet::unchecked(path, SystemExecutor::new())
            }
        };
        Ok(ipset)
    }
}
