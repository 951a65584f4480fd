//! Init command implementation.

use anyhow::Result;
use std::path::Path;

use crate::config::Config;

/// Write a default configuration file to `config_path`.
///
/// Refuses to overwrite an existing file unless `force` is set.
pub fn run(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {:?} (use --force to overwrite)",
            config_path
        );
    }

    Config::default().save(config_path)?;
    println!("[OK] Wrote default configuration to {:?}", config_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_loadable_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ipsetcmd").join("config.yaml");

        run(&path, false).unwrap();
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_init_keeps_existing_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "skip_version_check: true\n").unwrap();

        let err = run(&path, false).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert!(Config::load(&path).unwrap().skip_version_check);

        run(&path, true).unwrap();
        assert!(!Config::load(&path).unwrap().skip_version_check);
    }
}
