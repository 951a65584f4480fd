//! File-based locking for multi-step set updates.
//!
//! `replace` is a flush followed by one add per entry, and `restore` may
//! touch many sets; two concurrent invocations would interleave. An
//! exclusive flock on the configured lock file serializes them.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

/// Holds an exclusive lock; released when dropped.
pub struct LockGuard {
    _file: File,
}

impl LockGuard {
    /// Attempt to acquire an exclusive lock on `lock_path`.
    /// Fails immediately if another instance holds it.
    pub fn acquire<P: AsRef<Path>>(lock_path: P) -> Result<Self> {
        let lock_path = lock_path.as_ref();
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create lock file directory: {:?}", parent)
            })?;
        }

        // create+read+write without truncate: no race between create and lock
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(lock_path)
            .with_context(|| format!("Failed to open lock file: {:?}", lock_path))?;

        fs::set_permissions(lock_path, fs::Permissions::from_mode(0o600))
            .context("Failed to set lock file permissions")?;

        file.try_lock_exclusive().map_err(|_| {
            anyhow::anyhow!(
                "Another ipsetcmd instance is modifying sets.\n\
                 Wait for it to complete, or remove the lock file if it is stale: {:?}",
                lock_path
            )
        })?;

        Ok(Self { _file: file })
    }
}
