//! Host checks: locating the ipset binary and verifying privileges.

use anyhow::Result;
use std::env;
use std::ffi::OsStr;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// Locations ipset is commonly installed to, for when PATH is minimal
/// (systemd units, cron).
const FALLBACK_DIRS: &[&str] = &["/usr/sbin", "/sbin", "/usr/local/sbin"];

fn is_executable(path: &Path) -> bool {
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// Search `dirs` for an executable named `name`.
pub fn find_in<I, P>(name: &str, dirs: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    dirs.into_iter()
        .map(|dir| dir.as_ref().join(name))
        .find(|candidate| is_executable(candidate))
}

/// Search `PATH`, then the usual sbin directories, for `name`.
pub fn find_binary(name: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH").unwrap_or_default();
    find_binary_with_path(name, &path_var)
}

fn find_binary_with_path(name: &str, path_var: &OsStr) -> Option<PathBuf> {
    find_in(name, env::split_paths(path_var)).or_else(|| find_in(name, FALLBACK_DIRS))
}

/// Check if running as root (effective UID == 0)
///
/// ipset needs CAP_NET_ADMIN for everything except `--version`; without it
/// every call fails with a netlink permission error that is easy to misread.
pub fn check_root() -> Result<()> {
    // SAFETY: geteuid() has no preconditions, never fails and doesn't modify
    // any state.
    let euid = unsafe { libc::geteuid() };

    if euid != 0 {
        anyhow::bail!(
            "This operation requires root privileges. Please run with sudo.\n\
             Alternatively, ensure the process has the CAP_NET_ADMIN capability \
             and pass --skip-root-check."
        )
    }
    Ok(())
}
