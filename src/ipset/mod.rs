//! The ipset command wrapper.

mod parse;

use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub use parse::{parse_members, parse_set_info, parse_set_names, SetInfo};

use crate::cmd_abstraction::{args_to_strings, CommandExecutor, CommandOutput, SystemExecutor};
use crate::error::{IpsetError, Result};
use crate::params::CreateParams;
use crate::system::find_binary;
use crate::validation::{validate_entry, validate_hash_type, validate_set_name};
use crate::version::{IpsetVersion, MIN_IPSET_VERSION};

const IPSET_BINARY: &str = "ipset";
const IN_SET_MARKER: &str = "is in set";
const NOT_IN_SET_MARKER: &str = "is NOT in set";

/// Handle on an ipset binary.
///
/// Each method runs one `ipset` subprocess (two or more for
/// [`replace`](Self::replace)) and fails with
/// [`IpsetError::CommandFailed`] when it exits non-zero.
pub struct IpSet<E: CommandExecutor = SystemExecutor> {
    path: PathBuf,
    executor: E,
}

impl IpSet<SystemExecutor> {
    /// Locate `ipset` on the system and verify its version.
    pub fn new() -> Result<Self> {
        let path = find_binary(IPSET_BINARY).ok_or(IpsetError::BinaryNotFound)?;
        Self::with_path(path)
    }

    /// Use the ipset binary at `path`, verifying its version.
    pub fn with_path(path: impl Into<PathBuf>) -> Result<Self> {
        Self::with_executor(path, SystemExecutor::new())
    }
}

impl<E: CommandExecutor> IpSet<E> {
    /// Use `executor` to run the binary at `path`, verifying its version.
    pub fn with_executor(path: impl Into<PathBuf>, executor: E) -> Result<Self> {
        let ipset = Self::unchecked(path, executor);
        let version = ipset.version()?;
        if !version.is_supported() {
            return Err(IpsetError::UnsupportedVersion {
                found: version,
                minimum: MIN_IPSET_VERSION,
            });
        }
        debug!("Using {} (ipset {})", ipset.path.display(), version);
        Ok(ipset)
    }

    /// Build a handle without checking the binary's version.
    pub fn unchecked(path: impl Into<PathBuf>, executor: E) -> Self {
        Self {
            path: path.into(),
            executor,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn describe(&self, args: &[String]) -> String {
        format!("{} {}", self.path.display(), args.join(" "))
    }

    /// Run ipset and return its output without checking the exit status.
    fn run_unchecked(&self, args: &[String]) -> Result<CommandOutput> {
        debug!("Executing: {}", self.describe(args));
        Ok(self.executor.execute(&self.path, args)?)
    }

    fn check(&self, args: &[String], output: CommandOutput) -> Result<CommandOutput> {
        if output.success {
            Ok(output)
        } else {
            Err(IpsetError::CommandFailed {
                command: self.describe(args),
                code: output.code,
                output: output.combined(),
            })
        }
    }

    fn run(&self, args: Vec<String>) -> Result<CommandOutput> {
        let output = self.run_unchecked(&args)?;
        self.check(&args, output)
    }

    fn run_with_stdin(&self, args: Vec<String>, stdin: &[u8]) -> Result<CommandOutput> {
        debug!(
            "Executing: {} ({} bytes on stdin)",
            self.describe(&args),
            stdin.len()
        );
        let output = self.executor.execute_with_stdin(&self.path, &args, stdin)?;
        self.check(&args, output)
    }

    /// `COMMAND [NAME] [EXTRA...] [OPTS...]`
    fn build(command: &str, operands: &[&str], opts: &[&str]) -> Vec<String> {
        let mut args = Vec::with_capacity(1 + operands.len() + opts.len());
        args.push(command.to_string());
        args.extend(args_to_strings(operands));
        args.extend(args_to_strings(opts));
        args
    }

    /// Detect the version of the ipset binary.
    pub fn version(&self) -> Result<IpsetVersion> {
        let output = self.run(args_to_strings(&["--version"]))?;
        IpsetVersion::from_output(&output.combined())
    }

    /// Create a new `hash:*` set.
    ///
    /// Zero fields of `params` get ipset's defaults (see
    /// [`CreateParams::resolved`]); `opts` are appended verbatim, e.g.
    /// `["counters"]` or `["-exist"]`.
    pub fn create(
        &self,
        name: &str,
        set_type: &str,
        params: &CreateParams,
        opts: &[&str],
    ) -> Result<()> {
        validate_set_name(name)?;
        validate_hash_type(set_type)?;

        self.run(params.create_args(name, set_type, opts))?;
        info!("Created set {} ({})", name, set_type);
        Ok(())
    }

    /// Add an entry to the set. `opts` are extra parameters, e.g. `["timeout", "10"]`.
    pub fn add(&self, name: &str, entry: &str, opts: &[&str]) -> Result<()> {
        validate_set_name(name)?;
        validate_entry(entry)?;

        self.run(Self::build("add", &[name, entry], opts))?;
        debug!("Added {} to {}", entry, name);
        Ok(())
    }

    /// Delete an entry from the set.
    pub fn del(&self, name: &str, entry: &str, opts: &[&str]) -> Result<()> {
        validate_set_name(name)?;
        validate_entry(entry)?;

        self.run(Self::build("del", &[name, entry], opts))?;
        debug!("Deleted {} from {}", entry, name);
        Ok(())
    }

    /// Check whether the set contains `entry`.
    ///
    /// ipset exits non-zero for a miss, so a failure carrying the
    /// "is NOT in set" message is `Ok(false)`; any other failure is an error.
    pub fn test(&self, name: &str, entry: &str) -> Result<bool> {
        validate_set_name(name)?;
        validate_entry(entry)?;

        let args = Self::build("test", &[name, entry], &[]);
        let output = self.run_unchecked(&args)?;

        if output.success {
            if output.contains(IN_SET_MARKER) {
                return Ok(true);
            }
            return Err(IpsetError::UnexpectedOutput(output.combined()));
        }

        if output.contains(NOT_IN_SET_MARKER) {
            return Ok(false);
        }
        self.check(&args, output).map(|_| false)
    }

    /// Destroy the set.
    pub fn destroy(&self, name: &str, opts: &[&str]) -> Result<()> {
        validate_set_name(name)?;

        self.run(Self::build("destroy", &[name], opts))?;
        info!("Destroyed set {}", name);
        Ok(())
    }

    /// Destroy every set not referenced by a firewall rule.
    pub fn destroy_all(&self) -> Result<()> {
        self.run(Self::build("destroy", &[], &[]))?;
        info!("Destroyed all sets");
        Ok(())
    }

    /// Members of the set, in the order ipset reports them.
    pub fn list(&self, name: &str) -> Result<Vec<String>> {
        validate_set_name(name)?;

        let output = self.run(Self::build("list", &[name], &[]))?;
        parse_members(&output.stdout_str())
    }

    /// Members of the set, sorted by ipset.
    pub fn list_sorted(&self, name: &str) -> Result<Vec<String>> {
        validate_set_name(name)?;

        let output = self.run(Self::build("list", &[name], &["-sorted"]))?;
        parse_members(&output.stdout_str())
    }

    /// Names of all sets.
    pub fn list_sets(&self) -> Result<Vec<String>> {
        let output = self.run(Self::build("list", &[], &["-n"]))?;
        Ok(parse_set_names(&output.stdout_str()))
    }

    /// Header fields and members of the set.
    pub fn list_info(&self, name: &str) -> Result<SetInfo> {
        validate_set_name(name)?;

        let output = self.run(Self::build("list", &[name], &[]))?;
        parse_set_info(&output.stdout_str())
    }

    /// Remove all entries from the set.
    pub fn flush(&self, name: &str, opts: &[&str]) -> Result<()> {
        validate_set_name(name)?;

        self.run(Self::build("flush", &[name], opts))?;
        info!("Flushed set {}", name);
        Ok(())
    }

    /// Remove all entries from every set.
    pub fn flush_all(&self) -> Result<()> {
        self.run(Self::build("flush", &[], &[]))?;
        info!("Flushed all sets");
        Ok(())
    }

    /// Swap the contents of two existing sets.
    pub fn swap(&self, from: &str, to: &str) -> Result<()> {
        validate_set_name(from)?;
        validate_set_name(to)?;

        self.run(Self::build("swap", &[from, to], &[]))?;
        info!("Swapped sets {} and {}", from, to);
        Ok(())
    }

    /// Overwrite the set's contents with `entries`.
    ///
    /// Flushes, then adds each entry in order, stopping at the first
    /// failure. Not atomic: readers may observe a partially filled set.
    pub fn replace<S: AsRef<str>>(&self, name: &str, entries: &[S]) -> Result<()> {
        validate_set_name(name)?;
        // Reject bad input before the flush empties the set
        for entry in entries {
            validate_entry(entry.as_ref())?;
        }

        self.flush(name, &[])?;
        for entry in entries {
            self.add(name, entry.as_ref(), &[])?;
        }
        info!("Replaced contents of {} with {} entries", name, entries.len());
        Ok(())
    }

    /// Output of `ipset save` for every set, in restore format.
    ///
    /// The bytes are returned unchanged so that comments which are not
    /// UTF-8 survive a later [`restore`](Self::restore).
    pub fn save(&self) -> Result<Vec<u8>> {
        let output = self.run(Self::build("save", &[], &[]))?;
        Ok(output.stdout)
    }

    /// Output of `ipset save NAME`.
    pub fn save_set(&self, name: &str) -> Result<Vec<u8>> {
        validate_set_name(name)?;

        let output = self.run(Self::build("save", &[name], &[]))?;
        Ok(output.stdout)
    }

    /// Feed `data` (in `ipset save` format) to `ipset restore`.
    pub fn restore(&self, data: &[u8]) -> Result<()> {
        self.run_with_stdin(Self::build("restore", &[], &[]), data)?;
        info!("Restored {} bytes of ipset commands", data.len());
        Ok(())
    }
}
