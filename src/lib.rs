//! # ipsetcmd - typed wrapper around the ipset utility
//!
//! Drives the `ipset` userspace tool (Linux netfilter IP sets) as a
//! subprocess: each operation builds an argument list, runs ipset once and
//! parses its plain-text output into Rust types.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        ipsetcmd                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  CLI (clap)                                                 │
//! │    └── Commands: create, add, del, test, list, replace...   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Config (serde_yaml)                                        │
//! │    └── ipset path, version check, create defaults, lock     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  IpSet<E: CommandExecutor>                                  │
//! │    ├── Argument construction + default substitution         │
//! │    ├── Version check (>= 6.0.0)                             │
//! │    └── Output parsing (regex)                               │
//! ├─────────────────────────────────────────────────────────────┤
//! │  CommandExecutor trait                                      │
//! │    ├── SystemExecutor (std::process)                        │
//! │    └── MockCommandExecutor (mockall, tests)                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use ipsetcmd::ipset::IpSet;
//! use ipsetcmd::params::{CreateParams, Family};
//!
//! fn main() -> anyhow::Result<()> {
//!     let ipset = IpSet::new()?;
//!
//!     let params = CreateParams::new().family(Family::Inet).timeout(3600);
//!     ipset.create("blocked", "hash:net", &params, &["-exist"])?;
//!
//!     ipset.add("blocked", "203.0.113.0/24", &[])?;
//!     assert!(ipset.test("blocked", "203.0.113.7")?);
//!
//!     ipset.replace("blocked", &["198.51.100.1", "198.51.100.2"])?;
//!     for member in ipset.list_sorted("blocked")? {
//!         println!("{}", member);
//!     }
//!
//!     let dump = ipset.save()?;
//!     ipset.destroy("blocked", &[])?;
//!     ipset.restore(&dump)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`cli`] - Command-line interface definitions
//! - [`cmd_abstraction`] - Subprocess execution seam
//! - [`commands`] - CLI command implementations
//! - [`config`] - Configuration parsing and validation
//! - [`error`] - Library error type
//! - [`ipset`] - The ipset wrapper and its output parsers
//! - [`lock`] - File locking for multi-step updates
//! - [`params`] - Set creation parameters and defaults
//! - [`system`] - Binary lookup and privilege checks
//! - [`utils`] - Output formatting helpers
//! - [`validation`] - Set name, type and entry validation
//! - [`version`] - ipset version detection

pub mod cli;
pub mod cmd_abstraction;
pub mod commands;
pub mod config;
pub mod error;
pub mod ipset;
pub mod lock;
pub mod params;
pub mod system;
pub mod utils;
pub mod validation;
pub mod version;

pub use cli::{Cli, Commands};
pub use config::Config;
pub use error::IpsetError;
pub use ipset::{IpSet, SetInfo};
pub use params::{CreateParams, Family};
pub use version::IpsetVersion;
