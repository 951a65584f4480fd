//! CLI argument parsing with clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_CONFIG_PATH;
use crate::params::Family;

#[derive(Parser)]
#[command(name = "ipsetcmd")]
#[command(author, version, about = "Typed front-end for the ipset utility")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug output, including every ipset invocation)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Don't require root (e.g. when running with CAP_NET_ADMIN)
    #[arg(long, global = true)]
    pub skip_root_check: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new hash:* set
    Create {
        /// Set name
        name: String,
        /// Set type, e.g. hash:ip, hash:net, hash:ip,port
        set_type: String,
        /// Address family (inet, inet6)
        #[arg(long)]
        family: Option<Family>,
        /// Initial hash size (default 1024)
        #[arg(long)]
        hashsize: Option<u32>,
        /// Maximum number of elements (default 65536)
        #[arg(long)]
        maxelem: Option<u32>,
        /// Default entry timeout in seconds (0 = never expire)
        #[arg(long)]
        timeout: Option<u32>,
        /// Extra options passed to ipset verbatim (after --)
        #[arg(last = true)]
        opts: Vec<String>,
    },

    /// Add an entry to a set
    Add {
        name: String,
        entry: String,
        /// Extra options, e.g. -- timeout 10
        #[arg(last = true)]
        opts: Vec<String>,
    },

    /// Delete an entry from a set
    Del {
        name: String,
        entry: String,
        #[arg(last = true)]
        opts: Vec<String>,
    },

    /// Test whether an entry is in a set (exit status 1 if not)
    Test { name: String, entry: String },

    /// Destroy a set, or all sets with --all
    Destroy {
        name: Option<String>,
        /// Destroy every set
        #[arg(long, conflicts_with = "name")]
        all: bool,
    },

    /// List members of a set, or set names when no set is given
    List {
        name: Option<String>,
        /// Ask ipset to sort the members
        #[arg(long, requires = "name")]
        sorted: bool,
        /// Show the set header as well as its members
        #[arg(long, requires = "name", conflicts_with = "sorted")]
        info: bool,
        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove all entries from a set, or from all sets with --all
    Flush {
        name: Option<String>,
        /// Flush every set
        #[arg(long, conflicts_with = "name")]
        all: bool,
    },

    /// Swap the contents of two sets
    Swap { from: String, to: String },

    /// Replace the contents of a set
    Replace {
        name: String,
        /// Entries to put in the set
        entries: Vec<String>,
        /// Read entries from a file, one per line ('#' starts a comment)
        #[arg(long, short)]
        file: Option<PathBuf>,
    },

    /// Dump sets in restore format
    Save {
        /// Only this set
        name: Option<String>,
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Load sets from `save` output
    Restore {
        /// Read from a file instead of stdin
        #[arg(long, short)]
        file: Option<PathBuf>,
    },

    /// Show ipsetcmd and ipset versions
    Version,

    /// Write a default config file to the --config path
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Commands {
    /// Whether the command talks to the kernel and so needs CAP_NET_ADMIN.
    pub fn needs_privileges(&self) -> bool {
        !matches!(self, Commands::Version | Commands::Init { .. })
    }
}
