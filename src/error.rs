//! Error types for ipsetcmd.

use thiserror::Error;

use crate::version::IpsetVersion;

pub type Result<T> = std::result::Result<T, IpsetError>;

#[derive(Error, Debug)]
pub enum IpsetError {
    #[error("ipset binary not found in PATH")]
    BinaryNotFound,

    #[error("Failed to execute ipset: {0}")]
    Exec(#[from] std::io::Error),

    #[error("Unable to parse ipset version: {0}")]
    VersionParse(String),

    #[error("ipset version {found} is not supported (minimum {minimum})")]
    UnsupportedVersion {
        found: IpsetVersion,
        minimum: IpsetVersion,
    },

    #[error("Not a hash type: {0}")]
    NotHashType(String),

    #[error("Invalid set name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("Invalid entry '{entry}': {reason}")]
    InvalidEntry { entry: String, reason: &'static str },

    #[error("'{command}' failed ({}): {output}", describe_status(.code))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        output: String,
    },

    #[error("Unexpected ipset output: {0}")]
    UnexpectedOutput(String),
}

fn describe_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "killed by signal".to_string(),
    }
}

impl IpsetError {
    /// Exit code reported by ipset, if the failure came from the subprocess.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            IpsetError::CommandFailed { code, .. } => *code,
            _ => None,
        }
    }
}
