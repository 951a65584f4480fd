//! Parameters for `ipset create`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_HASH_SIZE: u32 = 1024;
pub const DEFAULT_MAX_ELEM: u32 = 65536;

/// Address family of a hash set.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    #[default]
    #[serde(alias = "ipv4")]
    Inet,
    #[serde(alias = "ipv6")]
    Inet6,
}

impl Family {
    pub fn as_str(&self) -> &'static str {
        match self {
            Family::Inet => "inet",
            Family::Inet6 => "inet6",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Family {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inet" | "ipv4" => Ok(Family::Inet),
            "inet6" | "ipv6" => Ok(Family::Inet6),
            _ => Err(format!("Invalid family '{}'. Valid values: inet, inet6", s)),
        }
    }
}

/// Optional parameters for creating a set.
///
/// Zero values (and a missing family) are replaced by ipset's usual
/// defaults in [`resolved`](Self::resolved).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CreateParams {
    pub family: Option<Family>,
    pub hash_size: u32,
    pub max_elem: u32,
    /// Default entry timeout in seconds; 0 means entries never expire.
    pub timeout: u32,
}

impl CreateParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn family(mut self, family: Family) -> Self {
        self.family = Some(family);
        self
    }

    pub fn hash_size(mut self, hash_size: u32) -> Self {
        self.hash_size = hash_size;
        self
    }

    pub fn max_elem(mut self, max_elem: u32) -> Self {
        self.max_elem = max_elem;
        self
    }

    pub fn timeout(mut self, timeout: u32) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fill unset fields from `fallback`, keeping anything already set.
    pub fn or(self, fallback: &CreateParams) -> Self {
        Self {
            family: self.family.or(fallback.family),
            hash_size: if self.hash_size == 0 {
                fallback.hash_size
            } else {
                self.hash_size
            },
            max_elem: if self.max_elem == 0 {
                fallback.max_elem
            } else {
                self.max_elem
            },
            timeout: if self.timeout == 0 {
                fallback.timeout
            } else {
                self.timeout
            },
        }
    }

    /// Apply default-value substitution.
    ///
    /// # Examples
    /// ```
    /// use ipsetcmd::params::{CreateParams, Family};
    /// let p = CreateParams::default().resolved();
    /// assert_eq!(p.family, Some(Family::Inet));
    /// assert_eq!(p.hash_size, 1024);
    /// assert_eq!(p.max_elem, 65536);
    /// assert_eq!(p.timeout, 0);
    /// ```
    pub fn resolved(&self) -> Self {
        self.or(&CreateParams {
            family: Some(Family::Inet),
            hash_size: DEFAULT_HASH_SIZE,
            max_elem: DEFAULT_MAX_ELEM,
            timeout: 0,
        })
    }

    /// Build the argument list for `ipset create`.
    pub fn create_args(&self, name: &str, set_type: &str, opts: &[&str]) -> Vec<String> {
        let p = self.resolved();
        let mut args = vec![
            "create".to_string(),
            name.to_string(),
            set_type.to_string(),
            "family".to_string(),
            p.family.unwrap_or_default().to_string(),
            "hashsize".to_string(),
            p.hash_size.to_string(),
            "maxelem".to_string(),
            p.max_elem.to_string(),
            "timeout".to_string(),
            p.timeout.to_string(),
        ];
        args.extend(opts.iter().map(|s| s.to_string()));
        args
    }
}
