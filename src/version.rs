//! ipset version detection.
//!
//! `ipset --version` prints something like `ipset v7.15, protocol version: 7`.
//! Only `MAJOR.MINOR` is reported, so the patch component is always zero.

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

use crate::error::{IpsetError, Result};

/// Oldest ipset release whose command syntax this wrapper speaks.
pub const MIN_IPSET_VERSION: IpsetVersion = IpsetVersion::new(6, 0, 0);

lazy_static! {
    static ref VERSION_RE: Regex = Regex::new(r"v([0-9]+)\.([0-9]+)").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IpsetVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl IpsetVersion {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Extract the version from `ipset --version` output.
    ///
    /// # Examples
    /// ```
    /// use ipsetcmd::version::IpsetVersion;
    /// let v = IpsetVersion::from_output("ipset v7.15, protocol version: 7").unwrap();
    /// assert_eq!(v, IpsetVersion::new(7, 15, 0));
    /// ```
    pub fn from_output(output: &str) -> Result<Self> {
        let caps = VERSION_RE
            .captures(output)
            .ok_or_else(|| IpsetError::VersionParse(output.trim().to_string()))?;

        let major = caps[1]
            .parse()
            .map_err(|_| IpsetError::VersionParse(caps[0].to_string()))?;
        let minor = caps[2]
            .parse()
            .map_err(|_| IpsetError::VersionParse(caps[0].to_string()))?;

        Ok(Self::new(major, minor, 0))
    }

    pub fn is_supported(&self) -> bool {
        *self >= MIN_IPSET_VERSION
    }
}

impl fmt::Display for IpsetVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_real_outputs() {
        assert_eq!(
            IpsetVersion::from_output("ipset v6.38, protocol version: 6\n").unwrap(),
            IpsetVersion::new(6, 38, 0)
        );
        assert_eq!(
            IpsetVersion::from_output("ipset v7.1, protocol version: 7\n").unwrap(),
            IpsetVersion::new(7, 1, 0)
        );
        // Old 4.x releases print a different banner but still carry vX.Y
        assert_eq!(
            IpsetVersion::from_output("ipset v4.5, protocol version 4.\n").unwrap(),
            IpsetVersion::new(4, 5, 0)
        );
    }

    #[test]
    fn test_parse_first_match_wins() {
        let v = IpsetVersion::from_output("ipset v7.15 (built against v6.0)").unwrap();
        assert_eq!(v, IpsetVersion::new(7, 15, 0));
    }

    #[test]
    fn test_parse_failure() {
        assert!(matches!(
            IpsetVersion::from_output("command not found"),
            Err(IpsetError::VersionParse(_))
        ));
        assert!(IpsetVersion::from_output("").is_err());
        assert!(IpsetVersion::from_output("version 7.15").is_err());
    }

    #[test]
    fn test_parse_overflowing_component() {
        let out = "ipset v99999999999999999999999.1";
        assert!(matches!(
            IpsetVersion::from_output(out),
            Err(IpsetError::VersionParse(_))
        ));
    }

    #[test]
    fn test_minimum_comparison() {
        assert!(IpsetVersion::new(6, 0, 0).is_supported());
        assert!(IpsetVersion::new(6, 38, 0).is_supported());
        assert!(IpsetVersion::new(7, 0, 0).is_supported());
        assert!(!IpsetVersion::new(5, 99, 0).is_supported());
        assert!(!IpsetVersion::new(4, 5, 0).is_supported());
    }

    #[test]
    fn test_minor_compares_numerically() {
        // 6.10 must sort after 6.9, not lexically before it
        assert!(IpsetVersion::new(6, 10, 0) > IpsetVersion::new(6, 9, 0));
    }

    #[test]
    fn test_display() {
        assert_eq!(IpsetVersion::new(7, 15, 0).to_string(), "7.15.0");
        assert_eq!(MIN_IPSET_VERSION.to_string(), "6.0.0");
    }
}
