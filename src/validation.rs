//! Argument validation performed before invoking ipset.
//!
//! ipset itself rejects most bad input, but an empty or whitespace-laden
//! argument would silently shift the positional arguments it sees.

use crate::error::{IpsetError, Result};

/// Longest set name the kernel accepts (`IPSET_MAXNAMELEN` minus the NUL).
pub const MAX_SET_NAME_LEN: usize = 31;

/// Validate a set name.
///
/// # Examples
/// ```
/// use ipsetcmd::validation::validate_set_name;
/// assert!(validate_set_name("blocked_v4").is_ok());
/// assert!(validate_set_name("").is_err());
/// assert!(validate_set_name("two words").is_err());
/// ```
pub fn validate_set_name(name: &str) -> Result<()> {
    let invalid = |reason| {
        Err(IpsetError::InvalidName {
            name: name.to_string(),
            reason,
        })
    };

    if name.is_empty() {
        return invalid("name is empty");
    }
    if name.len() > MAX_SET_NAME_LEN {
        return invalid("name is longer than 31 bytes");
    }
    if name.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return invalid("name contains whitespace or control characters");
    }
    if name.starts_with('-') {
        return invalid("name must not start with '-'");
    }
    Ok(())
}

/// Check that a set type is of the form `hash:<TYPE>`.
///
/// # Examples
/// ```
/// use ipsetcmd::validation::validate_hash_type;
/// assert!(validate_hash_type("hash:net").is_ok());
/// assert!(validate_hash_type("bitmap:port").is_err());
/// ```
pub fn validate_hash_type(set_type: &str) -> Result<()> {
    if !set_type.starts_with("hash:") {
        return Err(IpsetError::NotHashType(set_type.to_string()));
    }
    Ok(())
}

/// Validate a set entry such as `10.0.0.1`, `10.0.0.0/8` or `10.0.0.1,tcp:80`.
///
/// The entry is otherwise opaque; its syntax depends on the set type.
pub fn validate_entry(entry: &str) -> Result<()> {
    let invalid = |reason| {
        Err(IpsetError::InvalidEntry {
            entry: entry.to_string(),
            reason,
        })
    };

    if entry.is_empty() {
        return invalid("entry is empty");
    }
    if entry.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return invalid("entry contains whitespace or control characters");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert!(validate_set_name("blocked").is_ok());
        assert!(validate_set_name("blocklist_v4").is_ok());
        assert!(validate_set_name("a").is_ok());
        assert!(validate_set_name(&"x".repeat(MAX_SET_NAME_LEN)).is_ok());
    }

    #[test]
    fn test_invalid_names() {
        assert!(validate_set_name("").is_err());
        assert!(validate_set_name(&"x".repeat(MAX_SET_NAME_LEN + 1)).is_err());
        assert!(validate_set_name("with space").is_err());
        assert!(validate_set_name("tab\there").is_err());
        assert!(validate_set_name("new\nline").is_err());
        assert!(validate_set_name("-exist").is_err());
    }

    #[test]
    fn test_name_length_counts_bytes() {
        // 16 two-byte characters = 32 bytes
        let name = "é".repeat(16);
        assert!(validate_set_name(&name).is_err());
    }

    #[test]
    fn test_invalid_name_error() {
        match validate_set_name("") {
            Err(IpsetError::InvalidName { name, reason }) => {
                assert!(name.is_empty());
                assert_eq!(reason, "name is empty");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_hash_types() {
        assert!(validate_hash_type("hash:ip").is_ok());
        assert!(validate_hash_type("hash:net").is_ok());
        assert!(validate_hash_type("hash:ip,port").is_ok());
        assert!(validate_hash_type("hash:net,iface").is_ok());

        assert!(matches!(
            validate_hash_type("bitmap:ip"),
            Err(IpsetError::NotHashType(t)) if t == "bitmap:ip"
        ));
        assert!(validate_hash_type("list:set").is_err());
        assert!(validate_hash_type("hash").is_err());
        assert!(validate_hash_type("").is_err());
    }

    #[test]
    fn test_entries() {
        assert!(validate_entry("10.0.0.1").is_ok());
        assert!(validate_entry("10.0.0.0/8").is_ok());
        assert!(validate_entry("2001:db8::/32").is_ok());
        assert!(validate_entry("10.0.0.1,tcp:80").is_ok());

        assert!(validate_entry("").is_err());
        assert!(validate_entry("10.0.0.1 timeout 5").is_err());
    }
}
