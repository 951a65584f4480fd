//! Parsers for `ipset list` output.
//!
//! ```text
//! Name: blocked
//! Type: hash:ip
//! Revision: 4
//! Header: family inet hashsize 1024 maxelem 65536 timeout 0
//! Size in memory: 248
//! References: 0
//! Number of entries: 2
//! Members:
//! 10.0.0.1 timeout 0
//! 10.0.0.2 timeout 0
//! ```

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::error::{IpsetError, Result};

lazy_static! {
    static ref MEMBERS_HEADER_RE: Regex = Regex::new(r"(?m)^Members:[ \t]*\r?$").unwrap();
    static ref HEADER_FIELD_RE: Regex = Regex::new(r"(?m)^([A-Za-z][A-Za-z ]*):[ \t]*(.*?)\r?$").unwrap();
}

/// Header and members of a single set, as reported by `ipset list NAME`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SetInfo {
    pub name: String,
    pub set_type: String,
    pub revision: Option<u32>,
    /// Creation parameters line, e.g. `family inet hashsize 1024 maxelem 65536`
    pub header: String,
    pub size_in_memory: Option<u64>,
    pub references: Option<u32>,
    /// Only reported by ipset 6.30 and later
    pub entry_count: Option<usize>,
    pub members: Vec<String>,
}

/// Split `ipset list` output into the header block and the members block.
fn split_members(output: &str) -> Result<(&str, &str)> {
    let header = MEMBERS_HEADER_RE
        .find(output)
        .ok_or_else(|| IpsetError::UnexpectedOutput("missing 'Members:' section".to_string()))?;

    Ok((&output[..header.start()], &output[header.end()..]))
}

/// Extract the member entries of a single-set listing.
///
/// Each non-blank line after `Members:` contributes its first
/// whitespace-delimited token; per-entry options such as `timeout 0` or
/// `packets 3 bytes 180` are dropped.
pub fn parse_members(output: &str) -> Result<Vec<String>> {
    let (_, members) = split_members(output)?;

    Ok(members
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect())
}

/// Parse the output of `ipset list -n`.
pub fn parse_set_names(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse the full listing of a single set.
pub fn parse_set_info(output: &str) -> Result<SetInfo> {
    let (header, _) = split_members(output)?;
    let mut info = SetInfo {
        members: parse_members(output)?,
        ..Default::default()
    };

    for caps in HEADER_FIELD_RE.captures_iter(header) {
        let value = caps[2].trim();
        match &caps[1] {
            "Name" => info.name = value.to_string(),
            "Type" => info.set_type = value.to_string(),
            "Revision" => info.revision = value.parse().ok(),
            "Header" => info.header = value.to_string(),
            "Size in memory" => info.size_in_memory = value.parse().ok(),
            "References" => info.references = value.parse().ok(),
            "Number of entries" => info.entry_count = value.parse().ok(),
            _ => {}
        }
    }

    if info.name.is_empty() {
        return Err(IpsetError::UnexpectedOutput(
            "missing 'Name:' field".to_string(),
        ));
    }

    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "Name: blocked
Type: hash:ip
Revision: 4
Header: family inet hashsize 1024 maxelem 65536 timeout 0
Size in memory: 248
References: 1
Number of entries: 3
Members:
10.0.0.1 timeout 0
10.0.0.2 timeout 42
192.168.1.0/24
";

    #[test]
    fn test_parse_members() {
        let members = parse_members(LISTING).unwrap();
        assert_eq!(members, vec!["10.0.0.1", "10.0.0.2", "192.168.1.0/24"]);
    }

    #[test]
    fn test_parse_members_empty_set() {
        let output = "Name: empty\nType: hash:net\nMembers:\n";
        assert!(parse_members(output).unwrap().is_empty());

        // No trailing newline after the header
        let output = "Name: empty\nType: hash:net\nMembers:";
        assert!(parse_members(output).unwrap().is_empty());
    }

    #[test]
    fn test_parse_members_with_counters_and_comments() {
        let output = "Name: s\nType: hash:ip,port\nMembers:\n\
                      10.0.0.1,tcp:80 packets 12 bytes 720\n\
                      10.0.0.2,udp:53 comment \"dns\"\n\n";
        let members = parse_members(output).unwrap();
        assert_eq!(members, vec!["10.0.0.1,tcp:80", "10.0.0.2,udp:53"]);
    }

    #[test]
    fn test_parse_members_crlf() {
        let output = "Name: s\r\nType: hash:ip\r\nMembers:\r\n10.0.0.1\r\n";
        assert_eq!(parse_members(output).unwrap(), vec!["10.0.0.1"]);
    }

    #[test]
    fn test_parse_members_missing_header() {
        let result = parse_members("ipset v7.15: The set with the given name does not exist");
        assert!(matches!(result, Err(IpsetError::UnexpectedOutput(_))));
    }

    #[test]
    fn test_parse_set_names() {
        let names = parse_set_names("blocked\nallowed\n\n  cdn  \n");
        assert_eq!(names, vec!["blocked", "allowed", "cdn"]);
        assert!(parse_set_names("").is_empty());
    }

    #[test]
    fn test_parse_set_info() {
        let info = parse_set_info(LISTING).unwrap();
        assert_eq!(info.name, "blocked");
        assert_eq!(info.set_type, "hash:ip");
        assert_eq!(info.revision, Some(4));
        assert_eq!(info.header, "family inet hashsize 1024 maxelem 65536 timeout 0");
        assert_eq!(info.size_in_memory, Some(248));
        assert_eq!(info.references, Some(1));
        assert_eq!(info.entry_count, Some(3));
        assert_eq!(info.members.len(), 3);
    }

    #[test]
    fn test_parse_set_info_old_format() {
        // ipset 6.x before "Number of entries" was added
        let output = "Name: old\nType: hash:net\nRevision: 3\n\
                      Header: family inet hashsize 1024 maxelem 65536\n\
                      Size in memory: 16760\nReferences: 0\nMembers:\n10.0.0.0/8\n";
        let info = parse_set_info(output).unwrap();
        assert_eq!(info.name, "old");
        assert_eq!(info.entry_count, None);
        assert_eq!(info.members, vec!["10.0.0.0/8"]);
    }

    #[test]
    fn test_parse_set_info_missing_name() {
        let output = "Type: hash:ip\nMembers:\n";
        assert!(parse_set_info(output).is_err());
    }
}
