//! List command implementation.

use anyhow::Result;
use std::path::Path;

use crate::cmd_abstraction::CommandExecutor;
use crate::ipset::{IpSet, SetInfo};
use crate::utils::format_count_with_separator;

/// What to list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    Members,
    Sorted,
    Info,
}

/// Run the list command
pub fn run(name: Option<&str>, mode: ListMode, json: bool, config_path: &Path) -> Result<()> {
    let (_, ipset) = super::open(config_path)?;
    let output = execute(&ipset, name, mode, json)?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

pub fn execute<E: CommandExecutor>(
    ipset: &IpSet<E>,
    name: Option<&str>,
    mode: ListMode,
    json: bool,
) -> Result<String> {
    let Some(name) = name else {
        let names = ipset.list_sets()?;
        return if json {
            Ok(serde_json::to_string_pretty(&names)?)
        } else {
            Ok(names.join("\n"))
        };
    };

    match mode {
        ListMode::Info => {
            let info = ipset.list_info(name)?;
            if json {
                Ok(serde_json::to_string_pretty(&info)?)
            } else {
                Ok(render_info(&info))
            }
        }
        ListMode::Members | ListMode::Sorted => {
            let members = if mode == ListMode::Sorted {
                ipset.list_sorted(name)?
            } else {
                ipset.list(name)?
            };
            if json {
                Ok(serde_json::to_string_pretty(&members)?)
            } else {
                Ok(members.join("\n"))
            }
        }
    }
}

fn render_info(info: &SetInfo) -> String {
    let optional = |v: Option<String>| v.unwrap_or_else(|| "-".to_string());

    let mut lines = vec![
        format!("Set:        {}", info.name),
        format!("Type:       {}", info.set_type),
        format!("Revision:   {}", optional(info.revision.map(|r| r.to_string()))),
        format!("Header:     {}", info.header),
        format!(
            "Memory:     {}",
            optional(info.size_in_memory.map(crate::utils::format_bytes))
        ),
        format!("References: {}", optional(info.references.map(|r| r.to_string()))),
        format!(
            "Entries:    {}",
            format_count_with_separator(info.entry_count.unwrap_or(info.members.len()))
        ),
    ];
    if !info.members.is_empty() {
        lines.push(String::new());
        lines.extend(info.members.iter().map(|m| format!("  {}", m)));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd_abstraction::MockCommandExecutor;
    use crate::commands::testing::{expect_call, ipset, ok};

    const LISTING: &str = "Name: blocked\nType: hash:ip\nRevision: 4\n\
                           Header: family inet hashsize 1024 maxelem 65536\n\
                           Size in memory: 2048\nReferences: 0\nNumber of entries: 2\n\
                           Members:\n10.0.0.2\n10.0.0.1\n";

    #[test]
    fn test_list_names_text() {
        let mut mock = MockCommandExecutor::new();
        expect_call(&mut mock, &["list", "-n"], ok("blocked\nallowed\n"));

        let out = execute(&ipset(mock), None, ListMode::Members, false).unwrap();
        assert_eq!(out, "blocked\nallowed");
    }

    #[test]
    fn test_list_names_json() {
        let mut mock = MockCommandExecutor::new();
        expect_call(&mut mock, &["list", "-n"], ok("blocked\n"));

        let out = execute(&ipset(mock), None, ListMode::Members, true).unwrap();
        let parsed: Vec<String> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, vec!["blocked"]);
    }

    #[test]
    fn test_list_members() {
        let mut mock = MockCommandExecutor::new();
        expect_call(&mut mock, &["list", "blocked"], ok(LISTING));

        let out = execute(&ipset(mock), Some("blocked"), ListMode::Members, false).unwrap();
        assert_eq!(out, "10.0.0.2\n10.0.0.1");
    }

    #[test]
    fn test_list_sorted_uses_flag() {
        let mut mock = MockCommandExecutor::new();
        expect_call(&mut mock, &["list", "blocked", "-sorted"], ok(LISTING));

        let out = execute(&ipset(mock), Some("blocked"), ListMode::Sorted, true).unwrap();
        let parsed: Vec<String> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.len(), 2);
    }

    #[test]
    fn test_list_info_text() {
        let mut mock = MockCommandExecutor::new();
        expect_call(&mut mock, &["list", "blocked"], ok(LISTING));

        let out = execute(&ipset(mock), Some("blocked"), ListMode::Info, false).unwrap();
        assert!(out.contains("Set:        blocked"));
        assert!(out.contains("Memory:     2.0 KB"));
        assert!(out.contains("Entries:    2"));
        assert!(out.contains("  10.0.0.1"));
    }

    #[test]
    fn test_list_info_json() {
        let mut mock = MockCommandExecutor::new();
        expect_call(&mut mock, &["list", "blocked"], ok(LISTING));

        let out = execute(&ipset(mock), Some("blocked"), ListMode::Info, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["name"], "blocked");
        assert_eq!(value["set_type"], "hash:ip");
        assert_eq!(value["entry_count"], 2);
        assert_eq!(value["members"][1], "10.0.0.1");
    }

    #[test]
    fn test_render_info_missing_fields() {
        let info = SetInfo {
            name: "old".to_string(),
            set_type: "hash:net".to_string(),
            members: vec!["10.0.0.0/8".to_string()],
            ..Default::default()
        };
        let out = render_info(&info);
        assert!(out.contains("Revision:   -"));
        assert!(out.contains("Entries:    1"));
    }
}
