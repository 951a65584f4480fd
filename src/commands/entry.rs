//! Entry commands: add, del, test.

use anyhow::Result;
use std::path::Path;

use crate::cmd_abstraction::CommandExecutor;
use crate::ipset::IpSet;

fn as_strs(opts: &[String]) -> Vec<&str> {
    opts.iter().map(String::as_str).collect()
}

/// Run the add command
pub fn add(name: &str, entry: &str, opts: &[String], config_path: &Path) -> Result<()> {
    let (_, ipset) = super::open(config_path)?;
    ipset.add(name, entry, &as_strs(opts))?;
    println!("[OK] Added {} to {}", entry, name);
    Ok(())
}

/// Run the del command
pub fn del(name: &str, entry: &str, opts: &[String], config_path: &Path) -> Result<()> {
    let (_, ipset) = super::open(config_path)?;
    ipset.del(name, entry, &as_strs(opts))?;
    println!("[OK] Deleted {} from {}", entry, name);
    Ok(())
}

/// Run the test command. Returns whether the entry is in the set.
pub fn test(name: &str, entry: &str, config_path: &Path) -> Result<bool> {
    let (_, ipset) = super::open(config_path)?;
    let (found, message) = execute_test(&ipset, name, entry)?;
    println!("{}", message);
    Ok(found)
}

pub fn execute_test<E: CommandExecutor>(
    ipset: &IpSet<E>,
    name: &str,
    entry: &str,
) -> Result<(bool, String)> {
    let found = ipset.test(name, entry)?;
    let message = if found {
        format!("{} is in set {}", entry, name)
    } else {
        format!("{} is NOT in set {}", entry, name)
    };
    Ok((found, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd_abstraction::MockCommandExecutor;
    use crate::commands::testing::{expect_call, failed, ipset, ok};

    #[test]
    fn test_execute_test_hit() {
        let mut mock = MockCommandExecutor::new();
        expect_call(
            &mut mock,
            &["test", "blocked", "10.0.0.1"],
            ok("10.0.0.1 is in set blocked.\n"),
        );

        let (found, message) = execute_test(&ipset(mock), "blocked", "10.0.0.1").unwrap();
        assert!(found);
        assert_eq!(message, "10.0.0.1 is in set blocked");
    }

    #[test]
    fn test_execute_test_miss() {
        let mut mock = MockCommandExecutor::new();
        expect_call(
            &mut mock,
            &["test", "blocked", "10.0.0.9"],
            failed("Warning: 10.0.0.9 is NOT in set blocked.\n"),
        );

        let (found, message) = execute_test(&ipset(mock), "blocked", "10.0.0.9").unwrap();
        assert!(!found);
        assert!(message.contains("NOT"));
    }

    #[test]
    fn test_as_strs() {
        let opts = vec!["timeout".to_string(), "10".to_string()];
        assert_eq!(as_strs(&opts), vec!["timeout", "10"]);
    }
}
