//! Replace command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use crate::cmd_abstraction::CommandExecutor;
use crate::ipset::IpSet;
use crate::lock::LockGuard;
use crate::utils::format_count_with_separator;

/// Parse an entries file: one entry per line, `#` starts a comment.
pub fn parse_entries(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.split('#').next().unwrap_or("").trim())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Entries from the command line followed by those from `file`, if any.
pub fn collect_entries(mut entries: Vec<String>, file: Option<&Path>) -> Result<Vec<String>> {
    if let Some(file) = file {
        let content = std::fs::read_to_string(file)
            .with_context(|| format!("Failed to read entries file: {:?}", file))?;
        let from_file = parse_entries(&content);
        debug!("Read {} entries from {:?}", from_file.len(), file);
        entries.extend(from_file);
    }
    Ok(entries)
}

/// Run the replace command
pub fn run(name: &str, entries: Vec<String>, file: Option<&Path>, config_path: &Path) -> Result<()> {
    let entries = collect_entries(entries, file)?;
    let (config, ipset) = super::open(config_path)?;

    let _lock = LockGuard::acquire(&config.lock_file)?;
    execute(&ipset, name, &entries)?;

    println!(
        "[OK] Replaced contents of {} ({} entries)",
        name,
        format_count_with_separator(entries.len())
    );
    Ok(())
}

pub fn execute<E: CommandExecutor>(ipset: &IpSet<E>, name: &str, entries: &[String]) -> Result<()> {
    ipset
        .replace(name, entries)
        .with_context(|| format!("Failed to replace contents of set {}", name))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd_abstraction::MockCommandExecutor;
    use crate::commands::testing::{expect_call, ipset, ok};
    use tempfile::TempDir;

    #[test]
    fn test_parse_entries() {
        let content = "# blocklist\n10.0.0.1\n\n  10.0.0.0/8   # private\n#10.9.9.9\n192.168.1.1,tcp:22\n";
        assert_eq!(
            parse_entries(content),
            vec!["10.0.0.1", "10.0.0.0/8", "192.168.1.1,tcp:22"]
        );
    }

    #[test]
    fn test_parse_entries_empty() {
        assert!(parse_entries("").is_empty());
        assert!(parse_entries("# only comments\n\n").is_empty());
    }

    #[test]
    fn test_collect_entries_args_then_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("entries.txt");
        std::fs::write(&path, "10.0.0.2\n10.0.0.3\n").unwrap();

        let entries = collect_entries(vec!["10.0.0.1".to_string()], Some(&path)).unwrap();
        assert_eq!(entries, vec!["10.0.0.1", "10.0.0.2", "10.0.0.3"]);
    }

    #[test]
    fn test_collect_entries_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = collect_entries(vec![], Some(&dir.path().join("absent"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read entries file"));
    }

    #[test]
    fn test_execute() {
        let mut mock = MockCommandExecutor::new();
        expect_call(&mut mock, &["flush", "blocked"], ok(""));
        expect_call(&mut mock, &["add", "blocked", "10.0.0.1"], ok(""));

        execute(&ipset(mock), "blocked", &["10.0.0.1".to_string()]).unwrap();
    }
}
