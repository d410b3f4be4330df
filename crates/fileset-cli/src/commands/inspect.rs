//! Read-only commands: list, stat, hash

use std::sync::Arc;

use chrono::{DateTime, Utc};
use colored::Colorize;
use fileset::{Context, EntryKind, FileSet};
use serde::Serialize;

use crate::error::{CliError, Result};

/// Run the list command
pub fn run_list(
    context: &Arc<Context>,
    pattern: &str,
    files: bool,
    folders: bool,
    json: bool,
) -> Result<()> {
    let set = if files {
        context.resolve_files(pattern)?
    } else if folders {
        context.resolve_folders(pattern)?
    } else {
        context.resolve(pattern)?
    };

    if json {
        let paths: Vec<&str> = set.iter().map(|p| p.as_str()).collect();
        println!("{}", serde_json::to_string_pretty(&paths)?);
        return Ok(());
    }

    for path in &set {
        if path.is_dir() {
            println!("{}/", path.as_str().blue());
        } else {
            println!("{}", path);
        }
    }
    Ok(())
}

/// Stat output for `--json`
#[derive(Debug, Serialize)]
struct StatReport<'a> {
    path: &'a str,
    kind: &'static str,
    size: u64,
    modified: String,
    modified_ms: u128,
}

/// Run the stat command
pub fn run_stat(context: &Arc<Context>, pattern: &str, json: bool) -> Result<()> {
    let set = context.resolve(pattern)?;
    let (Some(path), Some(stats)) = (set.paths().first(), set.stats()) else {
        return Err(single_target_error(&set));
    };

    let report = StatReport {
        path: path.as_str(),
        kind: kind_name(stats.kind),
        size: stats.size,
        modified: DateTime::<Utc>::from(stats.modified).to_rfc3339(),
        modified_ms: stats.modified_millis(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{:<10} {}", "path:".dimmed(), report.path);
        println!("{:<10} {}", "kind:".dimmed(), report.kind);
        println!("{:<10} {} bytes", "size:".dimmed(), report.size);
        println!("{:<10} {}", "modified:".dimmed(), report.modified);
    }
    Ok(())
}

/// Run the hash command
pub fn run_hash(context: &Arc<Context>, pattern: &str, mtime: bool, size: bool) -> Result<()> {
    let set = context.resolve(pattern)?;
    println!("{}", set.generate_file_list_hash(mtime, size));
    Ok(())
}

pub(crate) fn single_target_error(set: &FileSet) -> CliError {
    CliError::user(format!(
        "'{}' matches {} entries, expected exactly one",
        set.pattern(),
        set.len()
    ))
}

fn kind_name(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::File => "file",
        EntryKind::Directory => "directory",
        EntryKind::Other => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn stat_requires_single_match() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        let context = Arc::new(Context::default());

        let many = format!("{}/*.txt", dir.path().display());
        assert!(matches!(
            run_stat(&context, &many, false),
            Err(CliError::User { .. })
        ));

        let one = format!("{}/a.txt", dir.path().display());
        assert!(run_stat(&context, &one, true).is_ok());
    }

    #[test]
    fn list_rejects_malformed_pattern() {
        let context = Arc::new(Context::default());
        assert!(matches!(
            run_list(&context, "[oops", false, false, false),
            Err(CliError::Fs(fileset::Error::Pattern { .. }))
        ));
    }

    #[test]
    fn kind_names() {
        assert_eq!(kind_name(EntryKind::File), "file");
        assert_eq!(kind_name(EntryKind::Directory), "directory");
    }
}
