//! Glob pattern resolution

use std::fs;
use std::path::Path;

use glob::MatchOptions;

use crate::{Context, Error, LogLevel, NormalizedPath, Result};

/// What a pattern is allowed to resolve to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// Files and folders
    #[default]
    Any,
    /// Existing regular files only
    Files,
    /// Existing directories only
    Folders,
    /// Nothing: the pattern names a path that is about to be created
    New,
}

impl TargetKind {
    fn accepts(self, path: &Path) -> bool {
        match self {
            Self::Any => true,
            Self::Files => fs::metadata(path).is_ok_and(|m| m.is_file()),
            Self::Folders => fs::metadata(path).is_ok_and(|m| m.is_dir()),
            Self::New => false,
        }
    }
}

/// Wildcards never match a leading `.`, so `*` skips `.env`. Spell the dot
/// out (`.*`, `.cache/*`) to reach hidden entries.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Resolve `pattern` into an ordered path list filtered by `kind`.
///
/// Order is the glob walker's order. No match is an empty list, not an error.
/// Hidden entries (leading `.`) are only matched by a literal dot in the
/// pattern.
pub fn resolve(pattern: &str, kind: TargetKind, context: &Context) -> Result<Vec<NormalizedPath>> {
    if kind == TargetKind::New {
        return Ok(Vec::new());
    }

    let entries = glob::glob_with(pattern, MATCH_OPTIONS).map_err(|e| Error::Pattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if kind.accepts(&path) => paths.push(NormalizedPath::new(path)),
            Ok(_) => {}
            Err(e) => context.log(
                LogLevel::Warning,
                format_args!("Skipping unreadable entry {}: {}", e.path().display(), e.error()),
            ),
        }
    }

    context.log(
        LogLevel::Detail,
        format_args!("Resolved '{}' ({:?}) to {} entries", pattern, kind, paths.len()),
    );
    Ok(paths)
}

/// Whether `pattern` contains no glob metacharacters and can be used as a
/// literal path.
pub fn is_literal(pattern: &str) -> bool {
    !pattern.is_empty() && glob::Pattern::escape(pattern) == pattern
}
