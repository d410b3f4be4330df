//! File metadata and the per-set stats cache

use std::cell::OnceCell;
use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::NormalizedPath;

/// Kind of a filesystem entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
    /// Anything else (sockets, devices, dangling links)
    Other,
}

impl EntryKind {
    pub fn from_metadata(metadata: &fs::Metadata) -> Self {
        if metadata.is_file() {
            Self::File
        } else if metadata.is_dir() {
            Self::Directory
        } else {
            Self::Other
        }
    }
}

/// Stat data for one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStats {
    pub size: u64,
    pub modified: SystemTime,
    pub kind: EntryKind,
}

impl FileStats {
    /// Query the filesystem. Returns `None` if the path cannot be stat'ed.
    pub fn fetch(path: &NormalizedPath) -> Option<Self> {
        let metadata = fs::metadata(path.to_native()).ok()?;
        Some(Self {
            size: metadata.len(),
            modified: metadata.modified().ok()?,
            kind: EntryKind::from_metadata(&metadata),
        })
    }

    /// Modification time in milliseconds since the Unix epoch.
    ///
    /// Times before the epoch clamp to zero.
    pub fn modified_millis(&self) -> u128 {
        self.modified
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0)
    }
}

/// Lazily filled stats for the single path a set resolves to.
///
/// Owned by one [`FileSet`](crate::FileSet); reset whenever its paths are
/// replaced. Failed lookups are not cached.
#[derive(Debug, Clone, Default)]
pub struct StatsCache {
    cell: OnceCell<FileStats>,
}

impl StatsCache {
    pub fn get_or_fetch(&self, path: &NormalizedPath) -> Option<&FileStats> {
        if self.cell.get().is_none() {
            let stats = FileStats::fetch(path)?;
            let _ = self.cell.set(stats);
        }
        self.cell.get()
    }

    pub fn is_cached(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn invalidate(&mut self) {
        self.cell = OnceCell::new();
    }
}
