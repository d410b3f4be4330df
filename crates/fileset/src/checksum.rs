//! SHA-256 checksums
//!
//! Two formats are produced here:
//! - content checksums in the canonical `sha256:<hex>` form, used for
//!   optimistic read-modify-write ([`FileSet::alter_checked`]);
//! - the bare 64-character hex file-list hash used for change detection
//!   ([`FileSet::generate_file_list_hash`]).

use sha2::{Digest, Sha256};

use crate::stats::FileStats;
use crate::{FileSet, NormalizedPath};

/// Prefix for all content checksums produced by this module
const PREFIX: &str = "sha256:";

/// Compute the SHA-256 checksum of raw content.
///
/// Returns a string in the canonical format `"sha256:<hex>"`.
pub fn compute_content_checksum(content: impl AsRef<[u8]>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_ref());
    format!("{}{:x}", PREFIX, hasher.finalize())
}

/// Which per-path attributes go into a file-list hash besides the path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HashOptions {
    pub last_modified: bool,
    pub size: bool,
}

/// Hash an ordered path list.
///
/// Each path contributes `path NUL [mtime-ms] NUL [size] LF`; attributes
/// that are not requested, or cannot be read, stay empty. The result is
/// order-sensitive.
pub fn file_list_digest<'a>(
    paths: impl IntoIterator<Item = &'a NormalizedPath>,
    options: HashOptions,
) -> String {
    let mut hasher = Sha256::new();
    for path in paths {
        hasher.update(path.as_str().as_bytes());
        hasher.update([0u8]);

        let stats = if options.last_modified || options.size {
            FileStats::fetch(path)
        } else {
            None
        };
        if let (true, Some(stats)) = (options.last_modified, &stats) {
            hasher.update(stats.modified_millis().to_string().as_bytes());
        }
        hasher.update([0u8]);
        if let (true, Some(stats)) = (options.size, &stats) {
            hasher.update(stats.size.to_string().as_bytes());
        }
        hasher.update(b"\n");
    }
    format!("{:x}", hasher.finalize())
}

impl FileSet {
    /// Deterministic hash of the resolved path list, optionally including
    /// each entry's modification time and/or size.
    ///
    /// Any addition, removal or reordering of entries changes the hash, as
    /// does a change to an included attribute.
    pub fn generate_file_list_hash(&self, include_last_modified: bool, include_size: bool) -> String {
        file_list_digest(
            self.paths(),
            HashOptions {
                last_modified: include_last_modified,
                size: include_size,
            },
        )
    }
}
