//! Filesystem primitives used by the content accessor

use crate::{Error, NormalizedPath, Result};
use fs2::FileExt;
use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::sync::atomic::{AtomicU64, Ordering};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Create the parent directory chain of `path` if it is missing.
///
/// A path without a parent component (`"file.txt"`) needs nothing.
pub fn ensure_parent(path: &NormalizedPath) -> Result<()> {
    if let Some(parent) = path.parent() {
        let native = parent.to_native();
        fs::create_dir_all(&native).map_err(|e| Error::io(native, e))?;
    }
    Ok(())
}

/// Write content atomically to a file with locking.
///
/// Uses write-to-temp-then-rename strategy to prevent partial writes.
/// Acquires an advisory lock on the temp file while writing.
pub fn write_atomic(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    ensure_parent(path)?;
    let native_path = path.to_native();

    // Same directory as the target so the rename stays on one filesystem
    let mut temp_name = OsString::from(".");
    temp_name.push(native_path.file_name().unwrap_or_default());
    temp_name.push(format!(
        ".{}.{}.tmp",
        std::process::id(),
        TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let temp_path = native_path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    let written = temp_file
        .write_all(content)
        .and_then(|()| temp_file.sync_all());
    if let Err(e) = written {
        drop(temp_file);
        let _ = fs::remove_file(&temp_path);
        return Err(Error::io(&temp_path, e));
    }

    FileExt::unlock(&temp_file).map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;
    drop(temp_file);

    fs::rename(&temp_path, &native_path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        Error::io(&native_path, e)
    })
}

/// Read raw bytes, or `None` if the path is missing or not a file.
pub fn read_bytes(path: &NormalizedPath) -> Result<Option<Vec<u8>>> {
    let native_path = path.to_native();
    if native_path.is_dir() {
        return Ok(None);
    }
    match fs::read(&native_path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(native_path, e)),
    }
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Append to a file, creating it (and its parents) if absent.
pub fn append(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    ensure_parent(path)?;
    let native_path = path.to_native();
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&native_path)
        .map_err(|e| Error::io(&native_path, e))?;
    file.write_all(content)
        .map_err(|e| Error::io(&native_path, e))
}
