//! Batch operations over every resolved path
//!
//! Entries are processed one after the other in resolution order. A failure
//! on one entry is reported as a warning and skipped; the returned count only
//! includes entries that were actually affected.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;

use walkdir::WalkDir;

use crate::{Error, FileSet, LogLevel, NormalizedPath, Result, io as fs_io};

impl FileSet {
    /// Delete every resolved file or folder (folders recursively). No
    /// confirmation.
    ///
    /// Entries that vanished before their turn are neither counted nor
    /// reported. The set resolves to nothing afterwards.
    pub fn delete(&mut self) -> usize {
        let mut removed = 0;
        for path in self.paths() {
            match remove_entry(path.as_path()) {
                Ok(()) => {
                    removed += 1;
                    self.context().log(LogLevel::Detail, format_args!("Deleted {path}"));
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => self
                    .context()
                    .log(LogLevel::Warning, format_args!("Could not delete {path}: {e}")),
            }
        }
        self.context().log(
            LogLevel::Action,
            format_args!("Deleted {removed} entries matching '{}'", self.pattern()),
        );
        self.replace_paths(Vec::new());
        removed
    }

    /// Alias of [`FileSet::delete`].
    pub fn remove(&mut self) -> usize {
        self.delete()
    }

    /// Create the parent folders of every resolved path.
    ///
    /// When nothing is resolved the pattern itself is taken as a literal
    /// path. Already existing folders are fine. Returns how many parent
    /// chains are in place.
    pub fn ensure_folders(&self) -> usize {
        let literal;
        let targets = if self.paths().is_empty() {
            if self.pattern().is_empty() {
                return 0;
            }
            literal = [NormalizedPath::new(self.pattern())];
            &literal[..]
        } else {
            self.paths()
        };

        let mut ensured = 0;
        for path in targets {
            match fs_io::ensure_parent(path) {
                Ok(()) => ensured += 1,
                Err(e) => self.context().log(
                    LogLevel::Warning,
                    format_args!("Could not create parent folders of {path}: {e}"),
                ),
            }
        }
        ensured
    }

    /// Alias of [`FileSet::ensure_folders`].
    pub fn create_folders(&self) -> usize {
        self.ensure_folders()
    }

    /// Move every resolved entry into `destination`, keeping base names.
    ///
    /// `destination` is created if missing; a trailing separator makes no
    /// difference to the resulting names. Entries whose target name is
    /// already taken are skipped. The resolved paths are rewritten in place
    /// to the new locations (skipped entries keep their old path).
    ///
    /// # Errors
    ///
    /// Returns an error only if `destination` cannot be created.
    pub fn move_to(&mut self, destination: impl AsRef<Path>) -> Result<usize> {
        if self.paths().is_empty() {
            return Ok(0);
        }
        let destination = self.prepare_destination(destination.as_ref())?;

        let mut moved = 0;
        let mut relocated = Vec::with_capacity(self.len());
        for path in self.paths() {
            let outcome = target_in(path, &destination).and_then(|target| {
                move_entry(path.as_path(), target.as_path()).map(|()| target)
            });
            match outcome {
                Ok(target) => {
                    moved += 1;
                    self.context()
                        .log(LogLevel::Detail, format_args!("Moved {path} to {target}"));
                    relocated.push(target);
                }
                Err(e) => {
                    self.context().log(
                        LogLevel::Warning,
                        format_args!("Could not move {path} into {destination}: {e}"),
                    );
                    relocated.push(path.clone());
                }
            }
        }

        self.context().log(
            LogLevel::Action,
            format_args!("Moved {moved} entries into {destination}"),
        );
        self.replace_paths(relocated);
        Ok(moved)
    }

    /// Copy every resolved entry into `destination`, keeping base names.
    ///
    /// Same naming and collision rules as [`FileSet::move_to`]; folders are
    /// copied recursively. The resolved paths still name the originals.
    pub fn copy_to(&self, destination: impl AsRef<Path>) -> Result<usize> {
        if self.paths().is_empty() {
            return Ok(0);
        }
        let destination = self.prepare_destination(destination.as_ref())?;

        let mut copied = 0;
        for path in self.paths() {
            let outcome = target_in(path, &destination).and_then(|target| {
                copy_entry(path.as_path(), target.as_path()).map(|()| target)
            });
            match outcome {
                Ok(target) => {
                    copied += 1;
                    self.context()
                        .log(LogLevel::Detail, format_args!("Copied {path} to {target}"));
                }
                Err(e) => self.context().log(
                    LogLevel::Warning,
                    format_args!("Could not copy {path} into {destination}: {e}"),
                ),
            }
        }

        self.context().log(
            LogLevel::Action,
            format_args!("Copied {copied} entries into {destination}"),
        );
        Ok(copied)
    }

    fn prepare_destination(&self, destination: &Path) -> Result<NormalizedPath> {
        let destination = NormalizedPath::new(destination);
        let native = destination.to_native();
        fs::create_dir_all(&native).map_err(|e| Error::io(native, e))?;
        Ok(destination)
    }
}

/// `destination/<base name of path>`, refusing names that are already taken.
fn target_in(path: &NormalizedPath, destination: &NormalizedPath) -> io::Result<NormalizedPath> {
    let name = path.as_path().file_name().ok_or_else(|| {
        io::Error::new(ErrorKind::InvalidInput, format!("{path} has no base name"))
    })?;
    let target = destination.join(name);
    if fs::symlink_metadata(&target).is_ok() {
        return Err(io::Error::new(
            ErrorKind::AlreadyExists,
            format!("{target} already exists"),
        ));
    }
    Ok(target)
}

fn remove_entry(path: &Path) -> io::Result<()> {
    if fs::symlink_metadata(path)?.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

fn move_entry(source: &Path, target: &Path) -> io::Result<()> {
    match fs::rename(source, target) {
        Err(e) if e.kind() == ErrorKind::CrossesDevices => {
            copy_entry(source, target)?;
            remove_entry(source)
        }
        other => other,
    }
}

fn copy_entry(source: &Path, target: &Path) -> io::Result<()> {
    if !fs::metadata(source)?.is_dir() {
        return fs::copy(source, target).map(|_| ());
    }

    for entry in WalkDir::new(source) {
        let entry = entry.map_err(io::Error::from)?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(io::Error::other)?;
        let dest = target.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest)?;
        } else {
            fs::copy(entry.path(), &dest)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn copy_entry_recurses_into_folders() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("src/a.txt").write_str("a").unwrap();
        temp.child("src/nested/b.txt").write_str("b").unwrap();

        copy_entry(&temp.path().join("src"), &temp.path().join("dst")).unwrap();

        temp.child("dst/a.txt").assert("a");
        temp.child("dst/nested/b.txt").assert("b");
        temp.child("src/a.txt").assert("a");
    }

    #[test]
    fn target_in_refuses_taken_names() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("dest/a.txt").touch().unwrap();
        let destination = NormalizedPath::new(temp.child("dest").path());

        let err = target_in(&NormalizedPath::new("elsewhere/a.txt"), &destination).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);

        let ok = target_in(&NormalizedPath::new("elsewhere/b.txt"), &destination).unwrap();
        assert!(ok.as_str().ends_with("dest/b.txt"));
    }

    #[test]
    fn remove_entry_handles_files_and_folders() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("dir/inner/file.txt").touch().unwrap();
        temp.child("single.txt").touch().unwrap();

        remove_entry(&temp.path().join("dir")).unwrap();
        remove_entry(&temp.path().join("single.txt")).unwrap();

        assert!(!temp.path().join("dir").exists());
        assert!(!temp.path().join("single.txt").exists());
    }
}
