//! Resolved target paths

use std::fmt;
use std::path::{Path, PathBuf};

/// A target path as the filesystem reported it, plus a forward-slash
/// rendering.
///
/// I/O always goes through the native path, so names are never rewritten.
/// The rendering is what ordering, display and the file-list hash see; it
/// only differs from the native text on Windows, where `\` is the separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    rendered: String,
    native: PathBuf,
}

impl NormalizedPath {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let native = path.as_ref().to_path_buf();
        Self {
            rendered: render(&native),
            native,
        }
    }

    /// Forward-slash rendering of the path.
    pub fn as_str(&self) -> &str {
        &self.rendered
    }

    pub fn as_path(&self) -> &Path {
        &self.native
    }

    pub fn to_native(&self) -> PathBuf {
        self.native.clone()
    }

    /// Append one or more components. An empty base yields `segment` alone.
    pub fn join(&self, segment: impl AsRef<Path>) -> Self {
        Self::new(self.native.join(segment))
    }

    /// Parent directory, `None` for a single relative component such as
    /// `"file.txt"` and for the root.
    pub fn parent(&self) -> Option<Self> {
        self.native
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Self::new)
    }

    /// Last component, `None` for the root or a name that is not UTF-8.
    pub fn file_name(&self) -> Option<&str> {
        self.native.file_name().and_then(|name| name.to_str())
    }

    pub fn extension(&self) -> Option<&str> {
        self.native.extension().and_then(|ext| ext.to_str())
    }

    pub fn is_dir(&self) -> bool {
        self.native.is_dir()
    }

    pub fn is_file(&self) -> bool {
        self.native.is_file()
    }
}

#[cfg(windows)]
fn render(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(not(windows))]
fn render(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        &self.native
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(native: PathBuf) -> Self {
        Self {
            rendered: render(&native),
            native,
        }
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
