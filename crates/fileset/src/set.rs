//! The resolved target set

use std::sync::Arc;
use std::time::SystemTime;

use crate::resolver::{self, TargetKind};
use crate::stats::{FileStats, StatsCache};
use crate::{Context, NormalizedPath, Result};

/// Files and folders resolved from a glob pattern.
///
/// The pattern is fixed at construction. The resolved paths keep the order
/// in which the glob walker produced them; operations that relocate entries
/// ([`move_to`](FileSet::move_to)) rewrite them in place so index `i` still
/// names the same logical entry.
///
/// A `FileSet` is not `Sync`: its stats cache is unsynchronized state owned
/// by this instance alone.
#[derive(Debug)]
pub struct FileSet {
    pattern: String,
    kind: TargetKind,
    paths: Vec<NormalizedPath>,
    stats: StatsCache,
    context: Arc<Context>,
}

impl FileSet {
    /// Target any existing file or folder matching `pattern`.
    pub fn resolve(pattern: impl Into<String>) -> Result<Self> {
        Context::global().resolve(pattern)
    }

    /// Alias of [`FileSet::resolve`].
    pub fn any(pattern: impl Into<String>) -> Result<Self> {
        Self::resolve(pattern)
    }

    /// Target existing files matching `pattern`.
    pub fn resolve_files(pattern: impl Into<String>) -> Result<Self> {
        Context::global().resolve_files(pattern)
    }

    /// Target existing folders matching `pattern`.
    pub fn resolve_folders(pattern: impl Into<String>) -> Result<Self> {
        Context::global().resolve_folders(pattern)
    }

    /// Target a path that does not exist yet. Resolves to nothing.
    pub fn create_new(path: impl Into<String>) -> Self {
        Context::global().create_new(path)
    }

    pub(crate) fn build(
        context: Arc<Context>,
        pattern: String,
        kind: TargetKind,
    ) -> Result<Self> {
        let paths = resolver::resolve(&pattern, kind, &context)?;
        Ok(Self {
            pattern,
            kind,
            paths,
            stats: StatsCache::default(),
            context,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    pub fn paths(&self) -> &[NormalizedPath] {
        &self.paths
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NormalizedPath> {
        self.paths.iter()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn context(&self) -> &Arc<Context> {
        &self.context
    }

    /// Whether the pattern currently resolves to at least one entry.
    pub fn exists(&self) -> bool {
        !self.paths.is_empty()
    }

    /// Visit every resolved path with its index and return the list.
    pub fn all<F>(&self, mut handler: F) -> &[NormalizedPath]
    where
        F: FnMut(&NormalizedPath, usize),
    {
        for (index, path) in self.paths.iter().enumerate() {
            handler(path, index);
        }
        &self.paths
    }

    /// Re-resolve the original pattern keeping only existing files.
    pub fn only_existing_files(&mut self) -> Result<&mut Self> {
        self.reresolve(TargetKind::Files)
    }

    /// Re-resolve the original pattern keeping only existing folders.
    pub fn only_existing_folders(&mut self) -> Result<&mut Self> {
        self.reresolve(TargetKind::Folders)
    }

    fn reresolve(&mut self, kind: TargetKind) -> Result<&mut Self> {
        let paths = resolver::resolve(&self.pattern, kind, &self.context)?;
        self.kind = kind;
        self.replace_paths(paths);
        Ok(self)
    }

    /// Stats of the single resolved path, `None` for zero or several paths.
    ///
    /// Cached until the resolved paths change.
    pub fn stats(&self) -> Option<&FileStats> {
        self.single().and_then(|path| self.stats.get_or_fetch(path))
    }

    /// Last modification time of the single resolved path.
    pub fn last_modified(&self) -> Option<SystemTime> {
        self.stats().map(|stats| stats.modified)
    }

    /// Size in bytes of the single resolved path.
    pub fn size(&self) -> Option<u64> {
        self.stats().map(|stats| stats.size)
    }

    pub(crate) fn single(&self) -> Option<&NormalizedPath> {
        match self.paths.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    /// Replace the resolved paths and drop the stats cache.
    pub(crate) fn replace_paths(&mut self, paths: Vec<NormalizedPath>) {
        self.paths = paths;
        self.stats.invalidate();
    }
}

impl<'a> IntoIterator for &'a FileSet {
    type Item = &'a NormalizedPath;
    type IntoIter = std::slice::Iter<'a, NormalizedPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

impl Context {
    /// Like [`FileSet::resolve`], reporting through this context.
    pub fn resolve(self: &Arc<Self>, pattern: impl Into<String>) -> Result<FileSet> {
        FileSet::build(Arc::clone(self), pattern.into(), TargetKind::Any)
    }

    /// Like [`FileSet::resolve_files`], reporting through this context.
    pub fn resolve_files(self: &Arc<Self>, pattern: impl Into<String>) -> Result<FileSet> {
        FileSet::build(Arc::clone(self), pattern.into(), TargetKind::Files)
    }

    /// Like [`FileSet::resolve_folders`], reporting through this context.
    pub fn resolve_folders(self: &Arc<Self>, pattern: impl Into<String>) -> Result<FileSet> {
        FileSet::build(Arc::clone(self), pattern.into(), TargetKind::Folders)
    }

    /// Like [`FileSet::create_new`], reporting through this context.
    pub fn create_new(self: &Arc<Self>, path: impl Into<String>) -> FileSet {
        FileSet {
            pattern: path.into(),
            kind: TargetKind::New,
            paths: Vec::new(),
            stats: StatsCache::default(),
            context: Arc::clone(self),
        }
    }
}
