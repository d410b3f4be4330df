//! Glob-driven batch file operations
//!
//! A [`FileSet`] resolves a glob pattern into an ordered list of paths and
//! exposes uniform operations over it: delete, move, copy, text and JSON
//! content access, stat inspection and a change-detection hash.
//!
//! ```no_run
//! use fileset::FileSet;
//!
//! let mut tmp = FileSet::resolve_files("build/*.tmp")?;
//! println!("removed {} files", tmp.delete());
//!
//! let mut report = FileSet::create_new("out/report.json");
//! report.write_json(&serde_json::json!({ "n": 1 }), Some(2))?;
//! # Ok::<(), fileset::Error>(())
//! ```

pub mod batch;
pub mod checksum;
pub mod config;
pub mod content;
pub mod context;
pub mod error;
pub mod io;
pub mod path;
pub mod resolver;
pub mod set;
pub mod stats;

pub use config::{ConfigStore, LineEnding, Settings, VerboseSetting};
pub use context::{Context, LogLevel, Verbosity, set_verbose, verbose};
pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use resolver::TargetKind;
pub use set::FileSet;
pub use stats::{EntryKind, FileStats};
