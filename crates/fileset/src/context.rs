//! Shared logging context and verbosity control
//!
//! Every [`FileSet`](crate::FileSet) reports what it does through a
//! [`Context`]. Sets built with the plain constructors share the
//! process-wide [`Context::global`]; sets built through
//! [`Context::resolve`] and friends use the injected context instead.
//!
//! The verbosity is meant to be configured once at startup and read
//! thereafter, but it may be changed at any time.

use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use crate::config::{LineEnding, Settings};

/// Severity of a message emitted by a file operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum LogLevel {
    /// Per-entry detail (one line per file touched)
    Detail = 0,
    /// Operation summary
    Action = 1,
    /// Skipped entries and other recoverable problems
    Warning = 2,
}

impl LogLevel {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Detail => "detail",
            Self::Action => "action",
            Self::Warning => "warning",
        };
        f.write_str(name)
    }
}

/// Custom log sink receiving `(message, level)`.
pub type LogSink = Arc<dyn Fn(&str, LogLevel) + Send + Sync>;

/// Which messages are emitted, and where.
#[derive(Clone, Default)]
pub enum Verbosity {
    /// Nothing is emitted
    #[default]
    Off,
    /// Everything is emitted through `tracing`
    On,
    /// Only levels `>=` the threshold are emitted through `tracing`
    Threshold(u8),
    /// Everything is handed to the sink
    Custom(LogSink),
}

impl Verbosity {
    /// Wrap a closure as a custom sink.
    pub fn custom(sink: impl Fn(&str, LogLevel) + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(sink))
    }

    /// Whether a message at `level` passes this verbosity.
    pub fn enables(&self, level: LogLevel) -> bool {
        match self {
            Self::Off => false,
            Self::On | Self::Custom(_) => true,
            Self::Threshold(min) => level.as_u8() >= *min,
        }
    }
}

impl fmt::Debug for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Off => f.write_str("Off"),
            Self::On => f.write_str("On"),
            Self::Threshold(min) => f.debug_tuple("Threshold").field(min).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<bool> for Verbosity {
    fn from(enabled: bool) -> Self {
        if enabled { Self::On } else { Self::Off }
    }
}

impl From<u8> for Verbosity {
    fn from(threshold: u8) -> Self {
        Self::Threshold(threshold)
    }
}

/// Logging and formatting context shared by file sets.
#[derive(Debug, Default)]
pub struct Context {
    verbosity: RwLock<Verbosity>,
    line_ending: LineEnding,
}

impl Context {
    /// Create a context with the given verbosity and the default line ending.
    pub fn new(verbosity: impl Into<Verbosity>) -> Self {
        Self {
            verbosity: RwLock::new(verbosity.into()),
            line_ending: LineEnding::default(),
        }
    }

    /// Create a context from loaded settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            verbosity: RwLock::new(settings.verbose.into()),
            line_ending: settings.line_ending,
        }
    }

    /// Set the line separator used by `append(.., new_line = true)`.
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// The process-wide context used by [`FileSet::resolve`](crate::FileSet::resolve)
    /// and the other plain constructors. Lives for the whole process.
    pub fn global() -> Arc<Context> {
        static GLOBAL: OnceLock<Arc<Context>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Context::default())))
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_verbosity(&self, verbosity: impl Into<Verbosity>) {
        *self
            .verbosity
            .write()
            .unwrap_or_else(PoisonError::into_inner) = verbosity.into();
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Emit a message if the current verbosity lets `level` through.
    ///
    /// The message is only formatted when it is going to be emitted.
    pub fn log(&self, level: LogLevel, message: impl fmt::Display) {
        let verbosity = self.verbosity();
        if !verbosity.enables(level) {
            return;
        }
        match &verbosity {
            Verbosity::Custom(sink) => sink(&message.to_string(), level),
            _ => match level {
                LogLevel::Detail => tracing::debug!(target: "fileset", "{}", message),
                LogLevel::Action => tracing::info!(target: "fileset", "{}", message),
                LogLevel::Warning => tracing::warn!(target: "fileset", "{}", message),
            },
        }
    }
}

/// Set the verbosity of the process-wide context.
///
/// Accepts a [`Verbosity`], a `bool` (on/off) or a `u8` threshold.
pub fn set_verbose(verbosity: impl Into<Verbosity>) {
    Context::global().set_verbosity(verbosity);
}

/// Current verbosity of the process-wide context.
pub fn verbose() -> Verbosity {
    Context::global().verbosity()
}
