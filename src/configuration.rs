//! Report configuration.
//!
//! [`ReportOptions`] carries the two settings that shape a report: the
//! [`Verbosity`] that unlocks extra codec details, and the separator placed
//! between the major fields of a stream line. Options are immutable for
//! the duration of one report.
//!
//! # Example
//!
//! ```
//! use probe_report::{ReportOptions, Verbosity};
//!
//! let options = ReportOptions::new()
//!     .with_verbosity(Verbosity::Debug)
//!     .with_separator(",\n      ");
//! assert_eq!(options.verbosity(), Verbosity::Debug);
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Separator used when none is configured.
pub const DEFAULT_SEPARATOR: &str = ", ";

/// Report verbosity.
///
/// Levels are ordered from the quietest to the most detailed, so
/// `verbosity >= Verbosity::Verbose` reads as "at verbose level or finer".
///
/// # Ordering (most quiet → most verbose)
///
/// `Quiet` < `Panic` < `Fatal` < `Error` < `Warning` < `Info` < `Verbose` < `Debug` < `Trace`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Verbosity {
    /// Print no output at all.
    Quiet,
    /// Unrecoverable conditions that abort the process.
    Panic,
    /// Unrecoverable errors.
    Fatal,
    /// Recoverable errors.
    Error,
    /// Warnings.
    Warning,
    /// Informational output. This is the default.
    #[default]
    Info,
    /// Adds reference frames, coded size, chroma location and audio padding.
    Verbose,
    /// Adds codec time bases.
    Debug,
    /// Extremely verbose tracing output.
    Trace,
}

impl Verbosity {
    /// Lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Panic => "panic",
            Verbosity::Fatal => "fatal",
            Verbosity::Error => "error",
            Verbosity::Warning => "warning",
            Verbosity::Info => "info",
            Verbosity::Verbose => "verbose",
            Verbosity::Debug => "debug",
            Verbosity::Trace => "trace",
        }
    }
}

impl Display for Verbosity {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

impl FromStr for Verbosity {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "quiet" => Ok(Verbosity::Quiet),
            "panic" => Ok(Verbosity::Panic),
            "fatal" => Ok(Verbosity::Fatal),
            "error" => Ok(Verbosity::Error),
            "warning" | "warn" => Ok(Verbosity::Warning),
            "info" => Ok(Verbosity::Info),
            "verbose" => Ok(Verbosity::Verbose),
            "debug" => Ok(Verbosity::Debug),
            "trace" => Ok(Verbosity::Trace),
            other => Err(format!("unknown verbosity level: {other}")),
        }
    }
}

/// Settings for one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub(crate) verbosity: Verbosity,
    pub(crate) separator: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            verbosity: Verbosity::default(),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl ReportOptions {
    /// Options with [`Verbosity::Info`] and the `", "` separator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the verbosity.
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set the field separator.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Configured verbosity.
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    /// Configured field separator.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub(crate) fn is_verbose(&self) -> bool {
        self.verbosity >= Verbosity::Verbose
    }

    pub(crate) fn is_debug(&self) -> bool {
        self.verbosity >= Verbosity::Debug
    }
}
