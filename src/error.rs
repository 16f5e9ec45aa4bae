//! Error types for the caliper CLI.

use std::path::PathBuf;

/// Errors from loading statistics files and resolving CLI arguments.
/// The analysis itself never fails: partial documents degrade to empty
/// results instead.
#[derive(Debug)]
#[non_exhaustive]
pub enum Error {
    /// Cannot read a statistics file from disk.
    StatsRead(PathBuf, std::io::Error),
    /// Statistics file contains invalid JSON.
    StatsParse(PathBuf, serde_json::Error),
    /// A `--focus` module is not present in the comparison.
    FocusNotFound(String),
}

impl Error {
    /// User-facing hint to accompany the error message.
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::StatsParse(..) => Some(
                "is this a bundler statistics file? webpack emits one with `webpack --profile --json > stats.json`",
            ),
            Self::FocusNotFound(_) => Some(
                "focus targets are normalized module names; list them with `caliper compare --json`",
            ),
            Self::StatsRead(..) => None,
        }
    }
}

// Display: lowercase, no trailing punctuation, so it composes into
// larger error messages.
impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StatsRead(path, source) => {
                write!(f, "cannot read stats file '{}': {source}", path.display())
            }
            Self::StatsParse(path, source) => {
                write!(f, "invalid stats file '{}': {source}", path.display())
            }
            Self::FocusNotFound(name) => {
                write!(f, "module '{name}' not found in the comparison")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::StatsRead(_, e) => Some(e),
            Self::StatsParse(_, e) => Some(e),
            Self::FocusNotFound(_) => None,
        }
    }
}
