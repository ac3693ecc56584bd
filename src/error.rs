use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal failures of an import run.
///
/// Returned wrapped in an `eyre::Report`; use `downcast_ref::<SplitError>()`
/// to tell the two kinds apart.
#[derive(Error, Debug)]
pub enum SplitError {
    /// The export file is missing, unreadable, not JSON, or not a JSON array.
    #[error("Invalid export file {path:?}: {reason}")]
    Input { path: PathBuf, reason: String },

    /// Creating the output directory or a conversation file failed.
    #[error("Failed to write {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SplitError {
    pub fn input(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Input {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input { .. })
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}
