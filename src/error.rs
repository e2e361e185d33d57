//! Errors that abort a scaffold run.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScaffoldError>;

/// Fatal scaffold failures. Anything that is not fatal (history
/// detachment, dependency installation) is reported through
/// [`crate::scaffold::Outcome`] instead.
#[derive(Error, Debug)]
pub enum ScaffoldError {
    /// The target path is already occupied by a file or directory
    #[error("{name} already exists in this directory.")]
    TargetExists { name: String, path: PathBuf },

    /// The template could not be cloned. The cause (network, auth, bad URL,
    /// missing program) is not distinguishable from the exit status.
    #[error("Failed to clone the template. Check your internet connection.")]
    Clone { url: String, stderr: String },

    /// The target directory could not be reserved
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScaffoldError {
    pub fn target_exists(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::TargetExists {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn clone_failed(url: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::Clone {
            url: url.into(),
            stderr: stderr.into(),
        }
    }

    /// Process exit code for this failure
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        1
    }
}
