//! Install pipeline error types.
//!
//! Each phase keeps its own error class so callers (and users) can tell a
//! download failure from a digest mismatch from a broken build.

use std::io;
use std::path::PathBuf;

use keg_archive::ArchiveError;
use keg_core::audit::ValidationError;
use keg_fetch::{FetchError, IntegrityError};
use keg_lockfile::LockError;
use keg_runner::StepError;

/// Errors that can occur during install operations.
#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    /// The formula failed hard validation before any work started.
    #[error("invalid formula: {0}")]
    Validation(#[from] ValidationError),

    /// Downloading the source archive failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The archive downloaded but its digest does not match the formula.
    #[error(transparent)]
    Integrity(#[from] IntegrityError),

    /// Unpacking the archive failed.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// An install step exited non-zero.
    #[error("install step {index}/{count} failed: {source}")]
    Build {
        /// 1-based index of the failing step.
        index: usize,
        /// Total number of install steps.
        count: usize,
        /// The underlying step failure.
        #[source]
        source: StepError,
    },

    /// A test step exited non-zero.
    #[error("test step {index}/{count} failed: {source}")]
    Test {
        /// 1-based index of the failing step.
        index: usize,
        /// Total number of test steps.
        count: usize,
        /// The underlying step failure.
        #[source]
        source: StepError,
    },

    /// Another process holds the formula lock.
    #[error(transparent)]
    Lock(#[from] LockError),

    /// No version could be determined for the formula.
    #[error("'{name}' has no version (set `version` or use a versioned url)")]
    UnknownVersion {
        /// The formula name.
        name: String,
    },

    /// The target keg already exists.
    #[error(
        "'{name}' {version} is already installed at {} (use --force to reinstall)",
        .keg.display()
    )]
    AlreadyInstalled {
        /// The formula name.
        name: String,
        /// The installed version.
        version: String,
        /// The existing keg prefix.
        keg: PathBuf,
    },

    /// The requested keg does not exist.
    #[error("'{name}' {version} is not installed")]
    NotInstalled {
        /// The formula name.
        name: String,
        /// The missing version.
        version: String,
    },

    /// Serializing or deserializing a receipt failed.
    #[error("receipt error: {0}")]
    Receipt(#[from] serde_json::Error),

    /// A filesystem operation failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Convenience alias used throughout the install crate.
pub type Result<T> = std::result::Result<T, InstallError>;

impl InstallError {
    // -- Predicates ----------------------------------------------------------

    /// Returns `true` if the archive failed digest verification.
    pub fn is_integrity(&self) -> bool {
        matches!(self, Self::Integrity(_))
    }

    /// Returns `true` if the target keg already exists.
    pub fn is_already_installed(&self) -> bool {
        matches!(self, Self::AlreadyInstalled { .. })
    }
}
