//! Advisory per-formula file locking.
//!
//! Two keg processes must never install the same formula concurrently; the
//! cellar prefix and download cache are shared state. Each install takes an
//! exclusive advisory lock on `<locks>/<name>.lock` for the duration of the
//! operation. The lock is released on drop (or process exit).

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur while acquiring a formula lock.
#[derive(Debug, thiserror::Error)]
pub enum LockError {
    /// The lock file could not be created or opened.
    #[error("failed to open lock file {}: {source}", .path.display())]
    Io {
        /// Path of the lock file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Another process already holds the lock.
    #[error("another keg process is already working on '{name}'")]
    Held {
        /// The formula name the lock protects.
        name: String,
    },
}

/// A specialized `Result` type for lock operations.
pub type Result<T> = std::result::Result<T, LockError>;

/// An exclusive advisory lock on one formula name.
///
/// Held for the lifetime of the value; released on drop.
#[derive(Debug)]
pub struct FormulaLock {
    file: File,
    path: PathBuf,
}

impl FormulaLock {
    /// Acquire the lock for `name`, failing immediately if it is held.
    ///
    /// The lock directory is created if missing. Lock files are left in
    /// place after release; only the flock state matters.
    pub fn acquire(locks_dir: &Path, name: &str) -> Result<Self> {
        std::fs::create_dir_all(locks_dir).map_err(|e| LockError::Io {
            path: locks_dir.to_path_buf(),
            source: e,
        })?;

        let path = locks_dir.join(format!("{name}.lock"));
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| LockError::Io {
                path: path.clone(),
                source: e,
            })?;

        // Fully qualified: newer std has an inherent File::try_lock_exclusive.
        match fs2::FileExt::try_lock_exclusive(&file) {
            Ok(()) => Ok(Self { file, path }),
            Err(e) if e.raw_os_error() == fs2::lock_contended_error().raw_os_error() => {
                Err(LockError::Held {
                    name: name.to_string(),
                })
            }
            Err(e) => Err(LockError::Io { path, source: e }),
        }
    }

    /// Path of the underlying lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for FormulaLock {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(&self.file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_creates_lock_file() {
        let dir = tempfile::tempdir().unwrap();
        let locks = dir.path().join("locks");
        let lock = FormulaLock::acquire(&locks, "acltool").unwrap();
        assert!(lock.path().is_file());
        assert_eq!(lock.path(), locks.join("acltool.lock"));
    }

    #[test]
    fn second_acquire_fails_while_held() {
        let dir = tempfile::tempdir().unwrap();
        let locks = dir.path().to_path_buf();

        let first = FormulaLock::acquire(&locks, "acltool").unwrap();
        match FormulaLock::acquire(&locks, "acltool") {
            Err(LockError::Held { name }) => assert_eq!(name, "acltool"),
            other => panic!("expected Held, got {other:?}"),
        }

        // Released on drop; a fresh acquire succeeds.
        drop(first);
        FormulaLock::acquire(&locks, "acltool").unwrap();
    }

    #[test]
    fn different_names_do_not_conflict() {
        let dir = tempfile::tempdir().unwrap();
        let locks = dir.path().to_path_buf();

        let _a = FormulaLock::acquire(&locks, "acltool").unwrap();
        let _b = FormulaLock::acquire(&locks, "readline").unwrap();
    }
}
