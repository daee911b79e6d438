//! Streaming SHA-256 digests and archive verification.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Errors raised by digest verification.
///
/// Kept separate from [`crate::FetchError`]: a mismatch means the bytes
/// arrived fine but are not the bytes the formula promised.
#[derive(Debug, thiserror::Error)]
pub enum IntegrityError {
    /// The archive's digest does not match the formula's `sha256`.
    #[error(
        "sha256 mismatch for {}: expected {expected}, found {actual}",
        .path.display()
    )]
    Mismatch {
        /// Path of the archive that failed verification.
        path: PathBuf,
        /// The digest the formula declares.
        expected: String,
        /// The digest the archive actually hashes to.
        actual: String,
    },

    /// The archive could not be read for hashing.
    #[error("failed to read {} for verification: {source}", .path.display())]
    Unreadable {
        /// Path of the unreadable archive.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Whether an archive's integrity was checked before install.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verification {
    /// The digest matched the formula's `sha256`.
    Verified,
    /// The formula declares no digest; nothing was checked.
    Skipped,
}

impl Verification {
    /// Returns the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::Skipped => "skipped",
        }
    }

    /// Returns `true` if the digest was checked and matched.
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified)
    }
}

impl std::fmt::Display for Verification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Computes the hex SHA-256 digest of a file, streaming.
pub fn file_sha256(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher)?;
    Ok(format!("{:x}", hasher.finalize()))
}

/// Verifies a file against an expected hex digest (case-insensitive).
pub fn verify(path: &Path, expected: &str) -> Result<(), IntegrityError> {
    let actual = file_sha256(path).map_err(|e| IntegrityError::Unreadable {
        path: path.to_path_buf(),
        source: e,
    })?;
    if actual.eq_ignore_ascii_case(expected) {
        Ok(())
    } else {
        Err(IntegrityError::Mismatch {
            path: path.to_path_buf(),
            expected: expected.to_ascii_lowercase(),
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // NIST vector: sha256("abc")
    const ABC_SHA256: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

    fn write_file(dir: &tempfile::TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn hashes_known_vector() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "abc.txt", b"abc");
        assert_eq!(file_sha256(&path).unwrap(), ABC_SHA256);
    }

    #[test]
    fn hashes_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "empty", b"");
        assert_eq!(
            file_sha256(&path).unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn verify_accepts_matching_digest() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "abc.txt", b"abc");
        verify(&path, ABC_SHA256).unwrap();
        // Case-insensitive.
        verify(&path, &ABC_SHA256.to_ascii_uppercase()).unwrap();
    }

    #[test]
    fn verify_rejects_altered_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "abc.txt", b"abd");
        match verify(&path, ABC_SHA256) {
            Err(IntegrityError::Mismatch {
                expected, actual, ..
            }) => {
                assert_eq!(expected, ABC_SHA256);
                assert_ne!(actual, ABC_SHA256);
            }
            other => panic!("expected Mismatch, got {other:?}"),
        }
    }

    #[test]
    fn verify_missing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.tar.gz");
        assert!(matches!(
            verify(&path, ABC_SHA256),
            Err(IntegrityError::Unreadable { .. })
        ));
    }
}
