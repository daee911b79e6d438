//! Formula data model -- the declarative record behind `keg install`.

use serde::{Deserialize, Serialize};

use crate::dependency::Dependency;
use crate::version;

/// Root structure for `.toml` / `.json` formula files.
///
/// A formula describes one installable package: the source archive to fetch,
/// the digest it must match, its dependencies, and the shell steps that build
/// and verify it. Parsing is lenient (most fields default); hard requirements
/// are enforced by [`crate::audit::validate`] before any step runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formula {
    /// Package name, e.g. `acltool`. Also the cellar directory name.
    pub name: String,

    /// One-line human-readable description.
    #[serde(default)]
    pub desc: String,

    /// Upstream project page.
    #[serde(default)]
    pub homepage: String,

    /// Source archive URL.
    pub url: String,

    /// Hex-encoded SHA-256 digest of the archive. `None` means the archive
    /// is installed unverified (a warned no-op, never silent).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,

    /// Explicit version override. When absent the version is inferred from
    /// the final path segment of `url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Declared dependencies in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<Dependency>,

    /// Shell steps run inside the unpacked source tree to build and install
    /// into `{{prefix}}`.
    #[serde(default)]
    pub install: Vec<String>,

    /// Shell steps run after install to smoke-test the result.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub test: Vec<String>,

    /// Where this formula was loaded from (set by the parser).
    #[serde(skip)]
    pub source: String,
}

impl Formula {
    /// Creates a minimal formula with the given name and url.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            desc: String::new(),
            homepage: String::new(),
            url: url.into(),
            sha256: None,
            version: None,
            depends_on: Vec::new(),
            install: Vec::new(),
            test: Vec::new(),
            source: String::new(),
        }
    }

    /// The effective version: the explicit `version` field if set, otherwise
    /// inferred from the archive URL. `None` when neither yields a version.
    pub fn resolved_version(&self) -> Option<String> {
        if let Some(ref v) = self.version {
            return Some(v.clone());
        }
        version::infer_from_url(&self.url)
    }

    /// Returns `true` if the formula carries a digest to verify against.
    pub fn has_checksum(&self) -> bool {
        self.sha256.is_some()
    }

    /// Returns `true` if the formula declares a smoke test.
    pub fn has_test(&self) -> bool {
        !self.test.is_empty()
    }
}

/// Errors that can occur while locating and parsing formula files.
#[derive(Debug, thiserror::Error)]
pub enum FormulaError {
    /// The file exists but is not a valid formula.
    #[error("parse error in {path}: {message}")]
    Parse {
        /// Path (or description) of the offending input.
        path: String,
        /// Underlying parser diagnostic.
        message: String,
    },

    /// No formula file matched the given name.
    #[error("formula '{name}' not found (searched {})", .searched.join(", "))]
    NotFound {
        /// The name that was looked up.
        name: String,
        /// Directories that were searched, in order.
        searched: Vec<String>,
    },

    /// Reading the formula file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the core crate.
pub type Result<T> = std::result::Result<T, FormulaError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn resolved_version_prefers_explicit_field() {
        let mut f = Formula::new("tool", "https://example.com/tool-9.9.tar.gz");
        f.version = Some("1.2.3".to_string());
        assert_eq!(f.resolved_version().as_deref(), Some("1.2.3"));
    }

    #[test]
    fn resolved_version_falls_back_to_url() {
        let f = Formula::new(
            "acltool",
            "https://github.com/ptrrkssn/acltool/archive/v1.16.3.tar.gz",
        );
        assert_eq!(f.resolved_version().as_deref(), Some("1.16.3"));
    }

    #[test]
    fn resolved_version_none_when_unversioned() {
        let f = Formula::new("tool", "https://example.com/latest.tar.gz");
        assert_eq!(f.resolved_version(), None);
    }
}
