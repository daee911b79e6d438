//! Install receipts.
//!
//! Every completed keg carries a `.keg-receipt.json` at its prefix root
//! recording what was installed, from where, and whether the archive's
//! digest was verified. A prefix without a receipt is not a finished
//! install; failed installs are removed rather than left receipt-less.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use keg_core::dependency::DependencyRecord;
use keg_core::formula::Formula;
use keg_fetch::Verification;

use crate::error::Result;

/// File name of the receipt at the keg prefix root.
pub const RECEIPT_FILE: &str = ".keg-receipt.json";

/// Record of one completed install.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    /// The formula name.
    pub name: String,

    /// The installed version.
    pub version: String,

    /// The source archive URL the install used.
    pub url: String,

    /// The digest the formula declared, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,

    /// `false` means the archive was installed without verification.
    pub integrity_verified: bool,

    /// Declared dependencies, normalized.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<DependencyRecord>,

    /// When the install completed.
    pub installed_at: DateTime<Utc>,

    /// Version of keg that performed the install.
    pub keg_version: String,
}

impl Receipt {
    /// Builds a receipt for a formula installed as `version`.
    pub fn new(formula: &Formula, version: &str, verification: Verification) -> Self {
        Self {
            name: formula.name.clone(),
            version: version.to_string(),
            url: formula.url.clone(),
            sha256: formula.sha256.clone(),
            integrity_verified: verification.is_verified(),
            dependencies: formula.depends_on.iter().map(|d| d.normalized()).collect(),
            installed_at: Utc::now(),
            keg_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Writes the receipt into a keg prefix.
    pub fn write(&self, keg: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(keg.join(RECEIPT_FILE), json)?;
        Ok(())
    }

    /// Loads the receipt from a keg prefix.
    pub fn load(keg: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(keg.join(RECEIPT_FILE))?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keg_core::dependency::{Dependency, RequirementLevel};
    use pretty_assertions::assert_eq;

    fn sample_formula() -> Formula {
        let mut f = Formula::new(
            "acltool",
            "https://github.com/ptrrkssn/acltool/archive/v1.16.3.tar.gz",
        );
        f.depends_on = vec![Dependency::Detailed {
            name: "readline".to_string(),
            level: RequirementLevel::Recommended,
        }];
        f
    }

    #[test]
    fn round_trips_through_a_keg_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let receipt = Receipt::new(&sample_formula(), "1.16.3", Verification::Skipped);
        receipt.write(dir.path()).unwrap();

        let loaded = Receipt::load(dir.path()).unwrap();
        assert_eq!(loaded, receipt);
        assert_eq!(loaded.version, "1.16.3");
        assert!(!loaded.integrity_verified);
        assert_eq!(loaded.dependencies.len(), 1);
        assert_eq!(loaded.dependencies[0].level, RequirementLevel::Recommended);
    }

    #[test]
    fn verified_install_is_recorded() {
        let mut f = sample_formula();
        f.sha256 =
            Some("15430b64cb493571f6e46a38482402746bee7ed134c0e99d7976d231cab1c7d5".to_string());
        let receipt = Receipt::new(&f, "1.16.3", Verification::Verified);
        assert!(receipt.integrity_verified);
        assert_eq!(receipt.sha256.as_deref(), f.sha256.as_deref());
    }

    #[test]
    fn load_missing_receipt_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Receipt::load(dir.path()).is_err());
    }
}
