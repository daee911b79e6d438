//! Formula validation and audit rules.
//!
//! `validate` is the hard gate run before any install; `audit` runs the same
//! rules plus advisory checks and reports everything it finds.

use std::fmt;

use serde::Serialize;

use crate::formula::Formula;
use crate::interpolate;

/// Error type for hard validation failures.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("name is required")]
    NameRequired,

    #[error("invalid name: {0} (use lowercase letters, digits, and @._+-)")]
    InvalidName(String),

    #[error("url is required")]
    UrlRequired,

    #[error("invalid url: {0} (must start with http:// or https://)")]
    InvalidUrl(String),

    #[error("invalid sha256: {0} (expected 64 hex characters)")]
    InvalidSha256(String),

    #[error("no version: set `version` or use a versioned url")]
    MissingVersion,

    #[error("install block is required")]
    InstallRequired,

    #[error("{list} step {index} is empty")]
    EmptyStep { list: &'static str, index: usize },

    #[error("unknown placeholder {{{{{name}}}}} in {list} step {index}")]
    UnknownPlaceholder {
        list: &'static str,
        index: usize,
        name: String,
    },

    #[error("dependency {index} has an empty name")]
    DependencyNameRequired { index: usize },
}

/// Finding severity. Errors block install; warnings do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    /// Returns the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One audit finding: a severity and a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    /// Returns `true` if this finding blocks install.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Returns `true` if any finding in the slice is an error.
pub fn has_errors(findings: &[Finding]) -> bool {
    findings.iter().any(Finding::is_error)
}

/// Validates a formula using the hard rules only. Returns the first failure.
pub fn validate(formula: &Formula) -> Result<(), ValidationError> {
    match hard_errors(formula).into_iter().next() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Runs every hard rule plus the advisory checks, reporting all findings.
/// Errors come first, in rule order, followed by warnings.
pub fn audit(formula: &Formula) -> Vec<Finding> {
    let mut findings: Vec<Finding> = hard_errors(formula)
        .into_iter()
        .map(|e| Finding::error(e.to_string()))
        .collect();

    if formula.sha256.is_none() {
        findings.push(Finding::warning(
            "no sha256 digest; archive will install unverified",
        ));
    }
    if formula.desc.is_empty() {
        findings.push(Finding::warning("desc is empty"));
    }
    if formula.homepage.is_empty() {
        findings.push(Finding::warning("homepage is empty"));
    }
    if formula.test.is_empty() {
        findings.push(Finding::warning("no test block"));
    }

    findings
}

/// Collects every hard rule violation, in rule order.
fn hard_errors(formula: &Formula) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // Name required, lowercase package-name shape.
    if formula.name.is_empty() {
        errors.push(ValidationError::NameRequired);
    } else if !is_valid_name(&formula.name) {
        errors.push(ValidationError::InvalidName(formula.name.clone()));
    }

    // Url required, http(s) only.
    if formula.url.is_empty() {
        errors.push(ValidationError::UrlRequired);
    } else if !formula.url.starts_with("http://") && !formula.url.starts_with("https://") {
        errors.push(ValidationError::InvalidUrl(formula.url.clone()));
    }

    // Sha256, when present, must be a hex digest.
    if let Some(ref digest) = formula.sha256 {
        if !is_valid_sha256(digest) {
            errors.push(ValidationError::InvalidSha256(digest.clone()));
        }
    }

    // A version must be derivable; the cellar path needs one.
    if !formula.url.is_empty() && formula.resolved_version().is_none() {
        errors.push(ValidationError::MissingVersion);
    }

    // At least one install step.
    if formula.install.is_empty() {
        errors.push(ValidationError::InstallRequired);
    }

    // Steps must be non-empty and reference only known placeholders.
    check_steps("install", &formula.install, &mut errors);
    check_steps("test", &formula.test, &mut errors);

    // Dependency names must be non-empty.
    for (i, dep) in formula.depends_on.iter().enumerate() {
        if dep.name().is_empty() {
            errors.push(ValidationError::DependencyNameRequired { index: i + 1 });
        }
    }

    errors
}

fn check_steps(list: &'static str, steps: &[String], errors: &mut Vec<ValidationError>) {
    for (i, step) in steps.iter().enumerate() {
        let index = i + 1;
        if step.trim().is_empty() {
            errors.push(ValidationError::EmptyStep { list, index });
            continue;
        }
        for name in interpolate::placeholders(step) {
            if !interpolate::STEP_VARS.contains(&name.as_str()) {
                errors.push(ValidationError::UnknownPlaceholder { list, index, name });
            }
        }
    }
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() || c.is_ascii_digit() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "@._+-".contains(c))
}

fn is_valid_sha256(digest: &str) -> bool {
    digest.len() == 64 && digest.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency::Dependency;
    use pretty_assertions::assert_eq;

    fn sample() -> Formula {
        let mut f = Formula::new(
            "acltool",
            "https://github.com/ptrrkssn/acltool/archive/v1.16.3.tar.gz",
        );
        f.desc = "ACL manipulation tool".to_string();
        f.homepage = "https://github.com/ptrrkssn/acltool".to_string();
        f.sha256 =
            Some("15430b64cb493571f6e46a38482402746bee7ed134c0e99d7976d231cab1c7d5".to_string());
        f.install = vec![
            "./configure --prefix={{prefix}}".to_string(),
            "make install".to_string(),
        ];
        f.test = vec!["{{bin}}/acltool lac .".to_string()];
        f
    }

    #[test]
    fn clean_formula_validates() {
        assert!(validate(&sample()).is_ok());
        assert!(audit(&sample()).is_empty());
    }

    #[test]
    fn empty_name_is_an_error() {
        let mut f = sample();
        f.name = String::new();
        assert!(matches!(validate(&f), Err(ValidationError::NameRequired)));
    }

    #[test]
    fn uppercase_name_is_rejected() {
        let mut f = sample();
        f.name = "AclTool".to_string();
        assert!(matches!(validate(&f), Err(ValidationError::InvalidName(_))));
    }

    #[test]
    fn non_http_url_is_rejected() {
        let mut f = sample();
        f.url = "ftp://example.com/a-1.0.tar.gz".to_string();
        assert!(matches!(validate(&f), Err(ValidationError::InvalidUrl(_))));
    }

    #[test]
    fn short_sha256_is_rejected() {
        let mut f = sample();
        f.sha256 = Some("abc123".to_string());
        assert!(matches!(
            validate(&f),
            Err(ValidationError::InvalidSha256(_))
        ));
    }

    #[test]
    fn missing_install_is_an_error() {
        let mut f = sample();
        f.install.clear();
        assert!(matches!(validate(&f), Err(ValidationError::InstallRequired)));
    }

    #[test]
    fn unversioned_url_is_an_error() {
        let mut f = sample();
        f.url = "https://example.com/latest.tar.gz".to_string();
        assert!(matches!(validate(&f), Err(ValidationError::MissingVersion)));

        // An explicit version field repairs it.
        f.version = Some("1.0".to_string());
        assert!(validate(&f).is_ok());
    }

    #[test]
    fn unknown_placeholder_is_an_error() {
        let mut f = sample();
        f.install.push("cp tool {{destdir}}/tool".to_string());
        match validate(&f) {
            Err(ValidationError::UnknownPlaceholder { list, index, name }) => {
                assert_eq!(list, "install");
                assert_eq!(index, 3);
                assert_eq!(name, "destdir");
            }
            other => panic!("expected UnknownPlaceholder, got {other:?}"),
        }
    }

    #[test]
    fn empty_dependency_name_is_an_error() {
        let mut f = sample();
        f.depends_on.push(Dependency::Name(String::new()));
        assert!(matches!(
            validate(&f),
            Err(ValidationError::DependencyNameRequired { index: 1 })
        ));
    }

    #[test]
    fn missing_checksum_is_a_warning_not_an_error() {
        let mut f = sample();
        f.sha256 = None;
        assert!(validate(&f).is_ok());

        let findings = audit(&f);
        assert!(!has_errors(&findings));
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert!(findings[0].message.contains("unverified"));
    }

    #[test]
    fn audit_collects_all_findings() {
        let mut f = sample();
        f.name = String::new();
        f.sha256 = None;
        f.test.clear();
        let findings = audit(&f);
        assert!(has_errors(&findings));
        // One error (name) plus two warnings (no sha256, no test).
        assert_eq!(findings.len(), 3);
        assert!(findings[0].is_error());
    }
}
