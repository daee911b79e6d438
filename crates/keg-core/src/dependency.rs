//! Dependency declarations and requirement levels.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How strongly a formula needs a dependency.
///
/// Levels are advisory metadata: keg records them and warns when a required
/// dependency is missing, but never resolves or installs dependencies itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementLevel {
    /// The package will not build or run without it.
    #[default]
    Required,
    /// The package works without it but loses functionality.
    Recommended,
    /// Purely additive.
    Optional,
}

impl RequirementLevel {
    /// Returns the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Recommended => "recommended",
            Self::Optional => "optional",
        }
    }
}

impl fmt::Display for RequirementLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single `depends_on` entry.
///
/// Formula files may use the bare-name shorthand (implicitly required) or the
/// detailed table form with an explicit level:
///
/// ```toml
/// depends_on = [
///     "make",
///     { name = "readline", level = "recommended" },
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dependency {
    /// Bare package name, requirement level defaults to required.
    Name(String),
    /// Package name with an explicit requirement level.
    Detailed {
        /// The dependency's package name.
        name: String,
        /// How strongly it is needed.
        #[serde(default)]
        level: RequirementLevel,
    },
}

impl Dependency {
    /// The dependency's package name.
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Detailed { name, .. } => name,
        }
    }

    /// The requirement level (required for the shorthand form).
    pub fn level(&self) -> RequirementLevel {
        match self {
            Self::Name(_) => RequirementLevel::Required,
            Self::Detailed { level, .. } => *level,
        }
    }

    /// Returns `true` if this dependency is hard-required.
    pub fn is_required(&self) -> bool {
        self.level() == RequirementLevel::Required
    }

    /// Flattens either form into an explicit (name, level) record.
    pub fn normalized(&self) -> DependencyRecord {
        DependencyRecord {
            name: self.name().to_string(),
            level: self.level(),
        }
    }
}

/// Normalized (name, level) pair, used in receipts and JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyRecord {
    /// The dependency's package name.
    pub name: String,
    /// How strongly it is needed.
    pub level: RequirementLevel,
}

impl fmt::Display for DependencyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            RequirementLevel::Required => write!(f, "{}", self.name),
            level => write!(f, "{} ({})", self.name, level),
        }
    }
}
