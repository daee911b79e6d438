//! Core formula types for the keg package builder.
//!
//! A formula is a declarative recipe for one piece of software: where its
//! source archive lives, the digest it must hash to, what it depends on, and
//! the shell steps that build, install, and smoke-test it. This crate owns the
//! data model, the TOML/JSON parser, and the audit rules; it performs no I/O
//! beyond reading formula files.

pub mod audit;
pub mod dependency;
pub mod formula;
pub mod interpolate;
pub mod parser;
pub mod version;

// Re-exports for convenience.
pub use audit::{Finding, Severity};
pub use dependency::{Dependency, DependencyRecord, RequirementLevel};
pub use formula::{Formula, FormulaError};
