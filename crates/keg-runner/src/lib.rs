//! Shell step execution for the keg package builder.
//!
//! Formula `install` and `test` entries are shell command lines. This crate
//! is the one place that touches `std::process::Command` for them.

pub mod step;

// Re-exports for convenience.
pub use step::{StepError, StepOutput, run_step};
