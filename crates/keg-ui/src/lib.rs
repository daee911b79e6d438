//! Terminal UI components for the keg package builder.
//!
//! Provides Ayu-themed color styling and terminal detection for CLI output.

pub mod styles;
pub mod terminal;
