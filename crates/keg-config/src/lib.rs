//! Configuration and home directory layout for the keg package builder.
//!
//! This crate handles loading and saving `config.yaml` under the keg home,
//! resolving the home directory itself from flags and the environment, and
//! exposing the standard directory layout to the rest of the system.

pub mod config;
pub mod home;

// Re-exports for convenience.
pub use config::{ConfigError, KegConfig, load_config, save_config};
pub use home::{KegHome, KegPaths};
