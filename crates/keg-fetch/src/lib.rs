//! Archive download and digest verification.
//!
//! Fetching and verifying are separate steps with separate error types:
//! a download failure is a [`FetchError`], a digest failure after a
//! successful download is an [`IntegrityError`]. Callers decide what a
//! missing digest means; this crate never skips verification silently.

pub mod checksum;
pub mod download;

// Re-exports for convenience.
pub use checksum::{IntegrityError, Verification, file_sha256, verify};
pub use download::{Download, FetchError, fetch_archive};
