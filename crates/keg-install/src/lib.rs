//! Install pipeline and cellar for the keg package builder.
//!
//! Ties the lower crates together into the linear install contract:
//! fetch and verify the archive, unpack it into staging, run the install
//! steps into a versioned cellar prefix, write a receipt, run the tests.
//! The pipeline is synchronous and aborts on the first error.

pub mod cellar;
pub mod error;
pub mod installer;
pub mod receipt;

// Re-exports for convenience.
pub use cellar::{Cellar, InstalledKeg};
pub use error::{InstallError, Result};
pub use installer::{FetchOutcome, InstallOptions, InstallOutcome, Installer};
pub use receipt::{RECEIPT_FILE, Receipt};
