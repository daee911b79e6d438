//! Clap CLI definitions for the `keg` command.
//!
//! This module defines the complete CLI structure using clap 4 derive macros.
//! One arg struct per subcommand, grouped in the order they appear in help.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// keg -- minimal formula-driven package installer.
///
/// Installs software described by small declarative formula files:
/// fetch an archive, verify its digest, unpack it, and run the
/// formula's install and test steps.
#[derive(Parser, Debug)]
#[command(
    name = "keg",
    about = "Minimal formula-driven package installer",
    long_about = "Installs software described by small declarative formula files: fetch an archive, verify its digest, unpack it, and run the formula's install and test steps.",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Keg home directory (default: $KEG_HOME, then ~/.keg).
    #[arg(long, global = true, env = "KEG_HOME")]
    pub home: Option<PathBuf>,

    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (errors only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    // ===== Working With Formulas =====
    /// Install a formula: fetch, verify, unpack, run install steps.
    Install(InstallArgs),

    /// Remove an installed keg from the cellar.
    #[command(alias = "remove", alias = "rm", disable_version_flag = true)]
    Uninstall(UninstallArgs),

    /// Install a formula's current version next to older ones.
    Upgrade(UpgradeArgs),

    /// Download and verify a formula's archive without installing.
    Fetch(FetchArgs),

    /// Run a formula's test block against its installed keg.
    Test(TestArgs),

    // ===== Inspection =====
    /// Show formula details and install status.
    #[command(alias = "show")]
    Info(InfoArgs),

    /// Check formulas for problems without installing them.
    Audit(AuditArgs),

    /// List installed kegs.
    #[command(alias = "ls")]
    List(ListArgs),

    // ===== Utilities =====
    /// Generate shell completions.
    Completion(CompletionArgs),

    /// Print version, build info, and platform.
    Version,
}

// ---------------------------------------------------------------------------
// Install
// ---------------------------------------------------------------------------

/// Arguments for `keg install`.
#[derive(Args, Debug)]
pub struct InstallArgs {
    /// Formula names or paths to formula files.
    #[arg(required = true)]
    pub formulas: Vec<String>,

    /// Reinstall even if this version is already installed.
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Skip the formula's test block after install.
    #[arg(long)]
    pub no_test: bool,
}

// ---------------------------------------------------------------------------
// Uninstall
// ---------------------------------------------------------------------------

/// Arguments for `keg uninstall`.
#[derive(Args, Debug)]
pub struct UninstallArgs {
    /// Installed formula name.
    pub name: String,

    /// Version to remove (defaults to the only installed version).
    #[arg(long)]
    pub version: Option<String>,

    /// Remove every installed version.
    #[arg(long)]
    pub all: bool,
}

// ---------------------------------------------------------------------------
// Upgrade
// ---------------------------------------------------------------------------

/// Arguments for `keg upgrade`.
#[derive(Args, Debug)]
pub struct UpgradeArgs {
    /// Formula name or path to a formula file.
    pub formula: String,

    /// Skip the formula's test block after install.
    #[arg(long)]
    pub no_test: bool,
}

// ---------------------------------------------------------------------------
// Fetch
// ---------------------------------------------------------------------------

/// Arguments for `keg fetch`.
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Formula name or path to a formula file.
    pub formula: String,
}

// ---------------------------------------------------------------------------
// Test
// ---------------------------------------------------------------------------

/// Arguments for `keg test`.
#[derive(Args, Debug)]
pub struct TestArgs {
    /// Formula name or path to a formula file.
    pub formula: String,
}

// ---------------------------------------------------------------------------
// Info
// ---------------------------------------------------------------------------

/// Arguments for `keg info`.
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Formula name or path to a formula file.
    pub formula: String,
}

// ---------------------------------------------------------------------------
// Audit
// ---------------------------------------------------------------------------

/// Arguments for `keg audit`.
#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Formula names or paths to formula files.
    #[arg(required = true)]
    pub formulas: Vec<String>,

    /// Treat warnings as failures.
    #[arg(long)]
    pub strict: bool,
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// Arguments for `keg list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only list installed versions of this formula.
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

/// Arguments for `keg completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    #[command(subcommand)]
    pub command: CompletionCommands,
}

/// Completion subcommands.
#[derive(Subcommand, Debug)]
pub enum CompletionCommands {
    /// Generate Bash completions.
    Bash,
    /// Generate Zsh completions.
    Zsh,
    /// Generate Fish completions.
    Fish,
    /// Generate PowerShell completions.
    Powershell,
}
