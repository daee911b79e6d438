//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds all the state a command handler needs:
//! the resolved keg home, the effective directory layout, and the
//! global output flags.

use std::env;

use anyhow::{Context, Result};
use tracing::debug;

use keg_config::{KegHome, KegPaths, load_config};
use keg_core::Formula;
use keg_core::parser::{find_formula, load_formula};
use keg_install::Installer;

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// The resolved keg home.
    pub home: KegHome,

    /// Effective directory layout after config overrides.
    pub paths: KegPaths,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Verbose output.
    pub verbose: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    ///
    /// Resolves the home directory using the priority chain
    /// `--home` flag > `KEG_HOME` env > `~/.keg`, then loads `config.yaml`
    /// from it. Nothing is created on disk here.
    pub fn from_global_args(global: &GlobalArgs) -> Result<Self> {
        let home =
            KegHome::resolve(global.home.as_deref()).context("failed to resolve keg home")?;
        let config = load_config(home.root())
            .with_context(|| format!("failed to load config from {}", home.root().display()))?;
        let paths = home.paths(&config);
        debug!(home = %home.root().display(), "resolved keg home");

        Ok(Self {
            home,
            paths,
            json: global.json,
            verbose: global.verbose,
            quiet: global.quiet,
        })
    }

    /// Build an [`Installer`] over this context's layout.
    ///
    /// Creates the home directory skeleton on first use.
    pub fn installer(&self) -> Result<Installer> {
        self.home.ensure().with_context(|| {
            format!(
                "failed to create keg home at {}",
                self.home.root().display()
            )
        })?;
        Ok(Installer::new(&self.paths))
    }

    /// Resolve a formula spec (a name or a path) and parse it.
    ///
    /// Names are searched in the current directory first, then in each
    /// tap directory in order.
    pub fn resolve_formula(&self, spec: &str) -> Result<Formula> {
        let cwd = env::current_dir().context("failed to get current directory")?;
        let path = find_formula(spec, &cwd, &self.paths.taps)?;
        let formula = load_formula(&path)?;
        Ok(formula)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::GlobalArgs;
    use std::path::PathBuf;

    fn global_with_home(home: &std::path::Path) -> GlobalArgs {
        GlobalArgs {
            home: Some(home.to_path_buf()),
            json: false,
            verbose: false,
            quiet: false,
        }
    }

    #[test]
    fn context_resolves_explicit_home() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = RuntimeContext::from_global_args(&global_with_home(tmp.path())).unwrap();
        assert_eq!(ctx.home.root(), tmp.path());
        assert_eq!(ctx.paths.cellar, tmp.path().join("cellar"));
    }

    #[test]
    fn context_does_not_create_the_home() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("never-created");
        let ctx = RuntimeContext::from_global_args(&global_with_home(&missing)).unwrap();
        assert!(!missing.exists());
        assert_eq!(ctx.paths.taps.last(), Some(&missing.join("taps")));
    }

    #[test]
    fn installer_creates_the_layout() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("keg-home");
        let ctx = RuntimeContext::from_global_args(&global_with_home(&root)).unwrap();
        ctx.installer().unwrap();
        for sub in ["cellar", "cache", "taps", "locks", "build"] {
            assert!(root.join(sub).is_dir(), "missing {}", sub);
        }
    }

    #[test]
    fn resolve_formula_by_absolute_path() {
        let tmp = tempfile::tempdir().unwrap();
        let path: PathBuf = tmp.path().join("tool.toml");
        std::fs::write(
            &path,
            "name = \"tool\"\nurl = \"https://example.com/tool-1.0.tar.gz\"\ninstall = [\"true\"]\n",
        )
        .unwrap();
        let ctx = RuntimeContext::from_global_args(&global_with_home(tmp.path())).unwrap();
        let formula = ctx.resolve_formula(path.to_str().unwrap()).unwrap();
        assert_eq!(formula.name, "tool");
    }
}
