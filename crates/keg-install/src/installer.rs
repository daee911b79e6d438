//! The install pipeline.
//!
//! One formula at a time, strictly in order: validate, lock, fetch, verify,
//! unpack, build, receipt, test. The first error aborts the run; a partially
//! built prefix is removed so the cellar never contains half a keg.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use keg_config::KegPaths;
use keg_core::formula::Formula;
use keg_core::{audit, interpolate, version};
use keg_fetch::{Verification, checksum, download};
use keg_lockfile::FormulaLock;
use keg_runner::run_step;

use crate::cellar::Cellar;
use crate::error::{InstallError, Result};
use crate::receipt::Receipt;

/// Options controlling one install run.
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Replace an existing keg of the same version.
    pub force: bool,
    /// Run the formula's test block after a successful install.
    pub run_tests: bool,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            force: false,
            run_tests: true,
        }
    }
}

/// Result of a completed install.
#[derive(Debug, Clone)]
pub struct InstallOutcome {
    /// The formula name.
    pub name: String,
    /// The installed version.
    pub version: String,
    /// The keg prefix everything was installed into.
    pub keg: PathBuf,
    /// Whether the archive digest was checked.
    pub verification: Verification,
    /// `true` if the archive came from the download cache.
    pub from_cache: bool,
    /// Number of test steps that ran (0 when tests were skipped or absent).
    pub tests_run: usize,
}

/// Result of a fetch-and-verify without install.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// Where the archive lives in the cache.
    pub path: PathBuf,
    /// Whether the archive digest was checked.
    pub verification: Verification,
    /// `true` if no network request was made.
    pub from_cache: bool,
}

/// Executes formulas against one keg home layout.
#[derive(Debug, Clone)]
pub struct Installer {
    cellar: Cellar,
    cache: PathBuf,
    build: PathBuf,
    locks: PathBuf,
}

impl Installer {
    /// Creates an installer over the given directory layout.
    pub fn new(paths: &KegPaths) -> Self {
        Self {
            cellar: Cellar::new(&paths.cellar),
            cache: paths.cache.clone(),
            build: paths.build.clone(),
            locks: paths.locks.clone(),
        }
    }

    /// The cellar this installer installs into.
    pub fn cellar(&self) -> &Cellar {
        &self.cellar
    }

    /// Download a formula's archive into the cache and verify it.
    ///
    /// This is the first half of [`Installer::install`], exposed for
    /// `keg fetch`. A cached archive skips the network but never the
    /// verification.
    pub fn fetch(&self, formula: &Formula) -> Result<FetchOutcome> {
        audit::validate(formula)?;
        let version = self.version_of(formula)?;

        let cache_path = self.cache_file(formula, &version);
        let download = download::fetch_archive(&formula.url, &cache_path)?;
        let verification = self.verify(formula, &download.path)?;

        Ok(FetchOutcome {
            path: download.path,
            verification,
            from_cache: download.from_cache,
        })
    }

    /// Run the full install pipeline for one formula.
    pub fn install(&self, formula: &Formula, options: &InstallOptions) -> Result<InstallOutcome> {
        audit::validate(formula)?;
        let version = self.version_of(formula)?;
        let _lock = FormulaLock::acquire(&self.locks, &formula.name)?;

        let keg = self.cellar.keg_path(&formula.name, &version);
        if keg.is_dir() {
            if !options.force {
                return Err(InstallError::AlreadyInstalled {
                    name: formula.name.clone(),
                    version,
                    keg,
                });
            }
            info!(keg = %keg.display(), "removing existing keg for reinstall");
            fs::remove_dir_all(&keg)?;
        }

        for dep in self.missing_required_dependencies(formula) {
            warn!(
                dependency = %dep,
                "required dependency is not in the cellar; assuming the host provides it"
            );
        }

        // Fetch and verify.
        let cache_path = self.cache_file(formula, &version);
        let download = download::fetch_archive(&formula.url, &cache_path)?;
        let verification = self.verify(formula, &download.path)?;

        // Unpack into fresh staging under build/.
        fs::create_dir_all(&self.build)?;
        let staging = tempfile::Builder::new()
            .prefix(&format!("{}-", formula.name))
            .tempdir_in(&self.build)?;
        let source_root = keg_archive::unpack(&download.path, staging.path())?;

        // Build into the keg prefix.
        fs::create_dir_all(&keg)?;
        let vars = interpolate::step_vars(&formula.name, &version, &keg);
        let envs = step_envs(formula, &version, &keg);
        let count = formula.install.len();
        for (i, raw) in formula.install.iter().enumerate() {
            let command = interpolate::substitute(raw, &vars);
            info!(step = i + 1, total = count, %command, "install step");
            if let Err(e) = run_step(&command, &source_root, &envs) {
                // A half-built prefix must never look installed.
                let _ = fs::remove_dir_all(&keg);
                return Err(InstallError::Build {
                    index: i + 1,
                    count,
                    source: e,
                });
            }
        }

        // The receipt marks the keg complete.
        Receipt::new(formula, &version, verification).write(&keg)?;
        debug!(keg = %keg.display(), "receipt written");

        let mut tests_run = 0;
        if options.run_tests {
            tests_run = self.run_test_steps(formula, &version, &keg)?;
        }

        Ok(InstallOutcome {
            name: formula.name.clone(),
            version,
            keg,
            verification,
            from_cache: download.from_cache,
            tests_run,
        })
    }

    /// Run a formula's test block against its installed keg.
    ///
    /// Returns the number of test steps that ran.
    pub fn test(&self, formula: &Formula) -> Result<usize> {
        let version = self.version_of(formula)?;
        let keg = self.cellar.keg_path(&formula.name, &version);
        if !keg.is_dir() {
            return Err(InstallError::NotInstalled {
                name: formula.name.clone(),
                version,
            });
        }
        self.run_test_steps(formula, &version, &keg)
    }

    /// Required dependencies with no keg in the cellar, in declaration order.
    pub fn missing_required_dependencies(&self, formula: &Formula) -> Vec<String> {
        formula
            .depends_on
            .iter()
            .filter(|dep| dep.is_required())
            .filter(|dep| {
                !matches!(self.cellar.versions_of(dep.name()), Ok(v) if !v.is_empty())
            })
            .map(|dep| dep.name().to_string())
            .collect()
    }

    fn run_test_steps(&self, formula: &Formula, version: &str, keg: &Path) -> Result<usize> {
        if formula.test.is_empty() {
            return Ok(0);
        }

        // Tests run in a scratch directory, never inside the keg, with the
        // keg's bin/ prepended to PATH.
        fs::create_dir_all(&self.build)?;
        let scratch = tempfile::Builder::new()
            .prefix("test-")
            .tempdir_in(&self.build)?;

        let vars = interpolate::step_vars(&formula.name, version, keg);
        let mut envs = step_envs(formula, version, keg);
        envs.push(("PATH".to_string(), prepend_path(&keg.join("bin"))));

        let count = formula.test.len();
        for (i, raw) in formula.test.iter().enumerate() {
            let command = interpolate::substitute(raw, &vars);
            info!(step = i + 1, total = count, %command, "test step");
            run_step(&command, scratch.path(), &envs).map_err(|e| InstallError::Test {
                index: i + 1,
                count,
                source: e,
            })?;
        }
        Ok(count)
    }

    fn verify(&self, formula: &Formula, archive: &Path) -> Result<Verification> {
        match formula.sha256 {
            Some(ref expected) => {
                checksum::verify(archive, expected)?;
                debug!(archive = %archive.display(), "sha256 verified");
                Ok(Verification::Verified)
            }
            None => {
                let actual = checksum::file_sha256(archive)?;
                warn!(
                    name = %formula.name,
                    sha256 = %actual,
                    "no sha256 digest; installing unverified"
                );
                Ok(Verification::Skipped)
            }
        }
    }

    fn version_of(&self, formula: &Formula) -> Result<String> {
        formula
            .resolved_version()
            .ok_or_else(|| InstallError::UnknownVersion {
                name: formula.name.clone(),
            })
    }

    /// Cache file for one formula version, e.g. `acltool-1.16.3.tar.gz`.
    fn cache_file(&self, formula: &Formula, version: &str) -> PathBuf {
        let suffix = version::archive_suffix(&formula.url).unwrap_or("");
        self.cache
            .join(format!("{}-{}{}", formula.name, version, suffix))
    }
}

/// Environment always exported to install and test steps.
fn step_envs(formula: &Formula, version: &str, keg: &Path) -> Vec<(String, String)> {
    vec![
        ("KEG_PREFIX".to_string(), keg.display().to_string()),
        ("KEG_NAME".to_string(), formula.name.clone()),
        ("KEG_VERSION".to_string(), version.to_string()),
    ]
}

/// The current PATH with `bin` prepended.
fn prepend_path(bin: &Path) -> String {
    let current = std::env::var_os("PATH").unwrap_or_default();
    let mut parts = vec![bin.to_path_buf()];
    parts.extend(std::env::split_paths(&current));
    match std::env::join_paths(parts) {
        Ok(joined) => joined.to_string_lossy().into_owned(),
        Err(_) => bin.display().to_string(),
    }
}
