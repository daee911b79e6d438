//! Resolution of the keg home directory and its standard layout.
//!
//! The keg home is the root of all keg state. Under it live the cellar
//! (installed packages), the download cache, the default tap, advisory
//! locks, and build staging space:
//!
//! ```text
//! ~/.keg/
//!   cellar/<name>/<version>/   installed kegs
//!   cache/                     downloaded archives
//!   taps/                      formula files
//!   locks/                     per-formula advisory locks
//!   build/                     extraction staging
//!   config.yaml
//! ```

use crate::config::{ConfigError, KegConfig};
use std::path::{Path, PathBuf};

/// The name of the environment variable that can override the keg home.
const KEG_HOME_ENV: &str = "KEG_HOME";

/// The default keg home directory name under the user's home.
const KEG_DIR_NAME: &str = ".keg";

/// The resolved keg home directory.
#[derive(Debug, Clone)]
pub struct KegHome {
    root: PathBuf,
}

impl KegHome {
    /// Resolve the keg home.
    ///
    /// Resolution order:
    /// 1. Explicit flag (`--home`)
    /// 2. `KEG_HOME` environment variable
    /// 3. `~/.keg`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HomeNotFound`] when no flag or environment
    /// override is given and the user's home directory cannot be determined.
    pub fn resolve(flag: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = flag {
            return Ok(Self {
                root: path.to_path_buf(),
            });
        }
        if let Ok(env_dir) = std::env::var(KEG_HOME_ENV) {
            if !env_dir.is_empty() {
                return Ok(Self {
                    root: PathBuf::from(env_dir),
                });
            }
        }
        let home = home_dir().ok_or(ConfigError::HomeNotFound)?;
        Ok(Self {
            root: home.join(KEG_DIR_NAME),
        })
    }

    /// Creates a keg home rooted at an explicit path.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The home root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The standard cellar directory, without config overrides.
    pub fn cellar_dir(&self) -> PathBuf {
        self.root.join("cellar")
    }

    /// The standard download cache directory, without config overrides.
    pub fn cache_dir(&self) -> PathBuf {
        self.root.join("cache")
    }

    /// The default tap directory.
    pub fn taps_dir(&self) -> PathBuf {
        self.root.join("taps")
    }

    /// The advisory lock directory.
    pub fn locks_dir(&self) -> PathBuf {
        self.root.join("locks")
    }

    /// The build staging directory.
    pub fn build_dir(&self) -> PathBuf {
        self.root.join("build")
    }

    /// Create the home root and its standard subdirectories.
    pub fn ensure(&self) -> std::io::Result<()> {
        for dir in [
            self.root.clone(),
            self.cellar_dir(),
            self.cache_dir(),
            self.taps_dir(),
            self.locks_dir(),
            self.build_dir(),
        ] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// Applies config overrides, yielding the effective directory layout.
    ///
    /// Relative override paths are resolved against the home root. The
    /// default tap is always searched last, after any configured taps.
    pub fn paths(&self, config: &KegConfig) -> KegPaths {
        let mut taps: Vec<PathBuf> = config.taps.iter().map(|t| self.resolve_entry(t)).collect();
        taps.push(self.taps_dir());

        KegPaths {
            cellar: config
                .cellar
                .as_deref()
                .map(|c| self.resolve_entry(c))
                .unwrap_or_else(|| self.cellar_dir()),
            cache: config
                .cache
                .as_deref()
                .map(|c| self.resolve_entry(c))
                .unwrap_or_else(|| self.cache_dir()),
            taps,
            locks: self.locks_dir(),
            build: self.build_dir(),
        }
    }

    fn resolve_entry(&self, value: &str) -> PathBuf {
        let path = PathBuf::from(value);
        if path.is_absolute() {
            path
        } else {
            self.root.join(path)
        }
    }
}

/// The effective directory layout after applying config overrides.
#[derive(Debug, Clone)]
pub struct KegPaths {
    /// Where installed kegs live.
    pub cellar: PathBuf,
    /// Where downloaded archives are cached.
    pub cache: PathBuf,
    /// Formula directories, in search order.
    pub taps: Vec<PathBuf>,
    /// Per-formula advisory locks.
    pub locks: PathBuf,
    /// Extraction and build staging.
    pub build: PathBuf,
}

/// Get the user's home directory.
fn home_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE").ok().map(PathBuf::from)
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME").ok().map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn flag_takes_priority() {
        let home = KegHome::resolve(Some(Path::new("/custom/keg"))).unwrap();
        assert_eq!(home.root(), Path::new("/custom/keg"));
    }

    #[test]
    fn standard_layout() {
        let home = KegHome::at("/k");
        assert_eq!(home.cellar_dir(), PathBuf::from("/k/cellar"));
        assert_eq!(home.cache_dir(), PathBuf::from("/k/cache"));
        assert_eq!(home.taps_dir(), PathBuf::from("/k/taps"));
        assert_eq!(home.locks_dir(), PathBuf::from("/k/locks"));
        assert_eq!(home.build_dir(), PathBuf::from("/k/build"));
    }

    #[test]
    fn paths_apply_overrides() {
        let home = KegHome::at("/k");
        let mut config = KegConfig::default();
        config.cellar = Some("/srv/cellar".to_string());
        config.cache = Some("archives".to_string());
        config.taps = vec!["/srv/formulas".to_string()];

        let paths = home.paths(&config);
        assert_eq!(paths.cellar, PathBuf::from("/srv/cellar"));
        // Relative overrides resolve against the home root.
        assert_eq!(paths.cache, PathBuf::from("/k/archives"));
        // Default tap always comes last.
        assert_eq!(
            paths.taps,
            vec![PathBuf::from("/srv/formulas"), PathBuf::from("/k/taps")]
        );
    }

    #[test]
    fn ensure_creates_standard_subdirs() {
        let dir = tempfile::tempdir().unwrap();
        let home = KegHome::at(dir.path().join("keghome"));
        home.ensure().unwrap();
        assert!(home.cellar_dir().is_dir());
        assert!(home.cache_dir().is_dir());
        assert!(home.taps_dir().is_dir());
        assert!(home.locks_dir().is_dir());
        assert!(home.build_dir().is_dir());
    }
}
