//! The cellar: versioned install prefixes.
//!
//! Layout is `<cellar>/<name>/<version>/`, one keg per installed version.
//! Multiple versions of the same formula coexist; nothing here ever touches
//! a version other than the one it was asked about.

use std::io;
use std::path::{Path, PathBuf};

use crate::error::{InstallError, Result};
use crate::receipt::Receipt;

/// Handle to the cellar directory.
#[derive(Debug, Clone)]
pub struct Cellar {
    root: PathBuf,
}

/// One installed keg, as found on disk.
#[derive(Debug, Clone)]
pub struct InstalledKeg {
    /// The formula name.
    pub name: String,
    /// The installed version.
    pub version: String,
    /// The keg prefix.
    pub path: PathBuf,
    /// The install receipt, when present and readable.
    pub receipt: Option<Receipt>,
}

impl Cellar {
    /// Creates a cellar handle rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The cellar root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The prefix a given name and version installs into.
    pub fn keg_path(&self, name: &str, version: &str) -> PathBuf {
        self.root.join(name).join(version)
    }

    /// Returns `true` if the exact name and version is installed.
    pub fn is_installed(&self, name: &str, version: &str) -> bool {
        self.keg_path(name, version).is_dir()
    }

    /// All installed versions of one formula, sorted by version string.
    pub fn versions_of(&self, name: &str) -> io::Result<Vec<InstalledKeg>> {
        let dir = self.root.join(name);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut kegs = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let path = entry.path();
            kegs.push(InstalledKeg {
                name: name.to_string(),
                version: entry.file_name().to_string_lossy().into_owned(),
                receipt: Receipt::load(&path).ok(),
                path,
            });
        }
        kegs.sort_by(|a, b| a.version.cmp(&b.version));
        Ok(kegs)
    }

    /// Every installed keg, sorted by name then version.
    pub fn list(&self) -> io::Result<Vec<InstalledKeg>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }
        let mut names: Vec<String> = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();

        let mut kegs = Vec::new();
        for name in names {
            kegs.extend(self.versions_of(&name)?);
        }
        Ok(kegs)
    }

    /// Removes one installed keg. The formula directory is pruned when its
    /// last version goes.
    pub fn remove(&self, name: &str, version: &str) -> Result<()> {
        let keg = self.keg_path(name, version);
        if !keg.is_dir() {
            return Err(InstallError::NotInstalled {
                name: name.to_string(),
                version: version.to_string(),
            });
        }
        std::fs::remove_dir_all(&keg)?;

        // Prune the now-empty formula directory, ignoring races.
        let formula_dir = self.root.join(name);
        if let Ok(mut entries) = std::fs::read_dir(&formula_dir) {
            if entries.next().is_none() {
                let _ = std::fs::remove_dir(&formula_dir);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cellar_with(kegs: &[(&str, &str)]) -> (tempfile::TempDir, Cellar) {
        let dir = tempfile::tempdir().unwrap();
        let cellar = Cellar::new(dir.path());
        for (name, version) in kegs {
            std::fs::create_dir_all(cellar.keg_path(name, version)).unwrap();
        }
        (dir, cellar)
    }

    #[test]
    fn keg_path_layout() {
        let cellar = Cellar::new("/k/cellar");
        assert_eq!(
            cellar.keg_path("acltool", "1.16.3"),
            PathBuf::from("/k/cellar/acltool/1.16.3")
        );
    }

    #[test]
    fn lists_installed_kegs_sorted() {
        let (_dir, cellar) = cellar_with(&[
            ("readline", "8.2"),
            ("acltool", "1.16.3"),
            ("acltool", "1.15"),
        ]);

        let all = cellar.list().unwrap();
        let pairs: Vec<(String, String)> =
            all.into_iter().map(|k| (k.name, k.version)).collect();
        assert_eq!(
            pairs,
            vec![
                ("acltool".to_string(), "1.15".to_string()),
                ("acltool".to_string(), "1.16.3".to_string()),
                ("readline".to_string(), "8.2".to_string()),
            ]
        );
    }

    #[test]
    fn empty_cellar_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let cellar = Cellar::new(dir.path().join("not-created-yet"));
        assert!(cellar.list().unwrap().is_empty());
        assert!(cellar.versions_of("acltool").unwrap().is_empty());
    }

    #[test]
    fn remove_prunes_empty_formula_dir() {
        let (dir, cellar) = cellar_with(&[("acltool", "1.15"), ("acltool", "1.16.3")]);

        cellar.remove("acltool", "1.15").unwrap();
        assert!(!cellar.is_installed("acltool", "1.15"));
        assert!(cellar.is_installed("acltool", "1.16.3"));
        assert!(dir.path().join("acltool").is_dir());

        cellar.remove("acltool", "1.16.3").unwrap();
        assert!(!dir.path().join("acltool").exists());
    }

    #[test]
    fn remove_missing_keg_fails() {
        let (_dir, cellar) = cellar_with(&[]);
        assert!(matches!(
            cellar.remove("acltool", "1.15"),
            Err(InstallError::NotInstalled { .. })
        ));
    }
}
