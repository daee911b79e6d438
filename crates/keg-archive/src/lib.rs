//! Tarball extraction into a staging directory.
//!
//! Handles gzip-compressed and plain tarballs. After unpacking, the source
//! root is resolved: release tarballs conventionally wrap everything in a
//! single `name-version/` directory, and build steps should run inside it.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use tracing::debug;

/// Errors that can occur while unpacking an archive.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    /// The file's suffix is not a supported archive format.
    #[error("unsupported archive format: {file} (supported: .tar.gz, .tgz, .tar)")]
    UnsupportedFormat {
        /// File name of the rejected archive.
        file: String,
    },

    /// Reading or extracting the archive failed.
    #[error("failed to unpack {}: {source}", .path.display())]
    Unpack {
        /// Path of the archive being unpacked.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A filesystem operation around the staging directory failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A specialized `Result` type for archive operations.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Supported archive container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    TarGz,
    Tar,
}

fn detect_format(file: &str) -> Option<Format> {
    if file.ends_with(".tar.gz") || file.ends_with(".tgz") {
        Some(Format::TarGz)
    } else if file.ends_with(".tar") {
        Some(Format::Tar)
    } else {
        None
    }
}

/// Unpack `archive` into `dest` and return the source root.
///
/// The source root is the single top-level directory when the tarball has
/// exactly one, otherwise `dest` itself.
pub fn unpack(archive: &Path, dest: &Path) -> Result<PathBuf> {
    let file_name = archive
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let format = detect_format(&file_name).ok_or(ArchiveError::UnsupportedFormat {
        file: file_name.clone(),
    })?;

    std::fs::create_dir_all(dest)?;

    let unpack_err = |e: io::Error| ArchiveError::Unpack {
        path: archive.to_path_buf(),
        source: e,
    };

    let file = File::open(archive).map_err(unpack_err)?;
    match format {
        Format::TarGz => tar::Archive::new(GzDecoder::new(file))
            .unpack(dest)
            .map_err(unpack_err)?,
        Format::Tar => tar::Archive::new(file).unpack(dest).map_err(unpack_err)?,
    }

    let root = source_root(dest)?;
    debug!(archive = %archive.display(), root = %root.display(), "unpacked");
    Ok(root)
}

/// Resolves where build steps should run after extraction.
fn source_root(dest: &Path) -> io::Result<PathBuf> {
    let entries: Vec<_> = std::fs::read_dir(dest)?.collect::<io::Result<_>>()?;
    if entries.len() == 1 && entries[0].file_type()?.is_dir() {
        return Ok(entries[0].path());
    }
    Ok(dest.to_path_buf())
}
