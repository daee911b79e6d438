//! Source archive downloads with a local cache.
//!
//! Downloads stream to `<dest>.part` and are renamed into place only when
//! complete, so an aborted transfer never pollutes the cache. A file already
//! present at `dest` is trusted as a complete earlier download; whether its
//! digest still matches the formula is the caller's verification step.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Errors that can occur while downloading an archive.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The HTTP request failed (connect error, non-2xx status, bad URL).
    #[error("failed to download {url}: {source}")]
    Http {
        /// The URL that was requested.
        url: String,
        /// Underlying transport error.
        #[source]
        source: Box<ureq::Error>,
    },

    /// Writing the downloaded bytes to the cache failed.
    #[error("failed to save download of {url}: {source}")]
    Io {
        /// The URL that was being saved.
        url: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// A specialized `Result` type for download operations.
pub type Result<T> = std::result::Result<T, FetchError>;

/// A completed (or cache-satisfied) download.
#[derive(Debug, Clone)]
pub struct Download {
    /// Where the archive lives in the cache.
    pub path: PathBuf,
    /// `true` if no network request was made.
    pub from_cache: bool,
}

/// Fetch `url` into the cache file `dest`.
///
/// If `dest` already exists the download is skipped entirely and the cached
/// file is returned. Otherwise the body streams to `<dest>.part` and is
/// renamed to `dest` on success.
pub fn fetch_archive(url: &str, dest: &Path) -> Result<Download> {
    if dest.is_file() {
        debug!(path = %dest.display(), "archive already cached");
        return Ok(Download {
            path: dest.to_path_buf(),
            from_cache: true,
        });
    }

    let io_err = |e: io::Error| FetchError::Io {
        url: url.to_string(),
        source: e,
    };

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let part = partial_path(dest);

    debug!(%url, "downloading");
    let mut response = ureq::get(url).call().map_err(|e| FetchError::Http {
        url: url.to_string(),
        source: Box::new(e),
    })?;

    let mut file = File::create(&part).map_err(io_err)?;
    let copied = io::copy(&mut response.body_mut().as_reader(), &mut file);
    drop(file);
    let written = match copied {
        Ok(n) => n,
        Err(e) => {
            let _ = fs::remove_file(&part);
            return Err(io_err(e));
        }
    };

    fs::rename(&part, dest).map_err(io_err)?;
    debug!(path = %dest.display(), bytes = written, "download complete");
    Ok(Download {
        path: dest.to_path_buf(),
        from_cache: false,
    })
}

/// The in-flight sibling of a cache file: `<dest>.part`.
fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_os_string();
    name.push(".part");
    PathBuf::from(name)
}
