//! Version inference from source archive URLs.
//!
//! Most formulas never spell out a `version` field; the version is read off
//! the final path segment of the `url`, the same way a human would.

/// Archive suffixes recognized by keg, longest first so `.tar.gz` wins
/// over `.tar`.
const ARCHIVE_SUFFIXES: &[&str] = &[".tar.gz", ".tar.bz2", ".tar.xz", ".tgz", ".tar", ".zip"];

/// Returns the recognized archive suffix of a filename or URL, if any.
pub fn archive_suffix(name: &str) -> Option<&'static str> {
    ARCHIVE_SUFFIXES
        .iter()
        .find(|suffix| name.ends_with(*suffix))
        .copied()
}

/// Strips a recognized archive suffix, returning the stem.
pub fn strip_archive_suffix(name: &str) -> Option<&str> {
    archive_suffix(name).map(|suffix| &name[..name.len() - suffix.len()])
}

/// Infers a package version from the final path segment of a source URL.
///
/// Handles the common upstream naming shapes:
/// - `.../archive/v1.16.3.tar.gz` -> `1.16.3`
/// - `.../acltool-1.15.tar.gz` -> `1.15`
/// - `.../2.4.0.zip` -> `2.4.0`
///
/// Returns `None` when the segment carries nothing that looks like a version
/// (e.g. `latest.tar.gz`).
pub fn infer_from_url(url: &str) -> Option<String> {
    let segment = url.trim_end_matches('/').rsplit('/').next()?;
    let stem = strip_archive_suffix(segment).unwrap_or(segment);
    if stem.is_empty() {
        return None;
    }

    // v-prefixed tag: v1.16.3
    if let Some(rest) = stem.strip_prefix('v') {
        if rest.starts_with(|c: char| c.is_ascii_digit()) {
            return Some(rest.to_string());
        }
    }

    // Bare version: 1.16.3
    if stem.starts_with(|c: char| c.is_ascii_digit()) {
        return Some(stem.to_string());
    }

    // name-1.15 or name-v1.15: take everything after the first dash that
    // introduces a version.
    for (i, _) in stem.match_indices('-') {
        let rest = &stem[i + 1..];
        if rest.starts_with(|c: char| c.is_ascii_digit()) {
            return Some(rest.to_string());
        }
        if let Some(tag) = rest.strip_prefix('v') {
            if tag.starts_with(|c: char| c.is_ascii_digit()) {
                return Some(tag.to_string());
            }
        }
    }

    None
}
