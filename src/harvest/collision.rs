//! Collision-free destination names in the root.
//!
//! Policy: keep the file's own name when it is free, otherwise append
//! `_1`, `_2`, ... before the extension until a free name turns up.
//!
//! - "movie.mkv" -> "movie_1.mkv", "movie_2.mkv", ...
//! - "archive.tar.gz" -> "archive.tar_1.gz" (split on the last dot)
//! - ".avi" -> "_1.avi"
//! - "Clip.AVI" -> "Clip_1.AVI" (extension casing kept)
//!
//! Notes:
//! - The existence probe and the later rename are not atomic together. A run
//!   assumes nothing else writes into the root meanwhile; no lock is taken.
//! - A name counts as taken when anything exists there, dangling symlinks
//!   included.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::{HarvestError, HarvestResult};

use super::helpers::io_hint;

/// Upper bound for the numeric suffix.
pub const MAX_SUFFIX: u32 = 100_000;

/// Return a path in `root` for `name` that does not exist right now.
pub fn resolve_destination(root: &Path, name: &OsStr) -> HarvestResult<PathBuf> {
    let candidate = root.join(name);
    if !is_taken(&candidate)? {
        return Ok(candidate);
    }

    let (stem, ext) = split_name(name);
    for n in 1..=MAX_SUFFIX {
        let candidate = root.join(suffixed_name(&stem, &ext, n));
        if !is_taken(&candidate)? {
            debug!(name = ?name, dest = %candidate.display(), attempt = n, "collision resolved");
            return Ok(candidate);
        }
    }

    Err(HarvestError::NoFreeName {
        name: name.to_os_string(),
        root: root.to_path_buf(),
        tries: MAX_SUFFIX,
    })
}

/// Whether anything occupies `path` (symlinks are not followed).
fn is_taken(path: &Path) -> HarvestResult<bool> {
    match fs::symlink_metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(HarvestError::Probe {
            path: path.to_path_buf(),
            hint: io_hint(&e),
            source: e,
        }),
    }
}

/// Split a file name on its last dot: `("archive.tar", ".gz")`.
/// A name without a dot has an empty extension.
pub(crate) fn split_name(name: &OsStr) -> (OsString, OsString) {
    if let Some(s) = name.to_str() {
        return match s.rfind('.') {
            Some(idx) => (OsString::from(&s[..idx]), OsString::from(&s[idx..])),
            None => (OsString::from(s), OsString::new()),
        };
    }
    split_name_raw(name)
}

#[cfg(unix)]
fn split_name_raw(name: &OsStr) -> (OsString, OsString) {
    use std::os::unix::ffi::{OsStrExt, OsStringExt};
    let bytes = name.as_bytes();
    match bytes.iter().rposition(|b| *b == b'.') {
        Some(idx) => (
            OsString::from_vec(bytes[..idx].to_vec()),
            OsString::from_vec(bytes[idx..].to_vec()),
        ),
        None => (name.to_os_string(), OsString::new()),
    }
}

#[cfg(not(unix))]
fn split_name_raw(name: &OsStr) -> (OsString, OsString) {
    // Best-effort: lossy view is only used to locate the split point.
    let lossy = name.to_string_lossy();
    match lossy.rfind('.') {
        Some(idx) => (
            OsString::from(&lossy[..idx]),
            OsString::from(&lossy[idx..]),
        ),
        None => (name.to_os_string(), OsString::new()),
    }
}

fn suffixed_name(stem: &OsStr, ext: &OsStr, n: u32) -> OsString {
    let mut out = OsString::with_capacity(stem.len() + ext.len() + 8);
    out.push(stem);
    out.push(format!("_{n}"));
    out.push(ext);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_on_last_dot() {
        assert_eq!(
            split_name(OsStr::new("archive.tar.gz")),
            (OsString::from("archive.tar"), OsString::from(".gz"))
        );
        assert_eq!(
            split_name(OsStr::new(".avi")),
            (OsString::new(), OsString::from(".avi"))
        );
        assert_eq!(
            split_name(OsStr::new("noext")),
            (OsString::from("noext"), OsString::new())
        );
    }

    #[test]
    fn suffix_goes_before_extension() {
        assert_eq!(
            suffixed_name(OsStr::new("Clip"), OsStr::new(".AVI"), 2),
            OsString::from("Clip_2.AVI")
        );
        assert_eq!(
            suffixed_name(OsStr::new("noext"), OsStr::new(""), 1),
            OsString::from("noext_1")
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_names_split_bytewise() {
        use std::os::unix::ffi::OsStrExt;
        let raw = [0xff, 0xfe, b'.', b'a', b'v', b'i'];
        let (stem, ext) = split_name(OsStr::from_bytes(&raw));
        assert_eq!(stem.as_bytes(), &[0xff, 0xfe]);
        assert_eq!(ext, OsString::from(".avi"));
    }
}
