//! I/O error hints.
//!
//! Turns an io::Error into a short, platform-aware hint that the harvest errors
//! append to their message. The raw error itself stays available as the
//! error source.
//!
//! Usage:
//!   fs::rename(from, to).map_err(|e| HarvestError::Relocation {
//!       hint: io_hint(&e), from, to, source: e,
//!   })?;

use std::io;

#[cfg(unix)]
fn hint_for_os_code(code: i32) -> Option<&'static str> {
    match code {
        libc::EACCES | libc::EPERM => Some("permission denied; check ownership and write permissions"),
        libc::EXDEV => Some("cross-filesystem; rename cannot move files between devices"),
        libc::EBUSY => Some("resource busy; ensure no other process is using it"),
        libc::ENOENT => Some("path not found; it may have vanished during the run"),
        libc::ENOSPC => Some("insufficient space on device"),
        libc::EROFS => Some("read-only filesystem; cannot write here"),
        libc::ELOOP => Some("too many symbolic link levels; possible symlink cycle"),
        libc::ENAMETOOLONG => Some("filename or path too long"),
        libc::EMFILE | libc::ENFILE => Some("too many open files"),
        _ => None,
    }
}

#[cfg(windows)]
fn hint_for_os_code(code: i32) -> Option<&'static str> {
    match code {
        5 => Some("access denied; check permissions"),
        17 => Some("not same device; cross-filesystem move"),
        32 => Some("sharing violation; file is in use"),
        2 | 3 => Some("path not found; it may have vanished during the run"),
        112 => Some("insufficient disk space"),
        19 => Some("write protected / read-only media"),
        206 => Some("filename or path too long"),
        _ => None,
    }
}

#[cfg(not(any(unix, windows)))]
fn hint_for_os_code(_code: i32) -> Option<&'static str> {
    None
}

fn hint_for_kind(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path not found; it may have vanished during the run"),
        io::ErrorKind::AlreadyExists => Some("already exists"),
        _ => None,
    }
}

/// Hint suffix for an io::Error, formatted to follow a message directly:
/// `" (permission denied; ...) [os code: 13]"`, or an empty string.
pub fn io_hint(e: &io::Error) -> String {
    match e.raw_os_error() {
        Some(code) => match hint_for_os_code(code) {
            Some(h) => format!(" ({h}) [os code: {code}]"),
            None => format!(" [os code: {code}]"),
        },
        None => hint_for_kind(e.kind())
            .map(|h| format!(" ({h})"))
            .unwrap_or_default(),
    }
}
