//! Depth-first tree walk over the harvest root.
//!
//! Wraps `walkdir` into a lazy iterator of `Candidate`s. Each directory's
//! listing is read (and sorted by name) before any of its entries are yielded,
//! so files renamed into the root mid-walk are never picked up again.
//! Symlinks are not followed.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::errors::{HarvestError, HarvestResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One entry seen during the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub kind: EntryKind,
}

impl Candidate {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Immediate parent directory of this entry.
    pub fn parent(&self) -> Option<&Path> {
        self.path.parent()
    }
}

/// Walk everything below `root` (the root itself is not yielded).
///
/// The first error ends the harvest: callers stop at the first `Err`.
pub fn walk(root: &Path) -> impl Iterator<Item = HarvestResult<Candidate>> + '_ {
    WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .map(move |res| match res {
            Ok(entry) => {
                let kind = if entry.file_type().is_dir() {
                    EntryKind::Directory
                } else {
                    EntryKind::File
                };
                Ok(Candidate {
                    path: entry.into_path(),
                    kind,
                })
            }
            Err(err) => Err(HarvestError::Traversal {
                path: err.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf()),
                source: err,
            }),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn yields_every_entry_once_with_kinds() {
        let td = tempdir().unwrap();
        let root = td.path();
        fs::create_dir_all(root.join("a/b")).unwrap();
        fs::write(root.join("top.avi"), b"x").unwrap();
        fs::write(root.join("a/one.mp4"), b"x").unwrap();
        fs::write(root.join("a/b/two.srt"), b"x").unwrap();

        let seen: Vec<Candidate> = walk(root).collect::<Result<_, _>>().unwrap();
        let mut paths: Vec<_> = seen.iter().map(|c| c.path.strip_prefix(root).unwrap().to_path_buf()).collect();
        paths.sort();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("a"),
                PathBuf::from("a/b"),
                PathBuf::from("a/b/two.srt"),
                PathBuf::from("a/one.mp4"),
                PathBuf::from("top.avi"),
            ]
        );
        let dirs = seen.iter().filter(|c| c.is_dir()).count();
        assert_eq!(dirs, 2);
        assert!(seen.iter().all(|c| c.path != root));
    }

    #[test]
    fn parent_of_nested_file() {
        let td = tempdir().unwrap();
        let root = td.path();
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("sub/x.mkv"), b"x").unwrap();
        let file = walk(root)
            .filter_map(Result::ok)
            .find(|c| !c.is_dir())
            .unwrap();
        assert_eq!(file.parent(), Some(root.join("sub").as_path()));
    }
}
