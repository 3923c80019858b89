//! Harvest / skip decision for walked entries.
//!
//! Matching is done on the dotted suffix of the file name (everything from the
//! last '.' onward), compared case-insensitively against ".<ext>" for every
//! configured extension. `clip.wav` never matches `avi`, `CLIP.AVI` does.

use std::ffi::OsStr;
use std::path::Path;

use super::walker::Candidate;

/// Normalized, ordered set of extensions to harvest.
///
/// Stored lowercased with a leading dot (".avi") so matching is one string
/// comparison per extension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionSet {
    dotted: Vec<String>,
}

impl ExtensionSet {
    /// Build from user-supplied values. Whitespace and one leading dot are
    /// stripped, empty values dropped, duplicates removed (first one wins).
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dotted: Vec<String> = Vec::new();
        for ext in extensions {
            let ext = ext.as_ref().trim();
            let ext = ext.strip_prefix('.').unwrap_or(ext);
            if ext.is_empty() {
                continue;
            }
            let key = format!(".{}", ext.to_lowercase());
            if !dotted.contains(&key) {
                dotted.push(key);
            }
        }
        Self { dotted }
    }

    pub fn is_empty(&self) -> bool {
        self.dotted.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dotted.len()
    }

    /// Extensions without their dot, in configured order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.dotted.iter().map(|d| &d[1..])
    }

    /// True when the file name's dotted suffix is one of ours.
    pub fn matches(&self, file_name: &OsStr) -> bool {
        let name = file_name.to_string_lossy();
        match dotted_suffix(&name) {
            Some(suffix) => {
                let suffix = suffix.to_lowercase();
                self.dotted.iter().any(|d| *d == suffix)
            }
            None => false,
        }
    }
}

/// Everything from the last '.' of `name` onward, dot included.
/// `"a.tar.gz"` gives `".gz"`, `".avi"` gives `".avi"`, `"README"` gives None.
pub(crate) fn dotted_suffix(name: &str) -> Option<&str> {
    name.rfind('.').map(|idx| &name[idx..])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Harvest,
    Skip(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Directory,
    AlreadyInRoot,
    ExtensionMismatch,
}

/// Decide what to do with one walked entry. Pure: touches nothing on disk.
pub fn decide(candidate: &Candidate, root: &Path, extensions: &ExtensionSet) -> Decision {
    if candidate.is_dir() {
        return Decision::Skip(SkipReason::Directory);
    }
    if candidate.parent() == Some(root) {
        return Decision::Skip(SkipReason::AlreadyInRoot);
    }
    match candidate.path.file_name() {
        Some(name) if extensions.matches(name) => Decision::Harvest,
        _ => Decision::Skip(SkipReason::ExtensionMismatch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harvest::walker::EntryKind;
    use std::path::PathBuf;

    fn file(p: &str) -> Candidate {
        Candidate {
            path: PathBuf::from(p),
            kind: EntryKind::File,
        }
    }

    fn set() -> ExtensionSet {
        ExtensionSet::new(["avi", "mp4"])
    }

    #[test]
    fn nested_matching_file_is_harvested() {
        let root = Path::new("/r");
        assert_eq!(decide(&file("/r/sub/a.avi"), root, &set()), Decision::Harvest);
        assert_eq!(decide(&file("/r/sub/deep/er/b.mp4"), root, &set()), Decision::Harvest);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let root = Path::new("/r");
        assert_eq!(decide(&file("/r/sub/x.AVI"), root, &set()), Decision::Harvest);
        assert_eq!(decide(&file("/r/sub/x.Mp4"), root, &set()), Decision::Harvest);
    }

    #[test]
    fn suffix_must_match_whole_extension() {
        let root = Path::new("/r");
        let s = set();
        assert_eq!(
            decide(&file("/r/sub/song.wav"), root, &s),
            Decision::Skip(SkipReason::ExtensionMismatch)
        );
        assert_eq!(
            decide(&file("/r/sub/clip.xavi"), root, &s),
            Decision::Skip(SkipReason::ExtensionMismatch)
        );
        assert_eq!(
            decide(&file("/r/sub/avi"), root, &s),
            Decision::Skip(SkipReason::ExtensionMismatch)
        );
        assert_eq!(
            decide(&file("/r/sub/movie.avi.part"), root, &s),
            Decision::Skip(SkipReason::ExtensionMismatch)
        );
    }

    #[test]
    fn files_directly_in_root_are_left_alone() {
        let root = Path::new("/r");
        assert_eq!(
            decide(&file("/r/a.avi"), root, &set()),
            Decision::Skip(SkipReason::AlreadyInRoot)
        );
    }

    #[test]
    fn directories_are_never_harvested() {
        let root = Path::new("/r");
        let dir = Candidate {
            path: PathBuf::from("/r/sub/folder.avi"),
            kind: EntryKind::Directory,
        };
        assert_eq!(decide(&dir, root, &set()), Decision::Skip(SkipReason::Directory));
    }

    #[test]
    fn dotfile_named_like_extension_matches() {
        let root = Path::new("/r");
        assert_eq!(decide(&file("/r/sub/.avi"), root, &set()), Decision::Harvest);
    }

    #[test]
    fn extension_set_normalizes_input() {
        let s = ExtensionSet::new([" .AVI", "avi", "", "  ", "mkv", ".Mkv"]);
        assert_eq!(s.names().collect::<Vec<_>>(), vec!["avi", "mkv"]);
        assert_eq!(s.len(), 2);
        assert!(ExtensionSet::new(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn dotted_suffix_uses_last_dot() {
        assert_eq!(dotted_suffix("a.tar.gz"), Some(".gz"));
        assert_eq!(dotted_suffix(".avi"), Some(".avi"));
        assert_eq!(dotted_suffix("README"), None);
    }
}
