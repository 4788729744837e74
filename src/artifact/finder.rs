//! Recursive artifact search with path-segment exclusions.

use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use super::pattern::NamePattern;

/// Path segments that disqualify a candidate.
///
/// Matching is per whole segment: `esp-idf` excludes `esp-idf/x.bin` but
/// not `esp-idf-extra/x.bin`.
#[derive(Debug, Clone, Default)]
pub struct Exclusions {
    segments: HashSet<OsString>,
}

impl Exclusions {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Self {
            segments: segments
                .into_iter()
                .map(|s| s.as_ref().to_os_string())
                .collect(),
        }
    }

    /// True if any normal component of `path` is an excluded segment.
    pub fn excludes(&self, path: &Path) -> bool {
        path.components().any(|c| match c {
            Component::Normal(segment) => self.segments.contains(segment),
            _ => false,
        })
    }
}

/// Lazily find every file under `root` whose name matches `pattern`.
///
/// Every segment of the candidate path is checked, including those of
/// `root` itself, so a root below an excluded directory yields nothing.
/// Excluded directories are pruned without descending into them. Order is
/// filesystem traversal order. A missing `root` yields nothing.
pub fn find<'a>(
    root: &Path,
    pattern: &'a NamePattern,
    exclusions: &'a Exclusions,
) -> impl Iterator<Item = PathBuf> + 'a {
    if root.exists() {
        debug!(root = %root.display(), pattern = pattern.as_str(), "searching");
    } else {
        debug!(root = %root.display(), "search root does not exist, nothing to find");
    }

    let walker = root.exists().then(|| {
        WalkDir::new(root)
            .into_iter()
            .filter_entry(move |entry| !exclusions.excludes(entry.path()))
    });

    walker
        .into_iter()
        .flatten()
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(e) => {
                warn!("Error reading entry during artifact search: {}", e);
                None
            }
        })
        .filter(|e| !e.file_type().is_dir())
        .filter(move |e| pattern.matches(e.file_name()))
        .map(DirEntry::into_path)
}

/// Run one search per pattern against the same root and concatenate them.
///
/// Duplicates are kept: a file matching two patterns is yielded twice.
pub fn find_all<'a>(
    root: &'a Path,
    patterns: &'a [NamePattern],
    exclusions: &'a Exclusions,
) -> impl Iterator<Item = PathBuf> + 'a {
    patterns
        .iter()
        .flat_map(move |pattern| find(root, pattern, exclusions))
}
