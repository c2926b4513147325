/*!
 * Pruned directory traversal shared by the reporters
 */

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::matcher::PatternSet;

/// A visited directory and the children that passed the pattern set
#[derive(Debug)]
pub struct Section {
    /// Directory path as reached from the scan root
    pub dir: PathBuf,
    /// Accepted children, sorted by file name
    pub entries: Vec<DirEntry>,
}

impl Section {
    /// Children that are not directories
    pub fn files(&self) -> impl Iterator<Item = &DirEntry> {
        self.entries.iter().filter(|e| !is_dir(e))
    }
}

/// Whether an entry is a directory, following symlinks
pub fn is_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir())
}

/// Top-down traversal that never descends into rejected directories.
///
/// Directories are yielded in pre-order. Children are checked against the
/// pattern set before being listed or queued, so an ignored directory's
/// subtree is never read. Symlinked directories are listed but not entered.
pub struct FilteredWalk<'a> {
    root: PathBuf,
    patterns: &'a PatternSet,
    exclude: Vec<PathBuf>,
    pending: Vec<PathBuf>,
}

impl<'a> FilteredWalk<'a> {
    /// Start a walk at `root`
    pub fn new(root: &Path, patterns: &'a PatternSet) -> Self {
        Self {
            root: root.to_path_buf(),
            patterns,
            exclude: Vec::new(),
            pending: vec![root.to_path_buf()],
        }
    }

    /// Skip these files (canonical paths) wherever they show up
    pub fn excluding(mut self, paths: Vec<PathBuf>) -> Self {
        self.exclude = paths;
        self
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        if self.exclude.is_empty() {
            return false;
        }

        let name = entry.file_name();
        if !self.exclude.iter().any(|p| p.file_name() == Some(name)) {
            return false;
        }

        fs::canonicalize(entry.path())
            .map(|abs| self.exclude.contains(&abs))
            .unwrap_or(false)
    }

    /// List one directory, or None if it cannot be read
    fn read_section(&self, dir: &Path) -> Option<Section> {
        let mut entries = Vec::new();

        for result in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    warn!("Failed to read directory {}: {}", dir.display(), e);
                    return None;
                }
                Err(e) => {
                    warn!("Failed to read entry in {}: {}", dir.display(), e);
                    continue;
                }
            };

            if !self.patterns.should_process(entry.path(), &self.root) {
                debug!("Ignored: {}", entry.path().display());
                continue;
            }

            if self.is_excluded(&entry) {
                debug!("Skipping own output: {}", entry.path().display());
                continue;
            }

            entries.push(entry);
        }

        Some(Section {
            dir: dir.to_path_buf(),
            entries,
        })
    }
}

impl Iterator for FilteredWalk<'_> {
    type Item = Section;

    fn next(&mut self) -> Option<Section> {
        while let Some(dir) = self.pending.pop() {
            if !self.patterns.should_process(&dir, &self.root) {
                debug!("Ignored directory: {}", dir.display());
                continue;
            }

            let Some(section) = self.read_section(&dir) else {
                continue;
            };

            // Reverse so the first subdirectory is popped next
            let subdirs: Vec<PathBuf> = section
                .entries
                .iter()
                .filter(|e| e.file_type().is_dir())
                .map(|e| e.path().to_path_buf())
                .collect();
            self.pending.extend(subdirs.into_iter().rev());

            return Some(section);
        }

        None
    }
}
