/*!
 * Permission/ownership tree reporter
 */

use std::fs;
use std::os::unix::fs::MetadataExt;
use std::path::Path;

use tracing::error;
use walkdir::DirEntry;

use crate::error::Result;
use crate::matcher::PatternSet;
use crate::types::{DirectoryListing, EntryKind, EntryRecord};
use crate::utils::{format_mode, owner_name};
use crate::walker::FilteredWalk;
use crate::writer::{ArtifactPaths, OutputPair};

/// Stem of the tree artifacts
pub const TREE_STEM: &str = "directory_tree";

/// Counters for one tree run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeStatistics {
    /// Directories with a section in the report
    pub directories: u64,
    /// Entries listed across all sections
    pub entries: u64,
    /// Entries dropped because their status could not be read
    pub stat_failures: u64,
}

/// Result of a finished tree run
#[derive(Debug, Clone)]
pub struct TreeSummary {
    pub paths: ArtifactPaths,
    pub statistics: TreeStatistics,
}

/// Tree reporter
pub struct TreeReporter<'a> {
    root: &'a Path,
    patterns: &'a PatternSet,
}

impl<'a> TreeReporter<'a> {
    /// Create a reporter for `root`
    pub fn new(root: &'a Path, patterns: &'a PatternSet) -> Self {
        Self { root, patterns }
    }

    /// Walk the tree, writing one section per visited directory
    pub fn run(&self, mut output: OutputPair) -> Result<TreeSummary> {
        let mut listings = Vec::new();
        let mut statistics = TreeStatistics::default();

        let walk = FilteredWalk::new(self.root, self.patterns).excluding(output.paths().canonical());

        for section in walk {
            let directory = section.dir.to_string_lossy().into_owned();
            output.write_text(&render_header(&directory))?;

            let mut contents = Vec::with_capacity(section.entries.len());
            for entry in &section.entries {
                match entry_record(entry) {
                    Ok(record) => {
                        output.write_text(&render_entry(&record))?;
                        contents.push(record);
                    }
                    Err(e) => {
                        error!("Failed to access {}: {}", entry.path().display(), e);
                        statistics.stat_failures += 1;
                    }
                }
            }

            statistics.directories += 1;
            statistics.entries += contents.len() as u64;
            listings.push(DirectoryListing {
                directory,
                contents,
            });
        }

        let paths = output.finish(&listings)?;
        Ok(TreeSummary { paths, statistics })
    }
}

/// Stat an entry (following symlinks) and describe it
fn entry_record(entry: &DirEntry) -> std::io::Result<EntryRecord> {
    let metadata = fs::metadata(entry.path())?;

    Ok(EntryRecord {
        name: entry.file_name().to_string_lossy().into_owned(),
        permissions: format_mode(metadata.mode()),
        owner: owner_name(metadata.uid()),
        kind: if metadata.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        },
    })
}

/// Section header for a visited directory
pub fn render_header(directory: &str) -> String {
    format!(
        "\nDirectory: {}\n{}\n",
        directory,
        "=".repeat(directory.chars().count() + 11)
    )
}

/// Line for one entry
pub fn render_entry(record: &EntryRecord) -> String {
    format!("{} {} {}\n", record.permissions, record.owner, record.name)
}
