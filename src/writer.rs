/*!
 * Output artifact handling for overview
 *
 * Every report produces a text artifact and a JSON artifact sharing the same
 * stem and timestamp. Both files are created before traversal starts so an
 * unwritable destination aborts the run before any work is done.
 */

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::error::{OutputContext, Result};

/// Timestamp format embedded in artifact names
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Format a run timestamp for artifact names
pub fn format_timestamp(time: &DateTime<Local>) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// Paths of a text/JSON artifact pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub text: PathBuf,
    pub json: PathBuf,
}

impl ArtifactPaths {
    /// Build `<dir>/<stem>_<timestamp>.{txt,json}`
    pub fn new(dir: &Path, stem: &str, timestamp: &str) -> Self {
        Self {
            text: dir.join(format!("{}_{}.txt", stem, timestamp)),
            json: dir.join(format!("{}_{}.json", stem, timestamp)),
        }
    }

    /// Canonical forms of both paths, used to keep a run from reporting its own output
    pub fn canonical(&self) -> Vec<PathBuf> {
        [&self.text, &self.json]
            .into_iter()
            .filter_map(|p| fs::canonicalize(p).ok())
            .collect()
    }
}

/// An open text artifact plus the JSON artifact it will be flushed alongside
pub struct OutputPair {
    paths: ArtifactPaths,
    text: BufWriter<File>,
    json: File,
}

impl OutputPair {
    /// Create both artifacts, failing if either cannot be opened for writing
    pub fn create(paths: ArtifactPaths) -> Result<Self> {
        let text = File::create(&paths.text).for_output(&paths.text)?;
        let json = File::create(&paths.json).for_output(&paths.json)?;

        Ok(Self {
            paths,
            text: BufWriter::new(text),
            json,
        })
    }

    /// Paths of the pair
    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    /// Append raw text to the text artifact
    pub fn write_text(&mut self, text: &str) -> Result<()> {
        self.text
            .write_all(text.as_bytes())
            .for_output(&self.paths.text)
    }

    /// Flush the text artifact and write `records` as compact JSON
    pub fn finish<T: Serialize>(mut self, records: &[T]) -> Result<ArtifactPaths> {
        self.text.flush().for_output(&self.paths.text)?;

        let mut json = BufWriter::new(self.json);
        serde_json::to_writer(&mut json, records).for_output(&self.paths.json)?;
        json.flush().for_output(&self.paths.json)?;

        Ok(self.paths)
    }
}
