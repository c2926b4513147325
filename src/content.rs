/*!
 * Source transcript reporter
 *
 * Walks the root, reads every matching Python file and writes a transcript
 * plus a JSON array of file records. Descriptions are requested per file
 * when a describer is attached.
 */

use std::fs;
use std::path::Path;

use tracing::{debug, error, info};

use crate::describe::{describe_or_fallback, Describe};
use crate::error::Result;
use crate::matcher::PatternSet;
use crate::types::{DescriptionOutcome, FileRecord, Usage};
use crate::walker::FilteredWalk;
use crate::writer::{ArtifactPaths, OutputPair};

/// Suffix of files picked up by the content reporter
pub const SOURCE_SUFFIX: &str = ".py";

/// Stem of the content artifacts
pub const CONTENT_STEM: &str = "all_python_files";

/// Counters for one content run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentStatistics {
    /// Records written to both artifacts
    pub files_written: u64,
    /// Matching files that could not be read (no record produced)
    pub read_failures: u64,
    /// Records carrying a service-generated description
    pub descriptions_generated: u64,
    /// Records carrying the fallback description
    pub descriptions_failed: u64,
    /// Token usage summed over generated descriptions
    pub usage: Usage,
}

/// Result of a finished content run
#[derive(Debug, Clone)]
pub struct ContentSummary {
    pub paths: ArtifactPaths,
    pub statistics: ContentStatistics,
}

/// Content reporter
pub struct ContentReporter<'a> {
    root: &'a Path,
    patterns: &'a PatternSet,
    describer: Option<&'a dyn Describe>,
}

impl<'a> ContentReporter<'a> {
    /// Create a reporter for `root`
    pub fn new(root: &'a Path, patterns: &'a PatternSet) -> Self {
        Self {
            root,
            patterns,
            describer: None,
        }
    }

    /// Attach a describer; every record then carries a description
    pub fn with_describer(mut self, describer: &'a dyn Describe) -> Self {
        self.describer = Some(describer);
        self
    }

    /// Walk the tree, streaming the transcript into `output` and flushing JSON at the end
    pub fn run(&self, mut output: OutputPair) -> Result<ContentSummary> {
        let mut records = Vec::new();
        let mut statistics = ContentStatistics::default();

        let walk = FilteredWalk::new(self.root, self.patterns).excluding(output.paths().canonical());

        for section in walk {
            for entry in section.files() {
                let filename = entry.file_name().to_string_lossy().to_string();
                if !filename.ends_with(SOURCE_SUFFIX) {
                    continue;
                }

                let path = entry.path();
                info!("Processing file: {}", path.display());

                let Some(record) = self.process_file(path, filename, &mut statistics) else {
                    continue;
                };

                output.write_text(&render_block(&record))?;
                statistics.files_written += 1;
                records.push(record);
            }
        }

        let paths = output.finish(&records)?;
        debug!("Wrote {} records to {}", records.len(), paths.json.display());

        Ok(ContentSummary { paths, statistics })
    }

    /// Build the record for one file, or None if it cannot be read
    fn process_file(
        &self,
        path: &Path,
        filename: String,
        statistics: &mut ContentStatistics,
    ) -> Option<FileRecord> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                error!("Failed to read file {}: {}", path.display(), e);
                statistics.read_failures += 1;
                return None;
            }
        };

        let outcome = self.describer.map(|describer| {
            let outcome = describe_or_fallback(describer, &content);
            match &outcome {
                DescriptionOutcome::Generated { usage, .. } => {
                    info!(
                        "Tokens used for {}: Prompt={}, Completion={}, Total={}",
                        filename, usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
                    );
                    statistics.descriptions_generated += 1;
                    statistics.usage.add(usage);
                }
                DescriptionOutcome::Unavailable { reason } => {
                    debug!("Using fallback description for {}: {}", filename, reason);
                    statistics.descriptions_failed += 1;
                }
            }
            outcome
        });

        Some(FileRecord {
            filename,
            filepath: path.to_string_lossy().into_owned(),
            description: outcome.as_ref().map(|o| o.text().to_string()),
            description_status: outcome.as_ref().map(DescriptionOutcome::status),
            content,
        })
    }
}

/// Transcript block for one record
pub fn render_block(record: &FileRecord) -> String {
    let mut block = format!("'{}'\n", record.filename);
    if let Some(description) = &record.description {
        block.push_str(&format!("**Description:** {}\n", description));
    }
    block.push_str(&format!(
        "``` File path = {}\n\n{}\n```\n\n",
        record.filepath, record.content
    ));
    block
}
