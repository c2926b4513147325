/*!
 * Core types and data structures for the overview reports
 */

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Token accounting returned by the description service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

impl Usage {
    /// Accumulate another usage record into this one
    pub fn add(&mut self, other: &Usage) {
        self.prompt_tokens += other.prompt_tokens;
        self.completion_tokens += other.completion_tokens;
        self.total_tokens += other.total_tokens;
    }
}

/// How the description attached to a file record came about
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptionOutcome {
    /// The service answered with a description
    Generated { text: String, usage: Usage },
    /// The service failed; the record carries the fallback text instead
    Unavailable { reason: String },
}

impl DescriptionOutcome {
    /// Text written to the transcript and JSON record
    pub fn text(&self) -> &str {
        match self {
            DescriptionOutcome::Generated { text, .. } => text,
            DescriptionOutcome::Unavailable { .. } => crate::describe::FALLBACK_DESCRIPTION,
        }
    }

    /// Label stored alongside the text in the file record
    pub fn status(&self) -> DescriptionStatus {
        match self {
            DescriptionOutcome::Generated { .. } => DescriptionStatus::Generated,
            DescriptionOutcome::Unavailable { .. } => DescriptionStatus::Unavailable,
        }
    }

    /// Token usage, present only for generated descriptions
    pub fn usage(&self) -> Option<&Usage> {
        match self {
            DescriptionOutcome::Generated { usage, .. } => Some(usage),
            DescriptionOutcome::Unavailable { .. } => None,
        }
    }
}

/// Origin of a record's description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DescriptionStatus {
    Generated,
    Unavailable,
}

/// One scanned source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// File name
    pub filename: String,
    /// Path as reached from the scan root
    pub filepath: String,
    /// Description, only present when description mode is active
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether `description` came from the service or is the fallback text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_status: Option<DescriptionStatus>,
    /// Raw file content
    pub content: String,
}

/// Kind of a directory entry in the tree report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// One child of a visited directory in the tree report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub name: String,
    /// Symbolic mode, e.g. `drwxr-xr-x`
    pub permissions: String,
    pub owner: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

/// A visited directory and its reported children
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryListing {
    pub directory: String,
    pub contents: Vec<EntryRecord>,
}
