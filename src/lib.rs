/*!
 * Overview - Python source transcripts and permission trees of a directory
 *
 * Walks a directory with include/ignore glob filtering and writes either a
 * transcript of every Python file (optionally with AI-generated
 * descriptions) or a permission/ownership tree, each as text plus JSON.
 */

pub mod config;
pub mod content;
pub mod describe;
pub mod error;
pub mod matcher;
pub mod report;
pub mod tree;
pub mod types;
pub mod utils;
pub mod walker;
pub mod writer;


// Re-export main components for easier access
pub use config::{Args, Config};
pub use content::{ContentReporter, ContentStatistics, ContentSummary};
pub use describe::{Describe, DescribeError, Description, OpenAiDescriber};
pub use error::{OverviewError, Result};
pub use matcher::{should_process, PatternSet};
pub use report::{Reporter, RunReport};
pub use tree::{TreeReporter, TreeStatistics, TreeSummary};
pub use types::{
    DescriptionStatus, DirectoryListing, EntryKind, EntryRecord, FileRecord, Usage,
};
pub use writer::{ArtifactPaths, OutputPair};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
