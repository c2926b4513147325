//! File description capability
//!
//! Asks a text-generation service for a short paragraph describing a source
//! file. Reporters only see the [`Describe`] trait, so tests can swap in a
//! deterministic stub instead of performing network calls.

mod error;
mod openai;

pub use error::{DescribeError, DescribeResult};
pub use openai::{OpenAiDescriber, DEFAULT_ENDPOINT, DEFAULT_MODEL, REQUEST_TIMEOUT};

use crate::types::{DescriptionOutcome, Usage};

/// Description substituted when the service call fails
pub const FALLBACK_DESCRIPTION: &str = "Description unavailable due to an API error.";

/// Instructions sent ahead of every file
pub const DESCRIPTION_PROMPT: &str = "Provide a concise description of the following Python file, \
focusing on the filename, its path, its purpose, and key variables with their purposes. \
Do not include unnecessary explanations of open-source platforms or general concepts.";

/// A successful description with its token accounting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub text: String,
    pub usage: Usage,
}

/// Trait for anything that can describe a file's content
pub trait Describe {
    /// Describe the given file content
    fn describe(&self, content: &str) -> DescribeResult<Description>;
}

/// Describe content, turning any failure into the fallback outcome
pub fn describe_or_fallback(describer: &dyn Describe, content: &str) -> DescriptionOutcome {
    match describer.describe(content) {
        Ok(Description { text, usage }) => DescriptionOutcome::Generated { text, usage },
        Err(e) => {
            tracing::error!("{}", e);
            DescriptionOutcome::Unavailable {
                reason: e.to_string(),
            }
        }
    }
}

/// Build the user prompt, with an optional caller-supplied prefix line
pub fn build_prompt(prefix: Option<&str>) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{}\n{}", prefix, DESCRIPTION_PROMPT),
        _ => DESCRIPTION_PROMPT.to_string(),
    }
}
