/*!
 * Configuration handling for overview
 */

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use clap_complete::Shell;

use crate::describe::DEFAULT_MODEL;
use crate::error::{OverviewError, Result};
use crate::matcher::PatternSet;
use crate::utils::DEFAULT_IGNORE;

/// Environment variables consulted for the API key, in order
pub const API_KEY_ENV_VARS: [&str; 3] = ["OPENAI_API_KEY", "API_KEY", "api_key"];

/// Command-line arguments for overview
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    name = "overview",
    version = env!("CARGO_PKG_VERSION"),
    about = "Create an overview of Python files and/or a directory tree",
    long_about = "Concatenates Python sources (optionally with AI-generated descriptions) and/or \
                  renders a permission/ownership tree of a directory. Each report is written as \
                  a timestamped text file plus a compact JSON file."
)]
pub struct Args {
    /// Root directory to scan
    #[clap(default_value = ".")]
    pub root_dir: PathBuf,

    /// Process all Python files under the root directory
    #[clap(short = 'p', long)]
    pub python: bool,

    /// Generate a tree view of the directory structure
    #[clap(short = 't', long)]
    pub tree: bool,

    /// Generate a description for each Python file via the OpenAI API
    #[clap(long)]
    pub description: bool,

    /// OpenAI API key (takes precedence over environment variables)
    #[clap(short = 'a', long = "api", value_name = "API_KEY")]
    pub api_key: Option<String>,

    /// Optional partial prompt placed before the description instructions
    #[clap(short = 'd', long = "prompt", value_name = "PARTIAL_PROMPT")]
    pub prompt: Option<String>,

    /// Directory patterns to ignore
    #[clap(long, num_args = 1.., value_delimiter = ',')]
    pub ignore_dirs: Vec<String>,

    /// File patterns to ignore
    #[clap(long, num_args = 1.., value_delimiter = ',')]
    pub ignore_files: Vec<String>,

    /// Patterns to ignore
    #[clap(long, num_args = 1.., value_delimiter = ',')]
    pub ignore_patterns: Vec<String>,

    /// File with one ignore pattern per line ('#' starts a comment)
    #[clap(long)]
    pub ignore_file: Option<PathBuf>,

    /// Directory patterns to include
    #[clap(long, num_args = 1.., value_delimiter = ',')]
    pub include_dirs: Vec<String>,

    /// File patterns to include
    #[clap(long, num_args = 1.., value_delimiter = ',')]
    pub include_files: Vec<String>,

    /// Patterns to include (if given, only matching paths are visited)
    #[clap(long, num_args = 1.., value_delimiter = ',')]
    pub include_patterns: Vec<String>,

    /// Directory the reports are written to
    #[clap(short = 'o', long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Model used for descriptions
    #[clap(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Increase log verbosity (-v debug, -vv trace)
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors and skip the summary
    #[clap(short = 'q', long)]
    pub quiet: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory to scan
    pub root_dir: PathBuf,

    /// Directory reports are written to
    pub output_dir: PathBuf,

    /// Include and ignore patterns (defaults already merged)
    pub patterns: PatternSet,

    /// Whether to run the content reporter
    pub python: bool,

    /// Whether to run the tree reporter
    pub tree: bool,

    /// Resolved API key; set only when descriptions were requested
    pub api_key: Option<String>,

    /// Optional prompt prefix for descriptions
    pub prompt: Option<String>,

    /// Model used for descriptions
    pub model: String,

    /// Suppress the end-of-run summary
    pub quiet: bool,
}

impl Config {
    /// Create configuration from command-line arguments.
    ///
    /// `env` looks up environment variables so callers decide where they
    /// come from; `main` passes `std::env::var`.
    pub fn from_args<F>(args: Args, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = if args.description {
            let key = resolve_api_key(args.api_key.as_deref(), env)?;
            tracing::info!("Description generation enabled.");
            Some(key)
        } else {
            None
        };

        let mut ignore: Vec<String> = DEFAULT_IGNORE.iter().map(|p| p.to_string()).collect();
        ignore.extend(args.ignore_patterns);
        ignore.extend(args.ignore_dirs);
        ignore.extend(args.ignore_files);
        if let Some(path) = &args.ignore_file {
            ignore.extend(read_ignore_file(path)?);
        }

        let mut include = args.include_patterns;
        include.extend(args.include_dirs);
        include.extend(args.include_files);

        tracing::debug!("Include patterns: {:?}", include);
        tracing::debug!("Ignore patterns: {:?}", ignore);

        Ok(Self {
            root_dir: args.root_dir,
            output_dir: args.output_dir,
            patterns: PatternSet::new(include, ignore)?,
            python: args.python,
            tree: args.tree,
            api_key,
            prompt: args.prompt,
            model: args.model,
            quiet: args.quiet,
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        crate::ensure!(
            self.root_dir.is_dir(),
            PathNotFound,
            "Root directory not found: {}",
            self.root_dir.display()
        );

        crate::ensure!(
            self.output_dir.is_dir(),
            PathNotFound,
            "Output directory not found: {}",
            self.output_dir.display()
        );

        Ok(())
    }
}

/// Pick the API key: explicit flag first, then the environment variables in order
pub fn resolve_api_key<F>(explicit: Option<&str>, env: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = explicit.filter(|k| !k.is_empty()) {
        tracing::info!("Using OpenAI API key provided via '--api' argument.");
        return Ok(key.to_string());
    }

    for var in API_KEY_ENV_VARS {
        if let Some(key) = env(var).filter(|k| !k.is_empty()) {
            tracing::info!("Using OpenAI API key from environment variable {}.", var);
            return Ok(key);
        }
    }

    Err(OverviewError::MissingApiKey)
}

/// Parse ignore-file text: one pattern per line, blanks and `#` comments skipped
pub fn parse_ignore_patterns(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Read patterns from an ignore file
pub fn read_ignore_file(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).map_err(|source| OverviewError::IgnoreFile {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(parse_ignore_patterns(&text))
}
