//! Include/ignore pattern matching for traversal decisions
//!
//! Patterns are shell-style globs where `*` also crosses `/`, so a pattern
//! like `*/generated.py` matches at any depth of the relative path.

use std::path::Path;

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};

use crate::error::{OverviewError, Result};

/// Include and ignore glob patterns for a scan, compiled once
#[derive(Debug, Clone)]
pub struct PatternSet {
    include: Vec<String>,
    ignore: Vec<String>,
    include_set: GlobSet,
    ignore_set: GlobSet,
}

impl Default for PatternSet {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            ignore: Vec::new(),
            include_set: GlobSet::empty(),
            ignore_set: GlobSet::empty(),
        }
    }
}

impl PatternSet {
    /// Compile include and ignore lists; fails on a malformed pattern
    pub fn new(include: Vec<String>, ignore: Vec<String>) -> Result<Self> {
        let include_set = compile(&include)?;
        let ignore_set = compile(&ignore)?;

        Ok(Self {
            include,
            ignore,
            include_set,
            ignore_set,
        })
    }

    /// Patterns a path must match to be visited (empty means everything)
    pub fn include(&self) -> &[String] {
        &self.include
    }

    /// Patterns that exclude a path, evaluated after `include`
    pub fn ignore(&self) -> &[String] {
        &self.ignore
    }

    /// Check whether `path` under `root` should be visited.
    ///
    /// Every pattern is tried against both the root-relative path and the
    /// base name. The scan root itself always passes so traversal can start,
    /// and an ignore match wins over an include match.
    pub fn should_process(&self, path: &Path, root: &Path) -> bool {
        let rel_path = path.strip_prefix(root).unwrap_or(path);

        if rel_path.as_os_str().is_empty() || rel_path == Path::new(".") {
            return true;
        }

        let base_name = path.file_name().map(Path::new).unwrap_or(rel_path);
        let matches = |set: &GlobSet| set.is_match(rel_path) || set.is_match(base_name);

        if !self.include.is_empty() && !matches(&self.include_set) {
            return false;
        }

        !matches(&self.ignore_set)
    }
}

/// One-off form of [`PatternSet::should_process`] over raw pattern lists
pub fn should_process<S: AsRef<str>>(
    path: &Path,
    root: &Path,
    include_patterns: &[S],
    ignore_patterns: &[S],
) -> Result<bool> {
    let include = owned_patterns(include_patterns);
    let ignore = owned_patterns(ignore_patterns);
    let set = PatternSet::new(include, ignore)?;
    Ok(set.should_process(path, root))
}

fn owned_patterns<S: AsRef<str>>(patterns: &[S]) -> Vec<String> {
    patterns.iter().map(|p| p.as_ref().to_string()).collect()
}

// fnmatch-style: `*` crosses separators, backslash is a literal
fn glob(pattern: &str) -> Result<Glob> {
    GlobBuilder::new(pattern)
        .literal_separator(false)
        .backslash_escape(false)
        .build()
        .map_err(|source| OverviewError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

fn compile(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(glob(pattern)?);
    }

    builder
        .build()
        .map_err(|e| OverviewError::Config(format!("Failed to compile patterns: {}", e)))
}
