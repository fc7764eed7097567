//! Ignore-rule filtering for the sync work tree
//!
//! One rule per non-comment line of the ignore file, compiled as a regular
//! expression and matched against work-root-relative paths with forward-slash
//! separators. The rule set is immutable once loaded for a run.

use std::path::Path;

use regex::Regex;
use tracing::debug;

use crate::{Error, Result};

/// File name of the ignore file at the work root.
pub const IGNORE_FILE: &str = ".appsyncignore";

/// Content written when no ignore file exists yet.
const DEFAULT_IGNORE: &str = "# Files not to sync\n/node_modules/\n/dist/";

/// Compiled ignore rules applied to relative paths.
#[derive(Debug)]
pub struct IgnoreFilter {
    rules: Vec<Regex>,
}

impl IgnoreFilter {
    /// Parse ignore-file contents into a filter.
    ///
    /// Blank lines and lines starting with `#` are skipped; every other line
    /// must compile as a regular expression.
    pub fn parse(content: &str) -> Result<Self> {
        let mut rules = Vec::new();
        for line in content.lines() {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let rule = Regex::new(line).map_err(|e| Error::IgnoreRule {
                rule: line.to_string(),
                message: e.to_string(),
            })?;
            rules.push(rule);
        }
        Ok(Self { rules })
    }

    /// Load the ignore file at `path`, creating it with default rules if
    /// absent. Any other I/O failure propagates.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "creating default ignore file");
                std::fs::write(path, DEFAULT_IGNORE).map_err(|e| Error::io(path, e))?;
                DEFAULT_IGNORE.to_string()
            }
            Err(e) => return Err(Error::io(path, e)),
        };
        Self::parse(&content)
    }

    /// Whether a work-root-relative path matches any ignore rule.
    ///
    /// Backslashes are normalized to forward slashes and leading separators
    /// stripped before matching.
    pub fn is_ignored(&self, path: &str) -> bool {
        let normalized = path.replace('\\', "/");
        let relative = normalized.trim_start_matches('/');
        self.rules.iter().any(|rule| rule.is_match(relative))
    }

    /// Logical negation of [`is_ignored`](Self::is_ignored), for use as a
    /// listing predicate.
    pub fn is_kept(&self, path: &str) -> bool {
        !self.is_ignored(path)
    }
}
