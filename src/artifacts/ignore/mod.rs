//! Ignore rules
//!
//! The ignore file at the repository root lists one glob per line. Blank lines
//! and `#` comments are skipped. Rules are evaluated in file order and the last
//! one that matches decides, so a later `!keep.log` re-includes a path an earlier
//! `*.log` excluded.

pub mod ignore_rule;

use crate::artifacts::ignore::ignore_rule::IgnoreRule;
use crate::errors::{IoResultExt, Result};
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct IgnoreMatcher {
    rules: Vec<IgnoreRule>,
}

impl IgnoreMatcher {
    pub fn new(rules: Vec<IgnoreRule>) -> Self {
        IgnoreMatcher { rules }
    }

    /// Load rules from `path`; a missing file yields an empty matcher.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).with_path(path)?;
        Ok(Self::parse(&content))
    }

    /// Parse ignore file content. Malformed globs are skipped with a warning.
    pub fn parse(content: &str) -> Self {
        let rules = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| match IgnoreRule::parse(line) {
                Ok(rule) => rule,
                Err(error) => {
                    tracing::warn!(%error, "skipping ignore rule");
                    None
                }
            })
            .collect();

        Self::new(rules)
    }

    pub fn rules(&self) -> &[IgnoreRule] {
        &self.rules
    }

    /// Whether `relative_path` (`/`-separated, relative to the root) is ignored.
    pub fn is_ignored(&self, relative_path: &str, is_dir: bool) -> bool {
        if relative_path == "." || relative_path.is_empty() {
            return false;
        }

        self.rules
            .iter()
            .filter(|rule| !rule.is_dir_only() || is_dir)
            .filter(|rule| rule.matches(relative_path))
            .last()
            .is_some_and(|rule| !rule.is_negated())
    }
}
