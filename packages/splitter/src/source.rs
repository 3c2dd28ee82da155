//! Immutable source document loading.
//!
//! The document is loaded once at process start and passed by reference
//! into every component; nothing in the pipeline mutates it.

use std::fs;
use std::path::Path;

use crate::error::{Result, SplitError};
use crate::splitting::Substitution;

/// An immutable, ordered sequence of source lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    lines: Vec<String>,
}

impl SourceDocument {
    /// Load a source file fully into memory as line-oriented text.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| SplitError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_text(&text))
    }

    /// Build a document from already-loaded text.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(String::from).collect(),
        }
    }

    /// Return a new document with each substitution's `from` replaced by
    /// its `to` on every line, applied in order.
    ///
    /// Rewriting happens once, before any pattern is located, so every
    /// partition sees the same rewritten text. The original document is
    /// untouched.
    #[must_use]
    pub fn substituted(&self, substitutions: &[Substitution]) -> Self {
        if substitutions.is_empty() {
            return self.clone();
        }
        let lines = self
            .lines
            .iter()
            .map(|line| {
                let mut line = line.clone();
                for substitution in substitutions {
                    if line.contains(&substitution.from) {
                        line = line.replace(&substitution.from, &substitution.to);
                    }
                }
                line
            })
            .collect();
        Self { lines }
    }

    /// All lines in order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Line at a 0-based index, if it exists.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the document has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Concatenated text of an inclusive 0-based line range.
    ///
    /// Returns `None` if the range falls outside the document.
    #[must_use]
    pub fn range_text(&self, start: usize, end: usize) -> Option<String> {
        if start > end || end >= self.lines.len() {
            return None;
        }
        Some(self.lines[start..=end].join("\n"))
    }
}
