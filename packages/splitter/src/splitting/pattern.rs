//! Declaration pattern matching and location.
//!
//! Matching operates on raw line text; matches inside string literals or
//! comments are not distinguished from real declarations. Known limitation.

use regex::Regex;

use super::types::ExtractRequest;
use crate::error::{Result, SplitError};
use crate::source::SourceDocument;

/// A compiled matching rule for a declaration's starting line.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Matches any line containing this substring.
    Literal(String),
    /// Matches any line the regex finds a match in.
    Regex(Regex),
}

impl Pattern {
    /// Create a literal substring pattern.
    #[must_use]
    pub fn literal(pattern: impl Into<String>) -> Self {
        Self::Literal(pattern.into())
    }

    /// Compile a regex pattern.
    pub fn regex(pattern: &str) -> Result<Self> {
        let compiled = Regex::new(pattern).map_err(|source| SplitError::InvalidRegex {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self::Regex(compiled))
    }

    /// Build the pattern an extraction request describes.
    pub fn from_request(request: &ExtractRequest) -> Result<Self> {
        if request.regex {
            Self::regex(&request.pattern)
        } else {
            Ok(Self::literal(&request.pattern))
        }
    }

    /// Whether a line matches this pattern.
    #[must_use]
    pub fn matches(&self, line: &str) -> bool {
        match self {
            Self::Literal(needle) => line.contains(needle),
            Self::Regex(re) => re.is_match(line),
        }
    }

    /// The original pattern text, for diagnostics.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal(s) => s,
            Self::Regex(re) => re.as_str(),
        }
    }
}

/// Find the first line at or after `from_line` matching the pattern.
///
/// Single top-to-bottom scan; first match wins; lines before `from_line`
/// are never considered.
#[must_use]
pub fn locate(doc: &SourceDocument, pattern: &Pattern, from_line: usize) -> Option<usize> {
    doc.lines()
        .iter()
        .enumerate()
        .skip(from_line)
        .find(|(_, line)| pattern.matches(line))
        .map(|(index, _)| index)
}
