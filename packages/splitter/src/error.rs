//! Error types for the splitter.
//!
//! Every fatal condition aborts the whole run before any output file is
//! written; the only non-fatal condition is an optional pattern's absence,
//! which is handled inside the engine and never surfaces here.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the splitter library.
#[derive(Debug, Error)]
pub enum SplitError {
    /// A required declaration pattern was not located.
    #[error("Pattern not found: '{pattern}' (partition '{partition}')")]
    PatternNotFound { pattern: String, partition: String },

    /// The plan's origin anchor pattern was not located.
    #[error("Origin pattern not found: '{0}'")]
    OriginNotFound(String),

    /// A brace-balance or terminator scan ran past end-of-input.
    #[error(
        "Unbalanced block for '{pattern}' starting at line {start_line} \
         (partition '{partition}'): end of input reached before the block closed"
    )]
    UnbalancedBlock {
        pattern: String,
        partition: String,
        /// 1-based line number where the scan started.
        start_line: usize,
    },

    /// IO error, surfaced with the offending path.
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Plan file could not be deserialized.
    #[error("Failed to parse plan: {0}")]
    PlanParse(#[from] serde_yaml_ng::Error),

    /// A request's regex pattern does not compile.
    #[error("Invalid regex pattern '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The plan declares no partitions.
    #[error("Plan contains no partitions")]
    EmptyPlan,

    /// A partition declares no extraction requests.
    #[error("Partition '{0}' has no extraction requests")]
    EmptyPartition(String),

    /// Two partitions share the same output file name.
    #[error("Duplicate partition file name: '{0}'")]
    DuplicatePartition(String),

    /// A terminator-mode request has an empty terminator string.
    #[error("Empty terminator string in partition '{0}'")]
    EmptyTerminator(String),

    /// A stop-before request has an empty marker string.
    #[error("Empty stop-before marker in partition '{0}'")]
    EmptyMarker(String),

    /// A substitution has an empty `from` string.
    #[error("Substitution with empty 'from' text")]
    EmptySubstitution,

    /// A partition file name would resolve outside the output directory.
    #[error("Partition file name escapes the output directory: '{0}'")]
    UnsafePartitionPath(String),
}

/// Result type alias for splitter operations.
pub type Result<T> = std::result::Result<T, SplitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_not_found_display() {
        let err = SplitError::PatternNotFound {
            pattern: "public static void Foo".to_string(),
            partition: "Processor.Accept.cs".to_string(),
        };
        assert!(err.to_string().contains("public static void Foo"));
        assert!(err.to_string().contains("Processor.Accept.cs"));
    }

    #[test]
    fn test_unbalanced_block_display() {
        let err = SplitError::UnbalancedBlock {
            pattern: "void Broken".to_string(),
            partition: "Out.cs".to_string(),
            start_line: 12,
        };
        assert!(err.to_string().contains("line 12"));
        assert!(err.to_string().contains("end of input"));
    }

    #[test]
    fn test_io_display_includes_path() {
        let err = SplitError::Io {
            path: PathBuf::from("/tmp/missing.cs"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().contains("/tmp/missing.cs"));
    }
}
