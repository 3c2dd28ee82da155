//! Types for the partition plan and extraction results.

use serde::{Deserialize, Serialize};

/// Where a request's top-to-bottom scan begins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStart {
    /// Start at the plan's origin anchor (document start when no origin is set).
    #[default]
    Origin,
    /// Start at the first line of the document.
    Start,
}

/// How a block's extent is determined once its starting line is located.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScanMode {
    /// Accumulate brace depth per line; the block ends where depth returns to
    /// zero after the first `{`.
    Brace,
    /// The block ends on the first line containing this literal terminator,
    /// regardless of brace balance. Used for data declarations like array
    /// initializers (`};`, `];`).
    Terminator(String),
    /// Brace-balance scan that additionally truncates the block on the line
    /// *before* the first line containing this literal marker, whichever
    /// comes first. Used to cut off trailing commentary attached to a
    /// declaration; the excluded close is supplied by the preamble's wrapper.
    StopBefore(String),
}

impl Default for ScanMode {
    fn default() -> Self {
        Self::Brace
    }
}

/// One extraction request: a signature pattern plus scanning behavior.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractRequest {
    /// Signature pattern matched against raw line text.
    pub pattern: String,

    /// Interpret `pattern` as a regular expression instead of a literal
    /// substring.
    #[serde(default)]
    pub regex: bool,

    /// Block extent scanning mode.
    #[serde(default, with = "serde_yaml_ng::with::singleton_map")]
    pub mode: ScanMode,

    /// When `true`, a missing pattern skips this request instead of
    /// aborting the run.
    #[serde(default)]
    pub optional: bool,

    /// Where the pattern scan begins.
    #[serde(default, rename = "from")]
    pub scan_from: ScanStart,
}

impl ExtractRequest {
    /// Create a literal-pattern request with default scanning behavior.
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            regex: false,
            mode: ScanMode::default(),
            optional: false,
            scan_from: ScanStart::default(),
        }
    }

    /// Interpret the pattern as a regular expression.
    #[must_use]
    pub fn with_regex(mut self, regex: bool) -> Self {
        self.regex = regex;
        self
    }

    /// Set the scanning mode.
    #[must_use]
    pub fn with_mode(mut self, mode: ScanMode) -> Self {
        self.mode = mode;
        self
    }

    /// Mark the request as optional.
    #[must_use]
    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    /// Set where the pattern scan begins.
    #[must_use]
    pub fn with_scan_from(mut self, scan_from: ScanStart) -> Self {
        self.scan_from = scan_from;
        self
    }
}

/// A literal text substitution applied to the loaded source before any
/// pattern is located.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Substitution {
    /// Literal text to replace.
    pub from: String,

    /// Replacement text.
    pub to: String,
}

impl Substitution {
    /// Create a substitution.
    #[must_use]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// A named output partition: preamble plus an ordered list of requests.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PartitionSpec {
    /// Output file name, relative to the output directory.
    pub file: String,

    /// Header lines prepended to the partition (imports + namespace/class
    /// opens). The composer derives the matching close from the net brace
    /// balance of these lines.
    #[serde(default)]
    pub preamble: Vec<String>,

    /// Extraction requests, executed in order.
    pub requests: Vec<ExtractRequest>,
}

impl PartitionSpec {
    /// Create a partition with no preamble and no requests.
    #[must_use]
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            preamble: Vec::new(),
            requests: Vec::new(),
        }
    }

    /// Set the preamble lines.
    #[must_use]
    pub fn with_preamble(mut self, lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.preamble = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Append an extraction request.
    #[must_use]
    pub fn with_request(mut self, request: ExtractRequest) -> Self {
        self.requests.push(request);
        self
    }
}

/// The full partition plan: an ordered sequence of partitions plus an
/// optional origin anchor.
///
/// Partition order is a `Vec` so re-running the same plan against the same
/// document produces byte-identical output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SplitPlan {
    /// Literal pattern whose first match becomes the default scan start for
    /// requests with `from: origin`. Typically the containing class
    /// declaration.
    #[serde(default)]
    pub origin: Option<String>,

    /// Literal substitutions applied to the source before splitting, in
    /// order. Every output file sees the rewritten text.
    #[serde(default)]
    pub replace: Vec<Substitution>,

    /// Partitions in output order.
    pub partitions: Vec<PartitionSpec>,
}

impl SplitPlan {
    /// Create an empty plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the origin anchor pattern.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Append a substitution.
    #[must_use]
    pub fn with_replace(mut self, substitution: Substitution) -> Self {
        self.replace.push(substitution);
        self
    }

    /// Append a partition.
    #[must_use]
    pub fn with_partition(mut self, partition: PartitionSpec) -> Self {
        self.partitions.push(partition);
        self
    }
}

/// A contiguous, inclusive line range extracted from the source document.
///
/// Valid only if its internal brace/terminator scan closed; the scan
/// functions never construct one otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedBlock {
    /// 0-based inclusive start line.
    pub start: usize,

    /// 0-based inclusive end line.
    pub end: usize,

    /// Concatenated text of the range.
    pub text: String,
}

impl ExtractedBlock {
    /// Whether this block's line range overlaps another's.
    #[must_use]
    pub fn overlaps(&self, other: &ExtractedBlock) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}
