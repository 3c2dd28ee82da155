//! srcsplit - Structural source splitter.
//!
//! Locates named declarations inside one monolithic brace-delimited source
//! file and partitions them into several cohesive output files, using
//! signature-pattern search plus brace-depth balance scanning to find each
//! declaration's extent.
//!
//! # Example
//!
//! ```
//! use srcsplit::source::SourceDocument;
//! use srcsplit::splitting::{ExtractRequest, PartitionSpec, SplitEngine, SplitPlan};
//!
//! let doc = SourceDocument::from_text("void Foo() { bar(); }");
//! let plan = SplitPlan::new().with_partition(
//!     PartitionSpec::new("foo.cs").with_request(ExtractRequest::new("void Foo")),
//! );
//!
//! let bodies = SplitEngine::new(&doc).run(&plan).unwrap();
//! assert_eq!(bodies[0].fragments[0].text, "void Foo() { bar(); }");
//! ```
//!
//! # Architecture
//!
//! A linear, single-threaded pipeline:
//!
//! - [`source`]: immutable source document loading
//! - [`config`]: plan file loading and validation
//! - [`error`]: error types and Result alias
//! - [`splitting`]: pattern location, block scanning, partition planning
//! - [`output`]: preamble composition and all-or-nothing file writing
//! - [`cli`]: command-line interface
//!
//! Matching operates on raw line text; it does not distinguish matches
//! inside string literals or comments from real declarations.

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod source;
pub mod splitting;

// Re-export commonly used items
pub use config::{load_plan, validate_plan};
pub use error::{Result, SplitError};
pub use source::SourceDocument;
pub use splitting::{ExtractRequest, PartitionSpec, ScanMode, SplitEngine, SplitPlan, Substitution};
