//! Structural splitting system.
//!
//! Locates named declarations by signature pattern, scans their brace- or
//! terminator-bounded extent, and groups them into partitions per the plan.

mod engine;
mod pattern;
mod scan;
mod types;

pub use engine::{PartitionBody, SplitEngine};
pub use pattern::{locate, Pattern};
pub use scan::extract_block;
pub use types::{
    ExtractRequest, ExtractedBlock, PartitionSpec, ScanMode, ScanStart, SplitPlan, Substitution,
};
