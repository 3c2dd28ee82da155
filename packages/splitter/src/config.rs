//! Plan file loading and validation.

use std::collections::HashSet;
use std::fs;
use std::path::{Component, Path};

use crate::error::{Result, SplitError};
use crate::splitting::{Pattern, ScanMode, SplitPlan};

/// Spaces per wrapper nesting level for derived closing braces.
pub const CLOSE_BRACE_INDENT: usize = 4;

/// Load and validate a partition plan from a YAML file.
pub fn load_plan(path: &Path) -> Result<SplitPlan> {
    let text = fs::read_to_string(path).map_err(|source| SplitError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let plan: SplitPlan = serde_yaml_ng::from_str(&text)?;
    validate_plan(&plan)?;
    Ok(plan)
}

/// Whether a partition file name stays inside the output directory.
fn is_safe_partition_path(file: &str) -> bool {
    let path = Path::new(file);
    !path.is_absolute()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Validate a partition plan.
///
/// A plan must have at least one partition; each partition needs a unique,
/// outdir-relative file name and at least one request; regex patterns must
/// compile; terminator and marker strings must be non-empty, as must each
/// substitution's `from`. Violations are fatal configuration errors,
/// reported before any source file is read.
pub fn validate_plan(plan: &SplitPlan) -> Result<()> {
    if plan.partitions.is_empty() {
        return Err(SplitError::EmptyPlan);
    }

    if plan.replace.iter().any(|s| s.from.is_empty()) {
        return Err(SplitError::EmptySubstitution);
    }

    let mut seen_files = HashSet::new();
    for partition in &plan.partitions {
        if !seen_files.insert(partition.file.as_str()) {
            return Err(SplitError::DuplicatePartition(partition.file.clone()));
        }
        if !is_safe_partition_path(&partition.file) {
            return Err(SplitError::UnsafePartitionPath(partition.file.clone()));
        }
        if partition.requests.is_empty() {
            return Err(SplitError::EmptyPartition(partition.file.clone()));
        }

        for request in &partition.requests {
            if request.regex {
                // Compile now so a bad pattern fails at plan load, not mid-run
                Pattern::regex(&request.pattern)?;
            }
            match &request.mode {
                ScanMode::Terminator(terminator) if terminator.is_empty() => {
                    return Err(SplitError::EmptyTerminator(partition.file.clone()));
                }
                ScanMode::StopBefore(marker) if marker.is_empty() => {
                    return Err(SplitError::EmptyMarker(partition.file.clone()));
                }
                _ => {}
            }
        }
    }

    Ok(())
}
