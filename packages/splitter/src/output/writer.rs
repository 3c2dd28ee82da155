//! Partition file writing.
//!
//! Called only after every partition has composed, so a failed run never
//! leaves partial output. Each individual write uses the atomic pattern:
//! temp file in the destination directory, sync to disk, then rename.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::compose::ComposedPartition;
use crate::error::{Result, SplitError};

/// Size metrics for one written partition file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    /// Path the partition was written to.
    pub path: PathBuf,

    /// Number of lines written.
    pub lines: usize,
}

fn io_error(path: &Path, source: std::io::Error) -> SplitError {
    SplitError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Write one composed partition under `outdir`.
fn write_partition(partition: &ComposedPartition, outdir: &Path) -> Result<WriteReport> {
    let output_file = outdir.join(&partition.file);

    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }

    let file_name = output_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| partition.file.clone());
    let temp_file = output_file.with_file_name(format!(".{file_name}.tmp"));

    // Write to temp file first, then sync and rename for atomicity
    {
        let mut file = File::create(&temp_file).map_err(|e| io_error(&temp_file, e))?;
        file.write_all(partition.content.as_bytes())
            .map_err(|e| io_error(&temp_file, e))?;
        file.sync_all().map_err(|e| io_error(&temp_file, e))?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if output_file.exists() {
        fs::remove_file(&output_file).map_err(|e| io_error(&output_file, e))?;
    }

    fs::rename(&temp_file, &output_file).map_err(|e| io_error(&output_file, e))?;

    Ok(WriteReport {
        path: output_file,
        lines: partition.content.lines().count(),
    })
}

/// Write all composed partitions, returning one report per file in order.
pub fn write_partitions(
    partitions: &[ComposedPartition],
    outdir: &Path,
) -> Result<Vec<WriteReport>> {
    fs::create_dir_all(outdir).map_err(|e| io_error(outdir, e))?;

    let mut reports = Vec::with_capacity(partitions.len());
    for partition in partitions {
        let report = write_partition(partition, outdir)?;
        tracing::debug!(
            path = %report.path.display(),
            lines = report.lines,
            "Wrote partition"
        );
        reports.push(report);
    }
    Ok(reports)
}
