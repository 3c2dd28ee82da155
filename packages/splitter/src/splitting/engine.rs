//! Split engine that runs a partition plan against a source document.

use super::pattern::{locate, Pattern};
use super::scan::extract_block;
use super::types::{ExtractedBlock, PartitionSpec, ScanStart, SplitPlan};
use crate::error::{Result, SplitError};
use crate::source::SourceDocument;

/// A fully planned partition: its spec's identity plus the extracted
/// fragments in request order, ready for composition.
#[derive(Debug, Clone)]
pub struct PartitionBody {
    /// Output file name from the partition spec.
    pub file: String,

    /// Preamble lines from the partition spec.
    pub preamble: Vec<String>,

    /// Extracted blocks in request order.
    pub fragments: Vec<ExtractedBlock>,
}

/// Engine that executes a `SplitPlan` over an immutable source document.
///
/// Planning is a pure function of the document and the plan: the same
/// inputs always produce identical bodies, and any required-request failure
/// aborts the entire run before anything is written.
pub struct SplitEngine<'a> {
    doc: &'a SourceDocument,
}

impl<'a> SplitEngine<'a> {
    /// Create an engine over a loaded document.
    #[must_use]
    pub fn new(doc: &'a SourceDocument) -> Self {
        Self { doc }
    }

    /// Run the full plan, producing one body per partition in plan order.
    pub fn run(&self, plan: &SplitPlan) -> Result<Vec<PartitionBody>> {
        let origin_line = self.resolve_origin(plan)?;

        let mut bodies = Vec::with_capacity(plan.partitions.len());
        for partition in &plan.partitions {
            bodies.push(self.run_partition(partition, origin_line)?);
        }

        warn_on_overlaps(&bodies);
        Ok(bodies)
    }

    /// Resolve the plan's origin anchor to a line index.
    ///
    /// Without an origin, `from: origin` requests scan from the document
    /// start.
    fn resolve_origin(&self, plan: &SplitPlan) -> Result<usize> {
        let Some(origin) = plan.origin.as_deref() else {
            return Ok(0);
        };
        locate(self.doc, &Pattern::literal(origin), 0)
            .ok_or_else(|| SplitError::OriginNotFound(origin.to_string()))
    }

    /// Execute one partition's requests in order.
    fn run_partition(&self, spec: &PartitionSpec, origin_line: usize) -> Result<PartitionBody> {
        let mut fragments = Vec::new();

        for request in &spec.requests {
            let pattern = Pattern::from_request(request)?;
            let from_line = match request.scan_from {
                ScanStart::Origin => origin_line,
                ScanStart::Start => 0,
            };

            match locate(self.doc, &pattern, from_line) {
                Some(line) => {
                    let block = extract_block(self.doc, line, &request.mode).ok_or_else(|| {
                        SplitError::UnbalancedBlock {
                            pattern: request.pattern.clone(),
                            partition: spec.file.clone(),
                            start_line: line + 1,
                        }
                    })?;
                    fragments.push(block);
                }
                None if request.optional => {
                    tracing::info!(
                        pattern = %request.pattern,
                        partition = %spec.file,
                        "Optional pattern not found, skipping request"
                    );
                }
                None => {
                    return Err(SplitError::PatternNotFound {
                        pattern: request.pattern.clone(),
                        partition: spec.file.clone(),
                    });
                }
            }
        }

        Ok(PartitionBody {
            file: spec.file.clone(),
            preamble: spec.preamble.clone(),
            fragments,
        })
    }
}

/// Warn when two partitions claimed overlapping source ranges.
///
/// Fan-out of the same declaration into several partitions is supported and
/// intentional, so this never fails the run; the warning makes accidental
/// duplication visible.
fn warn_on_overlaps(bodies: &[PartitionBody]) {
    for (i, first) in bodies.iter().enumerate() {
        for second in &bodies[i + 1..] {
            let overlap = first.fragments.iter().find_map(|a| {
                second
                    .fragments
                    .iter()
                    .find(|b| a.overlaps(b))
                    .map(|b| (a, b))
            });
            if let Some((a, b)) = overlap {
                tracing::warn!(
                    first = %first.file,
                    second = %second.file,
                    first_lines = ?(a.start + 1, a.end + 1),
                    second_lines = ?(b.start + 1, b.end + 1),
                    "Partitions share overlapping source lines"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splitting::types::{ExtractRequest, ScanMode};
    use pretty_assertions::assert_eq;

    const SOURCE: &str = "\
using System;

public class Processor
{
    public static void Accept()
    {
        Inner();
    }

    private static void Reject()
    {
        if (flag)
        {
            Other();
        }
    }

    private static readonly int[] Order =
    {
        1,
        2,
    };
}

internal class Helper
{
    void Assist() { }
}";

    fn doc() -> SourceDocument {
        SourceDocument::from_text(SOURCE)
    }

    #[test]
    fn test_run_single_partition_in_request_order() {
        let plan = SplitPlan::new().with_partition(
            PartitionSpec::new("Out.cs")
                .with_request(ExtractRequest::new("private static void Reject"))
                .with_request(ExtractRequest::new("public static void Accept")),
        );

        let doc = doc();
        let bodies = SplitEngine::new(&doc).run(&plan).unwrap();

        assert_eq!(bodies.len(), 1);
        let fragments = &bodies[0].fragments;
        assert_eq!(fragments.len(), 2);
        // Request order is preserved even though Accept comes first in the
        // source.
        assert!(fragments[0].text.contains("Reject"));
        assert!(fragments[1].text.contains("Accept"));
    }

    #[test]
    fn test_run_terminator_request() {
        let plan = SplitPlan::new().with_partition(
            PartitionSpec::new("Out.cs").with_request(
                ExtractRequest::new("int[] Order =")
                    .with_mode(ScanMode::Terminator("};".to_string())),
            ),
        );

        let doc = doc();
        let bodies = SplitEngine::new(&doc).run(&plan).unwrap();
        let block = &bodies[0].fragments[0];
        assert!(block.text.starts_with("    private static readonly int[] Order ="));
        assert!(block.text.ends_with("};"));
    }

    #[test]
    fn test_run_required_pattern_missing_is_fatal() {
        let plan = SplitPlan::new()
            .with_partition(
                PartitionSpec::new("First.cs")
                    .with_request(ExtractRequest::new("public static void Accept")),
            )
            .with_partition(
                PartitionSpec::new("Second.cs").with_request(ExtractRequest::new("NoSuchMethod")),
            );

        let doc = doc();
        let err = SplitEngine::new(&doc).run(&plan).unwrap_err();
        match err {
            SplitError::PatternNotFound { pattern, partition } => {
                assert_eq!(pattern, "NoSuchMethod");
                assert_eq!(partition, "Second.cs");
            }
            other => panic!("expected PatternNotFound, got {other}"),
        }
    }

    #[test]
    fn test_run_optional_pattern_missing_is_skipped() {
        let plan = SplitPlan::new().with_partition(
            PartitionSpec::new("Out.cs")
                .with_request(ExtractRequest::new("NoSuchMethod").with_optional(true))
                .with_request(ExtractRequest::new("public static void Accept")),
        );

        let doc = doc();
        let bodies = SplitEngine::new(&doc).run(&plan).unwrap();
        assert_eq!(bodies[0].fragments.len(), 1);
        assert!(bodies[0].fragments[0].text.contains("Accept"));
    }

    #[test]
    fn test_run_unbalanced_block_is_fatal() {
        let doc = SourceDocument::from_text("void Broken()\n{\n    x();");
        let plan = SplitPlan::new().with_partition(
            PartitionSpec::new("Out.cs").with_request(ExtractRequest::new("void Broken")),
        );

        let err = SplitEngine::new(&doc).run(&plan).unwrap_err();
        match err {
            SplitError::UnbalancedBlock {
                pattern,
                partition,
                start_line,
            } => {
                assert_eq!(pattern, "void Broken");
                assert_eq!(partition, "Out.cs");
                assert_eq!(start_line, 1);
            }
            other => panic!("expected UnbalancedBlock, got {other}"),
        }
    }

    #[test]
    fn test_run_origin_anchors_scan() {
        // "void Assist" only exists after the origin; "using System" only
        // before it. With the origin set, origin-relative requests must not
        // see lines above it.
        let plan = SplitPlan::new()
            .with_origin("internal class Helper")
            .with_partition(
                PartitionSpec::new("Out.cs")
                    .with_request(ExtractRequest::new("using System").with_optional(true))
                    .with_request(ExtractRequest::new("void Assist")),
            );

        let doc = doc();
        let bodies = SplitEngine::new(&doc).run(&plan).unwrap();
        assert_eq!(bodies[0].fragments.len(), 1);
        assert!(bodies[0].fragments[0].text.contains("Assist"));
    }

    #[test]
    fn test_run_from_start_overrides_origin() {
        let plan = SplitPlan::new()
            .with_origin("internal class Helper")
            .with_partition(
                PartitionSpec::new("Out.cs").with_request(
                    ExtractRequest::new("public static void Accept")
                        .with_scan_from(ScanStart::Start),
                ),
            );

        let doc = doc();
        let bodies = SplitEngine::new(&doc).run(&plan).unwrap();
        assert_eq!(bodies[0].fragments.len(), 1);
    }

    #[test]
    fn test_run_missing_origin_is_fatal() {
        let plan = SplitPlan::new()
            .with_origin("class DoesNotExist")
            .with_partition(
                PartitionSpec::new("Out.cs")
                    .with_request(ExtractRequest::new("public static void Accept")),
            );

        let doc = doc();
        let err = SplitEngine::new(&doc).run(&plan).unwrap_err();
        assert!(matches!(err, SplitError::OriginNotFound(_)));
    }

    #[test]
    fn test_run_is_deterministic() {
        let plan = SplitPlan::new().with_partition(
            PartitionSpec::new("Out.cs")
                .with_request(ExtractRequest::new("public static void Accept"))
                .with_request(ExtractRequest::new("private static void Reject")),
        );

        let doc = doc();
        let engine = SplitEngine::new(&doc);
        let first = engine.run(&plan).unwrap();
        let second = engine.run(&plan).unwrap();
        assert_eq!(first[0].fragments, second[0].fragments);
    }

    #[test]
    fn test_run_same_declaration_fans_out_to_both_partitions() {
        // Two partitions may request the same declaration; the run succeeds
        // and each body carries its own copy of the block.
        let plan = SplitPlan::new()
            .with_partition(
                PartitionSpec::new("First.cs")
                    .with_request(ExtractRequest::new("public static void Accept")),
            )
            .with_partition(
                PartitionSpec::new("Second.cs")
                    .with_request(ExtractRequest::new("public static void Accept")),
            );

        let doc = doc();
        let bodies = SplitEngine::new(&doc).run(&plan).unwrap();

        assert_eq!(bodies.len(), 2);
        let a = &bodies[0].fragments[0];
        let b = &bodies[1].fragments[0];
        assert!(a.text.contains("Accept"));
        assert!(b.text.contains("Accept"));
        assert_eq!((a.start, a.end), (b.start, b.end));
        assert!(a.overlaps(b));
    }

    #[test]
    fn test_disjoint_partitions_do_not_overlap() {
        let plan = SplitPlan::new()
            .with_partition(
                PartitionSpec::new("First.cs")
                    .with_request(ExtractRequest::new("public static void Accept")),
            )
            .with_partition(
                PartitionSpec::new("Second.cs")
                    .with_request(ExtractRequest::new("private static void Reject")),
            );

        let doc = doc();
        let bodies = SplitEngine::new(&doc).run(&plan).unwrap();
        let a = &bodies[0].fragments[0];
        let b = &bodies[1].fragments[0];
        assert!(!a.overlaps(b));
    }
}
