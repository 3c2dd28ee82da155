//! Partition composition: preamble, fragment joining, derived close.

use crate::config::CLOSE_BRACE_INDENT;
use crate::splitting::PartitionBody;

/// A fully composed partition, ready for writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedPartition {
    /// Output file name, relative to the output directory.
    pub file: String,

    /// Final serialized text, newline-terminated.
    pub content: String,
}

/// Count the closing braces the preamble's net opens require.
fn wrapper_depth(preamble: &[String]) -> usize {
    let balance: i64 = preamble
        .iter()
        .map(|line| line.matches('{').count() as i64 - line.matches('}').count() as i64)
        .sum();
    usize::try_from(balance).unwrap_or(0)
}

/// Wrap a partition body with its preamble and the matching close.
///
/// The first fragment follows the preamble directly; subsequent fragments
/// are separated by a single blank line, in request order. The wrapper's
/// brace bookkeeping is independent of the extractor's: exactly as many
/// closing braces are emitted as the preamble opened, even when no request
/// produced a fragment. Extracted content is trusted to be self-balanced.
#[must_use]
pub fn compose(body: &PartitionBody) -> ComposedPartition {
    let mut lines: Vec<String> = body.preamble.clone();

    for (index, fragment) in body.fragments.iter().enumerate() {
        if index > 0 {
            lines.push(String::new());
        }
        lines.extend(fragment.text.lines().map(String::from));
    }

    let depth = wrapper_depth(&body.preamble);
    for level in (0..depth).rev() {
        lines.push(format!("{}{}", " ".repeat(level * CLOSE_BRACE_INDENT), '}'));
    }

    let mut content = lines.join("\n");
    content.push('\n');

    ComposedPartition {
        file: body.file.clone(),
        content,
    }
}
