//! Block extent scanning.
//!
//! One forward scan primitive parameterized by a stop rule covers both
//! scanning modes: brace-depth balance and literal terminator.

use super::types::{ExtractedBlock, ScanMode};
use crate::source::SourceDocument;

/// Per-line verdict of a stop rule.
enum Verdict {
    /// Keep scanning.
    Continue,
    /// The block ends on this line, inclusive.
    EndOn,
    /// The block ends on the previous line; this line is excluded.
    EndBefore,
}

/// Scan forward from `start` until the stop rule fires, returning the
/// inclusive block. `None` when end-of-input is reached first, or when an
/// `EndBefore` verdict fires on the starting line itself.
fn scan_with<F>(doc: &SourceDocument, start: usize, mut rule: F) -> Option<ExtractedBlock>
where
    F: FnMut(&str) -> Verdict,
{
    for index in start..doc.len() {
        let line = doc.line(index)?;
        let end = match rule(line) {
            Verdict::Continue => continue,
            Verdict::EndOn => index,
            Verdict::EndBefore => {
                if index == start {
                    return None;
                }
                index - 1
            }
        };
        let text = doc.range_text(start, end)?;
        return Some(ExtractedBlock { start, end, text });
    }
    None
}

/// Brace-depth stop rule: depth accumulates `count('{') - count('}')` per
/// line, starting on the first line containing `{`; ends where depth returns
/// to exactly zero.
fn brace_rule() -> impl FnMut(&str) -> Verdict {
    let mut depth: i64 = 0;
    let mut started = false;
    move |line| {
        let opens = line.matches('{').count() as i64;
        let closes = line.matches('}').count() as i64;
        if opens > 0 {
            started = true;
        }
        if !started {
            return Verdict::Continue;
        }
        depth += opens - closes;
        if depth == 0 {
            Verdict::EndOn
        } else {
            Verdict::Continue
        }
    }
}

/// Find the full extent of one declaration starting at `start`.
///
/// Brace mode ends where brace depth returns to zero. Terminator mode ends
/// on the first line containing the terminator, regardless of brace balance.
/// Stop-before mode is a brace scan truncated on the line before the first
/// marker line, whichever comes first.
///
/// The scan never mutates the document. `None` means the block never closed.
#[must_use]
pub fn extract_block(doc: &SourceDocument, start: usize, mode: &ScanMode) -> Option<ExtractedBlock> {
    match mode {
        ScanMode::Brace => scan_with(doc, start, brace_rule()),
        ScanMode::Terminator(terminator) => scan_with(doc, start, |line| {
            if line.contains(terminator) {
                Verdict::EndOn
            } else {
                Verdict::Continue
            }
        }),
        ScanMode::StopBefore(marker) => {
            let mut balance = brace_rule();
            scan_with(doc, start, move |line| {
                if line.contains(marker) {
                    Verdict::EndBefore
                } else {
                    balance(line)
                }
            })
        }
    }
}
