//! # Rewrite Assembler
//!
//! Interleaves verbatim source (with stale ranges excluded) and replacement
//! tokens, then appends the canonical definition block. Each replacement
//! runs the same three steps: copy the gap, emit the token, advance. The
//! tail is copied once at the end and the definitions follow it.

use super::{exclude::exclude_ranges, occurrence::Replacement};

/// Builds the rewritten document.
///
/// `replacements` must be sorted by start and non-overlapping; `exclusions`
/// must be normalized. With no replacements the source is returned as is,
/// apart from adding a final newline to non-empty input lacking one.
pub fn assemble(
    source: &str,
    replacements: &[Replacement],
    exclusions: &[crate::parsing::Span],
    definitions: &[String],
) -> String {
    if replacements.is_empty() {
        let mut out = source.to_string();
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
        return out;
    }

    let mut out = String::with_capacity(source.len() + definitions.len() * 32);
    let mut cursor = 0usize;

    for r in replacements {
        out.push_str(&exclude_ranges(&source[cursor..r.span.start], cursor, exclusions));
        out.push_str(&r.token);
        cursor = r.span.end;
    }

    let tail = exclude_ranges(&source[cursor..], cursor, exclusions);
    out.push_str(&tail);
    out.truncate(out.trim_end_matches('\n').len());
    out.push('\n');

    if !definitions.is_empty() {
        out.push('\n');
        for def in definitions {
            out.push_str(def);
            out.push('\n');
        }
    }

    out
}
