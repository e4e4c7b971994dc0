//! Range exclusion: emit a window of the source with stale ranges removed.

use std::borrow::Cow;

use crate::parsing::Span;

/// Returns `content` (which starts at absolute offset `content_start`) with
/// every overlapping part of `ranges` removed.
///
/// `ranges` are absolute, sorted by start and pairwise non-overlapping (see
/// [`normalize_ranges`]). Ranges outside the window are ignored and ranges
/// straddling its edges are clamped. When nothing overlaps, `content` is
/// returned borrowed.
pub fn exclude_ranges<'a>(content: &'a str, content_start: usize, ranges: &[Span]) -> Cow<'a, str> {
    let content_end = content_start + content.len();
    let mut out: Option<String> = None;
    let mut pos = 0usize;

    for r in ranges {
        if r.end <= content_start || r.start >= content_end {
            continue;
        }
        let rel_start = r.start.saturating_sub(content_start);
        let rel_end = (r.end - content_start).min(content.len());

        let buf = out.get_or_insert_with(|| String::with_capacity(content.len()));
        if rel_start > pos {
            buf.push_str(&content[pos..rel_start]);
        }
        pos = pos.max(rel_end);
    }

    match out {
        None => Cow::Borrowed(content),
        Some(mut buf) => {
            if pos < content.len() {
                buf.push_str(&content[pos..]);
            }
            Cow::Owned(buf)
        }
    }
}

/// Sorts `ranges` by start and merges any that overlap or touch, dropping
/// empty ones.
pub fn normalize_ranges(mut ranges: Vec<Span>) -> Vec<Span> {
    ranges.retain(|r| !r.is_empty());
    ranges.sort();
    let mut merged: Vec<Span> = Vec::with_capacity(ranges.len());
    for r in ranges {
        match merged.last_mut() {
            Some(last) if r.start <= last.end => last.end = last.end.max(r.end),
            _ => merged.push(r),
        }
    }
    merged
}
