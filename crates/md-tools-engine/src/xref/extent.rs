//! # Extent Resolution
//!
//! The parser reports *anchors*: where a link's text children sit, where a
//! footnote marker roughly is. The scanners here turn an anchor into the
//! exact `[start, end)` extent of the construct as written, delimiters
//! included. A construct whose extent cannot be established resolves to
//! `None` and is left in the document untouched.

use crate::parsing::{
    Cursor, LinkShape, Span,
    kinds::{FootnoteMarker, Sidenote},
    syntax::in_zones,
};

/// The closed set of constructs whose extents can be resolved.
#[derive(Debug, Clone, Copy)]
pub enum Construct<'a> {
    /// A link or image whose text children span `anchor`.
    Link {
        shape: LinkShape,
        is_image: bool,
        anchor: Span,
    },
    /// The `ordinal`-th footnote reference reported by the parser.
    FootnoteRef {
        ordinal: usize,
        label: &'a str,
        anchor: Span,
        candidates: &'a [MarkerCandidate],
    },
    /// The definition block of footnote `label`.
    FootnoteDef {
        label: &'a str,
        code_zones: &'a [Span],
    },
    /// A sidenote literal whose fixed head was matched at `head`.
    SidenoteBlock { head: Span },
    /// A reference definition the parser reported at `span`.
    RefDefinition { span: Span },
}

/// Resolves the exact source extent of `construct`.
pub fn resolve_extent(construct: &Construct<'_>, source: &str) -> Option<Span> {
    match *construct {
        Construct::Link {
            shape,
            is_image,
            anchor,
        } => link_extent(shape, is_image, anchor, source),
        Construct::FootnoteRef {
            ordinal,
            label,
            anchor,
            candidates,
        } => footnote_ref_extent(ordinal, label, anchor, candidates),
        Construct::FootnoteDef { label, code_zones } => {
            footnote_def_extent(label, code_zones, source)
        }
        Construct::SidenoteBlock { head } => {
            let open = head.end.checked_sub(Sidenote::SPAN_OPEN.len())?;
            let body = Sidenote::body_len(source.get(open..)?)?;
            Some(Span::new(head.start, head.end + body + Sidenote::SPAN_CLOSE.len()))
        }
        Construct::RefDefinition { span } => ref_definition_extent(span, source),
    }
}

/// Widens a parser-reported definition to whole lines. Container markers
/// in front of it (`>`, list bullets) go with it, and so does the rest of
/// its last line when that is blank.
fn ref_definition_extent(span: Span, source: &str) -> Option<Span> {
    let head = source.get(..span.start)?;
    let line_start = head.rfind('\n').map_or(0, |p| p + 1);
    let prefix = &head[line_start..];
    let start = if prefix.bytes().all(|b| b" \t>-*+.)".contains(&b) || b.is_ascii_digit()) {
        line_start
    } else {
        span.start
    };

    let tail = source.get(span.end..)?;
    let end = if span.end > 0 && source.as_bytes()[span.end - 1] == b'\n' {
        span.end
    } else {
        match tail.find('\n') {
            Some(p) if tail[..p].trim().is_empty() => span.end + p + 1,
            None if tail.trim().is_empty() => source.len(),
            _ => span.end,
        }
    };
    Some(Span::new(start, end))
}

/// Finds the opening `[` (and `!` for images) just before the anchor, then
/// scans from the anchor's end for the terminator the shape calls for.
fn link_extent(shape: LinkShape, is_image: bool, anchor: Span, source: &str) -> Option<Span> {
    let bytes = source.as_bytes();
    let mut open = anchor.start.checked_sub(1)?;
    if bytes.get(open) == Some(&b'\\') {
        open = open.checked_sub(1)?;
    }
    if bytes.get(open) != Some(&b'[') {
        return None;
    }
    let start = if is_image {
        let bang = open.checked_sub(1)?;
        (bytes.get(bang) == Some(&b'!')).then_some(bang)?
    } else {
        open
    };

    let mut cur = Cursor::at(source, anchor.end);
    let end = match shape {
        LinkShape::Inline => {
            if cur.bump()? != b']' || cur.bump()? != b'(' {
                return None;
            }
            inline_tail_end(&mut cur)?
        }
        LinkShape::Reference | LinkShape::Collapsed => {
            if cur.bump()? != b']' {
                return None;
            }
            loop {
                match cur.bump()? {
                    b'\n' => return None,
                    b']' => break cur.pos(),
                    _ => {}
                }
            }
        }
        LinkShape::Shortcut => {
            if cur.bump()? != b']' {
                return None;
            }
            cur.pos()
        }
        LinkShape::Autolink => return None,
    };

    Some(Span::new(start, end))
}

fn skip_link_space(cur: &mut Cursor<'_>) {
    cur.bump_while(|b| matches!(b, b' ' | b'\t' | b'\n' | b'\r'));
}

/// Scans `(dest "title")` from just past the `(` and returns the position
/// after the closing `)`. The destination is either `<...>` or a run of
/// balanced parentheses; the optional title is quoted with `"`, `'` or
/// `(...)`.
fn inline_tail_end(cur: &mut Cursor<'_>) -> Option<usize> {
    skip_link_space(cur);
    if cur.peek() == Some(b'<') {
        cur.bump();
        loop {
            match cur.bump()? {
                b'>' => break,
                b'\\' => {
                    cur.bump();
                }
                b'\n' | b'<' => return None,
                _ => {}
            }
        }
    } else {
        let mut depth = 0usize;
        loop {
            match cur.peek()? {
                b')' if depth == 0 => break,
                b')' => depth -= 1,
                b'(' => depth += 1,
                b'\\' => {
                    cur.bump();
                }
                b if b.is_ascii_whitespace() => break,
                _ => {}
            }
            cur.bump();
        }
    }

    skip_link_space(cur);
    let close = match cur.peek()? {
        b'"' => Some(b'"'),
        b'\'' => Some(b'\''),
        b'(' => Some(b')'),
        _ => None,
    };
    if let Some(close) = close {
        cur.bump();
        loop {
            match cur.bump()? {
                b'\\' => {
                    cur.bump();
                }
                b if b == close => break,
                _ => {}
            }
        }
        skip_link_space(cur);
    }

    (cur.bump()? == b')').then(|| cur.pos())
}

/// A raw `[^label]` marker not followed by `:`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerCandidate {
    pub span: Span,
    pub label: String,
}

/// Scans the raw source left to right for footnote reference markers,
/// skipping definitions and anything inside `code_zones`.
pub fn scan_footnote_markers(source: &str, code_zones: &[Span]) -> Vec<MarkerCandidate> {
    let mut out = Vec::new();
    let mut cur = Cursor::new(source, 0);

    while !cur.eof() {
        if !cur.starts_with(FootnoteMarker::OPEN) {
            cur.bump();
            continue;
        }
        let start = cur.pos();
        cur.bump_n(FootnoteMarker::OPEN.len());
        let label_start = cur.pos();
        cur.bump_while(|b| b != FootnoteMarker::CLOSE && b != b'\n' && b != b'[');
        if cur.peek() != Some(FootnoteMarker::CLOSE) || cur.pos() == label_start {
            continue;
        }
        let label = source[label_start..cur.pos()].to_string();
        cur.bump();
        if cur.peek() == Some(FootnoteMarker::DEFINITION) || in_zones(code_zones, start) {
            continue;
        }
        out.push(MarkerCandidate {
            span: Span::new(start, cur.pos()),
            label,
        });
    }

    out
}

/// Matches parser reference `ordinal` to raw candidate `ordinal`. When the
/// labels disagree the first candidate at or after the anchor carrying the
/// right label is taken instead.
fn footnote_ref_extent(
    ordinal: usize,
    label: &str,
    anchor: Span,
    candidates: &[MarkerCandidate],
) -> Option<Span> {
    let wanted = label.to_lowercase();
    let same = |c: &MarkerCandidate| c.label.to_lowercase() == wanted;
    if let Some(c) = ordinal.checked_sub(1).and_then(|i| candidates.get(i))
        && same(c)
    {
        return Some(c.span);
    }
    candidates
        .iter()
        .find(|c| c.span.start >= anchor.start && same(c))
        .map(|c| c.span)
}

/// The definition opens with the literal `[^label]:` at the start of a line
/// (at most three spaces in) outside code. It runs over every following
/// blank or indented line and stops at the first other line, which includes
/// the next footnote definition.
fn footnote_def_extent(label: &str, code_zones: &[Span], source: &str) -> Option<Span> {
    let opener = FootnoteMarker::definition_opener(label);
    let line_start = |idx: usize| source[..idx].rfind('\n').map_or(0, |p| p + 1);
    let opens_line = |idx: usize| {
        let indent = &source[line_start(idx)..idx];
        indent.len() <= 3 && indent.bytes().all(|b| b == b' ')
    };
    let found = source
        .match_indices(&opener)
        .map(|(idx, _)| idx)
        .find(|&idx| opens_line(idx) && !in_zones(code_zones, idx))?;
    let start = line_start(found);

    let line_end = |from: usize| source[from..].find('\n').map_or(source.len(), |p| from + p + 1);

    let mut end = line_end(start);
    while end < source.len() {
        let next = line_end(end);
        let line = source[end..next].trim_end_matches(['\r', '\n']);
        let continues = line.is_empty() || line.starts_with([' ', '\t']);
        if !continues {
            break;
        }
        end = next;
    }
    Some(Span::new(start, end))
}
