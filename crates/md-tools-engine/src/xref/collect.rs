//! # Occurrence Collection
//!
//! Walks the syntax tree (or, for sidenotes, the raw source) in document
//! order, resolves each construct's exact extent and emits occurrence
//! records. Constructs that cannot be resolved are dropped and stay in the
//! output as literal text.

use std::collections::{HashMap, HashSet};

use log::debug;
use xi_rope::Rope;

use super::{
    extent::{Construct, resolve_extent, scan_footnote_markers},
    occurrence::{Identity, Occurrence, OccurrenceKind},
};
use crate::parsing::{
    FootnoteDefNode, LinkShape, RefDefNode, Span, SyntaxTree,
    kinds::{ReferenceDefinition, Sidenote},
    lines_with_spans,
    syntax::{in_zones, normalize_label},
};

/// Every resolvable link and image, autolinks excepted.
pub fn collect_links(tree: &SyntaxTree, source: &str) -> Vec<Occurrence> {
    let mut out = Vec::new();
    for node in &tree.links {
        if node.shape == LinkShape::Autolink {
            continue;
        }
        let Some(anchor) = node.anchor else {
            debug!("link at {}..{} has no text, left as is", node.range.start, node.range.end);
            continue;
        };
        let construct = Construct::Link {
            shape: node.shape,
            is_image: node.is_image,
            anchor,
        };
        let Some(span) = resolve_extent(&construct, source) else {
            debug!("unresolved link extent at {}..{}", node.range.start, node.range.end);
            continue;
        };
        if tree.in_code(span) {
            continue;
        }
        let text_start = span.start + if node.is_image { 2 } else { 1 };
        let kind = match node.shape {
            LinkShape::Inline => OccurrenceKind::InlineLink,
            _ => OccurrenceKind::RefLink,
        };
        out.push(Occurrence {
            span,
            kind,
            identity: Identity::Link {
                url: node.dest.clone(),
                title: node.title.clone(),
            },
            text: source[text_start..anchor.end.max(text_start)].to_string(),
            is_image: node.is_image,
            label: node.label.clone(),
        });
    }
    out
}

/// Every footnote reference the parser reported, located in the raw source.
pub fn collect_footnote_refs(tree: &SyntaxTree, source: &str) -> Vec<Occurrence> {
    let reported: HashSet<String> = tree
        .footnote_refs
        .iter()
        .map(|r| r.label.to_lowercase())
        .collect();
    let candidates: Vec<_> = scan_footnote_markers(source, &tree.code_zones)
        .into_iter()
        .filter(|c| reported.contains(&c.label.to_lowercase()))
        .collect();

    let mut out = Vec::new();
    for r in &tree.footnote_refs {
        let construct = Construct::FootnoteRef {
            ordinal: r.ordinal,
            label: &r.label,
            anchor: r.range,
            candidates: &candidates,
        };
        let Some(span) = resolve_extent(&construct, source) else {
            debug!("footnote reference {} ([^{}]) not found in source", r.ordinal, r.label);
            continue;
        };
        out.push(Occurrence {
            span,
            kind: OccurrenceKind::FootnoteRef,
            identity: Identity::Footnote(r.label.to_lowercase()),
            text: r.label.clone(),
            is_image: false,
            label: String::new(),
        });
    }
    out
}

/// Extents of the given footnote definitions.
pub fn footnote_definition_ranges<'a>(
    defs: impl IntoIterator<Item = &'a FootnoteDefNode>,
    code_zones: &[Span],
    source: &str,
) -> Vec<Span> {
    defs.into_iter()
        .filter_map(|def| {
            let construct = Construct::FootnoteDef {
                label: &def.label,
                code_zones,
            };
            let span = resolve_extent(&construct, source);
            if span.is_none() {
                debug!("footnote definition [^{}] not found in source", def.label);
            }
            span
        })
        .collect()
}

/// Every reference definition, widened to whole lines.
///
/// The parser only reports the first definition of a label. Later ones
/// are dead text to it but still definitions to a reader, so lines that
/// look like one for an already defined label are picked up as well.
pub fn reference_definitions(tree: &SyntaxTree, source: &str) -> Vec<RefDefNode> {
    let mut out: Vec<RefDefNode> = tree
        .ref_definitions
        .iter()
        .filter_map(|def| {
            let range = resolve_extent(&Construct::RefDefinition { span: def.range }, source)?;
            Some(RefDefNode {
                label: def.label.clone(),
                range,
            })
        })
        .collect();

    let known: HashSet<&str> = tree.ref_definitions.iter().map(|d| d.label.as_str()).collect();
    let rope = Rope::from(source);
    let shadowed: Vec<RefDefNode> = lines_with_spans(&rope)
        .filter(|lr| !in_zones(&tree.code_zones, lr.span.start))
        .filter(|lr| !out.iter().any(|d| d.range.overlaps(lr.span)))
        .filter(|lr| !tree.links.iter().any(|l| lr.span.contains(l.range.start)))
        .filter_map(|lr| {
            let label = normalize_label(ReferenceDefinition::label(lr.span.slice(source))?);
            known.contains(label.as_str()).then_some(RefDefNode {
                label,
                range: lr.span,
            })
        })
        .collect();
    out.extend(shadowed);
    out.sort_by_key(|d| d.range.start);
    out
}

/// Labels still used by reference-shaped links that `rewritten` does not
/// account for. Their definitions have to stay.
pub fn pending_labels<'a>(
    tree: &SyntaxTree,
    rewritten: impl IntoIterator<Item = &'a Occurrence>,
) -> HashSet<String> {
    let mut uses: HashMap<&str, usize> = HashMap::new();
    for node in tree.links.iter().filter(|n| !n.label.is_empty()) {
        *uses.entry(node.label.as_str()).or_default() += 1;
    }
    for occ in rewritten {
        if let Some(n) = uses.get_mut(occ.label.as_str()) {
            *n = n.saturating_sub(1);
        }
    }
    uses.into_iter()
        .filter(|&(_, n)| n > 0)
        .map(|(label, _)| label.to_string())
        .collect()
}

/// Every sidenote literal outside code.
pub fn collect_sidenotes(source: &str, code_zones: &[Span]) -> Vec<Occurrence> {
    let mut out = Vec::new();
    for caps in Sidenote::head_regex().captures_iter(source) {
        let Some(whole) = caps.get(0) else { continue };
        if in_zones(code_zones, whole.end() - 1) {
            continue;
        }
        let Some(id) = caps.name("id").and_then(|m| m.as_str().parse::<u64>().ok()) else {
            continue;
        };
        let head = Span::new(whole.start(), whole.end());
        let Some(span) = resolve_extent(&Construct::SidenoteBlock { head }, source) else {
            debug!("sidenote {id} at {} is never closed", head.start);
            continue;
        };
        let body = &source[head.end..span.end - Sidenote::SPAN_CLOSE.len()];
        out.push(Occurrence {
            span,
            kind: OccurrenceKind::Sidenote,
            identity: Identity::Sidenote(id),
            text: body.to_string(),
            is_image: false,
            label: String::new(),
        });
    }
    out
}

/// Sorts `occurrences` into document order and drops any that overlap an
/// earlier accepted occurrence or touch an exclusion range.
pub fn accept(mut occurrences: Vec<Occurrence>, exclusions: &[Span]) -> Vec<Occurrence> {
    occurrences.sort_by_key(|o| o.span.start);
    let mut accepted: Vec<Occurrence> = Vec::with_capacity(occurrences.len());
    for occ in occurrences {
        if accepted.last().is_some_and(|prev| prev.span.end > occ.span.start) {
            debug!("dropping nested occurrence at {}..{}", occ.span.start, occ.span.end);
            continue;
        }
        if exclusions.iter().any(|r| r.overlaps(occ.span)) {
            continue;
        }
        accepted.push(occ);
    }
    accepted
}
