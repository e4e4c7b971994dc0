//! # Syntax Tree Adapter
//!
//! Runs `pulldown-cmark` with offset tracking and flattens what the rewriting
//! layer needs into document-ordered node lists. Positions reported here are
//! *anchors*: the parser knows where a link's text children sit, but the
//! exact extent of the surrounding delimiters is computed by the scanners in
//! [`crate::xref::extent`].

use std::collections::HashSet;

use pulldown_cmark::{Event, LinkType, Options, Parser, Tag, TagEnd};

use super::span::Span;
use crate::html::render_footnote_body;

/// The syntactic form a link was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkShape {
    /// `[text](url "title")`
    Inline,
    /// `[text][label]`
    Reference,
    /// `[text][]`
    Collapsed,
    /// `[text]`
    Shortcut,
    /// `<url>`, `<mail@host>` and anything else without rewritable brackets.
    Autolink,
}

impl LinkShape {
    fn from_link_type(link_type: LinkType) -> Self {
        match link_type {
            LinkType::Inline => LinkShape::Inline,
            LinkType::Reference | LinkType::ReferenceUnknown => LinkShape::Reference,
            LinkType::Collapsed | LinkType::CollapsedUnknown => LinkShape::Collapsed,
            LinkType::Shortcut | LinkType::ShortcutUnknown => LinkShape::Shortcut,
            _ => LinkShape::Autolink,
        }
    }
}

/// A link or image as reported by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkNode {
    pub shape: LinkShape,
    pub is_image: bool,
    /// Destination, already resolved through reference definitions.
    pub dest: String,
    pub title: String,
    /// Normalized reference label, empty for inline links.
    pub label: String,
    /// Start of the first direct child to end of the last one. `None` for
    /// links with empty text.
    pub anchor: Option<Span>,
    /// Range the parser attributes to the whole construct.
    pub range: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FootnoteRefNode {
    /// 1-based position among all footnote references, in document order.
    pub ordinal: usize,
    pub label: String,
    pub range: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FootnoteDefNode {
    pub label: String,
    /// Body rendered to inline HTML.
    pub html: String,
    pub range: Span,
}

/// A link reference definition the parser accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefDefNode {
    /// Normalized label.
    pub label: String,
    /// From the opening `[` to the end of the destination or title, which
    /// may run over several lines.
    pub range: Span,
}

/// Document-ordered view of the constructs the rewriters care about.
#[derive(Debug, Default)]
pub struct SyntaxTree {
    pub links: Vec<LinkNode>,
    pub footnote_refs: Vec<FootnoteRefNode>,
    pub footnote_defs: Vec<FootnoteDefNode>,
    pub ref_definitions: Vec<RefDefNode>,
    /// Fenced and indented code blocks plus inline code spans.
    pub code_zones: Vec<Span>,
}

/// An open link/image while walking events. Direct children are the events
/// seen while `depth` is zero.
struct LinkFrame {
    index: usize,
    depth: usize,
    first: Option<usize>,
    last: Option<usize>,
}

impl LinkFrame {
    fn child(&mut self, range: &std::ops::Range<usize>) {
        self.first.get_or_insert(range.start);
        self.last = Some(range.end);
    }
}

impl SyntaxTree {
    pub fn options() -> Options {
        Options::ENABLE_FOOTNOTES
            | Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
    }

    pub fn parse(source: &str) -> Self {
        let mut tree = SyntaxTree::default();
        let mut frames: Vec<LinkFrame> = Vec::new();
        let mut footnote: Option<(String, usize, Vec<Event<'_>>)> = None;

        let parser = Parser::new_ext(source, Self::options());
        tree.ref_definitions = parser
            .reference_definitions()
            .iter()
            .map(|(label, def)| RefDefNode {
                label: normalize_label(label),
                range: def.span.clone().into(),
            })
            .collect();
        tree.ref_definitions.sort_by_key(|d| d.range.start);

        for (event, range) in parser.into_offset_iter() {
            if let Some((_, _, body)) = footnote.as_mut()
                && !matches!(event, Event::End(TagEnd::FootnoteDefinition))
            {
                body.push(event.clone());
            }

            match &event {
                Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    id,
                })
                | Event::Start(Tag::Image {
                    link_type,
                    dest_url,
                    title,
                    id,
                }) => {
                    if let Some(parent) = frames.last_mut()
                        && parent.depth == 0
                    {
                        parent.first.get_or_insert(range.start);
                    }
                    frames.push(LinkFrame {
                        index: tree.links.len(),
                        depth: 0,
                        first: None,
                        last: None,
                    });
                    tree.links.push(LinkNode {
                        shape: LinkShape::from_link_type(*link_type),
                        is_image: matches!(event, Event::Start(Tag::Image { .. })),
                        dest: dest_url.to_string(),
                        title: title.to_string(),
                        label: normalize_label(id),
                        anchor: None,
                        range: range.clone().into(),
                    });
                }
                Event::End(TagEnd::Link) | Event::End(TagEnd::Image) => {
                    if let Some(frame) = frames.pop() {
                        if let (Some(first), Some(last)) = (frame.first, frame.last) {
                            tree.links[frame.index].anchor = Some(Span::new(first, last));
                        }
                    }
                    if let Some(parent) = frames.last_mut()
                        && parent.depth == 0
                    {
                        parent.last = Some(range.end);
                    }
                }
                Event::Start(tag) => {
                    match tag {
                        Tag::CodeBlock(_) => tree.code_zones.push(range.clone().into()),
                        Tag::FootnoteDefinition(label) => {
                            footnote = Some((label.to_string(), range.start, Vec::new()));
                        }
                        _ => {}
                    }
                    if let Some(frame) = frames.last_mut() {
                        if frame.depth == 0 {
                            frame.first.get_or_insert(range.start);
                        }
                        frame.depth += 1;
                    }
                }
                Event::End(tag_end) => {
                    if let TagEnd::FootnoteDefinition = tag_end
                        && let Some((label, start, body)) = footnote.take()
                    {
                        tree.footnote_defs.push(FootnoteDefNode {
                            label,
                            html: render_footnote_body(&body),
                            range: Span::new(start, range.end.max(start)),
                        });
                    }
                    if let Some(frame) = frames.last_mut() {
                        frame.depth = frame.depth.saturating_sub(1);
                        if frame.depth == 0 {
                            frame.last = Some(range.end);
                        }
                    }
                }
                leaf => {
                    match leaf {
                        Event::Code(_) => tree.code_zones.push(range.clone().into()),
                        Event::FootnoteReference(label) => {
                            tree.footnote_refs.push(FootnoteRefNode {
                                ordinal: tree.footnote_refs.len() + 1,
                                label: label.to_string(),
                                range: range.clone().into(),
                            });
                        }
                        _ => {}
                    }
                    if let Some(frame) = frames.last_mut()
                        && frame.depth == 0
                    {
                        frame.child(&range);
                    }
                }
            }
        }

        tree
    }

    /// True if `span` starts inside any code zone.
    pub fn in_code(&self, span: Span) -> bool {
        in_zones(&self.code_zones, span.start)
    }

    /// Lower-cased labels of every footnote definition.
    pub fn defined_footnotes(&self) -> HashSet<String> {
        self.footnote_defs
            .iter()
            .map(|d| d.label.to_lowercase())
            .collect()
    }

    /// The definition for `label`, compared case-insensitively.
    pub fn footnote_def(&self, label: &str) -> Option<&FootnoteDefNode> {
        let wanted = label.to_lowercase();
        self.footnote_defs
            .iter()
            .find(|d| d.label.to_lowercase() == wanted)
    }
}

/// Link labels match case-insensitively with inner whitespace collapsed.
pub fn normalize_label(label: &str) -> String {
    label.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// True if `pos` lies inside one of `zones`.
pub fn in_zones(zones: &[Span], pos: usize) -> bool {
    zones.iter().any(|z| z.contains(pos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn inline_link_anchor_covers_text() {
        let src = "See [ex](https://x.test).";
        let tree = SyntaxTree::parse(src);
        assert_eq!(tree.links.len(), 1);
        let link = &tree.links[0];
        assert_eq!(link.shape, LinkShape::Inline);
        assert_eq!(link.dest, "https://x.test");
        assert_eq!(link.anchor.map(|a| a.slice(src)), Some("ex"));
    }

    #[test]
    fn emphasis_child_is_part_of_anchor() {
        let src = "[*big* deal](/x)";
        let tree = SyntaxTree::parse(src);
        assert_eq!(tree.links[0].anchor.map(|a| a.slice(src)), Some("*big* deal"));
    }

    #[test]
    fn reference_link_resolves_destination() {
        let src = "A [b][1] c.\n\n[1]: /dest \"T\"\n";
        let tree = SyntaxTree::parse(src);
        let link = &tree.links[0];
        assert_eq!(link.shape, LinkShape::Reference);
        assert_eq!(link.dest, "/dest");
        assert_eq!(link.title, "T");
        assert_eq!(link.label, "1");
    }

    #[test]
    fn reference_definitions_in_containers() {
        let src = "> See [a][x].\n>\n> [X]: /quoted\n\n- [y]: /listed\n  \"Title\"\n";
        let tree = SyntaxTree::parse(src);
        let defs: Vec<_> = tree
            .ref_definitions
            .iter()
            .map(|d| (d.label.as_str(), d.range.slice(src).trim_end()))
            .collect();
        assert_eq!(
            defs,
            vec![("x", "[X]: /quoted"), ("y", "[y]: /listed\n  \"Title\"")]
        );
    }

    #[test]
    fn image_inside_link_records_both() {
        let src = "[![alt](i.png)](/page)";
        let tree = SyntaxTree::parse(src);
        assert_eq!(tree.links.len(), 2);
        assert!(!tree.links[0].is_image);
        assert!(tree.links[1].is_image);
        assert_eq!(tree.links[0].anchor.map(|a| a.slice(src)), Some("![alt](i.png)"));
        assert_eq!(tree.links[1].anchor.map(|a| a.slice(src)), Some("alt"));
    }

    #[test]
    fn footnotes_are_ordered_and_rendered() {
        let src = "One[^a] two[^b].\n\n[^a]: *first*\n[^b]: second\n";
        let tree = SyntaxTree::parse(src);
        let labels: Vec<_> = tree
            .footnote_refs
            .iter()
            .map(|r| (r.ordinal, r.label.as_str()))
            .collect();
        assert_eq!(labels, vec![(1, "a"), (2, "b")]);
        assert_eq!(tree.footnote_def("A").map(|d| d.html.as_str()), Some("<em>first</em>"));
    }

    #[test]
    fn code_zones_cover_blocks_and_spans() {
        let src = "Use `[x](y)` here.\n\n```\n[a](b)\n```\n";
        let tree = SyntaxTree::parse(src);
        assert!(tree.links.is_empty());
        assert_eq!(tree.code_zones.len(), 2);
        assert!(tree.in_code(Span::new(5, 6)));
        assert!(tree.in_code(Span::new(src.find("[a]").unwrap(), src.len())));
    }
}
