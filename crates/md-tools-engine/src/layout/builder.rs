use std::ops::Range;

use crate::parsing::{LineClass, LineKind, Span, kinds::CodeFence, kinds::FenceSig};

/// The kind of a layout block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// A single line copied through untouched.
    Verbatim,
    /// A fenced code block, fences included. Copied through untouched.
    FencedCode,
    /// Consecutive plain text lines.
    Paragraph,
    /// Consecutive `>` lines, at any depth.
    BlockQuote,
}

/// A run of whole lines sharing one layout treatment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockNode {
    pub kind: BlockKind,
    /// Full byte span of the block, terminators included.
    pub span: Span,
    /// Indices of the block's lines in classification order.
    pub lines: Range<usize>,
}

#[derive(Debug, Clone)]
enum LeafState {
    None,
    Paragraph {
        start: Span,
        last_line_end: usize,
        lines: Range<usize>,
    },
    Quote {
        start: Span,
        last_line_end: usize,
        lines: Range<usize>,
    },
    Fence {
        open: FenceSig,
        start: Span,
        last_line_end: usize,
        lines: Range<usize>,
    },
}

/// Segments classified lines into layout blocks.
///
/// Lines must be pushed in document order, each with its index.
pub struct BlockBuilder {
    /// A line ending in a hard break closes its paragraph.
    hard_break_ends_paragraph: bool,
    leaf: LeafState,
    out: Vec<BlockNode>,
}

impl BlockBuilder {
    pub fn new(hard_break_ends_paragraph: bool) -> Self {
        Self {
            hard_break_ends_paragraph,
            leaf: LeafState::None,
            out: vec![],
        }
    }

    pub fn push(&mut self, idx: usize, c: &LineClass) {
        if self.in_fence() {
            self.consume_fence_line(idx, c);
            return;
        }

        match c.kind {
            LineKind::Fence => {
                self.flush();
                if let Some(open) = c.fence_sig {
                    self.leaf = LeafState::Fence {
                        open,
                        start: c.line,
                        last_line_end: c.line.end,
                        lines: idx..idx + 1,
                    };
                }
            }
            LineKind::BlockQuote => self.extend_quote(idx, c.line),
            LineKind::Text => {
                self.extend_paragraph(idx, c.line);
                if self.hard_break_ends_paragraph && c.hard_break {
                    self.flush();
                }
            }
            _ => {
                self.flush();
                self.out.push(BlockNode {
                    kind: BlockKind::Verbatim,
                    span: c.line,
                    lines: idx..idx + 1,
                });
            }
        }
    }

    pub fn finish(mut self) -> Vec<BlockNode> {
        // EOF flush; an unterminated fence runs to the end of the document
        self.flush();
        self.out
    }

    fn in_fence(&self) -> bool {
        matches!(self.leaf, LeafState::Fence { .. })
    }

    fn consume_fence_line(&mut self, idx: usize, c: &LineClass) {
        let LeafState::Fence {
            open,
            last_line_end,
            lines,
            ..
        } = &mut self.leaf
        else {
            return;
        };
        *last_line_end = c.line.end;
        lines.end = idx + 1;

        if CodeFence::closes(*open, c.fence_sig) {
            self.flush();
        }
    }

    fn extend_paragraph(&mut self, idx: usize, line: Span) {
        match &mut self.leaf {
            LeafState::Paragraph {
                last_line_end,
                lines,
                ..
            } => {
                *last_line_end = line.end;
                lines.end = idx + 1;
            }
            _ => {
                self.flush();
                self.leaf = LeafState::Paragraph {
                    start: line,
                    last_line_end: line.end,
                    lines: idx..idx + 1,
                };
            }
        }
    }

    fn extend_quote(&mut self, idx: usize, line: Span) {
        match &mut self.leaf {
            LeafState::Quote {
                last_line_end,
                lines,
                ..
            } => {
                *last_line_end = line.end;
                lines.end = idx + 1;
            }
            _ => {
                self.flush();
                self.leaf = LeafState::Quote {
                    start: line,
                    last_line_end: line.end,
                    lines: idx..idx + 1,
                };
            }
        }
    }

    fn flush(&mut self) {
        let (kind, start, last_line_end, lines) =
            match std::mem::replace(&mut self.leaf, LeafState::None) {
                LeafState::None => return,
                LeafState::Paragraph {
                    start,
                    last_line_end,
                    lines,
                } => (BlockKind::Paragraph, start, last_line_end, lines),
                LeafState::Quote {
                    start,
                    last_line_end,
                    lines,
                } => (BlockKind::BlockQuote, start, last_line_end, lines),
                LeafState::Fence {
                    start,
                    last_line_end,
                    lines,
                    ..
                } => (BlockKind::FencedCode, start, last_line_end, lines),
            };
        self.out.push(BlockNode {
            kind,
            span: Span::new(start.start, last_line_end),
            lines,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::{MarkdownLineClassifier, lines_with_spans};
    use pretty_assertions::assert_eq;
    use xi_rope::Rope;

    fn blocks(src: &str, hard_breaks: bool) -> Vec<(BlockKind, &str)> {
        let rope = Rope::from(src);
        let mut builder = BlockBuilder::new(hard_breaks);
        for (idx, lr) in lines_with_spans(&rope).enumerate() {
            builder.push(idx, &MarkdownLineClassifier.classify(&lr));
        }
        builder
            .finish()
            .into_iter()
            .map(|b| (b.kind, b.span.slice(src)))
            .collect()
    }

    #[test]
    fn paragraphs_split_on_blank_lines() {
        assert_eq!(
            blocks("one\ntwo\n\nthree\n", false),
            vec![
                (BlockKind::Paragraph, "one\ntwo\n"),
                (BlockKind::Verbatim, "\n"),
                (BlockKind::Paragraph, "three\n"),
            ]
        );
    }

    #[test]
    fn verbatim_lines_interrupt_paragraphs() {
        assert_eq!(
            blocks("text\n# Head\n- item\nmore\n", false),
            vec![
                (BlockKind::Paragraph, "text\n"),
                (BlockKind::Verbatim, "# Head\n"),
                (BlockKind::Verbatim, "- item\n"),
                (BlockKind::Paragraph, "more\n"),
            ]
        );
    }

    #[test]
    fn fence_swallows_everything_until_matching_close() {
        let src = "````md\n```\n> not a quote\n````\nafter\n";
        assert_eq!(
            blocks(src, false),
            vec![
                (BlockKind::FencedCode, "````md\n```\n> not a quote\n````\n"),
                (BlockKind::Paragraph, "after\n"),
            ]
        );
    }

    #[test]
    fn unterminated_fence_runs_to_eof() {
        assert_eq!(
            blocks("~~~\ncode\n", false),
            vec![(BlockKind::FencedCode, "~~~\ncode\n")]
        );
    }

    #[test]
    fn quote_lines_group_together() {
        assert_eq!(
            blocks("> a\n>\n> > b\nafter\n", false),
            vec![
                (BlockKind::BlockQuote, "> a\n>\n> > b\n"),
                (BlockKind::Paragraph, "after\n"),
            ]
        );
    }

    #[test]
    fn hard_break_closes_paragraph_when_asked() {
        let src = "one  \ntwo\n";
        assert_eq!(blocks(src, false), vec![(BlockKind::Paragraph, src)]);
        assert_eq!(
            blocks(src, true),
            vec![
                (BlockKind::Paragraph, "one  \n"),
                (BlockKind::Paragraph, "two\n"),
            ]
        );
    }
}
