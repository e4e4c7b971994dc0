use super::{
    kinds::{
        BlockQuote, CodeFence, FenceSig, FootnoteMarker, Heading, ListItem, ReferenceDefinition,
        ThematicBreak,
    },
    lines::LineRef,
    span::Span,
};

/// What a single physical line is, judged on local facts alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    /// Opens or closes a fenced code block.
    Fence,
    /// Four leading spaces or a tab.
    IndentedCode,
    FootnoteDefinition,
    ReferenceDefinition,
    Heading,
    ListItem,
    BlockQuote,
    ThematicBreak,
    /// Anything else: paragraph text.
    Text,
}

impl LineKind {
    /// Line kinds that are copied through untouched by layout transforms.
    pub fn is_verbatim(self) -> bool {
        !matches!(self, LineKind::Text | LineKind::BlockQuote | LineKind::Fence)
    }
}

/// Classification of a single line containing only local facts.
///
/// This is phase 1 of line-layout work: each line is classified
/// independently without reference to surrounding context.
#[derive(Debug, Clone)]
pub struct LineClass {
    /// Full byte span of this line, terminator included.
    pub line: Span,
    /// Line text without its terminator.
    pub text: String,
    pub kind: LineKind,
    /// Number of blockquote `>` prefixes found.
    pub quote_depth: u8,
    /// If the line looks like a fence opener/closer.
    pub fence_sig: Option<FenceSig>,
    /// Ends in two spaces (a markdown hard line break).
    pub hard_break: bool,
}

/// Classifies individual lines for the layout transforms.
pub struct MarkdownLineClassifier;

impl MarkdownLineClassifier {
    pub const HARD_BREAK: &'static str = "  ";

    /// Classifies a line into a [`LineClass`].
    pub fn classify(&self, lr: &LineRef) -> LineClass {
        let text = lr.content();
        let (quote_depth, _) = BlockQuote::strip_prefixes(text);
        let fence_sig = CodeFence::sig(text);
        let kind = self.kind(text);

        LineClass {
            line: lr.span,
            text: text.to_string(),
            kind,
            quote_depth,
            fence_sig,
            hard_break: text.ends_with(Self::HARD_BREAK),
        }
    }

    /// The kind of a line given without its terminator. Checks run in a
    /// fixed precedence: fences, indented code, definitions, blank,
    /// headings, list items, blockquotes, thematic breaks, then plain text.
    pub fn kind(&self, text: &str) -> LineKind {
        if CodeFence::sig(text).is_some() {
            LineKind::Fence
        } else if text.starts_with("    ") || text.starts_with('\t') {
            LineKind::IndentedCode
        } else if FootnoteMarker::is_definition_line(text) {
            LineKind::FootnoteDefinition
        } else if ReferenceDefinition::is_definition_line(text) {
            LineKind::ReferenceDefinition
        } else if text.trim().is_empty() {
            LineKind::Blank
        } else if Heading::is_heading_line(text) {
            LineKind::Heading
        } else if ListItem::is_list_line(text) {
            LineKind::ListItem
        } else if BlockQuote::is_quote_line(text) {
            LineKind::BlockQuote
        } else if ThematicBreak::is_break_line(text) {
            LineKind::ThematicBreak
        } else {
            LineKind::Text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn line(text: &str) -> LineRef {
        LineRef {
            span: Span::new(0, text.len()),
            text: text.to_string(),
        }
    }

    #[rstest]
    #[case("```rust\n", LineKind::Fence)]
    #[case("~~~\n", LineKind::Fence)]
    #[case("    code\n", LineKind::IndentedCode)]
    #[case("\tcode\n", LineKind::IndentedCode)]
    #[case("[^1]: note\n", LineKind::FootnoteDefinition)]
    #[case("[1]: https://x.test\n", LineKind::ReferenceDefinition)]
    #[case("   \n", LineKind::Blank)]
    #[case("# Title\n", LineKind::Heading)]
    #[case("- item\n", LineKind::ListItem)]
    #[case("> quoted\n", LineKind::BlockQuote)]
    #[case("***\n", LineKind::ThematicBreak)]
    #[case("Plain words.\n", LineKind::Text)]
    fn classifies_kinds(#[case] text: &str, #[case] expected: LineKind) {
        let class = MarkdownLineClassifier.classify(&line(text));
        assert_eq!(class.kind, expected);
    }

    #[test]
    fn strips_terminator_and_notes_hard_break() {
        let class = MarkdownLineClassifier.classify(&line("ends here  \r\n"));
        assert_eq!(class.text, "ends here  ");
        assert!(class.hard_break);
        assert_eq!(class.line, Span::new(0, 13));
    }

    #[test]
    fn counts_quote_depth() {
        let class = MarkdownLineClassifier.classify(&line("> > deep\n"));
        assert_eq!(class.quote_depth, 2);
        assert_eq!(class.kind, LineKind::BlockQuote);
    }
}
