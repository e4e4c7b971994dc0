use super::{ParagraphLayout, collapse, ends_in_hard_break, relayout, unwrap_quote};
use crate::{parsing::MarkdownLineClassifier, transforms::Transform};

/// Puts every paragraph, and every paragraph inside a blockquote, on a
/// single line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Join;

impl Transform for Join {
    fn apply(&self, source: &str) -> String {
        relayout(source, self)
    }
}

impl ParagraphLayout for Join {
    fn paragraph(&self, lines: &[&str]) -> Vec<String> {
        let mut line = collapse(lines);
        if ends_in_hard_break(lines) {
            line.push_str(MarkdownLineClassifier::HARD_BREAK);
        }
        vec![line]
    }

    fn block_quote(&self, lines: &[&str]) -> Vec<String> {
        unwrap_quote(lines, |text| vec![text.to_string()])
    }
}
