use super::{ParagraphLayout, collapse, ends_in_hard_break, relayout, unwrap_quote};
use crate::{parsing::MarkdownLineClassifier, transforms::Transform};

/// Puts every sentence on its own line, inside blockquotes too.
#[derive(Debug, Clone, Copy, Default)]
pub struct Split;

impl Transform for Split {
    fn apply(&self, source: &str) -> String {
        relayout(source, self)
    }
}

impl ParagraphLayout for Split {
    fn paragraph(&self, lines: &[&str]) -> Vec<String> {
        let mut out = sentences(&collapse(lines));
        if ends_in_hard_break(lines)
            && let Some(last) = out.last_mut()
        {
            last.push_str(MarkdownLineClassifier::HARD_BREAK);
        }
        out
    }

    fn block_quote(&self, lines: &[&str]) -> Vec<String> {
        unwrap_quote(lines, sentences)
    }
}

/// Splits collapsed text after `.`, `!` or `?` when a space and an
/// uppercase letter follow. The space is dropped.
fn sentences(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars();

    while let Some(ch) = chars.next() {
        current.push(ch);
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        let mut ahead = chars.clone();
        if ahead.next() == Some(' ') && ahead.next().is_some_and(char::is_uppercase) {
            out.push(std::mem::take(&mut current));
            chars.next();
        }
    }

    if !current.is_empty() {
        out.push(current);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("One. Two! Three? Four", &["One.", "Two!", "Three?", "Four"])]
    #[case("e.g. this stays. Whole", &["e.g. this stays.", "Whole"])]
    #[case("Version 1.2 is out.", &["Version 1.2 is out."])]
    #[case("Über. Ärger.", &["Über.", "Ärger."])]
    #[case("", &[])]
    fn splits_sentences(#[case] text: &str, #[case] expected: &[&str]) {
        assert_eq!(sentences(text), expected);
    }

    #[test]
    fn splits_paragraphs_and_keeps_hard_break() {
        let src = "First one. Second\none.  \nAfter break.\n";
        assert_eq!(
            Split.apply(src),
            "First one.\nSecond one.  \nAfter break.\n"
        );
    }

    #[test]
    fn splits_inside_blockquotes() {
        let src = "> [!NOTE]\n> One. Two.\n";
        assert_eq!(Split.apply(src), "> [!NOTE]\n> One.\n> Two.\n");
    }

    #[test]
    fn splitting_twice_changes_nothing() {
        let src = "A b. C d!\nE f? g h.\n\n> I. J.\n";
        let once = Split.apply(src);
        assert_eq!(Split.apply(&once), once);
    }
}
