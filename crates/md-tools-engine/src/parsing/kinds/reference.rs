use std::sync::OnceLock;

use regex::Regex;

/// Link reference definition: `[label]: destination "title"` on its own line.
pub struct ReferenceDefinition;

impl ReferenceDefinition {
    /// Label prefix that marks a footnote definition rather than a link one.
    pub const FOOTNOTE_CARET: char = '^';

    fn line_regex() -> &'static Regex {
        static LINE: OnceLock<Regex> = OnceLock::new();
        LINE.get_or_init(|| {
            Regex::new(r"^ {0,3}\[([^\]]+)\]:[ \t]*\S").expect("Invalid reference definition regex")
        })
    }

    /// The label of the definition starting this line, if it is one.
    pub fn label(line: &str) -> Option<&str> {
        let caps = Self::line_regex().captures(line)?;
        let label = caps.get(1)?.as_str();
        if label.starts_with(Self::FOOTNOTE_CARET) {
            return None;
        }
        Some(label)
    }

    pub fn is_definition_line(line: &str) -> bool {
        Self::label(line).is_some()
    }

    /// Renders `[N]: dest` or `[N]: dest "title"`.
    pub fn render(number: usize, dest: &str, title: &str) -> String {
        let dest = Self::destination(dest);
        if title.is_empty() {
            format!("[{number}]: {dest}")
        } else {
            format!("[{number}]: {dest} \"{}\"", Self::escape_title(title))
        }
    }

    /// Destinations that are empty, contain whitespace or have unbalanced
    /// parentheses need angle brackets.
    pub fn destination(dest: &str) -> String {
        let mut depth = 0i64;
        let mut balanced = true;
        for c in dest.chars() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    balanced &= depth >= 0;
                }
                _ => {}
            }
        }
        if dest.is_empty() || dest.chars().any(char::is_whitespace) || !balanced || depth != 0 {
            format!("<{dest}>")
        } else {
            dest.to_string()
        }
    }

    pub fn escape_title(title: &str) -> String {
        let mut out = String::with_capacity(title.len());
        for c in title.chars() {
            if c == '"' || c == '\\' {
                out.push('\\');
            }
            out.push(c);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("[1]: https://x.test", Some("1"))]
    #[case("   [docs]: /docs \"Docs\"", Some("docs"))]
    #[case("    [code]: /x", None)]
    #[case("[^1]: footnote", None)]
    #[case("[empty]:", None)]
    #[case("text [a]: b", None)]
    fn labels(#[case] line: &str, #[case] expected: Option<&str>) {
        assert_eq!(ReferenceDefinition::label(line), expected);
    }

    #[test]
    fn renders_definitions() {
        assert_eq!(
            ReferenceDefinition::render(1, "https://x.test", ""),
            "[1]: https://x.test"
        );
        assert_eq!(
            ReferenceDefinition::render(2, "/a b", "say \"hi\""),
            "[2]: </a b> \"say \\\"hi\\\"\""
        );
        assert_eq!(ReferenceDefinition::render(3, "", ""), "[3]: <>");
        assert_eq!(ReferenceDefinition::render(4, "a)b", ""), "[4]: <a)b>");
        assert_eq!(ReferenceDefinition::render(5, "/a_(b)", ""), "[5]: /a_(b)");
    }
}
