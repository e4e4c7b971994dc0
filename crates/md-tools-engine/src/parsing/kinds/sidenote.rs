use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

/// Tufte-style sidenote literal. Rendered as three lines preceded by a
/// newline; the span body sits on its own line when generated.
pub struct Sidenote;

impl Sidenote {
    pub const SPAN_OPEN: &'static str = "<span class=\"sidenote\">";
    pub const SPAN_CLOSE: &'static str = "</span>";

    /// Renders sidenote `number` with an already-HTML `body`.
    pub fn render(number: usize, body: &str) -> String {
        format!(
            "\n<label for=\"sidenote-{number}\" class=\"margin-toggle sidenote-number\"></label>\n\
             <input type=\"checkbox\" id=\"sidenote-{number}\" class=\"margin-toggle\"/>\n\
             <span class=\"sidenote\">\n{body}\n</span>"
        )
    }

    /// Matches the fixed head of a sidenote up to and including the opening
    /// `<span class="sidenote">`. Group `id` holds the number. The leading
    /// newline is optional only at the very start of the input.
    pub fn head_regex() -> &'static Regex {
        static HEAD: OnceLock<Regex> = OnceLock::new();
        HEAD.get_or_init(|| {
            Regex::new(concat!(
                r#"(?:\A|\n)<label for="sidenote-(?P<id>\d+)" class="margin-toggle sidenote-number"></label>\n"#,
                r#"<input type="checkbox" id="sidenote-\d+" class="margin-toggle"/>\n"#,
                r#"<span class="sidenote">"#,
            ))
            .expect("Invalid sidenote regex")
        })
    }

    /// Given text starting at the opening `<span class="sidenote">`, returns
    /// the length of the body up to its balancing `</span>`, or `None` if it
    /// never closes.
    pub fn body_len(from_open: &str) -> Option<usize> {
        if !from_open.starts_with(Self::SPAN_OPEN) {
            return None;
        }
        let dom = tl::parse(from_open, tl::ParserOptions::default()).ok()?;
        let parser = dom.parser();
        let span = dom.children().first()?.get(parser)?.as_tag()?;
        let raw = span.raw().as_utf8_str();
        if !raw.ends_with(Self::SPAN_CLOSE) {
            return None;
        }
        raw.len()
            .checked_sub(Self::SPAN_OPEN.len() + Self::SPAN_CLOSE.len())
    }

    /// Removes the `<span class="hidden">(</span>` style helpers that some
    /// renderers add around sidenote bodies.
    pub fn strip_hidden(body: &str) -> Cow<'_, str> {
        static HIDDEN: OnceLock<Regex> = OnceLock::new();
        let re = HIDDEN.get_or_init(|| {
            Regex::new(r#"<span class="hidden">\([^<]*</span>|<span class="hidden">\)[^<]*</span>"#)
                .expect("Invalid hidden span regex")
        });
        re.replace_all(body, "")
    }
}
