//! Conversions between footnote markdown and the inline HTML carried inside
//! sidenotes.

use pulldown_cmark::{Event, Tag, TagEnd};

/// Renders the events of a footnote definition body as one line of inline
/// HTML. Paragraphs are joined by a single space.
pub fn render_footnote_body(events: &[Event<'_>]) -> String {
    let mut out = String::new();
    let mut paragraphs = 0usize;
    let mut image_depth = 0usize;

    for event in events {
        match event {
            Event::Start(Tag::Paragraph) => {
                if paragraphs > 0 {
                    out.push(' ');
                }
                paragraphs += 1;
            }
            Event::Start(Tag::Image { .. }) => image_depth += 1,
            Event::End(TagEnd::Image) => image_depth = image_depth.saturating_sub(1),
            Event::Text(t) => out.push_str(&html_escape::encode_text(t)),
            _ if image_depth > 0 => {}
            Event::Start(Tag::Emphasis) => out.push_str("<em>"),
            Event::End(TagEnd::Emphasis) => out.push_str("</em>"),
            Event::Start(Tag::Strong) => out.push_str("<strong>"),
            Event::End(TagEnd::Strong) => out.push_str("</strong>"),
            Event::Start(Tag::Strikethrough) => out.push_str("<del>"),
            Event::End(TagEnd::Strikethrough) => out.push_str("</del>"),
            Event::Start(Tag::Link { dest_url, .. }) => {
                out.push_str("<a href=\"");
                out.push_str(&html_escape::encode_double_quoted_attribute(dest_url));
                out.push_str("\">");
            }
            Event::End(TagEnd::Link) => out.push_str("</a>"),
            Event::Code(code) => {
                out.push_str("<code>");
                out.push_str(&html_escape::encode_text(code));
                out.push_str("</code>");
            }
            Event::SoftBreak => out.push(' '),
            Event::HardBreak => out.push_str("<br/>"),
            Event::InlineHtml(html) | Event::Html(html) => out.push_str(html),
            Event::FootnoteReference(label) => {
                out.push_str("[^");
                out.push_str(label);
                out.push(']');
            }
            Event::TaskListMarker(done) => out.push_str(if *done { "[x] " } else { "[ ] " }),
            _ => {}
        }
    }

    out.trim().to_string()
}

/// Elements written as `<name/>` when kept verbatim.
const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "wbr"];

/// Converts sidenote HTML back to inline markdown.
///
/// Formatting tags map to their markdown delimiters, anchors become inline
/// links (or autolinks when the text is the URL), entities are decoded and
/// whitespace collapses to single spaces. Tags without a markdown form are
/// kept as inline HTML.
pub fn html_to_markdown(html: &str) -> String {
    let Ok(dom) = tl::parse(html, tl::ParserOptions::default()) else {
        return collapse_whitespace(&escape_markdown(&html_escape::decode_html_entities(html)));
    };

    let parser = dom.parser();
    let mut out = String::new();
    for handle in dom.children() {
        write_node(*handle, parser, &mut out);
    }
    collapse_whitespace(&out)
}

fn write_node(handle: tl::NodeHandle, parser: &tl::Parser<'_>, out: &mut String) {
    let Some(node) = handle.get(parser) else {
        return;
    };
    match node {
        tl::Node::Tag(tag) => write_tag(tag, parser, out),
        tl::Node::Raw(bytes) => {
            let text = html_escape::decode_html_entities(&bytes.as_utf8_str()).into_owned();
            out.push_str(&escape_markdown(&text));
        }
        tl::Node::Comment(_) => {}
    }
}

fn write_children(tag: &tl::HTMLTag<'_>, parser: &tl::Parser<'_>, out: &mut String) {
    for child in tag.children().top().iter() {
        write_node(*child, parser, out);
    }
}

fn write_tag(tag: &tl::HTMLTag<'_>, parser: &tl::Parser<'_>, out: &mut String) {
    let name = tag.name().as_utf8_str().to_lowercase();
    let delimiter = match name.as_str() {
        "em" | "i" => Some("*"),
        "strong" | "b" => Some("**"),
        "del" | "s" | "strike" => Some("~~"),
        _ => None,
    };
    if let Some(delimiter) = delimiter {
        out.push_str(delimiter);
        write_children(tag, parser, out);
        out.push_str(delimiter);
        return;
    }

    match name.as_str() {
        "code" => {
            let code = html_escape::decode_html_entities(&tag.inner_text(parser)).into_owned();
            out.push_str(&code_span(&code));
        }
        "a" => {
            let href = tag
                .attributes()
                .get("href")
                .flatten()
                .map(|v| html_escape::decode_html_entities(&v.as_utf8_str()).into_owned())
                .unwrap_or_default();
            let mut text = String::new();
            write_children(tag, parser, &mut text);
            let text = collapse_whitespace(&text);
            if text.is_empty() || text == href {
                out.push_str(&format!("<{href}>"));
            } else {
                out.push_str(&format!("[{text}]({href})"));
            }
        }
        _ => {
            out.push('<');
            out.push_str(&name);
            for (key, value) in tag.attributes().iter() {
                out.push(' ');
                out.push_str(&key);
                if let Some(value) = value {
                    out.push_str("=\"");
                    out.push_str(&value);
                    out.push('"');
                }
            }
            if VOID_TAGS.contains(&name.as_str()) {
                out.push_str("/>");
                return;
            }
            out.push('>');
            write_children(tag, parser, out);
            out.push_str(&format!("</{name}>"));
        }
    }
}

/// Wraps `code` in enough backticks that none inside can close it.
fn code_span(code: &str) -> String {
    let longest = code
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest + 1);
    if longest > 0 {
        format!("{fence} {code} {fence}")
    } else {
        format!("{fence}{code}{fence}")
    }
}

/// Backslash-escapes characters that would otherwise start markdown syntax.
/// Underscores are only escaped where they could open or close emphasis.
pub fn escape_markdown(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    for (idx, &c) in chars.iter().enumerate() {
        let escape = match c {
            '\\' | '*' | '`' | '[' | ']' | '<' => true,
            '_' => {
                let before = idx.checked_sub(1).map(|p| chars[p]);
                let after = chars.get(idx + 1).copied();
                !before.is_some_and(char::is_alphanumeric) || !after.is_some_and(char::is_alphanumeric)
            }
            _ => false,
        };
        if escape {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
