use std::sync::OnceLock;

use regex::Regex;

use super::{ParagraphLayout, relayout};
use crate::{
    parsing::{LineKind, MarkdownLineClassifier},
    transforms::Transform,
};

/// Re-flows paragraphs to a target width. Blockquotes are left as they are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wrap {
    width: usize,
}

impl Wrap {
    pub fn new(width: usize) -> Self {
        Self { width }
    }
}

impl Transform for Wrap {
    fn apply(&self, source: &str) -> String {
        relayout(source, self)
    }
}

impl ParagraphLayout for Wrap {
    fn hard_break_ends_paragraph(&self) -> bool {
        false
    }

    fn paragraph(&self, lines: &[&str]) -> Vec<String> {
        fill(&tokenize(&lines.join(" ")), self.width)
    }
}

/// Greedy fill. A token may overflow the width when it carries a link, or
/// when starting a line with it would turn the line into another block kind.
fn fill(tokens: &[String], width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut line = String::new();
    let mut line_width = 0usize;

    for token in tokens {
        let token_width = token.chars().count();
        if line.is_empty() {
            line.push_str(token);
            line_width = token_width;
            continue;
        }
        if line_width + 1 + token_width <= width || contains_link(token) || opens_block(token) {
            line.push(' ');
            line.push_str(token);
            line_width += 1 + token_width;
        } else {
            out.push(std::mem::take(&mut line));
            line.push_str(token);
            line_width = token_width;
        }
    }

    if !line.is_empty() {
        out.push(line);
    }
    out
}

fn link_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\[[^\]]+\](\([^\)]+\)|\[[^\]]*\])").expect("Invalid link token regex")
    })
}

/// True for tokens carrying an inline or reference link.
fn contains_link(token: &str) -> bool {
    token.contains('[') && link_regex().is_match(token)
}

/// True if a line starting with `token` would no longer be paragraph text.
fn opens_block(token: &str) -> bool {
    MarkdownLineClassifier.kind(&format!("{token} x")) != LineKind::Text
}

/// Splits paragraph text into words. Link constructs are atomic: their
/// inner spaces never split, and they glue to the characters around them.
fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut i = 0usize;

    while let Some(ch) = text[i..].chars().next() {
        if ch == ' ' || ch == '\t' {
            if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
            i += 1;
            continue;
        }
        if ch == '['
            && let Some(end) = link_construct_end(text, i)
        {
            current.push_str(&text[i..end]);
            i = end;
            continue;
        }
        current.push(ch);
        i += ch.len_utf8();
    }

    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// End of the link construct opening at `pos`: `[..](..)`, `[..][..]` or a
/// bare `[..]`.
fn link_construct_end(text: &str, pos: usize) -> Option<usize> {
    let close = matching(text, pos, b'[', b']')?;
    let end = close + 1;
    let tail = match text.as_bytes().get(end) {
        Some(b'(') => matching(text, end, b'(', b')'),
        Some(b'[') => matching(text, end, b'[', b']'),
        _ => None,
    };
    Some(tail.map_or(end, |t| t + 1))
}

/// Index of the delimiter balancing the `open` at `pos`, on the same line.
fn matching(text: &str, pos: usize, open: u8, close: u8) -> Option<usize> {
    let mut depth = 0usize;
    for (i, &b) in text.as_bytes().iter().enumerate().skip(pos) {
        if b == open {
            depth += 1;
        } else if b == close {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        } else if b == b'\n' {
            return None;
        }
    }
    None
}
