//! # Layout
//!
//! Line-oriented transforms that change where lines break without touching
//! any construct. Each line is classified on local facts, the
//! [`BlockBuilder`](builder::BlockBuilder) groups lines into verbatim lines,
//! fenced code, paragraphs and blockquotes, and a [`ParagraphLayout`]
//! decides what the paragraphs and blockquotes become.
//!
//! - **[`Wrap`]**: re-flow paragraphs to a target width
//! - **[`Join`]**: one line per paragraph
//! - **[`Split`]**: one line per sentence

pub mod builder;
mod join;
mod split;
mod wrap;

pub use join::Join;
pub use split::Split;
pub use wrap::Wrap;

use log::debug;
use xi_rope::Rope;

use crate::parsing::{LineClass, MarkdownLineClassifier, kinds::BlockQuote, lines_with_spans};
use builder::{BlockBuilder, BlockKind};

/// How a layout transform reshapes the text blocks of a document.
pub trait ParagraphLayout {
    /// Whether a line ending in a hard break closes its paragraph.
    fn hard_break_ends_paragraph(&self) -> bool {
        true
    }

    /// Lays out the lines of one paragraph.
    fn paragraph(&self, lines: &[&str]) -> Vec<String>;

    /// Lays out a run of blockquote lines. Left untouched unless overridden.
    fn block_quote(&self, lines: &[&str]) -> Vec<String> {
        lines.iter().map(ToString::to_string).collect()
    }
}

/// Runs `layout` over every paragraph and blockquote of `source`, copying
/// everything else through. Output ends with exactly one newline.
pub fn relayout(source: &str, layout: &dyn ParagraphLayout) -> String {
    if source.is_empty() {
        return String::new();
    }

    let rope = Rope::from(source);
    let classes: Vec<LineClass> = lines_with_spans(&rope)
        .map(|lr| MarkdownLineClassifier.classify(&lr))
        .collect();

    let mut builder = BlockBuilder::new(layout.hard_break_ends_paragraph());
    for (idx, c) in classes.iter().enumerate() {
        builder.push(idx, c);
    }
    let blocks = builder.finish();
    debug!("laying out {} lines in {} blocks", classes.len(), blocks.len());

    let mut out: Vec<String> = Vec::with_capacity(classes.len());
    for block in &blocks {
        let lines: Vec<&str> = classes[block.lines.clone()]
            .iter()
            .map(|c| c.text.as_str())
            .collect();
        match block.kind {
            BlockKind::Verbatim | BlockKind::FencedCode => {
                out.extend(lines.iter().map(ToString::to_string));
            }
            BlockKind::Paragraph => out.extend(layout.paragraph(&lines)),
            BlockKind::BlockQuote => out.extend(layout.block_quote(&lines)),
        }
    }

    let mut text = out.join("\n");
    text.truncate(text.trim_end_matches('\n').len());
    text.push('\n');
    text
}

/// Joins lines with single spaces, collapsing all runs of whitespace.
pub(crate) fn collapse(lines: &[&str]) -> String {
    lines
        .iter()
        .flat_map(|l| l.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

/// True if the last line ends in a markdown hard break.
pub(crate) fn ends_in_hard_break(lines: &[&str]) -> bool {
    lines
        .last()
        .is_some_and(|l| l.ends_with(MarkdownLineClassifier::HARD_BREAK))
}

/// Lays out a blockquote one quote paragraph at a time.
///
/// Quote paragraphs are separated by empty quote lines (kept as `>`), GFM
/// alert headers (kept on their own line), hard breaks and changes of
/// nesting depth. `fill` turns the collapsed text of a quote paragraph into
/// its output lines, which are re-prefixed at the paragraph's depth.
pub(crate) fn unwrap_quote(lines: &[&str], fill: impl Fn(&str) -> Vec<String>) -> Vec<String> {
    let mut out = Vec::new();
    let mut depth = 0u8;
    let mut pending: Vec<&str> = Vec::new();

    let flush = |out: &mut Vec<String>, depth: u8, pending: &mut Vec<&str>| {
        if pending.is_empty() {
            return;
        }
        let prefix = quote_prefix(depth);
        let hard_break = ends_in_hard_break(pending);
        let mut filled: Vec<String> = fill(&collapse(pending))
            .into_iter()
            .map(|l| format!("{prefix}{l}"))
            .collect();
        if hard_break && let Some(last) = filled.last_mut() {
            last.push_str(MarkdownLineClassifier::HARD_BREAK);
        }
        out.extend(filled);
        pending.clear();
    };

    for &line in lines {
        let (line_depth, offset) = BlockQuote::strip_prefixes(line);
        let content = &line[offset..];

        if line_depth != depth {
            flush(&mut out, depth, &mut pending);
            depth = line_depth;
        }
        if content.trim().is_empty() {
            flush(&mut out, depth, &mut pending);
            out.push(quote_prefix(depth).trim_end().to_string());
        } else if BlockQuote::is_alert_header(content) {
            flush(&mut out, depth, &mut pending);
            out.push(format!("{}{}", quote_prefix(depth), content.trim_end()));
        } else {
            pending.push(content);
            if content.ends_with(MarkdownLineClassifier::HARD_BREAK) {
                flush(&mut out, depth, &mut pending);
            }
        }
    }
    flush(&mut out, depth, &mut pending);
    out
}

fn quote_prefix(depth: u8) -> String {
    format!("{} ", BlockQuote::PREFIX).repeat(usize::from(depth))
}
