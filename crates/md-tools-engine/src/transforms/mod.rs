//! # Transforms
//!
//! One [`Transform`] per tool. Every transform is a pure function from a
//! markdown document to its rewritten form; applying one twice gives the
//! same result as applying it once.

pub mod to_footnote;
pub mod to_inline;
pub mod to_reference;
pub mod to_sidenote;

use std::fmt;

use crate::{
    error::TransformError,
    frontmatter,
    layout::{Join, Split, Wrap},
};

pub use to_footnote::ToFootnote;
pub use to_inline::ToInline;
pub use to_reference::ToReference;
pub use to_sidenote::ToSidenote;

pub const DEFAULT_WRAP_WIDTH: usize = 80;

/// A whole-document rewrite.
pub trait Transform {
    /// Rewrites a document body (frontmatter already removed).
    fn apply(&self, source: &str) -> String;

    /// Rewrites a full document, passing any frontmatter through untouched.
    fn apply_document(&self, source: &str) -> String {
        let (head, body) = frontmatter::split(source);
        if head.is_empty() {
            return self.apply(body);
        }
        let mut out = head.to_string();
        out.push_str(&self.apply(body));
        out
    }
}

/// Settings that tune individual transforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Target line width for `mdwrap`.
    pub wrap_width: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            wrap_width: DEFAULT_WRAP_WIDTH,
        }
    }
}

/// The seven tools of the suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    Ref,
    Inline,
    Sidenote,
    Footnote,
    Wrap,
    Join,
    Split,
}

impl Tool {
    pub const ALL: [Tool; 7] = [
        Tool::Ref,
        Tool::Inline,
        Tool::Sidenote,
        Tool::Footnote,
        Tool::Wrap,
        Tool::Join,
        Tool::Split,
    ];

    /// The binary name.
    pub fn name(self) -> &'static str {
        match self {
            Tool::Ref => "mdref",
            Tool::Inline => "mdinline",
            Tool::Sidenote => "mdsidenote",
            Tool::Footnote => "mdfootnote",
            Tool::Wrap => "mdwrap",
            Tool::Join => "mdjoin",
            Tool::Split => "mdsplit",
        }
    }

    /// One-line description for help output.
    pub fn about(self) -> &'static str {
        match self {
            Tool::Ref => "Convert inline links to numbered reference-style links",
            Tool::Inline => "Convert reference-style links to inline links",
            Tool::Sidenote => "Convert markdown footnotes to Tufte CSS sidenotes",
            Tool::Footnote => "Convert Tufte CSS sidenotes to markdown footnotes",
            Tool::Wrap => "Wrap paragraphs to a fixed width",
            Tool::Join => "Join wrapped paragraphs onto single lines",
            Tool::Split => "Put each sentence on its own line",
        }
    }

    pub fn transformer(self, options: &Options) -> Box<dyn Transform> {
        match self {
            Tool::Ref => Box::new(ToReference),
            Tool::Inline => Box::new(ToInline),
            Tool::Sidenote => Box::new(ToSidenote),
            Tool::Footnote => Box::new(ToFootnote),
            Tool::Wrap => Box::new(Wrap::new(options.wrap_width)),
            Tool::Join => Box::new(Join),
            Tool::Split => Box::new(Split),
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runs `tool` over raw document bytes.
pub fn transform(tool: Tool, options: &Options, input: &[u8]) -> Result<Vec<u8>, TransformError> {
    let source = std::str::from_utf8(input)?;
    Ok(tool.transformer(options).apply_document(source).into_bytes())
}
