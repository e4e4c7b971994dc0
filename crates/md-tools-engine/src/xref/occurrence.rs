use crate::parsing::Span;

/// Where a construct is *used* in the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccurrenceKind {
    InlineLink,
    RefLink,
    FootnoteRef,
    Sidenote,
}

/// The deduplication key of an occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identity {
    /// Destination and title, both compared verbatim.
    Link { url: String, title: String },
    /// Footnote label, lower-cased.
    Footnote(String),
    /// The number a sidenote carried in the source.
    Sidenote(u64),
}

/// One resolved use of a construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    /// Exact extent in the source.
    pub span: Span,
    pub kind: OccurrenceKind,
    pub identity: Identity,
    /// Link text as written, footnote label, or sidenote body HTML.
    pub text: String,
    pub is_image: bool,
    /// Normalized label of a reference-shaped link, otherwise empty.
    pub label: String,
}

/// What the assembler substitutes for one occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub span: Span,
    pub token: String,
}
