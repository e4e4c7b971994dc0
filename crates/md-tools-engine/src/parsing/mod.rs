//! # Parsing
//!
//! Shared syntax knowledge used by every transform.
//!
//! - **`span`**, **`lines`**, **`cursor`**: byte positions, line iteration
//!   over a rope, and a byte cursor for raw scanners
//! - **`kinds`**: construct-specific types owning their delimiters
//! - **`classify`**: per-line classification for the layout transforms
//! - **`syntax`**: the pulldown-cmark adapter reporting link, footnote and
//!   code-zone anchors in document order

pub mod classify;
pub mod cursor;
pub mod kinds;
pub mod lines;
pub mod span;
pub mod syntax;

pub use classify::{LineClass, LineKind, MarkdownLineClassifier};
pub use cursor::Cursor;
pub use lines::{LineRef, lines_with_spans};
pub use span::Span;
pub use syntax::{FootnoteDefNode, FootnoteRefNode, LinkNode, LinkShape, RefDefNode, SyntaxTree};
