//! # Syntax Kinds
//!
//! Construct-specific types that own their delimiters and line predicates.
//! Scanners and classifiers call into these; they never hardcode `[^`, `>`
//! or fence markers themselves.

pub mod block_quote;
pub mod code_fence;
pub mod footnote;
pub mod heading;
pub mod list_item;
pub mod reference;
pub mod sidenote;
pub mod thematic_break;

pub use block_quote::BlockQuote;
pub use code_fence::{CodeFence, FenceKind, FenceSig};
pub use footnote::FootnoteMarker;
pub use heading::Heading;
pub use list_item::ListItem;
pub use reference::ReferenceDefinition;
pub use sidenote::Sidenote;
pub use thematic_break::ThematicBreak;
