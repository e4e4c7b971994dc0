pub mod error;
pub mod frontmatter;
pub mod html;
pub mod layout;
pub mod parsing;
pub mod transforms;
pub mod xref;

// Re-export key types for easier usage
pub use error::TransformError;
pub use parsing::Span;
pub use transforms::{Options, Tool, Transform, transform};
