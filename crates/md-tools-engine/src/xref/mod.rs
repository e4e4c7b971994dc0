//! # Cross-Reference Rewriting
//!
//! The core shared by the reference and footnote converters.
//!
//! ## Pipeline
//!
//! 1. **Collect** (`collect`): walk the syntax tree in document order and
//!    resolve each construct's exact extent (`extent`) into an `Occurrence`
//! 2. **Number** (`identity`): fold occurrence identities into a dense
//!    first-appearance `IdentityTable`
//! 3. **Exclude** (`exclude`): normalize the ranges of stale definitions
//! 4. **Assemble** (`assemble`): copy gaps with exclusions applied,
//!    substitute tokens, append the canonical definition block
//!
//! ## Key Invariants
//!
//! - Bytes outside occurrences and exclusions are copied verbatim
//! - Numbers start at 1, are dense and follow first appearance
//! - Constructs inside code are never rewritten
//! - A pass with no occurrences changes nothing

pub mod assemble;
pub mod collect;
pub mod exclude;
pub mod extent;
pub mod identity;
pub mod occurrence;

pub use assemble::assemble;
pub use exclude::{exclude_ranges, normalize_ranges};
pub use extent::{Construct, MarkerCandidate, resolve_extent};
pub use identity::IdentityTable;
pub use occurrence::{Identity, Occurrence, OccurrenceKind, Replacement};
