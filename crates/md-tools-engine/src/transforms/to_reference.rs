use log::debug;

use super::{Transform, to_inline::inline_token};
use crate::{
    parsing::{SyntaxTree, kinds::ReferenceDefinition},
    xref::{
        Identity, IdentityTable, OccurrenceKind, Replacement, assemble,
        collect::{accept, collect_links, pending_labels, reference_definitions},
        normalize_ranges,
    },
};

/// `mdref`: inline links become numbered reference links.
///
/// Links are numbered by first appearance of their `(url, title)` pair and
/// the old reference definitions are replaced by one canonical block at the
/// end. Inline images stay inline; reference images are written inline
/// since their definitions go away. A definition still used by a link that
/// could not be rewritten stays where it is.
pub struct ToReference;

impl Transform for ToReference {
    fn apply(&self, source: &str) -> String {
        let tree = SyntaxTree::parse(source);
        let existing = reference_definitions(&tree, source);
        let fenced = normalize_ranges(existing.iter().map(|d| d.range).collect());
        let occurrences = accept(collect_links(&tree, source), &fenced);

        let table = IdentityTable::from_keys(
            occurrences
                .iter()
                .filter(|o| !o.is_image)
                .map(|o| o.identity.clone()),
        );

        let mut rewritten = Vec::new();
        let replacements: Vec<Replacement> = occurrences
            .iter()
            .filter_map(|o| {
                let token = if o.is_image {
                    if o.kind == OccurrenceKind::InlineLink {
                        return None;
                    }
                    inline_token(o)?
                } else {
                    format!("[{}][{}]", o.text, table.number_of(&o.identity)?)
                };
                rewritten.push(o);
                Some(Replacement {
                    span: o.span,
                    token,
                })
            })
            .collect();

        let pending = pending_labels(&tree, rewritten);
        let stale = normalize_ranges(
            existing
                .iter()
                .filter(|d| !pending.contains(&d.label))
                .map(|d| d.range)
                .collect(),
        );

        let definitions: Vec<String> = table
            .entries()
            .filter_map(|(n, id)| match id {
                Identity::Link { url, title } => Some(ReferenceDefinition::render(n, url, title)),
                _ => None,
            })
            .collect();

        debug!(
            "mdref: {} links, {} definitions, {} stale lines",
            replacements.len(),
            definitions.len(),
            stale.len()
        );
        assemble(source, &replacements, &stale, &definitions)
    }
}
