use log::debug;

use super::Transform;
use crate::{
    parsing::{SyntaxTree, kinds::ReferenceDefinition},
    xref::{
        Identity, Occurrence, OccurrenceKind, Replacement, assemble,
        collect::{accept, collect_links, pending_labels, reference_definitions},
        normalize_ranges,
    },
};

/// `mdinline`: reference, collapsed and shortcut links (and images) become
/// inline links, and the reference definitions are dropped. Definitions
/// still used by a link that could not be rewritten are kept.
pub struct ToInline;

impl Transform for ToInline {
    fn apply(&self, source: &str) -> String {
        let tree = SyntaxTree::parse(source);
        let existing = reference_definitions(&tree, source);
        let fenced = normalize_ranges(existing.iter().map(|d| d.range).collect());
        let links: Vec<Occurrence> = collect_links(&tree, source)
            .into_iter()
            .filter(|o| o.kind == OccurrenceKind::RefLink)
            .collect();
        let rewritten = accept(links, &fenced);
        let replacements: Vec<Replacement> = rewritten
            .iter()
            .filter_map(|o| {
                Some(Replacement {
                    span: o.span,
                    token: inline_token(o)?,
                })
            })
            .collect();

        let pending = pending_labels(&tree, &rewritten);
        let stale = normalize_ranges(
            existing
                .iter()
                .filter(|d| !pending.contains(&d.label))
                .map(|d| d.range)
                .collect(),
        );

        debug!("mdinline: {} links", replacements.len());
        assemble(source, &replacements, &stale, &[])
    }
}

/// Renders a link or image occurrence in inline form.
pub(crate) fn inline_token(o: &Occurrence) -> Option<String> {
    let Identity::Link { url, title } = &o.identity else {
        return None;
    };
    let bang = if o.is_image { "!" } else { "" };
    let dest = ReferenceDefinition::destination(url);
    Some(if title.is_empty() {
        format!("{bang}[{}]({dest})", o.text)
    } else {
        format!(
            "{bang}[{}]({dest} \"{}\")",
            o.text,
            ReferenceDefinition::escape_title(title)
        )
    })
}
