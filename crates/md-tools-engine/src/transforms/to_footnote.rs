use std::collections::HashMap;

use log::debug;

use super::Transform;
use crate::{
    html::html_to_markdown,
    parsing::{
        SyntaxTree,
        kinds::{FootnoteMarker, Sidenote},
    },
    xref::{
        Identity, IdentityTable, Replacement, assemble,
        collect::{accept, collect_sidenotes},
    },
};

/// `mdfootnote`: sidenote literals become footnote references with a
/// definition block at the end. Sidenote ids are renumbered by first
/// appearance; when an id repeats, the first body wins.
pub struct ToFootnote;

impl Transform for ToFootnote {
    fn apply(&self, source: &str) -> String {
        let tree = SyntaxTree::parse(source);
        let occurrences = accept(collect_sidenotes(source, &tree.code_zones), &[]);
        let table = IdentityTable::from_keys(occurrences.iter().map(|o| o.identity.clone()));

        let mut bodies: HashMap<&Identity, String> = HashMap::new();
        for o in &occurrences {
            bodies
                .entry(&o.identity)
                .or_insert_with(|| html_to_markdown(Sidenote::strip_hidden(&o.text).trim()));
        }

        let replacements: Vec<Replacement> = occurrences
            .iter()
            .filter_map(|o| {
                let n = table.number_of(&o.identity)?;
                Some(Replacement {
                    span: o.span,
                    token: FootnoteMarker::reference(&n.to_string()),
                })
            })
            .collect();

        let definitions: Vec<String> = table
            .entries()
            .filter_map(|(n, id)| {
                let body = bodies.get(id)?;
                (!body.is_empty())
                    .then(|| format!("{} {body}", FootnoteMarker::definition_opener(&n.to_string())))
            })
            .collect();

        debug!(
            "mdfootnote: {} sidenotes, {} footnotes",
            replacements.len(),
            definitions.len()
        );
        assemble(source, &replacements, &[], &definitions)
    }
}
