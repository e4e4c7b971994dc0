use std::collections::HashSet;

use log::debug;

use super::Transform;
use crate::{
    parsing::{Span, SyntaxTree, kinds::Sidenote},
    xref::{
        IdentityTable, Replacement, assemble,
        collect::{accept, collect_footnote_refs, collect_sidenotes, footnote_definition_ranges},
        normalize_ranges,
    },
};

/// `mdsidenote`: footnote references become Tufte-style sidenotes carrying
/// the definition's body as HTML.
///
/// Sidenotes are numbered by first appearance of each footnote, whatever
/// label it had. References without a definition are left alone, and so
/// are definitions nothing outside another definition refers to.
pub struct ToSidenote;

impl Transform for ToSidenote {
    fn apply(&self, source: &str) -> String {
        let tree = SyntaxTree::parse(source);
        let defined = tree.defined_footnotes();

        let mut refs: Vec<_> = collect_footnote_refs(&tree, source)
            .into_iter()
            .filter(|o| defined.contains(&o.text.to_lowercase()))
            .collect();
        let sidenotes: Vec<Span> = collect_sidenotes(source, &tree.code_zones)
            .iter()
            .map(|o| o.span)
            .collect();

        // A reference inside a definition that is being moved goes with it,
        // so it no longer keeps its own definition in use.
        let (occurrences, stale) = loop {
            let used: HashSet<String> = refs.iter().map(|o| o.text.to_lowercase()).collect();
            let stale = normalize_ranges(footnote_definition_ranges(
                tree.footnote_defs
                    .iter()
                    .filter(|d| used.contains(&d.label.to_lowercase())),
                &tree.code_zones,
                source,
            ));
            let mut fenced = stale.clone();
            fenced.extend_from_slice(&sidenotes);
            let kept = accept(refs.clone(), &normalize_ranges(fenced));
            if kept.len() == refs.len() {
                break (kept, stale);
            }
            refs = kept;
        };

        let table = IdentityTable::from_keys(occurrences.iter().map(|o| o.identity.clone()));

        let replacements: Vec<Replacement> = occurrences
            .iter()
            .filter_map(|o| {
                let number = table.number_of(&o.identity)?;
                let def = tree.footnote_def(&o.text)?;
                Some(Replacement {
                    span: o.span,
                    token: Sidenote::render(number, &def.html),
                })
            })
            .collect();

        debug!(
            "mdsidenote: {} references, {} sidenotes",
            replacements.len(),
            table.len()
        );
        assemble(source, &replacements, &stale, &[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    fn run(src: &str) -> String {
        ToSidenote.apply(src)
    }

    #[test]
    fn converts_footnote_to_sidenote() {
        assert_snapshot!(run("text[^1]\n\n[^1]: note.\n"), @r#"
        text
        <label for="sidenote-1" class="margin-toggle sidenote-number"></label>
        <input type="checkbox" id="sidenote-1" class="margin-toggle"/>
        <span class="sidenote">
        note.
        </span>
        "#);
    }

    #[test]
    fn numbers_follow_first_appearance_not_labels() {
        let out = run("A[^z] B[^a] C[^z].\n\n[^a]: first\n[^z]: last\n");
        let needle = "id=\"sidenote-";
        let ids: Vec<_> = out
            .match_indices(needle)
            .map(|(i, _)| &out[i + needle.len()..i + needle.len() + 1])
            .collect();
        assert_eq!(ids, vec!["1", "2", "1"]);
        assert!(out.contains("<span class=\"sidenote\">\nlast\n</span>"));
        assert!(!out.contains("[^a]:"));
    }

    #[test]
    fn undefined_reference_is_left_alone() {
        let src = "Dangling[^nope] text.\n";
        assert_eq!(run(src), src);
    }

    #[test]
    fn body_markup_becomes_html() {
        let out = run("x[^1]\n\n[^1]: *very* `so` [l](https://l.test)\n");
        assert!(out.contains(
            "<em>very</em> <code>so</code> <a href=\"https://l.test\">l</a>"
        ));
    }

    #[test]
    fn idempotent() {
        let once = run("a[^1] b[^2]\n\n[^1]: one\n[^2]: two\n");
        assert_eq!(run(&once), once);
    }

    #[test]
    fn definition_only_used_inside_another_is_kept() {
        let out = run("A[^a].\n\n[^a]: see[^b]\n[^b]: bee\n");
        assert!(out.contains("<span class=\"sidenote\">\nsee[^b]\n</span>."));
        assert!(out.ends_with("\n\n[^b]: bee\n"));
        assert!(!out.contains("[^a]:"));
        assert_eq!(run(&out), out);
    }

    #[test]
    fn definition_used_in_body_and_inside_another_moves() {
        let out = run("A[^a] B[^b].\n\n[^a]: see[^b]\n\n[^b]: bee\n");
        assert!(out.contains("\nsee[^b]\n</span>"));
        assert!(out.contains("\nbee\n</span>"));
        assert!(!out.contains("[^b]:"));
    }
}
