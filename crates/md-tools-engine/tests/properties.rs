//! Property tests over generated documents.

use std::collections::HashSet;

use md_tools_engine::{
    Options, Span, Tool, transform,
    xref::{IdentityTable, exclude_ranges, normalize_ranges},
};
use proptest::prelude::*;

const URLS: [&str; 4] = [
    "https://a.test",
    "https://b.test/x",
    "https://c.test/y?q=1",
    "https://d.test/(paren)",
];

#[derive(Debug, Clone)]
enum Piece {
    Word(String),
    Link(String, usize),
}

fn piece(word: &'static str) -> impl Strategy<Value = Piece> {
    prop_oneof![
        3 => word.prop_map(Piece::Word),
        1 => (word, 0..URLS.len()).prop_map(|(text, url)| Piece::Link(text, url)),
    ]
}

/// Paragraphs of words and inline links separated by blank lines.
fn document(word: &'static str) -> impl Strategy<Value = (String, Vec<usize>)> {
    prop::collection::vec(prop::collection::vec(piece(word), 1..20), 1..5).prop_map(|paras| {
        let mut urls = Vec::new();
        let text = paras
            .iter()
            .map(|para| {
                para.iter()
                    .map(|p| match p {
                        Piece::Word(w) => w.clone(),
                        Piece::Link(t, u) => {
                            urls.push(*u);
                            format!("[{t}]({})", URLS[*u])
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n\n");
        (text + "\n", urls)
    })
}

const DESTS: [&str; 3] = ["https://a.test", "/p(x)", "<a)b>"];
const TITLES: [&str; 4] = ["", " \"a)\"", " 'q\"s'", " (p)"];
const LABELS: usize = 4;

#[derive(Debug, Clone)]
enum Rich {
    Word(String),
    Link(String, usize, usize),
    Note(usize),
}

fn rich_piece() -> impl Strategy<Value = Rich> {
    prop_oneof![
        4 => "[a-z]{3,8}".prop_map(Rich::Word),
        2 => ("[a-z]{3,8}", 0..DESTS.len(), 0..TITLES.len())
            .prop_map(|(text, dest, title)| Rich::Link(text, dest, title)),
        1 => (0..LABELS).prop_map(Rich::Note),
    ]
}

/// Paragraphs mixing titled links and footnote references, then footnote
/// definitions that may refer to one another. Returns the document and
/// every word written into it.
fn rich_document() -> impl Strategy<Value = (String, Vec<String>)> {
    let paras = prop::collection::vec(prop::collection::vec(rich_piece(), 1..12), 1..4);
    let defs = prop::collection::vec(
        (
            prop::collection::vec("[a-z]{3,8}", 1..4),
            prop::option::of(0..LABELS),
            any::<bool>(),
        ),
        LABELS,
    );
    (paras, defs).prop_map(|(paras, defs)| {
        let mut words = Vec::new();
        let mut blocks = Vec::new();
        for para in &paras {
            let line: Vec<String> = para
                .iter()
                .map(|p| match p {
                    Rich::Word(w) => {
                        words.push(w.clone());
                        w.clone()
                    }
                    Rich::Link(text, dest, title) => {
                        words.push(text.clone());
                        format!("[{text}]({}{})", DESTS[*dest], TITLES[*title])
                    }
                    Rich::Note(n) => format!("[^n{n}]"),
                })
                .collect();
            blocks.push(line.join(" "));
        }
        for (label, (body, nested, defined)) in defs.iter().enumerate() {
            if !*defined {
                continue;
            }
            words.extend(body.iter().cloned());
            let nested = nested.map(|n| format!("[^n{n}]")).unwrap_or_default();
            blocks.push(format!("[^n{label}]: {}{nested}", body.join(" ")));
        }
        (blocks.join("\n\n") + "\n", words)
    })
}

fn missing<'a>(words: &'a [String], out: &str) -> Vec<&'a str> {
    words
        .iter()
        .filter(|w| !out.contains(w.as_str()))
        .map(String::as_str)
        .collect()
}

fn run(tool: Tool, options: &Options, input: &str) -> String {
    String::from_utf8(transform(tool, options, input.as_bytes()).unwrap()).unwrap()
}

/// Destinations of the `[N]: url` lines, in order.
fn definitions(out: &str) -> Vec<(usize, String)> {
    out.lines()
        .filter_map(|l| {
            let (n, url) = l.strip_prefix('[')?.split_once("]: ")?;
            Some((n.parse().ok()?, url.to_string()))
        })
        .collect()
}

proptest! {
    #[test]
    fn every_tool_is_idempotent((doc, _) in document("[A-Za-z]{1,8}[.!?]?"), width in 10usize..60) {
        let options = Options { wrap_width: width };
        for tool in Tool::ALL {
            let once = run(tool, &options, &doc);
            prop_assert_eq!(run(tool, &options, &once), once, "{}", tool);
        }
    }

    #[test]
    fn cross_reference_tools_are_idempotent_on_rich_documents((doc, _) in rich_document()) {
        let options = Options::default();
        let sidenotes = run(Tool::Sidenote, &options, &doc);
        let inputs = [
            (Tool::Ref, doc.clone()),
            (Tool::Inline, run(Tool::Ref, &options, &doc)),
            (Tool::Sidenote, doc.clone()),
            (Tool::Footnote, sidenotes),
        ];
        for (tool, input) in inputs {
            let once = run(tool, &options, &input);
            prop_assert_eq!(run(tool, &options, &once), once, "{}", tool);
        }
    }

    #[test]
    fn cross_reference_tools_keep_every_word((doc, words) in rich_document()) {
        let options = Options::default();
        let refs = run(Tool::Ref, &options, &doc);
        let inline = run(Tool::Inline, &options, &refs);
        let sidenotes = run(Tool::Sidenote, &options, &doc);
        let footnotes = run(Tool::Footnote, &options, &sidenotes);

        for (tool, out) in [
            (Tool::Ref, &refs),
            (Tool::Inline, &inline),
            (Tool::Sidenote, &sidenotes),
            (Tool::Footnote, &footnotes),
        ] {
            prop_assert!(missing(&words, out).is_empty(), "{} lost {:?}", tool, missing(&words, out));
        }
    }

    #[test]
    fn references_are_deduplicated_in_first_seen_order((doc, urls) in document("[a-z]{1,8}")) {
        let out = run(Tool::Ref, &Options::default(), &doc);
        let defs = definitions(&out);

        let mut seen = HashSet::new();
        let first_seen: Vec<&str> = urls
            .iter()
            .filter(|&&u| seen.insert(u))
            .map(|&u| URLS[u])
            .collect();
        let numbers: Vec<usize> = defs.iter().map(|(n, _)| *n).collect();
        let dests: Vec<&str> = defs.iter().map(|(_, d)| d.as_str()).collect();

        prop_assert_eq!(numbers, (1..=first_seen.len()).collect::<Vec<_>>());
        prop_assert_eq!(dests, first_seen);
        prop_assert!(!out.contains("]("));
    }

    #[test]
    fn inline_undoes_reference((doc, _) in document("[a-z]{1,8}")) {
        let refs = run(Tool::Ref, &Options::default(), &doc);
        prop_assert_eq!(run(Tool::Inline, &Options::default(), &refs), doc);
    }

    #[test]
    fn exclusion_removes_exactly_the_ranges(
        content in "[a-z\n]{0,60}",
        raw in prop::collection::vec((0usize..80, 0usize..20), 0..6),
        content_start in 0usize..10,
    ) {
        let ranges = normalize_ranges(raw.into_iter().map(|(s, l)| Span::new(s, s + l)).collect());
        let expected: String = content
            .char_indices()
            .filter(|(i, _)| !ranges.iter().any(|r| r.contains(content_start + i)))
            .map(|(_, c)| c)
            .collect();
        let got = exclude_ranges(&content, content_start, &ranges);
        prop_assert_eq!(got.as_ref(), expected.as_str());
    }

    #[test]
    fn identity_numbers_are_dense(keys in prop::collection::vec(0u8..10, 0..40)) {
        let table = IdentityTable::from_keys(keys.iter().copied());

        let mut seen = HashSet::new();
        let expected: Vec<(usize, u8)> = keys
            .iter()
            .copied()
            .filter(|k| seen.insert(*k))
            .enumerate()
            .map(|(i, k)| (i + 1, k))
            .collect();
        let entries: Vec<(usize, u8)> = table.entries().map(|(n, k)| (n, *k)).collect();

        prop_assert_eq!(entries, expected);
        for &k in &keys {
            prop_assert!(table.number_of(&k).is_some());
        }
    }
}
