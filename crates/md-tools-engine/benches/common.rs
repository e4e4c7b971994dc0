// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_linked_content(size: usize) -> String {
    let base = "# Title\n\nParagraph with [a link](https://example.test/page) and a second\n[reference][r] plus a note.[^n] Another sentence follows here. And one more!\n\n> A quoted line with [another link](https://example.test/other \"Other\").\n\n```rust\nlet link = \"[not](https://code.test)\";\n```\n\n";
    let mut content = base.repeat(size);
    content.push_str("[r]: https://example.test/reference\n[^n]: A footnote with *emphasis*.\n");
    content
}
