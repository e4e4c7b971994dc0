use std::sync::OnceLock;

use regex::Regex;

/// Footnote marker `[^label]` and definition opener `[^label]:`.
pub struct FootnoteMarker;

impl FootnoteMarker {
    pub const OPEN: &'static [u8; 2] = b"[^";
    pub const CLOSE: u8 = b']';
    /// A colon right after the closing bracket turns a marker into a definition.
    pub const DEFINITION: u8 = b':';

    /// True if `line` starts a footnote definition.
    pub fn is_definition_line(line: &str) -> bool {
        static DEFINITION_LINE: OnceLock<Regex> = OnceLock::new();
        let re = DEFINITION_LINE
            .get_or_init(|| Regex::new(r"^\[\^[^\]]+\]:").expect("Invalid footnote definition regex"));
        re.is_match(line)
    }

    /// The literal that opens the definition of `label`.
    pub fn definition_opener(label: &str) -> String {
        format!("[^{label}]:")
    }

    /// The reference marker for `label`.
    pub fn reference(label: &str) -> String {
        format!("[^{label}]")
    }
}
