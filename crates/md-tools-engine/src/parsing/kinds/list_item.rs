use std::sync::OnceLock;

use regex::Regex;

/// List item opener: `-`, `*` or `+` followed by a space, or `N.` followed by
/// whitespace. Indentation is ignored so nested items match too.
pub struct ListItem;

impl ListItem {
    pub const BULLETS: [u8; 3] = [b'-', b'*', b'+'];

    pub fn is_list_line(line: &str) -> bool {
        let trimmed = line.trim();
        let b = trimmed.as_bytes();
        if b.len() > 1 && Self::BULLETS.contains(&b[0]) && b[1] == b' ' {
            return true;
        }
        static ORDERED: OnceLock<Regex> = OnceLock::new();
        let ordered = ORDERED.get_or_init(|| Regex::new(r"^\d+\.\s").expect("Invalid list regex"));
        ordered.is_match(trimmed)
    }
}
