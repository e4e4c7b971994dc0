//! YAML frontmatter detection.
//!
//! Two forms are recognised. The usual one opens with `---` followed by a
//! `key: value` line and closes at the next `---`. The bare form starts
//! straight away with a `key: value` line and is closed by a `---` line that
//! comes before any blank line.

const DELIMITER: &str = "---";

/// A `key: value` looking line: a colon somewhere after the first character.
pub fn looks_like_property(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed == DELIMITER {
        return false;
    }
    trimmed.find(':').is_some_and(|idx| idx > 0)
}

fn is_delimiter(line: &str) -> bool {
    line.trim() == DELIMITER
}

/// Splits `source` into `(frontmatter, body)`. The frontmatter includes its
/// closing delimiter line and newline; it is empty when none is present.
pub fn split(source: &str) -> (&str, &str) {
    let mut lines = source.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return ("", source);
    };

    let opened = if is_delimiter(first) {
        match lines.clone().next() {
            Some(second) if looks_like_property(second) => true,
            _ => return ("", source),
        }
    } else if looks_like_property(first) {
        false
    } else {
        return ("", source);
    };

    let mut end = first.len();
    for line in lines {
        end += line.len();
        if is_delimiter(line) {
            return source.split_at(end);
        }
        if !opened && line.trim().is_empty() {
            break;
        }
    }
    ("", source)
}
