/// ATX heading, recognised by its leading `#`.
pub struct Heading;

impl Heading {
    pub const MARKER: char = '#';

    pub fn is_heading_line(line: &str) -> bool {
        line.starts_with(Self::MARKER)
    }
}
