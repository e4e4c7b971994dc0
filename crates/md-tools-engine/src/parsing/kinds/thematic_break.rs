/// Thematic break: three or more of the same `-`, `*` or `_`, spaces allowed.
pub struct ThematicBreak;

impl ThematicBreak {
    pub const MARKERS: [u8; 3] = [b'-', b'*', b'_'];
    pub const MIN_RUN: usize = 3;

    pub fn is_break_line(line: &str) -> bool {
        let marks: Vec<u8> = line.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
        let Some(&first) = marks.first() else {
            return false;
        };
        marks.len() >= Self::MIN_RUN
            && Self::MARKERS.contains(&first)
            && marks.iter().all(|&b| b == first)
    }
}
