/// `>` quote markers and the GitHub alert headers that may open a quote.
pub struct BlockQuote;

impl BlockQuote {
    pub const PREFIX: char = '>';

    /// Opening of an alert header such as `[!NOTE]`.
    pub const ALERT_OPEN: &'static str = "[!";

    /// Counts the `>` markers opening `line` and finds where its content
    /// starts. Spaces before, between and after markers are skipped, so
    /// `>> a`, `> > a` and ` >  a` all work.
    pub fn strip_prefixes(line: &str) -> (u8, usize) {
        let mut depth = 0u8;
        let mut rest = line.trim_start_matches(' ');

        while let Some(after) = rest.strip_prefix(Self::PREFIX) {
            depth = depth.saturating_add(1);
            rest = after.trim_start_matches(' ');
        }
        (depth, line.len() - rest.len())
    }

    pub fn is_quote_line(line: &str) -> bool {
        line.trim_start().starts_with(Self::PREFIX)
    }

    /// True for quote content that has to keep a line of its own.
    pub fn is_alert_header(content: &str) -> bool {
        content.starts_with(Self::ALERT_OPEN) && content.contains(']')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("hello", (0, 0))]
    #[case("> hello", (1, 2))]
    #[case("> > hello", (2, 4))]
    #[case(">> hello", (2, 3))]
    #[case(">   wide", (1, 4))]
    #[case(">", (1, 1))]
    fn strips_markers(#[case] line: &str, #[case] expected: (u8, usize)) {
        assert_eq!(BlockQuote::strip_prefixes(line), expected);
    }

    #[test]
    fn alert_headers() {
        assert!(BlockQuote::is_alert_header("[!NOTE]"));
        assert!(BlockQuote::is_alert_header("[!WARNING] careful"));
        assert!(!BlockQuote::is_alert_header("[link](x)"));
    }
}
