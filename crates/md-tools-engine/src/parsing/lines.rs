use xi_rope::Rope;

use super::span::Span;

/// One physical line of the document.
#[derive(Debug, Clone)]
pub struct LineRef {
    /// Absolute span, line terminator included.
    pub span: Span,
    pub text: String,
}

impl LineRef {
    /// The line without its terminator.
    pub fn content(&self) -> &str {
        self.text.trim_end_matches(['\r', '\n'])
    }
}

/// Every line of `rope` with its span. The spans tile the document, so
/// concatenating the lines gives back the input exactly.
pub fn lines_with_spans(rope: &Rope) -> impl Iterator<Item = LineRef> + '_ {
    rope.lines_raw(..).scan(0usize, |end, line| {
        let start = *end;
        *end += line.len();
        Some(LineRef {
            span: Span::new(start, *end),
            text: line.into_owned(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_tile_the_document() {
        let rope = Rope::from("one\ntwo\n\nthree");
        let lines: Vec<_> = lines_with_spans(&rope).collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].span, Span::new(0, 4));
        assert_eq!(lines[2].span, Span::new(8, 9));
        assert_eq!(lines[3].span, Span::new(9, 14));
        assert_eq!(lines[3].content(), "three");
    }

    #[test]
    fn content_strips_crlf() {
        let rope = Rope::from("a\r\nb");
        let lines: Vec<_> = lines_with_spans(&rope).collect();
        assert_eq!(lines[0].content(), "a");
        assert_eq!(lines[0].text, "a\r\n");
    }
}
