/// Byte scanner over a window of the document.
///
/// `offset` is where the window starts in the document, so positions come
/// back in document coordinates whatever slice is being scanned.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    src: &'a str,
    offset: usize,
    idx: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(src: &'a str, offset: usize) -> Self {
        Self {
            src,
            offset,
            idx: 0,
        }
    }

    /// A cursor over the whole document, already at byte `idx`.
    pub fn at(src: &'a str, idx: usize) -> Self {
        Self {
            src,
            offset: 0,
            idx,
        }
    }

    /// Absolute position.
    pub fn pos(&self) -> usize {
        self.offset + self.idx
    }

    pub fn eof(&self) -> bool {
        self.idx >= self.src.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.idx).copied()
    }

    pub fn starts_with(&self, pat: &[u8]) -> bool {
        match self.src.as_bytes().get(self.idx..) {
            Some(rest) => rest.starts_with(pat),
            None => false,
        }
    }

    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.idx += 1;
        Some(b)
    }

    pub fn bump_n(&mut self, n: usize) {
        self.idx += n;
    }

    /// Skips bytes matching `pred` and returns how many were skipped.
    pub fn bump_while(&mut self, pred: impl Fn(u8) -> bool) -> usize {
        let from = self.idx;
        while self.peek().is_some_and(&pred) {
            self.idx += 1;
        }
        self.idx - from
    }

    pub fn rest(&self) -> &'a str {
        self.src.get(self.idx..).unwrap_or_default()
    }
}
