#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceKind {
    Backticks,
    Tildes,
}

/// What a single line looks like as a fence: marker, run width, and whether
/// anything follows the run (an info string disqualifies a closing fence).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceSig {
    pub kind: FenceKind,
    pub width: usize,
    pub bare: bool,
}

pub struct CodeFence;

impl CodeFence {
    pub const BACKTICK: u8 = b'`';
    pub const TILDE: u8 = b'~';
    pub const MIN_WIDTH: usize = 3;
    /// A fence may be indented by at most this many spaces.
    pub const MAX_INDENT: usize = 3;

    pub fn sig(remainder: &str) -> Option<FenceSig> {
        let t = remainder.trim_end_matches(['\r', '\n']);
        let indent = t.bytes().take_while(|&b| b == b' ').count();
        if indent > Self::MAX_INDENT {
            return None;
        }
        let t = &t[indent..];
        let marker = *t.as_bytes().first()?;
        let kind = match marker {
            Self::BACKTICK => FenceKind::Backticks,
            Self::TILDE => FenceKind::Tildes,
            _ => return None,
        };
        let width = t.bytes().take_while(|&b| b == marker).count();
        if width < Self::MIN_WIDTH {
            return None;
        }
        let info = &t[width..];
        if kind == FenceKind::Backticks && info.contains('`') {
            return None;
        }
        Some(FenceSig {
            kind,
            width,
            bare: info.trim().is_empty(),
        })
    }

    /// Whether a line with signature `sig` closes a fence opened by `open`:
    /// same marker, at least as wide, and no info string.
    pub fn closes(open: FenceSig, sig: Option<FenceSig>) -> bool {
        sig.is_some_and(|s| s.kind == open.kind && s.width >= open.width && s.bare)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fence(kind: FenceKind, width: usize, bare: bool) -> Option<FenceSig> {
        Some(FenceSig { kind, width, bare })
    }

    #[test]
    fn detect_backtick_fence() {
        assert_eq!(
            CodeFence::sig("```rust"),
            fence(FenceKind::Backticks, 3, false)
        );
    }

    #[test]
    fn detect_tilde_fence() {
        assert_eq!(CodeFence::sig("~~~~\n"), fence(FenceKind::Tildes, 4, true));
    }

    #[test]
    fn no_fence() {
        assert_eq!(CodeFence::sig("hello"), None);
        assert_eq!(CodeFence::sig("``not"), None);
        assert_eq!(CodeFence::sig("    ```"), None);
        assert_eq!(CodeFence::sig("``` a`b"), None);
    }

    #[test]
    fn closes_matching_fence() {
        let open = FenceSig {
            kind: FenceKind::Backticks,
            width: 3,
            bare: false,
        };
        assert!(CodeFence::closes(open, CodeFence::sig("```")));
        assert!(CodeFence::closes(open, CodeFence::sig("`````")));
    }

    #[test]
    fn does_not_close_mismatched_fence() {
        let open = FenceSig {
            kind: FenceKind::Backticks,
            width: 4,
            bare: true,
        };
        assert!(!CodeFence::closes(open, CodeFence::sig("~~~~")));
        assert!(!CodeFence::closes(open, CodeFence::sig("```")));
        assert!(!CodeFence::closes(open, CodeFence::sig("```` info")));
        assert!(!CodeFence::closes(open, None));
    }
}
