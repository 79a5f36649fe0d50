//! Selection state for the command line.

/// A selected range plus the side the caret sits on.
///
/// `from <= to` always holds. `left` marks the caret as sitting at `from`;
/// otherwise the caret is at `to`. An empty selection is a plain caret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub from: usize,
    pub to: usize,
    pub left: bool,
}

impl Selection {
    pub fn new(from: usize, to: usize) -> Self {
        let mut sel = Self {
            from,
            to,
            left: false,
        };
        sel.normalize(usize::MAX);
        sel
    }

    /// Create a collapsed selection (caret with no selection)
    pub fn caret(pos: usize) -> Self {
        Self {
            from: pos,
            to: pos,
            left: false,
        }
    }

    /// Check if selection is empty (from == to)
    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    pub fn len(&self) -> usize {
        self.to - self.from
    }

    /// Offset of the active end
    pub fn head(&self) -> usize {
        if self.left {
            self.from
        } else {
            self.to
        }
    }

    /// Offset of the fixed end
    pub fn anchor(&self) -> usize {
        if self.left {
            self.to
        } else {
            self.from
        }
    }

    /// Move the active end to `pos`, flipping direction when it crosses the anchor
    pub fn extend_to(&mut self, pos: usize) {
        let anchor = self.anchor();
        if pos < anchor {
            self.from = pos;
            self.to = anchor;
            self.left = true;
        } else {
            self.from = anchor;
            self.to = pos;
            self.left = false;
        }
    }

    /// Collapse onto `pos`
    pub fn collapse_to(&mut self, pos: usize) {
        self.from = pos;
        self.to = pos;
        self.left = false;
    }

    /// Swap reversed bounds and clamp both into `[0, len]`
    pub fn normalize(&mut self, len: usize) {
        if self.from > self.to {
            std::mem::swap(&mut self.from, &mut self.to);
            self.left = !self.left;
        }
        self.from = self.from.min(len);
        self.to = self.to.min(len);
    }

    /// Check if a position is within this selection (end exclusive)
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.from && pos < self.to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_caret() {
        let sel = Selection::caret(4);
        assert!(sel.is_empty());
        assert_eq!(sel.head(), 4);
        assert_eq!(sel.anchor(), 4);
    }

    #[test]
    fn test_selection_new_swaps() {
        let sel = Selection::new(5, 2);
        assert_eq!((sel.from, sel.to), (2, 5));
        assert!(sel.left);
    }

    #[test]
    fn test_extend_crosses_anchor() {
        let mut sel = Selection::caret(3);
        sel.extend_to(5);
        assert_eq!((sel.from, sel.to, sel.left), (3, 5, false));

        sel.extend_to(1);
        assert_eq!((sel.from, sel.to, sel.left), (1, 3, true));
        assert_eq!(sel.head(), 1);
    }

    #[test]
    fn test_normalize_clamps() {
        let mut sel = Selection {
            from: 2,
            to: 10,
            left: false,
        };
        sel.normalize(4);
        assert_eq!((sel.from, sel.to), (2, 4));
    }

    #[test]
    fn test_selection_contains() {
        let sel = Selection::new(2, 5);
        assert!(!sel.contains(1));
        assert!(sel.contains(2));
        assert!(sel.contains(4));
        assert!(!sel.contains(5));
    }
}
