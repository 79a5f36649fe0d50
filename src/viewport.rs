//! Horizontal scrolling for the input bar
//!
//! Character offsets are mapped to pixel positions through a
//! [`TextMeasure`], cached per line text in [`CharPositions`]. [`Viewport`]
//! keeps a given offset on screen and clamps the scroll offset to the
//! content.

/// Character appended when measuring prefixes, so trailing spaces keep their width
pub const END_CHAR: &str = "_";

/// Text measurement service
pub trait TextMeasure {
    /// Advance width of `text` at `size` pixels
    fn width(&self, text: &str, size: f32) -> f32;

    /// Top and bottom of a line of text, relative to its vertical middle
    fn vertical_extent(&self, size: f32) -> (f32, f32) {
        (-size * 0.5, size * 0.5)
    }
}

/// Fixed advance per character, as a fraction of the font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    pub advance: f32,
}

impl MonospaceMeasure {
    pub fn new(advance: f32) -> Self {
        Self { advance }
    }
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn width(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * self.advance
    }
}

/// Pixel x of every character boundary `0..=len`, cached per text.
#[derive(Debug, Clone, Default)]
pub struct CharPositions {
    text: Option<String>,
    positions: Vec<f32>,
    end_char_width: f32,
}

impl CharPositions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute for `text` if it differs from the cached text.
    ///
    /// Returns whether a recompute happened.
    pub fn update(&mut self, text: &str, measure: &dyn TextMeasure, size: f32) -> bool {
        if self.text.as_deref() == Some(text) {
            return false;
        }

        self.end_char_width = measure.width(END_CHAR, size);
        self.positions.clear();
        self.positions.push(0.0);

        let mut prefix = String::with_capacity(text.len() + END_CHAR.len());
        for c in text.chars() {
            prefix.push(c);
            let stem_len = prefix.len();
            prefix.push_str(END_CHAR);
            self.positions
                .push(measure.width(&prefix, size) - self.end_char_width);
            prefix.truncate(stem_len);
        }

        self.text = Some(text.to_string());
        true
    }

    /// Drop the cache so the next update recomputes
    pub fn invalidate(&mut self) {
        self.text = None;
    }

    /// Position of boundary `offset`, clamped to the last boundary
    pub fn at(&self, offset: usize) -> f32 {
        match self.positions.get(offset) {
            Some(&x) => x,
            None => self.positions.last().copied().unwrap_or(0.0),
        }
    }

    /// Width of the whole line
    pub fn total(&self) -> f32 {
        self.positions.last().copied().unwrap_or(0.0)
    }

    /// Width of [`END_CHAR`], used for caret and underline past the end
    pub fn end_char_width(&self) -> f32 {
        self.end_char_width
    }

    /// Number of boundaries (characters + 1)
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Boundary nearest to content-space `x`.
    ///
    /// Ties go to the earlier boundary, and the scan stops at the first
    /// boundary right of `x`.
    pub fn hit_test(&self, x: f32) -> usize {
        let mut nearest = 0;
        let mut best = f32::INFINITY;
        for (i, &left) in self.positions.iter().enumerate() {
            let dist = (left - x).abs();
            if dist < best {
                best = dist;
                nearest = i;
            }
            if left > x {
                break;
            }
        }
        nearest
    }
}

/// Horizontal scroll state of the input bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Current scroll offset in pixels
    pub scroll: f32,
    /// Window width in pixels
    pub width: f32,
    /// Left/right text inset
    pub padding: f32,
    /// Extra distance scrolled past a target so typing has room
    pub overshoot: f32,
    /// Blank space allowed after the end of the text
    pub trailing_space: f32,
}

impl Viewport {
    pub fn new(width: f32) -> Self {
        Self {
            scroll: 0.0,
            width,
            padding: 20.0,
            overshoot: 100.0,
            trailing_space: 100.0,
        }
    }

    /// Width available to text
    pub fn visible_width(&self) -> f32 {
        self.width - 2.0 * self.padding
    }

    /// Window x of boundary `offset`
    pub fn screen_x(&self, positions: &CharPositions, offset: usize) -> f32 {
        self.padding + positions.at(offset) - self.scroll
    }

    /// Convert a window x into content space
    pub fn content_x(&self, window_x: f32) -> f32 {
        window_x - self.padding + self.scroll
    }

    /// Scroll so boundary `offset` is visible.
    ///
    /// Overshoots by [`Viewport::overshoot`] unless `dragging`.
    pub fn scroll_into_view(&mut self, positions: &CharPositions, offset: usize, dragging: bool) {
        let off = positions.at(offset) - self.scroll;
        let bias = if dragging { 0.0 } else { self.overshoot };

        if off < self.padding {
            self.scroll -= self.padding - off + bias;
        }
        let visible = self.visible_width();
        if off > visible {
            self.scroll += off - visible + bias;
        }

        self.clamp_scroll(positions);
    }

    /// Pin scroll to `[0, content - visible]`, or 0 if the content fits
    pub fn clamp_scroll(&mut self, positions: &CharPositions) {
        let content = positions.total() + self.trailing_space;
        let range = content - self.visible_width();
        if range <= 0.0 {
            self.scroll = 0.0;
        } else {
            self.scroll = self.scroll.clamp(0.0, range);
        }
    }

    /// Scroll toward a pointer held past either edge, by `factor` of the overshoot.
    ///
    /// Returns whether the pointer was past an edge.
    pub fn edge_scroll(&mut self, pointer_x: f32, factor: f32) -> bool {
        let right_edge = self.width - self.padding;
        if pointer_x > right_edge {
            self.scroll += factor * (pointer_x - right_edge);
            true
        } else if pointer_x < self.padding {
            self.scroll -= factor * (self.padding - pointer_x);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 10px per character at any size
    struct TenPx;

    impl TextMeasure for TenPx {
        fn width(&self, text: &str, _size: f32) -> f32 {
            text.chars().count() as f32 * 10.0
        }
    }

    fn positions(text: &str) -> CharPositions {
        let mut positions = CharPositions::new();
        positions.update(text, &TenPx, 16.0);
        positions
    }

    #[test]
    fn test_positions_per_boundary() {
        let positions = positions("abc ");
        assert_eq!(positions.len(), 5);
        assert_eq!(positions.at(0), 0.0);
        assert_eq!(positions.at(4), 40.0);
        assert_eq!(positions.at(99), 40.0);
        assert_eq!(positions.end_char_width(), 10.0);
    }

    #[test]
    fn test_update_only_on_change() {
        let mut positions = CharPositions::new();
        assert!(positions.update("ab", &TenPx, 16.0));
        assert!(!positions.update("ab", &TenPx, 16.0));
        assert!(positions.update("abc", &TenPx, 16.0));
        positions.invalidate();
        assert!(positions.update("abc", &TenPx, 16.0));
    }

    #[test]
    fn test_monospace_measure() {
        let measure = MonospaceMeasure::new(0.5);
        assert_eq!(measure.width("abcd", 16.0), 32.0);
    }

    #[test]
    fn test_hit_test_nearest() {
        let positions = positions("abcd");
        assert_eq!(positions.hit_test(-5.0), 0);
        assert_eq!(positions.hit_test(14.0), 1);
        assert_eq!(positions.hit_test(16.0), 2);
        assert_eq!(positions.hit_test(500.0), 4);
    }

    #[test]
    fn test_hit_test_tie_prefers_earlier() {
        let positions = positions("abcd");
        assert_eq!(positions.hit_test(15.0), 1);
    }

    #[test]
    fn test_clamp_when_content_fits() {
        let positions = positions("short");
        let mut viewport = Viewport::new(400.0);
        viewport.scroll = 50.0;
        viewport.clamp_scroll(&positions);
        assert_eq!(viewport.scroll, 0.0);
    }

    #[test]
    fn test_clamp_to_content() {
        // 50 chars = 500px + 100 trailing, visible 160
        let positions = positions(&"x".repeat(50));
        let mut viewport = Viewport::new(200.0);
        viewport.scroll = 1000.0;
        viewport.clamp_scroll(&positions);
        assert_eq!(viewport.scroll, 440.0);

        viewport.scroll = -10.0;
        viewport.clamp_scroll(&positions);
        assert_eq!(viewport.scroll, 0.0);
    }

    #[test]
    fn test_scroll_into_view_right_with_overshoot() {
        let positions = positions(&"x".repeat(50));
        let mut viewport = Viewport::new(200.0);
        viewport.scroll_into_view(&positions, 20, false);
        // off 200 > visible 160: scroll by 40 + 100
        assert_eq!(viewport.scroll, 140.0);
    }

    #[test]
    fn test_scroll_into_view_while_dragging() {
        let positions = positions(&"x".repeat(50));
        let mut viewport = Viewport::new(200.0);
        viewport.scroll_into_view(&positions, 20, true);
        assert_eq!(viewport.scroll, 40.0);
    }

    #[test]
    fn test_scroll_into_view_left() {
        let positions = positions(&"x".repeat(50));
        let mut viewport = Viewport::new(200.0);
        viewport.scroll = 300.0;
        viewport.scroll_into_view(&positions, 25, false);
        // off = 250 - 300 = -50: scroll back by 70 + 100
        assert_eq!(viewport.scroll, 130.0);
    }

    #[test]
    fn test_edge_scroll() {
        let mut viewport = Viewport::new(200.0);
        assert!(viewport.edge_scroll(230.0, 0.1));
        assert!((viewport.scroll - 5.0).abs() < 1e-4);
        assert!(viewport.edge_scroll(0.0, 0.1));
        assert!((viewport.scroll - 3.0).abs() < 1e-4);
        assert!(!viewport.edge_scroll(100.0, 0.1));
    }
}
