//! Flatten overlapping highlights into contiguous color runs.

use super::span::Highlight;
use crate::theme::Color;

/// A run of characters drawn in one color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub from: usize,
    pub to: usize,
    pub color: Color,
}

impl Segment {
    /// Check if `pos` falls inside this segment (end exclusive)
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.from && pos < self.to
    }
}

/// Partition `[0, len)` into runs of equal effective color.
///
/// A character takes the color of the last highlight covering it, or
/// `default` if none does. Out-of-range highlights are clamped. The result is
/// gap-free, non-overlapping and free of empty runs; an empty line has none.
pub fn flatten_highlights(highlights: &[Highlight], len: usize, default: Color) -> Vec<Segment> {
    if len == 0 {
        return Vec::new();
    }

    let mut colors = vec![default; len];
    for highlight in highlights {
        let from = highlight.from.min(len);
        let to = highlight.to.min(len);
        if from < to {
            colors[from..to].fill(highlight.color);
        }
    }

    let mut segments: Vec<Segment> = Vec::new();
    for (i, color) in colors.into_iter().enumerate() {
        match segments.last_mut() {
            Some(last) if last.color == color => last.to = i + 1,
            _ => segments.push(Segment {
                from: i,
                to: i + 1,
                color,
            }),
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: Color = Color::rgb(0xFF, 0, 0);
    const B: Color = Color::rgb(0, 0xFF, 0);
    const D: Color = Color::WHITE;

    fn hl(from: usize, to: usize, color: Color) -> Highlight {
        Highlight { from, to, color }
    }

    fn seg(from: usize, to: usize, color: Color) -> Segment {
        Segment { from, to, color }
    }

    #[test]
    fn test_overlap_last_registered_wins() {
        let segments = flatten_highlights(&[hl(0, 3, A), hl(2, 5, B)], 6, D);
        assert_eq!(segments, vec![seg(0, 2, A), seg(2, 5, B), seg(5, 6, D)]);
    }

    #[test]
    fn test_registration_order_not_position_order() {
        let segments = flatten_highlights(&[hl(2, 5, B), hl(0, 3, A)], 6, D);
        assert_eq!(segments, vec![seg(0, 3, A), seg(3, 5, B), seg(5, 6, D)]);
    }

    #[test]
    fn test_gaps_use_default() {
        let segments = flatten_highlights(&[hl(1, 2, A), hl(4, 5, A)], 6, D);
        assert_eq!(
            segments,
            vec![
                seg(0, 1, D),
                seg(1, 2, A),
                seg(2, 4, D),
                seg(4, 5, A),
                seg(5, 6, D)
            ]
        );
    }

    #[test]
    fn test_adjacent_same_color_merges() {
        let segments = flatten_highlights(&[hl(0, 2, A), hl(2, 4, A)], 4, D);
        assert_eq!(segments, vec![seg(0, 4, A)]);
    }

    #[test]
    fn test_out_of_range_clamped() {
        let segments = flatten_highlights(&[hl(3, 99, A), hl(50, 60, B)], 4, D);
        assert_eq!(segments, vec![seg(0, 3, D), seg(3, 4, A)]);
    }

    #[test]
    fn test_empty_line_has_no_segments() {
        assert!(flatten_highlights(&[hl(0, 3, A)], 0, D).is_empty());
    }

    #[test]
    fn test_no_highlights_single_default_run() {
        assert_eq!(flatten_highlights(&[], 3, D), vec![seg(0, 3, D)]);
    }
}
