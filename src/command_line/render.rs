//! Drawing the command line onto a [`Surface`]
//!
//! Layout, bottom up: the input band spans the full window width along the
//! bottom edge; the problem panel or the suggestion panel stacks directly
//! above it, one row per entry.

use std::fmt;

use super::{CommandLine, SuggestionMode};
use crate::theme::Color;

/// Gap between the input band and the baseline of a panel's last row
const PANEL_GAP: f32 = 10.0;
/// Panel background extends this far above the first row's text middle
const PANEL_TOP: f32 = 20.0;
/// Selected suggestion backdrop, relative to its row
const SELECTED_INSET: f32 = 5.0;
const SELECTED_RISE: f32 = 15.0;
const SELECTED_HEIGHT: f32 = 27.0;
const SELECTED_RADIUS: f32 = 3.0;
/// Selection and caret reach beyond the text extent
const SELECTION_RISE: f32 = 5.0;
const SELECTION_DROP: f32 = 3.0;
const STROKE_WIDTH: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }
}

/// Drawing primitives in window coordinates
pub trait Surface {
    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn fill_round_rect(&mut self, rect: Rect, radius: f32, color: Color);

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Color);

    /// Left-aligned text whose vertical middle sits at `y`
    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color);
}

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect {
        rect: Rect,
        color: Color,
    },
    FillRoundRect {
        rect: Rect,
        radius: f32,
        color: Color,
    },
    StrokeLine {
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
        color: Color,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        color: Color,
    },
}

impl fmt::Display for DrawOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawOp::FillRect { rect, color } => write!(
                f,
                "rect {:.1},{:.1} {:.1}x{:.1} {}",
                rect.x, rect.y, rect.w, rect.h, color
            ),
            DrawOp::FillRoundRect {
                rect,
                radius,
                color,
            } => write!(
                f,
                "round-rect {:.1},{:.1} {:.1}x{:.1} r{:.1} {}",
                rect.x, rect.y, rect.w, rect.h, radius, color
            ),
            DrawOp::StrokeLine {
                from,
                to,
                width,
                color,
            } => write!(
                f,
                "line {:.1},{:.1} -> {:.1},{:.1} w{:.1} {}",
                from.0, from.1, to.0, to.1, width, color
            ),
            DrawOp::Text {
                text,
                x,
                y,
                size,
                color,
            } => write!(f, "text {:?} at {:.1},{:.1} size {:.1} {}", text, x, y, size, color),
        }
    }
}

/// Surface that records every call, for tests and frame dumps
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded text runs with their colors, in draw order
    pub fn texts(&self) -> Vec<(&str, Color)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, color, .. } => Some((text.as_str(), *color)),
                _ => None,
            })
            .collect()
    }

    /// Recorded lines of the given color
    pub fn lines(&self, color: Color) -> Vec<((f32, f32), (f32, f32))> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::StrokeLine {
                    from,
                    to,
                    color: c,
                    ..
                } if *c == color => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::FillRect { rect, color });
    }

    fn fill_round_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        self.ops.push(DrawOp::FillRoundRect {
            rect,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Color) {
        self.ops.push(DrawOp::StrokeLine {
            from,
            to,
            width,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Color) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            size,
            color,
        });
    }
}

/// Vertical metrics of the input band for one frame
struct BandMetrics {
    /// Vertical middle of the line text
    text_y: f32,
    /// Top of selection and insert caret
    top: f32,
    /// Bottom of selection and insert caret
    bottom: f32,
}

impl BandMetrics {
    /// Underlines sit just above the bottom edge
    fn underline_y(&self) -> f32 {
        self.bottom - STROKE_WIDTH
    }
}

impl CommandLine {
    /// Render the current state. Draws nothing while unfocused.
    pub fn draw(&self, surface: &mut dyn Surface) {
        if !self.focused {
            return;
        }

        let width = self.viewport.width;
        let band_top = self.band_top();
        let bar_height = self.config.bar_height;
        let size = self.config.font_size;

        surface.fill_rect(
            Rect::new(0.0, band_top, width, bar_height),
            self.theme.bar.background,
        );

        let text_y = band_top + bar_height / 2.0;
        let (rise, drop) = self.measure.vertical_extent(size);
        let metrics = BandMetrics {
            text_y,
            top: text_y + rise - SELECTION_RISE,
            bottom: text_y + drop + SELECTION_DROP,
        };

        self.draw_selection(surface, &metrics);
        self.draw_text(surface, &metrics);
        self.draw_problems(surface, &metrics);
        self.draw_suggestions(surface);
        self.draw_caret(surface, &metrics);
    }

    fn x_at(&self, offset: usize) -> f32 {
        self.viewport.screen_x(&self.positions, offset)
    }

    fn draw_selection(&self, surface: &mut dyn Surface, metrics: &BandMetrics) {
        let selection = self.editor.selection();
        if selection.is_empty() {
            return;
        }
        let left = self.x_at(selection.from);
        let right = self.x_at(selection.to);
        surface.fill_rect(
            Rect::new(left, metrics.top, right - left, metrics.bottom - metrics.top),
            self.theme.bar.selection_background,
        );
    }

    /// Highlight segments, split where they cross the selection so the
    /// selected part takes the selection color
    fn draw_text(&self, surface: &mut dyn Surface, metrics: &BandMetrics) {
        let size = self.config.font_size;

        if self.editor.is_empty() {
            surface.draw_text(
                &self.config.placeholder,
                self.viewport.padding - self.viewport.scroll,
                metrics.text_y,
                size,
                self.theme.bar.placeholder,
            );
            return;
        }

        let selection = self.editor.selection();
        let buffer = self.editor.buffer();
        for segment in self.annotations.segments() {
            let sel_from = selection.from.clamp(segment.from, segment.to);
            let sel_to = selection.to.clamp(segment.from, segment.to);
            let pieces = [
                (segment.from, sel_from, segment.color),
                (sel_from, sel_to, self.theme.bar.selection_foreground),
                (sel_to, segment.to, segment.color),
            ];
            for (from, to, color) in pieces {
                if from < to {
                    surface.draw_text(
                        &buffer.slice(from..to),
                        self.x_at(from),
                        metrics.text_y,
                        size,
                        color,
                    );
                }
            }
        }
    }

    fn draw_problems(&self, surface: &mut dyn Surface, metrics: &BandMetrics) {
        let problems = self.annotations.problems();
        if problems.is_empty() {
            return;
        }

        let theme = self.theme.problems;
        let shown = self.annotations.visible_problems();
        let mut y = self.panel_first_row(shown.len());
        self.fill_panel(surface, y, theme.background);
        for problem in shown {
            surface.draw_text(
                &problem.message,
                self.viewport.padding,
                y,
                self.config.font_size,
                theme.foreground,
            );
            y += self.config.row_height;
        }

        let len = self.editor.len();
        for problem in problems {
            let to = problem.to.min(len);
            let start = self.x_at(problem.from.min(len));
            let mut end = self.x_at(to);
            if to < problem.to {
                end += self.positions.end_char_width();
            }
            surface.stroke_line(
                (start, metrics.underline_y()),
                (end, metrics.underline_y()),
                STROKE_WIDTH,
                theme.underline,
            );
        }
    }

    fn draw_suggestions(&self, surface: &mut dyn Surface) {
        let mode = self.suggestion_mode();
        if mode == SuggestionMode::Hidden {
            return;
        }

        let theme = self.theme.suggestions;
        let focused = mode == SuggestionMode::Focused;
        let window = self.annotations.window();
        let shown = self.annotations.visible_suggestions();
        let first_y = self.panel_first_row(shown.len());
        self.fill_panel(surface, first_y, theme.background);

        let mut y = first_y;
        for (i, suggestion) in shown.iter().enumerate() {
            let selected = window.offset + i == window.selected;
            if selected {
                let backdrop = if focused {
                    theme.selected_background
                } else {
                    theme.selected_background_dimmed
                };
                surface.fill_round_rect(
                    Rect::new(
                        SELECTED_INSET,
                        y - SELECTED_RISE,
                        self.viewport.width - 2.0 * SELECTED_INSET,
                        SELECTED_HEIGHT,
                    ),
                    SELECTED_RADIUS,
                    backdrop,
                );
            }

            let color = if selected {
                theme.selected_foreground
            } else if focused {
                theme.foreground
            } else {
                theme.foreground_dimmed
            };
            surface.draw_text(
                &suggestion.text,
                self.x_at(suggestion.from),
                y,
                self.config.font_size,
                color,
            );
            y += self.config.row_height;
        }
    }

    fn draw_caret(&self, surface: &mut dyn Surface, metrics: &BandMetrics) {
        if !self.caret_visible() {
            return;
        }

        let selection = self.editor.selection();
        let pos = selection.head();
        let color = self.theme.bar.caret;
        let x = self.x_at(pos);

        if self.editor.insert_mode() {
            surface.stroke_line((x, metrics.top), (x, metrics.bottom), STROKE_WIDTH, color);
        } else {
            let end = if pos >= self.editor.len() {
                x + self.positions.end_char_width()
            } else {
                self.x_at(pos + 1)
            };
            let y = metrics.underline_y();
            surface.stroke_line((x, y), (end, y), STROKE_WIDTH, color);
        }
    }

    /// Text middle of the first of `rows` panel rows
    fn panel_first_row(&self, rows: usize) -> f32 {
        let rows = rows.max(1) as f32;
        self.band_top() - PANEL_GAP - (rows - 1.0) * self.config.row_height
    }

    fn fill_panel(&self, surface: &mut dyn Surface, first_row: f32, color: Color) {
        let top = first_row - PANEL_TOP;
        surface.fill_rect(
            Rect::new(0.0, top, self.viewport.width, self.band_top() - top),
            color,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::config::CommandLineConfig;
    use crate::editable::ManualClock;
    use crate::keymap::{KeyCode, Keystroke};
    use crate::processor::{LiteralProcessor, LiteralTree};
    use crate::theme::Theme;
    use crate::viewport::TextMeasure;
    use std::rc::Rc;

    struct TenPx;

    impl TextMeasure for TenPx {
        fn width(&self, text: &str, _size: f32) -> f32 {
            text.chars().count() as f32 * 10.0
        }
    }

    fn line(clock: &ManualClock) -> CommandLine {
        let mut line = CommandLine::with_clock(CommandLineConfig::default(), Rc::new(clock.clone()))
            .with_measure(TenPx)
            .with_clipboard(MemoryClipboard::new())
            .with_theme(Theme::fallback())
            .with_processor(LiteralProcessor::new(LiteralTree::demo()));
        line.set_window_size(800.0, 600.0);
        assert!(line.focus());
        line
    }

    fn frame(line: &CommandLine) -> RecordingSurface {
        let mut surface = RecordingSurface::new();
        line.draw(&mut surface);
        surface
    }

    fn text_op<'a>(surface: &'a RecordingSurface, wanted: &str) -> Option<&'a DrawOp> {
        surface
            .ops
            .iter()
            .find(|op| matches!(op, DrawOp::Text { text, .. } if text == wanted))
    }

    #[test]
    fn test_unfocused_draws_nothing() {
        let clock = ManualClock::new();
        let mut line = line(&clock);
        line.blur();
        assert!(frame(&line).ops.is_empty());
    }

    #[test]
    fn test_band_and_placeholder() {
        let clock = ManualClock::new();
        let line = line(&clock);
        let surface = frame(&line);

        assert_eq!(
            surface.ops[0],
            DrawOp::FillRect {
                rect: Rect::new(0.0, 560.0, 800.0, 40.0),
                color: line.theme().bar.background,
            }
        );
        match text_op(&surface, "Type a command...") {
            Some(DrawOp::Text { x, y, color, .. }) => {
                assert_eq!(*x, 20.0);
                assert_eq!(*y, 580.0);
                assert_eq!(*color, line.theme().bar.placeholder);
            }
            other => panic!("placeholder missing: {:?}", other),
        }
    }

    #[test]
    fn test_insert_caret_is_vertical() {
        let clock = ManualClock::new();
        let mut line = line(&clock);
        line.type_str("scene");
        let surface = frame(&line);
        let caret = surface.lines(line.theme().bar.caret);
        // middle 580, extent 8 each way, selection reach 5 up and 3 down
        assert_eq!(caret, vec![((70.0, 567.0), (70.0, 591.0))]);
    }

    #[test]
    fn test_overwrite_caret_at_end_uses_end_char_width() {
        let clock = ManualClock::new();
        let mut line = line(&clock);
        line.type_str("scene");
        line.key_down(Keystroke::key(KeyCode::Insert));
        let surface = frame(&line);
        let caret = surface.lines(line.theme().bar.caret);
        assert_eq!(caret, vec![((70.0, 589.0), (80.0, 589.0))]);
    }

    #[test]
    fn test_caret_blinks() {
        let clock = ManualClock::new();
        let mut line = line(&clock);
        line.type_str("scene");
        clock.advance(700);
        assert!(frame(&line).lines(line.theme().bar.caret).is_empty());
        clock.advance(400);
        assert_eq!(frame(&line).lines(line.theme().bar.caret).len(), 1);
    }

    #[test]
    fn test_selection_splits_segment() {
        let clock = ManualClock::new();
        let mut line = line(&clock);
        line.type_str("scene");
        line.key_down(Keystroke::new(KeyCode::Left, crate::keymap::Modifiers::SHIFT));
        line.key_down(Keystroke::new(KeyCode::Left, crate::keymap::Modifiers::SHIFT));

        let surface = frame(&line);
        let command_color = line.annotations().segments()[0].color;
        let texts = surface.texts();
        assert!(texts.contains(&("sce", command_color)));
        assert!(texts.contains(&("ne", line.theme().bar.selection_foreground)));

        let selection = surface.ops.iter().find(|op| {
            matches!(op, DrawOp::FillRect { color, .. } if *color == line.theme().bar.selection_background)
        });
        assert_eq!(
            selection,
            Some(&DrawOp::FillRect {
                rect: Rect::new(50.0, 567.0, 20.0, 24.0),
                color: line.theme().bar.selection_background,
            })
        );
    }

    #[test]
    fn test_problem_panel_and_underline() {
        let clock = ManualClock::new();
        let mut line = line(&clock);
        line.type_str("fly");
        let surface = frame(&line);
        let theme = line.theme().problems;

        match text_op(&surface, "Unknown argument 'fly'") {
            Some(DrawOp::Text { x, y, color, .. }) => {
                assert_eq!((*x, *y), (20.0, 550.0));
                assert_eq!(*color, theme.foreground);
            }
            other => panic!("problem row missing: {:?}", other),
        }
        assert_eq!(
            surface.lines(theme.underline),
            vec![((20.0, 589.0), (50.0, 589.0))]
        );
    }

    #[test]
    fn test_suggestion_panel_dimmed_then_focused() {
        let clock = ManualClock::new();
        let mut line = line(&clock);
        line.type_str("scene ");
        assert_eq!(line.suggestion_mode(), SuggestionMode::Unfocused);

        let theme = line.theme().suggestions;
        let surface = frame(&line);
        assert!(surface.ops.contains(&DrawOp::FillRoundRect {
            rect: Rect::new(5.0, 510.0, 790.0, 27.0),
            radius: 3.0,
            color: theme.selected_background_dimmed,
        }));
        match text_op(&surface, "arrow") {
            Some(DrawOp::Text { x, y, color, .. }) => {
                assert_eq!((*x, *y), (80.0, 525.0));
                assert_eq!(*color, theme.selected_foreground);
            }
            other => panic!("suggestion row missing: {:?}", other),
        }
        assert!(surface.texts().contains(&("circle", theme.foreground_dimmed)));

        line.key_down(Keystroke::key(KeyCode::Down));
        assert_eq!(line.suggestion_mode(), SuggestionMode::Focused);
        let surface = frame(&line);
        assert!(surface.ops.contains(&DrawOp::FillRoundRect {
            rect: Rect::new(5.0, 535.0, 790.0, 27.0),
            radius: 3.0,
            color: theme.selected_background,
        }));
        assert!(surface.texts().contains(&("arrow", theme.foreground)));
        assert!(surface.texts().contains(&("circle", theme.selected_foreground)));
    }

    #[test]
    fn test_draw_op_display() {
        let op = DrawOp::FillRect {
            rect: Rect::new(0.0, 1.0, 2.0, 3.0),
            color: Color::WHITE,
        };
        assert_eq!(op.to_string(), "rect 0.0,1.0 2.0x3.0 #FFFFFFFF");
    }
}
