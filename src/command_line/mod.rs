//! The command line widget
//!
//! [`CommandLine`] owns the line editor and everything around it: focus,
//! the suggestion panel, history recall, pointer selection, horizontal
//! scrolling and the key dispatch table. Input arrives through
//! [`CommandLine::key_down`], [`CommandLine::char_input`] and the pointer
//! methods; [`CommandLine::tick`] runs once per frame before
//! [`CommandLine::draw`].

mod input;
mod render;

pub use render::{DrawOp, Rect, RecordingSurface, Surface};

use serde::Serialize;
use std::rc::Rc;

use crate::annotate::Annotations;
use crate::clipboard::{Clipboard, SystemClipboard};
use crate::command_history::CommandHistory;
use crate::config::CommandLineConfig;
use crate::editable::{Clock, LineEditor, SystemClock};
use crate::keymap::{default_bindings, KeyContext, Keymap};
use crate::processor::CommandProcessor;
use crate::theme::Theme;
use crate::viewport::{CharPositions, MonospaceMeasure, TextMeasure, Viewport};

const DEFAULT_WINDOW_WIDTH: f32 = 800.0;
const DEFAULT_WINDOW_HEIGHT: f32 = 600.0;

/// How the suggestion panel is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionMode {
    Hidden,
    /// Shown dimmed; Enter submits
    Unfocused,
    /// Shown highlighted; Enter accepts the selected suggestion
    Focused,
}

/// Pointer shape to show at a window position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerIcon {
    Default,
    Text,
}

/// A submitted line and what the processor made of it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub text: String,
    pub error: Option<String>,
}

impl Submission {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

pub struct CommandLine {
    editor: LineEditor,
    annotations: Annotations,
    history: CommandHistory,
    positions: CharPositions,
    viewport: Viewport,
    window_height: f32,
    measure: Box<dyn TextMeasure>,
    keymap: Keymap,
    processor: Option<Box<dyn CommandProcessor>>,
    clipboard: Box<dyn Clipboard>,
    clock: Rc<dyn Clock>,
    config: CommandLineConfig,
    theme: Theme,

    focused: bool,
    suggestions_focused: bool,
    navigating_history: bool,
    /// Boundary the pointer grabbed, while a drag is in progress
    drag_anchor: Option<usize>,
    pointer_x: f32,
    blink_origin: u64,
    submissions: Vec<Submission>,
}

impl std::fmt::Debug for CommandLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandLine")
            .field("editor", &self.editor)
            .field("focused", &self.focused)
            .field("suggestion_mode", &self.suggestion_mode())
            .field("navigating_history", &self.navigating_history)
            .field("scroll", &self.viewport.scroll)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Construction
// =============================================================================

impl CommandLine {
    /// A command line on the wall clock and the system clipboard
    pub fn new(config: CommandLineConfig) -> Self {
        Self::with_clock(config, Rc::new(SystemClock::new()))
    }

    pub fn with_clock(config: CommandLineConfig, clock: Rc<dyn Clock>) -> Self {
        let theme = crate::theme::load_theme(&config.theme).unwrap_or_else(|e| {
            tracing::warn!("Failed to load theme '{}': {}", config.theme, e);
            Theme::default()
        });

        let viewport = Viewport {
            scroll: 0.0,
            width: DEFAULT_WINDOW_WIDTH,
            padding: config.padding,
            overshoot: config.scroll_overshoot,
            trailing_space: config.trailing_space,
        };

        let mut line = Self {
            editor: LineEditor::with_policy(clock.clone(), config.coalesce_policy()),
            annotations: Annotations::new(config.visible_rows),
            history: CommandHistory::new(),
            positions: CharPositions::new(),
            viewport,
            window_height: DEFAULT_WINDOW_HEIGHT,
            measure: Box::new(MonospaceMeasure::default()),
            keymap: Keymap::with_bindings(default_bindings()),
            processor: None,
            clipboard: Box::new(SystemClipboard),
            blink_origin: clock.now_ms(),
            clock,
            config,
            theme,
            focused: false,
            suggestions_focused: false,
            navigating_history: false,
            drag_anchor: None,
            pointer_x: 0.0,
            submissions: Vec::new(),
        };
        line.refresh();
        line
    }

    pub fn with_keymap(mut self, keymap: Keymap) -> Self {
        self.keymap = keymap;
        self
    }

    pub fn with_measure(mut self, measure: impl TextMeasure + 'static) -> Self {
        self.measure = Box::new(measure);
        self.positions.invalidate();
        self.refresh();
        self
    }

    pub fn with_clipboard(mut self, clipboard: impl Clipboard + 'static) -> Self {
        self.clipboard = Box::new(clipboard);
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        // Segment colors default to the theme foreground
        self.annotations.invalidate();
        self.refresh();
        self
    }

    pub fn with_processor(mut self, processor: impl CommandProcessor + 'static) -> Self {
        self.set_processor(Box::new(processor));
        self
    }

    pub fn set_processor(&mut self, processor: Box<dyn CommandProcessor>) {
        self.processor = Some(processor);
        self.annotations.invalidate();
        self.refresh();
    }

    /// Window size in pixels; the input band sits along the bottom edge
    pub fn set_window_size(&mut self, width: f32, height: f32) {
        self.viewport.width = width;
        self.window_height = height;
        self.viewport.clamp_scroll(&self.positions);
    }
}

// =============================================================================
// Accessors
// =============================================================================

impl CommandLine {
    pub fn text(&self) -> &str {
        self.editor.text()
    }

    pub fn editor(&self) -> &LineEditor {
        &self.editor
    }

    pub fn annotations(&self) -> &Annotations {
        &self.annotations
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn positions(&self) -> &CharPositions {
        &self.positions
    }

    pub fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    pub fn config(&self) -> &CommandLineConfig {
        &self.config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_navigating_history(&self) -> bool {
        self.navigating_history
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Lines submitted so far, oldest first
    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    /// Whether and how the suggestion panel is shown
    pub fn suggestion_mode(&self) -> SuggestionMode {
        if !self.focused
            || self.annotations.has_problems()
            || !self.annotations.has_suggestions()
            || self.navigating_history
            || self.editor.has_selection()
        {
            return SuggestionMode::Hidden;
        }
        if self.suggestions_focused {
            SuggestionMode::Focused
        } else if self.editor.is_empty() {
            SuggestionMode::Hidden
        } else {
            SuggestionMode::Unfocused
        }
    }

    /// State the keymap's conditional bindings are evaluated against
    pub fn key_context(&self) -> KeyContext {
        let mode = self.suggestion_mode();
        KeyContext {
            has_selection: self.editor.has_selection(),
            suggestions_visible: mode != SuggestionMode::Hidden,
            suggestions_focused: mode == SuggestionMode::Focused,
            navigating_history: self.navigating_history,
        }
    }

    /// Top of the input band in window coordinates
    pub fn band_top(&self) -> f32 {
        self.window_height - self.config.bar_height
    }

    pub fn pointer_icon(&self, y: f32) -> PointerIcon {
        if y < self.band_top() && !self.is_dragging() {
            PointerIcon::Default
        } else {
            PointerIcon::Text
        }
    }

    /// Whether the caret is in the drawn half of its blink cycle
    pub fn caret_visible(&self) -> bool {
        let elapsed = self.clock.now_ms().saturating_sub(self.blink_origin);
        self.config.caret_visible(elapsed)
    }
}

// =============================================================================
// Focus & Lifecycle
// =============================================================================

impl CommandLine {
    /// Start a fresh line. Refused without a processor.
    pub fn focus(&mut self) -> bool {
        if self.processor.is_none() {
            tracing::debug!("Focus refused: no command processor");
            return false;
        }

        self.editor.reset();
        self.focused = true;
        self.blink_origin = self.clock.now_ms();
        self.annotations.invalidate();
        self.suggestions_focused = false;
        self.navigating_history = false;
        self.drag_anchor = None;
        self.viewport.scroll = 0.0;
        self.refresh();

        tracing::debug!("Command line focused");
        true
    }

    /// Leave the command line, keeping its text
    pub fn blur(&mut self) {
        if self.focused {
            tracing::debug!("Command line unfocused");
        }
        self.focused = false;
        self.drag_anchor = None;
    }

    /// Replace the line, caret at the end, undo history reset
    pub fn set_text(&mut self, text: &str) {
        self.editor.set_text(text);
        self.refresh();
        self.scroll_to(self.editor.len());
    }

    /// Re-measure and re-annotate if the text changed
    fn refresh(&mut self) {
        let text = self.editor.text();
        self.positions
            .update(text, self.measure.as_ref(), self.config.font_size);
        if let Some(processor) = self.processor.as_deref_mut() {
            self.annotations.refresh(
                text,
                self.editor.caret(),
                processor,
                self.theme.bar.foreground,
            );
        }
    }

    fn scroll_to(&mut self, offset: usize) {
        self.viewport
            .scroll_into_view(&self.positions, offset, self.drag_anchor.is_some());
    }
}
