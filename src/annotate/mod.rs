//! Annotation normalizer
//!
//! Turns the raw, unordered records a [`CommandProcessor`] reports for the
//! current line into display-ready state:
//!
//! - highlights become a gap-free partition of color [`Segment`]s
//! - suggestions are sorted by text and browsed through a [`ListWindow`],
//!   keeping the selected entry by value across re-processing
//! - problems are sorted by start offset and capped to the window height
//!
//! Processing only re-runs when the line text differs from the last
//! processed text.

mod segments;
mod span;
mod window;

pub use segments::{flatten_highlights, Segment};
pub use span::{AnnotationSink, Highlight, Problem, RawAnnotations, Suggestion};
pub use window::{ListWindow, VISIBLE_ROWS};

use crate::processor::CommandProcessor;
use crate::theme::Color;

/// Normalized annotations for the last processed line.
#[derive(Debug, Clone)]
pub struct Annotations {
    processed: Option<String>,
    segments: Vec<Segment>,
    suggestions: Vec<Suggestion>,
    problems: Vec<Problem>,
    window: ListWindow,
    problem_rows: usize,
    /// Problem bound to one exact line text, dropped once the text changes
    pinned: Option<(String, Problem)>,
}

impl Annotations {
    pub fn new(rows: usize) -> Self {
        Self {
            processed: None,
            segments: Vec::new(),
            suggestions: Vec::new(),
            problems: Vec::new(),
            window: ListWindow::new(rows),
            problem_rows: rows.max(1),
            pinned: None,
        }
    }

    /// Whether `text` differs from what was last processed
    pub fn is_stale(&self, text: &str) -> bool {
        self.processed.as_deref() != Some(text)
    }

    /// Forget everything so the next refresh runs unconditionally
    pub fn invalidate(&mut self) {
        self.processed = None;
        self.segments.clear();
        self.suggestions.clear();
        self.problems.clear();
        self.window.reset();
        self.pinned = None;
    }

    /// Re-run `processor` if `text` changed since the last run.
    ///
    /// Returns whether processing happened.
    pub fn refresh(
        &mut self,
        text: &str,
        caret: usize,
        processor: &mut dyn CommandProcessor,
        default: Color,
    ) -> bool {
        if !self.is_stale(text) {
            return false;
        }

        let mut raw = RawAnnotations::new();
        if let Err(e) = processor.process(text, caret, &mut raw) {
            tracing::warn!("Processor failed on {:?}: {:#}", text, e);
            raw.suggestions.clear();
        }
        self.apply(text, raw, default);
        true
    }

    /// Replace all state with the normalized form of `raw`
    pub fn apply(&mut self, text: &str, raw: RawAnnotations, default: Color) {
        let previous = self.selected_suggestion().cloned();
        let RawAnnotations {
            highlights,
            mut suggestions,
            mut problems,
        } = raw;

        let len = text.chars().count();
        self.segments = flatten_highlights(&highlights, len, default);

        suggestions.sort_by(|a, b| a.text.cmp(&b.text));
        self.suggestions = suggestions;
        let selected = previous
            .and_then(|prev| self.suggestions.iter().position(|s| *s == prev))
            .unwrap_or(0);
        self.window.select(selected, self.suggestions.len());

        if self.pinned.as_ref().is_some_and(|(pinned, _)| pinned != text) {
            self.pinned = None;
        }
        if let Some((_, problem)) = &self.pinned {
            problems.push(problem.clone());
        }
        problems.sort_by_key(|p| p.from);
        self.problems = problems;

        self.processed = Some(text.to_string());
        tracing::trace!(
            segments = self.segments.len(),
            suggestions = self.suggestions.len(),
            problems = self.problems.len(),
            "Annotations refreshed"
        );
    }

    /// Attach a problem covering all of `text` until the line changes
    pub fn pin_problem(&mut self, text: &str, message: &str) {
        let problem = Problem {
            from: 0,
            to: text.chars().count(),
            message: message.to_string(),
        };
        if !self.is_stale(text) {
            self.problems.push(problem.clone());
            self.problems.sort_by_key(|p| p.from);
        }
        self.pinned = Some((text.to_string(), problem));
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// All suggestions, sorted by text
    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    /// All problems, sorted by start offset
    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn has_problems(&self) -> bool {
        !self.problems.is_empty()
    }

    pub fn has_suggestions(&self) -> bool {
        !self.suggestions.is_empty()
    }

    /// Suggestions inside the scroll window
    pub fn visible_suggestions(&self) -> &[Suggestion] {
        &self.suggestions[self.window.visible(self.suggestions.len())]
    }

    /// Problems shown in the panel
    pub fn visible_problems(&self) -> &[Problem] {
        &self.problems[..self.problems.len().min(self.problem_rows)]
    }

    pub fn window(&self) -> ListWindow {
        self.window
    }

    pub fn selected_suggestion(&self) -> Option<&Suggestion> {
        self.suggestions.get(self.window.selected)
    }

    pub fn select_next_suggestion(&mut self) {
        self.window.select_next(self.suggestions.len());
    }

    pub fn select_prev_suggestion(&mut self) {
        self.window.select_prev(self.suggestions.len());
    }
}

impl Default for Annotations {
    fn default() -> Self {
        Self::new(VISIBLE_ROWS)
    }
}
