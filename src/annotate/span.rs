//! Raw annotation records and the sink processors write them into.

use crate::theme::Color;

/// Color a range of the line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub from: usize,
    pub to: usize,
    pub color: Color,
}

/// A diagnostic over a range of the line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub from: usize,
    pub to: usize,
    pub message: String,
}

/// Completion text that replaces `[from, caret)` when accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub from: usize,
    pub text: String,
}

/// Receiver for everything a processor reports about one line.
pub trait AnnotationSink {
    fn highlight(&mut self, from: usize, to: usize, color: Color);
    fn suggest(&mut self, from: usize, text: &str);
    fn problem(&mut self, from: usize, to: usize, message: &str);
}

/// Collects records in the order they were reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAnnotations {
    pub highlights: Vec<Highlight>,
    pub suggestions: Vec<Suggestion>,
    pub problems: Vec<Problem>,
}

impl RawAnnotations {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AnnotationSink for RawAnnotations {
    fn highlight(&mut self, from: usize, to: usize, color: Color) {
        self.highlights.push(Highlight { from, to, color });
    }

    fn suggest(&mut self, from: usize, text: &str) {
        self.suggestions.push(Suggestion {
            from,
            text: text.to_string(),
        });
    }

    fn problem(&mut self, from: usize, to: usize, message: &str) {
        self.problems.push(Problem {
            from,
            to,
            message: message.to_string(),
        });
    }
}
