//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use cmdline::annotate::AnnotationSink;
use cmdline::clipboard::MemoryClipboard;
use cmdline::editable::ManualClock;
use cmdline::keymap::parse_key_string;
use cmdline::theme::{Color, Theme};
use cmdline::{CommandLine, CommandLineConfig, CommandProcessor, TextMeasure};

pub const HIGHLIGHT: Color = Color::rgb(0x11, 0x22, 0x33);

/// 10px per character at any size
#[derive(Debug, Clone, Copy)]
pub struct FixedWidth;

impl TextMeasure for FixedWidth {
    fn width(&self, text: &str, _size: f32) -> f32 {
        text.chars().count() as f32 * 10.0
    }
}

/// What the scripted processor reports and what it saw
#[derive(Debug, Default)]
pub struct ScriptState {
    /// Words suggested when they start with the word under the caret
    pub vocabulary: Vec<String>,
    /// Problems reported for every line
    pub problems: Vec<(usize, usize, String)>,
    /// Highlight the first word of every line
    pub highlight_first_word: bool,
    /// Fail `process` after reporting everything
    pub fail_process: bool,
    /// Error message returned by `on_command`
    pub reject: Option<String>,
    /// `(text, caret)` of every process call
    pub processed: Vec<(String, usize)>,
    pub executed: Vec<String>,
}

/// Processor driven by a shared [`ScriptState`]. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct ScriptedProcessor {
    pub state: Rc<RefCell<ScriptState>>,
}

impl ScriptedProcessor {
    pub fn with_vocabulary(words: &[&str]) -> Self {
        let processor = Self::default();
        processor.state.borrow_mut().vocabulary = words.iter().map(|w| w.to_string()).collect();
        processor
    }
}

impl CommandProcessor for ScriptedProcessor {
    fn process(
        &mut self,
        text: &str,
        caret: usize,
        sink: &mut dyn AnnotationSink,
    ) -> anyhow::Result<()> {
        let mut state = self.state.borrow_mut();
        state.processed.push((text.to_string(), caret));

        let chars: Vec<char> = text.chars().collect();
        let caret = caret.min(chars.len());
        let start = chars[..caret]
            .iter()
            .rposition(|&c| c == ' ')
            .map_or(0, |i| i + 1);
        let prefix: String = chars[start..caret].iter().collect();
        for word in &state.vocabulary {
            if word.starts_with(&prefix) {
                sink.suggest(start, word);
            }
        }

        for (from, to, message) in &state.problems {
            sink.problem(*from, *to, message);
        }

        if state.highlight_first_word {
            let end = chars.iter().position(|&c| c == ' ').unwrap_or(chars.len());
            sink.highlight(0, end, HIGHLIGHT);
        }

        if state.fail_process {
            anyhow::bail!("processor failure");
        }
        Ok(())
    }

    fn on_command(&mut self, text: &str) -> anyhow::Result<()> {
        let mut state = self.state.borrow_mut();
        if let Some(message) = &state.reject {
            anyhow::bail!("{}", message);
        }
        state.executed.push(text.to_string());
        Ok(())
    }
}

/// A focused 800x600 command line on a manual clock and memory clipboard
pub struct Harness {
    pub line: CommandLine,
    pub clock: ManualClock,
    pub clipboard: MemoryClipboard,
    pub processor: ScriptedProcessor,
}

impl Harness {
    pub fn new(processor: ScriptedProcessor) -> Self {
        Self::with_config(processor, CommandLineConfig::default())
    }

    pub fn with_config(processor: ScriptedProcessor, config: CommandLineConfig) -> Self {
        let clock = ManualClock::new();
        let clipboard = MemoryClipboard::new();
        let mut line = CommandLine::with_clock(config, Rc::new(clock.clone()))
            .with_measure(FixedWidth)
            .with_clipboard(clipboard.clone())
            .with_theme(Theme::fallback())
            .with_processor(processor.clone());
        line.set_window_size(800.0, 600.0);
        assert!(line.focus());
        Self {
            line,
            clock,
            clipboard,
            processor,
        }
    }

    pub fn plain() -> Self {
        Self::new(ScriptedProcessor::default())
    }

    /// Press a key given as a binding string such as `"shift+left"`
    pub fn press(&mut self, key: &str) -> bool {
        let keystroke = parse_key_string(key).unwrap();
        self.line.key_down(keystroke)
    }

    pub fn type_str(&mut self, text: &str) {
        self.line.type_str(text);
    }

    pub fn text(&self) -> &str {
        self.line.text()
    }

    /// `(from, to)` of the selection
    pub fn selection(&self) -> (usize, usize) {
        let selection = self.line.editor().selection();
        (selection.from, selection.to)
    }

    pub fn caret(&self) -> usize {
        self.line.editor().caret()
    }

    pub fn suggestion_texts(&self) -> Vec<String> {
        self.line
            .annotations()
            .suggestions()
            .iter()
            .map(|s| s.text.clone())
            .collect()
    }

    pub fn selected_suggestion(&self) -> Option<String> {
        self.line
            .annotations()
            .selected_suggestion()
            .map(|s| s.text.clone())
    }

    /// Window y in the middle of the input band
    pub fn band_y(&self) -> f32 {
        self.line.band_top() + 20.0
    }

    /// Window x of character boundary `offset`
    pub fn x_of(&self, offset: usize) -> f32 {
        self.line
            .viewport()
            .screen_x(self.line.positions(), offset)
    }
}
