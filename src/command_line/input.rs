//! Keyboard, character and pointer input

use super::{CommandLine, SuggestionMode, Submission};
use crate::editable::LineEditor;
use crate::keymap::{Command, Keystroke};
use crate::tracing::EditSnapshot;

// =============================================================================
// Keyboard
// =============================================================================

impl CommandLine {
    /// Handle a key press. Returns whether a binding ran.
    pub fn key_down(&mut self, keystroke: Keystroke) -> bool {
        if !self.focused {
            return false;
        }
        self.blink_origin = self.clock.now_ms();

        let context = self.key_context();
        match self.keymap.lookup_with_context(&keystroke, Some(&context)) {
            Some(command) => {
                tracing::trace!("{} → {:?}", keystroke, command);
                self.execute(command);
                true
            }
            None => {
                tracing::trace!("{} unbound", keystroke);
                false
            }
        }
    }

    /// Handle typed text, one Unicode scalar at a time
    pub fn char_input(&mut self, c: char) -> bool {
        if !self.focused || (c as u32) < 0x20 {
            return false;
        }
        self.blink_origin = self.clock.now_ms();

        self.editor.input_char(c);
        self.after_destructive_edit();
        self.refresh();
        self.scroll_to(self.editor.selection().from);
        true
    }

    /// Feed every character of `text` through [`CommandLine::char_input`]
    pub fn type_str(&mut self, text: &str) {
        for c in text.chars() {
            self.char_input(c);
        }
    }

    /// Run a command as if its key had been pressed
    pub fn execute(&mut self, command: Command) {
        if !self.focused {
            return;
        }
        let before = EditSnapshot::from_editor(&self.editor);

        match command {
            Command::MoveLeft => self.motion(|e| e.left(), Target::From),
            Command::MoveRight => self.motion(|e| e.right(), Target::From),
            Command::MoveStart => self.motion(|e| e.start(), Target::From),
            Command::MoveEnd => self.motion(|e| e.end(), Target::From),
            Command::SelectLeft => self.motion(|e| e.sel_left(), Target::From),
            Command::SelectRight => self.motion(|e| e.sel_right(), Target::To),
            Command::SelectStart => self.motion(|e| e.sel_start(), Target::Start),
            Command::SelectEnd => self.motion(|e| e.sel_end(), Target::End),
            Command::SelectAll => self.motion(|e| e.sel_all(), Target::Start),

            Command::DeleteBackward => {
                self.editor.backspace_pair();
            }
            Command::DeleteForward => {
                self.editor.delete();
            }
            Command::ToggleInsertMode => self.editor.toggle_insert_mode(),

            Command::Copy => {
                if let Some(text) = self.editor.copy() {
                    self.clipboard.set_text(&text);
                }
            }
            Command::Cut => {
                if let Some(text) = self.editor.cut() {
                    self.clipboard.set_text(&text);
                }
            }
            Command::Paste => {
                if let Some(text) = self.clipboard.get_text() {
                    self.editor.paste(&text);
                }
            }
            Command::Undo => {
                self.editor.undo();
                self.refresh();
                self.scroll_to(self.editor.len());
            }
            Command::Redo => {
                self.editor.redo();
                self.refresh();
                self.scroll_to(self.editor.len());
            }

            Command::Submit => self.submit(false),
            Command::SubmitKeepOpen => self.submit(true),

            Command::AcceptSuggestion => self.accept_suggestion(),
            Command::SuggestionPrev => {
                if self.annotations.has_suggestions() {
                    self.annotations.select_prev_suggestion();
                    self.suggestions_focused = true;
                }
            }
            Command::SuggestionNext => {
                if self.annotations.has_suggestions() {
                    self.annotations.select_next_suggestion();
                    self.suggestions_focused = true;
                }
            }
            Command::FocusSuggestions => {
                self.suggestions_focused = true;
                self.navigating_history = false;
            }
            Command::HistoryPrev => {
                if let Some(entry) = self.history.recall_prev(self.editor.text()) {
                    self.recall(&entry);
                }
            }
            Command::HistoryNext => {
                if let Some(entry) = self.history.recall_next() {
                    self.recall(&entry);
                }
            }

            Command::Escape => {
                if self.suggestions_focused {
                    self.suggestions_focused = false;
                } else {
                    self.blur();
                }
            }
            Command::Unbound => {}
        }

        if command.is_destructive_edit() {
            self.finish_edit(Target::To);
        }

        if let Some(diff) = before.diff(&EditSnapshot::from_editor(&self.editor)) {
            tracing::debug!("{}: {}", command.display_name(), diff);
        }
    }

    fn motion(&mut self, apply: impl FnOnce(&mut LineEditor), target: Target) {
        apply(&mut self.editor);
        let offset = target.offset(self);
        self.scroll_to(offset);
    }

    fn finish_edit(&mut self, target: Target) {
        self.after_destructive_edit();
        self.refresh();
        let offset = target.offset(self);
        self.scroll_to(offset);
    }

    fn after_destructive_edit(&mut self) {
        self.suggestions_focused = false;
        self.navigating_history = false;
    }

    fn recall(&mut self, entry: &str) {
        self.editor.set_text(entry);
        self.navigating_history = true;
        self.refresh();
        self.scroll_to(self.editor.len());
        tracing::debug!("Recalled {:?} from history", entry);
    }

    /// Complete the word under the caret with the selected suggestion.
    ///
    /// Does nothing if the suggestion starts after the caret.
    fn accept_suggestion(&mut self) {
        if self.suggestion_mode() == SuggestionMode::Hidden {
            return;
        }
        let Some(suggestion) = self.annotations.selected_suggestion().cloned() else {
            return;
        };
        if self.editor.selection().from < suggestion.from {
            return;
        }

        self.editor.complete(suggestion.from, &suggestion.text);
        self.suggestions_focused = false;
        self.refresh();
        self.scroll_to(self.editor.selection().from);
        tracing::debug!("Accepted suggestion {:?}", suggestion.text);
    }

    /// Record the line in history and hand it to the processor.
    ///
    /// On success the line closes, or starts fresh with `keep_open`. On
    /// failure it stays open with the error pinned as a problem.
    fn submit(&mut self, keep_open: bool) {
        let text = self.editor.text().to_string();
        self.history.push(&text);
        self.navigating_history = false;

        let result = match self.processor.as_deref_mut() {
            Some(processor) => processor.on_command(&text),
            None => {
                self.blur();
                return;
            }
        };

        match result {
            Ok(()) => {
                tracing::debug!("Submitted {:?}", text);
                self.submissions.push(Submission { text, error: None });
                if keep_open {
                    self.focus();
                } else {
                    self.blur();
                }
            }
            Err(e) => {
                let message = format!("{:#}", e);
                tracing::warn!("Command {:?} failed: {}", text, message);
                self.annotations.pin_problem(&text, &message);
                self.suggestions_focused = false;
                self.submissions.push(Submission {
                    text,
                    error: Some(message),
                });
            }
        }
    }
}

/// Offset scrolled into view after a command
#[derive(Clone, Copy)]
enum Target {
    From,
    To,
    Start,
    End,
}

impl Target {
    fn offset(self, line: &CommandLine) -> usize {
        let selection = line.editor.selection();
        match self {
            Target::From => selection.from,
            Target::To => selection.to,
            Target::Start => 0,
            Target::End => line.editor.len(),
        }
    }
}

// =============================================================================
// Pointer
// =============================================================================

impl CommandLine {
    /// Primary button press at window `(x, y)`. Presses above the input band
    /// are ignored.
    pub fn mouse_down(&mut self, x: f32, y: f32, shift: bool) -> bool {
        self.pointer_x = x;
        if !self.focused || y < self.band_top() {
            return false;
        }

        let hit = self.hit(x);
        let anchor = if shift {
            let selection = self.editor.selection();
            let anchor = if hit < selection.from {
                selection.to
            } else {
                selection.from
            };
            self.editor.select_range(anchor, hit);
            anchor
        } else {
            self.editor.set_cursor(hit);
            hit
        };
        self.drag_anchor = Some(anchor);
        true
    }

    /// Pointer moved to window `(x, y)`
    pub fn mouse_move(&mut self, x: f32, _y: f32) {
        self.pointer_x = x;
        self.drag_to(x);
    }

    /// Primary button released. Releasing above the band leaves the command line.
    pub fn mouse_up(&mut self, x: f32, y: f32) {
        self.pointer_x = x;
        self.drag_anchor = None;
        if self.focused && y < self.band_top() {
            self.blur();
        }
    }

    /// Per-frame update: re-annotate and auto-scroll a drag held past an edge
    pub fn tick(&mut self) {
        if !self.focused {
            return;
        }
        self.refresh();

        if self.is_dragging()
            && self
                .viewport
                .edge_scroll(self.pointer_x, self.config.drag_scroll_factor)
        {
            self.drag_to(self.pointer_x);
        }
        self.viewport.clamp_scroll(&self.positions);
    }

    fn drag_to(&mut self, x: f32) {
        let Some(anchor) = self.drag_anchor else {
            return;
        };
        self.blink_origin = self.clock.now_ms();
        let hit = self.hit(x);
        self.editor.select_range(anchor, hit);
    }

    /// Character boundary nearest to window `x`
    fn hit(&self, x: f32) -> usize {
        self.positions.hit_test(self.viewport.content_x(x))
    }
}
