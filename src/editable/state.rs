//! LineEditor - the single-line edit engine with selection and coalesced undo.

use std::rc::Rc;

use super::buffer::LineBuffer;
use super::clock::{Clock, SystemClock};
use super::history::{CoalescePolicy, UndoEntry, UndoHistory};
use super::selection::Selection;

/// Editable command line: text, selection, insert/overwrite mode and history.
///
/// Every offset taken by a method is clamped into `[0, len]`; no operation
/// can fail. Editing methods return whether anything changed.
pub struct LineEditor {
    buffer: LineBuffer,
    selection: Selection,
    /// Insert (true) or overwrite (false)
    insert_mode: bool,
    history: UndoHistory,
    clock: Rc<dyn Clock>,
}

impl std::fmt::Debug for LineEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineEditor")
            .field("text", &self.buffer.as_str())
            .field("selection", &self.selection)
            .field("insert_mode", &self.insert_mode)
            .field("history_len", &self.history.len())
            .finish()
    }
}

impl LineEditor {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self::with_policy(clock, CoalescePolicy::default())
    }

    pub fn with_policy(clock: Rc<dyn Clock>, policy: CoalescePolicy) -> Self {
        let mut editor = Self {
            buffer: LineBuffer::new(),
            selection: Selection::default(),
            insert_mode: true,
            history: UndoHistory::with_policy(policy),
            clock,
        };
        editor.clear_undo();
        editor
    }

    pub fn text(&self) -> &str {
        self.buffer.as_str()
    }

    pub fn len(&self) -> usize {
        self.buffer.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn has_selection(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Get the selected text (empty string if no selection)
    pub fn selected_text(&self) -> String {
        self.buffer.slice(self.selection.from..self.selection.to)
    }

    /// Caret offset: start of the selection
    pub fn caret(&self) -> usize {
        self.selection.from
    }

    pub fn insert_mode(&self) -> bool {
        self.insert_mode
    }

    pub fn toggle_insert_mode(&mut self) {
        self.insert_mode = !self.insert_mode;
    }

    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    /// Characters either side of an empty selection; `None` while a range is selected
    pub fn neighbours(&self) -> (Option<char>, Option<char>) {
        if self.has_selection() {
            return (None, None);
        }
        let caret = self.selection.from;
        (self.buffer.char_before(caret), self.buffer.char_at(caret))
    }

    fn fix_selection(&mut self) {
        self.selection.normalize(self.buffer.len_chars());
    }

    fn note_edit(&mut self, units: usize) {
        let now = self.clock.now_ms();
        self.history
            .note_edit(units, now, self.buffer.as_str(), self.selection);
    }

    fn checkpoint(&mut self) {
        self.history.save(self.buffer.as_str(), self.selection);
    }
}

// =============================================================================
// Lifecycle
// =============================================================================

impl LineEditor {
    /// Drop all history and seed it with the current state
    pub fn clear_undo(&mut self) {
        self.history.clear();
        self.checkpoint();
    }

    /// Empty the line and reset selection and history
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.selection = Selection::default();
        self.clear_undo();
    }

    /// Replace the content, caret at the end, history reset
    pub fn set_text(&mut self, text: &str) {
        self.buffer.set_content(text);
        self.end();
        self.clear_undo();
    }
}

// =============================================================================
// Movement Operations
// =============================================================================

impl LineEditor {
    /// Collapse a selection to its start, else move the caret left
    pub fn left(&mut self) {
        let pos = if self.has_selection() {
            self.selection.from
        } else {
            self.selection.from.saturating_sub(1)
        };
        self.selection.collapse_to(pos);
        self.fix_selection();
    }

    /// Collapse a selection to its end, else move the caret right
    pub fn right(&mut self) {
        let pos = if self.has_selection() {
            self.selection.to
        } else {
            self.selection.to + 1
        };
        self.selection.collapse_to(pos);
        self.fix_selection();
    }

    pub fn sel_left(&mut self) {
        let head = self.selection.head().saturating_sub(1);
        self.select_to(head);
    }

    pub fn sel_right(&mut self) {
        let head = self.selection.head() + 1;
        self.select_to(head);
    }

    pub fn start(&mut self) {
        self.selection.collapse_to(0);
    }

    pub fn end(&mut self) {
        self.selection.collapse_to(self.buffer.len_chars());
    }

    pub fn sel_start(&mut self) {
        self.select_to(0);
    }

    pub fn sel_end(&mut self) {
        self.select_to(self.buffer.len_chars());
    }

    pub fn sel_all(&mut self) {
        self.selection = Selection {
            from: 0,
            to: self.buffer.len_chars(),
            left: false,
        };
    }

    /// Move the active end of the selection to `pos`
    pub fn select_to(&mut self, pos: usize) {
        let pos = pos.min(self.buffer.len_chars());
        self.selection.extend_to(pos);
        self.fix_selection();
    }

    /// Place a caret at `pos`
    pub fn set_cursor(&mut self, pos: usize) {
        self.selection.collapse_to(pos);
        self.fix_selection();
    }

    /// Select from `anchor` to `head`, the caret ending up at `head`
    pub fn select_range(&mut self, anchor: usize, head: usize) {
        let len = self.buffer.len_chars();
        let (anchor, head) = (anchor.min(len), head.min(len));
        self.selection = Selection {
            from: anchor.min(head),
            to: anchor.max(head),
            left: head < anchor,
        };
    }
}

// =============================================================================
// Editing Operations
// =============================================================================

impl LineEditor {
    /// Delete the selected range as its own undo step
    pub fn delete_selection(&mut self) -> bool {
        if !self.has_selection() {
            return false;
        }
        self.checkpoint();
        self.note_edit(0);
        let Selection { from, to, .. } = self.selection;
        self.buffer.remove(from..to);
        self.selection.collapse_to(from);
        true
    }

    /// Type `text` at the caret, replacing any selection.
    ///
    /// In overwrite mode the characters under the caret are replaced instead.
    pub fn type_text(&mut self, text: &str) -> bool {
        self.put_text(text, 1)
    }

    fn put_text(&mut self, text: &str, units: usize) -> bool {
        if text.is_empty() {
            return false;
        }
        self.delete_selection();
        self.note_edit(units);

        let caret = self.selection.from;
        let count = text.chars().count();
        if self.insert_mode {
            self.buffer.insert(caret, text);
        } else {
            let end = (caret + count).min(self.buffer.len_chars());
            self.buffer.replace(caret..end, text);
        }
        self.selection.collapse_to(caret + count);
        true
    }

    /// Surround the selection (or caret) with `left` and `right`.
    ///
    /// The selection shifts right by one so it stays between the pair. In
    /// overwrite mode this types `left` only.
    pub fn wrap(&mut self, left: char, right: char) -> bool {
        if !self.insert_mode {
            return self.type_text(left.encode_utf8(&mut [0; 4]));
        }
        self.note_edit(1);
        let Selection { from, to, .. } = self.selection;
        self.buffer.insert(to, right.encode_utf8(&mut [0; 4]));
        self.buffer.insert(from, left.encode_utf8(&mut [0; 4]));
        self.selection.from = from + 1;
        self.selection.to = to + 1;
        true
    }

    /// Delete the selection, else the character before the caret
    pub fn backspace(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        let caret = self.selection.from;
        if caret == 0 {
            return false;
        }
        self.note_edit(1);
        self.buffer.remove(caret - 1..caret);
        self.selection.collapse_to(caret - 1);
        true
    }

    /// Delete the selection, else the character after the caret
    pub fn delete(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        let caret = self.selection.from;
        if caret >= self.buffer.len_chars() {
            return false;
        }
        self.note_edit(1);
        self.buffer.remove(caret..caret + 1);
        true
    }

    /// Replace `[from, caret)` with `text` as one undo step
    pub fn complete(&mut self, from: usize, text: &str) -> bool {
        let caret = self.selection.from;
        let from = from.min(caret);
        self.checkpoint();
        self.note_edit(0);
        self.buffer.replace(from..caret, text);
        self.selection.collapse_to(from + text.chars().count());
        self.fix_selection();
        true
    }
}

// =============================================================================
// Clipboard Operations
// =============================================================================

impl LineEditor {
    /// Selected text for the clipboard, `None` when nothing is selected
    pub fn copy(&self) -> Option<String> {
        if self.has_selection() {
            Some(self.selected_text())
        } else {
            None
        }
    }

    /// Copy, then delete the selection
    pub fn cut(&mut self) -> Option<String> {
        let text = self.copy()?;
        self.delete_selection();
        Some(text)
    }

    /// Insert clipboard text over the selection as one undo step.
    ///
    /// Control characters are dropped to keep the line single-line.
    pub fn paste(&mut self, text: &str) -> bool {
        let clean: String = text.chars().filter(|c| !c.is_control()).collect();
        if clean.is_empty() {
            return false;
        }
        self.checkpoint();
        self.note_edit(0);
        self.put_text(&clean, 0)
    }
}

// =============================================================================
// Undo/Redo
// =============================================================================

impl LineEditor {
    pub fn undo(&mut self) -> bool {
        match self.history.undo(self.buffer.as_str(), self.selection) {
            Some(entry) => {
                self.restore(entry);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo(self.buffer.as_str(), self.selection) {
            Some(entry) => {
                self.restore(entry);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, entry: UndoEntry) {
        self.buffer.set_content(&entry.text);
        self.selection = entry.selection();
        self.fix_selection();
    }
}

impl Default for LineEditor {
    fn default() -> Self {
        Self::new(Rc::new(SystemClock::new()))
    }
}
