//! Snapshot undo/redo with time and edit-count coalescing.

use super::selection::Selection;

/// A full copy of the line and its selection at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoEntry {
    pub text: String,
    pub from: usize,
    pub to: usize,
    pub left: bool,
}

impl UndoEntry {
    pub fn new(text: &str, selection: Selection) -> Self {
        Self {
            text: text.to_string(),
            from: selection.from,
            to: selection.to,
            left: selection.left,
        }
    }

    pub fn selection(&self) -> Selection {
        Selection {
            from: self.from,
            to: self.to,
            left: self.left,
        }
    }

    fn set_selection(&mut self, selection: Selection) {
        self.from = selection.from;
        self.to = selection.to;
        self.left = selection.left;
    }
}

/// When a run of small edits is closed off into its own undo step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoalescePolicy {
    /// A pause at least this long before an edit starts a new step
    pub interval_ms: u64,
    /// Edit units accumulated before a new step is forced
    pub max_edits: usize,
}

impl Default for CoalescePolicy {
    fn default() -> Self {
        Self {
            interval_ms: 3000,
            max_edits: 10,
        }
    }
}

/// Ordered snapshots with a cursor.
///
/// `entries[pos - 1]` is the state last saved or restored. Entries at and
/// beyond `pos` are redo targets and are dropped by the next save.
#[derive(Debug, Clone)]
pub struct UndoHistory {
    entries: Vec<UndoEntry>,
    pos: usize,
    policy: CoalescePolicy,
    edits_since_save: usize,
    last_edit_ms: Option<u64>,
    max_size: usize,
}

impl UndoHistory {
    /// Create a new history with the default policy and max size
    pub fn new() -> Self {
        Self::with_policy(CoalescePolicy::default())
    }

    pub fn with_policy(policy: CoalescePolicy) -> Self {
        Self {
            entries: Vec::new(),
            pos: 0,
            policy,
            edits_since_save: 0,
            last_edit_ms: None,
            max_size: 1000,
        }
    }

    /// Cap the number of retained snapshots
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size.max(1);
        self
    }

    pub fn policy(&self) -> CoalescePolicy {
        self.policy
    }

    /// Drop everything, including coalescing state
    pub fn clear(&mut self) {
        self.entries.clear();
        self.pos = 0;
        self.edits_since_save = 0;
        self.last_edit_ms = None;
    }

    /// Whether `text` matches the snapshot at the cursor
    pub fn is_current(&self, text: &str) -> bool {
        self.pos > 0 && self.entries[self.pos - 1].text == text
    }

    /// Push a snapshot of `text`/`selection`, truncating redo entries.
    ///
    /// Returns false when the snapshot at the cursor already holds `text`.
    pub fn save(&mut self, text: &str, selection: Selection) -> bool {
        if self.is_current(text) {
            return false;
        }

        self.edits_since_save = 0;
        self.entries.truncate(self.pos);
        self.entries.push(UndoEntry::new(text, selection));
        self.pos += 1;

        while self.entries.len() > self.max_size {
            self.entries.remove(0);
            self.pos -= 1;
        }
        true
    }

    /// Account for an edit about to be applied to `text`.
    ///
    /// Saves the pre-edit state first when the last edit is older than the
    /// policy interval or the edit budget is used up.
    pub fn note_edit(&mut self, units: usize, now_ms: u64, text: &str, selection: Selection) {
        let idle = match self.last_edit_ms {
            Some(last) => now_ms.saturating_sub(last) >= self.policy.interval_ms,
            None => true,
        };
        if idle || self.edits_since_save >= self.policy.max_edits {
            self.save(text, selection);
        }
        self.last_edit_ms = Some(now_ms);
        self.edits_since_save += units;
    }

    /// Record `text`/`selection` as the state at the cursor.
    ///
    /// A selection-only change updates the current snapshot in place, so
    /// stepping away and back restores it.
    fn sync(&mut self, text: &str, selection: Selection) {
        if self.is_current(text) {
            self.entries[self.pos - 1].set_selection(selection);
        } else {
            self.save(text, selection);
        }
    }

    /// Step back one snapshot.
    ///
    /// Unsaved edits are saved first so they become the redo target.
    pub fn undo(&mut self, text: &str, selection: Selection) -> Option<UndoEntry> {
        self.sync(text, selection);
        if self.pos < 2 {
            return None;
        }
        self.pos -= 1;
        Some(self.entries[self.pos - 1].clone())
    }

    /// Step forward one snapshot.
    ///
    /// If the line diverged from the snapshot at the cursor, the divergence is
    /// saved instead and nothing is restored.
    pub fn redo(&mut self, text: &str, selection: Selection) -> Option<UndoEntry> {
        if !self.is_current(text) {
            self.save(text, selection);
            return None;
        }
        self.sync(text, selection);
        if self.pos >= self.entries.len() {
            return None;
        }
        self.pos += 1;
        Some(self.entries[self.pos - 1].clone())
    }

    pub fn can_undo(&self) -> bool {
        self.pos >= 2
    }

    pub fn can_redo(&self) -> bool {
        self.pos < self.entries.len()
    }

    /// Number of snapshots held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cursor into the snapshot list
    pub fn position(&self) -> usize {
        self.pos
    }
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new()
    }
}
