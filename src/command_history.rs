//! Submitted-command history with Up/Down recall.

/// Previously submitted lines plus a recall cursor.
///
/// `position == len()` means "not recalling". Recalling backwards from there
/// first stashes the in-progress line so stepping forward past the newest
/// entry can restore it.
#[derive(Debug, Clone, Default)]
pub struct CommandHistory {
    entries: Vec<String>,
    position: usize,
    backup: String,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a submitted line, skipping an immediate repeat
    pub fn push(&mut self, command: &str) {
        if self.entries.last().map(String::as_str) != Some(command) {
            self.entries.push(command.to_string());
        }
        self.position = self.entries.len();
    }

    /// Step to the previous entry; `current` is stashed when leaving the live line
    pub fn recall_prev(&mut self, current: &str) -> Option<String> {
        if self.position == 0 {
            return None;
        }
        if self.position >= self.entries.len() {
            self.backup = current.to_string();
        }
        self.position -= 1;
        Some(self.entries[self.position].clone())
    }

    /// Step to the next entry, or back to the stashed line past the newest
    pub fn recall_next(&mut self) -> Option<String> {
        if self.position >= self.entries.len() {
            return None;
        }
        self.position += 1;
        match self.entries.get(self.position) {
            Some(entry) => Some(entry.clone()),
            None => Some(self.backup.clone()),
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }
}
