//! Single-line text storage addressed by character offsets.

use std::ops::Range;

/// Text of the command line.
///
/// Every offset accepted or returned here counts Unicode scalar values, not
/// bytes. Offsets past the end are clamped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    text: String,
    len_chars: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a LineBuffer from a string slice
    pub fn from_text(s: &str) -> Self {
        Self {
            text: s.to_string(),
            len_chars: s.chars().count(),
        }
    }

    /// Get the underlying string
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Number of characters
    pub fn len_chars(&self) -> usize {
        self.len_chars
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Character at `offset`, if any
    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.text.chars().nth(offset)
    }

    /// Character immediately before `offset`, if any
    pub fn char_before(&self, offset: usize) -> Option<char> {
        offset.checked_sub(1).and_then(|i| self.char_at(i))
    }

    /// Copy out the characters in `range` (clamped)
    pub fn slice(&self, range: Range<usize>) -> String {
        let start = self.char_to_byte(range.start);
        let end = self.char_to_byte(range.end.max(range.start));
        self.text[start..end].to_string()
    }

    /// Prefix of the first `offset` characters
    pub fn prefix(&self, offset: usize) -> &str {
        &self.text[..self.char_to_byte(offset)]
    }

    pub fn insert(&mut self, offset: usize, text: &str) {
        let byte = self.char_to_byte(offset);
        self.text.insert_str(byte, text);
        self.len_chars += text.chars().count();
    }

    pub fn remove(&mut self, range: Range<usize>) {
        let start = self.char_to_byte(range.start);
        let end = self.char_to_byte(range.end.max(range.start));
        if start < end {
            self.len_chars -= self.text[start..end].chars().count();
            self.text.replace_range(start..end, "");
        }
    }

    pub fn replace(&mut self, range: Range<usize>, text: &str) {
        self.remove(range.clone());
        self.insert(range.start, text);
    }

    pub fn set_content(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.len_chars = text.chars().count();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.len_chars = 0;
    }

    /// Convert char offset to byte offset
    fn char_to_byte(&self, char_offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_offset)
            .map(|(byte, _)| byte)
            .unwrap_or(self.text.len())
    }
}
