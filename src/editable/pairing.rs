//! Bracket and quote auto-pairing on top of the line editor.

use super::state::LineEditor;

/// Opening brackets that always wrap, with their closers
const BRACKETS: [(char, char); 3] = [('(', ')'), ('[', ']'), ('{', '}')];

/// Quotes that wrap unless the next character is the same quote
const QUOTES: [char; 2] = ['"', '\''];

/// Escape character that suppresses pairing of the following character
const ESCAPE: char = '\\';

/// Closer for an opening bracket
pub fn closer_for(open: char) -> Option<char> {
    BRACKETS
        .iter()
        .find(|(o, _)| *o == open)
        .map(|(_, c)| *c)
}

/// Whether `c` closes a pair that typing can skip over
pub fn is_closer(c: char) -> bool {
    BRACKETS.iter().any(|(_, close)| *close == c) || QUOTES.contains(&c)
}

/// Whether `open` followed by `close` is an empty pair
pub fn is_pair(open: char, close: char) -> bool {
    closer_for(open) == Some(close) || (QUOTES.contains(&open) && open == close)
}

impl LineEditor {
    /// Type one character with bracket/quote pairing.
    ///
    /// Closers skip over an identical next character, openers and quotes
    /// wrap the selection, and a preceding `\` makes either literal.
    pub fn input_char(&mut self, c: char) -> bool {
        let (prev, next) = self.neighbours();
        let escaped = prev == Some(ESCAPE);

        if is_closer(c) && next == Some(c) && !escaped {
            self.right();
            return true;
        }

        if !escaped {
            if let Some(close) = closer_for(c) {
                return self.wrap(c, close);
            }
            if QUOTES.contains(&c) && next != Some(c) {
                return self.wrap(c, c);
            }
        }

        self.type_text(c.encode_utf8(&mut [0; 4]))
    }

    /// Backspace that removes an empty pair around the caret in one action
    pub fn backspace_pair(&mut self) -> bool {
        let caret = self.caret();
        if !self.has_selection() && caret > 0 && caret < self.len() {
            if let (Some(open), Some(close)) = self.neighbours() {
                if is_pair(open, close) {
                    self.delete();
                }
            }
        }
        self.backspace()
    }
}
