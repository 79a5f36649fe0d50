//! Keybinding struct representing a mapping from a keystroke to a command

use super::command::Command;
use super::context::Condition;
use super::types::Keystroke;

/// A single keybinding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    pub keystroke: Keystroke,
    pub command: Command,
    /// Conditions that must all hold for this binding to activate
    pub when: Option<Vec<Condition>>,
}

impl Keybinding {
    pub fn new(keystroke: Keystroke, command: Command) -> Self {
        Self {
            keystroke,
            command,
            when: None,
        }
    }

    /// Add conditions to this binding (builder pattern)
    pub fn when(mut self, conditions: Vec<Condition>) -> Self {
        self.when = Some(conditions);
        self
    }

    /// Add a single condition to this binding
    pub fn when_single(self, condition: Condition) -> Self {
        self.when(vec![condition])
    }

    pub fn is_conditional(&self) -> bool {
        self.when.is_some()
    }
}
