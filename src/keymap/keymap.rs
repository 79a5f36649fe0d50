//! Keymap struct for storing and looking up keybindings

use std::collections::HashMap;

use super::binding::Keybinding;
use super::command::Command;
use super::context::{Condition, KeyContext};
use super::types::Keystroke;

/// All keybindings, indexed by keystroke
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: Vec<Keybinding>,
    /// Indices into `bindings`; one keystroke may carry several conditional bindings
    lookup: HashMap<Keystroke, Vec<usize>>,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bindings(bindings: Vec<Keybinding>) -> Self {
        let mut keymap = Self::new();
        for binding in bindings {
            keymap.add_binding(binding);
        }
        keymap
    }

    pub fn add_binding(&mut self, binding: Keybinding) {
        let idx = self.bindings.len();
        self.lookup.entry(binding.keystroke).or_default().push(idx);
        self.bindings.push(binding);
    }

    /// Look up a keystroke, ignoring conditional bindings
    pub fn lookup(&self, keystroke: &Keystroke) -> Option<Command> {
        self.lookup_with_context(keystroke, None)
    }

    /// Look up a keystroke against the widget state.
    ///
    /// Conditional bindings whose conditions hold win over unconditional
    /// ones; among equals the first registered wins.
    pub fn lookup_with_context(
        &self,
        keystroke: &Keystroke,
        context: Option<&KeyContext>,
    ) -> Option<Command> {
        let indices = self.lookup.get(keystroke)?;

        if let Some(ctx) = context {
            for &idx in indices {
                let binding = &self.bindings[idx];
                if let Some(ref conditions) = binding.when {
                    if Condition::evaluate_all(conditions, ctx) {
                        return Some(binding.command);
                    }
                }
            }
        }

        indices
            .iter()
            .map(|&idx| &self.bindings[idx])
            .find(|b| b.when.is_none())
            .map(|b| b.command)
    }

    pub fn bindings(&self) -> &[Keybinding] {
        &self.bindings
    }

    /// First binding for a command
    pub fn binding_for(&self, command: Command) -> Option<&Keybinding> {
        self.bindings.iter().find(|b| b.command == command)
    }

    /// Display string for a command's first binding
    pub fn display_for(&self, command: Command) -> Option<String> {
        self.binding_for(command).map(|b| b.keystroke.to_string())
    }
}
