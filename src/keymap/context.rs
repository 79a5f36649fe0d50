//! Context system for conditional keybindings
//!
//! Lets one key do different things depending on widget state, such as Up
//! moving through suggestions while they are shown and through history
//! otherwise.

use serde::Deserialize;

/// Widget state a binding can be conditioned on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyContext {
    /// Whether a non-empty selection exists
    pub has_selection: bool,
    /// Whether the suggestion panel is shown at all
    pub suggestions_visible: bool,
    /// Whether the suggestion panel is shown and takes Enter
    pub suggestions_focused: bool,
    /// Whether Up/Down are recalling history
    pub navigating_history: bool,
}

/// Conditions that can be attached to keybindings
///
/// Multiple conditions on a binding are ANDed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    HasSelection,
    NoSelection,
    SuggestionsVisible,
    SuggestionsHidden,
    SuggestionsFocused,
    SuggestionsUnfocused,
    NavigatingHistory,
}

impl Condition {
    /// Evaluate this condition against the current context
    pub fn evaluate(self, ctx: &KeyContext) -> bool {
        match self {
            Condition::HasSelection => ctx.has_selection,
            Condition::NoSelection => !ctx.has_selection,
            Condition::SuggestionsVisible => ctx.suggestions_visible,
            Condition::SuggestionsHidden => !ctx.suggestions_visible,
            Condition::SuggestionsFocused => ctx.suggestions_focused,
            Condition::SuggestionsUnfocused => !ctx.suggestions_focused,
            Condition::NavigatingHistory => ctx.navigating_history,
        }
    }

    /// Evaluate all conditions (AND logic)
    pub fn evaluate_all(conditions: &[Condition], ctx: &KeyContext) -> bool {
        conditions.iter().all(|c| c.evaluate(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context() {
        let ctx = KeyContext::default();
        assert!(Condition::NoSelection.evaluate(&ctx));
        assert!(Condition::SuggestionsHidden.evaluate(&ctx));
        assert!(Condition::SuggestionsUnfocused.evaluate(&ctx));
        assert!(!Condition::NavigatingHistory.evaluate(&ctx));
    }

    #[test]
    fn test_condition_has_selection() {
        let mut ctx = KeyContext::default();
        assert!(!Condition::HasSelection.evaluate(&ctx));

        ctx.has_selection = true;
        assert!(Condition::HasSelection.evaluate(&ctx));
        assert!(!Condition::NoSelection.evaluate(&ctx));
    }

    #[test]
    fn test_evaluate_all_empty() {
        let ctx = KeyContext::default();
        assert!(Condition::evaluate_all(&[], &ctx));
    }

    #[test]
    fn test_evaluate_all_and_logic() {
        let ctx = KeyContext {
            suggestions_visible: true,
            ..KeyContext::default()
        };

        let conditions = [Condition::SuggestionsVisible, Condition::NoSelection];
        assert!(Condition::evaluate_all(&conditions, &ctx));

        let conditions = [Condition::SuggestionsVisible, Condition::SuggestionsFocused];
        assert!(!Condition::evaluate_all(&conditions, &ctx));
    }
}
