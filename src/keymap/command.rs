//! Command enum representing every action a key can trigger on the command line

/// All command-line actions that can be bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // ========================================================================
    // Caret Movement
    // ========================================================================
    MoveLeft,
    MoveRight,
    MoveStart,
    MoveEnd,

    // ========================================================================
    // Selection
    // ========================================================================
    SelectLeft,
    SelectRight,
    SelectStart,
    SelectEnd,
    SelectAll,

    // ========================================================================
    // Editing
    // ========================================================================
    DeleteBackward,
    DeleteForward,
    ToggleInsertMode,

    // ========================================================================
    // Clipboard / Undo
    // ========================================================================
    Copy,
    Cut,
    Paste,
    Undo,
    Redo,

    // ========================================================================
    // Submission
    // ========================================================================
    /// Run the line and leave the command line
    Submit,
    /// Run the line and start a fresh one
    SubmitKeepOpen,

    // ========================================================================
    // Suggestions & History
    // ========================================================================
    /// Replace the word under the caret with the selected suggestion
    AcceptSuggestion,
    SuggestionPrev,
    SuggestionNext,
    /// Show and focus the suggestion panel even on an empty line
    FocusSuggestions,
    HistoryPrev,
    HistoryNext,

    /// Unfocus suggestions if focused, else leave the command line
    Escape,

    /// Removes a default binding when used in a user keymap
    Unbound,
}

impl Command {
    /// Whether the command removes or replaces text at the caret.
    ///
    /// These end history recall and unfocus the suggestion panel, like typing.
    pub fn is_destructive_edit(self) -> bool {
        matches!(
            self,
            Command::DeleteBackward | Command::DeleteForward | Command::Cut | Command::Paste
        )
    }

    /// Display name for logs and help output
    pub fn display_name(self) -> &'static str {
        use Command::*;

        match self {
            MoveLeft => "Move Left",
            MoveRight => "Move Right",
            MoveStart => "Move to Start",
            MoveEnd => "Move to End",

            SelectLeft => "Select Left",
            SelectRight => "Select Right",
            SelectStart => "Select to Start",
            SelectEnd => "Select to End",
            SelectAll => "Select All",

            DeleteBackward => "Delete Backward",
            DeleteForward => "Delete Forward",
            ToggleInsertMode => "Toggle Insert/Overwrite",

            Copy => "Copy",
            Cut => "Cut",
            Paste => "Paste",
            Undo => "Undo",
            Redo => "Redo",

            Submit => "Submit",
            SubmitKeepOpen => "Submit and Keep Open",

            AcceptSuggestion => "Accept Suggestion",
            SuggestionPrev => "Previous Suggestion",
            SuggestionNext => "Next Suggestion",
            FocusSuggestions => "Focus Suggestions",
            HistoryPrev => "Previous Command",
            HistoryNext => "Next Command",

            Escape => "Escape",
            Unbound => "Unbound",
        }
    }
}
