//! Default keybindings and keymap layering
//!
//! The embedded keymap.yaml is the base layer. A keymap.yaml in the working
//! directory and then the user's `~/.config/cmdline/keymap.yaml` are merged on
//! top; hardcoded defaults stand in if the embedded file fails to parse.

use std::path::Path;

use super::binding::Keybinding;
use super::command::Command;
use super::config::{load_keymap_file, parse_keymap_yaml};
use super::context::Condition;
use super::types::{KeyCode, Keystroke, Modifiers};

/// Default keymap YAML embedded at compile time
const DEFAULT_KEYMAP_YAML: &str = include_str!("../../keymap.yaml");

/// The embedded default keymap source
pub fn get_default_keymap_yaml() -> &'static str {
    DEFAULT_KEYMAP_YAML
}

/// Load and merge keymaps: defaults, then project-local, then user overrides
pub fn load_default_keymap() -> Vec<Keybinding> {
    load_keymap_layers(None)
}

/// Like [`load_default_keymap`], with `extra` merged last when given.
///
/// A broken layer is skipped with a warning.
pub fn load_keymap_layers(extra: Option<&Path>) -> Vec<Keybinding> {
    let mut bindings = match parse_keymap_yaml(DEFAULT_KEYMAP_YAML) {
        Ok(b) => {
            tracing::info!("Loaded embedded default keymap ({} bindings)", b.len());
            b
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse embedded keymap: {}, using hardcoded defaults",
                e
            );
            default_bindings()
        }
    };

    let local = Path::new("keymap.yaml");
    if local.exists() {
        bindings = merge_layer(bindings, local);
    }

    if let Some(user_path) = crate::config_paths::keymap_file() {
        if user_path.exists() {
            bindings = merge_layer(bindings, &user_path);
        }
    }

    if let Some(path) = extra {
        bindings = merge_layer(bindings, path);
    }

    bindings
}

fn merge_layer(base: Vec<Keybinding>, path: &Path) -> Vec<Keybinding> {
    match load_keymap_file(path) {
        Ok(layer) => {
            tracing::info!(
                "Merging keymap from {} ({} bindings)",
                path.display(),
                layer.len()
            );
            merge_bindings(base, layer)
        }
        Err(e) => {
            tracing::warn!("Failed to load keymap from {}: {}", path.display(), e);
            base
        }
    }
}

/// Merge user bindings into base bindings
///
/// - same keystroke and conditions as a base binding: replaces it
/// - command `Unbound`: removes every base binding for that keystroke
/// - otherwise: appended
pub fn merge_bindings(base: Vec<Keybinding>, user: Vec<Keybinding>) -> Vec<Keybinding> {
    let mut result = base;

    for user_binding in user {
        if user_binding.command == Command::Unbound {
            result.retain(|b| b.keystroke != user_binding.keystroke);
            continue;
        }

        let existing_idx = result
            .iter()
            .position(|b| b.keystroke == user_binding.keystroke && b.when == user_binding.when);

        match existing_idx {
            Some(idx) => result[idx] = user_binding,
            None => result.push(user_binding),
        }
    }

    result
}

/// Hardcoded equivalent of the embedded keymap for the current platform
pub fn default_bindings() -> Vec<Keybinding> {
    let cmd = Modifiers::cmd();
    let cmd_shift = cmd | Modifiers::SHIFT;
    let shift = Modifiers::SHIFT;
    let ctrl = Modifiers::CTRL;
    let ctrl_shift = Modifiers::CTRL | Modifiers::SHIFT;
    let none = Modifiers::NONE;

    let mut bindings = vec![
        // ====================================================================
        // Caret Movement
        // ====================================================================
        bind(KeyCode::Left, none, Command::MoveLeft),
        bind(KeyCode::Right, none, Command::MoveRight),
        bind(KeyCode::Home, none, Command::MoveStart),
        bind(KeyCode::End, none, Command::MoveEnd),
        bind(KeyCode::Left, ctrl, Command::MoveStart),
        bind(KeyCode::Right, ctrl, Command::MoveEnd),

        // ====================================================================
        // Selection
        // ====================================================================
        bind(KeyCode::Left, shift, Command::SelectLeft),
        bind(KeyCode::Right, shift, Command::SelectRight),
        bind(KeyCode::Home, shift, Command::SelectStart),
        bind(KeyCode::End, shift, Command::SelectEnd),
        bind(KeyCode::Left, ctrl_shift, Command::SelectStart),
        bind(KeyCode::Right, ctrl_shift, Command::SelectEnd),
        bind(KeyCode::Char('a'), cmd, Command::SelectAll),

        // ====================================================================
        // Editing
        // ====================================================================
        bind(KeyCode::Backspace, none, Command::DeleteBackward),
        bind(KeyCode::Backspace, shift, Command::DeleteBackward),
        bind(KeyCode::Delete, none, Command::DeleteForward),
        bind(KeyCode::Delete, shift, Command::DeleteForward),
        bind(KeyCode::Insert, none, Command::ToggleInsertMode),

        // ====================================================================
        // Clipboard / Undo
        // ====================================================================
        bind(KeyCode::Char('c'), cmd, Command::Copy),
        bind(KeyCode::Char('x'), cmd, Command::Cut),
        bind(KeyCode::Char('v'), cmd, Command::Paste),
        bind(KeyCode::Char('z'), cmd, Command::Undo),
        bind(KeyCode::Char('z'), cmd_shift, Command::Redo),

        // ====================================================================
        // Suggestions & History
        // ====================================================================
        bind(KeyCode::Tab, none, Command::AcceptSuggestion)
            .when_single(Condition::SuggestionsVisible),
        bind(KeyCode::Up, none, Command::SuggestionPrev)
            .when_single(Condition::SuggestionsVisible),
        bind(KeyCode::Up, none, Command::HistoryPrev),
        bind(KeyCode::Down, none, Command::SuggestionNext)
            .when_single(Condition::SuggestionsVisible),
        bind(KeyCode::Down, none, Command::HistoryNext),
        bind(KeyCode::Space, ctrl, Command::FocusSuggestions),
        bind(KeyCode::Escape, none, Command::Escape),
    ];

    // Both Enter keys, with and without Shift
    for key in [KeyCode::Enter, KeyCode::NumpadEnter] {
        for (mods, submit) in [(none, Command::Submit), (shift, Command::SubmitKeepOpen)] {
            bindings.push(
                bind(key, mods, Command::AcceptSuggestion)
                    .when_single(Condition::SuggestionsFocused),
            );
            bindings.push(bind(key, mods, submit));
        }
    }

    bindings
}

fn bind(key: KeyCode, mods: Modifiers, command: Command) -> Keybinding {
    Keybinding::new(Keystroke::new(key, mods), command)
}
