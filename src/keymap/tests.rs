//! Tests for the shipped keymap

use super::*;

fn visible() -> KeyContext {
    KeyContext {
        suggestions_visible: true,
        ..KeyContext::default()
    }
}

fn focused() -> KeyContext {
    KeyContext {
        suggestions_visible: true,
        suggestions_focused: true,
        ..KeyContext::default()
    }
}

#[test]
fn test_embedded_yaml_parses() {
    let bindings = parse_keymap_yaml(get_default_keymap_yaml())
        .expect("Embedded keymap.yaml should parse successfully");

    for command in [
        Command::Undo,
        Command::Redo,
        Command::Paste,
        Command::Submit,
        Command::AcceptSuggestion,
        Command::FocusSuggestions,
    ] {
        assert!(
            bindings.iter().any(|b| b.command == command),
            "missing binding for {:?}",
            command
        );
    }
}

#[test]
fn test_embedded_yaml_matches_hardcoded_defaults() {
    let embedded = Keymap::with_bindings(parse_keymap_yaml(get_default_keymap_yaml()).unwrap());
    let hardcoded = Keymap::with_bindings(default_bindings());

    for binding in hardcoded.bindings() {
        let ctx = match binding.when.as_deref() {
            Some([Condition::SuggestionsFocused]) => focused(),
            Some([Condition::SuggestionsVisible]) => visible(),
            _ => KeyContext::default(),
        };
        assert_eq!(
            embedded.lookup_with_context(&binding.keystroke, Some(&ctx)),
            Some(binding.command),
            "{} differs",
            binding.keystroke
        );
    }
}

#[test]
fn test_enter_depends_on_suggestion_focus() {
    let keymap = Keymap::with_bindings(default_bindings());
    let enter = Keystroke::key(KeyCode::Enter);
    let shift_enter = Keystroke::new(KeyCode::Enter, Modifiers::SHIFT);

    assert_eq!(
        keymap.lookup_with_context(&enter, Some(&visible())),
        Some(Command::Submit)
    );
    assert_eq!(
        keymap.lookup_with_context(&enter, Some(&focused())),
        Some(Command::AcceptSuggestion)
    );
    assert_eq!(
        keymap.lookup_with_context(&shift_enter, Some(&KeyContext::default())),
        Some(Command::SubmitKeepOpen)
    );
    assert_eq!(
        keymap.lookup_with_context(&shift_enter, Some(&focused())),
        Some(Command::AcceptSuggestion)
    );
}

#[test]
fn test_up_down_depend_on_suggestions() {
    let keymap = Keymap::with_bindings(default_bindings());
    let up = Keystroke::key(KeyCode::Up);
    let down = Keystroke::key(KeyCode::Down);

    assert_eq!(
        keymap.lookup_with_context(&up, Some(&visible())),
        Some(Command::SuggestionPrev)
    );
    assert_eq!(
        keymap.lookup_with_context(&down, Some(&KeyContext::default())),
        Some(Command::HistoryNext)
    );
}

#[test]
fn test_tab_only_with_suggestions() {
    let keymap = Keymap::with_bindings(default_bindings());
    let tab = Keystroke::key(KeyCode::Tab);

    assert_eq!(keymap.lookup_with_context(&tab, Some(&KeyContext::default())), None);
    assert_eq!(
        keymap.lookup_with_context(&tab, Some(&visible())),
        Some(Command::AcceptSuggestion)
    );
}

#[test]
fn test_cmd_shortcuts() {
    let keymap = Keymap::with_bindings(default_bindings());
    let cmd = Modifiers::cmd();

    assert_eq!(
        keymap.lookup(&Keystroke::char_with_mods('z', cmd)),
        Some(Command::Undo)
    );
    assert_eq!(
        keymap.lookup(&Keystroke::char_with_mods('z', cmd | Modifiers::SHIFT)),
        Some(Command::Redo)
    );
    assert_eq!(
        keymap.lookup(&Keystroke::new(KeyCode::Space, Modifiers::CTRL)),
        Some(Command::FocusSuggestions)
    );
}

#[test]
fn test_load_default_keymap() {
    let bindings = load_default_keymap();
    assert!(!bindings.is_empty());
}
