//! YAML parsing for keymaps
//!
//! Turns keymap.yaml files into [`Keybinding`]s.

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use super::binding::Keybinding;
use super::command::Command;
use super::context::Condition;
use super::types::{KeyCode, Keystroke, Modifiers};

/// Root structure of a keymap YAML file
#[derive(Debug, Deserialize)]
pub struct KeymapConfig {
    pub bindings: Vec<BindingConfig>,
}

/// A single binding entry from YAML
#[derive(Debug, Deserialize)]
pub struct BindingConfig {
    pub key: String,
    pub command: String,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub when: Option<Vec<String>>,
}

/// Load keybindings from a YAML file
pub fn load_keymap_file(path: &Path) -> Result<Vec<Keybinding>, KeymapError> {
    let content = std::fs::read_to_string(path).map_err(|e| KeymapError::IoError(e.to_string()))?;

    parse_keymap_yaml(&content)
}

/// Parse keybindings from a YAML string
pub fn parse_keymap_yaml(yaml: &str) -> Result<Vec<Keybinding>, KeymapError> {
    let config: KeymapConfig =
        serde_yaml::from_str(yaml).map_err(|e| KeymapError::ParseError(e.to_string()))?;

    let current_platform = get_current_platform();
    let mut bindings = Vec::new();

    for entry in config.bindings {
        if let Some(ref platform) = entry.platform {
            if platform != current_platform {
                continue;
            }
        }

        let keystroke = parse_key_string(&entry.key)?;
        let command = parse_command(&entry.command)?;
        let conditions = parse_conditions(&entry.when)?;

        let mut binding = Keybinding::new(keystroke, command);
        if let Some(conds) = conditions {
            binding = binding.when(conds);
        }
        bindings.push(binding);
    }

    Ok(bindings)
}

/// Parse a key string like "cmd+shift+z" into a Keystroke
pub fn parse_key_string(key_str: &str) -> Result<Keystroke, KeymapError> {
    let mut mods = Modifiers::NONE;
    let mut key_part = None;

    for part in key_str.split('+') {
        let part_lower = part.trim().to_lowercase();
        match part_lower.as_str() {
            "cmd" => mods = mods | Modifiers::cmd(),
            "ctrl" | "control" => mods = mods | Modifiers::CTRL,
            "shift" => mods = mods | Modifiers::SHIFT,
            "alt" | "option" | "opt" => mods = mods | Modifiers::ALT,
            "meta" | "super" | "win" => mods = mods | Modifiers::META,
            _ => {
                if key_part.is_some() {
                    return Err(KeymapError::InvalidKey(format!(
                        "Multiple keys in binding: {}",
                        key_str
                    )));
                }
                key_part = Some(parse_key_code(&part_lower)?);
            }
        }
    }

    let key = key_part
        .ok_or_else(|| KeymapError::InvalidKey(format!("No key found in binding: {}", key_str)))?;

    Ok(Keystroke::new(key, mods))
}

/// Parse a key code from a lowercased name
fn parse_key_code(key: &str) -> Result<KeyCode, KeymapError> {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c.to_ascii_lowercase()));
    }

    match key {
        "enter" | "return" => Ok(KeyCode::Enter),
        "numpad_enter" | "numenter" | "kp_enter" => Ok(KeyCode::NumpadEnter),
        "escape" | "esc" => Ok(KeyCode::Escape),
        "tab" => Ok(KeyCode::Tab),
        "backspace" | "back" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "insert" | "ins" => Ok(KeyCode::Insert),
        "space" => Ok(KeyCode::Space),

        "up" | "arrowup" => Ok(KeyCode::Up),
        "down" | "arrowdown" => Ok(KeyCode::Down),
        "left" | "arrowleft" => Ok(KeyCode::Left),
        "right" | "arrowright" => Ok(KeyCode::Right),
        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),

        _ => Err(KeymapError::InvalidKey(format!("Unknown key: {}", key))),
    }
}

/// Parse a command name string into a Command enum
fn parse_command(cmd: &str) -> Result<Command, KeymapError> {
    Command::from_str(cmd).map_err(|_| KeymapError::InvalidCommand(cmd.to_string()))
}

/// Parse condition strings into Condition enums
fn parse_conditions(when: &Option<Vec<String>>) -> Result<Option<Vec<Condition>>, KeymapError> {
    let Some(conditions) = when else {
        return Ok(None);
    };

    conditions
        .iter()
        .map(|c| parse_condition(c))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn parse_condition(cond: &str) -> Result<Condition, KeymapError> {
    match cond.to_lowercase().as_str() {
        "has_selection" | "selection" => Ok(Condition::HasSelection),
        "no_selection" => Ok(Condition::NoSelection),
        "suggestions_visible" => Ok(Condition::SuggestionsVisible),
        "suggestions_hidden" => Ok(Condition::SuggestionsHidden),
        "suggestions_focused" => Ok(Condition::SuggestionsFocused),
        "suggestions_unfocused" => Ok(Condition::SuggestionsUnfocused),
        "navigating_history" | "navigating" => Ok(Condition::NavigatingHistory),
        _ => Err(KeymapError::InvalidCondition(cond.to_string())),
    }
}

fn get_current_platform() -> &'static str {
    if cfg!(target_os = "macos") {
        "macos"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else {
        "linux"
    }
}

/// Errors that can occur when parsing keymaps
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeymapError {
    IoError(String),
    ParseError(String),
    InvalidKey(String),
    InvalidCommand(String),
    InvalidCondition(String),
}

impl std::fmt::Display for KeymapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeymapError::IoError(e) => write!(f, "IO error: {}", e),
            KeymapError::ParseError(e) => write!(f, "Parse error: {}", e),
            KeymapError::InvalidKey(k) => write!(f, "Invalid key: {}", k),
            KeymapError::InvalidCommand(c) => write!(f, "Invalid command: {}", c),
            KeymapError::InvalidCondition(c) => write!(f, "Invalid condition: {}", c),
        }
    }
}

impl std::error::Error for KeymapError {}

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MoveLeft" => Ok(Command::MoveLeft),
            "MoveRight" => Ok(Command::MoveRight),
            "MoveStart" => Ok(Command::MoveStart),
            "MoveEnd" => Ok(Command::MoveEnd),

            "SelectLeft" => Ok(Command::SelectLeft),
            "SelectRight" => Ok(Command::SelectRight),
            "SelectStart" => Ok(Command::SelectStart),
            "SelectEnd" => Ok(Command::SelectEnd),
            "SelectAll" => Ok(Command::SelectAll),

            "DeleteBackward" => Ok(Command::DeleteBackward),
            "DeleteForward" => Ok(Command::DeleteForward),
            "ToggleInsertMode" => Ok(Command::ToggleInsertMode),

            "Copy" => Ok(Command::Copy),
            "Cut" => Ok(Command::Cut),
            "Paste" => Ok(Command::Paste),
            "Undo" => Ok(Command::Undo),
            "Redo" => Ok(Command::Redo),

            "Submit" => Ok(Command::Submit),
            "SubmitKeepOpen" => Ok(Command::SubmitKeepOpen),

            "AcceptSuggestion" => Ok(Command::AcceptSuggestion),
            "SuggestionPrev" => Ok(Command::SuggestionPrev),
            "SuggestionNext" => Ok(Command::SuggestionNext),
            "FocusSuggestions" => Ok(Command::FocusSuggestions),
            "HistoryPrev" => Ok(Command::HistoryPrev),
            "HistoryNext" => Ok(Command::HistoryNext),

            "Escape" => Ok(Command::Escape),
            "Unbound" => Ok(Command::Unbound),

            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        let stroke = parse_key_string("a").unwrap();
        assert_eq!(stroke.key, KeyCode::Char('a'));
        assert!(stroke.mods.is_empty());
    }

    #[test]
    fn test_parse_key_with_multiple_modifiers() {
        let stroke = parse_key_string("ctrl+shift+z").unwrap();
        assert_eq!(stroke.key, KeyCode::Char('z'));
        assert!(stroke.mods.ctrl());
        assert!(stroke.mods.shift());
    }

    #[test]
    fn test_parse_cmd_modifier() {
        let stroke = parse_key_string("cmd+v").unwrap();
        assert!(stroke.mods.has_cmd());
    }

    #[test]
    fn test_parse_named_keys() {
        assert_eq!(parse_key_string("numpad_enter").unwrap().key, KeyCode::NumpadEnter);
        assert_eq!(parse_key_string("ctrl+space").unwrap().key, KeyCode::Space);
        assert_eq!(parse_key_string("Insert").unwrap().key, KeyCode::Insert);
    }

    #[test]
    fn test_parse_invalid_keys() {
        assert!(matches!(
            parse_key_string("ctrl+shift"),
            Err(KeymapError::InvalidKey(_))
        ));
        assert!(matches!(
            parse_key_string("a+b"),
            Err(KeymapError::InvalidKey(_))
        ));
        assert!(matches!(
            parse_key_string("hyper"),
            Err(KeymapError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(Command::from_str("Submit"), Ok(Command::Submit));
        assert_eq!(Command::from_str("HistoryPrev"), Ok(Command::HistoryPrev));
        assert_eq!(Command::from_str("SaveFile"), Err(()));
    }

    #[test]
    fn test_parse_yaml_with_conditions() {
        let yaml = r#"
bindings:
  - key: "up"
    command: SuggestionPrev
    when: ["suggestions_visible"]
  - key: "up"
    command: HistoryPrev
"#;

        let bindings = parse_keymap_yaml(yaml).unwrap();
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings[0].when, Some(vec![Condition::SuggestionsVisible]));
        assert_eq!(bindings[1].when, None);
    }

    #[test]
    fn test_parse_yaml_with_platform() {
        let yaml = r#"
bindings:
  - key: "cmd+z"
    command: Undo
  - key: "meta+left"
    command: MoveStart
    platform: macos
"#;

        let bindings = parse_keymap_yaml(yaml).unwrap();

        #[cfg(target_os = "macos")]
        assert_eq!(bindings.len(), 2);

        #[cfg(not(target_os = "macos"))]
        assert_eq!(bindings.len(), 1);
    }

    #[test]
    fn test_parse_yaml_errors() {
        let bad_command = "bindings:\n  - key: \"tab\"\n    command: Fly\n";
        assert_eq!(
            parse_keymap_yaml(bad_command),
            Err(KeymapError::InvalidCommand("Fly".to_string()))
        );

        let bad_condition =
            "bindings:\n  - key: \"tab\"\n    command: Submit\n    when: [\"modal\"]\n";
        assert!(matches!(
            parse_keymap_yaml(bad_condition),
            Err(KeymapError::InvalidCondition(_))
        ));

        assert!(matches!(
            parse_keymap_yaml("bindings: 3"),
            Err(KeymapError::ParseError(_))
        ));
    }
}
