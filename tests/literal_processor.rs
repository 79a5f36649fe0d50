//! The demo word-tree processor driving a full command line

use std::rc::Rc;

use cmdline::clipboard::MemoryClipboard;
use cmdline::editable::ManualClock;
use cmdline::keymap::parse_key_string;
use cmdline::processor::{LiteralProcessor, LiteralTree};
use cmdline::{CommandLine, CommandLineConfig, SuggestionMode};

fn line() -> CommandLine {
    let mut line = CommandLine::with_clock(
        CommandLineConfig::default(),
        Rc::new(ManualClock::new()),
    )
    .with_clipboard(MemoryClipboard::new())
    .with_processor(LiteralProcessor::new(LiteralTree::demo()));
    assert!(line.focus());
    line
}

fn press(line: &mut CommandLine, key: &str) {
    line.key_down(parse_key_string(key).unwrap());
}

#[test]
fn test_focus_requires_processor() {
    let mut line = CommandLine::with_clock(
        CommandLineConfig::default(),
        Rc::new(ManualClock::new()),
    );
    assert!(!line.focus());
    assert!(!line.is_focused());
}

#[test]
fn test_complete_and_submit() {
    let mut line = line();
    line.type_str("sc");
    press(&mut line, "tab");
    assert_eq!(line.text(), "scene");

    line.type_str(" ar");
    assert_eq!(line.suggestion_mode(), SuggestionMode::Unfocused);
    press(&mut line, "tab");
    assert_eq!(line.text(), "scene arrow");

    press(&mut line, "enter");
    assert!(!line.is_focused());
    assert_eq!(line.submissions().len(), 1);
    assert!(line.submissions()[0].is_ok());
}

#[test]
fn test_incomplete_command_is_pinned() {
    let mut line = line();
    line.type_str("easing");
    press(&mut line, "enter");

    assert!(line.is_focused());
    let problems = line.annotations().problems();
    assert_eq!(problems.len(), 1);
    assert_eq!(problems[0].message, "Incomplete command");
    assert_eq!(line.suggestion_mode(), SuggestionMode::Hidden);
}

#[test]
fn test_unknown_word_is_underlined_not_suggested() {
    let mut line = line();
    line.type_str("scene boat");
    let problems = line.annotations().problems();
    assert_eq!(problems.len(), 1);
    assert_eq!((problems[0].from, problems[0].to), (6, 10));
    assert_eq!(line.suggestion_mode(), SuggestionMode::Hidden);
}
