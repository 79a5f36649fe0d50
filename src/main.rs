//! `cmdline` - replay scripted input against a headless command line

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::rc::Rc;

use cli::{CliArgs, Replayer};
use cmdline::clipboard::MemoryClipboard;
use cmdline::command_line::RecordingSurface;
use cmdline::editable::ManualClock;
use cmdline::keymap::{load_keymap_layers, Keymap};
use cmdline::processor::{LiteralProcessor, LiteralTree};
use cmdline::{CommandLine, CommandLineConfig, Submission, SuggestionMode};

/// Final state printed after a replay
#[derive(Debug, Serialize)]
struct Report<'a> {
    submissions: &'a [Submission],
    focused: bool,
    text: &'a str,
    selection: (usize, usize),
    insert_mode: bool,
    mode: &'static str,
    problems: Vec<&'a str>,
    suggestions: Vec<&'a str>,
    history: &'a [String],
}

impl<'a> Report<'a> {
    fn from_line(line: &'a CommandLine) -> Self {
        let selection = line.editor().selection();
        let annotations = line.annotations();
        Self {
            submissions: line.submissions(),
            focused: line.is_focused(),
            text: line.text(),
            selection: (selection.from, selection.to),
            insert_mode: line.editor().insert_mode(),
            mode: match line.suggestion_mode() {
                SuggestionMode::Hidden => "hidden",
                SuggestionMode::Unfocused => "unfocused",
                SuggestionMode::Focused => "focused",
            },
            problems: annotations
                .problems()
                .iter()
                .map(|p| p.message.as_str())
                .collect(),
            suggestions: annotations
                .suggestions()
                .iter()
                .map(|s| s.text.as_str())
                .collect(),
            history: line.history().entries(),
        }
    }

    fn print(&self) {
        for submission in self.submissions {
            match &submission.error {
                None => println!("submitted {:?}", submission.text),
                Some(error) => println!("failed    {:?}: {}", submission.text, error),
            }
        }
        println!("focused:     {}", self.focused);
        println!("text:        {:?}", self.text);
        println!("selection:   {}..{}", self.selection.0, self.selection.1);
        println!(
            "mode:        {}",
            if self.insert_mode { "insert" } else { "overwrite" }
        );
        println!("suggestions: {} {:?}", self.mode, self.suggestions);
        println!("problems:    {:?}", self.problems);
    }
}

fn main() -> Result<()> {
    cmdline::tracing::init();

    let args = CliArgs::parse();

    let config = match &args.config {
        Some(path) => CommandLineConfig::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => CommandLineConfig::load(),
    };
    let events = cli::load_script(&args.script)
        .with_context(|| format!("Failed to load script {}", args.script.display()))?;

    let mut replayer = Replayer {
        clock: ManualClock::new(),
        clipboard: MemoryClipboard::new(),
    };
    let keymap = Keymap::with_bindings(load_keymap_layers(args.keymap.as_deref()));
    let mut line = CommandLine::with_clock(config, Rc::new(replayer.clock.clone()))
        .with_keymap(keymap)
        .with_clipboard(replayer.clipboard.clone())
        .with_processor(LiteralProcessor::new(LiteralTree::demo()));
    line.set_window_size(args.width, args.height);

    tracing::info!(
        "Replaying {} events from {}",
        events.len(),
        args.script.display()
    );
    replayer
        .run(&mut line, &events)
        .context("Replay failed")?;

    let report = Report::from_line(&line);
    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to encode report")?;
        println!("{}", json);
    } else {
        report.print();
    }

    if args.dump_frame {
        line.tick();
        let mut surface = RecordingSurface::new();
        line.draw(&mut surface);
        println!("frame:");
        for op in &surface.ops {
            println!("  {}", op);
        }
    }

    Ok(())
}
