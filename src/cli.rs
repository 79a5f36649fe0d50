//! Command-line arguments and replay scripts for the `cmdline` binary
//!
//! A script is a YAML list of input events fed to a headless command line:
//!
//! ```yaml
//! - focus
//! - text: "scene ar"
//! - key: tab
//! - wait: 3500
//! - click: { x: 120, y: 580 }
//! - drag: { x: 790, y: 580 }
//! - tick
//! - release: { x: 790, y: 580 }
//! - key: enter
//! ```

use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use cmdline::clipboard::{Clipboard, MemoryClipboard};
use cmdline::editable::ManualClock;
use cmdline::keymap::{parse_key_string, KeymapError};
use cmdline::CommandLine;

/// Replay scripted input against a headless command line
#[derive(Parser, Debug)]
#[command(name = "cmdline", version, about = "Replay input against a command line")]
pub struct CliArgs {
    /// YAML script of input events
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Config file to use instead of ~/.config/cmdline/config.yaml
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Extra keymap layered over the defaults
    #[arg(long, value_name = "PATH")]
    pub keymap: Option<PathBuf>,

    /// Window width in pixels
    #[arg(long, default_value_t = 800.0)]
    pub width: f32,

    /// Window height in pixels
    #[arg(long, default_value_t = 600.0)]
    pub height: f32,

    /// Print the draw calls of the final frame
    #[arg(long)]
    pub dump_frame: bool,

    /// Print the final state as JSON
    #[arg(long)]
    pub json: bool,
}

/// Window position of a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    /// Shift held (extends the selection on click)
    #[serde(default)]
    pub shift: bool,
}

/// One scripted input event
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    Focus,
    Blur,
    Tick,
    /// Typed characters
    Text(String),
    /// A key binding such as `ctrl+z`
    Key(String),
    /// Advance the clock by this many milliseconds
    Wait(u64),
    /// Replace the clipboard contents
    Clipboard(String),
    Click(Point),
    Drag(Point),
    Release(Point),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    Io(String),
    Parse(String),
    InvalidKey { index: usize, source: KeymapError },
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplayError::Io(msg) => write!(f, "IO error: {}", msg),
            ReplayError::Parse(msg) => write!(f, "Script parse error: {}", msg),
            ReplayError::InvalidKey { index, source } => {
                write!(f, "Event {}: {}", index + 1, source)
            }
        }
    }
}

impl std::error::Error for ReplayError {}

pub fn parse_script(yaml: &str) -> Result<Vec<Event>, ReplayError> {
    serde_yaml::from_str(yaml).map_err(|e| ReplayError::Parse(e.to_string()))
}

pub fn load_script(path: &Path) -> Result<Vec<Event>, ReplayError> {
    let content = std::fs::read_to_string(path).map_err(|e| ReplayError::Io(e.to_string()))?;
    parse_script(&content)
}

/// Drives a command line from script events
pub struct Replayer {
    pub clock: ManualClock,
    pub clipboard: MemoryClipboard,
}

impl Replayer {
    pub fn run(&mut self, line: &mut CommandLine, events: &[Event]) -> Result<(), ReplayError> {
        for (index, event) in events.iter().enumerate() {
            tracing::trace!("Event {}: {:?}", index + 1, event);
            match event {
                Event::Focus => {
                    if !line.focus() {
                        tracing::warn!("Event {}: focus refused", index + 1);
                    }
                }
                Event::Blur => line.blur(),
                Event::Tick => line.tick(),
                Event::Text(text) => line.type_str(text),
                Event::Key(key) => {
                    let keystroke = parse_key_string(key)
                        .map_err(|source| ReplayError::InvalidKey { index, source })?;
                    line.key_down(keystroke);
                }
                Event::Wait(ms) => self.clock.advance(*ms),
                Event::Clipboard(text) => self.clipboard.set_text(text),
                Event::Click(p) => {
                    line.mouse_down(p.x, p.y, p.shift);
                }
                Event::Drag(p) => line.mouse_move(p.x, p.y),
                Event::Release(p) => line.mouse_up(p.x, p.y),
            }
        }
        Ok(())
    }
}
