//! Logging setup and edit-state diffing
//!
//! Console output is filtered by `RUST_LOG` (default `warn`), e.g.
//! `RUST_LOG=cmdline=debug` or `RUST_LOG=cmdline::command_line=trace`.
//!
//! Logs are also written to `~/.config/cmdline/logs/cmdline.log` with daily
//! rotation, always at debug level.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::editable::LineEditor;

/// Install the console and file logging layers
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "cmdline.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Snapshot of the editable state, taken around a command for diff logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSnapshot {
    pub text: String,
    pub from: usize,
    pub to: usize,
    pub left: bool,
    pub insert_mode: bool,
}

impl EditSnapshot {
    pub fn from_editor(editor: &LineEditor) -> Self {
        let selection = editor.selection();
        Self {
            text: editor.text().to_string(),
            from: selection.from,
            to: selection.to,
            left: selection.left,
            insert_mode: editor.insert_mode(),
        }
    }

    /// Describe what changed between two snapshots, if anything
    pub fn diff(&self, other: &EditSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.text != other.text {
            changes.push(format!("text: {:?} → {:?}", self.text, other.text));
        }
        if (self.from, self.to) != (other.from, other.to) {
            changes.push(format!(
                "selection: {}..{} → {}..{}",
                self.from, self.to, other.from, other.to
            ));
        } else if self.left != other.left {
            changes.push("selection direction flipped".to_string());
        }
        if self.insert_mode != other.insert_mode {
            let mode = if other.insert_mode {
                "insert"
            } else {
                "overwrite"
            };
            changes.push(format!("mode: {}", mode));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
