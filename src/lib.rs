//! cmdline - a single-line command input widget
//!
//! This crate provides the editing, annotation and interaction logic of a
//! command bar drawn along the bottom of a window: the user types a line, a
//! [`CommandProcessor`] highlights it, flags problems and offers
//! completions, and Enter hands the line back to the processor.
//!
//! Rendering goes through the small [`Surface`] trait and text measurement
//! through [`TextMeasure`], so the widget runs headless in tests and in the
//! `cmdline` replay binary.

pub mod annotate;
pub mod clipboard;
pub mod command_history;
pub mod command_line;
pub mod config;
pub mod config_paths;
pub mod editable;
pub mod keymap;
pub mod processor;
pub mod theme;
pub mod tracing;
pub mod viewport;

// Re-export commonly used types
pub use command_line::{CommandLine, PointerIcon, Submission, SuggestionMode, Surface};
pub use config::CommandLineConfig;
pub use editable::LineEditor;
pub use processor::CommandProcessor;
pub use theme::Theme;
pub use viewport::TextMeasure;
