//! Configurable keyboard mapping
//!
//! - Maps keystrokes to command-line [`Command`]s
//! - Uses Cmd on macOS and Ctrl elsewhere for `cmd+` bindings
//! - Lets users override defaults via YAML
//! - Resolves one key to different commands depending on widget state
//!
//! ```text
//! key event → Keystroke → Keymap::lookup_with_context() → Command → CommandLine
//! ```
//!
//! ```ignore
//! let keymap = Keymap::with_bindings(load_default_keymap());
//! ```

mod binding;
mod command;
mod config;
mod context;
mod defaults;
#[allow(clippy::module_inception)]
mod keymap;
mod types;

pub use binding::Keybinding;
pub use command::Command;
pub use config::{load_keymap_file, parse_key_string, parse_keymap_yaml, KeymapError};
pub use context::{Condition, KeyContext};
pub use defaults::{
    default_bindings, get_default_keymap_yaml, load_default_keymap, load_keymap_layers,
    merge_bindings,
};
pub use keymap::Keymap;
pub use types::{KeyCode, Keystroke, Modifiers};

#[cfg(test)]
mod tests;
