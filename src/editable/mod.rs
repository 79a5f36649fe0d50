//! Single-line text editing for the command line.
//!
//! # Architecture
//!
//! - [`LineBuffer`]: character-addressed `String` storage
//! - [`Selection`]: `from <= to` range plus caret side
//! - [`UndoHistory`]: snapshot undo/redo, coalesced by [`CoalescePolicy`]
//! - [`LineEditor`]: the edit engine tying the above together
//! - [`Clock`]: injectable time source for coalescing and caret blink
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use cmdline::editable::{LineEditor, ManualClock};
//!
//! let mut editor = LineEditor::new(Rc::new(ManualClock::new()));
//! editor.input_char('(');
//! assert_eq!(editor.text(), "()");
//! assert_eq!(editor.caret(), 1);
//! ```

mod buffer;
mod clock;
mod history;
mod pairing;
mod selection;
mod state;

pub use buffer::LineBuffer;
pub use clock::{Clock, ManualClock, SystemClock};
pub use history::{CoalescePolicy, UndoEntry, UndoHistory};
pub use pairing::{closer_for, is_closer, is_pair};
pub use selection::Selection;
pub use state::LineEditor;
