//! The grammar side of the command line.
//!
//! A [`CommandProcessor`] is asked to annotate the line after every content
//! change and to run it when submitted. It only ever reports through the
//! [`AnnotationSink`] it is handed.

mod literal;

pub use literal::{LiteralProcessor, LiteralTree};

use crate::annotate::AnnotationSink;

pub trait CommandProcessor {
    /// Report highlights, suggestions and problems for `text` with the caret at `caret`.
    ///
    /// An error drops the suggestions reported so far for this line; any
    /// highlights and problems already reported are kept.
    fn process(
        &mut self,
        text: &str,
        caret: usize,
        sink: &mut dyn AnnotationSink,
    ) -> anyhow::Result<()>;

    /// Execute a submitted line
    fn on_command(&mut self, text: &str) -> anyhow::Result<()>;
}
