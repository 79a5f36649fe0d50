//! Clipboard access for copy, cut and paste.

use std::cell::RefCell;
use std::rc::Rc;

pub trait Clipboard {
    /// Current clipboard text, if any
    fn get_text(&mut self) -> Option<String>;

    fn set_text(&mut self, text: &str);
}

/// The OS clipboard. Unavailable clipboards read as empty and drop writes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn get_text(&mut self) -> Option<String> {
        if let Ok(mut clipboard) = arboard::Clipboard::new() {
            clipboard.get_text().ok()
        } else {
            tracing::debug!("System clipboard unavailable");
            None
        }
    }

    fn set_text(&mut self, text: &str) {
        if let Ok(mut clipboard) = arboard::Clipboard::new() {
            let _ = clipboard.set_text(text);
        }
    }
}

/// In-process clipboard. Clones share contents.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Rc<RefCell<Option<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            contents: Rc::new(RefCell::new(Some(text.to_string()))),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl Clipboard for MemoryClipboard {
    fn get_text(&mut self) -> Option<String> {
        self.contents.borrow().clone()
    }

    fn set_text(&mut self, text: &str) {
        *self.contents.borrow_mut() = Some(text.to_string());
    }
}
