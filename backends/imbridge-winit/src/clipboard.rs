//! System clipboard through arboard

use imbridge::{HostClipboard, NullClipboard};

/// The system clipboard, or a stand-in that is always empty when the
/// system clipboard cannot be opened.
pub enum SystemClipboard {
    System(arboard::Clipboard),
    Unavailable(NullClipboard),
}

impl SystemClipboard {
    pub fn open_or_null() -> Self {
        match arboard::Clipboard::new() {
            Ok(clipboard) => SystemClipboard::System(clipboard),
            Err(err) => {
                tracing::warn!(target: "imbridge_winit", "system clipboard unavailable: {err}");
                SystemClipboard::Unavailable(NullClipboard)
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, SystemClipboard::System(_))
    }
}

impl HostClipboard for SystemClipboard {
    fn get_text(&mut self) -> Option<String> {
        match self {
            SystemClipboard::System(clipboard) => match clipboard.get_text() {
                Ok(text) => Some(text),
                Err(err) => {
                    tracing::debug!(target: "imbridge_winit", "clipboard read failed: {err}");
                    None
                }
            },
            SystemClipboard::Unavailable(null) => null.get_text(),
        }
    }

    fn set_text(&mut self, text: &str) {
        match self {
            SystemClipboard::System(clipboard) => {
                if let Err(err) = clipboard.set_text(text.to_owned()) {
                    tracing::warn!(target: "imbridge_winit", "clipboard write failed: {err}");
                }
            }
            SystemClipboard::Unavailable(null) => null.set_text(text),
        }
    }
}
