//! Clipboard proxy registered with Dear ImGui

use dear_imgui_rs::ClipboardBackend;

/// Host clipboard access.
///
/// `get_text` returns `None` when the clipboard is empty, holds non-text
/// data or cannot be reached. The bridge never turns that into an error.
pub trait HostClipboard {
    fn get_text(&mut self) -> Option<String>;
    fn set_text(&mut self, text: &str);
}

/// Clipboard for hosts without one. Reads are always empty, writes are dropped.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullClipboard;

impl HostClipboard for NullClipboard {
    fn get_text(&mut self) -> Option<String> {
        None
    }

    fn set_text(&mut self, _text: &str) {}
}

impl<C: HostClipboard + ?Sized> HostClipboard for Box<C> {
    fn get_text(&mut self) -> Option<String> {
        (**self).get_text()
    }

    fn set_text(&mut self, text: &str) {
        (**self).set_text(text)
    }
}

/// Adapts a [`HostClipboard`] to Dear ImGui's clipboard backend.
///
/// A missing host value is reported to Dear ImGui as the empty string.
pub struct ClipboardBridge<C> {
    host: C,
}

impl<C: HostClipboard> ClipboardBridge<C> {
    pub fn new(host: C) -> Self {
        Self { host }
    }

    pub fn into_inner(self) -> C {
        self.host
    }
}

impl<C: HostClipboard + 'static> ClipboardBackend for ClipboardBridge<C> {
    fn get(&mut self) -> Option<String> {
        Some(self.host.get_text().unwrap_or_default())
    }

    fn set(&mut self, value: &str) {
        tracing::trace!(target: "imbridge", len = value.len(), "clipboard set");
        self.host.set_text(value);
    }
}
