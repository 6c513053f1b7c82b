//! Frame and input bridge between a native window host and Dear ImGui.
//!
//! The bridge is written once against the [`Host`] capability trait. Each
//! windowing library provides a small adapter implementing [`Host`] and
//! translating its native events into [`RawEvent`]s; the bridge then keeps
//! Dear ImGui's input model in sync:
//!
//! ```no_run
//! # use imbridge::{FrameBridge, Host, KeyTable, RawEvent};
//! # fn drive<H: Host>(host: &H, events: Vec<RawEvent<u32>>, imgui: &mut dear_imgui_rs::Context) {
//! let mut bridge = FrameBridge::new(KeyTable::<u32>::default());
//! for event in &events {
//!     bridge.handle_event(event, host, imgui.io_mut());
//! }
//! bridge.prepare_frame(host, imgui.io_mut());
//! let ui = imgui.frame();
//! ui.text("Hello");
//! # }
//! ```

mod bridge;
mod clipboard;
mod event;
mod host;
mod keymap;
mod latch;
mod sink;

pub use bridge::{FALLBACK_DELTA, FrameBridge, InputSnapshot, MIN_DELTA};
pub use clipboard::{ClipboardBridge, HostClipboard, NullClipboard};
pub use event::RawEvent;
pub use host::{Host, Modifiers, MouseButton, OFFSCREEN_CURSOR};
pub use keymap::{KeyTable, REQUIRED_KEYS};
pub use latch::ButtonLatch;
pub use sink::InputSink;

/// Re-export so adapters and applications agree on one Dear ImGui version.
pub use dear_imgui_rs;
