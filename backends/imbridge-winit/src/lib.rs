//! winit adapter for the imbridge frame bridge
//!
//! [`WinitHost`] answers the bridge's [`imbridge::Host`] queries for a
//! `winit` window and turns `WindowEvent`s into [`imbridge::RawEvent`]s.
//! [`key_table`] is the physical key mapping to hand to
//! [`imbridge::FrameBridge::new`], and [`SystemClipboard`] provides the
//! system clipboard through `arboard`.

mod clipboard;
mod cursor;
mod host;
mod input;

pub use clipboard::SystemClipboard;
pub use cursor::to_winit_cursor;
pub use host::{InputState, WinitHost};
pub use input::{key_table, to_bridge_button, wheel_amount};

/// Bridge type for winit hosts.
pub type WinitBridge = imbridge::FrameBridge<winit::keyboard::KeyCode>;
