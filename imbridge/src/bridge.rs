//! Per-event and per-frame synchronization of Dear ImGui's input model

use std::hash::Hash;

use dear_imgui_rs::{Context, Key};
use web_time::Instant;

use crate::clipboard::{ClipboardBridge, HostClipboard};
use crate::event::{RawEvent, unit_step};
use crate::host::{Host, MouseButton, OFFSCREEN_CURSOR};
use crate::keymap::KeyTable;
use crate::latch::ButtonLatch;
use crate::sink::InputSink;

/// Delta time reported for the first frame, when no previous timestamp exists.
pub const FALLBACK_DELTA: f32 = 1.0 / 60.0;

/// Lower bound for measured frame deltas. Dear ImGui asserts on zero.
pub const MIN_DELTA: f32 = 1.0e-6;

/// Values pushed to Dear ImGui at the start of a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct InputSnapshot {
    /// Logical window size.
    pub display_size: [f32; 2],
    /// Physical drawable size.
    pub framebuffer_size: [f32; 2],
    /// `framebuffer_size / display_size` per axis.
    pub framebuffer_scale: [f32; 2],
    /// Seconds since the previous frame.
    pub delta_time: f32,
    /// Cursor position, or [`OFFSCREEN_CURSOR`] when the window is unfocused.
    pub mouse_pos: [f32; 2],
    /// Primary, secondary, tertiary.
    pub mouse_down: [bool; 3],
    /// Unit wheel steps accumulated since the previous frame.
    pub wheel: [f32; 2],
}

impl InputSnapshot {
    pub fn is_mouse_down(&self, button: MouseButton) -> bool {
        self.mouse_down[button.index()]
    }

    pub fn has_cursor(&self) -> bool {
        self.mouse_pos != OFFSCREEN_CURSOR
    }
}

/// Keeps Dear ImGui's input state in step with a [`Host`].
///
/// Call [`FrameBridge::handle_event`] for every translated host event and
/// [`FrameBridge::prepare_frame`] exactly once per frame, before
/// `Context::frame`.
#[derive(Debug)]
pub struct FrameBridge<K> {
    keys: KeyTable<K>,
    /// Mapped keys last reported down, in press order.
    held: Vec<Key>,
    latch: ButtonLatch,
    wheel: [f32; 2],
    last_frame: Option<Instant>,
}

impl<K: Eq + Hash> FrameBridge<K> {
    pub fn new(keys: KeyTable<K>) -> Self {
        let missing = keys.missing_keys();
        if keys.is_empty() {
            tracing::warn!(target: "imbridge", "key table is empty; key events will only update modifiers");
        } else if !missing.is_empty() {
            tracing::warn!(target: "imbridge", ?missing, "key table does not map every required key");
        }
        Self {
            keys,
            held: Vec::new(),
            latch: ButtonLatch::default(),
            wheel: [0.0; 2],
            last_frame: None,
        }
    }

    pub fn key_table(&self) -> &KeyTable<K> {
        &self.keys
    }

    /// Mapped keys Dear ImGui currently sees as down.
    pub fn held_keys(&self) -> &[Key] {
        &self.held
    }

    pub fn latch(&self) -> &ButtonLatch {
        &self.latch
    }

    /// Registers the host clipboard and the platform name with `imgui`.
    pub fn attach<C>(&self, imgui: &mut Context, clipboard: C)
    where
        C: HostClipboard + 'static,
    {
        imgui.set_clipboard_backend(ClipboardBridge::new(clipboard));
        let name = format!("imbridge {}", env!("CARGO_PKG_VERSION"));
        if let Err(err) = imgui.set_platform_name(Some(name)) {
            tracing::warn!(target: "imbridge", "failed to set platform name: {err}");
        }
        tracing::debug!(target: "imbridge", keys = self.keys.len(), "frame bridge attached");
    }

    /// Forwards one host event.
    pub fn handle_event<H, S>(&mut self, event: &RawEvent<K>, host: &H, sink: &mut S)
    where
        H: Host + ?Sized,
        S: InputSink + ?Sized,
    {
        match event {
            RawEvent::MouseButton { button, pressed } => {
                // Releases are picked up from the host at frame start.
                if *pressed {
                    self.latch.press(*button);
                }
            }
            RawEvent::MouseWheel { x, y } => {
                let step = [unit_step(*x), unit_step(*y)];
                if step != [0.0, 0.0] {
                    self.wheel[0] += step[0];
                    self.wheel[1] += step[1];
                    sink.add_mouse_wheel(step);
                }
            }
            RawEvent::Text(text) => {
                for ch in text.chars() {
                    sink.add_input_character(ch);
                }
            }
            RawEvent::Key { key, pressed } => {
                if let Some(imgui_key) = self.keys.get(key) {
                    if *pressed {
                        if !self.held.contains(&imgui_key) {
                            self.held.push(imgui_key);
                        }
                    } else {
                        self.held.retain(|k| *k != imgui_key);
                    }
                    sink.add_key_event(imgui_key, *pressed);
                }
                sink.set_modifiers(host.modifiers());
            }
            RawEvent::Focus(focused) => {
                // Releases that happen while unfocused never arrive.
                if !focused {
                    for key in self.held.drain(..) {
                        sink.add_key_event(key, false);
                    }
                }
                sink.set_modifiers(host.modifiers());
            }
        }
    }

    /// Computes this frame's snapshot, consuming the button latch and the
    /// accumulated wheel steps. Does not touch Dear ImGui.
    pub fn snapshot<H: Host + ?Sized>(&mut self, host: &H) -> InputSnapshot {
        let now = host.now();
        let delta_time = match self.last_frame {
            Some(prev) => now
                .saturating_duration_since(prev)
                .as_secs_f32()
                .max(MIN_DELTA),
            None => FALLBACK_DELTA,
        };
        self.last_frame = Some(now);

        let display_size = host.display_size();
        let framebuffer_size = host.framebuffer_size();
        let framebuffer_scale = [
            scale_axis(framebuffer_size[0], display_size[0]),
            scale_axis(framebuffer_size[1], display_size[1]),
        ];

        let mouse_pos = if host.is_focused() {
            host.cursor_position()
        } else {
            OFFSCREEN_CURSOR
        };

        let latched = self.latch.consume();
        let mut mouse_down = [false; 3];
        for button in MouseButton::ALL {
            let i = button.index();
            mouse_down[i] = latched[i] || host.is_mouse_down(button);
        }

        InputSnapshot {
            display_size,
            framebuffer_size,
            framebuffer_scale,
            delta_time,
            mouse_pos,
            mouse_down,
            wheel: std::mem::take(&mut self.wheel),
        }
    }

    /// Begins a frame: computes the snapshot and pushes it to `sink`.
    pub fn prepare_frame<H, S>(&mut self, host: &H, sink: &mut S) -> InputSnapshot
    where
        H: Host + ?Sized,
        S: InputSink + ?Sized,
    {
        let snapshot = self.snapshot(host);
        sink.set_display_size(snapshot.display_size);
        sink.set_framebuffer_scale(snapshot.framebuffer_scale);
        sink.set_delta_time(snapshot.delta_time);
        sink.add_mouse_pos(snapshot.mouse_pos);
        for button in MouseButton::ALL {
            sink.add_mouse_button(button, snapshot.is_mouse_down(button));
        }
        snapshot
    }
}

fn scale_axis(framebuffer: f32, display: f32) -> f32 {
    if display > 0.0 {
        framebuffer / display
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Modifiers;
    use crate::keymap::REQUIRED_KEYS;
    use approx::assert_relative_eq;
    use std::io;
    use std::sync::{Arc, Mutex};

    struct StillHost {
        now: Instant,
    }

    impl Host for StillHost {
        fn display_size(&self) -> [f32; 2] {
            [0.0, 0.0]
        }

        fn framebuffer_size(&self) -> [f32; 2] {
            [0.0, 0.0]
        }

        fn is_focused(&self) -> bool {
            true
        }

        fn cursor_position(&self) -> [f32; 2] {
            [1.0, 2.0]
        }

        fn is_mouse_down(&self, _button: MouseButton) -> bool {
            false
        }

        fn modifiers(&self) -> Modifiers {
            Modifiers::default()
        }

        fn now(&self) -> Instant {
            self.now
        }
    }

    #[test]
    fn zero_interval_is_raised_to_minimum() {
        let host = StillHost {
            now: Instant::now(),
        };
        let mut bridge = FrameBridge::new(KeyTable::<u8>::new());

        assert_relative_eq!(bridge.snapshot(&host).delta_time, FALLBACK_DELTA);
        assert_relative_eq!(bridge.snapshot(&host).delta_time, MIN_DELTA);
    }

    #[test]
    fn zero_display_size_yields_unit_scale() {
        let host = StillHost {
            now: Instant::now(),
        };
        let mut bridge = FrameBridge::new(KeyTable::<u8>::new());
        assert_eq!(bridge.snapshot(&host).framebuffer_scale, [1.0, 1.0]);
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn logs_while(f: impl FnOnce()) -> String {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = logs.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn partial_key_table_is_reported_at_construction() {
        let logs = logs_while(|| {
            FrameBridge::new(KeyTable::new().with(1u8, Key::Tab).with(2, Key::Escape));
        });
        assert!(logs.contains("key table does not map every required key"));
        assert!(logs.contains("Enter"));
        assert!(!logs.contains("Tab,"));
    }

    #[test]
    fn complete_key_table_logs_nothing() {
        let logs = logs_while(|| {
            let table: KeyTable<usize> = REQUIRED_KEYS.iter().copied().enumerate().collect();
            FrameBridge::new(table);
        });
        assert!(logs.is_empty(), "unexpected output: {logs}");
    }

    #[test]
    fn scale_axis_divides_physical_by_logical() {
        assert_relative_eq!(scale_axis(2560.0, 1280.0), 2.0);
        assert_relative_eq!(scale_axis(1500.0, 1000.0), 1.5);
        assert_relative_eq!(scale_axis(100.0, -1.0), 1.0);
    }
}
