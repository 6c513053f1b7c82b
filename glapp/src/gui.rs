//! Overlay windows of the demo

use imbridge::dear_imgui_rs::{Condition, Ui};
use imbridge::{InputSnapshot, MouseButton};

/// Widget state that lives across frames.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoState {
    pub value: f32,
    pub clear_color: [f32; 3],
    pub show_demo: bool,
    pub show_another: bool,
    pub show_bridge: bool,
    pub counter: u32,
    quit: bool,
}

impl Default for DemoState {
    fn default() -> Self {
        Self::new([1.0, 1.0, 1.0])
    }
}

impl DemoState {
    pub fn new(clear_color: [f32; 3]) -> Self {
        Self {
            value: 0.0,
            clear_color,
            show_demo: false,
            show_another: false,
            show_bridge: true,
            counter: 0,
            quit: false,
        }
    }

    /// Set once File → Quit was chosen.
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    pub fn press_counter(&mut self) {
        self.counter += 1;
    }

    pub fn draw(&mut self, ui: &Ui, snapshot: &InputSnapshot) {
        self.menu_bar(ui);
        self.debug_window(ui);

        if self.show_another {
            let mut close = false;
            ui.window("Another window")
                .size([260.0, 90.0], Condition::FirstUseEver)
                .build(|| {
                    ui.text("Hello from another window!");
                    close = ui.button("Close Me");
                });
            if close {
                self.show_another = false;
            }
        }

        if self.show_bridge {
            ui.window("Input Bridge")
                .position([20.0, 420.0], Condition::FirstUseEver)
                .size([340.0, 200.0], Condition::FirstUseEver)
                .build(|| {
                    for line in snapshot_lines(snapshot) {
                        ui.text(line);
                    }
                });
        }

        if self.show_demo {
            ui.show_demo_window(&mut self.show_demo);
        }
    }

    fn menu_bar(&mut self, ui: &Ui) {
        let Some(_bar) = ui.begin_main_menu_bar() else {
            return;
        };
        ui.menu("File", || {
            if ui.menu_item("Quit") {
                self.request_quit();
            }
        });
        ui.menu("Windows", || {
            ui.menu_item_toggle("Demo Window", None::<&str>, &mut self.show_demo, true);
            ui.menu_item_toggle("Another Window", None::<&str>, &mut self.show_another, true);
            ui.menu_item_toggle("Input Bridge", None::<&str>, &mut self.show_bridge, true);
        });
    }

    fn debug_window(&mut self, ui: &Ui) {
        ui.window("Debug")
            .position([20.0, 40.0], Condition::FirstUseEver)
            .size([400.0, 220.0], Condition::FirstUseEver)
            .build(|| {
                ui.text("Hello, world!");
                ui.slider_f32("float", &mut self.value, 0.0, 1.0);
                ui.color_edit3("clear color", &mut self.clear_color);
                ui.checkbox("Demo Window", &mut self.show_demo);
                ui.checkbox("Another Window", &mut self.show_another);

                if ui.button("Button") {
                    self.press_counter();
                }
                ui.same_line();
                ui.text(format!("counter = {}", self.counter));

                let framerate = ui.io().framerate();
                ui.text(frame_timing(framerate));
            });
    }
}

/// The frame timing line of the debug window.
pub fn frame_timing(framerate: f32) -> String {
    let ms = if framerate > 0.0 { 1000.0 / framerate } else { 0.0 };
    format!("Application average {ms:.3} ms/frame ({framerate:.1} FPS)")
}

/// Text lines describing what the bridge pushed this frame.
pub fn snapshot_lines(snapshot: &InputSnapshot) -> Vec<String> {
    let [dw, dh] = snapshot.display_size;
    let [fw, fh] = snapshot.framebuffer_size;
    let [sx, sy] = snapshot.framebuffer_scale;
    let cursor = if snapshot.has_cursor() {
        let [x, y] = snapshot.mouse_pos;
        format!("cursor: {x:.1}, {y:.1}")
    } else {
        "cursor: outside".to_string()
    };
    let buttons: Vec<&str> = MouseButton::ALL
        .into_iter()
        .map(|button| if snapshot.is_mouse_down(button) { "down" } else { "up" })
        .collect();

    vec![
        format!("display: {dw:.0} x {dh:.0}"),
        format!("framebuffer: {fw:.0} x {fh:.0} (scale {sx:.2}, {sy:.2})"),
        format!("delta: {:.2} ms", snapshot.delta_time * 1000.0),
        cursor,
        format!("buttons: {}", buttons.join(" / ")),
        format!("wheel: {:+.0}, {:+.0}", snapshot.wheel[0], snapshot.wheel[1]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use imbridge::OFFSCREEN_CURSOR;
    use pretty_assertions::assert_eq;

    fn snapshot() -> InputSnapshot {
        InputSnapshot {
            display_size: [1280.0, 800.0],
            framebuffer_size: [2560.0, 1600.0],
            framebuffer_scale: [2.0, 2.0],
            delta_time: 0.016,
            mouse_pos: [10.0, 20.5],
            mouse_down: [true, false, false],
            wheel: [0.0, -2.0],
        }
    }

    #[test]
    fn starts_with_defaults() {
        let state = DemoState::default();
        assert_eq!(state.counter, 0);
        assert_eq!(state.clear_color, [1.0; 3]);
        assert!(!state.show_demo);
        assert!(!state.show_another);
        assert!(!state.quit_requested());
    }

    #[test]
    fn counter_and_quit() {
        let mut state = DemoState::new([0.1, 0.2, 0.3]);
        state.press_counter();
        state.press_counter();
        assert_eq!(state.counter, 2);
        state.request_quit();
        assert!(state.quit_requested());
    }

    #[test]
    fn frame_timing_line() {
        assert_eq!(
            frame_timing(50.0),
            "Application average 20.000 ms/frame (50.0 FPS)"
        );
        assert_eq!(
            frame_timing(0.0),
            "Application average 0.000 ms/frame (0.0 FPS)"
        );
    }

    #[test]
    fn describes_snapshot() {
        assert_eq!(
            snapshot_lines(&snapshot()),
            vec![
                "display: 1280 x 800".to_string(),
                "framebuffer: 2560 x 1600 (scale 2.00, 2.00)".to_string(),
                "delta: 16.00 ms".to_string(),
                "cursor: 10.0, 20.5".to_string(),
                "buttons: down / up / up".to_string(),
                "wheel: +0, -2".to_string(),
            ]
        );
    }

    #[test]
    fn offscreen_cursor_is_reported_as_outside() {
        let mut snap = snapshot();
        snap.mouse_pos = OFFSCREEN_CURSOR;
        assert_eq!(snapshot_lines(&snap)[3], "cursor: outside");
    }
}
