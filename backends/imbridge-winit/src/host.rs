//! winit implementation of the bridge's host interface

use std::sync::Arc;

use imbridge::dear_imgui_rs::MouseCursor;
use imbridge::{Host, Modifiers, MouseButton, OFFSCREEN_CURSOR, RawEvent};
use winit::event::{ElementState, Ime, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};
use winit::window::Window;

use crate::cursor::to_winit_cursor;
use crate::input::{to_bridge_button, wheel_amount};

/// State winit only reports through events: cursor position, focus, held
/// buttons and modifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct InputState {
    scale_factor: f64,
    cursor: [f32; 2],
    focused: bool,
    buttons: [bool; 3],
    modifiers: ModifiersState,
}

impl InputState {
    pub fn new(scale_factor: f64, focused: bool) -> Self {
        Self {
            scale_factor,
            cursor: OFFSCREEN_CURSOR,
            focused,
            buttons: [false; 3],
            modifiers: ModifiersState::empty(),
        }
    }

    pub fn cursor(&self) -> [f32; 2] {
        self.cursor
    }

    pub fn focused(&self) -> bool {
        self.focused
    }

    pub fn is_down(&self, button: MouseButton) -> bool {
        self.buttons[button.index()]
    }

    pub fn modifiers(&self) -> Modifiers {
        Modifiers {
            ctrl: self.modifiers.control_key(),
            shift: self.modifiers.shift_key(),
            alt: self.modifiers.alt_key(),
            super_key: self.modifiers.super_key(),
        }
    }

    /// Updates the tracked state from `event` and returns the raw events the
    /// bridge should see, in order.
    pub fn translate(&mut self, event: &WindowEvent) -> Vec<RawEvent<KeyCode>> {
        match event {
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale_factor = *scale_factor;
                Vec::new()
            }
            WindowEvent::Focused(focused) => {
                self.focused = *focused;
                if !focused {
                    // Releases that happen while unfocused are never delivered.
                    self.buttons = [false; 3];
                    self.modifiers = ModifiersState::empty();
                }
                vec![RawEvent::Focus(*focused)]
            }
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(self.scale_factor);
                self.cursor = [logical.x, logical.y];
                Vec::new()
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = OFFSCREEN_CURSOR;
                Vec::new()
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let Some(button) = to_bridge_button(*button) else {
                    return Vec::new();
                };
                let pressed = *state == ElementState::Pressed;
                self.buttons[button.index()] = pressed;
                vec![RawEvent::MouseButton { button, pressed }]
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let [x, y] = wheel_amount(*delta);
                vec![RawEvent::MouseWheel { x, y }]
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
                Vec::new()
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let text = event.text.as_ref().map(|t| t.as_str());
                self.translate_key(event.physical_key, event.state, text)
            }
            WindowEvent::Ime(Ime::Commit(text)) => vec![RawEvent::Text(text.clone())],
            _ => Vec::new(),
        }
    }

    /// Key part of [`InputState::translate`].
    pub fn translate_key(
        &mut self,
        physical_key: PhysicalKey,
        state: ElementState,
        text: Option<&str>,
    ) -> Vec<RawEvent<KeyCode>> {
        let PhysicalKey::Code(code) = physical_key else {
            return Vec::new();
        };
        let pressed = state == ElementState::Pressed;
        // Keep modifier state current before the bridge queries it; some
        // platforms send ModifiersChanged after the key event.
        if let Some(flag) = modifier_flag(code) {
            self.modifiers.set(flag, pressed);
        }

        let mut events = vec![RawEvent::Key { key: code, pressed }];
        if pressed {
            if let Some(text) = text {
                let printable: String = text.chars().filter(|c| !c.is_control()).collect();
                if !printable.is_empty() {
                    events.push(RawEvent::Text(printable));
                }
            }
        }
        events
    }
}

fn modifier_flag(code: KeyCode) -> Option<ModifiersState> {
    match code {
        KeyCode::ControlLeft | KeyCode::ControlRight => Some(ModifiersState::CONTROL),
        KeyCode::ShiftLeft | KeyCode::ShiftRight => Some(ModifiersState::SHIFT),
        KeyCode::AltLeft | KeyCode::AltRight => Some(ModifiersState::ALT),
        KeyCode::SuperLeft | KeyCode::SuperRight => Some(ModifiersState::SUPER),
        _ => None,
    }
}

/// A winit window seen through the bridge's [`Host`] interface.
pub struct WinitHost {
    window: Arc<Window>,
    state: InputState,
    cursor_icon: Option<Option<MouseCursor>>,
}

impl WinitHost {
    pub fn new(window: Arc<Window>) -> Self {
        let state = InputState::new(window.scale_factor(), window.has_focus());
        Self {
            window,
            state,
            cursor_icon: None,
        }
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    pub fn input_state(&self) -> &InputState {
        &self.state
    }

    pub fn translate(&mut self, event: &WindowEvent) -> Vec<RawEvent<KeyCode>> {
        self.state.translate(event)
    }

    /// Shows the cursor Dear ImGui asks for. The window is only touched when
    /// the request changes.
    pub fn apply_cursor(&mut self, cursor: Option<MouseCursor>) {
        if self.cursor_icon == Some(cursor) {
            return;
        }
        self.cursor_icon = Some(cursor);
        match cursor.and_then(to_winit_cursor) {
            Some(icon) => {
                self.window.set_cursor_visible(true);
                self.window.set_cursor(icon);
            }
            None => self.window.set_cursor_visible(false),
        }
    }
}

impl Host for WinitHost {
    fn display_size(&self) -> [f32; 2] {
        let size = self
            .window
            .inner_size()
            .to_logical::<f32>(self.window.scale_factor());
        [size.width, size.height]
    }

    fn framebuffer_size(&self) -> [f32; 2] {
        let size = self.window.inner_size();
        [size.width as f32, size.height as f32]
    }

    fn is_focused(&self) -> bool {
        self.state.focused()
    }

    fn cursor_position(&self) -> [f32; 2] {
        self.state.cursor()
    }

    fn is_mouse_down(&self, button: MouseButton) -> bool {
        self.state.is_down(button)
    }

    fn modifiers(&self) -> Modifiers {
        self.state.modifiers()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::key_table;
    use imbridge::dear_imgui_rs::Key;
    use imbridge::{FrameBridge, InputSink};
    use pretty_assertions::assert_eq;
    use winit::dpi::PhysicalPosition;
    use winit::event::{DeviceId, MouseButton as WinitMouseButton, MouseScrollDelta, TouchPhase};

    fn device() -> DeviceId {
        // SAFETY: only compared, never passed back to the platform.
        unsafe { DeviceId::dummy() }
    }

    #[test]
    fn cursor_is_tracked_in_logical_units() {
        let mut state = InputState::new(2.0, true);
        assert_eq!(state.cursor(), OFFSCREEN_CURSOR);

        state.translate(&WindowEvent::CursorMoved {
            device_id: device(),
            position: PhysicalPosition::new(200.0, 100.0),
        });
        assert_eq!(state.cursor(), [100.0, 50.0]);

        state.translate(&WindowEvent::CursorLeft {
            device_id: device(),
        });
        assert_eq!(state.cursor(), OFFSCREEN_CURSOR);
    }

    #[test]
    fn mouse_buttons_update_state_and_emit_events() {
        let mut state = InputState::new(1.0, true);
        let events = state.translate(&WindowEvent::MouseInput {
            device_id: device(),
            state: ElementState::Pressed,
            button: WinitMouseButton::Right,
        });
        assert_eq!(events, vec![RawEvent::press(MouseButton::Secondary)]);
        assert!(state.is_down(MouseButton::Secondary));

        let ignored = state.translate(&WindowEvent::MouseInput {
            device_id: device(),
            state: ElementState::Pressed,
            button: WinitMouseButton::Forward,
        });
        assert!(ignored.is_empty());
    }

    #[test]
    fn focus_loss_drops_held_buttons() {
        let mut state = InputState::new(1.0, true);
        state.translate(&WindowEvent::MouseInput {
            device_id: device(),
            state: ElementState::Pressed,
            button: WinitMouseButton::Left,
        });
        let events = state.translate(&WindowEvent::Focused(false));
        assert_eq!(events, vec![RawEvent::Focus(false)]);
        assert!(!state.focused());
        assert!(!state.is_down(MouseButton::Primary));
    }

    #[test]
    fn wheel_passes_raw_amounts() {
        let mut state = InputState::new(1.0, true);
        let events = state.translate(&WindowEvent::MouseWheel {
            device_id: device(),
            delta: MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -48.0)),
            phase: TouchPhase::Moved,
        });
        assert_eq!(events, vec![RawEvent::MouseWheel { x: 0.0, y: -48.0 }]);
    }

    #[test]
    fn key_press_emits_key_then_printable_text() {
        let mut state = InputState::new(1.0, true);
        let events = state.translate_key(
            PhysicalKey::Code(KeyCode::KeyA),
            ElementState::Pressed,
            Some("a"),
        );
        assert_eq!(
            events,
            vec![RawEvent::key_down(KeyCode::KeyA), RawEvent::Text("a".into())]
        );

        let enter = state.translate_key(
            PhysicalKey::Code(KeyCode::Enter),
            ElementState::Pressed,
            Some("\r"),
        );
        assert_eq!(enter, vec![RawEvent::key_down(KeyCode::Enter)]);

        let release = state.translate_key(
            PhysicalKey::Code(KeyCode::KeyA),
            ElementState::Released,
            Some("a"),
        );
        assert_eq!(release, vec![RawEvent::key_up(KeyCode::KeyA)]);
    }

    #[test]
    fn modifier_keys_update_modifiers_immediately() {
        let mut state = InputState::new(1.0, true);
        state.translate_key(
            PhysicalKey::Code(KeyCode::ControlLeft),
            ElementState::Pressed,
            None,
        );
        assert!(state.modifiers().ctrl);

        state.translate(&WindowEvent::ModifiersChanged(
            (ModifiersState::CONTROL | ModifiersState::SHIFT).into(),
        ));
        assert_eq!(
            state.modifiers(),
            Modifiers {
                ctrl: true,
                shift: true,
                alt: false,
                super_key: false
            }
        );

        state.translate_key(
            PhysicalKey::Code(KeyCode::ControlLeft),
            ElementState::Released,
            None,
        );
        assert!(!state.modifiers().ctrl);
        assert!(state.modifiers().shift);
    }

    struct StateHost<'a>(&'a InputState);

    impl Host for StateHost<'_> {
        fn display_size(&self) -> [f32; 2] {
            [800.0, 600.0]
        }

        fn framebuffer_size(&self) -> [f32; 2] {
            [800.0, 600.0]
        }

        fn is_focused(&self) -> bool {
            self.0.focused()
        }

        fn cursor_position(&self) -> [f32; 2] {
            self.0.cursor()
        }

        fn is_mouse_down(&self, button: MouseButton) -> bool {
            self.0.is_down(button)
        }

        fn modifiers(&self) -> Modifiers {
            self.0.modifiers()
        }
    }

    /// Keeps only what Dear ImGui would end up believing about keys.
    #[derive(Default)]
    struct KeyboardView {
        down: Vec<Key>,
        modifiers: Modifiers,
    }

    impl InputSink for KeyboardView {
        fn add_key_event(&mut self, key: Key, down: bool) {
            self.down.retain(|k| *k != key);
            if down {
                self.down.push(key);
            }
        }

        fn set_modifiers(&mut self, modifiers: Modifiers) {
            self.modifiers = modifiers;
        }

        fn add_input_character(&mut self, _character: char) {}
        fn add_mouse_wheel(&mut self, _delta: [f32; 2]) {}
        fn add_mouse_pos(&mut self, _pos: [f32; 2]) {}
        fn add_mouse_button(&mut self, _button: MouseButton, _down: bool) {}
        fn set_display_size(&mut self, _size: [f32; 2]) {}
        fn set_framebuffer_scale(&mut self, _scale: [f32; 2]) {}
        fn set_delta_time(&mut self, _seconds: f32) {}
    }

    fn feed(
        state: &InputState,
        bridge: &mut FrameBridge<KeyCode>,
        view: &mut KeyboardView,
        events: Vec<RawEvent<KeyCode>>,
    ) {
        for event in events {
            bridge.handle_event(&event, &StateHost(state), view);
        }
    }

    #[test]
    fn alt_tab_away_leaves_no_keys_or_modifiers_held() {
        let mut state = InputState::new(1.0, true);
        let mut bridge = FrameBridge::new(key_table());
        let mut view = KeyboardView::default();

        let events = state.translate_key(
            PhysicalKey::Code(KeyCode::AltLeft),
            ElementState::Pressed,
            None,
        );
        feed(&state, &mut bridge, &mut view, events);
        let events = state.translate_key(
            PhysicalKey::Code(KeyCode::Backspace),
            ElementState::Pressed,
            None,
        );
        feed(&state, &mut bridge, &mut view, events);
        assert!(view.modifiers.alt);
        assert_eq!(view.down, vec![Key::Backspace]);

        let events = state.translate(&WindowEvent::Focused(false));
        feed(&state, &mut bridge, &mut view, events);
        bridge.prepare_frame(&StateHost(&state), &mut view);
        let events = state.translate(&WindowEvent::Focused(true));
        feed(&state, &mut bridge, &mut view, events);
        bridge.prepare_frame(&StateHost(&state), &mut view);

        assert_eq!(view.modifiers, state.modifiers());
        assert!(!view.modifiers.alt);
        assert!(view.down.is_empty());
    }

    #[test]
    fn ime_commit_becomes_text() {
        let mut state = InputState::new(1.0, true);
        let events = state.translate(&WindowEvent::Ime(Ime::Commit("日本".into())));
        assert_eq!(events, vec![RawEvent::Text("日本".into())]);
    }
}
