//! winit input mapping

use imbridge::dear_imgui_rs::Key;
use imbridge::{KeyTable, MouseButton};
use winit::event::{MouseButton as WinitMouseButton, MouseScrollDelta};
use winit::keyboard::KeyCode;

/// Physical key table for winit hosts.
///
/// Maps scancode-level keys, so shortcuts such as Ctrl+Z follow key
/// position and do not change with the active keyboard layout.
pub fn key_table() -> KeyTable<KeyCode> {
    [
        (KeyCode::Tab, Key::Tab),
        (KeyCode::ArrowLeft, Key::LeftArrow),
        (KeyCode::ArrowRight, Key::RightArrow),
        (KeyCode::ArrowUp, Key::UpArrow),
        (KeyCode::ArrowDown, Key::DownArrow),
        (KeyCode::PageUp, Key::PageUp),
        (KeyCode::PageDown, Key::PageDown),
        (KeyCode::Home, Key::Home),
        (KeyCode::End, Key::End),
        (KeyCode::Insert, Key::Insert),
        (KeyCode::Delete, Key::Delete),
        (KeyCode::Backspace, Key::Backspace),
        (KeyCode::Space, Key::Space),
        (KeyCode::Enter, Key::Enter),
        (KeyCode::NumpadEnter, Key::Enter),
        (KeyCode::Escape, Key::Escape),
        (KeyCode::KeyA, Key::A),
        (KeyCode::KeyC, Key::C),
        (KeyCode::KeyV, Key::V),
        (KeyCode::KeyX, Key::X),
        (KeyCode::KeyY, Key::Y),
        (KeyCode::KeyZ, Key::Z),
    ]
    .into_iter()
    .collect()
}

pub fn to_bridge_button(button: WinitMouseButton) -> Option<MouseButton> {
    match button {
        WinitMouseButton::Left => Some(MouseButton::Primary),
        WinitMouseButton::Right => Some(MouseButton::Secondary),
        WinitMouseButton::Middle => Some(MouseButton::Tertiary),
        _ => None,
    }
}

/// Raw scroll amount per axis. Line and pixel deltas only differ in scale,
/// and the bridge keeps the sign alone.
pub fn wheel_amount(delta: MouseScrollDelta) -> [f32; 2] {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => [x, y],
        MouseScrollDelta::PixelDelta(pos) => [pos.x as f32, pos.y as f32],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn table_covers_every_required_key() {
        let table = key_table();
        assert!(table.missing_keys().is_empty());
        assert_eq!(table.get(&KeyCode::KeyZ), Some(Key::Z));
        assert_eq!(table.get(&KeyCode::NumpadEnter), Some(Key::Enter));
        assert_eq!(table.get(&KeyCode::F1), None);
    }

    #[test]
    fn mouse_buttons() {
        assert_eq!(to_bridge_button(WinitMouseButton::Left), Some(MouseButton::Primary));
        assert_eq!(to_bridge_button(WinitMouseButton::Right), Some(MouseButton::Secondary));
        assert_eq!(to_bridge_button(WinitMouseButton::Middle), Some(MouseButton::Tertiary));
        assert_eq!(to_bridge_button(WinitMouseButton::Back), None);
        assert_eq!(to_bridge_button(WinitMouseButton::Other(7)), None);
    }

    #[test]
    fn wheel_amounts() {
        assert_eq!(wheel_amount(MouseScrollDelta::LineDelta(0.0, -2.0)), [0.0, -2.0]);
        assert_eq!(
            wheel_amount(MouseScrollDelta::PixelDelta(PhysicalPosition::new(-30.0, 0.0))),
            [-30.0, 0.0]
        );
    }
}
