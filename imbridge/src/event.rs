//! Host input events in the shape the bridge consumes

use crate::host::MouseButton;

/// One discrete input event, already translated out of the host's native
/// event type. `K` is the host's physical key type.
#[derive(Clone, Debug, PartialEq)]
pub enum RawEvent<K> {
    MouseButton { button: MouseButton, pressed: bool },
    /// Scroll amount per axis. Only the sign is forwarded.
    MouseWheel { x: f32, y: f32 },
    /// Decoded text, forwarded character by character.
    Text(String),
    Key { key: K, pressed: bool },
    /// Host window gained (`true`) or lost (`false`) keyboard focus.
    Focus(bool),
}

impl<K> RawEvent<K> {
    pub fn key_down(key: K) -> Self {
        RawEvent::Key { key, pressed: true }
    }

    pub fn key_up(key: K) -> Self {
        RawEvent::Key {
            key,
            pressed: false,
        }
    }

    pub fn press(button: MouseButton) -> Self {
        RawEvent::MouseButton {
            button,
            pressed: true,
        }
    }

    pub fn release(button: MouseButton) -> Self {
        RawEvent::MouseButton {
            button,
            pressed: false,
        }
    }
}

/// Reduces a raw scroll magnitude to a unit step: `1.0`, `-1.0` or `0.0`.
pub(crate) fn unit_step(amount: f32) -> f32 {
    if amount > 0.0 {
        1.0
    } else if amount < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_step_keeps_only_sign() {
        assert_eq!(unit_step(120.0), 1.0);
        assert_eq!(unit_step(0.25), 1.0);
        assert_eq!(unit_step(-3.0), -1.0);
        assert_eq!(unit_step(0.0), 0.0);
        assert_eq!(unit_step(f32::NAN), 0.0);
    }
}
