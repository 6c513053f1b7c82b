//! Host capability interface

use web_time::Instant;

/// Cursor position reported while the host window has no focus or no cursor.
///
/// Dear ImGui treats `-f32::MAX` on both axes as "mouse unavailable".
pub const OFFSCREEN_CURSOR: [f32; 2] = [-f32::MAX, -f32::MAX];

/// The three mouse buttons tracked by the bridge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Primary,
    Secondary,
    Tertiary,
}

impl MouseButton {
    /// All tracked buttons, in latch order.
    pub const ALL: [MouseButton; 3] = [
        MouseButton::Primary,
        MouseButton::Secondary,
        MouseButton::Tertiary,
    ];

    /// Position of this button in latch and snapshot arrays.
    pub const fn index(self) -> usize {
        match self {
            MouseButton::Primary => 0,
            MouseButton::Secondary => 1,
            MouseButton::Tertiary => 2,
        }
    }

    pub(crate) fn to_imgui(self) -> dear_imgui_rs::MouseButton {
        match self {
            MouseButton::Primary => dear_imgui_rs::MouseButton::Left,
            MouseButton::Secondary => dear_imgui_rs::MouseButton::Right,
            MouseButton::Tertiary => dear_imgui_rs::MouseButton::Middle,
        }
    }
}

/// Modifier keys currently held, as queried from the host.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub super_key: bool,
}

/// What the bridge needs to know about the window it serves.
///
/// Every method is a query of current state; none of them may block.
pub trait Host {
    /// Window size in logical units.
    fn display_size(&self) -> [f32; 2];

    /// Drawable size in physical pixels.
    fn framebuffer_size(&self) -> [f32; 2];

    fn is_focused(&self) -> bool;

    /// Cursor position in logical units, origin at the top-left corner.
    fn cursor_position(&self) -> [f32; 2];

    fn is_mouse_down(&self, button: MouseButton) -> bool;

    /// Current modifier state. Queried after every key event instead of
    /// trusting the modifier bits carried by the event itself.
    fn modifiers(&self) -> Modifiers;

    /// Monotonic clock.
    fn now(&self) -> Instant {
        Instant::now()
    }
}

impl<H: Host + ?Sized> Host for &H {
    fn display_size(&self) -> [f32; 2] {
        (**self).display_size()
    }

    fn framebuffer_size(&self) -> [f32; 2] {
        (**self).framebuffer_size()
    }

    fn is_focused(&self) -> bool {
        (**self).is_focused()
    }

    fn cursor_position(&self) -> [f32; 2] {
        (**self).cursor_position()
    }

    fn is_mouse_down(&self, button: MouseButton) -> bool {
        (**self).is_mouse_down(button)
    }

    fn modifiers(&self) -> Modifiers {
        (**self).modifiers()
    }

    fn now(&self) -> Instant {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_indices_follow_latch_order() {
        for (i, button) in MouseButton::ALL.iter().enumerate() {
            assert_eq!(button.index(), i);
        }
    }

    #[test]
    fn buttons_map_to_imgui_buttons() {
        assert_eq!(
            MouseButton::Primary.to_imgui(),
            dear_imgui_rs::MouseButton::Left
        );
        assert_eq!(
            MouseButton::Secondary.to_imgui(),
            dear_imgui_rs::MouseButton::Right
        );
        assert_eq!(
            MouseButton::Tertiary.to_imgui(),
            dear_imgui_rs::MouseButton::Middle
        );
    }
}
