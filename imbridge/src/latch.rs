use crate::host::MouseButton;

/// Remembers "pressed since the last frame" for each mouse button.
///
/// A press sets the entry; only [`ButtonLatch::consume`] clears it. A button
/// pressed and released between two frames is therefore still reported
/// down for one frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ButtonLatch {
    pressed: [bool; 3],
}

impl ButtonLatch {
    pub fn press(&mut self, button: MouseButton) {
        self.pressed[button.index()] = true;
    }

    pub fn is_set(&self, button: MouseButton) -> bool {
        self.pressed[button.index()]
    }

    /// Returns the latched state and resets every entry.
    pub fn consume(&mut self) -> [bool; 3] {
        std::mem::take(&mut self.pressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consume_reports_once_then_clears() {
        let mut latch = ButtonLatch::default();
        latch.press(MouseButton::Secondary);
        assert!(latch.is_set(MouseButton::Secondary));

        assert_eq!(latch.consume(), [false, true, false]);
        assert_eq!(latch.consume(), [false, false, false]);
    }

    #[test]
    fn repeated_presses_collapse() {
        let mut latch = ButtonLatch::default();
        latch.press(MouseButton::Primary);
        latch.press(MouseButton::Primary);
        assert_eq!(latch.consume(), [true, false, false]);
    }
}
