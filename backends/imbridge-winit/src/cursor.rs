//! Mouse cursor shape forwarding

use imbridge::dear_imgui_rs::MouseCursor;
use winit::window::CursorIcon;

/// winit icon for a Dear ImGui cursor. `None` means the cursor is hidden.
pub fn to_winit_cursor(cursor: MouseCursor) -> Option<CursorIcon> {
    match cursor {
        MouseCursor::None => None,
        MouseCursor::Arrow => Some(CursorIcon::Default),
        MouseCursor::TextInput => Some(CursorIcon::Text),
        MouseCursor::ResizeAll => Some(CursorIcon::Move),
        MouseCursor::ResizeNS => Some(CursorIcon::NsResize),
        MouseCursor::ResizeEW => Some(CursorIcon::EwResize),
        MouseCursor::ResizeNESW => Some(CursorIcon::NeswResize),
        MouseCursor::ResizeNWSE => Some(CursorIcon::NwseResize),
        MouseCursor::Hand => Some(CursorIcon::Pointer),
        MouseCursor::NotAllowed => Some(CursorIcon::NotAllowed),
        #[allow(unreachable_patterns)]
        _ => Some(CursorIcon::Default),
    }
}
