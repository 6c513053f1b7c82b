use std::sync::{Mutex, OnceLock};

use imbridge::dear_imgui_rs as imgui;
use imbridge::{FrameBridge, Host, KeyTable, Modifiers, MouseButton, NullClipboard};

fn test_guard() -> std::sync::MutexGuard<'static, ()> {
    static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
    GUARD.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct WindowHost;

impl Host for WindowHost {
    fn display_size(&self) -> [f32; 2] {
        [800.0, 600.0]
    }

    fn framebuffer_size(&self) -> [f32; 2] {
        [1600.0, 1200.0]
    }

    fn is_focused(&self) -> bool {
        true
    }

    fn cursor_position(&self) -> [f32; 2] {
        [42.0, 24.0]
    }

    fn is_mouse_down(&self, _button: MouseButton) -> bool {
        false
    }

    fn modifiers(&self) -> Modifiers {
        Modifiers::default()
    }
}

#[test]
fn attached_bridge_updates_imgui_io() {
    let _guard = test_guard();

    let mut ctx = imgui::Context::create();
    let mut bridge = FrameBridge::new(KeyTable::<u32>::new());
    bridge.attach(&mut ctx, NullClipboard);
    bridge.prepare_frame(&WindowHost, ctx.io_mut());

    let io = ctx.io();
    assert_eq!(io.display_size(), [800.0, 600.0]);
    assert_eq!(io.display_framebuffer_scale(), [2.0, 2.0]);
    assert!((io.delta_time() - imbridge::FALLBACK_DELTA).abs() < 1e-6);
}
