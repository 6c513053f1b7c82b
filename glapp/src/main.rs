//! Rotating textured cube with a Dear ImGui overlay.
//!
//! Set `GLAPP_TEXTURE` to map another image onto the cube and `GLAPP_VSYNC=0`
//! to render unthrottled. Log output follows `RUST_LOG` (default `info`).

use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

use glapp::{App, AppConfig, AppResult};

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env();
    tracing::debug!(target: "glapp", ?config, "starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    match app.take_error() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
