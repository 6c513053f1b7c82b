//! Window, GL context and the per-frame loop

use std::num::NonZeroU32;
use std::rc::Rc;
use std::sync::Arc;

use glutin::{
    config::{ConfigTemplateBuilder, GlConfig},
    context::{
        ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext,
        PossiblyCurrentContext, Version,
    },
    display::{GetGlDisplay, GlDisplay},
    surface::{GlSurface, Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface},
};
use imbridge::dear_imgui_rs::Context as ImGuiContext;
use imbridge_glow::OverlayRenderer;
use imbridge_glow::glow::{self, HasContext};
use imbridge_winit::{SystemClipboard, WinitBridge, WinitHost, key_table};
use raw_window_handle::HasWindowHandle;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::gui::DemoState;
use crate::scene::CubeScene;

struct AppWindow {
    host: WinitHost,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    gl: Rc<glow::Context>,
    imgui: ImGuiContext,
    bridge: WinitBridge,
    renderer: OverlayRenderer,
    scene: Option<CubeScene>,
    state: DemoState,
}

impl AppWindow {
    fn new(event_loop: &ActiveEventLoop, config: &AppConfig) -> AppResult<Self> {
        let (width, height) = config.window_size;
        let window_attributes = Window::default_attributes()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(width, height));

        let template = ConfigTemplateBuilder::new().with_depth_size(24);
        let (window, gl_config) = glutin_winit::DisplayBuilder::new()
            .with_window_attributes(Some(window_attributes))
            .build(event_loop, template, |configs| {
                // glutin fails find_configs with BadConfig before an empty set
                // reaches the picker, and the picker must return a Config.
                fewest_samples(configs, |config| config.num_samples())
                    .expect("glutin passed an empty config set to the picker")
            })
            .map_err(|err| AppError::Generic(format!("failed to create window: {err}")))?;
        let window = Arc::new(
            window.ok_or_else(|| AppError::Generic("display builder returned no window".into()))?,
        );

        let raw_handle = window.window_handle()?.as_raw();
        let (major, minor) = config.gl_version;
        let context_attribs = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .with_profile(GlProfile::Core)
            .build(Some(raw_handle));
        let context = unsafe {
            gl_config
                .display()
                .create_context(&gl_config, &context_attribs)?
        };

        let size = window.inner_size();
        let surface_attribs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_handle,
            NonZeroU32::new(size.width).unwrap_or(NonZeroU32::MIN),
            NonZeroU32::new(size.height).unwrap_or(NonZeroU32::MIN),
        );
        let surface = unsafe {
            gl_config
                .display()
                .create_window_surface(&gl_config, &surface_attribs)?
        };
        let context = context.make_current(&surface)?;

        let interval = if config.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(err) = surface.set_swap_interval(&context, interval) {
            tracing::warn!(target: "glapp", "failed to set swap interval: {err}");
        }

        let gl = Rc::new(unsafe {
            glow::Context::from_loader_function_cstr(|s| {
                context.display().get_proc_address(s).cast()
            })
        });

        let mut imgui = ImGuiContext::create();
        if let Err(err) = imgui.set_ini_filename(None::<String>) {
            tracing::warn!(target: "glapp", "failed to disable imgui.ini: {err}");
        }
        let bridge = WinitBridge::new(key_table());
        bridge.attach(&mut imgui, SystemClipboard::open_or_null());

        let mut renderer = OverlayRenderer::new(Rc::clone(&gl));
        renderer.initialize(&mut imgui)?;
        let scene = CubeScene::new(&gl, &config.texture_path)?;

        tracing::info!(
            target: "glapp",
            "window ready: {}x{} physical, scale factor {}",
            size.width,
            size.height,
            window.scale_factor()
        );
        Ok(Self {
            host: WinitHost::new(window),
            surface,
            context,
            gl,
            imgui,
            bridge,
            renderer,
            scene: Some(scene),
            state: DemoState::new(config.clear_color),
        })
    }

    fn window(&self) -> &Arc<Window> {
        self.host.window()
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        if let (Some(width), Some(height)) =
            (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        {
            self.surface.resize(&self.context, width, height);
        }
    }

    fn handle_event(&mut self, event: &WindowEvent) {
        for raw in self.host.translate(event) {
            self.bridge
                .handle_event(&raw, &self.host, self.imgui.io_mut());
        }
    }

    fn redraw(&mut self) -> AppResult<()> {
        let snapshot = self.bridge.prepare_frame(&self.host, self.imgui.io_mut());
        let [width, height] = snapshot.framebuffer_size;

        let [r, g, b] = self.state.clear_color;
        unsafe {
            self.gl.clear_color(r, g, b, 1.0);
            self.gl
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
        if let Some(scene) = &mut self.scene {
            scene.update(snapshot.delta_time);
            scene.draw(&self.gl, width as i32, height as i32);
        }

        let ui = self.imgui.frame();
        self.state.draw(ui, &snapshot);
        self.host.apply_cursor(ui.mouse_cursor());
        let draw_data = self.imgui.render();
        self.renderer.render(draw_data)?;

        self.surface.swap_buffers(&self.context)?;
        Ok(())
    }

    fn shutdown(&mut self) {
        self.renderer.shutdown(Some(&mut self.imgui));
        if let Some(scene) = self.scene.take() {
            scene.destroy(&self.gl);
        }
    }
}

/// The first candidate with the fewest MSAA samples.
fn fewest_samples<C>(candidates: impl Iterator<Item = C>, samples: impl Fn(&C) -> u8) -> Option<C> {
    candidates.min_by_key(|candidate| samples(candidate))
}

/// winit application driving the demo window.
pub struct App {
    config: AppConfig,
    window: Option<AppWindow>,
    error: Option<AppError>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            window: None,
            error: None,
        }
    }

    /// The error that stopped the event loop, if any.
    pub fn take_error(&mut self) -> Option<AppError> {
        self.error.take()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        tracing::error!(target: "glapp", "{err}");
        self.error = Some(err);
        self.exit(event_loop);
    }

    fn exit(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(mut window) = self.window.take() {
            window.shutdown();
        }
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match AppWindow::new(event_loop, &self.config) {
            Ok(window) => {
                window.window().request_redraw();
                self.window = Some(window);
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.as_mut() else {
            return;
        };
        window.handle_event(&event);

        match event {
            WindowEvent::Resized(size) => {
                window.resize(size);
                window.window().request_redraw();
            }
            WindowEvent::CloseRequested => {
                tracing::info!(target: "glapp", "close requested");
                self.exit(event_loop);
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = window.redraw() {
                    self.fail(event_loop, err);
                    return;
                }
                if window.state.quit_requested() {
                    tracing::info!(target: "glapp", "quit from menu");
                    self.exit(event_loop);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.window().request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(mut window) = self.window.take() {
            window.shutdown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_config_without_multisampling() {
        let configs = [("msaa4", 4), ("plain", 0), ("msaa2", 2)];
        let picked = fewest_samples(configs.into_iter(), |(_, samples)| *samples);
        assert_eq!(picked, Some(("plain", 0)));
    }

    #[test]
    fn ties_keep_the_first_candidate() {
        let configs = [("a", 2), ("b", 0), ("c", 0)];
        let picked = fewest_samples(configs.into_iter(), |(_, samples)| *samples);
        assert_eq!(picked.map(|(name, _)| name), Some("b"));
    }

    #[test]
    fn empty_set_yields_none() {
        let picked = fewest_samples(std::iter::empty::<(&str, u8)>(), |(_, samples)| *samples);
        assert_eq!(picked, None);
    }
}
