//! Rotating textured cube with a Dear ImGui overlay, driven through
//! `imbridge`, `imbridge-winit` and `imbridge-glow`.

pub mod app;
pub mod config;
pub mod error;
pub mod gui;
pub mod scene;

pub use app::App;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
