use imbridge_glow::{InitError, RenderError, TextureError};
use thiserror::Error;

/// Errors that end the demo.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("OpenGL context error: {0}")]
    Context(#[from] glutin::error::Error),

    #[error("Window handle error: {0}")]
    WindowHandle(#[from] raw_window_handle::HandleError),

    #[error("Overlay initialization failed: {0}")]
    Overlay(#[from] InitError),

    #[error("Overlay rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),

    #[error("Scene setup failed: {0}")]
    Scene(String),

    #[error("{0}")]
    Generic(String),
}

pub type AppResult<T> = Result<T, AppError>;
