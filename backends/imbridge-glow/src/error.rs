//! Error types for the overlay renderer

use std::path::PathBuf;

use thiserror::Error;

use crate::shaders::ShaderStage;

/// Errors raised while creating GPU resources.
#[derive(Error, Debug)]
pub enum InitError {
    #[error("failed to create buffer object: {0}")]
    CreateBufferObject(String),

    #[error("failed to create texture: {0}")]
    CreateTexture(String),

    #[error("failed to create shader: {0}")]
    CreateShader(String),

    /// Carries the driver's compile log.
    #[error("failed to compile {stage} shader: {log}")]
    CompileShader { stage: ShaderStage, log: String },

    /// Carries the driver's link log.
    #[error("failed to link program: {0}")]
    LinkProgram(String),

    #[error("linked program has no vertex attribute `{0}`")]
    MissingAttribute(&'static str),

    #[error("font atlas has no pixel data")]
    FontAtlasUnavailable,

    #[error("renderer is already initialized")]
    AlreadyInitialized,
}

/// Errors raised while drawing a frame.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("renderer is not initialized")]
    NotInitialized,

    #[error("failed to create vertex array: {0}")]
    CreateVertexArray(String),
}

/// Errors raised while loading an image into a texture.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The decoded RGBA buffer is not tightly packed.
    #[error("unsupported stride for {path}: expected {expected} bytes per row, got {actual}")]
    UnsupportedStride {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    #[error("failed to create texture: {0}")]
    Create(String),
}

pub type InitResult<T> = Result<T, InitError>;

pub type RenderResult<T> = Result<T, RenderError>;
