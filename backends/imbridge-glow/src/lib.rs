//! Glow (OpenGL) overlay renderer for imbridge
//!
//! Owns the GPU objects Dear ImGui needs to rasterize its draw lists (shader
//! program, vertex and index buffers, single-channel font atlas texture) and
//! draws them on top of whatever the application rendered, restoring the
//! application's pipeline state afterwards.
//!
//! ```rust,no_run
//! use imbridge_glow::OverlayRenderer;
//! use std::rc::Rc;
//!
//! # fn run(gl: glow::Context, imgui: &mut dear_imgui_rs::Context) -> Result<(), Box<dyn std::error::Error>> {
//! let mut renderer = OverlayRenderer::new(Rc::new(gl));
//! renderer.initialize(imgui)?;
//!
//! // every frame
//! let ui = imgui.frame();
//! ui.text("Hello");
//! let draw_data = imgui.render();
//! renderer.render(draw_data)?;
//!
//! // on exit
//! renderer.shutdown(Some(imgui));
//! # Ok(())
//! # }
//! ```

// Re-export glow so callers build against the same version.
pub use glow;
use glow::{Context, HasContext};

mod draw;
mod error;
mod font;
mod renderer;
mod resources;
mod shaders;
mod state;
mod texture;
mod versions;

pub use draw::{FrameGeometry, IndexCursor, index_type, orthographic_projection, scissor_box};
pub use error::*;
pub use renderer::OverlayRenderer;
pub use resources::{GpuResourceSet, ProgramLocations, Release};
pub use shaders::{GLSL_VERSION, ShaderSource, ShaderStage, build_program};
pub use state::{SavedPipelineState, StateOp};
pub use texture::{LoadedTexture, load_texture};
pub use versions::{GlCapabilities, GlVersion};

pub type GlBuffer = <Context as HasContext>::Buffer;
pub type GlTexture = <Context as HasContext>::Texture;
pub type GlVertexArray = <Context as HasContext>::VertexArray;
pub type GlProgram = <Context as HasContext>::Program;
pub type GlShader = <Context as HasContext>::Shader;
pub type GlSampler = <Context as HasContext>::Sampler;
pub type GlUniformLocation = <Context as HasContext>::UniformLocation;

/// View a slice of plain vertex or index data as bytes.
#[inline]
pub(crate) fn to_byte_slice<T: Copy>(slice: &[T]) -> &[u8] {
    unsafe { std::slice::from_raw_parts(slice.as_ptr() as *const u8, std::mem::size_of_val(slice)) }
}
