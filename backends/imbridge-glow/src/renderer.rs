//! Overlay renderer: resource lifecycle and the per-frame render pass

use std::num::NonZeroU32;
use std::rc::Rc;

use dear_imgui_rs::{
    Context as ImGuiContext, TextureId,
    internal::RawWrapper,
    render::{DrawCmd, DrawData, DrawVert},
};
use glow::{Context, HasContext};

use crate::draw::{FrameGeometry, IndexCursor, index_type, orthographic_projection, scissor_box};
use crate::resources::{GpuResourceSet, ProgramLocations};
use crate::shaders::{
    OVERLAY_FRAGMENT, OVERLAY_VERTEX, ShaderSource, ShaderStage, compile_into, link_into,
};
use crate::state::SavedPipelineState;
use crate::versions::GlCapabilities;
use crate::{
    GlTexture, GlVertexArray, InitError, InitResult, RenderError, RenderResult, font,
    to_byte_slice,
};

/// Draws Dear ImGui draw data with OpenGL.
///
/// Starts uninitialized. [`OverlayRenderer::initialize`] creates the GPU
/// resources, [`OverlayRenderer::shutdown`] releases them again. Only valid
/// on the thread that owns the GL context.
///
/// Dropping the renderer deletes its GPU objects but cannot reach the Dear
/// ImGui context, so the font atlas keeps the deleted texture's id. Call
/// `shutdown(Some(imgui))` first when the context outlives the renderer.
pub struct OverlayRenderer {
    gl: Rc<Context>,
    capabilities: Option<GlCapabilities>,
    resources: Option<GpuResourceSet>,
}

impl OverlayRenderer {
    pub fn new(gl: Rc<Context>) -> Self {
        Self {
            gl,
            capabilities: None,
            resources: None,
        }
    }

    pub fn gl_context(&self) -> &Rc<Context> {
        &self.gl
    }

    pub fn is_ready(&self) -> bool {
        self.resources.is_some()
    }

    /// Version and extensions of the context, once initialized.
    pub fn capabilities(&self) -> Option<&GlCapabilities> {
        self.capabilities.as_ref()
    }

    pub fn font_texture(&self) -> Option<GlTexture> {
        self.resources.as_ref().and_then(|r| r.font_texture)
    }

    /// Compiles the overlay program, allocates the vertex and index buffers
    /// and uploads the font atlas. On failure every object created so far is
    /// released before the error is returned.
    pub fn initialize(&mut self, imgui: &mut ImGuiContext) -> InitResult<()> {
        if self.resources.is_some() {
            return Err(InitError::AlreadyInitialized);
        }
        if self.capabilities.is_none() {
            self.capabilities = Some(GlCapabilities::query(&self.gl));
        }

        let mut set = GpuResourceSet::default();
        if let Err(err) = create_resources(&self.gl, imgui, &mut set) {
            tracing::error!(target: "imbridge_glow", "overlay initialization failed: {err}");
            set.destroy(&self.gl);
            return Err(err);
        }

        let name = format!("imbridge-glow {}", env!("CARGO_PKG_VERSION"));
        if let Err(err) = imgui.set_renderer_name(Some(name)) {
            tracing::warn!(target: "imbridge_glow", "failed to set renderer name: {err}");
        }
        tracing::info!(target: "imbridge_glow", "overlay renderer ready");
        self.resources = Some(set);
        Ok(())
    }

    /// Draws one frame of Dear ImGui output over the current framebuffer.
    ///
    /// Does nothing when the framebuffer has no area. Pipeline state touched
    /// by the pass is restored before returning.
    pub fn render(&mut self, draw_data: &DrawData) -> RenderResult<()> {
        let framebuffer_size = [
            draw_data.display_size[0] * draw_data.framebuffer_scale[0],
            draw_data.display_size[1] * draw_data.framebuffer_scale[1],
        ];
        let Some(geometry) =
            FrameGeometry::new(draw_data.display_pos, draw_data.display_size, framebuffer_size)
        else {
            return Ok(());
        };
        let (Some(resources), Some(capabilities)) = (&self.resources, &self.capabilities) else {
            return Err(RenderError::NotInitialized);
        };
        let gl = &*self.gl;
        let version = capabilities.version;

        // Vertex arrays cannot be shared between contexts; one per pass.
        let vao = unsafe { gl.create_vertex_array() }.map_err(RenderError::CreateVertexArray)?;
        let saved = SavedPipelineState::capture(gl, version);
        let pass = RenderPass {
            gl,
            resources,
            capabilities,
            geometry,
            vao,
        };
        pass.setup();
        pass.draw(draw_data);

        unsafe { gl.delete_vertex_array(vao) };
        saved.restore(gl, version);
        Ok(())
    }

    /// Releases every GPU object and clears the atlas texture id in `imgui`.
    /// Safe to call in any state, any number of times.
    pub fn shutdown(&mut self, imgui: Option<&mut ImGuiContext>) {
        if let Some(mut set) = self.resources.take() {
            set.destroy(&self.gl);
            tracing::info!(target: "imbridge_glow", "overlay renderer shut down");
        }
        if let Some(imgui) = imgui {
            font::clear_font_texture(imgui);
        }
    }
}

/// Releases GPU objects only; the atlas texture id stays registered.
impl Drop for OverlayRenderer {
    fn drop(&mut self) {
        if let Some(mut set) = self.resources.take() {
            set.destroy(&self.gl);
            tracing::debug!(
                target: "imbridge_glow",
                "renderer dropped without shutdown; font atlas still holds its texture id"
            );
        }
    }
}

fn create_resources(
    gl: &Context,
    imgui: &mut ImGuiContext,
    set: &mut GpuResourceSet,
) -> InitResult<()> {
    let vertex = compile_into(
        gl,
        ShaderStage::Vertex,
        &ShaderSource::new(OVERLAY_VERTEX),
        &mut set.vertex_shader,
    )?;
    let fragment = compile_into(
        gl,
        ShaderStage::Fragment,
        &ShaderSource::new(OVERLAY_FRAGMENT),
        &mut set.fragment_shader,
    )?;
    let program = link_into(gl, vertex, fragment, &mut set.program)?;

    set.locations = Some(unsafe {
        ProgramLocations {
            texture: gl.get_uniform_location(program, "Texture"),
            proj_mtx: gl.get_uniform_location(program, "ProjMtx"),
            position: gl
                .get_attrib_location(program, "Position")
                .ok_or(InitError::MissingAttribute("Position"))?,
            uv: gl
                .get_attrib_location(program, "UV")
                .ok_or(InitError::MissingAttribute("UV"))?,
            color: gl
                .get_attrib_location(program, "Color")
                .ok_or(InitError::MissingAttribute("Color"))?,
        }
    });

    unsafe {
        set.vertex_buffer = Some(gl.create_buffer().map_err(InitError::CreateBufferObject)?);
        set.index_buffer = Some(gl.create_buffer().map_err(InitError::CreateBufferObject)?);
    }

    font::build_font_texture(gl, imgui, &mut set.font_texture)?;
    Ok(())
}

/// Borrowed state for one call to [`OverlayRenderer::render`].
struct RenderPass<'a> {
    gl: &'a Context,
    resources: &'a GpuResourceSet,
    capabilities: &'a GlCapabilities,
    geometry: FrameGeometry,
    vao: GlVertexArray,
}

impl RenderPass<'_> {
    fn setup(&self) {
        let gl = self.gl;
        let version = self.capabilities.version;
        unsafe {
            gl.enable(glow::BLEND);
            gl.blend_equation(glow::FUNC_ADD);
            gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
            gl.disable(glow::CULL_FACE);
            gl.disable(glow::DEPTH_TEST);
            gl.enable(glow::SCISSOR_TEST);
            if version.polygon_mode_support() {
                gl.polygon_mode(glow::FRONT_AND_BACK, glow::FILL);
            }
            gl.viewport(
                0,
                0,
                self.geometry.framebuffer_width(),
                self.geometry.framebuffer_height(),
            );

            let projection =
                orthographic_projection(self.geometry.display_pos, self.geometry.display_size);
            gl.use_program(self.resources.program);
            gl.active_texture(glow::TEXTURE0);
            if version.sampler_support() {
                gl.bind_sampler(0, None);
            }

            let Some(locations) = &self.resources.locations else {
                return;
            };
            gl.uniform_1_i32(locations.texture.as_ref(), 0);
            gl.uniform_matrix_4_f32_slice(
                locations.proj_mtx.as_ref(),
                false,
                projection.as_flattened(),
            );

            gl.bind_vertex_array(Some(self.vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, self.resources.vertex_buffer);
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, self.resources.index_buffer);

            let stride = size_of::<DrawVert>() as i32;
            gl.enable_vertex_attrib_array(locations.position);
            gl.enable_vertex_attrib_array(locations.uv);
            gl.enable_vertex_attrib_array(locations.color);
            gl.vertex_attrib_pointer_f32(
                locations.position,
                2,
                glow::FLOAT,
                false,
                stride,
                memoffset::offset_of!(DrawVert, pos) as i32,
            );
            gl.vertex_attrib_pointer_f32(
                locations.uv,
                2,
                glow::FLOAT,
                false,
                stride,
                memoffset::offset_of!(DrawVert, uv) as i32,
            );
            gl.vertex_attrib_pointer_f32(
                locations.color,
                4,
                glow::UNSIGNED_BYTE,
                true,
                stride,
                memoffset::offset_of!(DrawVert, col) as i32,
            );
        }
    }

    fn texture_for(&self, id: TextureId) -> Option<GlTexture> {
        NonZeroU32::new(id.id() as u32)
            .map(glow::NativeTexture)
            .or(self.resources.font_texture)
    }

    /// Submits every list and every command in the order given.
    fn draw(&self, draw_data: &DrawData) {
        let gl = self.gl;
        let framebuffer_height = self.geometry.framebuffer_size[1];

        for draw_list in draw_data.draw_lists() {
            unsafe {
                gl.buffer_data_u8_slice(
                    glow::ARRAY_BUFFER,
                    to_byte_slice(draw_list.vtx_buffer()),
                    glow::STREAM_DRAW,
                );
                gl.buffer_data_u8_slice(
                    glow::ELEMENT_ARRAY_BUFFER,
                    to_byte_slice(draw_list.idx_buffer()),
                    glow::STREAM_DRAW,
                );
            }

            let mut cursor = IndexCursor::default();
            for command in draw_list.commands() {
                match command {
                    DrawCmd::Elements {
                        count, cmd_params, ..
                    } => {
                        let offset = cursor.advance(count);
                        let clip = self.geometry.scale_clip_rect(cmd_params.clip_rect);
                        let Some([x, y, w, h]) = scissor_box(clip, framebuffer_height) else {
                            continue;
                        };
                        let texture = self.texture_for(cmd_params.texture_id);
                        unsafe {
                            gl.bind_texture(glow::TEXTURE_2D, texture);
                            gl.scissor(x, y, w, h);
                            gl.draw_elements(
                                glow::TRIANGLES,
                                count as i32,
                                index_type(),
                                offset as i32,
                            );
                        }
                    }
                    DrawCmd::ResetRenderState => self.setup(),
                    DrawCmd::RawCallback { callback, raw_cmd } => unsafe {
                        callback(draw_list.raw(), raw_cmd);
                    },
                }
            }
        }
    }
}
