//! Pipeline state saved around the overlay pass

use std::num::NonZeroU32;

use glow::{Context, HasContext};

use crate::versions::GlVersion;
use crate::{GlBuffer, GlProgram, GlSampler, GlTexture, GlVertexArray};

/// The GL state the overlay pass touches, captured before the pass and put
/// back field for field afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPipelineState {
    pub active_texture: u32,
    pub program: Option<GlProgram>,
    pub texture: Option<GlTexture>,
    pub sampler: Option<GlSampler>,
    pub array_buffer: Option<GlBuffer>,
    pub element_buffer: Option<GlBuffer>,
    pub vertex_array: Option<GlVertexArray>,
    pub polygon_mode: [i32; 2],
    pub viewport: [i32; 4],
    pub scissor_box: [i32; 4],
    pub blend_src_rgb: u32,
    pub blend_dst_rgb: u32,
    pub blend_src_alpha: u32,
    pub blend_dst_alpha: u32,
    pub blend_equation_rgb: u32,
    pub blend_equation_alpha: u32,
    pub blend: bool,
    pub cull_face: bool,
    pub depth_test: bool,
    pub scissor_test: bool,
}

fn binding<T>(gl: &Context, parameter: u32, wrap: fn(NonZeroU32) -> T) -> Option<T> {
    let raw = unsafe { gl.get_parameter_i32(parameter) };
    NonZeroU32::new(raw as u32).map(wrap)
}

fn enum_parameter(gl: &Context, parameter: u32) -> u32 {
    unsafe { gl.get_parameter_i32(parameter) as u32 }
}

impl SavedPipelineState {
    pub fn capture(gl: &Context, version: GlVersion) -> Self {
        unsafe {
            let active_texture = enum_parameter(gl, glow::ACTIVE_TEXTURE);
            // Texture and sampler bindings are per unit; read them on unit 0,
            // the one the overlay uses.
            gl.active_texture(glow::TEXTURE0);

            let sampler = if version.sampler_support() {
                binding(gl, glow::SAMPLER_BINDING, glow::NativeSampler)
            } else {
                None
            };

            let mut polygon_mode = [glow::FILL as i32; 2];
            if version.polygon_mode_support() {
                gl.get_parameter_i32_slice(glow::POLYGON_MODE, &mut polygon_mode);
            }
            let mut viewport = [0; 4];
            gl.get_parameter_i32_slice(glow::VIEWPORT, &mut viewport);
            let mut scissor_box = [0; 4];
            gl.get_parameter_i32_slice(glow::SCISSOR_BOX, &mut scissor_box);

            Self {
                active_texture,
                program: binding(gl, glow::CURRENT_PROGRAM, glow::NativeProgram),
                texture: binding(gl, glow::TEXTURE_BINDING_2D, glow::NativeTexture),
                sampler,
                array_buffer: binding(gl, glow::ARRAY_BUFFER_BINDING, glow::NativeBuffer),
                element_buffer: binding(gl, glow::ELEMENT_ARRAY_BUFFER_BINDING, glow::NativeBuffer),
                vertex_array: binding(gl, glow::VERTEX_ARRAY_BINDING, glow::NativeVertexArray),
                polygon_mode,
                viewport,
                scissor_box,
                blend_src_rgb: enum_parameter(gl, glow::BLEND_SRC_RGB),
                blend_dst_rgb: enum_parameter(gl, glow::BLEND_DST_RGB),
                blend_src_alpha: enum_parameter(gl, glow::BLEND_SRC_ALPHA),
                blend_dst_alpha: enum_parameter(gl, glow::BLEND_DST_ALPHA),
                blend_equation_rgb: enum_parameter(gl, glow::BLEND_EQUATION_RGB),
                blend_equation_alpha: enum_parameter(gl, glow::BLEND_EQUATION_ALPHA),
                blend: gl.is_enabled(glow::BLEND),
                cull_face: gl.is_enabled(glow::CULL_FACE),
                depth_test: gl.is_enabled(glow::DEPTH_TEST),
                scissor_test: gl.is_enabled(glow::SCISSOR_TEST),
            }
        }
    }

    /// The operations that put every captured field back, in the order they
    /// must be issued.
    ///
    /// Texture and sampler bindings are restored on unit 0 before the
    /// active unit itself; the element buffer after the vertex array that
    /// owns it.
    pub fn restore_plan(&self, version: GlVersion) -> Vec<StateOp> {
        let mut plan = vec![
            StateOp::UseProgram(self.program),
            StateOp::SelectUnitZero,
            StateOp::BindTexture(self.texture),
        ];
        if version.sampler_support() {
            plan.push(StateOp::BindSampler(self.sampler));
        }
        plan.extend([
            StateOp::ActiveTexture(self.active_texture),
            StateOp::BindVertexArray(self.vertex_array),
            StateOp::BindBuffer {
                target: glow::ARRAY_BUFFER,
                buffer: self.array_buffer,
            },
            StateOp::BindBuffer {
                target: glow::ELEMENT_ARRAY_BUFFER,
                buffer: self.element_buffer,
            },
            StateOp::BlendEquation {
                rgb: self.blend_equation_rgb,
                alpha: self.blend_equation_alpha,
            },
            StateOp::BlendFunc {
                src_rgb: self.blend_src_rgb,
                dst_rgb: self.blend_dst_rgb,
                src_alpha: self.blend_src_alpha,
                dst_alpha: self.blend_dst_alpha,
            },
            StateOp::Enable {
                capability: glow::BLEND,
                enabled: self.blend,
            },
            StateOp::Enable {
                capability: glow::CULL_FACE,
                enabled: self.cull_face,
            },
            StateOp::Enable {
                capability: glow::DEPTH_TEST,
                enabled: self.depth_test,
            },
            StateOp::Enable {
                capability: glow::SCISSOR_TEST,
                enabled: self.scissor_test,
            },
        ]);
        if version.polygon_mode_support() {
            plan.push(StateOp::PolygonMode(self.polygon_mode[0] as u32));
        }
        plan.push(StateOp::Viewport(self.viewport));
        plan.push(StateOp::Scissor(self.scissor_box));
        plan
    }

    pub fn restore(&self, gl: &Context, version: GlVersion) {
        for op in self.restore_plan(version) {
            op.apply(gl);
        }
    }
}

/// One state-setting call issued when restoring a [`SavedPipelineState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateOp {
    UseProgram(Option<GlProgram>),
    /// Makes unit 0 active so its bindings can be restored.
    SelectUnitZero,
    BindTexture(Option<GlTexture>),
    BindSampler(Option<GlSampler>),
    ActiveTexture(u32),
    BindVertexArray(Option<GlVertexArray>),
    BindBuffer {
        target: u32,
        buffer: Option<GlBuffer>,
    },
    BlendEquation {
        rgb: u32,
        alpha: u32,
    },
    BlendFunc {
        src_rgb: u32,
        dst_rgb: u32,
        src_alpha: u32,
        dst_alpha: u32,
    },
    Enable {
        capability: u32,
        enabled: bool,
    },
    PolygonMode(u32),
    Viewport([i32; 4]),
    Scissor([i32; 4]),
}

impl StateOp {
    pub fn apply(self, gl: &Context) {
        unsafe {
            match self {
                StateOp::UseProgram(program) => gl.use_program(program),
                StateOp::SelectUnitZero => gl.active_texture(glow::TEXTURE0),
                StateOp::BindTexture(texture) => gl.bind_texture(glow::TEXTURE_2D, texture),
                StateOp::BindSampler(sampler) => gl.bind_sampler(0, sampler),
                StateOp::ActiveTexture(unit) => gl.active_texture(unit),
                StateOp::BindVertexArray(vao) => gl.bind_vertex_array(vao),
                StateOp::BindBuffer { target, buffer } => gl.bind_buffer(target, buffer),
                StateOp::BlendEquation { rgb, alpha } => gl.blend_equation_separate(rgb, alpha),
                StateOp::BlendFunc {
                    src_rgb,
                    dst_rgb,
                    src_alpha,
                    dst_alpha,
                } => gl.blend_func_separate(src_rgb, dst_rgb, src_alpha, dst_alpha),
                StateOp::Enable { capability, enabled } => set_enabled(gl, capability, enabled),
                StateOp::PolygonMode(mode) => gl.polygon_mode(glow::FRONT_AND_BACK, mode),
                StateOp::Viewport([x, y, w, h]) => gl.viewport(x, y, w, h),
                StateOp::Scissor([x, y, w, h]) => gl.scissor(x, y, w, h),
            }
        }
    }
}

fn set_enabled(gl: &Context, capability: u32, enabled: bool) {
    unsafe {
        if enabled {
            gl.enable(capability);
        } else {
            gl.disable(capability);
        }
    }
}
