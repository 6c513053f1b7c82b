//! GPU objects owned by the overlay renderer

use glow::{Context, HasContext};

use crate::{GlBuffer, GlProgram, GlShader, GlTexture, GlUniformLocation};

/// Uniform and attribute locations resolved once after linking.
#[derive(Debug, Clone)]
pub struct ProgramLocations {
    pub texture: Option<GlUniformLocation>,
    pub proj_mtx: Option<GlUniformLocation>,
    pub position: u32,
    pub uv: u32,
    pub color: u32,
}

/// Every GL object the overlay needs. Each handle is `None` until created,
/// so a set may be partially populated after a failed initialization.
#[derive(Debug, Default)]
pub struct GpuResourceSet {
    pub program: Option<GlProgram>,
    pub vertex_shader: Option<GlShader>,
    pub fragment_shader: Option<GlShader>,
    pub locations: Option<ProgramLocations>,
    pub vertex_buffer: Option<GlBuffer>,
    pub index_buffer: Option<GlBuffer>,
    pub font_texture: Option<GlTexture>,
}

/// One step of a teardown plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    Buffer(GlBuffer),
    DetachShader { program: GlProgram, shader: GlShader },
    Shader(GlShader),
    Program(GlProgram),
    Texture(GlTexture),
}

impl GpuResourceSet {
    pub fn is_empty(&self) -> bool {
        self.program.is_none()
            && self.vertex_shader.is_none()
            && self.fragment_shader.is_none()
            && self.vertex_buffer.is_none()
            && self.index_buffer.is_none()
            && self.font_texture.is_none()
    }

    /// Takes every allocated handle out of the set and returns the calls
    /// that release them. Unallocated handles produce no step, and a second
    /// call returns an empty plan.
    pub fn take_releases(&mut self) -> Vec<Release> {
        let mut plan = Vec::new();
        plan.extend(self.vertex_buffer.take().map(Release::Buffer));
        plan.extend(self.index_buffer.take().map(Release::Buffer));

        let program = self.program;
        for shader in [self.vertex_shader.take(), self.fragment_shader.take()]
            .into_iter()
            .flatten()
        {
            if let Some(program) = program {
                plan.push(Release::DetachShader { program, shader });
            }
            plan.push(Release::Shader(shader));
        }

        plan.extend(self.program.take().map(Release::Program));
        plan.extend(self.font_texture.take().map(Release::Texture));
        self.locations = None;
        plan
    }

    /// Releases every allocated handle.
    pub fn destroy(&mut self, gl: &Context) {
        let plan = self.take_releases();
        if plan.is_empty() {
            return;
        }
        tracing::debug!(target: "imbridge_glow", steps = plan.len(), "releasing overlay resources");
        unsafe {
            for step in plan {
                match step {
                    Release::Buffer(buffer) => gl.delete_buffer(buffer),
                    Release::DetachShader { program, shader } => gl.detach_shader(program, shader),
                    Release::Shader(shader) => gl.delete_shader(shader),
                    Release::Program(program) => gl.delete_program(program),
                    Release::Texture(texture) => gl.delete_texture(texture),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::num::NonZeroU32;

    fn id(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    fn full_set() -> GpuResourceSet {
        GpuResourceSet {
            program: Some(glow::NativeProgram(id(1))),
            vertex_shader: Some(glow::NativeShader(id(2))),
            fragment_shader: Some(glow::NativeShader(id(3))),
            locations: None,
            vertex_buffer: Some(glow::NativeBuffer(id(4))),
            index_buffer: Some(glow::NativeBuffer(id(5))),
            font_texture: Some(glow::NativeTexture(id(6))),
        }
    }

    #[test]
    fn full_set_detaches_before_deleting_stages() {
        let mut set = full_set();
        let program = glow::NativeProgram(id(1));
        let vs = glow::NativeShader(id(2));
        let fs = glow::NativeShader(id(3));

        assert_eq!(
            set.take_releases(),
            vec![
                Release::Buffer(glow::NativeBuffer(id(4))),
                Release::Buffer(glow::NativeBuffer(id(5))),
                Release::DetachShader { program, shader: vs },
                Release::Shader(vs),
                Release::DetachShader { program, shader: fs },
                Release::Shader(fs),
                Release::Program(program),
                Release::Texture(glow::NativeTexture(id(6))),
            ]
        );
        assert!(set.is_empty());
    }

    #[test]
    fn failed_compile_releases_only_the_created_stage() {
        let vs = glow::NativeShader(id(7));
        let mut set = GpuResourceSet {
            vertex_shader: Some(vs),
            ..GpuResourceSet::default()
        };

        assert_eq!(set.take_releases(), vec![Release::Shader(vs)]);
    }

    #[test]
    fn second_teardown_is_empty() {
        let mut set = full_set();
        assert_eq!(set.take_releases().len(), 8);
        assert!(set.take_releases().is_empty());
        assert!(GpuResourceSet::default().take_releases().is_empty());
    }

    #[test]
    fn failed_link_keeps_program_and_stages() {
        let program = glow::NativeProgram(id(1));
        let vs = glow::NativeShader(id(2));
        let fs = glow::NativeShader(id(3));
        let mut set = GpuResourceSet {
            program: Some(program),
            vertex_shader: Some(vs),
            fragment_shader: Some(fs),
            ..GpuResourceSet::default()
        };

        let plan = set.take_releases();
        assert_eq!(plan.len(), 5);
        assert_eq!(plan.last(), Some(&Release::Program(program)));
        assert!(!plan.iter().any(|step| matches!(step, Release::Buffer(_))));
    }
}
