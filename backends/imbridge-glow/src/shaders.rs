//! Shader source assembly and compilation

use std::fmt;

use glow::{Context, HasContext};

use crate::{GlProgram, GlShader, InitError, InitResult};

/// Version line prepended to every embedded shader body.
pub const GLSL_VERSION: &str = "#version 150";

pub(crate) const OVERLAY_VERTEX: &str = include_str!("../shaders/overlay.vert");
pub(crate) const OVERLAY_FRAGMENT: &str = include_str!("../shaders/overlay.frag");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

/// A shader body plus the version line it is compiled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShaderSource<'a> {
    pub version: &'a str,
    pub body: &'a str,
}

impl<'a> ShaderSource<'a> {
    pub const fn new(body: &'a str) -> Self {
        Self {
            version: GLSL_VERSION,
            body,
        }
    }

    pub const fn with_version(mut self, version: &'a str) -> Self {
        self.version = version;
        self
    }

    /// Full text handed to the driver: version line, newline, body.
    pub fn assemble(&self) -> String {
        let mut text = String::with_capacity(self.version.len() + 1 + self.body.len());
        text.push_str(self.version.trim_end());
        text.push('\n');
        text.push_str(self.body);
        text
    }
}

/// Creates and compiles one stage.
///
/// The handle is stored in `slot` as soon as it exists, so a caller holding
/// the slot can release it even when compilation fails.
pub(crate) fn compile_into(
    gl: &Context,
    stage: ShaderStage,
    source: &ShaderSource<'_>,
    slot: &mut Option<GlShader>,
) -> InitResult<GlShader> {
    unsafe {
        let shader = gl
            .create_shader(stage.gl_enum())
            .map_err(InitError::CreateShader)?;
        *slot = Some(shader);
        gl.shader_source(shader, &source.assemble());
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            return Err(InitError::CompileShader {
                stage,
                log: gl.get_shader_info_log(shader),
            });
        }
        Ok(shader)
    }
}

/// Creates a program, attaches both stages and links it. Same slot contract
/// as [`compile_into`].
pub(crate) fn link_into(
    gl: &Context,
    vertex: GlShader,
    fragment: GlShader,
    slot: &mut Option<GlProgram>,
) -> InitResult<GlProgram> {
    unsafe {
        let program = gl.create_program().map_err(InitError::CreateShader)?;
        *slot = Some(program);
        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        gl.link_program(program);
        if !gl.get_program_link_status(program) {
            return Err(InitError::LinkProgram(gl.get_program_info_log(program)));
        }
        Ok(program)
    }
}

/// Compiles and links a standalone program. The stage objects are released
/// once linked; everything created is released on failure.
pub fn build_program(
    gl: &Context,
    vertex: &ShaderSource<'_>,
    fragment: &ShaderSource<'_>,
) -> InitResult<GlProgram> {
    let mut vs = None;
    let mut fs = None;
    let mut program = None;

    let result = (|| {
        let v = compile_into(gl, ShaderStage::Vertex, vertex, &mut vs)?;
        let f = compile_into(gl, ShaderStage::Fragment, fragment, &mut fs)?;
        link_into(gl, v, f, &mut program)
    })();

    unsafe {
        for shader in [vs, fs].into_iter().flatten() {
            if let Some(p) = program {
                gl.detach_shader(p, shader);
            }
            gl.delete_shader(shader);
        }
        if result.is_err() {
            if let Some(p) = program {
                gl.delete_program(p);
            }
        }
    }
    result
}
