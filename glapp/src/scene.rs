//! The rotating textured cube drawn underneath the overlay

use std::path::Path;

use glam::{Mat4, Vec3};
use imbridge_glow::glow::{self, Context, HasContext};
use imbridge_glow::{
    GlBuffer, GlProgram, GlUniformLocation, GlVertexArray, LoadedTexture, ShaderSource,
    build_program, load_texture,
};

use crate::error::{AppError, AppResult};

const CUBE_VERTEX: &str = include_str!("../shaders/cube.vert");
const CUBE_FRAGMENT: &str = include_str!("../shaders/cube.frag");

/// Floats per vertex: X, Y, Z, U, V.
pub const VERTEX_FLOATS: usize = 5;
/// Six faces of two triangles each.
pub const VERTEX_COUNT: usize = 6 * 2 * 3;

#[rustfmt::skip]
pub const CUBE_VERTICES: [f32; VERTEX_COUNT * VERTEX_FLOATS] = [
    // Bottom
    -1.0, -1.0, -1.0, 0.0, 0.0,
     1.0, -1.0, -1.0, 1.0, 0.0,
    -1.0, -1.0,  1.0, 0.0, 1.0,
     1.0, -1.0, -1.0, 1.0, 0.0,
     1.0, -1.0,  1.0, 1.0, 1.0,
    -1.0, -1.0,  1.0, 0.0, 1.0,
    // Top
    -1.0,  1.0, -1.0, 0.0, 0.0,
    -1.0,  1.0,  1.0, 0.0, 1.0,
     1.0,  1.0, -1.0, 1.0, 0.0,
     1.0,  1.0, -1.0, 1.0, 0.0,
    -1.0,  1.0,  1.0, 0.0, 1.0,
     1.0,  1.0,  1.0, 1.0, 1.0,
    // Front
    -1.0, -1.0,  1.0, 1.0, 0.0,
     1.0, -1.0,  1.0, 0.0, 0.0,
    -1.0,  1.0,  1.0, 1.0, 1.0,
     1.0, -1.0,  1.0, 0.0, 0.0,
     1.0,  1.0,  1.0, 0.0, 1.0,
    -1.0,  1.0,  1.0, 1.0, 1.0,
    // Back
    -1.0, -1.0, -1.0, 0.0, 0.0,
    -1.0,  1.0, -1.0, 0.0, 1.0,
     1.0, -1.0, -1.0, 1.0, 0.0,
     1.0, -1.0, -1.0, 1.0, 0.0,
    -1.0,  1.0, -1.0, 0.0, 1.0,
     1.0,  1.0, -1.0, 1.0, 1.0,
    // Left
    -1.0, -1.0,  1.0, 0.0, 1.0,
    -1.0,  1.0, -1.0, 1.0, 0.0,
    -1.0, -1.0, -1.0, 0.0, 0.0,
    -1.0, -1.0,  1.0, 0.0, 1.0,
    -1.0,  1.0,  1.0, 1.0, 1.0,
    -1.0,  1.0, -1.0, 1.0, 0.0,
    // Right
     1.0, -1.0,  1.0, 1.0, 1.0,
     1.0, -1.0, -1.0, 1.0, 0.0,
     1.0,  1.0, -1.0, 0.0, 0.0,
     1.0, -1.0,  1.0, 1.0, 1.0,
     1.0,  1.0, -1.0, 0.0, 0.0,
     1.0,  1.0,  1.0, 0.0, 1.0,
];

pub const FIELD_OF_VIEW_DEGREES: f32 = 45.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 10.0;
pub const EYE: Vec3 = Vec3::new(3.0, 3.0, 3.0);

/// Matrices for one frame of the cube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeTransforms {
    pub projection: Mat4,
    pub camera: Mat4,
    pub model: Mat4,
}

impl CubeTransforms {
    /// Perspective for `aspect`, camera looking at the origin from [`EYE`],
    /// model spun `angle` radians about Y.
    pub fn new(aspect: f32, angle: f32) -> Self {
        Self {
            projection: Mat4::perspective_rh_gl(
                FIELD_OF_VIEW_DEGREES.to_radians(),
                aspect,
                NEAR_PLANE,
                FAR_PLANE,
            ),
            camera: Mat4::look_at_rh(EYE, Vec3::ZERO, Vec3::Y),
            model: Mat4::from_rotation_y(angle),
        }
    }
}

struct Uniforms {
    projection: Option<GlUniformLocation>,
    camera: Option<GlUniformLocation>,
    model: Option<GlUniformLocation>,
    texture: Option<GlUniformLocation>,
}

/// GPU objects and animation state of the cube.
pub struct CubeScene {
    program: GlProgram,
    vao: GlVertexArray,
    vbo: GlBuffer,
    texture: LoadedTexture,
    uniforms: Uniforms,
    angle: f32,
}

impl CubeScene {
    pub fn new(gl: &Context, texture_path: &Path) -> AppResult<Self> {
        let program = build_program(
            gl,
            &ShaderSource::new(CUBE_VERTEX),
            &ShaderSource::new(CUBE_FRAGMENT),
        )?;
        let texture = match load_texture(gl, texture_path) {
            Ok(texture) => texture,
            Err(err) => {
                unsafe { gl.delete_program(program) };
                return Err(err.into());
            }
        };

        unsafe {
            let uniforms = Uniforms {
                projection: gl.get_uniform_location(program, "projection"),
                camera: gl.get_uniform_location(program, "camera"),
                model: gl.get_uniform_location(program, "model"),
                texture: gl.get_uniform_location(program, "tex"),
            };

            let (vao, vbo) = match upload_geometry(gl, program) {
                Ok(objects) => objects,
                Err(err) => {
                    gl.delete_texture(texture.texture);
                    gl.delete_program(program);
                    return Err(err);
                }
            };

            tracing::info!(
                target: "glapp",
                "cube scene ready ({}x{} texture from {})",
                texture.width,
                texture.height,
                texture_path.display()
            );
            Ok(Self {
                program,
                vao,
                vbo,
                texture,
                uniforms,
                angle: 0.0,
            })
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Advances the rotation by `delta_time` seconds.
    pub fn update(&mut self, delta_time: f32) {
        self.angle += delta_time;
    }

    /// Draws the cube into a framebuffer of `width` by `height` pixels.
    /// Leaves depth testing enabled.
    pub fn draw(&self, gl: &Context, width: i32, height: i32) {
        if width <= 0 || height <= 0 {
            return;
        }
        let transforms = CubeTransforms::new(width as f32 / height as f32, self.angle);
        unsafe {
            gl.viewport(0, 0, width, height);
            gl.enable(glow::DEPTH_TEST);
            gl.depth_func(glow::LESS);

            gl.use_program(Some(self.program));
            gl.uniform_matrix_4_f32_slice(
                self.uniforms.projection.as_ref(),
                false,
                &transforms.projection.to_cols_array(),
            );
            gl.uniform_matrix_4_f32_slice(
                self.uniforms.camera.as_ref(),
                false,
                &transforms.camera.to_cols_array(),
            );
            gl.uniform_matrix_4_f32_slice(
                self.uniforms.model.as_ref(),
                false,
                &transforms.model.to_cols_array(),
            );
            gl.uniform_1_i32(self.uniforms.texture.as_ref(), 0);

            gl.bind_vertex_array(Some(self.vao));
            gl.active_texture(glow::TEXTURE0);
            gl.bind_texture(glow::TEXTURE_2D, Some(self.texture.texture));
            gl.draw_arrays(glow::TRIANGLES, 0, VERTEX_COUNT as i32);
            gl.bind_vertex_array(None);
        }
    }

    pub fn destroy(self, gl: &Context) {
        unsafe {
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.vbo);
            gl.delete_texture(self.texture.texture);
            gl.delete_program(self.program);
        }
    }
}

fn upload_geometry(gl: &Context, program: GlProgram) -> AppResult<(GlVertexArray, GlBuffer)> {
    unsafe {
        let position = gl
            .get_attrib_location(program, "vert")
            .ok_or_else(|| AppError::Scene("missing attribute `vert`".into()))?;
        let tex_coord = gl
            .get_attrib_location(program, "vertTexCoord")
            .ok_or_else(|| AppError::Scene("missing attribute `vertTexCoord`".into()))?;

        let vao = gl.create_vertex_array().map_err(AppError::Scene)?;
        let vbo = match gl.create_buffer() {
            Ok(vbo) => vbo,
            Err(err) => {
                gl.delete_vertex_array(vao);
                return Err(AppError::Scene(err));
            }
        };
        gl.bind_vertex_array(Some(vao));
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(&CUBE_VERTICES),
            glow::STATIC_DRAW,
        );

        let stride = (VERTEX_FLOATS * size_of::<f32>()) as i32;
        gl.enable_vertex_attrib_array(position);
        gl.vertex_attrib_pointer_f32(position, 3, glow::FLOAT, false, stride, 0);
        gl.enable_vertex_attrib_array(tex_coord);
        gl.vertex_attrib_pointer_f32(
            tex_coord,
            2,
            glow::FLOAT,
            false,
            stride,
            (3 * size_of::<f32>()) as i32,
        );
        gl.bind_vertex_array(None);
        Ok((vao, vbo))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec4;

    #[test]
    fn every_face_has_two_triangles() {
        assert_eq!(CUBE_VERTICES.len(), 180);
        for vertex in CUBE_VERTICES.chunks_exact(VERTEX_FLOATS) {
            let [x, y, z, u, v] = [vertex[0], vertex[1], vertex[2], vertex[3], vertex[4]];
            for c in [x, y, z] {
                assert!(c == 1.0 || c == -1.0);
            }
            for t in [u, v] {
                assert!(t == 0.0 || t == 1.0);
            }
        }
    }

    #[test]
    fn camera_looks_at_origin() {
        let t = CubeTransforms::new(1280.0 / 800.0, 0.0);
        let origin = t.camera * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(origin.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(origin.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(origin.z, -EYE.length(), epsilon = 1e-5);
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let t = CubeTransforms::new(1.6, 1.3);
        let clip = t.projection * t.camera * t.model * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(clip.x / clip.w, 0.0, epsilon = 1e-5);
        assert_relative_eq!(clip.y / clip.w, 0.0, epsilon = 1e-5);
        let depth = clip.z / clip.w;
        assert!(depth > -1.0 && depth < 1.0);
    }

    #[test]
    fn model_spins_about_y() {
        let quarter = CubeTransforms::new(1.0, std::f32::consts::FRAC_PI_2);
        let x_axis = quarter.model * Vec4::X;
        assert_relative_eq!(x_axis.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(x_axis.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(x_axis.z, -1.0, epsilon = 1e-6);
    }
}
