//! Image file to GL texture

use std::path::{Path, PathBuf};

use glow::{Context, HasContext};

use crate::{GlTexture, TextureError};

/// A texture uploaded by [`load_texture`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadedTexture {
    pub texture: GlTexture,
    pub width: u32,
    pub height: u32,
}

/// Checks that an RGBA8 buffer is tightly packed: `width * 4` bytes per row.
pub(crate) fn check_stride(
    path: &Path,
    width: u32,
    height: u32,
    len: usize,
) -> Result<(), TextureError> {
    let expected = width as usize * 4;
    let actual = if height == 0 { 0 } else { len / height as usize };
    if actual != expected || actual * height as usize != len {
        return Err(TextureError::UnsupportedStride {
            path: path.to_path_buf(),
            expected,
            actual,
        });
    }
    Ok(())
}

/// Decodes an image file, converts it to RGBA8 and uploads it with linear
/// filtering and clamp-to-edge wrapping. Leaves the new texture bound.
pub fn load_texture(gl: &Context, path: impl AsRef<Path>) -> Result<LoadedTexture, TextureError> {
    let path = path.as_ref();
    let decoded = image::open(path).map_err(|source| TextureError::Decode {
        path: PathBuf::from(path),
        source,
    })?;
    let rgba = decoded.into_rgba8();
    let (width, height) = rgba.dimensions();
    check_stride(path, width, height, rgba.as_raw().len())?;

    let texture = unsafe {
        let texture = gl.create_texture().map_err(TextureError::Create)?;
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE as i32);
        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            glow::RGBA as i32,
            width as i32,
            height as i32,
            0,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            glow::PixelUnpackData::Slice(Some(rgba.as_raw())),
        );
        texture
    };

    tracing::info!(target: "imbridge_glow", path = %path.display(), width, height, "texture loaded");
    Ok(LoadedTexture {
        texture,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_rows_are_accepted() {
        assert!(check_stride(Path::new("a.png"), 4, 2, 32).is_ok());
        assert!(check_stride(Path::new("empty.png"), 0, 0, 0).is_ok());
    }

    #[test]
    fn padded_rows_are_rejected() {
        let err = check_stride(Path::new("a.png"), 3, 2, 32).unwrap_err();
        match err {
            TextureError::UnsupportedStride {
                expected, actual, ..
            } => {
                assert_eq!(expected, 12);
                assert_eq!(actual, 16);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_reports_path() {
        let source = image::open("does/not/exist.png").unwrap_err();
        let err = TextureError::Decode {
            path: PathBuf::from("does/not/exist.png"),
            source,
        };
        assert!(err.to_string().contains("does/not/exist.png"));
    }
}
