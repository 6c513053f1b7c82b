//! Font atlas upload

use std::borrow::Cow;

use dear_imgui_rs::{Context as ImGuiContext, TextureFormat, TextureId, sys};
use glow::{Context, HasContext};

use crate::{GlTexture, InitError, InitResult};

/// Extracts one coverage byte per pixel from atlas pixels.
///
/// Alpha8 data is used as is; RGBA32 data contributes its alpha channel.
pub(crate) fn coverage_pixels(format: TextureFormat, pixels: &[u8]) -> Cow<'_, [u8]> {
    match format {
        TextureFormat::Alpha8 => Cow::Borrowed(pixels),
        TextureFormat::RGBA32 => Cow::Owned(pixels.chunks_exact(4).map(|px| px[3]).collect()),
    }
}

pub(crate) fn texture_id(texture: GlTexture) -> TextureId {
    TextureId::new(texture.0.get() as u64)
}

/// Builds Dear ImGui's font atlas as a single-channel bitmap, uploads it and
/// registers the texture with the atlas. The handle lands in `slot` as soon
/// as it exists. The texture binding of unit 0 is left as it was found.
pub(crate) fn build_font_texture(
    gl: &Context,
    imgui: &mut ImGuiContext,
    slot: &mut Option<GlTexture>,
) -> InitResult<GlTexture> {
    let mut atlas = imgui.font_atlas_mut();
    unsafe {
        (*atlas.raw()).TexDesiredFormat = sys::ImTextureFormat_Alpha8 as _;
    }
    atlas.build();

    let (width, height, pixels) = {
        let data = atlas.tex_data_mut().ok_or(InitError::FontAtlasUnavailable)?;
        let (width, height) = (data.width(), data.height());
        let format = data.format();
        let pixels = data.pixels().ok_or(InitError::FontAtlasUnavailable)?;
        (width, height, coverage_pixels(format, pixels).into_owned())
    };

    let texture = unsafe {
        let previous = gl.get_parameter_i32(glow::TEXTURE_BINDING_2D);
        gl.active_texture(glow::TEXTURE0);

        let texture = gl.create_texture().map_err(InitError::CreateTexture)?;
        *slot = Some(texture);
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
        gl.pixel_store_i32(glow::UNPACK_ROW_LENGTH, 0);
        gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            glow::R8 as i32,
            width,
            height,
            0,
            glow::RED,
            glow::UNSIGNED_BYTE,
            glow::PixelUnpackData::Slice(Some(&pixels)),
        );
        gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 4);

        let previous = std::num::NonZeroU32::new(previous as u32).map(glow::NativeTexture);
        gl.bind_texture(glow::TEXTURE_2D, previous);
        texture
    };

    atlas.set_texture_id(texture_id(texture));
    tracing::debug!(target: "imbridge_glow", width, height, "font atlas uploaded");
    Ok(texture)
}

/// Clears the atlas texture registration.
pub(crate) fn clear_font_texture(imgui: &mut ImGuiContext) {
    imgui.font_atlas_mut().set_texture_id(TextureId::null());
}
