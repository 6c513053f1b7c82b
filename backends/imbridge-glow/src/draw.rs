//! Frame geometry helpers used by the render pass

use std::mem::size_of;

use dear_imgui_rs::render::DrawIdx;

/// Logical and physical extents of one render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameGeometry {
    pub display_pos: [f32; 2],
    pub display_size: [f32; 2],
    pub framebuffer_size: [f32; 2],
    /// Physical pixels per logical unit, per axis.
    pub clip_scale: [f32; 2],
}

impl FrameGeometry {
    /// Returns `None` when either framebuffer dimension is not positive,
    /// which is how a minimized window presents itself.
    pub fn new(
        display_pos: [f32; 2],
        display_size: [f32; 2],
        framebuffer_size: [f32; 2],
    ) -> Option<Self> {
        if !(framebuffer_size[0] > 0.0 && framebuffer_size[1] > 0.0) {
            return None;
        }
        if !(display_size[0] > 0.0 && display_size[1] > 0.0) {
            return None;
        }
        Some(Self {
            display_pos,
            display_size,
            framebuffer_size,
            clip_scale: [
                framebuffer_size[0] / display_size[0],
                framebuffer_size[1] / display_size[1],
            ],
        })
    }

    pub fn framebuffer_width(&self) -> i32 {
        self.framebuffer_size[0] as i32
    }

    pub fn framebuffer_height(&self) -> i32 {
        self.framebuffer_size[1] as i32
    }

    /// Maps a logical clip rectangle `[x0, y0, x1, y1]` into framebuffer
    /// pixels, still with a top-left origin.
    pub fn scale_clip_rect(&self, clip_rect: [f32; 4]) -> [f32; 4] {
        [
            (clip_rect[0] - self.display_pos[0]) * self.clip_scale[0],
            (clip_rect[1] - self.display_pos[1]) * self.clip_scale[1],
            (clip_rect[2] - self.display_pos[0]) * self.clip_scale[0],
            (clip_rect[3] - self.display_pos[1]) * self.clip_scale[1],
        ]
    }
}

/// Converts a top-left-origin clip rectangle in framebuffer pixels into a
/// GL scissor box `[x, y, width, height]` with a bottom-left origin.
///
/// Returns `None` for empty or inverted rectangles.
pub fn scissor_box(clip: [f32; 4], framebuffer_height: f32) -> Option<[i32; 4]> {
    let [x0, y0, x1, y1] = clip;
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some([
        x0 as i32,
        (framebuffer_height - y1) as i32,
        (x1 - x0) as i32,
        (y1 - y0) as i32,
    ])
}

/// Orthographic projection mapping the logical display rectangle (origin
/// top-left, Y down) to clip space (Y up). Column-major.
pub fn orthographic_projection(display_pos: [f32; 2], display_size: [f32; 2]) -> [[f32; 4]; 4] {
    let l = display_pos[0];
    let r = display_pos[0] + display_size[0];
    let t = display_pos[1];
    let b = display_pos[1] + display_size[1];
    [
        [2.0 / (r - l), 0.0, 0.0, 0.0],
        [0.0, 2.0 / (t - b), 0.0, 0.0],
        [0.0, 0.0, -1.0, 0.0],
        [(r + l) / (l - r), (t + b) / (b - t), 0.0, 1.0],
    ]
}

/// GL element type matching Dear ImGui's index width.
pub const fn index_type() -> u32 {
    if size_of::<DrawIdx>() == 2 {
        glow::UNSIGNED_SHORT
    } else {
        glow::UNSIGNED_INT
    }
}

/// Running byte offset into the index buffer of the current draw list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexCursor {
    offset: usize,
    index_size: usize,
}

impl Default for IndexCursor {
    fn default() -> Self {
        Self::new(size_of::<DrawIdx>())
    }
}

impl IndexCursor {
    pub const fn new(index_size: usize) -> Self {
        Self {
            offset: 0,
            index_size,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the offset for a command with `count` elements and moves past it.
    pub fn advance(&mut self, count: usize) -> usize {
        let start = self.offset;
        self.offset += count * self.index_size;
        start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    #[test]
    fn scissor_flips_y_origin() {
        let scissor = scissor_box([0.0, 10.0, 100.0, 50.0], 600.0);
        assert_eq!(scissor, Some([0, 550, 100, 40]));
    }

    #[test]
    fn empty_clip_has_no_scissor() {
        assert_eq!(scissor_box([10.0, 10.0, 10.0, 50.0], 600.0), None);
        assert_eq!(scissor_box([0.0, 60.0, 10.0, 50.0], 600.0), None);
    }

    #[test]
    fn index_offsets_accumulate_per_command() {
        let mut cursor = IndexCursor::new(2);
        let offsets: Vec<usize> = [6, 12, 3].iter().map(|&n| cursor.advance(n)).collect();
        assert_eq!(offsets, vec![0, 12, 36]);
        assert_eq!(cursor.offset(), 42);
    }

    #[test]
    fn wide_indices_use_four_bytes() {
        let mut cursor = IndexCursor::new(4);
        cursor.advance(6);
        assert_eq!(cursor.advance(1), 24);
    }

    #[test]
    fn default_cursor_matches_draw_idx() {
        let mut cursor = IndexCursor::default();
        cursor.advance(1);
        assert_eq!(cursor.offset(), size_of::<DrawIdx>());
        assert_eq!(index_type(), glow::UNSIGNED_SHORT);
    }

    #[test]
    fn zero_sized_framebuffer_is_rejected() {
        assert!(FrameGeometry::new([0.0; 2], [800.0, 600.0], [0.0, 600.0]).is_none());
        assert!(FrameGeometry::new([0.0; 2], [800.0, 600.0], [800.0, 0.0]).is_none());
        assert!(FrameGeometry::new([0.0; 2], [800.0, 600.0], [-1.0, 600.0]).is_none());
        assert!(FrameGeometry::new([0.0; 2], [800.0, 600.0], [800.0, 600.0]).is_some());
    }

    #[test]
    fn clip_rects_scale_with_hidpi() {
        let geometry = FrameGeometry::new([0.0; 2], [800.0, 600.0], [1600.0, 1200.0]).unwrap();
        assert_eq!(geometry.clip_scale, [2.0, 2.0]);
        let clip = geometry.scale_clip_rect([10.0, 10.0, 20.0, 50.0]);
        assert_eq!(clip, [20.0, 20.0, 40.0, 100.0]);
        assert_eq!(scissor_box(clip, 1200.0), Some([20, 1100, 20, 80]));
    }

    #[test]
    fn projection_maps_corners_with_y_flip() {
        let m = orthographic_projection([0.0, 0.0], [800.0, 600.0]);
        let apply = |x: f32, y: f32| {
            [
                m[0][0] * x + m[1][0] * y + m[3][0],
                m[0][1] * x + m[1][1] * y + m[3][1],
            ]
        };

        let top_left = apply(0.0, 0.0);
        assert_relative_eq!(top_left[0], -1.0);
        assert_relative_eq!(top_left[1], 1.0);

        let bottom_right = apply(800.0, 600.0);
        assert_relative_eq!(bottom_right[0], 1.0);
        assert_relative_eq!(bottom_right[1], -1.0);
        assert_relative_eq!(m[1][1], -2.0 / 600.0);
    }
}
