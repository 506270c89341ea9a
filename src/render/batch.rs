// CPU-side frame batch for the scene renderer: the GPU vertex layouts and a
// `SceneSurface` that collects one frame's sprites and lines.

use bytemuck::{Pod, Zeroable};
use field_core::{Rgba, SceneSurface};
use glam::{Mat4, Vec3};

/// Two triangles spanning a unit quad centered on the origin.
pub const QUAD_CORNERS: [[f32; 2]; 6] = [
    [-0.5, -0.5],
    [0.5, -0.5],
    [0.5, 0.5],
    [-0.5, -0.5],
    [0.5, 0.5],
    [-0.5, 0.5],
];

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SceneUniforms {
    pub view_proj: [[f32; 4]; 4],
    /// x: sprite edge softness, yzw unused.
    pub params: [f32; 4],
}

impl SceneUniforms {
    pub fn new(view_proj: Mat4, edge_softness: f32) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            params: [edge_softness, 0.0, 0.0, 0.0],
        }
    }
}

/// Per-instance sprite data. Sprites lie in the XY plane, which faces the
/// camera since it always looks down -Z.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub center: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub pos: [f32; 3],
    pub _pad: f32,
    pub color: [f32; 4],
}

impl LineVertex {
    #[inline]
    fn new(pos: Vec3, color: Rgba) -> Self {
        Self {
            pos: pos.to_array(),
            _pad: 0.0,
            color: color.to_array(),
        }
    }
}

#[derive(Debug, Default)]
pub struct FrameBatch {
    pub view_proj: Mat4,
    pub sprites: Vec<SpriteInstance>,
    /// Line list: two vertices per segment.
    pub lines: Vec<LineVertex>,
    pub complete: bool,
}

impl FrameBatch {
    pub fn segment_count(&self) -> usize {
        self.lines.len() / 2
    }
}

impl SceneSurface for FrameBatch {
    fn begin(&mut self, view_proj: Mat4) {
        self.view_proj = view_proj;
        self.sprites.clear();
        self.lines.clear();
        self.complete = false;
    }

    fn draw_sprite(&mut self, position: Vec3, size: f32, color: Rgba) {
        if color.a <= 0.0 || size <= 0.0 {
            return;
        }
        self.sprites.push(SpriteInstance {
            center: position.to_array(),
            size,
            color: color.to_array(),
        });
    }

    fn draw_line(&mut self, from: Vec3, to: Vec3, color: Rgba) {
        if color.a <= 0.0 {
            return;
        }
        self.lines.push(LineVertex::new(from, color));
        self.lines.push(LineVertex::new(to, color));
    }

    fn finish(&mut self) {
        self.complete = true;
    }
}

/// Buffer capacity (in elements) able to hold `needed`, doubling from
/// `current` so uploads rarely reallocate.
pub fn grown_capacity(current: usize, needed: usize) -> usize {
    if needed <= current {
        return current;
    }
    needed.next_power_of_two().max(current.saturating_mul(2))
}
