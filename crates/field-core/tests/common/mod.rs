// Surfaces that record what the fields draw, for assertions.

#![allow(dead_code)]
use field_core::{Rgba, SceneSurface, Surface2d};
use glam::{Mat4, Vec2, Vec3};

#[derive(Default)]
pub struct Recorder2d {
    pub size: Vec2,
    pub clears: usize,
    pub circles: Vec<(Vec2, f32, Rgba)>,
    pub lines: Vec<(Vec2, Vec2, f32, Rgba)>,
}

impl Recorder2d {
    pub fn new(size: Vec2) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }
}

impl Surface2d for Recorder2d {
    fn size(&self) -> Vec2 {
        self.size
    }
    fn clear(&mut self) {
        self.clears += 1;
        self.circles.clear();
        self.lines.clear();
    }
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.circles.push((center, radius, color));
    }
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.lines.push((from, to, width, color));
    }
}

#[derive(Default)]
pub struct RecorderScene {
    pub view_proj: Option<Mat4>,
    pub sprites: Vec<(Vec3, f32, Rgba)>,
    pub lines: Vec<(Vec3, Vec3, Rgba)>,
    pub finished: bool,
}

impl SceneSurface for RecorderScene {
    fn begin(&mut self, view_proj: Mat4) {
        self.view_proj = Some(view_proj);
        self.sprites.clear();
        self.lines.clear();
        self.finished = false;
    }
    fn draw_sprite(&mut self, position: Vec3, size: f32, color: Rgba) {
        self.sprites.push((position, size, color));
    }
    fn draw_line(&mut self, from: Vec3, to: Vec3, color: Rgba) {
        self.lines.push((from, to, color));
    }
    fn finish(&mut self) {
        self.finished = true;
    }
}
