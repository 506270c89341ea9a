//! Drawing surfaces consumed by the fields.
//!
//! The fields never talk to a canvas or GPU directly. They emit a handful of
//! primitives through these traits and the front end decides how to draw them.

use glam::{Mat4, Vec2, Vec3};

/// Straight (non-premultiplied) color with components in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgb8(rgb: [u8; 3], a: f32) -> Self {
        Self::new(
            rgb[0] as f32 / 255.0,
            rgb[1] as f32 / 255.0,
            rgb[2] as f32 / 255.0,
            a,
        )
    }

    /// Build a color from hue/saturation/lightness, all in [0, 1].
    pub fn from_hsl(h: f32, s: f32, l: f32, a: f32) -> Self {
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);
        if s == 0.0 {
            return Self::new(l, l, l, a);
        }
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let h = h.rem_euclid(1.0);
        Self::new(
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
            a,
        )
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// CSS `rgba()` string for the 2D canvas API.
    pub fn to_css(&self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "rgba({}, {}, {}, {:.3})",
            byte(self.r),
            byte(self.g),
            byte(self.b),
            self.a.clamp(0.0, 1.0)
        )
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Immediate-mode 2D target (a canvas 2D context on the web).
pub trait Surface2d {
    /// Drawable size in the same units as particle positions.
    fn size(&self) -> Vec2;
    fn clear(&mut self);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);
}

/// Retained 3D target: everything drawn between `begin` and `finish` makes up
/// one frame.
pub trait SceneSurface {
    fn begin(&mut self, view_proj: Mat4);
    /// Camera-facing disc of world-space diameter `size`.
    fn draw_sprite(&mut self, position: Vec3, size: f32, color: Rgba);
    fn draw_line(&mut self, from: Vec3, to: Vec3, color: Rgba);
    fn finish(&mut self);
}
