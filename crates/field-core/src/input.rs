//! Input shared by all fields.
//!
//! Event handlers write the latest pointer sample and viewport size here; the
//! next frame reads it. Fields receive it by reference on every tick instead of
//! reaching for globals.

use glam::{Vec2, Vec3};

/// Size of the page viewport in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width / self.height.max(1.0)
    }

    /// Viewport pixels (y down) to normalized device coordinates (y up).
    pub fn to_ndc(&self, p: Vec2) -> Vec2 {
        let w = self.width.max(1.0);
        let h = self.height.max(1.0);
        Vec2::new(p.x / w * 2.0 - 1.0, 1.0 - p.y / h * 2.0)
    }

    pub fn from_ndc(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.width,
            (1.0 - ndc.y) * 0.5 * self.height,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputState {
    /// Latest pointer sample in viewport pixels; `None` once it leaves the page.
    pub pointer: Option<Vec2>,
    pub viewport: Viewport,
}

impl InputState {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            pointer: None,
            viewport,
        }
    }

    #[inline]
    pub fn pointer_moved(&mut self, position: Vec2) {
        if position.is_finite() {
            self.pointer = Some(position);
        }
    }

    #[inline]
    pub fn pointer_left(&mut self) {
        self.pointer = None;
    }

    #[inline]
    pub fn resized(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn pointer_ndc(&self) -> Option<Vec2> {
        self.pointer.map(|p| self.viewport.to_ndc(p))
    }
}

/// Where a ray crosses the plane `z = plane_z`, if it does so in front of the
/// origin.
#[inline]
pub fn ray_plane_z(origin: Vec3, dir: Vec3, plane_z: f32) -> Option<Vec3> {
    if dir.z.abs() <= 1e-6 {
        return None;
    }
    let t = (plane_z - origin.z) / dir.z;
    (t >= 0.0).then(|| origin + dir * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ndc_corners() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.to_ndc(Vec2::ZERO), Vec2::new(-1.0, 1.0));
        assert_eq!(vp.to_ndc(Vec2::new(800.0, 600.0)), Vec2::new(1.0, -1.0));
        assert_eq!(vp.to_ndc(Vec2::new(400.0, 300.0)), Vec2::ZERO);
    }

    #[test]
    fn ndc_inverse() {
        let vp = Viewport::new(1280.0, 720.0);
        let p = Vec2::new(321.0, 77.0);
        assert!(vp.from_ndc(vp.to_ndc(p)).abs_diff_eq(p, 1e-3));
    }

    #[test]
    fn latest_sample_wins_and_leave_clears() {
        let mut input = InputState::new(Viewport::new(100.0, 100.0));
        input.pointer_moved(Vec2::new(10.0, 10.0));
        input.pointer_moved(Vec2::new(50.0, 50.0));
        assert_eq!(input.pointer, Some(Vec2::new(50.0, 50.0)));
        assert_eq!(input.pointer_ndc(), Some(Vec2::ZERO));
        input.pointer_moved(Vec2::new(f32::NAN, 1.0));
        assert_eq!(input.pointer, Some(Vec2::new(50.0, 50.0)));
        input.pointer_left();
        assert_eq!(input.pointer_ndc(), None);
    }

    #[test]
    fn plane_hit_in_front_only() {
        let origin = Vec3::new(0.0, 0.0, 5.0);
        let hit = ray_plane_z(origin, Vec3::new(0.0, 0.0, -1.0), -10.0);
        assert_eq!(hit, Some(Vec3::new(0.0, 0.0, -10.0)));
        assert_eq!(ray_plane_z(origin, Vec3::new(0.0, 0.0, 1.0), -10.0), None);
        assert_eq!(ray_plane_z(origin, Vec3::X, -10.0), None);
    }
}
