//! Perspective camera used to project the scene field and unproject the pointer.

use crate::constants::{CAMERA_FOVY, CAMERA_ZFAR, CAMERA_ZNEAR};
use crate::input::Viewport;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Camera on the +Z axis at `distance`, looking at the origin.
    pub fn looking_at_origin(distance: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOVY,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Re-derive the aspect ratio after a resize.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport.width > 0.0 && viewport.height > 0.0 {
            self.aspect = viewport.aspect();
        }
    }

    /// World-space ray through a point in normalized device coordinates.
    ///
    /// Returns `(ray_origin, ray_direction)`.
    pub fn ndc_to_ray(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inv = self.view_projection().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        let rd = (p1 - self.eye).normalize();
        (self.eye, rd)
    }

    /// Project a world-space point to NDC; `None` when it is behind the camera.
    pub fn project(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.view_projection() * world.extend(1.0);
        (clip.w > 0.0).then(|| Vec2::new(clip.x / clip.w, clip.y / clip.w))
    }
}
