//! 2D particle field: a bounded random walk with pointer attraction and a
//! neighbor-linking draw pass.

use crate::config::ParticleConfig;
use crate::constants::{
    LINK_MAX_ALPHA, LINK_RGB, LINK_WIDTH, PARTICLE_RADIUS_MAX, PARTICLE_RADIUS_MIN,
    PARTICLE_SPEED_MAX,
};
use crate::error::FieldError;
use crate::surface::{Rgba, Surface2d};
use glam::Vec2;
use rand::Rng;

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub color: Rgba,
}

impl Particle {
    fn random<R: Rng + ?Sized>(bounds: Vec2, rng: &mut R) -> Self {
        Self {
            position: Vec2::new(rng.gen::<f32>() * bounds.x, rng.gen::<f32>() * bounds.y),
            velocity: Vec2::new(
                rng.gen_range(-PARTICLE_SPEED_MAX..PARTICLE_SPEED_MAX),
                rng.gen_range(-PARTICLE_SPEED_MAX..PARTICLE_SPEED_MAX),
            ),
            radius: rng.gen_range(PARTICLE_RADIUS_MIN..PARTICLE_RADIUS_MAX),
            color: random_color(rng),
        }
    }
}

/// Blue/purple palette with partial transparency.
fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Rgba {
    Rgba::from_rgb8(
        [
            rng.gen_range(50..100),
            rng.gen_range(50..150),
            rng.gen_range(100..255),
        ],
        rng.gen_range(0.1..0.6),
    )
}

pub struct ParticleField {
    config: ParticleConfig,
    bounds: Vec2,
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new<R: Rng + ?Sized>(
        config: ParticleConfig,
        bounds: Vec2,
        rng: &mut R,
    ) -> Result<Self, FieldError> {
        check_bounds(bounds)?;
        config.validate()?;
        let particles = (0..config.count)
            .map(|_| Particle::random(bounds, rng))
            .collect::<Vec<_>>();
        log::info!(
            "[particles] count={} bounds={}x{}",
            particles.len(),
            bounds.x,
            bounds.y
        );
        Ok(Self {
            config,
            bounds,
            particles,
        })
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    #[inline]
    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    /// Adopt new bounds after a resize. Particles left outside are pulled onto
    /// the new edge; the particle count never changes.
    pub fn resize(&mut self, bounds: Vec2) {
        if check_bounds(bounds).is_err() {
            return;
        }
        self.bounds = bounds;
        for p in &mut self.particles {
            p.position = p.position.clamp(Vec2::ZERO, bounds);
        }
    }

    /// Advance by `frames` reference frames, optionally pulled toward `pointer`.
    pub fn step(&mut self, frames: f32, pointer: Option<Vec2>) {
        let limit = Vec2::splat(self.config.velocity_limit);
        let bounds = self.bounds;
        for p in &mut self.particles {
            p.position += p.velocity * frames;
            if let Some(target) = pointer {
                p.velocity += attraction(
                    p.position,
                    target,
                    self.config.pointer_radius,
                    self.config.force_divisor,
                ) * frames;
            }
            // Without this clamp the attraction runs away.
            p.velocity = p.velocity.clamp(-limit, limit);
            reflect(&mut p.position.x, &mut p.velocity.x, bounds.x);
            reflect(&mut p.position.y, &mut p.velocity.y, bounds.y);
        }
    }

    /// Unordered pairs closer than the link distance, with their distance.
    pub fn links(&self) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        let max = self.config.link_distance;
        let ps = &self.particles;
        (0..ps.len()).flat_map(move |i| {
            (i + 1..ps.len()).filter_map(move |j| {
                let d = ps[i].position.distance(ps[j].position);
                (d < max).then_some((i, j, d))
            })
        })
    }

    pub fn render<S: Surface2d + ?Sized>(&self, surface: &mut S) {
        surface.clear();
        for p in &self.particles {
            surface.fill_circle(p.position, p.radius, p.color);
        }
        for (i, j, d) in self.links() {
            let color = Rgba::from_rgb8(LINK_RGB, link_alpha(d, self.config.link_distance));
            surface.stroke_line(
                self.particles[i].position,
                self.particles[j].position,
                LINK_WIDTH,
                color,
            );
        }
    }
}

/// Velocity nudge toward `pointer`: `(radius - d) / divisor` along the unit
/// direction, zero outside the radius.
#[inline]
pub fn attraction(position: Vec2, pointer: Vec2, radius: f32, divisor: f32) -> Vec2 {
    let delta = pointer - position;
    let d = delta.length();
    if d >= radius || d <= f32::EPSILON {
        return Vec2::ZERO;
    }
    delta / d * ((radius - d) / divisor)
}

/// Line opacity for a link of length `distance`; fades linearly to zero.
#[inline]
pub fn link_alpha(distance: f32, max_distance: f32) -> f32 {
    (LINK_MAX_ALPHA * (1.0 - distance / max_distance)).max(0.0)
}

#[inline]
fn reflect(pos: &mut f32, vel: &mut f32, max: f32) {
    if *pos < 0.0 {
        *pos = 0.0;
        *vel = vel.abs();
    } else if *pos > max {
        *pos = max;
        *vel = -vel.abs();
    }
}

fn check_bounds(bounds: Vec2) -> Result<(), FieldError> {
    if bounds.is_finite() && bounds.x > 0.0 && bounds.y > 0.0 {
        Ok(())
    } else {
        Err(FieldError::InvalidBounds {
            width: bounds.x,
            height: bounds.y,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attraction_points_at_pointer_and_fades() {
        let f = attraction(Vec2::ZERO, Vec2::new(100.0, 0.0), 200.0, 500.0);
        assert!((f.x - 0.2).abs() < 1e-6 && f.y == 0.0);
        assert_eq!(
            attraction(Vec2::ZERO, Vec2::new(0.0, 200.0), 200.0, 500.0),
            Vec2::ZERO
        );
        assert_eq!(attraction(Vec2::ONE, Vec2::ONE, 200.0, 500.0), Vec2::ZERO);
    }

    #[test]
    fn link_alpha_falloff() {
        assert!((link_alpha(0.0, 150.0) - 0.15).abs() < 1e-6);
        assert!((link_alpha(75.0, 150.0) - 0.075).abs() < 1e-6);
        assert_eq!(link_alpha(150.0, 150.0), 0.0);
    }

    #[test]
    fn reflect_turns_velocity_inward() {
        let (mut x, mut v) = (-0.4, -0.7);
        reflect(&mut x, &mut v, 10.0);
        assert_eq!((x, v), (0.0, 0.7));
        let (mut x, mut v) = (10.3, 0.5);
        reflect(&mut x, &mut v, 10.0);
        assert_eq!((x, v), (10.0, -0.5));
    }
}
