// Host-side tests for the 2D particle field.

mod common;

use common::Recorder2d;
use field_core::constants::{LINK_DISTANCE, LINK_WIDTH, VELOCITY_LIMIT};
use field_core::{FieldError, ParticleConfig, ParticleField};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn field(count: usize, bounds: Vec2, seed: u64) -> ParticleField {
    let mut rng = StdRng::seed_from_u64(seed);
    let config = ParticleConfig {
        count,
        ..ParticleConfig::default()
    };
    ParticleField::new(config, bounds, &mut rng).expect("valid field")
}

fn assert_invariants(f: &ParticleField) {
    let b = f.bounds();
    for p in f.particles() {
        assert!(p.velocity.x.abs() <= VELOCITY_LIMIT, "vx {}", p.velocity.x);
        assert!(p.velocity.y.abs() <= VELOCITY_LIMIT, "vy {}", p.velocity.y);
        assert!((0.0..=b.x).contains(&p.position.x), "x {}", p.position.x);
        assert!((0.0..=b.y).contains(&p.position.y), "y {}", p.position.y);
    }
}

#[test]
fn initial_particles_match_the_palette() {
    let f = field(200, Vec2::new(800.0, 600.0), 1);
    assert_eq!(f.particles().len(), 200);
    for p in f.particles() {
        assert!((1.0..6.0).contains(&p.radius));
        assert!(p.velocity.x.abs() <= 0.5 && p.velocity.y.abs() <= 0.5);
        assert!(p.color.b >= 100.0 / 255.0 - 1e-6);
        assert!((0.1..0.6).contains(&p.color.a));
    }
    assert_invariants(&f);
}

#[test]
fn thousand_steps_without_pointer_stay_bounded() {
    let mut f = field(80, Vec2::new(800.0, 600.0), 2);
    for _ in 0..1000 {
        f.step(1.0, None);
        assert_invariants(&f);
    }
    assert_eq!(f.particles().len(), 80);
}

#[test]
fn pointer_attraction_never_breaks_the_velocity_clamp() {
    let mut f = field(80, Vec2::new(800.0, 600.0), 3);
    let pointers = [
        Vec2::new(400.0, 300.0),
        Vec2::new(0.0, 0.0),
        Vec2::new(800.0, 600.0),
        Vec2::new(-50.0, 700.0),
    ];
    for step in 0..2000 {
        let pointer = pointers[(step / 250) % pointers.len()];
        f.step(1.0, Some(pointer));
        assert_invariants(&f);
    }
}

#[test]
fn pointer_pulls_nearby_particles_closer() {
    let mut f = field(80, Vec2::new(800.0, 600.0), 4);
    let pointer = Vec2::new(400.0, 300.0);
    let mean_distance = |f: &ParticleField| {
        let near: Vec<f32> = f
            .particles()
            .iter()
            .map(|p| p.position.distance(pointer))
            .collect();
        near.iter().sum::<f32>() / near.len() as f32
    };
    let before = mean_distance(&f);
    for _ in 0..600 {
        f.step(1.0, Some(pointer));
    }
    assert!(mean_distance(&f) < before);
}

#[test]
fn large_frame_deltas_stay_bounded() {
    let mut f = field(40, Vec2::new(300.0, 200.0), 5);
    for _ in 0..200 {
        f.step(6.0, Some(Vec2::new(150.0, 100.0)));
        assert_invariants(&f);
    }
}

#[test]
fn resize_keeps_count_and_clamps_positions() {
    let mut f = field(80, Vec2::new(800.0, 600.0), 6);
    f.resize(Vec2::new(200.0, 100.0));
    assert_eq!(f.particles().len(), 80);
    assert_eq!(f.bounds(), Vec2::new(200.0, 100.0));
    assert_invariants(&f);

    f.resize(Vec2::new(0.0, 100.0));
    assert_eq!(f.bounds(), Vec2::new(200.0, 100.0));
}

#[test]
fn rejects_degenerate_bounds() {
    let mut rng = StdRng::seed_from_u64(7);
    let err = ParticleField::new(ParticleConfig::default(), Vec2::new(0.0, 600.0), &mut rng);
    assert!(matches!(err, Err(FieldError::InvalidBounds { .. })));
    let err = ParticleField::new(
        ParticleConfig::default(),
        Vec2::new(f32::INFINITY, 600.0),
        &mut rng,
    );
    assert!(err.is_err());
}

#[test]
fn render_draws_every_particle_and_short_links_only() {
    let f = field(60, Vec2::new(500.0, 400.0), 8);
    let mut surface = Recorder2d::new(f.bounds());
    f.render(&mut surface);

    assert_eq!(surface.clears, 1);
    assert_eq!(surface.circles.len(), 60);
    let ps = f.particles();
    let mut expected = 0;
    for i in 0..ps.len() {
        for j in i + 1..ps.len() {
            if ps[i].position.distance(ps[j].position) < LINK_DISTANCE {
                expected += 1;
            }
        }
    }
    assert_eq!(surface.lines.len(), expected);
    for (a, b, width, color) in &surface.lines {
        let d = a.distance(*b);
        assert!(d < LINK_DISTANCE);
        assert_eq!(*width, LINK_WIDTH);
        let alpha = 0.15 * (1.0 - d / LINK_DISTANCE);
        assert!((color.a - alpha).abs() < 1e-5);
    }
}

#[test]
fn same_seed_same_field() {
    let a = field(30, Vec2::new(640.0, 480.0), 9);
    let b = field(30, Vec2::new(640.0, 480.0), 9);
    assert_eq!(a.particles(), b.particles());
}
