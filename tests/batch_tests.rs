// Host-side tests for the scene renderer's CPU batch.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod batch {
    include!("../src/render/batch.rs");
}

use batch::*;
use field_core::{Rgba, SceneConfig, SceneField, SceneSurface};
use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn vertex_layouts_match_the_shader_strides() {
    assert_eq!(std::mem::size_of::<SpriteInstance>(), 32);
    assert_eq!(std::mem::size_of::<LineVertex>(), 32);
    assert_eq!(std::mem::size_of::<SceneUniforms>(), 80);
    assert_eq!(std::mem::size_of::<SceneUniforms>() % 16, 0);
}

#[test]
fn quad_is_two_triangles_around_the_origin() {
    assert_eq!(QUAD_CORNERS.len(), 6);
    let sum = QUAD_CORNERS
        .iter()
        .fold([0.0f32; 2], |acc, c| [acc[0] + c[0], acc[1] + c[1]]);
    // corners 0 and 2 are shared by both triangles
    assert_eq!(sum, [0.0, 0.0]);
    for c in QUAD_CORNERS {
        assert_eq!(c[0].abs(), 0.5);
        assert_eq!(c[1].abs(), 0.5);
    }
}

#[test]
fn begin_resets_and_finish_marks_complete() {
    let mut batch = FrameBatch::default();
    batch.begin(Mat4::IDENTITY);
    batch.draw_sprite(Vec3::ZERO, 0.3, Rgba::new(1.0, 1.0, 1.0, 0.5));
    batch.draw_line(Vec3::ZERO, Vec3::X, Rgba::new(0.2, 0.5, 1.0, 0.2));
    batch.finish();
    assert!(batch.complete);
    assert_eq!(batch.sprites.len(), 1);
    assert_eq!(batch.segment_count(), 1);
    assert_eq!(batch.lines[1].pos, [1.0, 0.0, 0.0]);

    let vp = Mat4::from_translation(Vec3::Z);
    batch.begin(vp);
    assert!(!batch.complete);
    assert!(batch.sprites.is_empty() && batch.lines.is_empty());
    assert_eq!(SceneUniforms::new(batch.view_proj, 0.3).view_proj, vp.to_cols_array_2d());
}

#[test]
fn invisible_primitives_are_skipped() {
    let mut batch = FrameBatch::default();
    batch.begin(Mat4::IDENTITY);
    batch.draw_sprite(Vec3::ZERO, 0.3, Rgba::new(1.0, 1.0, 1.0, 0.0));
    batch.draw_sprite(Vec3::ZERO, 0.0, Rgba::new(1.0, 1.0, 1.0, 1.0));
    batch.draw_line(Vec3::ZERO, Vec3::Y, Rgba::new(1.0, 1.0, 1.0, 0.0));
    assert!(batch.sprites.is_empty());
    assert!(batch.lines.is_empty());
}

#[test]
fn capacity_doubles_only_when_outgrown() {
    assert_eq!(grown_capacity(1024, 10), 1024);
    assert_eq!(grown_capacity(1024, 1024), 1024);
    assert_eq!(grown_capacity(1024, 1025), 2048);
    assert_eq!(grown_capacity(1024, 5000), 8192);
    assert_eq!(grown_capacity(0, 3), 4);
}

#[test]
fn scene_frame_fills_the_batch() {
    let mut rng = StdRng::seed_from_u64(3);
    let scene = SceneField::build(SceneConfig::neural_environment(), &mut rng).unwrap();
    let mut batch = FrameBatch::default();
    scene.render(&mut batch);
    assert!(batch.complete);
    assert_eq!(batch.view_proj, scene.camera().view_projection());
    // every node has a visible idle opacity
    assert_eq!(batch.sprites.len(), scene.nodes().len());
    assert!(batch.segment_count() <= scene.connections().len());
}
