// Host-side tests for the web-layer constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn layers_stack_behind_content_in_order() {
    let particle: i32 = PARTICLE_Z_INDEX.parse().unwrap();
    let scene: i32 = SCENE_Z_INDEX.parse().unwrap();
    assert!(particle < 0 && scene < 0);
    assert!(scene < particle, "scene layer must sit under the particles");
    assert_ne!(PARTICLE_CANVAS_ID, SCENE_CANVAS_ID);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn buffer_capacities_are_usable() {
    assert!(INITIAL_SPRITE_CAPACITY > 0);
    assert!(INITIAL_LINE_VERTEX_CAPACITY > 0);
    // a line list needs an even vertex count
    assert_eq!(INITIAL_LINE_VERTEX_CAPACITY % 2, 0);
    assert!(SPRITE_EDGE_SOFTNESS > 0.0 && SPRITE_EDGE_SOFTNESS <= 1.0);
}
