// Web-layer tuning constants.
//
// Simulation constants live in `field_core::constants`; these only concern
// how the two layers are attached to the page and drawn.

// Element ids; an existing canvas with the id is reused, otherwise one is created
pub const PARTICLE_CANVAS_ID: &str = "particle-background";
pub const SCENE_CANVAS_ID: &str = "hero-canvas";

// Stacking below page content
pub const PARTICLE_Z_INDEX: &str = "-1";
pub const SCENE_Z_INDEX: &str = "-10";

// Initial GPU buffer capacities (elements); buffers grow by doubling
pub const INITIAL_SPRITE_CAPACITY: usize = 1024;
pub const INITIAL_LINE_VERTEX_CAPACITY: usize = 4096;

// Sprite edge softness as a fraction of the radius
pub const SPRITE_EDGE_SOFTNESS: f32 = 0.35;

