//! Tuning constants shared by the particle and scene fields.
//!
//! Distances for the 2D field are in CSS pixels; distances for the scene field
//! are in world units.

// ---------------- Particle field (2D) ----------------
pub const PARTICLE_COUNT: usize = 80;
pub const PARTICLE_RADIUS_MIN: f32 = 1.0;
pub const PARTICLE_RADIUS_MAX: f32 = 6.0;
pub const PARTICLE_SPEED_MAX: f32 = 0.5; // initial |v| per axis

// Pointer attraction: force = (RADIUS - d) / DIVISOR
pub const POINTER_RADIUS: f32 = 200.0;
pub const POINTER_FORCE_DIVISOR: f32 = 500.0;
pub const VELOCITY_LIMIT: f32 = 1.0;

// Neighbor links
pub const LINK_DISTANCE: f32 = 150.0;
pub const LINK_MAX_ALPHA: f32 = 0.15;
pub const LINK_WIDTH: f32 = 0.5;
pub const LINK_RGB: [u8; 3] = [58, 134, 255];

// Frame length the 2D kinematics are tuned for
pub const REFERENCE_FPS: f32 = 60.0;

// ---------------- Scene field (3D) ----------------
pub const DECAY: f32 = 0.95; // per-tick multiplier back toward baseline
pub const BASELINE_SCALE: f32 = 1.0;
pub const SCALE_SETTLE_EPSILON: f32 = 0.005;
pub const INTENSITY_SETTLE_EPSILON: f32 = 0.05;

pub const IDLE_OPACITY: f32 = 0.3;
pub const IDLE_OPACITY_SWING: f32 = 0.2;
pub const ACTIVE_OPACITY_FLOOR: f32 = 0.5;
pub const ACTIVE_OPACITY_MAX: f32 = 0.9;
pub const NODE_SATURATION: f32 = 0.8;
pub const NODE_LIGHTNESS: f32 = 0.5;

pub const CONNECTION_OPACITY_MIN: f32 = 0.1;
pub const CONNECTION_OPACITY_MAX: f32 = 0.8;
pub const CONNECTION_POINTER_GAIN: f32 = 0.7;
pub const CONNECTION_SHIMMER: f32 = 0.05;
pub const CONNECTION_PULSE_GAIN: f32 = 0.4;
pub const CONNECTION_RGB: [u8; 3] = [58, 134, 255];

pub const SPARK_INTENSITY: f32 = 0.5; // lifts scale to 1.5
pub const SPARK_PULSE_CHANCE: f32 = 0.5;

pub const PULSE_RGB: [u8; 3] = [255, 0, 110];
pub const PULSE_OPACITY: f32 = 0.8;
pub const PULSE_SCALE: f32 = 0.1;
pub const NODE_SIZE: f32 = 0.15;

// ---------------- Camera / clock ----------------
pub const CAMERA_FOVY: f32 = 75.0 * std::f32::consts::PI / 180.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Cap for a single frame's delta (seconds); a hidden tab can stall for minutes
pub const MAX_FRAME_DELTA: f32 = 0.1;
