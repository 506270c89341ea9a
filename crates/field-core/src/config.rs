//! Field configuration with defaults and named presets.

use crate::constants::*;
use crate::error::FieldError;
use glam::Vec3;

#[derive(Clone, Debug, PartialEq)]
pub struct ParticleConfig {
    pub count: usize,
    pub pointer_radius: f32,
    pub force_divisor: f32,
    pub velocity_limit: f32,
    pub link_distance: f32,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: PARTICLE_COUNT,
            pointer_radius: POINTER_RADIUS,
            force_divisor: POINTER_FORCE_DIVISOR,
            velocity_limit: VELOCITY_LIMIT,
            link_distance: LINK_DISTANCE,
        }
    }
}

impl ParticleConfig {
    pub fn validate(&self) -> Result<(), FieldError> {
        positive("pointer_radius", self.pointer_radius)?;
        positive("force_divisor", self.force_divisor)?;
        positive("velocity_limit", self.velocity_limit)?;
        positive("link_distance", self.link_distance)
    }
}

/// How nodes are placed inside one layer (layer-local coordinates).
#[derive(Clone, Debug, PartialEq)]
pub enum Layout {
    /// Uniform in a box of the given full extent centered on the layer origin.
    Cuboid { extent: Vec3 },
    /// Uniform direction, radius in `[radius, radius + thickness)`.
    SphereShell { radius: f32, thickness: f32 },
    /// Regular lattice in the XY plane; the node count is `columns * rows`.
    Grid {
        columns: usize,
        rows: usize,
        spacing: f32,
    },
}

/// How connections between nodes are generated.
#[derive(Clone, Debug, PartialEq)]
pub enum Wiring {
    /// Each node links to a random number (inclusive range) of nodes in the
    /// next layer.
    NextLayer { min_fanout: usize, max_fanout: usize },
    /// Every pair inside one layer closer than `max_distance`.
    Proximity { max_distance: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActivationConfig {
    /// Per-tick chance an idle connection starts pulsing by itself.
    pub idle_to_active: f32,
    /// Chance an active connection goes idle when its pulse cycle completes.
    pub active_to_idle: f32,
    /// Per-tick chance a random node is sparked.
    pub spark_chance: f32,
    /// Per-tick, per-connection chance a pointer-lit connection fires a marker.
    pub pointer_pulse_chance: f32,
    /// World-space XY radius around the pointer that lights nodes.
    pub pointer_radius: f32,
}

impl Default for ActivationConfig {
    fn default() -> Self {
        Self {
            idle_to_active: 0.0005,
            active_to_idle: 0.1,
            spark_chance: 0.05,
            pointer_pulse_chance: 0.1,
            pointer_radius: 10.0,
        }
    }
}

impl ActivationConfig {
    pub fn validate(&self) -> Result<(), FieldError> {
        probability("idle_to_active", self.idle_to_active)?;
        probability("active_to_idle", self.active_to_idle)?;
        probability("spark_chance", self.spark_chance)?;
        probability("pointer_pulse_chance", self.pointer_pulse_chance)?;
        positive("pointer_radius", self.pointer_radius)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    pub layers: usize,
    pub nodes_per_layer: usize,
    /// Nodes removed per deeper layer.
    pub layer_falloff: usize,
    pub layer_origin_z: f32,
    pub layer_spacing: f32,
    pub layout: Layout,
    pub wiring: Wiring,
    pub pulse_pool: usize,
    pub pulse_speed: (f32, f32),
    pub connection_pulse_speed: (f32, f32),
    pub orbit_radius: (f32, f32),
    pub orbit_speed: (f32, f32),
    pub pulse_rate: (f32, f32),
    pub float_amplitude: f32,
    pub node_hue: f32,
    pub camera_z: f32,
    pub activation: ActivationConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::neural_environment()
    }
}

impl SceneConfig {
    /// Three receding layers of scattered nodes wired front to back.
    pub fn neural_environment() -> Self {
        Self {
            layers: 3,
            nodes_per_layer: 200,
            layer_falloff: 30,
            layer_origin_z: -25.0,
            layer_spacing: 15.0,
            layout: Layout::Cuboid {
                extent: Vec3::new(40.0, 40.0, 10.0),
            },
            wiring: Wiring::NextLayer {
                min_fanout: 1,
                max_fanout: 3,
            },
            pulse_pool: 30,
            pulse_speed: (0.01, 0.03),
            connection_pulse_speed: (0.01, 0.05),
            orbit_radius: (0.05, 0.15),
            orbit_speed: (0.2, 0.6),
            pulse_rate: (1.0, 3.0),
            float_amplitude: 0.2,
            node_hue: 0.6,
            camera_z: 30.0,
            activation: ActivationConfig::default(),
        }
    }

    /// Five flat grids of nodes, two links per node into the next grid.
    pub fn layer_grid() -> Self {
        Self {
            layers: 5,
            nodes_per_layer: 100,
            layer_falloff: 0,
            layer_origin_z: -15.0,
            layer_spacing: 8.0,
            layout: Layout::Grid {
                columns: 10,
                rows: 10,
                spacing: 2.0,
            },
            wiring: Wiring::NextLayer {
                min_fanout: 2,
                max_fanout: 2,
            },
            float_amplitude: 0.0,
            orbit_radius: (0.0, 0.0),
            camera_z: 5.0,
            activation: ActivationConfig {
                idle_to_active: 0.0005,
                active_to_idle: 0.1,
                spark_chance: 0.02,
                pointer_pulse_chance: 0.3,
                pointer_radius: 3.0,
            },
            ..Self::neural_environment()
        }
    }

    /// A single spherical shell of nodes linked to close neighbours.
    pub fn brain_shell() -> Self {
        Self {
            layers: 1,
            nodes_per_layer: 200,
            layer_falloff: 0,
            layer_origin_z: 0.0,
            layer_spacing: 0.0,
            layout: Layout::SphereShell {
                radius: 1.8,
                thickness: 0.3,
            },
            wiring: Wiring::Proximity { max_distance: 0.8 },
            pulse_pool: 20,
            pulse_speed: (0.005, 0.015),
            orbit_radius: (0.05, 0.15),
            float_amplitude: 0.0,
            camera_z: 5.0,
            activation: ActivationConfig {
                idle_to_active: 0.001,
                active_to_idle: 0.1,
                spark_chance: 0.0,
                pointer_pulse_chance: 0.1,
                pointer_radius: 0.8,
            },
            ..Self::neural_environment()
        }
    }

    /// Node count of layer `layer`.
    pub fn layer_len(&self, layer: usize) -> usize {
        match self.layout {
            Layout::Grid { columns, rows, .. } => columns * rows,
            _ => self
                .nodes_per_layer
                .saturating_sub(layer * self.layer_falloff),
        }
    }

    pub fn layer_z(&self, layer: usize) -> f32 {
        self.layer_origin_z - layer as f32 * self.layer_spacing
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        if self.layers == 0 {
            return Err(FieldError::NoLayers);
        }
        if let Some(layer) = (0..self.layers).find(|&l| self.layer_len(l) == 0) {
            return Err(FieldError::EmptyLayer { layer });
        }
        if self.pulse_pool == 0 {
            return Err(FieldError::EmptyPulsePool);
        }
        match self.layout {
            Layout::Cuboid { extent } => {
                positive("extent.x", extent.x)?;
                positive("extent.y", extent.y)?;
                if extent.z < 0.0 || extent.z.is_nan() {
                    return Err(FieldError::NonPositive {
                        name: "extent.z",
                        value: extent.z,
                    });
                }
            }
            Layout::SphereShell { radius, thickness } => {
                positive("radius", radius)?;
                range("thickness", (0.0, thickness))?;
            }
            Layout::Grid { spacing, .. } => positive("spacing", spacing)?,
        }
        match self.wiring {
            Wiring::NextLayer {
                min_fanout,
                max_fanout,
            } => range("fanout", (min_fanout as f32, max_fanout as f32))?,
            Wiring::Proximity { max_distance } => positive("max_distance", max_distance)?,
        }
        range("pulse_speed", self.pulse_speed)?;
        positive("pulse_speed", self.pulse_speed.0)?;
        range("connection_pulse_speed", self.connection_pulse_speed)?;
        positive("connection_pulse_speed", self.connection_pulse_speed.0)?;
        range("orbit_radius", self.orbit_radius)?;
        range("orbit_speed", self.orbit_speed)?;
        range("pulse_rate", self.pulse_rate)?;
        positive("camera_z", self.camera_z)?;
        self.activation.validate()
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), FieldError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(FieldError::NonPositive { name, value })
    }
}

fn probability(name: &'static str, value: f32) -> Result<(), FieldError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(FieldError::InvalidProbability { name, value })
    }
}

fn range(name: &'static str, (min, max): (f32, f32)) -> Result<(), FieldError> {
    if min.is_finite() && max.is_finite() && min <= max {
        Ok(())
    } else {
        Err(FieldError::InvalidRange { name, min, max })
    }
}
