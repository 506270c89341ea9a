//! 3D scene field: layered nodes, the connections between them and a pool of
//! pulse markers traveling along active connections.
//!
//! Node transforms are a pure function of their stored parameters and the
//! shared clock. The only state carried between ticks is the pointer/spark
//! perturbation (which decays by `DECAY` per tick), connection activation and
//! the pulse pool.

use crate::activation::{decay_toward, roll, Activation, TransitionChances};
use crate::camera::Camera;
use crate::clock::FrameTime;
use crate::config::{Layout, SceneConfig, Wiring};
use crate::constants::*;
use crate::error::FieldError;
use crate::input::{ray_plane_z, InputState};
use crate::pulse::{sample, ConnectionId, PulsePool};
use crate::surface::{Rgba, SceneSurface};
use fnv::FnvHashSet;
use glam::{Vec2, Vec3};
use rand::Rng;
use smallvec::SmallVec;
use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::ops::Range;

pub type NodeId = usize;

#[derive(Clone, Debug)]
pub struct Node {
    /// World-space rest position (layer offset included).
    pub base: Vec3,
    pub layer: usize,
    pub phase: f32,
    pub pulse_rate: f32,
    pub orbit_speed: f32,
    pub orbit_radius: f32,
    /// Connections touching this node, in either direction.
    pub links: SmallVec<[ConnectionId; 4]>,

    pub position: Vec3,
    pub scale: f32,
    /// Pointer/spark brightening in [0, 1], decays to 0.
    pub intensity: f32,
}

impl Node {
    /// Position at clock value `t`: a small orbit around the base position
    /// plus a vertical float.
    pub fn position_at(&self, t: f32, float_amplitude: f32) -> Vec3 {
        let a = t * self.orbit_speed + self.phase;
        let orbit = Vec3::new(a.sin(), a.cos(), (a + FRAC_PI_2).sin()) * self.orbit_radius;
        let float = (t * self.pulse_rate + self.phase).sin() * float_amplitude;
        self.base + orbit + Vec3::new(0.0, float, 0.0)
    }

    pub fn opacity(&self, t: f32) -> f32 {
        let idle = IDLE_OPACITY + IDLE_OPACITY_SWING * (t * self.pulse_rate + self.phase).sin();
        if self.intensity > 0.0 {
            let lit = (ACTIVE_OPACITY_FLOOR + 0.5 * self.intensity).min(ACTIVE_OPACITY_MAX);
            idle.max(lit)
        } else {
            idle
        }
    }

    pub fn color(&self, hue: f32, t: f32) -> Rgba {
        Rgba::from_hsl(
            hue,
            NODE_SATURATION,
            NODE_LIGHTNESS + 0.5 * self.intensity,
            self.opacity(t),
        )
    }

    pub fn is_at_baseline(&self) -> bool {
        self.scale == BASELINE_SCALE && self.intensity == 0.0
    }
}

#[derive(Clone, Debug)]
pub struct Connection {
    pub from: NodeId,
    pub to: NodeId,
    pub base_opacity: f32,
    /// Extra opacity from pointer or spark, decays to 0.
    pub boost: f32,
    pub state: Activation,
    /// Pulse cycle position in [0, 1) while active.
    pub phase: f32,
    pub phase_speed: f32,
    pub shimmer_rate: f32,
}

impl Connection {
    pub fn opacity(&self, t: f32) -> f32 {
        let wave = if self.state.is_active() {
            CONNECTION_PULSE_GAIN * (self.phase * PI).sin()
        } else {
            CONNECTION_SHIMMER * (t * self.shimmer_rate).sin()
        };
        (self.base_opacity + self.boost + wave).clamp(0.0, CONNECTION_OPACITY_MAX)
    }

    fn light(&mut self, amount: f32) {
        self.boost = self
            .boost
            .max(amount)
            .min(CONNECTION_OPACITY_MAX - self.base_opacity);
    }
}

pub struct SceneField {
    config: SceneConfig,
    nodes: Vec<Node>,
    connections: Vec<Connection>,
    layers: Vec<Range<NodeId>>,
    pulses: PulsePool,
    camera: Camera,
    chances: TransitionChances,
    elapsed: f32,
}

impl SceneField {
    pub fn build<R: Rng + ?Sized>(config: SceneConfig, rng: &mut R) -> Result<Self, FieldError> {
        config.validate()?;

        let mut nodes = Vec::new();
        let mut layers = Vec::with_capacity(config.layers);
        for layer in 0..config.layers {
            let start = nodes.len();
            let origin = Vec3::new(0.0, 0.0, config.layer_z(layer));
            for i in 0..config.layer_len(layer) {
                let base = origin + place(&config.layout, i, rng);
                nodes.push(Node {
                    base,
                    layer,
                    phase: rng.gen_range(0.0..TAU),
                    pulse_rate: sample(rng, config.pulse_rate),
                    orbit_speed: sample(rng, config.orbit_speed),
                    orbit_radius: sample(rng, config.orbit_radius),
                    links: SmallVec::new(),
                    position: base,
                    scale: BASELINE_SCALE,
                    intensity: 0.0,
                });
            }
            layers.push(start..nodes.len());
        }

        let pairs = wire(&config.wiring, &nodes, &layers, rng);
        let mut connections = Vec::with_capacity(pairs.len());
        for (from, to) in pairs {
            let id = connections.len();
            nodes[from].links.push(id);
            nodes[to].links.push(id);
            connections.push(Connection {
                from,
                to,
                base_opacity: rng.gen_range(CONNECTION_OPACITY_MIN..2.0 * CONNECTION_OPACITY_MIN),
                boost: 0.0,
                state: Activation::Idle,
                phase: 0.0,
                phase_speed: sample(rng, config.connection_pulse_speed),
                shimmer_rate: sample(rng, config.pulse_rate),
            });
        }

        let pulses = PulsePool::new(config.pulse_pool, config.pulse_speed, rng);
        let chances = TransitionChances {
            idle_to_active: config.activation.idle_to_active,
            active_to_idle: config.activation.active_to_idle,
        };
        log::info!(
            "[scene] layers={} nodes={} connections={} pool={}",
            layers.len(),
            nodes.len(),
            connections.len(),
            pulses.capacity()
        );
        Ok(Self {
            camera: Camera::looking_at_origin(config.camera_z),
            config,
            nodes,
            connections,
            layers,
            pulses,
            chances,
            elapsed: 0.0,
        })
    }

    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[inline]
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    #[inline]
    pub fn pulses(&self) -> &PulsePool {
        &self.pulses
    }

    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[inline]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Node ids of layer `layer`.
    pub fn layer(&self, layer: usize) -> Range<NodeId> {
        self.layers.get(layer).cloned().unwrap_or(0..0)
    }

    /// Advance one rendered frame.
    pub fn tick<R: Rng + ?Sized>(&mut self, time: &FrameTime, input: &InputState, rng: &mut R) {
        self.elapsed = time.elapsed;
        self.camera.set_viewport(input.viewport);

        for conn in &mut self.connections {
            conn.boost = decay_toward(conn.boost, 0.0, DECAY, INTENSITY_SETTLE_EPSILON);
        }
        let float = self.config.float_amplitude;
        for node in &mut self.nodes {
            node.position = node.position_at(time.elapsed, float);
        }

        let hits = self.pointer_hits(input);
        let radius = self.config.activation.pointer_radius;
        for id in 0..self.nodes.len() {
            let node = &self.nodes[id];
            let distance = hits[node.layer].map(|hit| node.position.truncate().distance(hit));
            match distance {
                Some(d) if d < radius => {
                    let chance = self.config.activation.pointer_pulse_chance;
                    self.excite(id, 1.0 - d / radius, chance, rng);
                }
                _ => {
                    let node = &mut self.nodes[id];
                    node.scale = decay_toward(node.scale, BASELINE_SCALE, DECAY, SCALE_SETTLE_EPSILON);
                    node.intensity = decay_toward(node.intensity, 0.0, DECAY, INTENSITY_SETTLE_EPSILON);
                }
            }
        }

        if roll(rng, self.config.activation.spark_chance) {
            let id = rng.gen_range(0..self.nodes.len());
            self.spark(id, rng);
        }

        for (id, conn) in self.connections.iter_mut().enumerate() {
            let mut completed = false;
            if conn.state.is_active() {
                conn.phase += conn.phase_speed;
                if conn.phase >= 1.0 {
                    conn.phase -= 1.0;
                    completed = true;
                }
            }
            let before = conn.state;
            conn.state = conn.state.step(&self.chances, completed, rng);
            match (before, conn.state) {
                (Activation::Idle, Activation::Active) => {
                    conn.phase = 0.0;
                    self.pulses.request(id);
                }
                (Activation::Active, Activation::Active) if completed => {
                    self.pulses.request(id);
                }
                (Activation::Active, Activation::Idle) => conn.phase = 0.0,
                _ => {}
            }
        }

        self.pulses.advance();
    }

    /// Light node `id` with `intensity` in [0, 1]: scale and brighten it,
    /// brighten its connections and fire markers on them with `pulse_chance`.
    ///
    /// Lighting only raises the connection `boost`, which decays by itself;
    /// the idle/active flicker state is left to the background machine.
    pub fn excite<R: Rng + ?Sized>(
        &mut self,
        id: NodeId,
        intensity: f32,
        pulse_chance: f32,
        rng: &mut R,
    ) {
        let intensity = intensity.clamp(0.0, 1.0);
        self.light_node(id, intensity, CONNECTION_POINTER_GAIN * intensity, pulse_chance, rng);
    }

    /// Background activity: a random node flares up on its own and its
    /// connections jump to full opacity.
    fn spark<R: Rng + ?Sized>(&mut self, id: NodeId, rng: &mut R) {
        self.light_node(
            id,
            SPARK_INTENSITY,
            CONNECTION_OPACITY_MAX,
            SPARK_PULSE_CHANCE,
            rng,
        );
    }

    fn light_node<R: Rng + ?Sized>(
        &mut self,
        id: NodeId,
        intensity: f32,
        boost: f32,
        pulse_chance: f32,
        rng: &mut R,
    ) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        node.scale = node.scale.max(BASELINE_SCALE + intensity);
        node.intensity = node.intensity.max(intensity);
        for &cid in &node.links {
            self.connections[cid].light(boost);
            if roll(rng, pulse_chance) {
                self.pulses.request(cid);
            }
        }
    }

    /// Pointer position projected onto each layer's plane, in world XY.
    fn pointer_hits(&self, input: &InputState) -> Vec<Option<Vec2>> {
        let Some(ndc) = input.pointer_ndc() else {
            return vec![None; self.layers.len()];
        };
        let (origin, dir) = self.camera.ndc_to_ray(ndc);
        (0..self.layers.len())
            .map(|l| ray_plane_z(origin, dir, self.config.layer_z(l)).map(|p| p.truncate()))
            .collect()
    }

    pub fn render<S: SceneSurface + ?Sized>(&self, surface: &mut S) {
        let t = self.elapsed;
        surface.begin(self.camera.view_projection());
        for conn in &self.connections {
            let color = Rgba::from_rgb8(CONNECTION_RGB, conn.opacity(t));
            surface.draw_line(
                self.nodes[conn.from].position,
                self.nodes[conn.to].position,
                color,
            );
        }
        for node in &self.nodes {
            surface.draw_sprite(
                node.position,
                NODE_SIZE * node.scale,
                node.color(self.config.node_hue, t),
            );
        }
        let marker = Rgba::from_rgb8(PULSE_RGB, PULSE_OPACITY);
        for (cid, progress) in self.pulses.active() {
            let conn = &self.connections[cid];
            let a = self.nodes[conn.from].position;
            let b = self.nodes[conn.to].position;
            surface.draw_sprite(a.lerp(b, progress), PULSE_SCALE * 2.0, marker);
        }
        surface.finish();
    }

    /// Tear the field down. Everything it owns is released here; front ends
    /// drop their GPU resources alongside.
    pub fn dispose(self) {
        log::info!(
            "[scene] disposed nodes={} connections={}",
            self.nodes.len(),
            self.connections.len()
        );
    }
}

/// Layer-local position of node `index`.
fn place<R: Rng + ?Sized>(layout: &Layout, index: usize, rng: &mut R) -> Vec3 {
    match *layout {
        Layout::Cuboid { extent } => Vec3::new(
            (rng.gen::<f32>() - 0.5) * extent.x,
            (rng.gen::<f32>() - 0.5) * extent.y,
            (rng.gen::<f32>() - 0.5) * extent.z,
        ),
        Layout::SphereShell { radius, thickness } => {
            let r = radius + rng.gen::<f32>() * thickness;
            let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
            let theta = rng.gen::<f32>() * TAU;
            Vec3::new(
                r * phi.sin() * theta.cos(),
                r * phi.sin() * theta.sin(),
                r * phi.cos(),
            )
        }
        Layout::Grid {
            columns,
            rows,
            spacing,
        } => {
            let col = (index % columns) as f32;
            let row = (index / columns) as f32;
            Vec3::new(
                (col - columns as f32 / 2.0) * spacing,
                (row - rows as f32 / 2.0) * spacing,
                0.0,
            )
        }
    }
}

/// Endpoint pairs for every connection; duplicates are collapsed.
fn wire<R: Rng + ?Sized>(
    wiring: &Wiring,
    nodes: &[Node],
    layers: &[Range<NodeId>],
    rng: &mut R,
) -> Vec<(NodeId, NodeId)> {
    let mut seen = FnvHashSet::default();
    let mut pairs = Vec::new();
    match *wiring {
        Wiring::NextLayer {
            min_fanout,
            max_fanout,
        } => {
            for window in layers.windows(2) {
                let (current, next) = (&window[0], &window[1]);
                for from in current.clone() {
                    let fanout = rng.gen_range(min_fanout..=max_fanout);
                    for _ in 0..fanout {
                        let to = rng.gen_range(next.clone());
                        if seen.insert((from, to)) {
                            pairs.push((from, to));
                        }
                    }
                }
            }
        }
        Wiring::Proximity { max_distance } => {
            for layer in layers {
                for a in layer.clone() {
                    for b in (a + 1)..layer.end {
                        if nodes[a].base.distance(nodes[b].base) < max_distance
                            && seen.insert((a, b))
                        {
                            pairs.push((a, b));
                        }
                    }
                }
            }
        }
    }
    pairs
}
