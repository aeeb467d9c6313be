//! Engine builder and per-frame driver.
//!
//! One `Engine` owns the whole animation state for a scene: the input cell,
//! the deformable mesh, the particle field, and the interpolated parameters.
//! It is one allocation per scene, mutated in place every frame, dropped at
//! scene teardown.
//!
//! # Usage
//!
//! ```ignore
//! use liqmesh::prelude::*;
//!
//! Engine::new()
//!     .with_particle_count(150)
//!     .with_subdivisions(4)
//!     .with_content_height(4000.0)
//!     .run()
//! ```
//!
//! Or drive it manually from your own render loop:
//!
//! ```ignore
//! let mut engine = Engine::new().with_seed(7);
//! engine.input_mut().handle_event(&window_event);
//! engine.frame(clock_elapsed, clock_delta);
//! renderer.upload(engine.mesh().position_bytes());
//! ```

use crate::error::RunError;
use crate::input::{InputSnapshot, InputState, DEFAULT_CONTENT_HEIGHT};
use crate::mesh::LiquidMesh;
use crate::params::{SceneParams, DEFAULT_SMOOTHING};
use crate::particles::{ParticleField, DEFAULT_PARTICLE_COUNT};
use crate::window;

/// Default icosphere subdivision level (2562 vertices).
pub const DEFAULT_SUBDIVISIONS: u32 = 4;

/// Default mesh radius in world units.
pub const DEFAULT_MESH_RADIUS: f32 = 1.0;

/// The animation engine for one scene.
///
/// Components run synchronously, in a fixed order, inside one frame
/// callback; every component observes the same input snapshot.
pub struct Engine {
    input: InputState,
    mesh: LiquidMesh,
    particles: ParticleField,
    params: SceneParams,
    seed: Option<u64>,
    radius: f32,
    subdivisions: u32,
}

impl Engine {
    /// Create an engine with default settings.
    pub fn new() -> Self {
        Self {
            input: InputState::new(DEFAULT_CONTENT_HEIGHT),
            mesh: LiquidMesh::icosphere(DEFAULT_MESH_RADIUS, DEFAULT_SUBDIVISIONS),
            particles: ParticleField::new(DEFAULT_PARTICLE_COUNT),
            params: SceneParams::new(DEFAULT_SMOOTHING),
            seed: None,
            radius: DEFAULT_MESH_RADIUS,
            subdivisions: DEFAULT_SUBDIVISIONS,
        }
    }

    /// Set the number of particles.
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particles = match self.seed {
            Some(seed) => ParticleField::with_seed(count, seed),
            None => ParticleField::new(count),
        };
        self
    }

    /// Seed the particle field's random source, for deterministic runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self.particles = ParticleField::with_seed(self.particles.len(), seed);
        self
    }

    /// Set the icosphere subdivision level.
    pub fn with_subdivisions(mut self, subdivisions: u32) -> Self {
        self.subdivisions = subdivisions;
        self.rebuild_mesh();
        self
    }

    /// Set the mesh radius in world units.
    pub fn with_mesh_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self.rebuild_mesh();
        self
    }

    /// Set how far the pointer's unit x maps across world space.
    pub fn with_pointer_width(mut self, width: f32) -> Self {
        self.mesh.set_pointer_width(width);
        self
    }

    /// Set the virtual document height driving scroll progress.
    pub fn with_content_height(mut self, height: f32) -> Self {
        self.input.set_content_height(height);
        self
    }

    /// Set the smoothing factor for the interpolated parameters.
    pub fn with_smoothing(mut self, factor: f32) -> Self {
        self.params = SceneParams::new(factor);
        self
    }

    fn rebuild_mesh(&mut self) {
        let pointer_width = self.mesh.pointer_width();
        self.mesh = LiquidMesh::icosphere(self.radius, self.subdivisions);
        self.mesh.set_pointer_width(pointer_width);
    }

    /// The input cell. Readers sample; the event loop writes.
    #[inline]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Writer access for the event loop (and headless drivers).
    #[inline]
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    #[inline]
    pub fn mesh(&self) -> &LiquidMesh {
        &self.mesh
    }

    #[inline]
    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    #[inline]
    pub fn params(&self) -> &SceneParams {
        &self.params
    }

    /// Whether the mesh buffers changed since the renderer last asked.
    pub fn take_mesh_dirty(&mut self) -> bool {
        self.mesh.take_dirty()
    }

    /// Whether the particle buffer changed since the renderer last asked.
    pub fn take_particles_dirty(&mut self) -> bool {
        self.particles.take_dirty()
    }

    /// Run one frame at absolute time `elapsed` with frame delta `delta`.
    ///
    /// Components run in order on one snapshot: mesh deformation, particle
    /// integration, parameter reconciliation. The formulas use absolute
    /// time, so an irregular delta cannot accumulate error.
    pub fn frame(&mut self, elapsed: f32, delta: f32) {
        let snapshot = self.input.snapshot();
        self.frame_with(elapsed, delta, snapshot);
    }

    /// Like [`frame`](Self::frame), but with a caller-supplied snapshot.
    pub fn frame_with(&mut self, elapsed: f32, delta: f32, snapshot: InputSnapshot) {
        self.mesh.deform(elapsed, snapshot);
        self.particles.step(elapsed, snapshot);
        self.params.update(snapshot, delta);
    }

    /// Open a window and drive the engine from its event loop.
    /// Blocks until the window closes.
    pub fn run(self) -> Result<(), RunError> {
        window::run(self)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
