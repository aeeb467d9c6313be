//! # liqmesh - Liquid Mesh Engine
//!
//! Pointer- and scroll-reactive procedural 3D backgrounds: a deformable
//! "liquid" mesh, a drifting particle field, and continuously interpolated
//! camera/fog/color parameters, all driven per frame by three inputs -
//! elapsed time, normalized pointer position, and scroll progress.
//!
//! ## Quick Start
//!
//! ```ignore
//! use liqmesh::prelude::*;
//!
//! fn main() -> Result<(), liqmesh::RunError> {
//!     Engine::new()
//!         .with_particle_count(150)
//!         .with_subdivisions(4)
//!         .with_content_height(4000.0)
//!         .run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### One snapshot per frame
//!
//! Device events write into [`InputState`](input::InputState); each frame
//! takes one immutable snapshot that every component reads, so the mesh,
//! the particles, and the interpolated parameters always agree on what the
//! user is doing.
//!
//! ### Base vs. live geometry
//!
//! The mesh keeps its undeformed base shape forever and rewrites the live
//! buffer from it every frame. Deformation is a pure function of
//! `(base, time, snapshot)` - irregular frame pacing cannot make the shape
//! drift.
//!
//! ### Absolute time, not deltas
//!
//! Wave and particle formulas take absolute elapsed time. The frame delta
//! only feeds the spring interpolators, which integrate in fixed substeps.
//!
//! ### Smoothed parameters
//!
//! Camera, fog, hue, light, and material values never snap. Targets are
//! pure functions of the inputs; current values approach them by
//! exponential smoothing or a damped spring
//! ([`params::Smoothed`], [`params::Spring`]).
//!
//! ## Driving it yourself
//!
//! The windowed runner is optional. [`Engine::frame`] is an ordinary method
//! call; any host with a frame callback can own the loop:
//!
//! ```ignore
//! let mut engine = Engine::new().with_seed(42);
//! let mut clock = Clock::new();
//!
//! loop {
//!     let (elapsed, delta) = clock.update();
//!     engine.frame(elapsed, delta);
//!     my_renderer.upload(engine.mesh().position_bytes());
//! }
//! ```

pub mod input;
pub mod mesh;
pub mod params;
pub mod particles;
pub mod time;

mod engine;
mod error;
mod gpu;
mod window;

pub use bytemuck;
pub use engine::{Engine, DEFAULT_MESH_RADIUS, DEFAULT_SUBDIVISIONS};
pub use error::{GpuError, RunError};
pub use glam::{Vec2, Vec3, Vec4};
pub use input::{InputSnapshot, InputState};
pub use mesh::LiquidMesh;
pub use params::{SceneParams, Smoothed, Spring};
pub use particles::ParticleField;
pub use time::Clock;

/// Convenient re-exports for common usage.
///
/// # Usage
///
/// ```ignore
/// use liqmesh::prelude::*;
/// ```
pub mod prelude {
    pub use crate::engine::Engine;
    pub use crate::input::{InputSnapshot, InputState};
    pub use crate::mesh::LiquidMesh;
    pub use crate::params::{SceneParams, Smoothed, Spring};
    pub use crate::particles::ParticleField;
    pub use crate::time::Clock;
    pub use crate::{Vec2, Vec3, Vec4};
}
