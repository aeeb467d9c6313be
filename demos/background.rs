//! The full windowed background scene with default settings.
//!
//! Move the pointer to pull on the mesh and attract nearby particles;
//! scroll the wheel to drive the page progress - the waves deepen, the
//! particle field spreads, the color drifts from cyan toward warm, and the
//! camera pulls back.
//!
//! Run with: `cargo run --example background`

use liqmesh::prelude::*;

fn main() -> Result<(), liqmesh::RunError> {
    Engine::new()
        .with_particle_count(150)
        .with_subdivisions(4)
        .with_content_height(4000.0)
        .run()
}
