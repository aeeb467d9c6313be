//! Drive the engine without a window.
//!
//! Simulates two seconds of frames with a synthetic pointer sweep and a
//! steady scroll, printing a sample of what a renderer would consume. Shows
//! that the engine has no dependency on the windowed runner.
//!
//! Run with: `cargo run --example headless`

use liqmesh::prelude::*;

fn main() {
    let mut engine = Engine::new()
        .with_seed(42)
        .with_particle_count(150)
        .with_subdivisions(2)
        .with_content_height(2000.0);
    engine.input_mut().set_viewport(1280, 720);

    let mut clock = Clock::new();
    clock.set_fixed_delta(Some(1.0 / 60.0));

    for frame in 0..120 {
        let progress = frame as f32 / 120.0;
        engine
            .input_mut()
            .set_pointer(Vec2::new((progress * 6.28).sin(), 0.0));
        engine.input_mut().scroll_by(1280.0 / 120.0);

        let (elapsed, delta) = clock.update();
        engine.frame(elapsed, delta);

        if frame % 30 == 0 {
            let v = engine.mesh().positions()[0];
            let p = engine.particles().positions()[0];
            let params = engine.params();
            println!(
                "t={:.2}s scroll={:.2} vertex0=({:+.3}, {:+.3}, {:+.3}) \
                 particle0=({:+.3}, {:+.3}, {:+.3}) hue={:.3} camera_z={:.2}",
                elapsed,
                engine.input().scroll_progress(),
                v.x,
                v.y,
                v.z,
                p.x,
                p.y,
                p.z,
                params.hue(),
                params.camera_position().z,
            );
        }
    }
}
