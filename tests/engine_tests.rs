//! End-to-end properties of the animation engine, exercised through the
//! public API.

use glam::{Vec2, Vec3};

use liqmesh::input::InputSnapshot;
use liqmesh::params::scroll_hue;
use liqmesh::{Engine, InputState, LiquidMesh, ParticleField};

fn snapshot(px: f32, py: f32, scroll: f32) -> InputSnapshot {
    InputSnapshot {
        pointer: Vec2::new(px, py),
        scroll,
    }
}

// An origin vertex must survive deformation: nothing in the formula divides
// by the vertex distance.
#[test]
fn origin_vertex_is_finite() {
    let mut mesh = LiquidMesh::from_vertices(
        vec![Vec3::ZERO, Vec3::X, Vec3::new(0.0, 1.0, 0.5)],
        vec![0, 1, 2],
    );

    // Pointer parked a full band away so both pointer terms vanish at the
    // origin: |1.0 * 2.0 - 0.0| / 2.0 == 1.
    let input = snapshot(1.0, 0.0, 0.0);
    let t = 1.7;
    mesh.deform(t, input);

    let origin = mesh.positions()[0];
    assert!(origin.is_finite());

    // At distance 0 with no pointer or scroll term the factor reduces to
    // 1 + wave + wave2.
    let expected = 1.0 + (-2.0 * t).sin() * 0.08 + (1.5 * t).cos() * 0.05;
    let got = mesh.scale_factor(Vec3::ZERO, t, input);
    assert!((got - expected).abs() < 1e-6);
    assert!(got.is_finite());
}

// At scroll 0 the scroll distortion term is exactly zero for every vertex.
#[test]
fn scroll_deform_exactly_zero_at_rest() {
    let mesh = LiquidMesh::icosphere(1.0, 1);
    let t = 3.1;

    for &v in mesh.base_positions() {
        let d = v.length();
        let without_scroll = 1.0
            + (d * 3.0 - 2.0 * t).sin() * 0.08
            + (d * 2.0 + 1.5 * t).cos() * 0.05
            + (1.0 - v.x.abs() / 2.0).max(0.0) * 0.1;
        let got = mesh.scale_factor(v, t, snapshot(0.0, 0.0, 0.0));
        assert!((got - without_scroll).abs() < 1e-6);
    }
}

#[test]
fn boundary_constants_at_scroll_extremes() {
    assert_eq!(ParticleField::max_spread(0.0), 5.0);
    assert_eq!(ParticleField::max_spread(1.0), 50.0);
}

#[test]
fn hue_at_scroll_extremes() {
    assert!((scroll_hue(0.0) - 0.6).abs() < 1e-6);
    assert!((scroll_hue(1.0) - 0.3).abs() < 1e-6);
}

// Sampling is a pure read: no hidden mutation between two calls.
#[test]
fn pointer_sampling_is_idempotent() {
    let mut input = InputState::new(4000.0);
    input.set_viewport(1280, 720);
    input.set_pointer(Vec2::new(-0.4, 0.9));
    input.scroll_by(777.0);

    assert_eq!(input.pointer(), input.pointer());
    assert_eq!(input.scroll_progress(), input.scroll_progress());
    assert_eq!(input.snapshot(), input.snapshot());
}

// The boundary is soft but effective: over a long unscrolled run no
// particle ever strays more than a jitter step past the 5-unit spread.
#[test]
fn particles_stay_near_boundary() {
    let spread = ParticleField::max_spread(0.0);
    let mut field = ParticleField::with_seed(150, 123);

    for frame in 0..2000 {
        field.step(frame as f32 / 60.0, snapshot(0.0, 0.0, 0.0));
        for p in field.positions() {
            assert!(p.x.abs() <= spread + 0.1);
            assert!(p.y.abs() <= spread + 0.1);
        }
    }
}

// The icosahedron scenario: t = 0, pointer at origin, unscrolled. Every
// vertex factor reduces to 1 + sin(3d)*0.08 + cos(2d)*0.05 + influence*0.1,
// checked exactly for two vertices with known coordinates.
#[test]
fn icosahedron_rest_frame_exact_values() {
    let mesh = LiquidMesh::icosphere(1.0, 0);
    assert_eq!(mesh.vertex_count(), 12);

    let input = snapshot(0.0, 0.0, 0.0);

    // All icosahedron vertices sit on the unit sphere: d == 1.
    let d = 1.0f32;
    let waves = (d * 3.0).sin() * 0.08 + (d * 2.0).cos() * 0.05;

    // Vertex 0 is (-1, phi, 0) normalized: x = -1 / sqrt(1 + phi^2).
    let phi = (1.0 + 5.0f32.sqrt()) / 2.0;
    let x0 = -1.0 / (1.0 + phi * phi).sqrt();
    let v0 = mesh.base_positions()[0];
    assert!((v0.x - x0).abs() < 1e-5);
    let expected0 = 1.0 + waves + (1.0 - x0.abs() / 2.0) * 0.1;
    let got0 = mesh.scale_factor(v0, 0.0, input);
    assert!((got0 - expected0).abs() < 1e-5);

    // Vertex 4 is (0, -1, phi) normalized: x = 0, so the pointer influence
    // is exactly 1 at the pointer's world position.
    let v4 = mesh.base_positions()[4];
    assert!(v4.x.abs() < 1e-6);
    let expected4 = 1.0 + waves + 0.1;
    let got4 = mesh.scale_factor(v4, 0.0, input);
    assert!((got4 - expected4).abs() < 1e-5);
}

// The time-zero frame pins every particle's depth to a pure function of
// its xy position, independent of the jitter seed.
#[test]
fn particle_depth_at_time_zero() {
    for seed in [1u64, 99, 4096] {
        let mut field = ParticleField::with_seed(150, seed);
        let before: Vec<Vec3> = field.positions().to_vec();

        field.step(0.0, snapshot(0.0, 0.0, 0.0));

        for (old, new) in before.iter().zip(field.positions()) {
            let expected = (0.5 * old.x).sin() * 0.5 + (0.5 * old.y).cos() * 0.5;
            assert!(
                (new.z - expected).abs() < 1e-6,
                "seed {} should not affect z at t=0",
                seed
            );
        }
    }
}

// A full engine frame leaves every buffer finite even under adversarial
// input timing.
#[test]
fn engine_frames_stay_finite() {
    let mut engine = Engine::new()
        .with_seed(7)
        .with_subdivisions(2)
        .with_particle_count(64);
    engine.input_mut().set_viewport(1280, 720);

    // Wildly irregular elapsed times and deltas.
    let times = [0.0f32, 0.016, 0.017, 1.5, 1.501, 60.0, 60.001];
    for (i, &t) in times.iter().enumerate() {
        engine
            .input_mut()
            .set_pointer(Vec2::new(if i % 2 == 0 { 1.0 } else { -1.0 }, 0.5));
        engine.input_mut().scroll_by(900.0);
        let delta = if i == 0 { 0.0 } else { times[i] - times[i - 1] };
        engine.frame(t, delta);

        for v in engine.mesh().positions() {
            assert!(v.is_finite());
        }
        for n in engine.mesh().normals() {
            assert!(n.is_finite());
        }
        for p in engine.particles().positions() {
            assert!(p.is_finite());
        }
        assert!(engine.params().camera_position().is_finite());
        assert!(engine.params().base_color().is_finite());
    }
}
