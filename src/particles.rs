//! The floating particle field around the mesh.
//!
//! A fixed set of points integrated forward each frame: stochastic jitter so
//! the field never settles, a pointer-seeking force with a short falloff,
//! a depth coordinate recomputed (not integrated) from time, and a soft
//! scroll-dependent boundary. The boundary decays the excess instead of
//! clamping: a hard clamp pops visibly at the edge, decay returns smoothly.
//!
//! Randomness is injectable: production uses an entropy seed, tests pass a
//! fixed one via [`ParticleField::with_seed`].
//!
//! # Usage
//!
//! ```ignore
//! let mut field = ParticleField::new(150);
//!
//! // Each frame:
//! field.step(clock.elapsed(), input.snapshot());
//! renderer.upload(field.position_bytes());
//! ```

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::input::InputSnapshot;

/// Default particle count; trades visual density for per-frame cost.
pub const DEFAULT_PARTICLE_COUNT: usize = 150;

/// Half-size of the cube particles are seeded into, per axis.
const SEED_EXTENT: f32 = 5.0;

/// A fixed-count swarm of points.
///
/// The count is set at construction and never changes.
pub struct ParticleField {
    positions: Vec<Vec3>,
    rng: SmallRng,
    dirty: bool,
}

impl ParticleField {
    /// Spawn `count` particles uniformly in `[-5, 5]` per axis, with an
    /// entropy-seeded random source.
    pub fn new(count: usize) -> Self {
        Self::from_rng(count, SmallRng::from_entropy())
    }

    /// Deterministic construction for tests and replays.
    pub fn with_seed(count: usize, seed: u64) -> Self {
        Self::from_rng(count, SmallRng::seed_from_u64(seed))
    }

    fn from_rng(count: usize, mut rng: SmallRng) -> Self {
        let positions = (0..count)
            .map(|_| {
                Vec3::new(
                    rng.gen_range(-SEED_EXTENT..=SEED_EXTENT),
                    rng.gen_range(-SEED_EXTENT..=SEED_EXTENT),
                    rng.gen_range(-SEED_EXTENT..=SEED_EXTENT),
                )
            })
            .collect();
        Self {
            positions,
            rng,
            dirty: true,
        }
    }

    /// Number of particles, fixed at construction.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Current particle positions.
    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Positions as bytes, for direct GPU upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// True once after each step; consumed by the renderer.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// The soft containment radius at a given scroll progress.
    ///
    /// 5 world units at the top of the page, 50 fully scrolled.
    #[inline]
    pub fn max_spread(scroll: f32) -> f32 {
        5.0 * (1.0 + 9.0 * scroll)
    }

    /// Integrate every particle one frame forward.
    pub fn step(&mut self, t: f32, input: InputSnapshot) {
        let px = input.pointer.x;
        let py = input.pointer.y;
        let s = input.scroll;
        let spread = Self::max_spread(s);

        let rng = &mut self.rng;
        for p in self.positions.iter_mut() {
            let (x, y) = (p.x, p.y);

            // Depth is a pure function of time and the xy position, never
            // integrated, so it cannot wander off.
            p.z = (t * (0.5 + s) + 0.5 * x).sin() * 0.5 + (t * (0.3 + s) + 0.5 * y).cos() * 0.5;

            // Pointer-seeking force: full strength at the pointer's world
            // position, zero beyond 3 units.
            let dx = x - px * 5.0;
            let dy = y - py * 5.0;
            let dist = (dx * dx + dy * dy).sqrt();
            let force = (1.0 - dist / 3.0).max(0.0);

            // Fresh jitter per particle per axis keeps the field alive.
            let jx = rng.gen::<f32>() - 0.5;
            let jy = rng.gen::<f32>() - 0.5;
            p.x = x + jx * 0.01 + (px - x) * force * 0.01;
            p.y = y + jy * 0.01 + (py - y) * force * 0.01;

            // Soft containment: decay the overshoot toward the boundary.
            if p.x.abs() > spread {
                p.x *= 0.95;
            }
            if p.y.abs() > spread {
                p.y *= 0.95;
            }
        }

        self.dirty = true;
    }

    #[cfg(test)]
    pub(crate) fn set_position(&mut self, index: usize, position: Vec3) {
        self.positions[index] = position;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn neutral() -> InputSnapshot {
        InputSnapshot {
            pointer: Vec2::ZERO,
            scroll: 0.0,
        }
    }

    #[test]
    fn test_count_is_fixed() {
        let mut field = ParticleField::with_seed(150, 7);
        assert_eq!(field.len(), 150);

        for i in 0..50 {
            field.step(i as f32 * 0.016, neutral());
        }
        assert_eq!(field.len(), 150);
    }

    #[test]
    fn test_seeded_within_extent() {
        let field = ParticleField::with_seed(500, 42);
        for p in field.positions() {
            assert!(p.x.abs() <= SEED_EXTENT);
            assert!(p.y.abs() <= SEED_EXTENT);
            assert!(p.z.abs() <= SEED_EXTENT);
        }
    }

    #[test]
    fn test_same_seed_same_trajectory() {
        let mut a = ParticleField::with_seed(64, 9);
        let mut b = ParticleField::with_seed(64, 9);
        let input = InputSnapshot {
            pointer: Vec2::new(0.4, -0.2),
            scroll: 0.3,
        };

        for frame in 0..20 {
            let t = frame as f32 / 60.0;
            a.step(t, input);
            b.step(t, input);
        }
        assert_eq!(a.positions(), b.positions());
    }

    #[test]
    fn test_depth_formula_at_time_zero() {
        // At t = 0 the time terms drop out and z depends only on the
        // pre-step xy, independent of the jitter seed.
        let mut field = ParticleField::with_seed(150, 3);
        let before = field.positions().to_vec();

        field.step(0.0, neutral());

        for (old, new) in before.iter().zip(field.positions()) {
            let expected = (0.5 * old.x).sin() * 0.5 + (0.5 * old.y).cos() * 0.5;
            assert!((new.z - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn test_max_spread_endpoints() {
        assert_eq!(ParticleField::max_spread(0.0), 5.0);
        assert_eq!(ParticleField::max_spread(1.0), 50.0);
    }

    #[test]
    fn test_boundary_decay_engages() {
        let mut field = ParticleField::with_seed(1, 1);
        let spread = ParticleField::max_spread(0.0);
        field.set_position(0, Vec3::new(2.0 * spread, 0.0, 0.0));

        let mut last = 2.0 * spread;
        for frame in 0..200 {
            field.step(frame as f32 / 60.0, neutral());
            let x = field.positions()[0].x.abs();
            if last > spread {
                // Decay dominates jitter while outside the boundary.
                assert!(x < last, "|x| must strictly decrease while outside");
            }
            last = x;
        }

        // Approaches the boundary from above without being flung back out.
        assert!(last <= spread + 0.1);
    }
}
