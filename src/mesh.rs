//! The deformable mesh at the center of the scene.
//!
//! [`LiquidMesh`] keeps two vertex buffers: an immutable base captured at
//! construction, and a live buffer overwritten in full every frame from the
//! base plus the computed offset. Deforming from the base each frame (rather
//! than from the previous frame's output) means irregular frame pacing can
//! never accumulate drift in the shape.
//!
//! The per-vertex displacement combines a scroll-scaled radial wave, a
//! slower secondary wave, an x-band pointer attraction, and a distortion
//! term that only activates once scrolling begins. After deformation the
//! per-vertex normals are recomputed so lighting tracks the moving surface.
//!
//! # Usage
//!
//! ```ignore
//! let mut mesh = LiquidMesh::icosphere(1.0, 4);
//!
//! // Each frame:
//! mesh.deform(clock.elapsed(), input.snapshot());
//! renderer.upload(mesh.position_bytes(), mesh.normal_bytes());
//! ```

use std::collections::HashMap;

use glam::Vec3;

use crate::input::InputSnapshot;

/// Default width, in world units, of the band the pointer projects onto.
pub const DEFAULT_POINTER_WIDTH: f32 = 2.0;

/// A mesh with a fixed base shape and a per-frame deformed copy.
pub struct LiquidMesh {
    /// Undeformed reference positions. Never mutated after capture.
    base: Vec<Vec3>,
    /// Displayed positions, rewritten in full by [`deform`](Self::deform).
    live: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,
    pointer_width: f32,
    dirty: bool,
}

impl LiquidMesh {
    /// Build an icosphere of the given radius.
    ///
    /// `subdivisions` controls vertex count (`10 * 4^n + 2`), trading
    /// deformation smoothness for per-frame cost.
    pub fn icosphere(radius: f32, subdivisions: u32) -> Self {
        let (vertices, indices) = icosphere(radius, subdivisions);
        Self::from_vertices(vertices, indices)
    }

    /// Build from arbitrary geometry. The positions passed in become the
    /// immutable base shape.
    pub fn from_vertices(vertices: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let live = vertices.clone();
        let mut mesh = Self {
            base: vertices,
            live,
            normals: Vec::new(),
            indices,
            pointer_width: DEFAULT_POINTER_WIDTH,
            dirty: true,
        };
        mesh.normals = vec![Vec3::Z; mesh.base.len()];
        mesh.recompute_normals();
        mesh
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.base.len()
    }

    /// Number of triangle indices.
    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// The undeformed reference positions.
    #[inline]
    pub fn base_positions(&self) -> &[Vec3] {
        &self.base
    }

    /// The currently displayed positions.
    #[inline]
    pub fn positions(&self) -> &[Vec3] {
        &self.live
    }

    /// Per-vertex normals matching the live positions.
    #[inline]
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Triangle indices.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Live positions as bytes, for direct GPU upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.live)
    }

    /// Normals as bytes, for direct GPU upload.
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Indices as bytes, for direct GPU upload.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// How far, in world units, the pointer's unit x maps across the scene.
    pub fn set_pointer_width(&mut self, width: f32) {
        self.pointer_width = width;
    }

    #[inline]
    pub fn pointer_width(&self) -> f32 {
        self.pointer_width
    }

    /// True once after each deformation; consumed by the renderer to decide
    /// whether to re-upload the vertex buffers.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    /// The multiplicative scale applied to a base vertex at time `t`.
    ///
    /// The formula has no division by the vertex distance, so a vertex at
    /// the origin stays finite by construction.
    pub fn scale_factor(&self, base: Vec3, t: f32, input: InputSnapshot) -> f32 {
        let s = input.scroll;
        let distance = base.length();

        // Primary radial wave; frequency and amplitude grow with scroll.
        let wave = (distance * (3.0 + 2.0 * s) - 2.0 * t).sin() * 0.08 * (1.0 + 2.0 * s);
        // Secondary slower wave with independent phase.
        let wave2 = (distance * 2.0 + 1.5 * t).cos() * (0.05 + 0.1 * s);

        // Pointer attraction falls off over a 2-unit band along world x.
        let pointer_x = input.pointer.x * self.pointer_width;
        let mouse_influence = (1.0 - (pointer_x - base.x).abs() / 2.0).max(0.0);

        // Extra distortion, exactly zero until scrolling begins.
        let scroll_deform = (t + 10.0 * s).sin() * s * 0.15;

        1.0 + wave + wave2 + mouse_influence * 0.1 + scroll_deform
    }

    /// Overwrite the live buffer from the base shape for time `t`, then
    /// recompute normals. A mesh with no vertices is a no-op.
    pub fn deform(&mut self, t: f32, input: InputSnapshot) {
        if self.base.is_empty() {
            return;
        }
        for i in 0..self.base.len() {
            let base = self.base[i];
            self.live[i] = base * self.scale_factor(base, t, input);
        }
        self.recompute_normals();
        self.dirty = true;
    }

    /// Flat per-vertex normal recomputation from the live positions.
    ///
    /// Face normals are accumulated unnormalized (area weighting) and the
    /// sums normalized per vertex. A vertex with no faces, or only
    /// degenerate ones, keeps a radial fallback.
    fn recompute_normals(&mut self) {
        for n in self.normals.iter_mut() {
            *n = Vec3::ZERO;
        }
        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let face = (self.live[b] - self.live[a]).cross(self.live[c] - self.live[a]);
            self.normals[a] += face;
            self.normals[b] += face;
            self.normals[c] += face;
        }
        for (n, &pos) in self.normals.iter_mut().zip(&self.live) {
            let unit = n.normalize_or_zero();
            *n = if unit != Vec3::ZERO {
                unit
            } else {
                let radial = pos.normalize_or_zero();
                if radial != Vec3::ZERO {
                    radial
                } else {
                    Vec3::Z
                }
            };
        }
    }
}

/// Icosahedron subdivided `subdivisions` times, projected onto a sphere.
fn icosphere(radius: f32, subdivisions: u32) -> (Vec<Vec3>, Vec<u32>) {
    let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;

    let mut vertices: Vec<Vec3> = [
        (-1.0, phi, 0.0),
        (1.0, phi, 0.0),
        (-1.0, -phi, 0.0),
        (1.0, -phi, 0.0),
        (0.0, -1.0, phi),
        (0.0, 1.0, phi),
        (0.0, -1.0, -phi),
        (0.0, 1.0, -phi),
        (phi, 0.0, -1.0),
        (phi, 0.0, 1.0),
        (-phi, 0.0, -1.0),
        (-phi, 0.0, 1.0),
    ]
    .iter()
    .map(|&(x, y, z)| Vec3::new(x, y, z).normalize() * radius)
    .collect();

    let mut indices: Vec<u32> = vec![
        0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11, //
        1, 5, 9, 5, 11, 4, 11, 10, 2, 10, 7, 6, 7, 1, 8, //
        3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9, //
        4, 9, 5, 2, 4, 11, 6, 2, 10, 8, 6, 7, 9, 8, 1,
    ];

    for _ in 0..subdivisions {
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
        let mut next = Vec::with_capacity(indices.len() * 4);

        for tri in indices.chunks_exact(3) {
            let (a, b, c) = (tri[0], tri[1], tri[2]);
            let ab = midpoint(&mut vertices, &mut midpoints, a, b, radius);
            let bc = midpoint(&mut vertices, &mut midpoints, b, c, radius);
            let ca = midpoint(&mut vertices, &mut midpoints, c, a, radius);

            next.extend_from_slice(&[a, ab, ca, b, bc, ab, c, ca, bc, ab, bc, ca]);
        }
        indices = next;
    }

    (vertices, indices)
}

/// Midpoint of edge (a, b), reprojected to the sphere, deduplicated per edge.
fn midpoint(
    vertices: &mut Vec<Vec3>,
    cache: &mut HashMap<(u32, u32), u32>,
    a: u32,
    b: u32,
    radius: f32,
) -> u32 {
    let key = (a.min(b), a.max(b));
    if let Some(&idx) = cache.get(&key) {
        return idx;
    }
    let mid = ((vertices[a as usize] + vertices[b as usize]) / 2.0).normalize() * radius;
    let idx = vertices.len() as u32;
    vertices.push(mid);
    cache.insert(key, idx);
    idx
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
    fn test_icosahedron_counts() {
        let mesh = LiquidMesh::icosphere(1.0, 0);
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.index_count(), 60);
    }

    #[test]
    fn test_subdivision_counts() {
        for n in 0..4u32 {
            let mesh = LiquidMesh::icosphere(1.0, n);
            let expected = 10 * 4usize.pow(n) + 2;
            assert_eq!(mesh.vertex_count(), expected, "subdivision level {}", n);
            assert_eq!(mesh.index_count(), 60 * 4usize.pow(n));
        }
    }

    #[test]
    fn test_icosphere_on_sphere() {
        let mesh = LiquidMesh::icosphere(2.0, 2);
        for v in mesh.base_positions() {
            assert!((v.length() - 2.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_empty_mesh_is_noop() {
        let mut mesh = LiquidMesh::from_vertices(Vec::new(), Vec::new());
        mesh.deform(1.25, neutral());
        assert_eq!(mesh.vertex_count(), 0);
    }

    #[test]
    fn test_base_is_never_mutated() {
        let mut mesh = LiquidMesh::icosphere(1.0, 1);
        let before = mesh.base_positions().to_vec();

        let input = InputSnapshot {
            pointer: Vec2::new(0.3, -0.8),
            scroll: 0.7,
        };
        mesh.deform(3.0, input);
        mesh.deform(7.5, input);

        assert_eq!(mesh.base_positions(), before.as_slice());
    }

    #[test]
    fn test_deform_has_no_drift() {
        // Same inputs must yield the identical live buffer no matter how
        // many frames ran in between.
        let mut mesh = LiquidMesh::icosphere(1.0, 1);
        let input = neutral();

        mesh.deform(2.0, input);
        let first = mesh.positions().to_vec();

        mesh.deform(9.0, input);
        mesh.deform(4.5, input);
        mesh.deform(2.0, input);

        assert_eq!(mesh.positions(), first.as_slice());
    }

    #[test]
    fn test_normals_are_unit_length() {
        let mut mesh = LiquidMesh::icosphere(1.0, 2);
        mesh.deform(
            1.7,
            InputSnapshot {
                pointer: Vec2::new(0.5, 0.0),
                scroll: 0.4,
            },
        );
        for n in mesh.normals() {
            assert!((n.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_origin_vertex_stays_finite() {
        let mut mesh = LiquidMesh::from_vertices(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![0, 1, 2],
        );
        mesh.deform(
            5.0,
            InputSnapshot {
                pointer: Vec2::new(-0.9, 0.4),
                scroll: 0.8,
            },
        );
        for v in mesh.positions() {
            assert!(v.is_finite());
        }
    }

    #[test]
    fn test_scroll_deform_vanishes_at_zero() {
        let mesh = LiquidMesh::icosphere(1.0, 0);
        let v = mesh.base_positions()[3];
        let t = 2.3;

        // At scroll 0 the factor must reduce to the two waves plus the
        // pointer term alone.
        let d = v.length();
        let expected = 1.0
            + (d * 3.0 - 2.0 * t).sin() * 0.08
            + (d * 2.0 + 1.5 * t).cos() * 0.05
            + (1.0 - v.x.abs() / 2.0).max(0.0) * 0.1;

        let got = mesh.scale_factor(v, t, neutral());
        assert!((got - expected).abs() < 1e-6);
    }

    #[test]
    fn test_dirty_flag_consumed() {
        let mut mesh = LiquidMesh::icosphere(1.0, 0);
        assert!(mesh.take_dirty());
        assert!(!mesh.take_dirty());

        mesh.deform(0.1, neutral());
        assert!(mesh.take_dirty());
        assert!(!mesh.take_dirty());
    }
}
