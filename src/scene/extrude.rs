// src/scene/extrude.rs
//! Extrusion of a 2D contour into a closed, beveled solid.
//!
//! The solid is built as a stack of rings, each a copy of the contour pushed
//! outward along per-vertex miter vectors and placed at some depth:
//!
//! ```text
//!  z = -thickness ........ front bevel rings (offset grows 0 -> size)
//!  z = 0 .. depth ........ base ring + step rings (full offset)
//!  z = depth + thickness . back bevel rings (offset shrinks size -> 0)
//! ```
//!
//! Adjacent rings are stitched with quads and the first/last ring are
//! capped with an ear-clipped lid.

use crate::math::ear_clip;
use glam::{Vec2, Vec3};
use std::f32::consts::{FRAC_PI_2, SQRT_2};

#[derive(Debug, Clone, PartialEq)]
pub struct ExtrudeSettings {
    /// Length of the straight part of the solid along +Z.
    pub depth: f32,
    pub bevel_enabled: bool,
    /// How far the bevel extends in front of z=0 and behind z=depth.
    pub bevel_thickness: f32,
    /// How far the bevel pushes the outline outward.
    pub bevel_size: f32,
    pub bevel_offset: f32,
    pub bevel_segments: usize,
    /// Subdivisions of the straight part.
    pub steps: usize,
    /// Samples per curved outline segment.
    pub curve_segments: usize,
}

impl Default for ExtrudeSettings {
    fn default() -> Self {
        Self {
            depth: 0.4,
            bevel_enabled: true,
            bevel_thickness: 0.1,
            bevel_size: 0.1,
            bevel_offset: 0.0,
            bevel_segments: 10,
            steps: 2,
            curve_segments: 12,
        }
    }
}

/// A ring of the extrusion: depth along Z and outward offset of the contour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub z: f32,
    pub offset: f32,
}

/// Depth/offset of every ring, front to back.
pub fn ring_profile(settings: &ExtrudeSettings) -> Vec<Ring> {
    let steps = settings.steps.max(1);
    let bevel_segments = if settings.bevel_enabled { settings.bevel_segments } else { 0 };
    let mut rings = Vec::with_capacity(2 * bevel_segments + steps + 1);

    let bevel_ring = |b: usize| {
        let t = b as f32 / bevel_segments as f32;
        (
            settings.bevel_thickness * (t * FRAC_PI_2).cos(),
            settings.bevel_size * (t * FRAC_PI_2).sin() + settings.bevel_offset,
        )
    };

    for b in 0..bevel_segments {
        let (dz, offset) = bevel_ring(b);
        rings.push(Ring { z: -dz, offset });
    }

    let full = if settings.bevel_enabled { settings.bevel_size + settings.bevel_offset } else { 0.0 };
    for s in 0..=steps {
        rings.push(Ring { z: settings.depth * s as f32 / steps as f32, offset: full });
    }

    for b in (0..bevel_segments).rev() {
        let (dz, offset) = bevel_ring(b);
        rings.push(Ring { z: settings.depth + dz, offset });
    }

    rings
}

/// Outward miter vector at `pt` for a counter-clockwise contour.
///
/// Moving `pt` by `offset * miter` keeps both adjacent edges parallel to the
/// originals at distance `offset`. The vector is capped at length √2 so
/// sharp corners do not spike; a hairpin turn pushes along the incoming edge.
pub fn bevel_vector(prev: Vec2, pt: Vec2, next: Vec2) -> Vec2 {
    let d_in = (pt - prev).normalize_or_zero();
    let d_out = (next - pt).normalize_or_zero();
    let n_in = Vec2::new(d_in.y, -d_in.x);
    let n_out = Vec2::new(d_out.y, -d_out.x);

    let denom = 1.0 + n_in.dot(n_out);
    if denom <= 1e-6 {
        return d_in * SQRT_2;
    }

    let miter = (n_in + n_out) / denom;
    let len2 = miter.length_squared();
    if len2 > 2.0 {
        miter * (2.0 / len2).sqrt()
    } else {
        miter
    }
}

/// Interleaved vertex for the lit and glow pipelines.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl MeshVertex {
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRS: [wgpu::VertexAttribute; 2] =
            wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRS,
        }
    }
}

/// An indexed triangle mesh produced by [`extrude`].
#[derive(Debug, Clone, Default)]
pub struct ExtrudedMesh {
    positions: Vec<Vec3>,
    indices: Vec<u32>,
    ring_len: usize,
    ring_count: usize,
}

impl ExtrudedMesh {
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertices per ring (the flattened contour length).
    pub fn ring_len(&self) -> usize {
        self.ring_len
    }

    pub fn ring_count(&self) -> usize {
        self.ring_count
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| {
            [
                self.positions[t[0] as usize],
                self.positions[t[1] as usize],
                self.positions[t[2] as usize],
            ]
        })
    }

    /// Unwelded triangle list with one face normal per triangle.
    pub fn flat_vertices(&self) -> Vec<MeshVertex> {
        let mut out = Vec::with_capacity(self.indices.len());
        for [a, b, c] in self.triangles() {
            let normal = (b - a).cross(c - a).normalize_or_zero().to_array();
            for p in [a, b, c] {
                out.push(MeshVertex { position: p.to_array(), normal });
            }
        }
        out
    }

    /// Signed enclosed volume; positive when faces wind outward.
    pub fn signed_volume(&self) -> f32 {
        self.triangles().map(|[a, b, c]| a.dot(b.cross(c))).sum::<f32>() / 6.0
    }

    pub fn bounds(&self) -> (Vec3, Vec3) {
        self.positions.iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(lo, hi), p| (lo.min(*p), hi.max(*p)),
        )
    }
}

/// Extrudes a counter-clockwise contour along +Z.
pub fn extrude(contour: &[Vec2], settings: &ExtrudeSettings) -> ExtrudedMesh {
    let n = contour.len();
    if n < 3 {
        return ExtrudedMesh::default();
    }

    let miters: Vec<Vec2> = (0..n)
        .map(|i| bevel_vector(contour[(i + n - 1) % n], contour[i], contour[(i + 1) % n]))
        .collect();

    let rings = ring_profile(settings);
    let mut positions = Vec::with_capacity(rings.len() * n);
    for ring in &rings {
        for (p, m) in contour.iter().zip(&miters) {
            positions.push((*p + *m * ring.offset).extend(ring.z));
        }
    }

    let lid = ear_clip(contour);
    let mut indices = Vec::with_capacity(3 * (2 * lid.len() + 2 * n * (rings.len() - 1)));

    // Front lid faces -Z: reverse the counter-clockwise lid winding.
    for t in &lid {
        indices.extend_from_slice(&[t[2], t[1], t[0]]);
    }

    let last = ((rings.len() - 1) * n) as u32;
    for t in &lid {
        indices.extend_from_slice(&[t[0] + last, t[1] + last, t[2] + last]);
    }

    for r in 0..rings.len() - 1 {
        let lo = (r * n) as u32;
        let hi = ((r + 1) * n) as u32;
        for i in 0..n as u32 {
            let j = (i + 1) % n as u32;
            let (a, b, c, d) = (lo + i, lo + j, hi + j, hi + i);
            indices.extend_from_slice(&[a, b, c, a, c, d]);
        }
    }

    log::debug!(
        "extruded contour: {} verts/ring, {} rings, {} triangles",
        n,
        rings.len(),
        indices.len() / 3
    );

    ExtrudedMesh { positions, indices, ring_len: n, ring_count: rings.len() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::outline::HeartOutline;
    use std::collections::HashMap;

    fn square() -> Vec<Vec2> {
        vec![Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y]
    }

    #[test]
    fn test_ring_profile_layout() {
        let settings = ExtrudeSettings::default();
        let rings = ring_profile(&settings);
        assert_eq!(rings.len(), 2 * 10 + 2 + 1);

        let first = rings.first().unwrap();
        let last = rings.last().unwrap();
        assert!((first.z + 0.1).abs() < 1e-6);
        assert!((last.z - 0.5).abs() < 1e-6);
        assert_eq!(first.offset, 0.0);
        assert_eq!(last.offset, 0.0);

        // z strictly increases front to back
        for w in rings.windows(2) {
            assert!(w[1].z > w[0].z);
        }
        // straight part sits at full bevel size
        assert!((rings[10].z).abs() < 1e-6);
        assert!((rings[10].offset - 0.1).abs() < 1e-6);
        assert!((rings[12].z - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_ring_profile_without_bevel() {
        let settings = ExtrudeSettings { bevel_enabled: false, ..Default::default() };
        let rings = ring_profile(&settings);
        assert_eq!(rings.len(), 3);
        assert!(rings.iter().all(|r| r.offset == 0.0));
    }

    #[test]
    fn test_bevel_vector_square_corner() {
        // Counter-clockwise square corner at (1,0): outward is (+1,-1).
        let m = bevel_vector(Vec2::ZERO, Vec2::X, Vec2::ONE);
        assert!((m - Vec2::new(1.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_bevel_vector_straight_edge() {
        let m = bevel_vector(Vec2::ZERO, Vec2::X, Vec2::new(2.0, 0.0));
        assert!((m - Vec2::new(0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_bevel_vector_capped() {
        // Very sharp spike: length is clamped to sqrt(2).
        let m = bevel_vector(Vec2::new(-1.0, -0.05), Vec2::ZERO, Vec2::new(-1.0, 0.05));
        assert!(m.length() <= SQRT_2 + 1e-5);
    }

    #[test]
    fn test_square_box_volume() {
        let settings = ExtrudeSettings { bevel_enabled: false, steps: 1, depth: 2.0, ..Default::default() };
        let mesh = extrude(&square(), &settings);
        assert!((mesh.signed_volume() - 2.0).abs() < 1e-5);
        assert_eq!(mesh.triangle_count(), 2 * 2 + 4 * 2);
    }

    /// Every directed edge must be matched by its reverse exactly once.
    fn assert_closed(mesh: &ExtrudedMesh) {
        let mut edges: HashMap<(u32, u32), i32> = HashMap::new();
        for t in mesh.indices().chunks_exact(3) {
            for (a, b) in [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])] {
                *edges.entry((a, b)).or_insert(0) += 1;
            }
        }
        for (&(a, b), &count) in &edges {
            assert_eq!(count, 1, "edge {}->{} used {} times", a, b, count);
            assert_eq!(edges.get(&(b, a)), Some(&1), "edge {}->{} has no twin", a, b);
        }
    }

    #[test]
    fn test_heart_is_closed_and_outward() {
        let settings = ExtrudeSettings::default();
        let contour = HeartOutline::heart().flatten(settings.curve_segments);
        let mesh = extrude(&contour, &settings);

        assert_eq!(mesh.ring_count(), 23);
        assert_eq!(mesh.ring_len(), contour.len());
        assert_closed(&mesh);
        assert!(mesh.signed_volume() > 0.0);
    }

    #[test]
    fn test_heart_stays_closed_at_fine_tessellation() {
        for segments in [4, 24, 48, 64] {
            let settings = ExtrudeSettings { curve_segments: segments, ..Default::default() };
            let contour = HeartOutline::heart().flatten(segments);
            let mesh = extrude(&contour, &settings);
            assert_closed(&mesh);
            assert!(mesh.signed_volume() > 0.0, "{} segments", segments);
        }
    }

    #[test]
    fn test_heart_bounds_include_bevel() {
        let settings = ExtrudeSettings::default();
        let contour = HeartOutline::heart().flatten(settings.curve_segments);
        let (lo, hi) = extrude(&contour, &settings).bounds();

        assert!((lo.z + 0.1).abs() < 1e-5);
        assert!((hi.z - 0.5).abs() < 1e-5);
        assert!((hi.x - 1.7).abs() < 0.01);
        assert!((lo.x + 0.7).abs() < 0.01);
        assert!((hi.y - 1.9).abs() < 0.15);
    }

    #[test]
    fn test_flat_vertices_have_unit_normals() {
        let settings = ExtrudeSettings::default();
        let contour = HeartOutline::heart().flatten(settings.curve_segments);
        let mesh = extrude(&contour, &settings);
        let verts = mesh.flat_vertices();
        assert_eq!(verts.len(), mesh.indices().len());
        for v in &verts {
            let len = Vec3::from_array(v.normal).length();
            assert!((len - 1.0).abs() < 1e-3, "normal length {}", len);
        }
    }

    #[test]
    fn test_degenerate_contour() {
        let mesh = extrude(&[Vec2::ZERO, Vec2::X], &ExtrudeSettings::default());
        assert_eq!(mesh.triangle_count(), 0);
    }
}
