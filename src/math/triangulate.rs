// src/math/triangulate.rs
//! Ear-clipping triangulation of simple polygons.
//!
//! Used to build the lids of the extruded heart. The input must be a simple
//! polygon wound counter-clockwise; the returned triangles keep that winding.

use glam::Vec2;

/// Triangulates a counter-clockwise simple polygon.
///
/// Returns index triples into `points`. A polygon with fewer than three
/// vertices yields no triangles. Every boundary edge of the polygon appears
/// in exactly one triangle, so the result stitches watertight onto walls
/// built from the same outline. Collinear vertices are only clipped once no
/// proper ear is left, as zero-area triangles. If no ear can be found at all
/// the remaining vertices are closed with a fan.
pub fn ear_clip(points: &[Vec2]) -> Vec<[u32; 3]> {
    let n = points.len();
    if n < 3 {
        return Vec::new();
    }

    let mut triangles = Vec::with_capacity(n - 2);
    let mut remaining: Vec<usize> = (0..n).collect();

    while remaining.len() > 3 {
        let len = remaining.len();
        let corner = |i: usize| {
            let prev = remaining[(i + len - 1) % len];
            let next = remaining[(i + 1) % len];
            (prev, remaining[i], next)
        };

        let ear = (0..len).find(|&i| {
            let (prev, curr, next) = corner(i);
            let (a, b, c) = (points[prev], points[curr], points[next]);
            if turn(a, b, c) <= collinear_tolerance(a, b) {
                return false;
            }
            !remaining.iter().any(|&j| {
                j != prev
                    && j != curr
                    && j != next
                    && points[j] != a
                    && points[j] != b
                    && points[j] != c
                    && point_in_triangle(points[j], a, b, c)
            })
        });
        let clipped = ear.or_else(|| {
            (0..len).find(|&i| {
                let (prev, curr, next) = corner(i);
                let (a, b, c) = (points[prev], points[curr], points[next]);
                turn(a, b, c).abs() <= collinear_tolerance(a, b)
            })
        });

        match clipped {
            Some(i) => {
                let (prev, curr, next) = corner(i);
                triangles.push([prev as u32, curr as u32, next as u32]);
                remaining.remove(i);
            }
            None => {
                log::warn!(
                    "ear clipping stalled with {} vertices left, closing with a fan",
                    remaining.len()
                );
                let anchor = remaining[0];
                for w in remaining[1..].windows(2) {
                    triangles.push([anchor as u32, w[0] as u32, w[1] as u32]);
                }
                return triangles;
            }
        }
    }

    triangles.push([remaining[0] as u32, remaining[1] as u32, remaining[2] as u32]);
    triangles
}

#[inline]
fn turn(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).perp_dot(c - b)
}

#[inline]
fn collinear_tolerance(a: Vec2, b: Vec2) -> f32 {
    f32::EPSILON * (b - a).length_squared().max(1.0)
}

fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let d1 = (b - a).perp_dot(p - a);
    let d2 = (c - b).perp_dot(p - b);
    let d3 = (a - c).perp_dot(p - c);
    d1 >= 0.0 && d2 >= 0.0 && d3 >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::bezier::signed_area;

    fn area_of(points: &[Vec2], tris: &[[u32; 3]]) -> f32 {
        tris.iter()
            .map(|t| {
                signed_area(&[
                    points[t[0] as usize],
                    points[t[1] as usize],
                    points[t[2] as usize],
                ])
            })
            .sum()
    }

    #[test]
    fn test_square() {
        let square = [Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y];
        let tris = ear_clip(&square);
        assert_eq!(tris.len(), 2);
        assert!((area_of(&square, &tris) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_concave_keeps_area_and_winding() {
        // An "L" shape: area 3
        let shape = [
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 2.0),
            Vec2::new(0.0, 2.0),
        ];
        let tris = ear_clip(&shape);
        assert_eq!(tris.len(), shape.len() - 2);
        for t in &tris {
            let a = signed_area(&[shape[t[0] as usize], shape[t[1] as usize], shape[t[2] as usize]]);
            assert!(a >= 0.0, "triangle {:?} flipped", t);
        }
        assert!((area_of(&shape, &tris) - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_collinear_vertex_keeps_boundary_edges() {
        // Square with an extra vertex in the middle of the bottom edge.
        let shape = [
            Vec2::new(0.0, 0.0),
            Vec2::new(0.5, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        let tris = ear_clip(&shape);
        assert_eq!(tris.len(), shape.len() - 2);
        assert!((area_of(&shape, &tris) - 1.0).abs() < 1e-6);

        let n = shape.len() as u32;
        for i in 0..n {
            let edge = (i, (i + 1) % n);
            let found = tris.iter().any(|t| {
                [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])].contains(&edge)
            });
            assert!(found, "boundary edge {:?} missing", edge);
        }
    }

    #[test]
    fn test_too_few_points() {
        assert!(ear_clip(&[Vec2::ZERO, Vec2::X]).is_empty());
    }
}
