// src/math/bezier.rs
//! Cubic Bézier evaluation and flattening.

use glam::Vec2;

/// A single cubic Bézier segment: two endpoints and two control points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub from: Vec2,
    pub ctrl1: Vec2,
    pub ctrl2: Vec2,
    pub to: Vec2,
}

impl CubicSegment {
    pub const fn new(from: Vec2, ctrl1: Vec2, ctrl2: Vec2, to: Vec2) -> Self {
        Self { from, ctrl1, ctrl2, to }
    }

    /// A straight segment expressed as a cubic with controls on the chord.
    pub fn line(from: Vec2, to: Vec2) -> Self {
        Self::new(from, from.lerp(to, 1.0 / 3.0), from.lerp(to, 2.0 / 3.0), to)
    }

    /// Evaluates the curve at `t` in [0, 1] (Bernstein form).
    #[inline]
    pub fn point(&self, t: f32) -> Vec2 {
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let t2 = t * t;
        self.from * (mt2 * mt)
            + self.ctrl1 * (3.0 * mt2 * t)
            + self.ctrl2 * (3.0 * mt * t2)
            + self.to * (t2 * t)
    }

    /// True when all four points coincide.
    pub fn is_degenerate(&self) -> bool {
        const EPS: f32 = 1e-6;
        self.from.distance_squared(self.to) < EPS
            && self.from.distance_squared(self.ctrl1) < EPS
            && self.from.distance_squared(self.ctrl2) < EPS
    }

    /// Samples `divisions` points at t = 1/d, 2/d, ..., 1.
    ///
    /// The start point is excluded so consecutive segments can be chained
    /// without duplicating their shared endpoint.
    pub fn sample_into(&self, divisions: usize, out: &mut Vec<Vec2>) {
        let divisions = divisions.max(1);
        for i in 1..=divisions {
            out.push(self.point(i as f32 / divisions as f32));
        }
    }
}

/// Signed area of a closed polygon (positive = counter-clockwise).
pub fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        twice += a.perp_dot(b);
    }
    0.5 * twice
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        let seg = CubicSegment::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(0.25, 1.0),
            Vec2::new(0.75, 1.0),
            Vec2::new(1.0, 0.0),
        );
        assert_eq!(seg.point(0.0), seg.from);
        assert_eq!(seg.point(1.0), seg.to);
    }

    #[test]
    fn test_symmetric_midpoint() {
        let seg = CubicSegment::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(0.25, 1.0),
            Vec2::new(0.75, 1.0),
            Vec2::new(1.0, 0.0),
        );
        let mid = seg.point(0.5);
        assert!((mid.x - 0.5).abs() < 1e-6);
        assert!((mid.y - 0.75).abs() < 1e-6);
        // Symmetric arch: mirrored parameters give mirrored points.
        let (l, r) = (seg.point(0.3), seg.point(0.7));
        assert!((l.x + r.x - 1.0).abs() < 1e-6);
        assert!((l.y - r.y).abs() < 1e-6);
    }

    #[test]
    fn test_line_is_straight() {
        let seg = CubicSegment::line(Vec2::ZERO, Vec2::new(2.0, 4.0));
        for i in 0..=8 {
            let p = seg.point(i as f32 / 8.0);
            assert!((p.y - 2.0 * p.x).abs() < 1e-5);
        }
    }

    #[test]
    fn test_sample_excludes_start() {
        let seg = CubicSegment::line(Vec2::ZERO, Vec2::X);
        let mut out = Vec::new();
        seg.sample_into(4, &mut out);
        assert_eq!(out.len(), 4);
        assert!((out[0].x - 0.25).abs() < 1e-6);
        assert_eq!(out[3], Vec2::X);
    }

    #[test]
    fn test_degenerate() {
        let p = Vec2::new(0.5, 0.5);
        assert!(CubicSegment::new(p, p, p, p).is_degenerate());
        assert!(!CubicSegment::line(p, Vec2::ZERO).is_degenerate());
    }

    #[test]
    fn test_signed_area_orientation() {
        let ccw = [Vec2::ZERO, Vec2::X, Vec2::ONE, Vec2::Y];
        assert!((signed_area(&ccw) - 1.0).abs() < 1e-6);

        let mut cw = ccw;
        cw.reverse();
        assert!((signed_area(&cw) + 1.0).abs() < 1e-6);
    }
}
