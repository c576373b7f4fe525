// src/scene/outline.rs
//! The 2D heart silhouette.
//!
//! The outline is a closed chain of cubic Bézier segments. Six of them are
//! hand-tuned curves; the seventh closes the chain back to the start point
//! and is zero-length for the default heart, since the last curve already
//! lands on the start.

use crate::math::{signed_area, CubicSegment};
use glam::Vec2;

/// A closed path of cubic segments.
#[derive(Debug, Clone)]
pub struct HeartOutline {
    segments: Vec<CubicSegment>,
}

impl HeartOutline {
    /// Builds a closed outline from a start point and a chain of
    /// `(ctrl1, ctrl2, to)` curve triples. The closing segment is appended
    /// automatically.
    pub fn from_curves(start: Vec2, curves: &[(Vec2, Vec2, Vec2)]) -> Self {
        let mut segments = Vec::with_capacity(curves.len() + 1);
        let mut cursor = start;
        for &(ctrl1, ctrl2, to) in curves {
            segments.push(CubicSegment::new(cursor, ctrl1, ctrl2, to));
            cursor = to;
        }
        segments.push(CubicSegment::line(cursor, start));
        Self { segments }
    }

    /// The fixed heart silhouette, spanning roughly x ∈ [-0.6, 1.6] and
    /// y ∈ [0, 1.9] with its notch at (0.5, 0.5).
    pub fn heart() -> Self {
        let p = Vec2::new;
        Self::from_curves(
            p(0.5, 0.5),
            &[
                (p(0.5, 0.5), p(0.4, 0.0), p(0.0, 0.0)),
                (p(-0.6, 0.0), p(-0.6, 0.7), p(-0.6, 0.7)),
                (p(-0.6, 1.1), p(-0.3, 1.54), p(0.5, 1.9)),
                (p(1.2, 1.54), p(1.6, 1.1), p(1.6, 0.7)),
                (p(1.6, 0.7), p(1.6, 0.0), p(1.0, 0.0)),
                (p(0.7, 0.0), p(0.5, 0.5), p(0.5, 0.5)),
            ],
        )
    }

    pub fn segments(&self) -> &[CubicSegment] {
        &self.segments
    }

    pub fn start(&self) -> Vec2 {
        self.segments.first().map_or(Vec2::ZERO, |s| s.from)
    }

    pub fn is_closed(&self) -> bool {
        match (self.segments.first(), self.segments.last()) {
            (Some(first), Some(last)) => first.from.distance_squared(last.to) < 1e-12,
            _ => false,
        }
    }

    /// Flattens the outline into a polygon.
    ///
    /// Each curved segment contributes `divisions` points; degenerate
    /// segments contribute nothing. Consecutive duplicates and a trailing
    /// point equal to the first are removed, and the result is wound
    /// counter-clockwise.
    pub fn flatten(&self, divisions: usize) -> Vec<Vec2> {
        let mut points = vec![self.start()];
        for seg in &self.segments {
            if seg.is_degenerate() {
                continue;
            }
            seg.sample_into(divisions, &mut points);
        }

        points.dedup_by(|b, a| a.distance_squared(*b) < 1e-12);
        while points.len() > 1
            && points[0].distance_squared(points[points.len() - 1]) < 1e-12
        {
            points.pop();
        }

        if signed_area(&points) < 0.0 {
            points.reverse();
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heart_has_seven_segments_and_closes() {
        let outline = HeartOutline::heart();
        assert_eq!(outline.segments().len(), 7);
        assert!(outline.is_closed());
        assert!(outline.segments()[6].is_degenerate());
    }

    #[test]
    fn test_segments_are_chained() {
        let outline = HeartOutline::heart();
        for w in outline.segments().windows(2) {
            assert_eq!(w[0].to, w[1].from);
        }
    }

    #[test]
    fn test_flatten_is_ccw_without_duplicates() {
        let poly = HeartOutline::heart().flatten(12);
        // six curves, twelve samples each, closing point removed
        assert_eq!(poly.len(), 72);
        assert!(signed_area(&poly) > 0.0);

        for i in 0..poly.len() {
            let next = poly[(i + 1) % poly.len()];
            assert!(poly[i].distance(next) > 1e-6);
        }
    }

    #[test]
    fn test_flatten_bounds() {
        let poly = HeartOutline::heart().flatten(12);
        let min = poly.iter().fold(Vec2::splat(f32::MAX), |m, p| m.min(*p));
        let max = poly.iter().fold(Vec2::splat(f32::MIN), |m, p| m.max(*p));
        assert!((min.x + 0.6).abs() < 1e-5);
        assert!((max.x - 1.6).abs() < 1e-5);
        assert!(min.y.abs() < 1e-5);
        assert!((max.y - 1.9).abs() < 1e-5);
    }

    #[test]
    fn test_square_from_lines_keeps_closing_edge() {
        let p = Vec2::new;
        let line = |a: Vec2, b: Vec2| (a.lerp(b, 1.0 / 3.0), a.lerp(b, 2.0 / 3.0), b);
        let outline = HeartOutline::from_curves(
            p(0.0, 0.0),
            &[line(p(0.0, 0.0), p(1.0, 0.0)), line(p(1.0, 0.0), p(1.0, 1.0)), line(p(1.0, 1.0), p(0.0, 1.0))],
        );
        // The closing edge (0,1) -> (0,0) is real here, not degenerate.
        assert!(!outline.segments()[3].is_degenerate());
        let poly = outline.flatten(1);
        assert_eq!(poly.len(), 4);
        assert!((signed_area(&poly) - 1.0).abs() < 1e-6);
    }
}
