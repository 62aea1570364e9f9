//! Coordinate-space math on stroke points.

use crate::stroke::Stroke;
use kurbo::{Point, Vec2};

/// Extra hit radius in pixels added to half the stroke width.
pub const HIT_TOLERANCE: f64 = 5.0;

/// Arithmetic mean of the points, used as the rotation pivot.
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
    Some((sum / points.len() as f64).to_point())
}

/// Rotate every point by `angle` radians around `pivot`.
pub fn rotate(points: &mut [Point], pivot: Point, angle: f64) {
    let (sin, cos) = angle.sin_cos();
    for point in points.iter_mut() {
        let dx = point.x - pivot.x;
        let dy = point.y - pivot.y;
        point.x = pivot.x + dx * cos - dy * sin;
        point.y = pivot.y + dx * sin + dy * cos;
    }
}

/// Offset every point by `delta`.
pub fn translate(points: &mut [Point], delta: Vec2) {
    for point in points.iter_mut() {
        *point += delta;
    }
}

/// Angle in radians of the ray from `pivot` to `point`.
pub fn angle_from(pivot: Point, point: Point) -> f64 {
    (point.y - pivot.y).atan2(point.x - pivot.x)
}

/// Find the topmost stroke with a point near `query`.
///
/// Strokes are scanned back to front so later strokes win. A point hits when it lies
/// closer than half the stroke width plus [`HIT_TOLERANCE`].
pub fn hit_test(query: Point, strokes: &[Stroke]) -> Option<usize> {
    hit_test_with_tolerance(query, strokes, HIT_TOLERANCE)
}

/// [`hit_test`] with a caller-supplied tolerance.
pub fn hit_test_with_tolerance(query: Point, strokes: &[Stroke], tolerance: f64) -> Option<usize> {
    strokes.iter().enumerate().rev().find_map(|(index, stroke)| {
        let radius = stroke.width / 2.0 + tolerance;
        stroke
            .points
            .iter()
            .any(|p| p.distance(query) < radius)
            .then_some(index)
    })
}
