use super::{coord_eq, Point2};

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Rotates a closed polygon so it starts at the bottommost vertex (smallest y),
/// breaking ties by smallest x. Ensures deterministic output for rendering and tests.
#[must_use]
pub fn rotate_to_canonical_start(points: &[Point2]) -> Vec<Point2> {
    if points.len() < 2 {
        return points.to_vec();
    }
    let mut best = 0;
    for (i, pt) in points.iter().enumerate().skip(1) {
        let b = &points[best];
        if (pt.y < b.y && !coord_eq(pt.y, b.y)) || (coord_eq(pt.y, b.y) && pt.x < b.x) {
            best = i;
        }
    }
    let mut rotated = Vec::with_capacity(points.len());
    rotated.extend_from_slice(&points[best..]);
    rotated.extend_from_slice(&points[..best]);
    rotated
}

/// Removes collinear vertices from a closed axis-aligned polygon.
///
/// A vertex is collinear when it shares its X with both neighbours or its Y
/// with both neighbours. Repeats until stable so runs of collinear vertices
/// collapse fully.
#[must_use]
pub fn remove_axis_collinear(points: &[Point2]) -> Vec<Point2> {
    let mut current = points.to_vec();
    loop {
        let n = current.len();
        if n < 4 {
            return current;
        }
        let kept: Vec<Point2> = (0..n)
            .filter(|&i| {
                let prev = &current[(i + n - 1) % n];
                let cur = &current[i];
                let next = &current[(i + 1) % n];
                let same_x = coord_eq(prev.x, cur.x) && coord_eq(cur.x, next.x);
                let same_y = coord_eq(prev.y, cur.y) && coord_eq(cur.y, next.y);
                !(same_x || same_y)
            })
            .map(|i| current[i])
            .collect();
        if kept.len() == n {
            return kept;
        }
        current = kept;
    }
}
