use crate::math::interval::Interval;
use crate::math::{Point2, CONTAINMENT_EPSILON};

use super::CardinalDirection;

/// An axis-aligned rectangle in plan coordinates (Y up).
///
/// `(x, y)` is the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle spanning two opposite corners in any order.
    #[must_use]
    pub fn from_corners(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::new(x0.min(x1), y0.min(y1), (x1 - x0).abs(), (y1 - y0).abs())
    }

    /// Smallest rectangle containing every point, or `None` for an empty slice.
    #[must_use]
    pub fn bounding(points: &[Point2]) -> Option<Self> {
        let first = points.first()?;
        let (mut x0, mut y0, mut x1, mut y1) = (first.x, first.y, first.x, first.y);
        for p in &points[1..] {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }
        Some(Self::from_corners(x0, y0, x1, y1))
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point2 {
        Point2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Returns `true` when either side has no length.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.width <= CONTAINMENT_EPSILON || self.height <= CONTAINMENT_EPSILON
    }

    /// Coordinate of the edge on the given side.
    #[must_use]
    pub fn edge(&self, side: CardinalDirection) -> f64 {
        match side {
            CardinalDirection::North => self.top(),
            CardinalDirection::South => self.y,
            CardinalDirection::East => self.right(),
            CardinalDirection::West => self.x,
        }
    }

    /// Extent along the axis a wall on `side` runs: X for north/south,
    /// Y for east/west.
    #[must_use]
    pub fn axis_range(&self, side: CardinalDirection) -> Interval {
        if side.is_horizontal() {
            (self.x, self.right())
        } else {
            (self.y, self.top())
        }
    }

    /// Returns `true` if the point lies inside or on the boundary.
    #[must_use]
    pub fn contains_point(&self, p: &Point2) -> bool {
        p.x >= self.x - CONTAINMENT_EPSILON
            && p.x <= self.right() + CONTAINMENT_EPSILON
            && p.y >= self.y - CONTAINMENT_EPSILON
            && p.y <= self.top() + CONTAINMENT_EPSILON
    }

    /// Returns `true` if `other` lies entirely within `self`.
    #[must_use]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x - CONTAINMENT_EPSILON
            && other.y >= self.y - CONTAINMENT_EPSILON
            && other.right() <= self.right() + CONTAINMENT_EPSILON
            && other.top() <= self.top() + CONTAINMENT_EPSILON
    }

    /// Returns `true` if the interiors intersect with positive area.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        let dx = self.right().min(other.right()) - self.x.max(other.x);
        let dy = self.top().min(other.top()) - self.y.max(other.y);
        dx > CONTAINMENT_EPSILON && dy > CONTAINMENT_EPSILON
    }

    /// Returns `true` if the closed rectangles touch or overlap.
    #[must_use]
    pub fn touches(&self, other: &Rect) -> bool {
        self.x <= other.right() + CONTAINMENT_EPSILON
            && other.x <= self.right() + CONTAINMENT_EPSILON
            && self.y <= other.top() + CONTAINMENT_EPSILON
            && other.y <= self.top() + CONTAINMENT_EPSILON
    }

    /// Smallest rectangle covering both.
    #[must_use]
    pub fn union(&self, other: &Rect) -> Rect {
        Self::from_corners(
            self.x.min(other.x),
            self.y.min(other.y),
            self.right().max(other.right()),
            self.top().max(other.top()),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn edges_and_axis_ranges() {
        let r = Rect::new(1.0, 2.0, 10.0, 5.0);
        assert_abs_diff_eq!(r.edge(CardinalDirection::North), 7.0, epsilon = 1e-9);
        assert_abs_diff_eq!(r.edge(CardinalDirection::East), 11.0, epsilon = 1e-9);
        assert_eq!(r.axis_range(CardinalDirection::South), (1.0, 11.0));
        assert_eq!(r.axis_range(CardinalDirection::West), (2.0, 7.0));
    }

    #[test]
    fn shared_edge_is_not_overlap() {
        let a = Rect::new(0.0, 0.0, 4.0, 4.0);
        let b = Rect::new(4.0, 0.0, 4.0, 4.0);
        assert!(!a.overlaps(&b));
        assert!(a.touches(&b));
    }

    #[test]
    fn bounding_points() {
        let r = Rect::bounding(&[Point2::new(3.0, -1.0), Point2::new(-2.0, 4.0)]).unwrap();
        assert_abs_diff_eq!(r.x, -2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(r.height, 5.0, epsilon = 1e-9);
        assert!(Rect::bounding(&[]).is_none());
    }
}
