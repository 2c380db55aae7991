pub mod interval;
pub mod intersect_2d;
pub mod polygon_2d;

/// 2D point type, plan-absolute with Y pointing up.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Two coordinates closer than this are the same coordinate.
///
/// Used for endpoint matching when chaining polygon edges.
pub const COORD_EPSILON: f64 = 1e-6;

/// Slack for geometric containment, overlap, and adjacency checks.
pub const CONTAINMENT_EPSILON: f64 = 1e-3;

/// Perpendicular distance under which parallel building edges are clustered
/// into one dimension group, in feet.
pub const CLUSTER_EPSILON_FT: f64 = 0.5;

/// Perpendicular distance under which parallel building edges are clustered
/// into one dimension group, in meters.
pub const CLUSTER_EPSILON_M: f64 = 0.15;

/// Returns `true` if `a` and `b` are equal within [`COORD_EPSILON`].
#[must_use]
pub fn coord_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < COORD_EPSILON
}

/// Returns `true` if two points coincide within [`COORD_EPSILON`] on both axes.
#[must_use]
pub fn point_eq(a: &Point2, b: &Point2) -> bool {
    coord_eq(a.x, b.x) && coord_eq(a.y, b.y)
}
