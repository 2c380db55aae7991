use crate::geometry::{CardinalDirection, LineSegment, Rect};

/// One edge of a building outline.
///
/// Edges traced from a wall carry its id and direction; corner connectors
/// inserted while chaining carry neither.
#[derive(Debug, Clone, PartialEq)]
pub struct PerimeterEdge {
    pub segment: LineSegment,
    pub wall_id: Option<String>,
    pub direction: Option<CardinalDirection>,
}

/// A closed, simplified, counter-clockwise building outline.
#[derive(Debug, Clone, PartialEq)]
pub struct PerimeterChain {
    pub edges: Vec<PerimeterEdge>,
    pub bounds: Rect,
}
