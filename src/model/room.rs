use crate::geometry::{CardinalDirection, Corner, Rect};
use crate::math::Point2;

/// How an enclosure is anchored in its parent room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnclosureAnchor {
    Corner(Corner),
    Wall(CardinalDirection),
}

/// A closet-like space carved out of a room's interior.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEnclosure {
    pub id: String,
    pub label: String,
    pub parent_room_id: String,
    pub bounds: Rect,
    /// Side of the enclosure that opens onto the parent room.
    pub facing: CardinalDirection,
    pub anchor: EnclosureAnchor,
}

/// A bump-out added beyond one of a room's walls.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedExtension {
    pub id: String,
    pub label: String,
    pub parent_room_id: String,
    pub bounds: Rect,
    /// The parent wall the extension projects through.
    pub parent_wall: CardinalDirection,
}

/// A placed room.
///
/// `bounds` is the interior clear space: its size always equals the
/// configured width and height, walls lie outside it.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRoom {
    pub id: String,
    pub label: String,
    pub bounds: Rect,
    pub label_position: Point2,
    /// Visible boundary (bounds plus extensions minus enclosures), CCW,
    /// starting at the lowest then leftmost vertex.
    pub composite_outline: Option<Vec<Point2>>,
    pub enclosures: Vec<ResolvedEnclosure>,
    pub extensions: Vec<ResolvedExtension>,
}
