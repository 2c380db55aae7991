pub mod direction;
pub mod rect;
pub mod segment;

pub use direction::{CardinalDirection, Corner, DirectionMap};
pub use rect::Rect;
pub use segment::LineSegment;
