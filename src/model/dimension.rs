use crate::geometry::CardinalDirection;
use crate::math::Point2;

/// What a dimension segment measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentType {
    Room,
    Wall,
    Overall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Orientation of a dimension line running along a wall facing `direction`.
    #[must_use]
    pub fn along(direction: CardinalDirection) -> Self {
        if direction.is_horizontal() {
            Self::Horizontal
        } else {
            Self::Vertical
        }
    }

    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// A single measured span on a dimension line.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionSegment {
    pub from: Point2,
    pub to: Point2,
    pub label: String,
    pub room_id: Option<String>,
    /// Whether the label is estimated to fit between the extension lines.
    pub text_fits: bool,
    pub segment_type: SegmentType,
}

impl DimensionSegment {
    #[must_use]
    pub fn length(&self) -> f64 {
        ((self.to.x - self.from.x).powi(2) + (self.to.y - self.from.y).powi(2)).sqrt()
    }
}

/// A run of contiguous dimension segments on one line.
#[derive(Debug, Clone, PartialEq)]
pub struct DimensionChain {
    pub id: String,
    pub segments: Vec<DimensionSegment>,
    pub orientation: Orientation,
    /// Side of the building the chain is drawn on.
    pub direction: CardinalDirection,
    /// Stacking level: 0 per room, 1 overall.
    pub lane: u8,
    /// Perpendicular coordinate of the dimension line.
    pub offset: f64,
}
