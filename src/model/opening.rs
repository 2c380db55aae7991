use serde::Deserialize;

use crate::geometry::{CardinalDirection, LineSegment};
use crate::math::interval::Interval;
use crate::math::Point2;

/// Kind of wall opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningType {
    Door,
    Window,
    /// A cased opening with no leaf.
    Opening,
}

/// Door leaf style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DoorStyle {
    Standard,
    Double,
    Sliding,
    Pocket,
    Bifold,
    Barn,
}

/// Which way a hinged door swings, seen from its owning room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SwingDirection {
    InwardLeft,
    InwardRight,
    OutwardLeft,
    OutwardRight,
}

/// A door or window placed on a wall.
///
/// `gap_start`/`gap_end` lie on the owner's face of the wall, ordered along
/// the wall axis; `centerline` runs between them at half the wall's thickness.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOpening {
    pub opening_type: OpeningType,
    pub width: f64,
    pub height: Option<f64>,
    /// Direction of the wall in the owning room.
    pub wall_direction: CardinalDirection,
    pub wall_thickness: f64,
    pub gap_start: Point2,
    pub gap_end: Point2,
    pub centerline: LineSegment,
    pub style: Option<DoorStyle>,
    pub swing: Option<SwingDirection>,
    pub owner_room_id: String,
}

impl ResolvedOpening {
    /// Extent of the gap along the wall axis.
    #[must_use]
    pub fn axis_range(&self) -> Interval {
        if self.wall_direction.is_horizontal() {
            (self.gap_start.x, self.gap_end.x)
        } else {
            (self.gap_start.y, self.gap_end.y)
        }
    }

    /// Midpoint of the gap along the wall axis.
    #[must_use]
    pub fn axis_center(&self) -> f64 {
        let (start, end) = self.axis_range();
        (start + end) / 2.0
    }

    /// Moves the opening across the wall axis onto a wall whose owner-side
    /// face is at `inner_face` and which is `thickness` thick.
    pub fn realign(&mut self, inner_face: f64, thickness: f64) {
        let middle = inner_face + self.wall_direction.outward_sign() * thickness / 2.0;
        let horizontal = self.wall_direction.is_horizontal();
        let shift = |p: &mut Point2, perp: f64| {
            if horizontal {
                p.y = perp;
            } else {
                p.x = perp;
            }
        };
        shift(&mut self.gap_start, inner_face);
        shift(&mut self.gap_end, inner_face);
        shift(&mut self.centerline.start, middle);
        shift(&mut self.centerline.end, middle);
        self.wall_thickness = thickness;
    }
}
