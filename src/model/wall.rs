use serde::Deserialize;

use crate::geometry::{CardinalDirection, LineSegment, Rect};
use crate::math::interval::{subtract_intervals, Interval};
use crate::math::{coord_eq, Point2, COORD_EPSILON};
use crate::units::UnitSystem;

use super::opening::ResolvedOpening;

slotmap::new_key_type! {
    /// Stable handle of a wall inside a [`WallGraph`](super::WallGraph).
    pub struct WallId;
}

/// Structural role of a wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WallType {
    #[default]
    Exterior,
    Interior,
    LoadBearing,
}

impl WallType {
    /// Stud size used when the configuration does not name one.
    #[must_use]
    pub fn default_stud(self) -> StudSize {
        match self {
            Self::Exterior | Self::LoadBearing => StudSize::TwoBySix,
            Self::Interior => StudSize::TwoByFour,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exterior => "exterior",
            Self::Interior => "interior",
            Self::LoadBearing => "load-bearing",
        }
    }
}

/// Nominal framing lumber size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum StudSize {
    #[serde(rename = "2x4")]
    TwoByFour,
    #[serde(rename = "2x6")]
    TwoBySix,
    #[serde(rename = "2x8")]
    TwoByEight,
}

impl StudSize {
    /// Actual (dressed) stud depth in inches.
    #[must_use]
    pub fn width_inches(self) -> f64 {
        match self {
            Self::TwoByFour => 3.5,
            Self::TwoBySix => 5.5,
            Self::TwoByEight => 7.25,
        }
    }
}

/// Layered build-up of a wall.
///
/// `total_thickness` is `stud + 2 * finish` unless `is_override` is set, in
/// which case it was given explicitly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallComposition {
    pub stud: Option<StudSize>,
    /// Finish thickness on each side, in plan units.
    pub finish: f64,
    pub total_thickness: f64,
    pub is_override: bool,
}

impl WallComposition {
    /// Default finish per side: half an inch of drywall.
    pub const DEFAULT_FINISH_INCHES: f64 = 0.5;

    #[must_use]
    pub fn from_stud(stud: StudSize, finish: f64, units: UnitSystem) -> Self {
        Self {
            stud: Some(stud),
            finish,
            total_thickness: units.from_inches(stud.width_inches()) + 2.0 * finish,
            is_override: false,
        }
    }

    #[must_use]
    pub fn with_thickness(stud: Option<StudSize>, finish: f64, thickness: f64) -> Self {
        Self {
            stud,
            finish,
            total_thickness: thickness,
            is_override: true,
        }
    }

    /// Default composition for a wall type.
    #[must_use]
    pub fn for_type(wall_type: WallType, units: UnitSystem) -> Self {
        Self::from_stud(
            wall_type.default_stud(),
            units.from_inches(Self::DEFAULT_FINISH_INCHES),
            units,
        )
    }
}

/// Where a wall comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WallSource {
    /// One of a room's four bounding walls (possibly merged with a neighbour's).
    Parent,
    /// A partition wall of an enclosure carved out of the room.
    Enclosure { sub_space_id: String },
    /// A wall bounding an extension bumped out of the room.
    Extension { sub_space_id: String },
}

impl WallSource {
    #[must_use]
    pub fn sub_space_id(&self) -> Option<&str> {
        match self {
            Self::Parent => None,
            Self::Enclosure { sub_space_id } | Self::Extension { sub_space_id } => {
                Some(sub_space_id)
            }
        }
    }

    #[must_use]
    pub fn is_parent(&self) -> bool {
        matches!(self, Self::Parent)
    }
}

/// The second room served by a shared wall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedSide {
    pub room_id: String,
    /// Which of that room's walls this is.
    pub direction: CardinalDirection,
}

/// A resolved wall.
///
/// `direction` and the inner face are given from the perspective of
/// `room_id`; for a shared wall `shared_with` names the room on the other
/// face. Horizontal (north/south) walls run along X, vertical ones along Y.
#[derive(Debug, Clone)]
pub struct Wall {
    pub id: String,
    pub room_id: String,
    pub direction: CardinalDirection,
    pub shared_with: Option<SharedSide>,
    pub wall_type: WallType,
    pub composition: WallComposition,
    pub thickness: f64,
    pub rect: Rect,
    pub centerline: LineSegment,
    pub outer_edge: LineSegment,
    pub inner_edge: LineSegment,
    /// Openings ordered along the wall axis.
    pub openings: Vec<ResolvedOpening>,
    /// Solid pieces of `rect` left after cutting openings and extension gaps.
    pub segments: Vec<Rect>,
    pub source: WallSource,
}

impl Wall {
    /// Creates a solid wall spanning `axis`, with its room-side face at
    /// `inner_face` and growing outward from the room by its thickness.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: String,
        room_id: String,
        direction: CardinalDirection,
        wall_type: WallType,
        composition: WallComposition,
        source: WallSource,
        axis: Interval,
        inner_face: f64,
    ) -> Self {
        let thickness = composition.total_thickness;
        let (rect, centerline, outer_edge, inner_edge) =
            layout(direction, axis, inner_face, thickness);
        Self {
            id,
            room_id,
            direction,
            shared_with: None,
            wall_type,
            composition,
            thickness,
            rect,
            centerline,
            outer_edge,
            inner_edge,
            openings: Vec::new(),
            segments: vec![rect],
            source,
        }
    }

    #[must_use]
    pub fn is_shared(&self) -> bool {
        self.shared_with.is_some()
    }

    /// Returns `true` if `room_id` owns either face of this wall.
    #[must_use]
    pub fn serves_room(&self, room_id: &str) -> bool {
        self.room_id == room_id
            || self
                .shared_with
                .as_ref()
                .is_some_and(|side| side.room_id == room_id)
    }

    /// Extent along the wall axis.
    #[must_use]
    pub fn axis_range(&self) -> Interval {
        self.rect.axis_range(self.direction)
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        let (start, end) = self.axis_range();
        end - start
    }

    /// Perpendicular coordinate of the face toward `room_id`.
    #[must_use]
    pub fn inner_face(&self) -> f64 {
        perpendicular(self.direction, &self.inner_edge.start)
    }

    /// Perpendicular coordinate of the face away from `room_id`.
    #[must_use]
    pub fn outer_face(&self) -> f64 {
        perpendicular(self.direction, &self.outer_edge.start)
    }

    /// Adds openings, keeping them sorted along the axis, and recuts segments.
    pub fn set_openings(&mut self, mut openings: Vec<ResolvedOpening>, gaps: &[Interval]) {
        openings.sort_by(|a, b| a.axis_range().0.total_cmp(&b.axis_range().0));
        self.openings = openings;
        self.cut_segments(gaps);
    }

    /// Recomputes `segments` as the axis range minus every opening and `gaps`.
    pub fn cut_segments(&mut self, gaps: &[Interval]) {
        let mut holes: Vec<Interval> = self.openings.iter().map(ResolvedOpening::axis_range).collect();
        holes.extend_from_slice(gaps);
        self.segments = subtract_intervals(self.axis_range(), &holes)
            .into_iter()
            .map(|piece| self.segment_rect(piece))
            .collect();
    }

    /// Stretches the wall along its axis to `axis`.
    ///
    /// Only the first and last segments are adjusted, so gaps cut for openings
    /// survive unchanged.
    pub fn set_axis_range(&mut self, axis: Interval) {
        let (old_start, old_end) = self.axis_range();
        let inner_face = self.inner_face();
        let (rect, centerline, outer_edge, inner_edge) =
            layout(self.direction, axis, inner_face, self.thickness);
        self.rect = rect;
        self.centerline = centerline;
        self.outer_edge = outer_edge;
        self.inner_edge = inner_edge;

        let horizontal = self.direction.is_horizontal();
        let first = self.segments.first().map(|s| segment_span(s, horizontal));
        match first {
            Some((start, end)) if coord_eq(start, old_start) => {
                self.segments[0] = span_rect(&rect, horizontal, (axis.0, end));
            }
            // A gap sits at the old start: the stretch is solid wall of its own.
            _ if axis.0 < old_start - COORD_EPSILON => {
                self.segments.insert(0, span_rect(&rect, horizontal, (axis.0, old_start)));
            }
            _ => {}
        }
        let last = self.segments.last().map(|s| segment_span(s, horizontal));
        match last {
            Some((start, end)) if coord_eq(end, old_end) => {
                let index = self.segments.len() - 1;
                self.segments[index] = span_rect(&rect, horizontal, (start, axis.1));
            }
            _ if axis.1 > old_end + COORD_EPSILON => {
                self.segments.push(span_rect(&rect, horizontal, (old_end, axis.1)));
            }
            _ => {}
        }
    }

    fn segment_rect(&self, piece: Interval) -> Rect {
        span_rect(&self.rect, self.direction.is_horizontal(), piece)
    }
}

/// Computes `(rect, centerline, outer_edge, inner_edge)` for a wall.
fn layout(
    direction: CardinalDirection,
    axis: Interval,
    inner_face: f64,
    thickness: f64,
) -> (Rect, LineSegment, LineSegment, LineSegment) {
    let outer_face = inner_face + direction.outward_sign() * thickness;
    let middle = (inner_face + outer_face) / 2.0;
    let line = |perp: f64| {
        if direction.is_horizontal() {
            LineSegment::new(Point2::new(axis.0, perp), Point2::new(axis.1, perp))
        } else {
            LineSegment::new(Point2::new(perp, axis.0), Point2::new(perp, axis.1))
        }
    };
    let rect = if direction.is_horizontal() {
        Rect::from_corners(axis.0, inner_face, axis.1, outer_face)
    } else {
        Rect::from_corners(inner_face, axis.0, outer_face, axis.1)
    };
    (rect, line(middle), line(outer_face), line(inner_face))
}

fn perpendicular(direction: CardinalDirection, p: &Point2) -> f64 {
    if direction.is_horizontal() {
        p.y
    } else {
        p.x
    }
}

fn segment_span(segment: &Rect, horizontal: bool) -> Interval {
    if horizontal {
        (segment.x, segment.right())
    } else {
        (segment.y, segment.top())
    }
}

fn span_rect(rect: &Rect, horizontal: bool, span: Interval) -> Rect {
    if horizontal {
        Rect::from_corners(span.0, rect.y, span.1, rect.top())
    } else {
        Rect::from_corners(rect.x, span.0, rect.right(), span.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn north_wall() -> Wall {
        Wall::new(
            "living.north".into(),
            "living".into(),
            CardinalDirection::North,
            WallType::Exterior,
            WallComposition::for_type(WallType::Exterior, UnitSystem::Imperial),
            WallSource::Parent,
            (-0.5, 12.5),
            10.0,
        )
    }

    #[test]
    fn default_thicknesses() {
        let ext = WallComposition::for_type(WallType::Exterior, UnitSystem::Imperial);
        let int = WallComposition::for_type(WallType::Interior, UnitSystem::Imperial);
        assert_abs_diff_eq!(ext.total_thickness, 6.5 / 12.0, epsilon = 1e-9);
        assert_abs_diff_eq!(int.total_thickness, 4.5 / 12.0, epsilon = 1e-9);
    }

    #[test]
    fn north_wall_grows_upward() {
        let wall = north_wall();
        assert_abs_diff_eq!(wall.rect.y, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(wall.inner_face(), 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(wall.outer_face(), 10.0 + 6.5 / 12.0, epsilon = 1e-9);
        assert_abs_diff_eq!(wall.centerline.start.y, 10.0 + 3.25 / 12.0, epsilon = 1e-9);
        assert_abs_diff_eq!(wall.length(), 13.0, epsilon = 1e-9);
    }

    #[test]
    fn west_wall_grows_leftward() {
        let comp = WallComposition::with_thickness(None, 0.0, 0.5);
        let wall = Wall::new(
            "a.west".into(),
            "a".into(),
            CardinalDirection::West,
            WallType::Interior,
            comp,
            WallSource::Parent,
            (0.0, 8.0),
            0.0,
        );
        assert_abs_diff_eq!(wall.rect.x, -0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(wall.rect.height, 8.0, epsilon = 1e-9);
        assert_abs_diff_eq!(wall.outer_face(), -0.5, epsilon = 1e-9);
    }

    #[test]
    fn cut_segments_around_gaps() {
        let mut wall = north_wall();
        wall.cut_segments(&[(3.0, 6.0)]);
        assert_eq!(wall.segments.len(), 2);
        assert_abs_diff_eq!(wall.segments[0].right(), 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(wall.segments[1].x, 6.0, epsilon = 1e-9);
    }

    #[test]
    fn stretching_keeps_inner_gaps() {
        let comp = WallComposition::for_type(WallType::Interior, UnitSystem::Imperial);
        let mut wall = Wall::new(
            "a.east".into(),
            "a".into(),
            CardinalDirection::East,
            WallType::Interior,
            comp,
            WallSource::Parent,
            (0.0, 10.0),
            12.0,
        );
        wall.cut_segments(&[(4.0, 7.0)]);
        wall.set_axis_range((-0.25, 10.25));
        assert_eq!(wall.segments.len(), 2);
        assert_abs_diff_eq!(wall.segments[0].y, -0.25, epsilon = 1e-9);
        assert_abs_diff_eq!(wall.segments[0].top(), 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(wall.segments[1].y, 7.0, epsilon = 1e-9);
        assert_abs_diff_eq!(wall.segments[1].top(), 10.25, epsilon = 1e-9);
        assert_abs_diff_eq!(wall.rect.height, 10.5, epsilon = 1e-9);
    }

    #[test]
    fn stretching_past_end_gaps_adds_solid_ends() {
        let comp = WallComposition::for_type(WallType::Interior, UnitSystem::Imperial);
        let mut wall = Wall::new(
            "a.east".into(),
            "a".into(),
            CardinalDirection::East,
            WallType::Interior,
            comp,
            WallSource::Parent,
            (0.0, 10.0),
            12.0,
        );
        wall.cut_segments(&[(0.0, 3.0), (8.0, 10.0)]);
        assert_eq!(wall.segments.len(), 1);
        wall.set_axis_range((-0.25, 10.25));
        assert_eq!(wall.segments.len(), 3);
        assert_abs_diff_eq!(wall.segments[0].y, -0.25, epsilon = 1e-9);
        assert_abs_diff_eq!(wall.segments[0].top(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(wall.segments[1].y, 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(wall.segments[1].top(), 8.0, epsilon = 1e-9);
        assert_abs_diff_eq!(wall.segments[2].y, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(wall.segments[2].top(), 10.25, epsilon = 1e-9);
    }
}
