use std::collections::HashSet;

use crate::geometry::{CardinalDirection, Rect};
use crate::math::interval::Interval;
use crate::math::CONTAINMENT_EPSILON;
use crate::model::{DimensionChain, Orientation, ResolvedRoom, SegmentType};
use crate::units::UnitSystem;

use super::chain::segment;

type SpanKey = (Orientation, i64, i64);

/// Spans already measured, keyed by orientation and rounded endpoints.
#[derive(Debug, Default)]
pub(super) struct Coverage {
    spans: HashSet<SpanKey>,
    rooms: HashSet<(String, Orientation)>,
}

impl Coverage {
    pub fn record(&mut self, chain: &DimensionChain) {
        for segment in &chain.segments {
            let span = match chain.orientation {
                Orientation::Horizontal => (segment.from.x, segment.to.x),
                Orientation::Vertical => (segment.from.y, segment.to.y),
            };
            self.spans.insert(key(chain.orientation, span));
            if let Some(room_id) = &segment.room_id {
                self.rooms.insert((room_id.clone(), chain.orientation));
            }
        }
    }

    pub fn has_span(&self, orientation: Orientation, span: Interval) -> bool {
        self.spans.contains(&key(orientation, span))
    }

    pub fn has_room(&self, room_id: &str, orientation: Orientation) -> bool {
        self.rooms.contains(&(room_id.to_owned(), orientation))
    }
}

#[allow(clippy::cast_possible_truncation)]
fn key(orientation: Orientation, span: Interval) -> SpanKey {
    let round = |v: f64| (v / CONTAINMENT_EPSILON).round() as i64;
    (orientation, round(span.0), round(span.1))
}

fn orientation_name(orientation: Orientation) -> &'static str {
    match orientation {
        Orientation::Horizontal => "horizontal",
        Orientation::Vertical => "vertical",
    }
}

/// A single-segment chain drawn inside the room for a room or orientation no
/// building chain measured.
pub(super) fn fallback_chain(
    room: &ResolvedRoom,
    orientation: Orientation,
    units: UnitSystem,
) -> DimensionChain {
    let inset = units.dimension_lane_spacing() / 2.0;
    let bounds = room.bounds;
    let (direction, offset) = match orientation {
        Orientation::Horizontal => (CardinalDirection::North, bounds.top() - inset),
        Orientation::Vertical => (CardinalDirection::West, bounds.x + inset),
    };
    let span = bounds.axis_range(direction);
    DimensionChain {
        id: format!("dim-{}-{}", room.id, orientation_name(orientation)),
        segments: vec![segment(
            orientation,
            offset,
            span,
            Some(room.id.as_str()),
            SegmentType::Room,
            units,
        )],
        orientation,
        direction,
        lane: 0,
        offset,
    }
}

/// Length and depth chains for every enclosure and extension of `room`,
/// skipping spans already measured.
pub(super) fn sub_space_chains(
    room: &ResolvedRoom,
    coverage: &mut Coverage,
    units: UnitSystem,
) -> Vec<DimensionChain> {
    let enclosures = room.enclosures.iter().map(|e| (&e.id, e.bounds, e.facing));
    let extensions = room.extensions.iter().map(|e| (&e.id, e.bounds, e.parent_wall));

    let mut chains = Vec::new();
    for (id, bounds, side) in enclosures.chain(extensions) {
        for (suffix, direction) in [("length", side), ("depth", side.wall_ends().0)] {
            let orientation = Orientation::along(direction);
            let span = bounds.axis_range(direction);
            if coverage.has_span(orientation, span) {
                continue;
            }
            let offset = line_offset(&bounds, side, direction, units);
            let chain = DimensionChain {
                id: format!("dim-{id}-{suffix}"),
                segments: vec![segment(
                    orientation,
                    offset,
                    span,
                    None,
                    SegmentType::Room,
                    units,
                )],
                orientation,
                direction,
                lane: 0,
                offset,
            };
            coverage.record(&chain);
            chains.push(chain);
        }
    }
    chains
}

/// The length line runs just inside the `side` edge; the depth line crosses
/// the middle of the sub-space.
fn line_offset(
    bounds: &Rect,
    side: CardinalDirection,
    direction: CardinalDirection,
    units: UnitSystem,
) -> f64 {
    if direction == side {
        let inset = (units.dimension_lane_spacing() / 4.0).min(half_depth(bounds, side));
        bounds.edge(side) - side.outward_sign() * inset
    } else if direction.is_horizontal() {
        bounds.center().y
    } else {
        bounds.center().x
    }
}

fn half_depth(bounds: &Rect, side: CardinalDirection) -> f64 {
    if side.is_horizontal() {
        bounds.height / 2.0
    } else {
        bounds.width / 2.0
    }
}
