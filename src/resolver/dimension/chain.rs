use crate::geometry::CardinalDirection;
use crate::math::interval::{overlap, Interval};
use crate::math::{Point2, CONTAINMENT_EPSILON};
use crate::model::{
    DimensionChain, DimensionSegment, Orientation, ResolvedRoom, SegmentType, Wall, WallGraph,
    WallType,
};
use crate::units::{format_dimension, UnitSystem};

use super::groups::{EdgeGroup, Member};

/// Estimated label glyph width in pixels.
const CHAR_WIDTH_PX: f64 = 7.0;

/// Builds a segment between two positions along a dimension line.
pub(super) fn segment(
    orientation: Orientation,
    offset: f64,
    span: Interval,
    room_id: Option<&str>,
    segment_type: SegmentType,
    units: UnitSystem,
) -> DimensionSegment {
    let at = |along: f64| match orientation {
        Orientation::Horizontal => Point2::new(along, offset),
        Orientation::Vertical => Point2::new(offset, along),
    };
    let length = span.1 - span.0;
    let label = format_dimension(length, units);
    #[allow(clippy::cast_precision_loss)]
    let text_width = label.chars().count() as f64 * CHAR_WIDTH_PX;
    DimensionSegment {
        from: at(span.0),
        to: at(span.1),
        text_fits: text_width <= length * units.pixels_per_unit(),
        label,
        room_id: room_id.map(str::to_owned),
        segment_type,
    }
}

/// Chains for every edge group on one side of the building, outermost group
/// first. Group `i` yields `dim-<side>-<i>-lane0` and, when it covers two or
/// more rooms, `dim-<side>-<i>-lane1`.
pub(super) fn building_chains(
    direction: CardinalDirection,
    groups: &[EdgeGroup],
    graph: &WallGraph,
    rooms: &[ResolvedRoom],
    units: UnitSystem,
) -> Vec<DimensionChain> {
    let sign = direction.outward_sign();
    let mut ordered: Vec<&EdgeGroup> = groups.iter().collect();
    ordered.sort_by(|a, b| (b.coordinate * sign).total_cmp(&(a.coordinate * sign)));
    ordered
        .into_iter()
        .enumerate()
        .flat_map(|(index, group)| group_chains(direction, index, group, graph, rooms, units))
        .collect()
}

fn group_chains(
    direction: CardinalDirection,
    index: usize,
    group: &EdgeGroup,
    graph: &WallGraph,
    rooms: &[ResolvedRoom],
    units: UnitSystem,
) -> Vec<DimensionChain> {
    let sign = direction.outward_sign();
    let orientation = Orientation::along(direction);

    let mut members: Vec<&Member> = group.members.iter().collect();
    members.sort_by(|a, b| a.span.0.total_cmp(&b.span.0));
    let mut ordered: Vec<&Member> = Vec::with_capacity(members.len());
    for member in members {
        if ordered
            .last()
            .is_none_or(|last| member.span.0 >= last.span.1 - CONTAINMENT_EPSILON)
        {
            ordered.push(member);
        }
    }
    let (Some(first), Some(last)) = (ordered.first(), ordered.last()) else {
        return Vec::new();
    };

    let base = outermost_face(direction, group, (first.span.0, last.span.1), graph, rooms);
    let offset = |lane: u8| base + sign * units.dimension_lane_spacing() * f64::from(lane + 1);
    let (start_side, end_side) = direction.wall_ends();
    let line = offset(0);
    let mut segments = Vec::new();

    if coincides(first.span.0, first.room_span.0) {
        if let Some(wall) = end_wall(graph, &first.room_id, start_side, direction) {
            segments.push(segment(
                orientation,
                line,
                (first.span.0 - wall.thickness, first.span.0),
                None,
                SegmentType::Wall,
                units,
            ));
        }
    }
    for (i, member) in ordered.iter().enumerate() {
        if i > 0 {
            let previous = ordered[i - 1];
            let gap = member.span.0 - previous.span.1;
            if gap > CONTAINMENT_EPSILON && gap <= units.max_shared_gap() + CONTAINMENT_EPSILON {
                segments.push(segment(
                    orientation,
                    line,
                    (previous.span.1, member.span.0),
                    None,
                    SegmentType::Wall,
                    units,
                ));
            }
        }
        segments.push(segment(
            orientation,
            line,
            member.span,
            Some(member.room_id.as_str()),
            SegmentType::Room,
            units,
        ));
    }
    if coincides(last.span.1, last.room_span.1) {
        if let Some(wall) = end_wall(graph, &last.room_id, end_side, direction) {
            segments.push(segment(
                orientation,
                line,
                (last.span.1, last.span.1 + wall.thickness),
                None,
                SegmentType::Wall,
                units,
            ));
        }
    }

    let overall = segments
        .first()
        .zip(segments.last())
        .map(|(a, b)| (along(orientation, &a.from), along(orientation, &b.to)));
    let mut chains = vec![DimensionChain {
        id: format!("dim-{direction}-{index}-lane0"),
        segments,
        orientation,
        direction,
        lane: 0,
        offset: line,
    }];

    let mut distinct: Vec<&str> = ordered.iter().map(|m| m.room_id.as_str()).collect();
    distinct.sort_unstable();
    distinct.dedup();
    if let (true, Some(span)) = (distinct.len() >= 2, overall) {
        let line = offset(1);
        chains.push(DimensionChain {
            id: format!("dim-{direction}-{index}-lane1"),
            segments: vec![segment(
                orientation,
                line,
                span,
                None,
                SegmentType::Overall,
                units,
            )],
            orientation,
            direction,
            lane: 1,
            offset: line,
        });
    }
    chains
}

fn along(orientation: Orientation, p: &Point2) -> f64 {
    match orientation {
        Orientation::Horizontal => p.x,
        Orientation::Vertical => p.y,
    }
}

fn coincides(a: f64, b: f64) -> bool {
    (a - b).abs() <= CONTAINMENT_EPSILON
}

/// The group's face, pushed past the far walls of any extension projecting
/// on this side within the group's `span`.
fn outermost_face(
    direction: CardinalDirection,
    group: &EdgeGroup,
    span: Interval,
    graph: &WallGraph,
    rooms: &[ResolvedRoom],
) -> f64 {
    let sign = direction.outward_sign();
    rooms
        .iter()
        .flat_map(|r| r.extensions.iter())
        .filter(|e| {
            e.parent_wall == direction && overlap(e.bounds.axis_range(direction), span).is_some()
        })
        .flat_map(|e| graph.sub_space_walls(&e.id, direction))
        .map(Wall::outer_face)
        .fold(group.coordinate, |best, face| {
            if face * sign > best * sign {
                face
            } else {
                best
            }
        })
}

/// The room's wall on `side` nearest the `direction` edge, when it is an
/// exposed exterior wall.
fn end_wall<'g>(
    graph: &'g WallGraph,
    room_id: &str,
    side: CardinalDirection,
    direction: CardinalDirection,
) -> Option<&'g Wall> {
    let mut walls = graph.room_walls(room_id, side);
    let wall = if direction.outward_sign() > 0.0 {
        walls.last()
    } else {
        walls.next()
    }?;
    (!wall.is_shared() && wall.wall_type != WallType::Interior).then_some(wall)
}
