use crate::geometry::{CardinalDirection, DirectionMap};
use crate::math::coord_eq;
use crate::math::interval::{overlap, Interval};
use crate::model::{ResolvedRoom, WallGraph, WallType};
use crate::units::UnitSystem;

/// A stretch of one room's interior seen from a building edge.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct Member {
    pub room_id: String,
    pub span: Interval,
    /// The room's full interior extent along the same axis.
    pub room_span: Interval,
}

/// Collinear exterior wall faces on one side of the building.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct EdgeGroup {
    /// Outermost face coordinate of the group.
    pub coordinate: f64,
    pub members: Vec<Member>,
}

impl EdgeGroup {
    pub fn covers(&self, room_id: &str) -> bool {
        self.members.iter().any(|m| m.room_id == room_id)
    }
}

/// Groups exterior, unshared parent walls by side, then clusters each side by
/// outer face within the unit's clustering tolerance.
pub(super) fn collect_groups(
    graph: &WallGraph,
    rooms: &[ResolvedRoom],
    units: UnitSystem,
) -> DirectionMap<Vec<EdgeGroup>> {
    let epsilon = units.cluster_epsilon();
    DirectionMap::from_fn(|direction| {
        let sign = direction.outward_sign();
        let mut faces: Vec<(f64, Member)> = graph
            .walls()
            .map(|(_, wall)| wall)
            .filter(|w| {
                w.direction == direction
                    && w.source.is_parent()
                    && !w.is_shared()
                    && w.wall_type != WallType::Interior
            })
            .filter_map(|wall| {
                let room = rooms.iter().find(|r| r.id == wall.room_id)?;
                let room_span = room.bounds.axis_range(direction);
                let span = overlap(room_span, wall.axis_range())?;
                Some((
                    wall.outer_face(),
                    Member {
                        room_id: room.id.clone(),
                        span,
                        room_span,
                    },
                ))
            })
            .collect();
        faces.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut groups: Vec<(f64, EdgeGroup)> = Vec::new();
        for (face, member) in faces {
            match groups.last_mut() {
                Some((last_face, group)) if (face - *last_face).abs() <= epsilon => {
                    *last_face = face;
                    if face * sign > group.coordinate * sign {
                        group.coordinate = face;
                    }
                    group.members.push(member);
                }
                _ => groups.push((
                    face,
                    EdgeGroup {
                        coordinate: face,
                        members: vec![member],
                    },
                )),
            }
        }
        groups.into_iter().map(|(_, group)| group).collect()
    })
}

/// Within each side, a room listed in several groups stays only in the
/// outermost one.
pub(super) fn keep_outermost(groups: &mut DirectionMap<Vec<EdgeGroup>>) {
    for direction in CardinalDirection::ALL {
        let sign = direction.outward_sign();
        let side = &mut groups[direction];
        let mut outermost: Vec<(String, f64)> = Vec::new();
        for group in side.iter() {
            for member in &group.members {
                match outermost.iter_mut().find(|(id, _)| *id == member.room_id) {
                    Some((_, best)) if group.coordinate * sign > *best * sign => {
                        *best = group.coordinate;
                    }
                    Some(_) => {}
                    None => outermost.push((member.room_id.clone(), group.coordinate)),
                }
            }
        }
        for group in side.iter_mut() {
            let coordinate = group.coordinate;
            group.members.retain(|m| {
                outermost
                    .iter()
                    .any(|(id, best)| *id == m.room_id && coord_eq(*best, coordinate))
            });
        }
        side.retain(|g| !g.members.is_empty());
    }
}

/// Rooms already dimensioned on the north (west) side are dropped from the
/// south (east) side; groups left empty disappear.
pub(super) fn prefer_primary(groups: &mut DirectionMap<Vec<EdgeGroup>>) {
    for (primary, secondary) in [
        (CardinalDirection::North, CardinalDirection::South),
        (CardinalDirection::West, CardinalDirection::East),
    ] {
        let covered: Vec<String> = groups[primary]
            .iter()
            .flat_map(|g| g.members.iter().map(|m| m.room_id.clone()))
            .collect();
        let side = &mut groups[secondary];
        for group in side.iter_mut() {
            group.members.retain(|m| !covered.contains(&m.room_id));
        }
        side.retain(|g| !g.members.is_empty());
    }
}
