use tracing::trace;

use crate::geometry::CardinalDirection;
use crate::math::interval::{merge_intervals, subtract_intervals, Interval};
use crate::math::CONTAINMENT_EPSILON;
use crate::model::{Wall, WallSource};

use super::shared::openings_within;
use super::WallGraphBuilder;

impl WallGraphBuilder<'_, '_> {
    /// Emits the parts of each room side not covered by a shared wall.
    ///
    /// A piece reaching a corner of the interior runs through the corner like
    /// any horizontal wall; pieces between two shared walls stop at their ends.
    pub(super) fn add_remainders(&mut self) {
        let rooms = self.rooms;
        let max_gap = self.units.max_shared_gap();
        for (index, room) in rooms.iter().enumerate() {
            for direction in CardinalDirection::ALL {
                let interior = room.bounds.axis_range(direction);
                let mut taken = self.consumed_ranges(index, direction);
                let taken = merge_intervals(&mut taken);

                let mut pieces = Vec::new();
                for piece in subtract_intervals(interior, &taken) {
                    if is_junction_sliver(piece, &taken, max_gap) {
                        trace!(room = %room.id(), %direction, ?piece, "absorbed junction sliver");
                        continue;
                    }
                    let mut axis = piece;
                    if direction.is_horizontal() {
                        if (piece.0 - interior.0).abs() <= CONTAINMENT_EPSILON {
                            axis.0 -= room.thickness(CardinalDirection::West);
                        }
                        if (piece.1 - interior.1).abs() <= CONTAINMENT_EPSILON {
                            axis.1 += room.thickness(CardinalDirection::East);
                        }
                    }
                    pieces.push((piece, axis));
                }

                for (piece, axis) in pieces {
                    let template = &self.room_walls[index].walls[direction];
                    let openings = openings_within(template, piece).cloned().collect();
                    let (wall_type, composition, inner_face) =
                        (template.wall_type, template.composition, template.inner_face());
                    let gaps = self.room_walls[index].gaps[direction].clone();
                    let name = self.next_name(index, direction);
                    let mut wall = Wall::new(
                        name,
                        room.id().to_owned(),
                        direction,
                        wall_type,
                        composition,
                        WallSource::Parent,
                        axis,
                        inner_face,
                    );
                    wall.set_openings(openings, &gaps);
                    self.insert_room_wall(wall);
                }
            }
        }
    }
}

/// A short piece wedged between two consumed ranges: the foot of the wall
/// separating two neighbours that share this side.
fn is_junction_sliver(piece: Interval, taken: &[Interval], max_gap: f64) -> bool {
    let near = |a: f64, b: f64| (a - b).abs() <= CONTAINMENT_EPSILON;
    piece.1 - piece.0 <= max_gap + CONTAINMENT_EPSILON
        && taken.iter().any(|t| near(t.1, piece.0))
        && taken.iter().any(|t| near(t.0, piece.1))
}
