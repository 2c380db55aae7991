use tracing::trace;

use crate::geometry::CardinalDirection;
use crate::math::interval::Interval;
use crate::math::CONTAINMENT_EPSILON;
use crate::model::WallId;

use super::WallGraphBuilder;

#[derive(Debug, Clone, Copy)]
enum WallEnd {
    Start,
    End,
}

impl WallGraphBuilder<'_, '_> {
    /// Runs vertical walls through the gap of each horizontal shared wall.
    ///
    /// When both rooms have a side wall flush with the shared wall's end, the
    /// two meet at the gap's centerline; a single side wall crosses the whole
    /// gap. Walls are only ever lengthened.
    pub(super) fn extend_corners(&mut self) {
        let rooms = self.rooms;
        for join in std::mem::take(&mut self.joins) {
            if !join.direction.is_horizontal() {
                continue;
            }
            let (lower, upper) = if join.direction == CardinalDirection::North {
                (join.room_a, join.room_b)
            } else {
                (join.room_b, join.room_a)
            };
            let (l, u) = (rooms[lower].bounds, rooms[upper].bounds);
            let centerline = (l.top() + u.y) / 2.0;

            for (side, end) in [
                (CardinalDirection::West, join.piece.0),
                (CardinalDirection::East, join.piece.1),
            ] {
                let upper_wall = flush(u.edge(side), end)
                    .then(|| self.find_side_wall(upper, side, |r| flush(r.0, u.y)))
                    .flatten();
                let lower_wall = flush(l.edge(side), end)
                    .then(|| self.find_side_wall(lower, side, |r| flush(r.1, l.top())))
                    .flatten();
                match (upper_wall, lower_wall) {
                    (Some(up), Some(down)) => {
                        self.stretch(up, WallEnd::Start, centerline);
                        self.stretch(down, WallEnd::End, centerline);
                    }
                    (Some(up), None) => self.stretch(up, WallEnd::Start, l.top()),
                    (None, Some(down)) => self.stretch(down, WallEnd::End, u.y),
                    (None, None) => {}
                }
            }
        }
    }

    fn find_side_wall(
        &self,
        room: usize,
        side: CardinalDirection,
        matches: impl Fn(Interval) -> bool,
    ) -> Option<WallId> {
        let sides = self.by_room.get(self.rooms[room].id())?;
        sides[side]
            .iter()
            .copied()
            .find(|id| self.walls.get(*id).is_some_and(|w| matches(w.axis_range())))
    }

    fn stretch(&mut self, id: WallId, end: WallEnd, to: f64) {
        let Some(wall) = self.walls.get_mut(id) else {
            return;
        };
        let (start, finish) = wall.axis_range();
        let axis = match end {
            WallEnd::Start if to < start => (to, finish),
            WallEnd::End if to > finish => (start, to),
            _ => return,
        };
        trace!(wall = %wall.id, ?axis, "extended through corner");
        wall.set_axis_range(axis);
    }
}

fn flush(a: f64, b: f64) -> bool {
    (a - b).abs() <= CONTAINMENT_EPSILON
}
