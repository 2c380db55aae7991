use tracing::trace;

use crate::error::Result;
use crate::geometry::CardinalDirection;
use crate::math::interval::{contains, overlap, subtract_intervals, Interval};
use crate::math::CONTAINMENT_EPSILON;
use crate::model::{ResolvedOpening, SharedSide, Wall, WallSource, WallType};
use crate::resolver::opening::{resolve_opening, WallFrame};

use super::{SharedJoin, WallGraphBuilder};

impl WallGraphBuilder<'_, '_> {
    /// Finds every pair of facing room edges close enough to share a wall and
    /// builds one wall per uncovered piece of their overlap.
    pub(super) fn detect_shared(&mut self) -> Result<()> {
        let max_gap = self.units.max_shared_gap();
        let rooms = self.rooms;
        for (i, a) in rooms.iter().enumerate() {
            for (j, b) in rooms.iter().enumerate().skip(i + 1) {
                for direction in CardinalDirection::ALL {
                    let facing = direction.opposite();
                    let gap = direction.outward_sign() * (b.bounds.edge(facing) - a.bounds.edge(direction));
                    if gap < -CONTAINMENT_EPSILON || gap > max_gap + CONTAINMENT_EPSILON {
                        continue;
                    }
                    let Some(common) = overlap(
                        a.bounds.axis_range(direction),
                        b.bounds.axis_range(facing),
                    ) else {
                        continue;
                    };
                    let mut taken = self.consumed_ranges(i, direction);
                    taken.extend(self.consumed_ranges(j, facing));
                    for piece in subtract_intervals(common, &taken) {
                        self.add_shared(SharedJoin {
                            room_a: i,
                            room_b: j,
                            direction,
                            piece,
                        }, common)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Builds the shared wall for one piece of a facing pair.
    ///
    /// `common` is the whole overlap of the two interiors; override openings
    /// are positioned against it.
    fn add_shared(&mut self, join: SharedJoin, common: Interval) -> Result<()> {
        let SharedJoin {
            room_a,
            room_b,
            direction,
            piece,
        } = join;
        let facing = direction.opposite();
        let rooms = self.rooms;
        let (a, b) = (&rooms[room_a], &rooms[room_b]);
        let (spec_a, spec_b) = (a.walls[direction], b.walls[facing]);

        let thicker = if spec_b.thickness() > spec_a.thickness() {
            spec_b
        } else {
            spec_a
        };
        let config = self
            .overrides
            .iter()
            .find(|o| o.names(a.id(), direction) || o.names(b.id(), facing));
        let composition = match config {
            Some(config) => config.composition(thicker.composition, self.units)?,
            None => thicker.composition,
        };
        let wall_type = if spec_a.wall_type == WallType::LoadBearing
            || spec_b.wall_type == WallType::LoadBearing
        {
            WallType::LoadBearing
        } else {
            WallType::Interior
        };

        let thickness = composition.total_thickness;
        let center = (a.bounds.edge(direction) + b.bounds.edge(facing)) / 2.0;
        let inner_a = center - direction.outward_sign() * thickness / 2.0;
        let inner_b = center + direction.outward_sign() * thickness / 2.0;

        let mut openings: Vec<ResolvedOpening> = Vec::new();
        let template_a = &self.room_walls[room_a].walls[direction];
        let template_b = &self.room_walls[room_b].walls[facing];
        for (template, inner) in [(template_a, inner_a), (template_b, inner_b)] {
            for opening in openings_within(template, piece) {
                let mut opening = opening.clone();
                opening.realign(inner, thickness);
                openings.push(opening);
            }
        }
        if let Some(config) = config {
            let inner_face = if config.names(a.id(), direction) {
                inner_a
            } else {
                inner_b
            };
            let frame = WallFrame {
                name: config.reference,
                direction: config.direction,
                axis: common,
                inner_face,
                thickness,
            };
            for opening in &config.config.openings {
                let opening = resolve_opening(opening, &frame, config.target, self.units)?;
                if contains(piece, opening.axis_center()) {
                    openings.push(opening);
                }
            }
        }

        let mut gaps = self.room_walls[room_a].gaps[direction].clone();
        gaps.extend_from_slice(&self.room_walls[room_b].gaps[facing]);

        let (a_id, b_id) = (a.id().to_owned(), b.id().to_owned());
        let name = self.next_name(room_a, direction);
        trace!(wall = %name, with = %b_id, ?piece, thickness, "shared wall");
        let mut wall = Wall::new(
            name,
            a_id,
            direction,
            wall_type,
            composition,
            WallSource::Parent,
            piece,
            inner_a,
        );
        wall.shared_with = Some(SharedSide {
            room_id: b_id,
            direction: facing,
        });
        wall.set_openings(openings, &gaps);
        self.insert_room_wall(wall);

        self.consumed.entry((room_a, direction)).or_default().push(piece);
        self.consumed.entry((room_b, facing)).or_default().push(piece);
        self.joins.push(join);
        Ok(())
    }
}

/// Openings of `wall` whose centre lies within `piece`.
pub(super) fn openings_within(wall: &Wall, piece: Interval) -> impl Iterator<Item = &ResolvedOpening> {
    wall.openings
        .iter()
        .filter(move |o| contains(piece, o.axis_center()))
}
