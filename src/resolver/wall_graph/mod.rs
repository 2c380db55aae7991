//! Merges independently built room walls into one plan-wide [`WallGraph`].
//!
//! The builder owns all transient bookkeeping: which stretch of each room side
//! is already covered by a shared wall, the in-progress indices, and the
//! shared joins the corner pass needs. [`WallGraphBuilder::build`] consumes it.

mod corners;
mod remainder;
mod shared;

use std::collections::HashMap;

use slotmap::SlotMap;
use tracing::debug;

use crate::config::SharedWallConfig;
use crate::error::{ConfigError, Result};
use crate::geometry::{CardinalDirection, DirectionMap};
use crate::math::interval::Interval;
use crate::model::{Wall, WallComposition, WallGraph, WallId};
use crate::units::UnitSystem;

use super::perimeter::trace_perimeter;
use super::placement::PlacedRoom;
use super::reference::WallRef;
use super::walls::RoomWalls;

/// A `shared_walls` entry, matched to whichever side of the wall it names.
#[derive(Debug)]
struct SharedOverride<'p> {
    reference: &'p str,
    target: &'p str,
    direction: CardinalDirection,
    config: &'p SharedWallConfig,
}

impl SharedOverride<'_> {
    fn names(&self, room_id: &str, direction: CardinalDirection) -> bool {
        self.target == room_id && self.direction == direction
    }

    /// Composition of the shared wall; finish carries over from `fallback`.
    fn composition(
        &self,
        fallback: WallComposition,
        units: UnitSystem,
    ) -> std::result::Result<WallComposition, ConfigError> {
        let finish = fallback.finish;
        Ok(match (&self.config.thickness, self.config.stud) {
            (Some(thickness), stud) => {
                WallComposition::with_thickness(stud, finish, thickness.resolve(units)?)
            }
            (None, Some(stud)) => WallComposition::from_stud(stud, finish, units),
            (None, None) => fallback,
        })
    }
}

/// A shared wall between two rooms, kept for the corner pass.
#[derive(Debug, Clone, Copy)]
struct SharedJoin {
    /// Room whose `direction` side the wall is.
    room_a: usize,
    room_b: usize,
    direction: CardinalDirection,
    piece: Interval,
}

/// Builds a [`WallGraph`] from placed rooms and their candidate walls.
#[derive(Debug)]
pub struct WallGraphBuilder<'p, 'c> {
    rooms: &'p [PlacedRoom<'c>],
    room_walls: Vec<RoomWalls>,
    overrides: Vec<SharedOverride<'p>>,
    units: UnitSystem,
    consumed: HashMap<(usize, CardinalDirection), Vec<Interval>>,
    names: HashMap<(usize, CardinalDirection), usize>,
    joins: Vec<SharedJoin>,
    walls: SlotMap<WallId, Wall>,
    by_room: HashMap<String, DirectionMap<Vec<WallId>>>,
    by_sub_space: HashMap<String, DirectionMap<Vec<WallId>>>,
}

impl<'p, 'c> WallGraphBuilder<'p, 'c> {
    /// Creates a builder; `room_walls` runs parallel to `rooms`.
    ///
    /// # Errors
    ///
    /// Returns `WallReferenceError` when a `shared_walls` entry names a wall
    /// that does not parse or a room that does not exist.
    pub fn new(
        rooms: &'p [PlacedRoom<'c>],
        room_walls: Vec<RoomWalls>,
        shared_walls: &'p [SharedWallConfig],
        units: UnitSystem,
    ) -> Result<Self> {
        let overrides = shared_walls
            .iter()
            .map(|config| -> Result<SharedOverride<'p>> {
                let parsed = WallRef::resolve(&config.wall, |id| rooms.iter().any(|r| r.id() == id))?;
                Ok(SharedOverride {
                    reference: &config.wall,
                    target: parsed.target,
                    direction: parsed.direction,
                    config,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            rooms,
            room_walls,
            overrides,
            units,
            consumed: HashMap::new(),
            names: HashMap::new(),
            joins: Vec::new(),
            walls: SlotMap::with_key(),
            by_room: HashMap::new(),
            by_sub_space: HashMap::new(),
        })
    }

    /// Runs every merge pass and freezes the result.
    ///
    /// `sub_space_walls` are indexed by their sub-space and never merged.
    ///
    /// # Errors
    ///
    /// Propagates opening placement errors from `shared_walls` overrides.
    pub fn build(mut self, sub_space_walls: Vec<Wall>) -> Result<WallGraph> {
        self.detect_shared()?;
        let shared = self.walls.len();
        self.add_remainders();
        self.extend_corners();

        for wall in sub_space_walls {
            let Some(sub_space_id) = wall.source.sub_space_id().map(str::to_owned) else {
                continue;
            };
            let direction = wall.direction;
            let id = self.walls.insert(wall);
            self.by_sub_space.entry(sub_space_id).or_default()[direction].push(id);
        }

        let walls = &self.walls;
        let axis_start = |id: &WallId| walls.get(*id).map_or(0.0, |w| w.axis_range().0);
        for sides in self.by_room.values_mut().chain(self.by_sub_space.values_mut()) {
            for direction in CardinalDirection::ALL {
                sides[direction].sort_by(|a, b| axis_start(a).total_cmp(&axis_start(b)));
            }
        }

        let mut graph = WallGraph::from_parts(self.walls, self.by_room, self.by_sub_space);
        let perimeter = trace_perimeter(&graph);
        debug!(
            walls = graph.len(),
            shared,
            chains = perimeter.len(),
            "built wall graph"
        );
        graph.set_perimeter(perimeter);
        Ok(graph)
    }

    fn consumed_ranges(&self, room: usize, direction: CardinalDirection) -> Vec<Interval> {
        self.consumed
            .get(&(room, direction))
            .cloned()
            .unwrap_or_default()
    }

    /// Next wall id for a room side: `room.dir`, then `room.dir-2`, …
    fn next_name(&mut self, room: usize, direction: CardinalDirection) -> String {
        let count = self.names.entry((room, direction)).or_insert(0);
        *count += 1;
        let base = format!("{}.{direction}", self.rooms[room].id());
        if *count == 1 {
            base
        } else {
            format!("{base}-{count}")
        }
    }

    fn insert_room_wall(&mut self, wall: Wall) -> WallId {
        let sides = [
            Some((wall.room_id.clone(), wall.direction)),
            wall.shared_with
                .as_ref()
                .map(|side| (side.room_id.clone(), side.direction)),
        ];
        let id = self.walls.insert(wall);
        for (room_id, direction) in sides.into_iter().flatten() {
            self.by_room.entry(room_id).or_default()[direction].push(id);
        }
        id
    }
}
