use std::collections::HashMap;

use slotmap::SlotMap;

use crate::geometry::{CardinalDirection, DirectionMap};

use super::perimeter::PerimeterChain;
use super::wall::{Wall, WallId};

/// Plan-wide set of merged walls.
///
/// Walls live in an arena; the per-room and per-sub-space indices hold
/// [`WallId`]s, so a shared wall is one object reachable from both rooms.
/// Each index entry lists the walls on that side ordered along the axis.
#[derive(Debug, Default)]
pub struct WallGraph {
    walls: SlotMap<WallId, Wall>,
    by_room: HashMap<String, DirectionMap<Vec<WallId>>>,
    by_sub_space: HashMap<String, DirectionMap<Vec<WallId>>>,
    perimeter: Vec<PerimeterChain>,
}

impl WallGraph {
    pub(crate) fn from_parts(
        walls: SlotMap<WallId, Wall>,
        by_room: HashMap<String, DirectionMap<Vec<WallId>>>,
        by_sub_space: HashMap<String, DirectionMap<Vec<WallId>>>,
    ) -> Self {
        Self {
            walls,
            by_room,
            by_sub_space,
            perimeter: Vec::new(),
        }
    }

    pub(crate) fn set_perimeter(&mut self, perimeter: Vec<PerimeterChain>) {
        self.perimeter = perimeter;
    }

    /// Iterates every wall in creation order.
    pub fn walls(&self) -> impl Iterator<Item = (WallId, &Wall)> {
        self.walls.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.walls.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.walls.is_empty()
    }

    #[must_use]
    pub fn wall(&self, id: WallId) -> Option<&Wall> {
        self.walls.get(id)
    }

    /// Looks a wall up by its string id.
    #[must_use]
    pub fn wall_named(&self, id: &str) -> Option<&Wall> {
        self.walls.values().find(|w| w.id == id)
    }

    #[must_use]
    pub fn has_room(&self, room_id: &str) -> bool {
        self.by_room.contains_key(room_id)
    }

    #[must_use]
    pub fn has_sub_space(&self, sub_space_id: &str) -> bool {
        self.by_sub_space.contains_key(sub_space_id)
    }

    /// Ids of the walls on one side of a room, ordered along the axis.
    #[must_use]
    pub fn room_wall_ids(&self, room_id: &str, direction: CardinalDirection) -> &[WallId] {
        self.by_room
            .get(room_id)
            .map_or(&[], |sides| sides[direction].as_slice())
    }

    /// Walls on one side of a room, ordered along the axis.
    pub fn room_walls(
        &self,
        room_id: &str,
        direction: CardinalDirection,
    ) -> impl Iterator<Item = &Wall> {
        self.room_wall_ids(room_id, direction)
            .iter()
            .filter_map(|id| self.walls.get(*id))
    }

    /// The first wall on one side of a room.
    #[must_use]
    pub fn room_wall(&self, room_id: &str, direction: CardinalDirection) -> Option<&Wall> {
        self.room_walls(room_id, direction).next()
    }

    /// Every wall bounding a room, each listed once.
    #[must_use]
    pub fn walls_of_room(&self, room_id: &str) -> Vec<&Wall> {
        collect_unique(&self.walls, self.by_room.get(room_id))
    }

    /// Ids of the walls on one side of an enclosure or extension.
    #[must_use]
    pub fn sub_space_wall_ids(&self, sub_space_id: &str, direction: CardinalDirection) -> &[WallId] {
        self.by_sub_space
            .get(sub_space_id)
            .map_or(&[], |sides| sides[direction].as_slice())
    }

    /// Walls on one side of an enclosure or extension.
    pub fn sub_space_walls(
        &self,
        sub_space_id: &str,
        direction: CardinalDirection,
    ) -> impl Iterator<Item = &Wall> {
        self.sub_space_wall_ids(sub_space_id, direction)
            .iter()
            .filter_map(|id| self.walls.get(*id))
    }

    /// Every wall generated for an enclosure or extension.
    #[must_use]
    pub fn walls_of_sub_space(&self, sub_space_id: &str) -> Vec<&Wall> {
        collect_unique(&self.walls, self.by_sub_space.get(sub_space_id))
    }

    /// Closed building outlines traced from the exterior walls.
    #[must_use]
    pub fn perimeter(&self) -> &[PerimeterChain] {
        &self.perimeter
    }
}

fn collect_unique<'a>(
    walls: &'a SlotMap<WallId, Wall>,
    sides: Option<&DirectionMap<Vec<WallId>>>,
) -> Vec<&'a Wall> {
    let Some(sides) = sides else {
        return Vec::new();
    };
    let mut seen: Vec<WallId> = Vec::new();
    for (_, ids) in sides.iter() {
        for id in ids {
            if !seen.contains(id) {
                seen.push(*id);
            }
        }
    }
    seen.into_iter().filter_map(|id| walls.get(id)).collect()
}
