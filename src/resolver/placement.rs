use tracing::trace;

use crate::config::{Alignment, RoomConfig, RoomPlacement};
use crate::error::{PlacementError, Result};
use crate::geometry::{CardinalDirection, DirectionMap, Rect};
use crate::model::WallType;
use crate::units::UnitSystem;

use super::composition::{resolve_wall_spec, WallSpec};

/// A room with its interior rectangle fixed on the plan.
#[derive(Debug, Clone)]
pub struct PlacedRoom<'a> {
    pub config: &'a RoomConfig,
    pub bounds: Rect,
    pub walls: DirectionMap<WallSpec>,
}

impl PlacedRoom<'_> {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.config.id
    }

    #[must_use]
    pub fn label(&self) -> String {
        self.config
            .label
            .clone()
            .unwrap_or_else(|| self.config.id.clone())
    }

    #[must_use]
    pub fn thickness(&self, direction: CardinalDirection) -> f64 {
        self.walls[direction].thickness()
    }
}

/// Places every room in declaration order.
///
/// A room adjacent to another is separated from it by the thicker of the two
/// facing walls.
///
/// # Errors
///
/// Returns `PlacementError` for duplicate ids or references to rooms that are
/// not placed yet, and `ConfigError` for unparseable dimensions.
pub fn place_rooms(rooms: &[RoomConfig], units: UnitSystem) -> Result<Vec<PlacedRoom<'_>>> {
    let mut placed: Vec<PlacedRoom<'_>> = Vec::with_capacity(rooms.len());
    for config in rooms {
        if placed.iter().any(|p| p.id() == config.id) {
            return Err(PlacementError::DuplicateRoom(config.id.clone()).into());
        }
        let width = config.width.resolve(units)?;
        let height = config.height.resolve(units)?;
        let walls = DirectionMap::try_from_fn(|direction| {
            resolve_wall_spec(config.walls.get(direction), WallType::Exterior, units)
        })?;

        let (x, y) = match &config.placement {
            RoomPlacement::Origin => (0.0, 0.0),
            RoomPlacement::Position([x, y]) => (x.resolve(units)?, y.resolve(units)?),
            RoomPlacement::Adjacent(adjacent) => {
                let target = placed
                    .iter()
                    .find(|p| p.id() == adjacent.room)
                    .ok_or_else(|| PlacementError::UnknownAdjacentRoom {
                        room: config.id.clone(),
                        target: adjacent.room.clone(),
                    })?;
                let side = adjacent.wall;
                let gap = target
                    .thickness(side)
                    .max(walls[side.opposite()].thickness());
                let offset = match &adjacent.offset {
                    Some(offset) => offset.resolve(units)?,
                    None => 0.0,
                };
                let t = target.bounds;
                match side {
                    CardinalDirection::North => (
                        align(t.x, t.width, width, adjacent.alignment, offset),
                        t.top() + gap,
                    ),
                    CardinalDirection::South => (
                        align(t.x, t.width, width, adjacent.alignment, offset),
                        t.y - gap - height,
                    ),
                    CardinalDirection::East => (
                        t.right() + gap,
                        align(t.y, t.height, height, adjacent.alignment, offset),
                    ),
                    CardinalDirection::West => (
                        t.x - gap - width,
                        align(t.y, t.height, height, adjacent.alignment, offset),
                    ),
                }
            }
        };

        let bounds = Rect::new(x, y, width, height);
        trace!(room = %config.id, ?bounds, "placed room");
        placed.push(PlacedRoom {
            config,
            bounds,
            walls,
        });
    }
    Ok(placed)
}

fn align(start: f64, length: f64, size: f64, alignment: Alignment, offset: f64) -> f64 {
    match alignment {
        Alignment::Start => start + offset,
        Alignment::Center => start + (length - size) / 2.0 + offset,
        Alignment::End => start + length - size - offset,
    }
}
