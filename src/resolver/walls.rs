use crate::error::Result;
use crate::geometry::{CardinalDirection, DirectionMap};
use crate::math::interval::Interval;
use crate::model::{Wall, WallSource};
use crate::units::UnitSystem;

use super::opening::{resolve_opening, WallFrame};
use super::placement::PlacedRoom;
use super::sub_space::SubSpaceLayout;

/// A room's four bounding walls before they are merged with neighbours.
#[derive(Debug, Clone)]
pub struct RoomWalls {
    pub walls: DirectionMap<Wall>,
    /// Ranges left open for extensions, per side.
    pub gaps: DirectionMap<Vec<Interval>>,
}

/// Builds the four walls around a room's interior.
///
/// North and south walls run through the corners, ending flush with the
/// outer faces of the east and west walls. Openings are positioned against
/// the interior span of each side.
///
/// # Errors
///
/// Propagates opening placement errors.
pub fn resolve_room_walls(
    room: &PlacedRoom<'_>,
    sub_spaces: &SubSpaceLayout,
    units: UnitSystem,
) -> Result<RoomWalls> {
    let bounds = room.bounds;
    let gaps = DirectionMap::from_fn(|direction| sub_spaces.gaps_on(direction));
    let walls = DirectionMap::try_from_fn(|direction| -> Result<Wall> {
        let spec = room.walls[direction];
        let interior = bounds.axis_range(direction);
        let axis = if direction.is_horizontal() {
            (
                interior.0 - room.thickness(CardinalDirection::West),
                interior.1 + room.thickness(CardinalDirection::East),
            )
        } else {
            interior
        };
        let inner_face = bounds.edge(direction);
        let name = format!("{}.{direction}", room.id());
        let frame = WallFrame {
            name: &name,
            direction,
            axis: interior,
            inner_face,
            thickness: spec.thickness(),
        };
        let openings = room
            .config
            .walls
            .openings(direction)
            .iter()
            .map(|o| resolve_opening(o, &frame, room.id(), units))
            .collect::<Result<Vec<_>>>()?;

        let mut wall = Wall::new(
            name.clone(),
            room.id().to_owned(),
            direction,
            spec.wall_type,
            spec.composition,
            WallSource::Parent,
            axis,
            inner_face,
        );
        wall.set_openings(openings, &gaps[direction]);
        Ok(wall)
    })?;
    Ok(RoomWalls { walls, gaps })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::RoomConfig;
    use crate::resolver::placement::place_rooms;
    use crate::resolver::sub_space::resolve_sub_spaces;
    use approx::assert_abs_diff_eq;
    use serde_json::json;

    const EXT: f64 = 6.5 / 12.0;

    fn walls_for(room: serde_json::Value) -> RoomWalls {
        let rooms: Vec<RoomConfig> = serde_json::from_value(json!([room])).unwrap();
        let placed = place_rooms(&rooms, UnitSystem::Imperial).unwrap();
        let layout = resolve_sub_spaces(&placed[0], UnitSystem::Imperial).unwrap();
        resolve_room_walls(&placed[0], &layout, UnitSystem::Imperial).unwrap()
    }

    #[test]
    fn horizontal_walls_span_corners() {
        let walls = walls_for(json!({"id": "a", "width": 12, "height": 10}));
        let north = &walls.walls[CardinalDirection::North];
        assert_abs_diff_eq!(north.axis_range().0, -EXT, epsilon = 1e-9);
        assert_abs_diff_eq!(north.axis_range().1, 12.0 + EXT, epsilon = 1e-9);
        assert_abs_diff_eq!(north.inner_face(), 10.0, epsilon = 1e-9);

        let east = &walls.walls[CardinalDirection::East];
        assert_eq!(east.axis_range(), (0.0, 10.0));
        assert_abs_diff_eq!(east.outer_face(), 12.0 + EXT, epsilon = 1e-9);
    }

    #[test]
    fn openings_measured_from_interior_start() {
        let walls = walls_for(json!({
            "id": "a", "width": 12, "height": 10,
            "walls": {"south": {"openings": [{"type": "door", "width": 3, "position": 2}]}}
        }));
        let south = &walls.walls[CardinalDirection::South];
        assert_eq!(south.openings[0].axis_range(), (2.0, 5.0));
        assert_eq!(south.segments.len(), 2);
        assert_abs_diff_eq!(south.segments[0].x, -EXT, epsilon = 1e-9);
    }

    #[test]
    fn extension_gap_cut_from_parent_wall() {
        let walls = walls_for(json!({
            "id": "a", "width": 12, "height": 10,
            "extensions": [{"id": "bay", "wall": "north", "offset": 4, "width": 4, "depth": 2}]
        }));
        let north = &walls.walls[CardinalDirection::North];
        assert_eq!(walls.gaps[CardinalDirection::North], vec![(4.0, 8.0)]);
        assert_eq!(north.segments.len(), 2);
        assert_abs_diff_eq!(north.segments[0].right(), 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(north.segments[1].x, 8.0, epsilon = 1e-9);
    }
}
