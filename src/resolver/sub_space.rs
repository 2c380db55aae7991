//! Enclosures carved out of a room and extensions bumped out of it.

use tracing::trace;

use crate::config::{EnclosureConfig, EnclosurePlacement, ExtensionConfig, SpanLength, WallSpan};
use crate::error::{Result, SubSpaceError};
use crate::geometry::{CardinalDirection, Corner, Rect};
use crate::math::interval::Interval;
use crate::math::CONTAINMENT_EPSILON;
use crate::model::{
    EnclosureAnchor, OpeningType, ResolvedEnclosure, ResolvedExtension, Wall, WallSource,
    WallType,
};
use crate::units::UnitSystem;

use super::composition::{resolve_wall_spec, WallSpec};
use super::opening::{resolve_opening, WallFrame};
use super::placement::PlacedRoom;

/// A stretch of a parent wall opened up by an extension.
#[derive(Debug, Clone, PartialEq)]
pub struct WallGap {
    pub direction: CardinalDirection,
    pub range: Interval,
    pub sub_space_id: String,
}

/// Everything a room's sub-spaces contribute to the plan.
#[derive(Debug, Default)]
pub struct SubSpaceLayout {
    pub enclosures: Vec<ResolvedEnclosure>,
    pub extensions: Vec<ResolvedExtension>,
    /// Partition walls of enclosures and bounding walls of extensions.
    pub walls: Vec<Wall>,
    /// Gaps the parent room's walls must leave open.
    pub wall_gaps: Vec<WallGap>,
}

impl SubSpaceLayout {
    /// Gap ranges on one of the parent's walls.
    #[must_use]
    pub fn gaps_on(&self, direction: CardinalDirection) -> Vec<Interval> {
        self.wall_gaps
            .iter()
            .filter(|g| g.direction == direction)
            .map(|g| g.range)
            .collect()
    }
}

/// Resolves the enclosures and extensions of one room.
///
/// Parent walls are never shortened for enclosures: the enclosure's own
/// partition walls close off the carved space.
///
/// # Errors
///
/// Returns `SubSpaceError` for duplicate ids, sub-spaces that exceed the
/// parent, overlapping sub-spaces, and impossible facings.
pub fn resolve_sub_spaces(room: &PlacedRoom<'_>, units: UnitSystem) -> Result<SubSpaceLayout> {
    check_unique_ids(room)?;

    let mut layout = SubSpaceLayout::default();
    for config in &room.config.enclosures {
        let enclosure = resolve_enclosure(room, config, units)?;
        if !room.bounds.contains_rect(&enclosure.bounds) {
            return Err(SubSpaceError::ExceedsParent {
                kind: "enclosure",
                id: enclosure.id,
                room: room.id().to_owned(),
            }
            .into());
        }
        layout.walls.extend(enclosure_walls(room, config, &enclosure, units)?);
        layout.enclosures.push(enclosure);
    }

    for config in &room.config.extensions {
        let (extension, range) = resolve_extension(room, config, units)?;
        layout.walls.extend(extension_walls(room, config, &extension, units)?);
        layout.wall_gaps.push(WallGap {
            direction: config.wall,
            range,
            sub_space_id: extension.id.clone(),
        });
        layout.extensions.push(extension);
    }

    check_overlaps(room, &layout)?;
    trace!(
        room = %room.id(),
        enclosures = layout.enclosures.len(),
        extensions = layout.extensions.len(),
        walls = layout.walls.len(),
        "resolved sub-spaces"
    );
    Ok(layout)
}

fn check_unique_ids(room: &PlacedRoom<'_>) -> Result<()> {
    let ids = room
        .config
        .enclosures
        .iter()
        .map(|e| e.id.as_str())
        .chain(room.config.extensions.iter().map(|e| e.id.as_str()));
    let mut seen: Vec<&str> = Vec::new();
    for id in ids {
        if seen.contains(&id) {
            return Err(SubSpaceError::DuplicateId {
                id: id.to_owned(),
                room: room.id().to_owned(),
            }
            .into());
        }
        seen.push(id);
    }
    Ok(())
}

fn check_overlaps(room: &PlacedRoom<'_>, layout: &SubSpaceLayout) -> Result<()> {
    let spaces: Vec<(&str, &Rect)> = layout
        .enclosures
        .iter()
        .map(|e| (e.id.as_str(), &e.bounds))
        .chain(layout.extensions.iter().map(|e| (e.id.as_str(), &e.bounds)))
        .collect();
    for (i, (first, a)) in spaces.iter().enumerate() {
        for (second, b) in &spaces[i + 1..] {
            if a.overlaps(b) {
                return Err(SubSpaceError::Overlap {
                    first: (*first).to_owned(),
                    second: (*second).to_owned(),
                    room: room.id().to_owned(),
                }
                .into());
            }
        }
    }
    Ok(())
}

fn resolve_enclosure(
    room: &PlacedRoom<'_>,
    config: &EnclosureConfig,
    units: UnitSystem,
) -> Result<ResolvedEnclosure> {
    let parent = room.bounds;
    let depth = config.depth.resolve(units)?;
    let (bounds, facing, anchor) = match &config.placement {
        EnclosurePlacement::Corner { corner, length } => {
            let length = length.resolve(units)?;
            let facing = corner_facing(config, *corner, &parent)?;
            let (width, height) = if facing.is_horizontal() {
                (length, depth)
            } else {
                (depth, length)
            };
            let x = match corner.horizontal_side() {
                CardinalDirection::West => parent.x,
                _ => parent.right() - width,
            };
            let y = match corner.vertical_side() {
                CardinalDirection::South => parent.y,
                _ => parent.top() - height,
            };
            (
                Rect::new(x, y, width, height),
                facing,
                EnclosureAnchor::Corner(*corner),
            )
        }
        EnclosurePlacement::Wall { wall, span } => {
            let facing = wall.opposite();
            if let Some(explicit) = config.facing {
                if explicit != facing {
                    return Err(SubSpaceError::InvalidFacing {
                        id: config.id.clone(),
                        anchor: format!("{wall} wall"),
                        facing: explicit.to_string(),
                    }
                    .into());
                }
            }
            let along = span_range(&config.id, parent.axis_range(*wall), *wall, span, units)?;
            let bounds = match wall {
                CardinalDirection::North => {
                    Rect::from_corners(along.0, parent.top() - depth, along.1, parent.top())
                }
                CardinalDirection::South => {
                    Rect::from_corners(along.0, parent.y, along.1, parent.y + depth)
                }
                CardinalDirection::East => {
                    Rect::from_corners(parent.right() - depth, along.0, parent.right(), along.1)
                }
                CardinalDirection::West => {
                    Rect::from_corners(parent.x, along.0, parent.x + depth, along.1)
                }
            };
            (bounds, facing, EnclosureAnchor::Wall(*wall))
        }
    };

    Ok(ResolvedEnclosure {
        id: config.id.clone(),
        label: config.label.clone().unwrap_or_else(|| config.id.clone()),
        parent_room_id: room.id().to_owned(),
        bounds,
        facing,
        anchor,
    })
}

/// Chooses the facing of a corner enclosure.
///
/// Priority: explicit `facing`, then the wall holding its only door, then the
/// side that runs its length along the parent's shorter dimension.
fn corner_facing(config: &EnclosureConfig, corner: Corner, parent: &Rect) -> Result<CardinalDirection> {
    let horizontal_facing = corner.horizontal_side().opposite();
    let vertical_facing = corner.vertical_side().opposite();
    let allowed = |d: CardinalDirection| d == horizontal_facing || d == vertical_facing;

    if let Some(facing) = config.facing {
        if !allowed(facing) {
            return Err(SubSpaceError::InvalidFacing {
                id: config.id.clone(),
                anchor: format!("{} corner", corner.as_str()),
                facing: facing.to_string(),
            }
            .into());
        }
        return Ok(facing);
    }

    let doors: Vec<CardinalDirection> = CardinalDirection::ALL
        .into_iter()
        .flat_map(|d| {
            config
                .walls
                .openings(d)
                .iter()
                .filter(|o| o.opening_type == OpeningType::Door)
                .map(move |_| d)
        })
        .collect();
    if let [door] = doors.as_slice() {
        if allowed(*door) {
            return Ok(*door);
        }
    }

    Ok(if parent.height <= parent.width {
        horizontal_facing
    } else {
        vertical_facing
    })
}

/// Resolves a `from`/`offset`/length span along a wall's axis range.
fn span_range(
    id: &str,
    range: Interval,
    wall: CardinalDirection,
    span: &WallSpan,
    units: UnitSystem,
) -> Result<Interval> {
    let offset = match &span.offset {
        Some(offset) => offset.resolve(units)?,
        None => 0.0,
    };
    let (start_end, far_end) = wall.wall_ends();
    let from = span.from.unwrap_or(start_end);
    if from != start_end && from != far_end {
        return Err(SubSpaceError::InvalidFrom {
            id: id.to_owned(),
            from: from.to_string(),
            wall: wall.to_string(),
        }
        .into());
    }
    let from_start = from == start_end;
    Ok(match &span.length {
        SpanLength::Full if from_start => (range.0 + offset, range.1),
        SpanLength::Full => (range.0, range.1 - offset),
        SpanLength::Length(length) => {
            let length = length.resolve(units)?;
            if from_start {
                (range.0 + offset, range.0 + offset + length)
            } else {
                (range.1 - offset - length, range.1 - offset)
            }
        }
    })
}

fn resolve_extension(
    room: &PlacedRoom<'_>,
    config: &ExtensionConfig,
    units: UnitSystem,
) -> Result<(ResolvedExtension, Interval)> {
    let parent = room.bounds;
    let wall_range = parent.axis_range(config.wall);
    let along = span_range(&config.id, wall_range, config.wall, &config.span, units)?;
    if along.0 < wall_range.0 - CONTAINMENT_EPSILON || along.1 > wall_range.1 + CONTAINMENT_EPSILON {
        return Err(SubSpaceError::ExceedsParent {
            kind: "extension",
            id: config.id.clone(),
            room: room.id().to_owned(),
        }
        .into());
    }
    let depth = config.depth.resolve(units)?;
    let bounds = match config.wall {
        CardinalDirection::North => {
            Rect::from_corners(along.0, parent.top(), along.1, parent.top() + depth)
        }
        CardinalDirection::South => Rect::from_corners(along.0, parent.y - depth, along.1, parent.y),
        CardinalDirection::East => {
            Rect::from_corners(parent.right(), along.0, parent.right() + depth, along.1)
        }
        CardinalDirection::West => Rect::from_corners(parent.x - depth, along.0, parent.x, along.1),
    };
    let extension = ResolvedExtension {
        id: config.id.clone(),
        label: config.label.clone().unwrap_or_else(|| config.id.clone()),
        parent_room_id: room.id().to_owned(),
        bounds,
        parent_wall: config.wall,
    };
    Ok((extension, along))
}

/// Partition walls on the enclosure's exposed edges, inside its bounds.
fn enclosure_walls(
    room: &PlacedRoom<'_>,
    config: &EnclosureConfig,
    enclosure: &ResolvedEnclosure,
    units: UnitSystem,
) -> Result<Vec<Wall>> {
    let mut walls = Vec::new();
    for direction in CardinalDirection::ALL {
        let edge = enclosure.bounds.edge(direction);
        if (edge - room.bounds.edge(direction)).abs() <= CONTAINMENT_EPSILON {
            continue;
        }
        let spec = resolve_wall_spec(config.walls.get(direction), WallType::Interior, units)?;
        let inner_face = edge - direction.outward_sign() * spec.thickness();
        let wall = sub_space_wall(
            room,
            &enclosure.id,
            WallSource::Enclosure {
                sub_space_id: enclosure.id.clone(),
            },
            direction,
            spec,
            enclosure.bounds.axis_range(direction),
            inner_face,
            config.walls.openings(direction),
            units,
        )?;
        walls.push(wall);
    }
    Ok(walls)
}

/// Walls on the three sides of an extension away from its parent, outside
/// its bounds. Horizontal walls run through the corners.
fn extension_walls(
    room: &PlacedRoom<'_>,
    config: &ExtensionConfig,
    extension: &ResolvedExtension,
    units: UnitSystem,
) -> Result<Vec<Wall>> {
    let attached = config.wall.opposite();
    let parent_spec = room.walls[config.wall];
    let spec_for = |direction: CardinalDirection| -> Result<WallSpec> {
        Ok(match config.walls.get(direction) {
            Some(wall) => resolve_wall_spec(Some(wall), parent_spec.wall_type, units)?,
            None => parent_spec,
        })
    };

    let mut walls = Vec::new();
    for direction in CardinalDirection::ALL {
        if direction == attached {
            continue;
        }
        let spec = spec_for(direction)?;
        let mut axis = extension.bounds.axis_range(direction);
        if direction.is_horizontal() {
            let (start_side, end_side) = direction.wall_ends();
            if start_side != attached {
                axis.0 -= spec_for(start_side)?.thickness();
            }
            if end_side != attached {
                axis.1 += spec_for(end_side)?.thickness();
            }
        }
        let wall = sub_space_wall(
            room,
            &extension.id,
            WallSource::Extension {
                sub_space_id: extension.id.clone(),
            },
            direction,
            spec,
            axis,
            extension.bounds.edge(direction),
            config.walls.openings(direction),
            units,
        )?;
        walls.push(wall);
    }
    Ok(walls)
}

#[allow(clippy::too_many_arguments)]
fn sub_space_wall(
    room: &PlacedRoom<'_>,
    sub_space_id: &str,
    source: WallSource,
    direction: CardinalDirection,
    spec: WallSpec,
    axis: Interval,
    inner_face: f64,
    openings: &[crate::config::OpeningConfig],
    units: UnitSystem,
) -> Result<Wall> {
    let name = format!("{sub_space_id}.{direction}");
    let frame = WallFrame {
        name: &name,
        direction,
        axis,
        inner_face,
        thickness: spec.thickness(),
    };
    let openings = openings
        .iter()
        .map(|o| resolve_opening(o, &frame, sub_space_id, units))
        .collect::<Result<Vec<_>>>()?;
    let mut wall = Wall::new(
        name.clone(),
        room.id().to_owned(),
        direction,
        spec.wall_type,
        spec.composition,
        source,
        axis,
        inner_face,
    );
    wall.set_openings(openings, &[]);
    Ok(wall)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::RoomConfig;
    use crate::resolver::placement::place_rooms;
    use approx::assert_abs_diff_eq;
    use serde_json::json;

    fn layout_for(room: serde_json::Value) -> Result<SubSpaceLayout> {
        let rooms: Vec<RoomConfig> = serde_json::from_value(json!([room])).unwrap();
        let placed = place_rooms(&rooms, UnitSystem::Imperial).unwrap();
        resolve_sub_spaces(&placed[0], UnitSystem::Imperial)
    }

    #[test]
    fn northwest_closet_facing_east() {
        let layout = layout_for(json!({
            "id": "bed", "width": 12, "height": 10,
            "enclosures": [{
                "id": "closet", "corner": "northwest", "facing": "east",
                "length": "6ft", "depth": "2ft 4in"
            }]
        }))
        .unwrap();
        let closet = &layout.enclosures[0];
        assert_abs_diff_eq!(closet.bounds.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(closet.bounds.y, 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(closet.bounds.width, 2.333, epsilon = 1e-3);
        assert_abs_diff_eq!(closet.bounds.height, 6.0, epsilon = 1e-9);

        let mut directions: Vec<CardinalDirection> = layout.walls.iter().map(|w| w.direction).collect();
        directions.sort();
        assert_eq!(directions, vec![CardinalDirection::South, CardinalDirection::East]);
        assert!(layout
            .walls
            .iter()
            .all(|w| w.wall_type == WallType::Interior && w.source.sub_space_id() == Some("closet")));
    }

    #[test]
    fn corner_facing_from_single_door() {
        let layout = layout_for(json!({
            "id": "bed", "width": 12, "height": 10,
            "enclosures": [{
                "id": "closet", "corner": "southeast", "length": 5, "depth": 2,
                "walls": {"north": {"openings": [{"type": "door", "width": 2.5}]}}
            }]
        }))
        .unwrap();
        let closet = &layout.enclosures[0];
        assert_eq!(closet.facing, CardinalDirection::North);
        assert_abs_diff_eq!(closet.bounds.x, 7.0, epsilon = 1e-9);
        assert_abs_diff_eq!(closet.bounds.width, 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(closet.bounds.height, 2.0, epsilon = 1e-9);
        let north = layout.walls.iter().find(|w| w.direction == CardinalDirection::North).unwrap();
        assert_eq!(north.openings.len(), 1);
    }

    #[test]
    fn corner_facing_defaults_by_shorter_dimension() {
        let layout = layout_for(json!({
            "id": "hall", "width": 6, "height": 14,
            "enclosures": [{"id": "c", "corner": "southwest", "length": 4, "depth": 2}]
        }))
        .unwrap();
        assert_eq!(layout.enclosures[0].facing, CardinalDirection::North);
        assert_abs_diff_eq!(layout.enclosures[0].bounds.width, 4.0, epsilon = 1e-9);
    }

    #[test]
    fn north_extension_from_east() {
        let layout = layout_for(json!({
            "id": "living", "width": 12, "height": 10,
            "extensions": [{
                "id": "bay", "wall": "north", "from": "east",
                "offset": "4ft 8in", "width": "3ft 9in", "depth": "5ft 4in"
            }]
        }))
        .unwrap();
        let bay = &layout.extensions[0];
        assert_abs_diff_eq!(bay.bounds.x, 12.0 - 56.0 / 12.0 - 3.75, epsilon = 1e-9);
        assert_abs_diff_eq!(bay.bounds.x, 3.583, epsilon = 1e-3);
        assert_abs_diff_eq!(bay.bounds.y, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(bay.bounds.width, 3.75, epsilon = 1e-9);
        assert_abs_diff_eq!(bay.bounds.height, 5.333, epsilon = 1e-3);

        assert_eq!(layout.walls.len(), 3);
        assert_eq!(layout.gaps_on(CardinalDirection::North).len(), 1);
        let far = layout.walls.iter().find(|w| w.direction == CardinalDirection::North).unwrap();
        assert_abs_diff_eq!(far.inner_face(), bay.bounds.top(), epsilon = 1e-9);
        assert!(far.axis_range().0 < bay.bounds.x);
    }

    #[test]
    fn enclosure_longer_than_room_exceeds() {
        let err = layout_for(json!({
            "id": "bed", "width": 12, "height": 10,
            "enclosures": [{"id": "c", "corner": "northwest", "facing": "east", "length": "15ft", "depth": 2}]
        }))
        .unwrap_err();
        assert!(err.to_string().to_lowercase().contains("exceeds"));
    }

    #[test]
    fn overlapping_enclosures() {
        let err = layout_for(json!({
            "id": "bed", "width": 12, "height": 10,
            "enclosures": [
                {"id": "a", "corner": "northwest", "facing": "east", "length": 6, "depth": 2},
                {"id": "b", "wall": "north", "from": "west", "offset": 1, "length": 4, "depth": 3}
            ]
        }))
        .unwrap_err();
        assert!(err.to_string().to_lowercase().contains("overlap"));
    }

    #[test]
    fn duplicate_sub_space_id() {
        let err = layout_for(json!({
            "id": "bed", "width": 12, "height": 10,
            "enclosures": [
                {"id": "c", "corner": "northwest", "length": 3, "depth": 2},
                {"id": "c", "corner": "southeast", "length": 3, "depth": 2}
            ]
        }))
        .unwrap_err();
        let message = err.to_string().to_lowercase();
        assert!(message.contains("duplicate") && message.contains(" id "));
    }

    #[test]
    fn extension_wider_than_wall_exceeds() {
        let err = layout_for(json!({
            "id": "den", "width": 8, "height": 8,
            "extensions": [{"id": "x", "wall": "south", "offset": 6, "width": 4, "depth": 2}]
        }))
        .unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn corner_cannot_face_its_own_walls() {
        let err = layout_for(json!({
            "id": "bed", "width": 12, "height": 10,
            "enclosures": [{"id": "c", "corner": "northwest", "facing": "north", "length": 3, "depth": 2}]
        }));
        assert!(err.is_err());
    }
}
