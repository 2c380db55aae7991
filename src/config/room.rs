use serde::Deserialize;

use crate::geometry::CardinalDirection;
use crate::model::{StudSize, WallType};
use crate::units::Dimension;

use super::opening::OpeningConfig;
use super::sub_space::{EnclosureConfig, ExtensionConfig};

/// How a room is placed on the plan.
#[derive(Debug, Clone, PartialEq)]
pub enum RoomPlacement {
    /// No position given: the room sits at the plan origin.
    Origin,
    /// Absolute bottom-left corner of the interior.
    Position([Dimension; 2]),
    /// Against a wall of a previously placed room.
    Adjacent(AdjacentTo),
}

/// Where along the neighbour's wall a room is aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Start,
    Center,
    End,
}

/// Places a room against `wall` of `room`.
///
/// `offset` slides the room along that wall: away from the start for `start`
/// and `center`, back from the end for `end`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdjacentTo {
    pub room: String,
    pub wall: CardinalDirection,
    #[serde(default)]
    pub alignment: Alignment,
    #[serde(default)]
    pub offset: Option<Dimension>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WallConfig {
    #[serde(rename = "type", default)]
    pub wall_type: Option<WallType>,
    #[serde(default)]
    pub stud: Option<StudSize>,
    /// Finish thickness per side.
    #[serde(default)]
    pub finish: Option<Dimension>,
    /// Explicit total thickness, overriding stud and finish.
    #[serde(default)]
    pub thickness: Option<Dimension>,
    #[serde(default)]
    pub openings: Vec<OpeningConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WallsConfig {
    #[serde(default)]
    pub north: Option<WallConfig>,
    #[serde(default)]
    pub south: Option<WallConfig>,
    #[serde(default)]
    pub east: Option<WallConfig>,
    #[serde(default)]
    pub west: Option<WallConfig>,
}

impl WallsConfig {
    #[must_use]
    pub fn get(&self, direction: CardinalDirection) -> Option<&WallConfig> {
        match direction {
            CardinalDirection::North => self.north.as_ref(),
            CardinalDirection::South => self.south.as_ref(),
            CardinalDirection::East => self.east.as_ref(),
            CardinalDirection::West => self.west.as_ref(),
        }
    }

    /// Openings configured on one side, empty when the side is absent.
    #[must_use]
    pub fn openings(&self, direction: CardinalDirection) -> &[OpeningConfig] {
        self.get(direction).map_or(&[], |w| w.openings.as_slice())
    }
}

/// A rectangular room.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawRoomConfig")]
pub struct RoomConfig {
    pub id: String,
    pub label: Option<String>,
    /// Interior clear width (X).
    pub width: Dimension,
    /// Interior clear depth (Y).
    pub height: Dimension,
    pub placement: RoomPlacement,
    pub walls: WallsConfig,
    pub enclosures: Vec<EnclosureConfig>,
    pub extensions: Vec<ExtensionConfig>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRoomConfig {
    id: String,
    #[serde(default)]
    label: Option<String>,
    width: Dimension,
    height: Dimension,
    #[serde(default)]
    position: Option<[Dimension; 2]>,
    #[serde(default)]
    adjacent_to: Option<AdjacentTo>,
    #[serde(default)]
    walls: WallsConfig,
    #[serde(default)]
    enclosures: Vec<EnclosureConfig>,
    #[serde(default)]
    extensions: Vec<ExtensionConfig>,
}

impl TryFrom<RawRoomConfig> for RoomConfig {
    type Error = String;

    fn try_from(raw: RawRoomConfig) -> Result<Self, Self::Error> {
        let placement = match (raw.position, raw.adjacent_to) {
            (Some(_), Some(_)) => {
                return Err(format!(
                    "room '{}' sets both position and adjacent_to",
                    raw.id
                ))
            }
            (Some(position), None) => RoomPlacement::Position(position),
            (None, Some(adjacent)) => RoomPlacement::Adjacent(adjacent),
            (None, None) => RoomPlacement::Origin,
        };
        Ok(Self {
            id: raw.id,
            label: raw.label,
            width: raw.width,
            height: raw.height,
            placement,
            walls: raw.walls,
            enclosures: raw.enclosures,
            extensions: raw.extensions,
        })
    }
}
