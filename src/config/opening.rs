use serde::Deserialize;

use crate::geometry::CardinalDirection;
use crate::model::{DoorStyle, OpeningType, SwingDirection};
use crate::units::Dimension;

/// Where an opening sits along its wall.
#[derive(Debug, Clone, PartialEq)]
pub enum OpeningPlacement {
    /// Distance from the wall start (west end or south end) to the gap start.
    Offset(Dimension),
    /// Centered on the wall.
    Center,
    /// Distance from the named end of the wall to the nearest gap edge.
    FromEnd {
        from: CardinalDirection,
        offset: Dimension,
    },
}

/// A door, window, or cased opening on a wall.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawOpeningConfig")]
pub struct OpeningConfig {
    pub opening_type: OpeningType,
    pub width: Dimension,
    pub height: Option<Dimension>,
    pub placement: OpeningPlacement,
    pub style: Option<DoorStyle>,
    pub swing: Option<SwingDirection>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawOpeningConfig {
    #[serde(rename = "type")]
    opening_type: OpeningType,
    width: Dimension,
    #[serde(default)]
    height: Option<Dimension>,
    #[serde(default)]
    position: Option<Dimension>,
    #[serde(default)]
    from: Option<CardinalDirection>,
    #[serde(default)]
    offset: Option<Dimension>,
    #[serde(default)]
    style: Option<DoorStyle>,
    #[serde(default)]
    swing: Option<SwingDirection>,
}

impl TryFrom<RawOpeningConfig> for OpeningConfig {
    type Error = String;

    fn try_from(raw: RawOpeningConfig) -> Result<Self, Self::Error> {
        let placement = match (raw.position, raw.from, raw.offset) {
            (Some(position), None, None) if position.is_keyword("center") => {
                OpeningPlacement::Center
            }
            (Some(position), None, None) => OpeningPlacement::Offset(position),
            (None, Some(from), offset) => OpeningPlacement::FromEnd {
                from,
                offset: offset.unwrap_or(Dimension::Number(0.0)),
            },
            (None, None, Some(offset)) => OpeningPlacement::Offset(offset),
            (None, None, None) => OpeningPlacement::Center,
            (Some(_), _, _) => {
                return Err(
                    "opening position cannot be combined with from/offset".to_owned(),
                )
            }
        };
        Ok(Self {
            opening_type: raw.opening_type,
            width: raw.width,
            height: raw.height,
            placement,
            style: raw.style,
            swing: raw.swing,
        })
    }
}
