use serde::Deserialize;

use crate::geometry::{CardinalDirection, Corner};
use crate::units::Dimension;

use super::room::WallsConfig;

/// Length of a wall-mounted sub-space along its wall.
#[derive(Debug, Clone, PartialEq)]
pub enum SpanLength {
    /// The whole wall.
    Full,
    Length(Dimension),
}

impl SpanLength {
    fn from_option(value: Option<Dimension>) -> Self {
        match value {
            Some(d) if !d.is_keyword("full") => Self::Length(d),
            _ => Self::Full,
        }
    }
}

/// Position of a sub-space along a wall of its parent room.
///
/// `offset` is measured from the `from` end of the wall; without `from` it is
/// measured from the wall start (west or south end).
#[derive(Debug, Clone, PartialEq)]
pub struct WallSpan {
    pub from: Option<CardinalDirection>,
    pub offset: Option<Dimension>,
    pub length: SpanLength,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EnclosurePlacement {
    Corner {
        corner: Corner,
        length: Dimension,
    },
    Wall {
        wall: CardinalDirection,
        span: WallSpan,
    },
}

/// An enclosure (closet, pantry) carved out of a room.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawEnclosureConfig")]
pub struct EnclosureConfig {
    pub id: String,
    pub label: Option<String>,
    pub placement: EnclosurePlacement,
    pub facing: Option<CardinalDirection>,
    pub depth: Dimension,
    pub walls: WallsConfig,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawEnclosureConfig {
    id: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    corner: Option<Corner>,
    #[serde(default)]
    wall: Option<CardinalDirection>,
    #[serde(default)]
    facing: Option<CardinalDirection>,
    #[serde(default)]
    length: Option<Dimension>,
    depth: Dimension,
    #[serde(default)]
    from: Option<CardinalDirection>,
    #[serde(default)]
    offset: Option<Dimension>,
    #[serde(default)]
    walls: WallsConfig,
}

impl TryFrom<RawEnclosureConfig> for EnclosureConfig {
    type Error = String;

    fn try_from(raw: RawEnclosureConfig) -> Result<Self, Self::Error> {
        let placement = match (raw.corner, raw.wall) {
            (Some(_), Some(_)) => {
                return Err(format!("enclosure '{}' sets both corner and wall", raw.id))
            }
            (None, None) => {
                return Err(format!("enclosure '{}' needs a corner or a wall", raw.id))
            }
            (Some(corner), None) => {
                if raw.from.is_some() || raw.offset.is_some() {
                    return Err(format!(
                        "corner enclosure '{}' cannot use from/offset",
                        raw.id
                    ));
                }
                match raw.length {
                    Some(length) if !length.is_keyword("full") => {
                        EnclosurePlacement::Corner { corner, length }
                    }
                    _ => {
                        return Err(format!(
                            "corner enclosure '{}' needs a numeric length",
                            raw.id
                        ))
                    }
                }
            }
            (None, Some(wall)) => EnclosurePlacement::Wall {
                wall,
                span: WallSpan {
                    from: raw.from,
                    offset: raw.offset,
                    length: SpanLength::from_option(raw.length),
                },
            },
        };
        Ok(Self {
            id: raw.id,
            label: raw.label,
            placement,
            facing: raw.facing,
            depth: raw.depth,
            walls: raw.walls,
        })
    }
}

/// A bump-out beyond one of a room's walls.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawExtensionConfig")]
pub struct ExtensionConfig {
    pub id: String,
    pub label: Option<String>,
    pub wall: CardinalDirection,
    /// Position along the wall; `length` is the extension's width.
    pub span: WallSpan,
    pub depth: Dimension,
    pub walls: WallsConfig,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawExtensionConfig {
    id: String,
    #[serde(default)]
    label: Option<String>,
    wall: CardinalDirection,
    #[serde(default)]
    from: Option<CardinalDirection>,
    #[serde(default)]
    offset: Option<Dimension>,
    #[serde(default)]
    width: Option<Dimension>,
    depth: Dimension,
    #[serde(default)]
    walls: WallsConfig,
}

impl TryFrom<RawExtensionConfig> for ExtensionConfig {
    type Error = String;

    fn try_from(raw: RawExtensionConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            id: raw.id,
            label: raw.label,
            wall: raw.wall,
            span: WallSpan {
                from: raw.from,
                offset: raw.offset,
                length: SpanLength::from_option(raw.width),
            },
            depth: raw.depth,
            walls: raw.walls,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn corner_and_wall_are_exclusive() {
        let both = serde_json::from_value::<EnclosureConfig>(json!({
            "id": "c", "corner": "northwest", "wall": "north", "length": 4, "depth": 2
        }));
        assert!(both.is_err());

        let neither = serde_json::from_value::<EnclosureConfig>(json!({"id": "c", "depth": 2}));
        assert!(neither.is_err());
    }

    #[test]
    fn wall_enclosure_defaults_to_full_length() {
        let enc: EnclosureConfig =
            serde_json::from_value(json!({"id": "c", "wall": "north", "depth": 2})).unwrap();
        match enc.placement {
            EnclosurePlacement::Wall { wall, span } => {
                assert_eq!(wall, CardinalDirection::North);
                assert_eq!(span.length, SpanLength::Full);
            }
            EnclosurePlacement::Corner { .. } => panic!("expected wall placement"),
        }
    }

    #[test]
    fn extension_width_keyword() {
        let ext: ExtensionConfig = serde_json::from_value(json!({
            "id": "bay", "wall": "south", "width": "full", "depth": "2ft"
        }))
        .unwrap();
        assert_eq!(ext.span.length, SpanLength::Full);
    }
}
