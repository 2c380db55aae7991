use crate::config::{OpeningConfig, OpeningPlacement};
use crate::error::{ConfigError, Result};
use crate::geometry::{CardinalDirection, LineSegment};
use crate::math::interval::Interval;
use crate::math::Point2;
use crate::model::ResolvedOpening;
use crate::units::UnitSystem;

/// The wall an opening is being placed on, as seen from its owning room.
#[derive(Debug, Clone, Copy)]
pub struct WallFrame<'a> {
    /// Reference used in error messages, e.g. `kitchen.north`.
    pub name: &'a str,
    pub direction: CardinalDirection,
    /// Axis range openings are positioned against.
    pub axis: Interval,
    pub inner_face: f64,
    pub thickness: f64,
}

/// Places an opening on a wall.
///
/// # Errors
///
/// Returns `ConfigError::InvalidOpening` when `from` names a direction that
/// is not one of the wall's ends, or `ConfigError::InvalidDimension` for
/// unparseable widths and offsets.
pub fn resolve_opening(
    config: &OpeningConfig,
    frame: &WallFrame<'_>,
    owner_room_id: &str,
    units: UnitSystem,
) -> Result<ResolvedOpening> {
    let width = config.width.resolve(units)?;
    let (axis_start, axis_end) = frame.axis;
    let start = match &config.placement {
        OpeningPlacement::Offset(offset) => axis_start + offset.resolve(units)?,
        OpeningPlacement::Center => (axis_start + axis_end) / 2.0 - width / 2.0,
        OpeningPlacement::FromEnd { from, offset } => {
            let offset = offset.resolve(units)?;
            let (start_end, far_end) = frame.direction.wall_ends();
            if *from == start_end {
                axis_start + offset
            } else if *from == far_end {
                axis_end - offset - width
            } else {
                return Err(ConfigError::InvalidOpening {
                    wall: frame.name.to_owned(),
                    reason: format!("'from: {from}' is not an end of a {} wall", frame.direction),
                }
                .into());
            }
        }
    };
    let end = start + width;

    let middle = frame.inner_face + frame.direction.outward_sign() * frame.thickness / 2.0;
    let at = |along: f64, perp: f64| {
        if frame.direction.is_horizontal() {
            Point2::new(along, perp)
        } else {
            Point2::new(perp, along)
        }
    };

    Ok(ResolvedOpening {
        opening_type: config.opening_type,
        width,
        height: config.height.as_ref().map(|h| h.resolve(units)).transpose()?,
        wall_direction: frame.direction,
        wall_thickness: frame.thickness,
        gap_start: at(start, frame.inner_face),
        gap_end: at(end, frame.inner_face),
        centerline: LineSegment::new(at(start, middle), at(end, middle)),
        style: config.style,
        swing: config.swing,
        owner_room_id: owner_room_id.to_owned(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use serde_json::json;

    fn opening(value: serde_json::Value) -> OpeningConfig {
        serde_json::from_value(value).unwrap()
    }

    fn south_frame() -> WallFrame<'static> {
        WallFrame {
            name: "hall.south",
            direction: CardinalDirection::South,
            axis: (0.0, 12.0),
            inner_face: 0.0,
            thickness: 0.5,
        }
    }

    #[test]
    fn numeric_offset_from_wall_start() {
        let o = resolve_opening(
            &opening(json!({"type": "door", "width": 3, "position": 2})),
            &south_frame(),
            "hall",
            UnitSystem::Imperial,
        )
        .unwrap();
        assert_eq!(o.axis_range(), (2.0, 5.0));
        assert_abs_diff_eq!(o.gap_start.y, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(o.centerline.start.y, -0.25, epsilon = 1e-9);
    }

    #[test]
    fn centered() {
        let o = resolve_opening(
            &opening(json!({"type": "window", "width": 4, "position": "center"})),
            &south_frame(),
            "hall",
            UnitSystem::Imperial,
        )
        .unwrap();
        assert_eq!(o.axis_range(), (4.0, 8.0));
    }

    #[test]
    fn from_far_end() {
        let o = resolve_opening(
            &opening(json!({"type": "door", "width": "3ft", "from": "east", "offset": "1ft"})),
            &south_frame(),
            "hall",
            UnitSystem::Imperial,
        )
        .unwrap();
        assert_abs_diff_eq!(o.axis_range().0, 8.0, epsilon = 1e-9);
        assert_abs_diff_eq!(o.axis_range().1, 11.0, epsilon = 1e-9);
    }

    #[test]
    fn from_must_be_a_wall_end() {
        let err = resolve_opening(
            &opening(json!({"type": "door", "width": 3, "from": "north", "offset": 1})),
            &south_frame(),
            "hall",
            UnitSystem::Imperial,
        )
        .unwrap_err();
        assert!(err.to_string().contains("hall.south"));
    }
}
