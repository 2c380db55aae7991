//! Electrical devices and plumbing placed against the resolved walls.

use tracing::trace;

use crate::config::{ElectricalConfig, PlumbingConfig, RunConfig, WallDeviceConfig};
use crate::error::Result;
use crate::geometry::{CardinalDirection, Rect};
use crate::math::interval::contains;
use crate::math::Point2;
use crate::model::{
    ResolvedElectrical, ResolvedFixture, ResolvedPlumbing, ResolvedRoom, ResolvedRun,
    ResolvedWallDevice, Wall, WallGraph,
};
use crate::units::{Dimension, UnitSystem};

use super::reference::WallRef;

/// Looks up referenced walls and the spaces they bound.
struct WallLocator<'a> {
    graph: &'a WallGraph,
    rooms: &'a [ResolvedRoom],
}

/// A point on a wall's room-side face.
struct WallPoint {
    wall_id: String,
    position: Point2,
}

impl<'a> WallLocator<'a> {
    fn bounds(&self, target: &str) -> Option<Rect> {
        self.rooms.iter().find_map(|room| {
            if room.id == target {
                return Some(room.bounds);
            }
            room.enclosures
                .iter()
                .find(|e| e.id == target)
                .map(|e| e.bounds)
                .or_else(|| room.extensions.iter().find(|e| e.id == target).map(|e| e.bounds))
        })
    }

    fn walls(&self, target: &str, direction: CardinalDirection) -> Vec<&'a Wall> {
        if self.graph.has_room(target) {
            self.graph.room_walls(target, direction).collect()
        } else {
            self.graph.sub_space_walls(target, direction).collect()
        }
    }

    fn parse<'r>(&self, reference: &'r str) -> Result<WallRef<'r>> {
        Ok(WallRef::resolve(reference, |target| {
            self.graph.has_room(target) || self.graph.has_sub_space(target)
        })?)
    }

    /// The point `offset` along the referenced side, measured from the start
    /// of the space's interior span, on the face of the wall piece there.
    fn locate(&self, reference: &str, offset: f64) -> Result<WallPoint> {
        let wall_ref = self.parse(reference)?;
        let direction = wall_ref.direction;
        let bounds = self.bounds(wall_ref.target).unwrap_or_default();
        let along = bounds.axis_range(direction).0 + offset;
        let walls = self.walls(wall_ref.target, direction);
        let wall = walls
            .iter()
            .find(|w| contains(w.axis_range(), along))
            .or_else(|| walls.first());

        let (wall_id, face) = match wall {
            Some(wall) => (wall.id.clone(), wall.inner_face()),
            None => (reference.to_owned(), bounds.edge(direction)),
        };
        let position = if direction.is_horizontal() {
            Point2::new(along, face)
        } else {
            Point2::new(face, along)
        };
        trace!(reference, wall = %wall_id, ?position, "located wall point");
        Ok(WallPoint { wall_id, position })
    }
}

fn point(position: &[Dimension; 2], units: UnitSystem) -> Result<Point2> {
    Ok(Point2::new(position[0].resolve(units)?, position[1].resolve(units)?))
}

fn device(
    locator: &WallLocator<'_>,
    config: &WallDeviceConfig,
    units: UnitSystem,
) -> Result<ResolvedWallDevice> {
    let located = locator.locate(&config.wall, config.position.resolve(units)?)?;
    Ok(ResolvedWallDevice {
        id: config.id.clone(),
        kind: config.kind.clone(),
        wall_id: located.wall_id,
        position: located.position,
    })
}

/// Places the panel and every wall-mounted device.
///
/// # Errors
///
/// Returns `WallReferenceError` for malformed or dangling wall references and
/// `ConfigError` for unparseable dimensions.
pub fn resolve_electrical(
    config: &ElectricalConfig,
    graph: &WallGraph,
    rooms: &[ResolvedRoom],
    units: UnitSystem,
) -> Result<ResolvedElectrical> {
    let locator = WallLocator { graph, rooms };
    let panel = config
        .panel
        .as_ref()
        .map(|panel| point(&panel.position, units))
        .transpose()?;
    let outlets = config
        .outlets
        .iter()
        .map(|outlet| device(&locator, outlet, units))
        .collect::<Result<Vec<_>>>()?;
    let switches = config
        .switches
        .iter()
        .map(|switch| device(&locator, switch, units))
        .collect::<Result<Vec<_>>>()?;
    Ok(ResolvedElectrical {
        panel,
        outlets,
        switches,
    })
}

/// Resolves fixtures and runs. A fixture's `wall` is checked and mapped to the
/// wall piece behind the fixture.
///
/// # Errors
///
/// As [`resolve_electrical`].
pub fn resolve_plumbing(
    config: &PlumbingConfig,
    graph: &WallGraph,
    rooms: &[ResolvedRoom],
    units: UnitSystem,
) -> Result<ResolvedPlumbing> {
    let locator = WallLocator { graph, rooms };
    let mut fixtures = Vec::with_capacity(config.fixtures.len());
    for fixture in &config.fixtures {
        let position = point(&fixture.position, units)?;
        let wall_id = match &fixture.wall {
            Some(reference) => {
                let wall_ref = locator.parse(reference)?;
                let along = if wall_ref.direction.is_horizontal() {
                    position.x
                } else {
                    position.y
                };
                let walls = locator.walls(wall_ref.target, wall_ref.direction);
                let wall = walls
                    .iter()
                    .find(|w| contains(w.axis_range(), along))
                    .or_else(|| walls.first());
                Some(wall.map_or_else(|| reference.clone(), |w| w.id.clone()))
            }
            None => None,
        };
        fixtures.push(ResolvedFixture {
            id: fixture.id.clone(),
            fixture_type: fixture.fixture_type.clone(),
            position,
            wall_id,
        });
    }

    let runs = |runs: &[RunConfig]| -> Result<Vec<ResolvedRun>> {
        runs.iter()
            .map(|run| -> Result<ResolvedRun> {
                Ok(ResolvedRun {
                    id: run.id.clone(),
                    points: run
                        .path
                        .iter()
                        .map(|p| point(p, units))
                        .collect::<Result<_>>()?,
                })
            })
            .collect()
    };
    Ok(ResolvedPlumbing {
        fixtures,
        supply_runs: runs(&config.supply_runs)?,
        drain_runs: runs(&config.drain_runs)?,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;
    use serde_json::json;

    use crate::config::FloorPlanConfig;
    use crate::error::{FloorScriptError, WallReferenceError};

    fn config(plan: serde_json::Value) -> FloorPlanConfig {
        let mut plan = plan;
        plan["id"] = json!("main");
        plan["rooms"] = json!([
            {"id": "a", "width": 12, "height": 10,
             "enclosures": [{"id": "closet", "corner": "northwest", "facing": "east", "length": 6, "depth": 2}]},
            {"id": "b", "width": 8, "height": 10, "adjacent_to": {"room": "a", "wall": "east"}}
        ]);
        serde_json::from_value(json!({"project": {"title": "T"}, "plans": [plan]})).unwrap()
    }

    #[test]
    fn outlet_sits_on_inner_face() {
        let config = config(json!({
            "electrical": {
                "panel": {"position": [1, 1]},
                "outlets": [{"id": "o1", "wall": "a.south", "position": 3}],
                "switches": [{"wall": "b.east", "position": "2ft 6in"}]
            }
        }));
        let plan = crate::resolve(&config, None).unwrap();
        let electrical = plan.electrical.as_ref().unwrap();
        let outlet = &electrical.outlets[0];
        assert_eq!(outlet.wall_id, "a.south");
        assert_abs_diff_eq!(outlet.position.x, 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(outlet.position.y, 0.0, epsilon = 1e-9);

        let switch = &electrical.switches[0];
        let b = plan.room("b").unwrap();
        assert_abs_diff_eq!(switch.position.x, b.bounds.right(), epsilon = 1e-9);
        assert_abs_diff_eq!(switch.position.y, 2.5, epsilon = 1e-9);
        assert!(electrical.panel.is_some());
    }

    #[test]
    fn shared_wall_reference_from_either_side() {
        let config = config(json!({
            "electrical": {"outlets": [{"wall": "b.west", "position": 4}]}
        }));
        let plan = crate::resolve(&config, None).unwrap();
        let outlet = &plan.electrical.unwrap().outlets[0];
        assert_eq!(outlet.wall_id, "a.east");
        assert_abs_diff_eq!(outlet.position.y, 4.0, epsilon = 1e-9);
    }

    #[test]
    fn sub_space_wall_reference() {
        let config = config(json!({
            "electrical": {"outlets": [{"wall": "closet.east", "position": 1}]}
        }));
        let plan = crate::resolve(&config, None).unwrap();
        let outlet = &plan.electrical.unwrap().outlets[0];
        assert_eq!(outlet.wall_id, "closet.east");
        assert_abs_diff_eq!(outlet.position.y, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn unknown_room_is_fatal() {
        let config = config(json!({
            "plumbing": {"fixtures": [{"id": "wc", "type": "toilet", "position": [1, 1], "wall": "garage.north"}]}
        }));
        let err = crate::resolve(&config, None).unwrap_err();
        assert!(matches!(
            err,
            FloorScriptError::WallReference(WallReferenceError::UnknownTarget { .. })
        ));
    }

    #[test]
    fn fixture_and_runs_resolve() {
        let config = config(json!({
            "plumbing": {
                "fixtures": [{"id": "sink", "type": "sink", "position": [5, "9ft 6in"], "wall": "a.north"}],
                "supply_runs": [{"path": [[5, 9], [5, 12]]}]
            }
        }));
        let plan = crate::resolve(&config, None).unwrap();
        let plumbing = plan.plumbing.unwrap();
        assert_eq!(plumbing.fixtures[0].wall_id.as_deref(), Some("a.north"));
        assert_abs_diff_eq!(plumbing.fixtures[0].position.y, 9.5, epsilon = 1e-9);
        assert_eq!(plumbing.supply_runs[0].points.len(), 2);
        assert!(plumbing.drain_runs.is_empty());
    }
}
