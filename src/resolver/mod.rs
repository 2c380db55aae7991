//! The resolution pipeline.
//!
//! Each stage is a module of its own and runs once per plan, in order:
//! placement, sub-spaces, room walls, the wall graph (with the perimeter),
//! composite outlines, dimensions, services, then validation.

pub mod composition;
pub mod dimension;
pub mod opening;
pub mod outline;
pub mod perimeter;
pub mod placement;
pub mod reference;
pub mod services;
pub mod sub_space;
pub mod wall_graph;
pub mod walls;

use tracing::debug;

use crate::config::{FloorPlanConfig, PlanConfig};
use crate::error::{ConfigError, Result};
use crate::geometry::Rect;
use crate::model::{ResolvedPlan, ResolvedRoom, WallGraph};
use crate::validate::{validate, ValidationResult};

use self::dimension::resolve_dimensions;
use self::outline::composite_outline;
use self::placement::place_rooms;
use self::services::{resolve_electrical, resolve_plumbing};
use self::sub_space::resolve_sub_spaces;
use self::wall_graph::WallGraphBuilder;
use self::walls::resolve_room_walls;

/// Resolves one plan of `config`: the plan with id `plan_id`, or the first.
///
/// # Errors
///
/// Returns `ConfigError::Invalid` when the config has no plans or no plan
/// with the requested id, and any error raised by a pipeline stage.
pub fn resolve(config: &FloorPlanConfig, plan_id: Option<&str>) -> Result<ResolvedPlan> {
    let plan = match plan_id {
        Some(id) => config
            .plans
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| ConfigError::Invalid(format!("unknown plan '{id}'")))?,
        None => config
            .plans
            .first()
            .ok_or_else(|| ConfigError::Invalid("no plans defined".to_owned()))?,
    };
    resolve_plan(config, plan)
}

/// Resolves every plan of `config` in declaration order.
///
/// # Errors
///
/// Stops at the first plan that fails.
pub fn resolve_all(config: &FloorPlanConfig) -> Result<Vec<ResolvedPlan>> {
    if config.plans.is_empty() {
        return Err(ConfigError::Invalid("no plans defined".to_owned()).into());
    }
    config.plans.iter().map(|plan| resolve_plan(config, plan)).collect()
}

fn resolve_plan(config: &FloorPlanConfig, plan: &PlanConfig) -> Result<ResolvedPlan> {
    let units = config.units;
    let placed = place_rooms(&plan.rooms, units)?;
    debug!(plan = %plan.id, rooms = placed.len(), "rooms placed");

    let mut layouts = Vec::with_capacity(placed.len());
    let mut room_walls = Vec::with_capacity(placed.len());
    for room in &placed {
        let layout = resolve_sub_spaces(room, units)?;
        room_walls.push(resolve_room_walls(room, &layout, units)?);
        layouts.push(layout);
    }

    let mut sub_space_walls = Vec::new();
    let mut rooms = Vec::with_capacity(placed.len());
    for (room, layout) in placed.iter().zip(layouts) {
        sub_space_walls.extend(layout.walls);
        let extension_rects: Vec<Rect> = layout.extensions.iter().map(|e| e.bounds).collect();
        let enclosure_rects: Vec<Rect> = layout.enclosures.iter().map(|e| e.bounds).collect();
        let outline = composite_outline(&room.bounds, &extension_rects, &enclosure_rects);
        rooms.push(ResolvedRoom {
            id: room.id().to_owned(),
            label: room.label(),
            bounds: room.bounds,
            label_position: room.bounds.center(),
            composite_outline: (!outline.is_empty()).then_some(outline),
            enclosures: layout.enclosures,
            extensions: layout.extensions,
        });
    }

    let wall_graph = WallGraphBuilder::new(&placed, room_walls, &plan.shared_walls, units)?
        .build(sub_space_walls)?;

    let dimensions = resolve_dimensions(&wall_graph, &rooms, units);
    let electrical = plan
        .electrical
        .as_ref()
        .map(|e| resolve_electrical(e, &wall_graph, &rooms, units))
        .transpose()?;
    let plumbing = plan
        .plumbing
        .as_ref()
        .map(|p| resolve_plumbing(p, &wall_graph, &rooms, units))
        .transpose()?;

    let mut resolved = ResolvedPlan {
        project: config.project.clone(),
        units,
        title: plan
            .title
            .clone()
            .unwrap_or_else(|| config.project.title.clone()),
        bounds: plan_bounds(&rooms, &wall_graph),
        rooms,
        dimensions,
        wall_graph,
        electrical,
        plumbing,
        layers: plan.layers.clone(),
        validation: ValidationResult::default(),
    };
    resolved.validation = validate(&resolved);
    debug!(
        plan = %plan.id,
        walls = resolved.wall_graph.len(),
        dimensions = resolved.dimensions.len(),
        errors = resolved.validation.errors.len(),
        warnings = resolved.validation.warnings.len(),
        "plan resolved"
    );
    Ok(resolved)
}

/// Union of every room, sub-space, and wall rectangle.
fn plan_bounds(rooms: &[ResolvedRoom], graph: &WallGraph) -> Rect {
    let room_rects = rooms.iter().flat_map(|room| {
        std::iter::once(room.bounds)
            .chain(room.enclosures.iter().map(|e| e.bounds))
            .chain(room.extensions.iter().map(|e| e.bounds))
    });
    let wall_rects = graph.walls().map(|(_, wall)| wall.rect);
    room_rects
        .chain(wall_rects)
        .reduce(|a, b| a.union(&b))
        .unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_abs_diff_eq;
    use serde_json::json;

    use crate::error::FloorScriptError;
    use crate::model::WallType;

    use super::*;

    const EXT: f64 = 6.5 / 12.0;
    const INT: f64 = 4.5 / 12.0;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn house() -> FloorPlanConfig {
        serde_json::from_value(json!({
            "version": "1.0",
            "project": {"title": "Cottage", "owner": "Sam"},
            "units": "imperial",
            "plans": [
                {
                    "id": "ground",
                    "title": "Ground Floor",
                    "rooms": [
                        {
                            "id": "living", "label": "Living Room", "width": "14ft", "height": "12ft",
                            "walls": {
                                "south": {"type": "exterior", "openings": [
                                    {"type": "door", "width": "3ft", "position": "center"}
                                ]},
                                "east": {"type": "interior"}
                            },
                            "enclosures": [
                                {"id": "coat", "corner": "northwest", "facing": "east", "length": "4ft", "depth": "2ft"}
                            ]
                        },
                        {
                            "id": "kitchen", "width": "10ft", "height": "12ft",
                            "adjacent_to": {"room": "living", "wall": "east"},
                            "walls": {
                                "west": {"type": "interior", "openings": [{"type": "opening", "width": "4ft", "position": 2}]},
                                "north": {"openings": [{"type": "window", "width": "3ft", "position": "center"}]}
                            },
                            "extensions": [
                                {"id": "nook", "wall": "east", "from": "south", "offset": 3, "width": 6, "depth": 3}
                            ]
                        }
                    ]
                },
                {
                    "id": "shed",
                    "rooms": [{"id": "store", "width": 8, "height": 6}]
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn resolves_first_plan_by_default() {
        init_tracing();
        let plan = resolve(&house(), None).unwrap();
        assert_eq!(plan.title, "Ground Floor");
        assert_eq!(plan.rooms.len(), 2);

        let living = plan.room("living").unwrap();
        assert_eq!(living.label, "Living Room");
        assert_abs_diff_eq!(living.bounds.width, 14.0, epsilon = 1e-9);
        assert_abs_diff_eq!(living.bounds.height, 12.0, epsilon = 1e-9);
        assert_abs_diff_eq!(living.label_position.x, 7.0, epsilon = 1e-9);
        assert_eq!(living.composite_outline.as_ref().unwrap().len(), 6);

        let kitchen = plan.room("kitchen").unwrap();
        assert_abs_diff_eq!(kitchen.bounds.x, 14.0 + INT, epsilon = 1e-9);
        assert_eq!(kitchen.composite_outline.as_ref().unwrap().len(), 8);
    }

    #[test]
    fn interior_shared_wall_is_merged() {
        let plan = resolve(&house(), None).unwrap();
        let shared = plan.wall_graph.wall_named("living.east").unwrap();
        assert!(shared.is_shared());
        assert_eq!(shared.wall_type, WallType::Interior);
        assert_abs_diff_eq!(shared.thickness, INT, epsilon = 1e-9);
        assert_eq!(shared.openings.len(), 1);
        assert!(plan.wall_graph.room_walls("kitchen", crate::geometry::CardinalDirection::West).any(|w| w.id == "living.east"));
    }

    #[test]
    fn bounds_cover_walls_and_extensions() {
        let plan = resolve(&house(), None).unwrap();
        assert_abs_diff_eq!(plan.bounds.x, -EXT, epsilon = 1e-9);
        assert_abs_diff_eq!(plan.bounds.y, -EXT, epsilon = 1e-9);
        assert_abs_diff_eq!(plan.bounds.right(), 24.0 + INT + 3.0 + EXT, epsilon = 1e-9);
        assert_abs_diff_eq!(plan.bounds.top(), 12.0 + EXT, epsilon = 1e-9);
    }

    #[test]
    fn single_building_has_one_closed_perimeter() {
        let plan = resolve(&house(), None).unwrap();
        let chains = plan.wall_graph.perimeter();
        assert_eq!(chains.len(), 1);
        let edges = &chains[0].edges;
        let (first, last) = (edges[0].segment.start, edges[edges.len() - 1].segment.end);
        assert_abs_diff_eq!(first.x, last.x, epsilon = 1e-4);
        assert_abs_diff_eq!(first.y, last.y, epsilon = 1e-4);
    }

    #[test]
    fn selects_plan_by_id() {
        let config = house();
        let shed = resolve(&config, Some("shed")).unwrap();
        assert_eq!(shed.title, "Cottage");
        assert_eq!(shed.rooms.len(), 1);
        // Four walls and no openings: the store room is sealed.
        assert_eq!(shed.validation.warnings.len(), 1);

        let err = resolve(&config, Some("attic")).unwrap_err();
        assert!(err.to_string().contains("Invalid FloorScript config"));
    }

    #[test]
    fn resolve_all_keeps_order() {
        let plans = resolve_all(&house()).unwrap();
        let titles: Vec<&str> = plans.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Ground Floor", "Cottage"]);
    }

    #[test]
    fn empty_config_is_invalid() {
        let config: FloorPlanConfig =
            serde_json::from_value(json!({"project": {"title": "x"}, "plans": []})).unwrap();
        assert!(matches!(
            resolve(&config, None),
            Err(FloorScriptError::Config(ConfigError::Invalid(_)))
        ));
        assert!(resolve_all(&config).is_err());
    }

    #[test]
    fn sub_space_errors_abort_resolution() {
        let config: FloorPlanConfig = serde_json::from_value(json!({
            "project": {"title": "x"},
            "plans": [{"id": "p", "rooms": [{
                "id": "a", "width": 12, "height": 10,
                "enclosures": [{"id": "c", "corner": "northwest", "length": 15, "depth": 2, "facing": "east"}]
            }]}]
        }))
        .unwrap();
        let err = resolve(&config, None).unwrap_err();
        assert!(err.to_string().to_lowercase().contains("exceeds"));
    }
}
