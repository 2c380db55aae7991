use crate::config::{LayersConfig, ProjectConfig};
use crate::geometry::Rect;
use crate::math::Point2;
use crate::units::UnitSystem;
use crate::validate::ValidationResult;

use super::dimension::DimensionChain;
use super::room::ResolvedRoom;
use super::wall_graph::WallGraph;

/// A wall-mounted electrical device placed on a wall face.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedWallDevice {
    pub id: Option<String>,
    pub kind: Option<String>,
    pub wall_id: String,
    pub position: Point2,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedElectrical {
    pub panel: Option<Point2>,
    pub outlets: Vec<ResolvedWallDevice>,
    pub switches: Vec<ResolvedWallDevice>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFixture {
    pub id: String,
    pub fixture_type: String,
    pub position: Point2,
    pub wall_id: Option<String>,
}

/// A supply or drain line as a polyline in plan coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRun {
    pub id: Option<String>,
    pub points: Vec<Point2>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedPlumbing {
    pub fixtures: Vec<ResolvedFixture>,
    pub supply_runs: Vec<ResolvedRun>,
    pub drain_runs: Vec<ResolvedRun>,
}

/// The complete resolved geometry of one plan.
#[derive(Debug)]
pub struct ResolvedPlan {
    pub project: ProjectConfig,
    pub units: UnitSystem,
    pub title: String,
    pub rooms: Vec<ResolvedRoom>,
    pub dimensions: Vec<DimensionChain>,
    /// Union of every room, sub-space, and wall rectangle.
    pub bounds: Rect,
    pub wall_graph: WallGraph,
    pub electrical: Option<ResolvedElectrical>,
    pub plumbing: Option<ResolvedPlumbing>,
    pub layers: Option<LayersConfig>,
    pub validation: ValidationResult,
}

impl ResolvedPlan {
    #[must_use]
    pub fn room(&self, id: &str) -> Option<&ResolvedRoom> {
        self.rooms.iter().find(|r| r.id == id)
    }
}
