//! Typed configuration tree consumed by the resolver.
//!
//! Every type derives `Deserialize`, so a front end can load a plan from any
//! serde format. Mutually exclusive fields are folded into enums during
//! deserialization; invalid combinations never reach the resolver.

mod opening;
mod room;
mod services;
mod sub_space;

use serde::Deserialize;

pub use opening::{OpeningConfig, OpeningPlacement};
pub use room::{AdjacentTo, Alignment, RoomConfig, RoomPlacement, WallConfig, WallsConfig};
pub use services::{
    ElectricalConfig, FixtureConfig, LayerConfig, LayersConfig, PanelConfig, PlumbingConfig,
    RunConfig, WallDeviceConfig,
};
pub use sub_space::{EnclosureConfig, EnclosurePlacement, ExtensionConfig, SpanLength, WallSpan};

use crate::model::StudSize;
use crate::units::{Dimension, UnitSystem};

/// Root of a FloorScript document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FloorPlanConfig {
    #[serde(default)]
    pub version: Option<String>,
    pub project: ProjectConfig,
    #[serde(default)]
    pub units: UnitSystem,
    pub plans: Vec<PlanConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    pub title: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// One floor plan.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanConfig {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub rooms: Vec<RoomConfig>,
    #[serde(default)]
    pub shared_walls: Vec<SharedWallConfig>,
    #[serde(default)]
    pub electrical: Option<ElectricalConfig>,
    #[serde(default)]
    pub plumbing: Option<PlumbingConfig>,
    #[serde(default)]
    pub layers: Option<LayersConfig>,
}

/// Override for the wall shared between a room and its neighbour.
///
/// `wall` is a `<room>.<direction>` reference to either side of the wall.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SharedWallConfig {
    pub wall: String,
    #[serde(default)]
    pub thickness: Option<Dimension>,
    #[serde(default)]
    pub stud: Option<StudSize>,
    #[serde(default)]
    pub openings: Vec<OpeningConfig>,
}
