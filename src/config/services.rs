use std::collections::BTreeMap;

use serde::Deserialize;

use crate::units::Dimension;

/// Electrical devices on the plan.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElectricalConfig {
    #[serde(default)]
    pub panel: Option<PanelConfig>,
    #[serde(default)]
    pub outlets: Vec<WallDeviceConfig>,
    #[serde(default)]
    pub switches: Vec<WallDeviceConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PanelConfig {
    pub position: [Dimension; 2],
}

/// A device mounted on a wall, `position` measured from the wall start.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WallDeviceConfig {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// `<room or sub-space>.<direction>`
    pub wall: String,
    pub position: Dimension,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlumbingConfig {
    #[serde(default)]
    pub fixtures: Vec<FixtureConfig>,
    #[serde(default)]
    pub supply_runs: Vec<RunConfig>,
    #[serde(default)]
    pub drain_runs: Vec<RunConfig>,
}

/// A plumbing fixture at an absolute plan position.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureConfig {
    pub id: String,
    #[serde(rename = "type")]
    pub fixture_type: String,
    pub position: [Dimension; 2],
    /// Optional wall the fixture is backed against.
    #[serde(default)]
    pub wall: Option<String>,
}

/// A supply or drain line given as a polyline.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    #[serde(default)]
    pub id: Option<String>,
    pub path: Vec<[Dimension; 2]>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayerConfig {
    #[serde(default = "visible_by_default")]
    pub visible: bool,
    #[serde(default)]
    pub color: Option<String>,
}

fn visible_by_default() -> bool {
    true
}

/// Drawing layers by name.
pub type LayersConfig = BTreeMap<String, LayerConfig>;
