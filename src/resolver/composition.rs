use crate::config::WallConfig;
use crate::error::ConfigError;
use crate::model::{WallComposition, WallType};
use crate::units::UnitSystem;

/// Type and build-up of one wall before it is laid out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSpec {
    pub wall_type: WallType,
    pub composition: WallComposition,
}

impl WallSpec {
    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.composition.total_thickness
    }
}

/// Resolves a wall's type and composition from its (optional) configuration.
///
/// Missing fields fall back to `default_type` and its default stud, with half
/// an inch of finish per side.
///
/// # Errors
///
/// Returns `ConfigError::InvalidDimension` if finish or thickness fail to parse.
pub fn resolve_wall_spec(
    config: Option<&WallConfig>,
    default_type: WallType,
    units: UnitSystem,
) -> Result<WallSpec, ConfigError> {
    let wall_type = config.and_then(|c| c.wall_type).unwrap_or(default_type);
    let stud = config.and_then(|c| c.stud);
    let finish = match config.and_then(|c| c.finish.as_ref()) {
        Some(finish) => finish.resolve(units)?,
        None => units.from_inches(WallComposition::DEFAULT_FINISH_INCHES),
    };
    let composition = match config.and_then(|c| c.thickness.as_ref()) {
        Some(thickness) => WallComposition::with_thickness(stud, finish, thickness.resolve(units)?),
        None => WallComposition::from_stud(stud.unwrap_or(wall_type.default_stud()), finish, units),
    };
    Ok(WallSpec {
        wall_type,
        composition,
    })
}
