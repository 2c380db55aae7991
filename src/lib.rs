//! FloorScript: resolves declarative floor plans into exact construction
//! geometry.
//!
//! A [`FloorPlanConfig`] describes rooms, walls, openings, closets and
//! bump-outs. [`resolve`] turns one of its plans into a [`ResolvedPlan`]:
//! merged wall rectangles with opening gaps, the building perimeter, room
//! outlines, auto-placed dimension chains, and a validation report.

pub mod config;
pub mod error;
pub mod geometry;
pub mod math;
pub mod model;
pub mod resolver;
pub mod units;
pub mod validate;

pub use config::FloorPlanConfig;
pub use error::{FloorScriptError, Result};
pub use model::ResolvedPlan;
pub use resolver::{resolve, resolve_all};
pub use validate::{ValidationIssue, ValidationResult};
