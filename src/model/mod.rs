//! Fully resolved, immutable plan geometry.

pub mod dimension;
pub mod opening;
pub mod perimeter;
pub mod plan;
pub mod room;
pub mod wall;
pub mod wall_graph;

pub use dimension::{DimensionChain, DimensionSegment, Orientation, SegmentType};
pub use opening::{DoorStyle, OpeningType, ResolvedOpening, SwingDirection};
pub use perimeter::{PerimeterChain, PerimeterEdge};
pub use plan::{
    ResolvedElectrical, ResolvedFixture, ResolvedPlan, ResolvedPlumbing, ResolvedRun,
    ResolvedWallDevice,
};
pub use room::{EnclosureAnchor, ResolvedEnclosure, ResolvedExtension, ResolvedRoom};
pub use wall::{SharedSide, StudSize, Wall, WallComposition, WallId, WallSource, WallType};
pub use wall_graph::WallGraph;
