//! Automatic dimension chains around the building and its sub-spaces.
//!
//! Building edges are measured from exterior wall faces. Each collinear edge
//! group gets one per-room chain (lane 0) and, when two or more rooms share
//! the group, an overall chain one lane further out. North is preferred over
//! south and west over east, so a room is dimensioned once per orientation. Rooms with
//! no exterior edge in an orientation get a chain inside the room; enclosures
//! and extensions get their own chains unless a building chain already
//! measures the same span.

mod chain;
mod groups;
mod sub_space;

use tracing::debug;

use crate::geometry::CardinalDirection;
use crate::model::{DimensionChain, Orientation, ResolvedRoom, WallGraph};
use crate::units::UnitSystem;

use self::chain::building_chains;
use self::groups::{collect_groups, keep_outermost, prefer_primary};
use self::sub_space::{fallback_chain, sub_space_chains, Coverage};

/// Builds every dimension chain of a plan.
#[must_use]
pub fn resolve_dimensions(
    graph: &WallGraph,
    rooms: &[ResolvedRoom],
    units: UnitSystem,
) -> Vec<DimensionChain> {
    let mut groups = collect_groups(graph, rooms, units);
    keep_outermost(&mut groups);
    prefer_primary(&mut groups);

    let mut chains: Vec<DimensionChain> = [
        CardinalDirection::North,
        CardinalDirection::South,
        CardinalDirection::West,
        CardinalDirection::East,
    ]
    .into_iter()
    .flat_map(|direction| building_chains(direction, &groups[direction], graph, rooms, units))
    .collect();

    let mut coverage = Coverage::default();
    chains.iter().for_each(|chain| coverage.record(chain));

    for room in rooms {
        for orientation in [Orientation::Horizontal, Orientation::Vertical] {
            if !coverage.has_room(&room.id, orientation) && !room.bounds.is_degenerate() {
                let chain = fallback_chain(room, orientation, units);
                coverage.record(&chain);
                chains.push(chain);
            }
        }
    }
    for room in rooms {
        chains.extend(sub_space_chains(room, &mut coverage, units));
    }

    debug!(chains = chains.len(), "dimensions resolved");
    chains
}
