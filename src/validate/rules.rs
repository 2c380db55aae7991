use crate::math::interval::overlap;
use crate::math::intersect_2d::segment_segment_intersect_2d;
use crate::math::CONTAINMENT_EPSILON;
use crate::model::{ResolvedPlan, ResolvedRun};
use crate::units::format_dimension;

use super::{Rule, ValidationIssue};

pub(super) fn overlapping_openings(plan: &ResolvedPlan, out: &mut Vec<ValidationIssue>) {
    for (_, wall) in plan.wall_graph.walls() {
        for (i, a) in wall.openings.iter().enumerate() {
            for b in &wall.openings[i + 1..] {
                if overlap(a.axis_range(), b.axis_range()).is_some() {
                    out.push(ValidationIssue::new(
                        Rule::OverlappingOpenings,
                        format!(
                            "openings on wall '{}' overlap ({:?} and {:?})",
                            wall.id,
                            a.opening_type,
                            b.opening_type
                        ),
                        Some(&wall.id),
                    ));
                }
            }
        }
    }
}

pub(super) fn opening_exceeds_wall(plan: &ResolvedPlan, out: &mut Vec<ValidationIssue>) {
    for (_, wall) in plan.wall_graph.walls() {
        let length = wall.length();
        for opening in &wall.openings {
            if opening.width > length + CONTAINMENT_EPSILON {
                out.push(ValidationIssue::new(
                    Rule::OpeningExceedsWall,
                    format!(
                        "{:?} of width {} is wider than wall '{}' ({})",
                        opening.opening_type,
                        format_dimension(opening.width, plan.units),
                        wall.id,
                        format_dimension(length, plan.units)
                    ),
                    Some(&wall.id),
                ));
            }
        }
    }
}

pub(super) fn sealed_rooms(plan: &ResolvedPlan, out: &mut Vec<ValidationIssue>) {
    for room in &plan.rooms {
        let walls = plan.wall_graph.walls_of_room(&room.id);
        if walls.iter().all(|w| w.openings.is_empty()) {
            out.push(ValidationIssue::new(
                Rule::SealedRoom,
                format!("room '{}' has no doors, windows, or openings", room.id),
                Some(&room.id),
            ));
        }
    }
}

pub(super) fn sealed_extensions(plan: &ResolvedPlan, out: &mut Vec<ValidationIssue>) {
    for extension in plan.rooms.iter().flat_map(|r| &r.extensions) {
        let walls = plan.wall_graph.walls_of_sub_space(&extension.id);
        if walls.iter().all(|w| w.openings.is_empty()) {
            out.push(ValidationIssue::new(
                Rule::SealedExtension,
                format!("extension '{}' has no openings in its walls", extension.id),
                Some(&extension.id),
            ));
        }
    }
}

/// A fixture must stand inside a room or one of its extensions.
pub(super) fn fixtures_out_of_bounds(plan: &ResolvedPlan, out: &mut Vec<ValidationIssue>) {
    let Some(plumbing) = &plan.plumbing else {
        return;
    };
    for fixture in &plumbing.fixtures {
        let inside = plan.rooms.iter().any(|room| {
            room.bounds.contains_point(&fixture.position)
                || room
                    .extensions
                    .iter()
                    .any(|e| e.bounds.contains_point(&fixture.position))
        });
        if !inside {
            out.push(ValidationIssue::new(
                Rule::FixtureOutOfBounds,
                format!(
                    "fixture '{}' at ({:.2}, {:.2}) is outside every room",
                    fixture.id, fixture.position.x, fixture.position.y
                ),
                Some(&fixture.id),
            ));
        }
    }
}

/// Flags every place a supply or drain run crosses a wall's centerline on a
/// solid part of the wall.
pub(super) fn runs_through_walls(plan: &ResolvedPlan, out: &mut Vec<ValidationIssue>) {
    let Some(plumbing) = &plan.plumbing else {
        return;
    };
    let runs = plumbing
        .supply_runs
        .iter()
        .map(|run| ("supply", run))
        .chain(plumbing.drain_runs.iter().map(|run| ("drain", run)));
    for (kind, run) in runs {
        check_run(plan, kind, run, out);
    }
}

fn check_run(plan: &ResolvedPlan, kind: &str, run: &ResolvedRun, out: &mut Vec<ValidationIssue>) {
    for leg in run.points.windows(2) {
        for (_, wall) in plan.wall_graph.walls() {
            let centerline = &wall.centerline;
            let Some((hit, _, _)) =
                segment_segment_intersect_2d(&leg[0], &leg[1], &centerline.start, &centerline.end)
            else {
                continue;
            };
            if wall.segments.iter().any(|solid| solid.contains_point(&hit)) {
                let name = run.id.as_deref().unwrap_or("unnamed");
                out.push(ValidationIssue::new(
                    Rule::RunThroughWall,
                    format!(
                        "{kind} run '{name}' passes through wall '{}' at ({:.2}, {:.2})",
                        wall.id, hit.x, hit.y
                    ),
                    run.id.as_deref(),
                ));
            }
        }
    }
}
