//! Building outlines traced from the exterior walls of the wall graph.

use tracing::trace;

use crate::geometry::{CardinalDirection, LineSegment, Rect};
use crate::math::intersect_2d::{cross_2d, line_line_intersect_2d};
use crate::math::{coord_eq, point_eq, Point2, Vector2, COORD_EPSILON};
use crate::model::{PerimeterChain, PerimeterEdge, Wall, WallGraph};

/// Traces one closed counter-clockwise chain per building.
///
/// Only parent walls that are not shared contribute; walls whose rectangles
/// touch belong to the same building.
#[must_use]
pub fn trace_perimeter(graph: &WallGraph) -> Vec<PerimeterChain> {
    let walls: Vec<&Wall> = graph
        .walls()
        .map(|(_, wall)| wall)
        .filter(|w| w.source.is_parent() && !w.is_shared())
        .collect();
    if walls.is_empty() {
        return Vec::new();
    }

    // Buildings are connected through shared walls too.
    let connectors: Vec<&Wall> = graph
        .walls()
        .map(|(_, wall)| wall)
        .filter(|w| w.source.is_parent())
        .collect();
    let clusters = cluster(&connectors);

    let mut chains = Vec::new();
    for members in clusters {
        let edges: Vec<PerimeterEdge> = members
            .iter()
            .map(|&i| connectors[i])
            .filter(|w| !w.is_shared())
            .map(oriented_edge)
            .collect();
        if let Some(chain) = chain_edges(edges) {
            trace!(edges = chain.edges.len(), bounds = ?chain.bounds, "perimeter chain");
            chains.push(chain);
        }
    }
    chains
}

/// Groups walls whose rectangles touch, via union-find.
fn cluster(walls: &[&Wall]) -> Vec<Vec<usize>> {
    let mut parent: Vec<usize> = (0..walls.len()).collect();
    for i in 0..walls.len() {
        for j in (i + 1)..walls.len() {
            if walls[i].rect.touches(&walls[j].rect) {
                let (ri, rj) = (find_root(&mut parent, i), find_root(&mut parent, j));
                if ri != rj {
                    parent[rj] = ri;
                }
            }
        }
    }

    let mut groups: Vec<(usize, Vec<usize>)> = Vec::new();
    for i in 0..walls.len() {
        let root = find_root(&mut parent, i);
        match groups.iter_mut().find(|(r, _)| *r == root) {
            Some((_, members)) => members.push(i),
            None => groups.push((root, vec![i])),
        }
    }
    groups.into_iter().map(|(_, members)| members).collect()
}

fn find_root(parent: &mut [usize], mut i: usize) -> usize {
    while parent[i] != i {
        parent[i] = parent[parent[i]];
        i = parent[i];
    }
    i
}

/// The wall's outer edge, directed so the building lies on its left.
fn oriented_edge(wall: &Wall) -> PerimeterEdge {
    let edge = wall.outer_edge;
    let segment = match wall.direction {
        CardinalDirection::South | CardinalDirection::East => edge,
        CardinalDirection::North | CardinalDirection::West => LineSegment::new(edge.end, edge.start),
    };
    PerimeterEdge {
        segment,
        wall_id: Some(wall.id.clone()),
        direction: Some(wall.direction),
    }
}

fn chain_edges(edges: Vec<PerimeterEdge>) -> Option<PerimeterChain> {
    let mut edges = order_by_adjacency(edges);
    if edges.is_empty() {
        return None;
    }

    let n = edges.len();
    for i in 0..n {
        let j = (i + 1) % n;
        if i != j {
            snap_concave(&mut edges, i, j);
        }
    }

    let mut chained = Vec::with_capacity(n * 2);
    for i in 0..n {
        let current = edges[i].clone();
        let next_start = edges[(i + 1) % n].segment.start;
        let end = current.segment.end;
        let continues = on_same_line(&current, &edges[(i + 1) % n]);
        chained.push(current);
        if !continues && !point_eq(&end, &next_start) {
            chained.push(PerimeterEdge {
                segment: LineSegment::new(end, next_start),
                wall_id: None,
                direction: None,
            });
        }
    }
    chained.retain(|e| e.segment.length() > COORD_EPSILON);

    let edges = merge_collinear(chained);
    let points: Vec<Point2> = edges.iter().map(|e| e.segment.start).collect();
    let bounds = Rect::bounding(&points)?;
    Some(PerimeterChain { edges, bounds })
}

/// Orders edges head to tail: starts from the edge at the lowest angle around
/// the midpoint centroid, then repeatedly takes the edge whose start lies
/// nearest the current end.
fn order_by_adjacency(mut remaining: Vec<PerimeterEdge>) -> Vec<PerimeterEdge> {
    if remaining.is_empty() {
        return remaining;
    }
    #[allow(clippy::cast_precision_loss)]
    let count = remaining.len() as f64;
    let (sx, sy) = remaining.iter().fold((0.0, 0.0), |(x, y), e| {
        let m = e.segment.midpoint();
        (x + m.x, y + m.y)
    });
    let centroid = Point2::new(sx / count, sy / count);
    let angle = |e: &PerimeterEdge| {
        let m = e.segment.midpoint();
        (m.y - centroid.y).atan2(m.x - centroid.x)
    };
    let first = remaining
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| angle(a).total_cmp(&angle(b)))
        .map_or(0, |(i, _)| i);

    let mut ordered = Vec::with_capacity(remaining.len());
    let mut current = remaining.swap_remove(first);
    loop {
        let end = current.segment.end;
        ordered.push(current);
        let Some(next) = remaining
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                (a.segment.start - end)
                    .norm()
                    .total_cmp(&(b.segment.start - end).norm())
            })
            .map(|(i, _)| i)
        else {
            break;
        };
        current = remaining.swap_remove(next);
    }
    ordered
}

/// Moves the meeting ends of two perpendicular edges onto the intersection of
/// their lines when the ends share neither coordinate (a concave corner).
fn snap_concave(edges: &mut [PerimeterEdge], i: usize, j: usize) {
    let (a, b) = (edges[i].segment, edges[j].segment);
    let (da, db) = (a.vector(), b.vector());
    if da.norm() < COORD_EPSILON || db.norm() < COORD_EPSILON {
        return;
    }
    let perpendicular = (da.dot(&db) / (da.norm() * db.norm())).abs() < COORD_EPSILON;
    if !perpendicular || coord_eq(a.end.x, b.start.x) || coord_eq(a.end.y, b.start.y) {
        return;
    }
    if let Some((t, _)) = line_line_intersect_2d(&a.start, &da, &b.start, &db) {
        let corner = Point2::new(a.start.x + da.x * t, a.start.y + da.y * t);
        edges[i].segment.end = corner;
        edges[j].segment.start = corner;
    }
}

/// Merges consecutive edges pointing the same way, including the wrap-around
/// from the last edge to the first.
fn merge_collinear(edges: Vec<PerimeterEdge>) -> Vec<PerimeterEdge> {
    let join = |a: PerimeterEdge, b: &PerimeterEdge| PerimeterEdge {
        segment: LineSegment::new(a.segment.start, b.segment.end),
        wall_id: a.wall_id.or_else(|| b.wall_id.clone()),
        direction: a.direction.or(b.direction),
    };

    let mut merged: Vec<PerimeterEdge> = Vec::with_capacity(edges.len());
    for edge in edges {
        match merged.pop() {
            Some(last) if on_same_line(&last, &edge) => merged.push(join(last, &edge)),
            Some(last) => {
                merged.push(last);
                merged.push(edge);
            }
            None => merged.push(edge),
        }
    }
    while merged.len() > 1 {
        let n = merged.len();
        if !on_same_line(&merged[n - 1], &merged[0]) {
            break;
        }
        let first = merged.remove(0);
        if let Some(last) = merged.pop() {
            merged.insert(0, join(last, &first));
        }
    }
    merged
}

/// Returns `true` if `b` continues along `a`'s line in the same direction.
fn on_same_line(a: &PerimeterEdge, b: &PerimeterEdge) -> bool {
    let (da, db) = (a.segment.vector(), b.segment.vector());
    let (la, lb) = (da.norm(), db.norm());
    if la < COORD_EPSILON || lb < COORD_EPSILON {
        return false;
    }
    let offset = Vector2::new(b.segment.start.x - a.segment.start.x, b.segment.start.y - a.segment.start.y);
    cross_2d(&da, &db).abs() / (la * lb) < COORD_EPSILON
        && cross_2d(&da, &offset).abs() / la < COORD_EPSILON
        && da.dot(&db) > 0.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::{RoomConfig, SharedWallConfig};
    use crate::resolver::placement::place_rooms;
    use crate::resolver::sub_space::resolve_sub_spaces;
    use crate::resolver::wall_graph::WallGraphBuilder;
    use crate::resolver::walls::resolve_room_walls;
    use crate::units::UnitSystem;
    use approx::assert_abs_diff_eq;
    use serde_json::json;

    const EXT: f64 = 6.5 / 12.0;

    fn perimeter_for(rooms: serde_json::Value) -> Vec<PerimeterChain> {
        let rooms: Vec<RoomConfig> = serde_json::from_value(rooms).unwrap();
        let units = UnitSystem::Imperial;
        let placed = place_rooms(&rooms, units).unwrap();
        let room_walls = placed
            .iter()
            .map(|room| {
                let layout = resolve_sub_spaces(room, units).unwrap();
                resolve_room_walls(room, &layout, units).unwrap()
            })
            .collect();
        let shared: Vec<SharedWallConfig> = Vec::new();
        let graph = WallGraphBuilder::new(&placed, room_walls, &shared, units)
            .unwrap()
            .build(Vec::new())
            .unwrap();
        graph.perimeter().to_vec()
    }

    fn assert_closed(chain: &PerimeterChain) {
        let first = chain.edges.first().unwrap().segment.start;
        let last = chain.edges.last().unwrap().segment.end;
        assert_abs_diff_eq!(first.x, last.x, epsilon = 1e-4);
        assert_abs_diff_eq!(first.y, last.y, epsilon = 1e-4);
        for pair in chain.edges.windows(2) {
            assert!(point_eq(&pair[0].segment.end, &pair[1].segment.start));
        }
    }

    #[test]
    fn single_room_is_a_rectangle() {
        let chains = perimeter_for(json!([{"id": "a", "width": 12, "height": 10}]));
        assert_eq!(chains.len(), 1);
        let chain = &chains[0];
        assert_closed(chain);
        assert_eq!(chain.edges.len(), 4);
        assert_abs_diff_eq!(chain.bounds.x, -EXT, epsilon = 1e-9);
        assert_abs_diff_eq!(chain.bounds.width, 12.0 + 2.0 * EXT, epsilon = 1e-9);
        assert_abs_diff_eq!(chain.bounds.height, 10.0 + 2.0 * EXT, epsilon = 1e-9);
        let points: Vec<Point2> = chain.edges.iter().map(|e| e.segment.start).collect();
        assert!(crate::math::polygon_2d::signed_area_2d(&points) > 0.0);
    }

    #[test]
    fn two_rooms_side_by_side() {
        let chains = perimeter_for(json!([
            {"id": "a", "width": 12, "height": 10},
            {"id": "b", "width": 8, "height": 10, "adjacent_to": {"room": "a", "wall": "east"}}
        ]));
        assert_eq!(chains.len(), 1);
        assert_closed(&chains[0]);
        assert_eq!(chains[0].edges.len(), 4);
        assert_abs_diff_eq!(chains[0].bounds.width, 20.0 + 3.0 * EXT, epsilon = 1e-9);
    }

    #[test]
    fn l_shape_snaps_concave_corner() {
        let chains = perimeter_for(json!([
            {"id": "a", "width": 12, "height": 10},
            {"id": "b", "width": 6, "height": 8, "adjacent_to": {"room": "a", "wall": "north"}}
        ]));
        assert_eq!(chains.len(), 1);
        let chain = &chains[0];
        assert_closed(chain);
        assert_eq!(chain.edges.len(), 6);
        let concave = Point2::new(6.0 + EXT, 10.0 + EXT);
        assert!(chain.edges.iter().any(|e| point_eq(&e.segment.start, &concave)));
    }

    fn assert_axis_aligned(chain: &PerimeterChain) {
        for edge in &chain.edges {
            let (a, b) = (edge.segment.start, edge.segment.end);
            assert!(coord_eq(a.x, b.x) || coord_eq(a.y, b.y), "diagonal edge {a} -> {b}");
        }
    }

    #[test]
    fn u_shape_keeps_its_notch() {
        let chains = perimeter_for(json!([
            {"id": "a", "width": 30, "height": 10},
            {"id": "b", "width": 8, "height": 10,
             "adjacent_to": {"room": "a", "wall": "north", "alignment": "start"}},
            {"id": "c", "width": 8, "height": 10,
             "adjacent_to": {"room": "a", "wall": "north", "alignment": "end"}}
        ]));
        assert_eq!(chains.len(), 1);
        let chain = &chains[0];
        assert_closed(chain);
        assert_axis_aligned(chain);
        assert_eq!(chain.edges.len(), 8);
        for corner in [
            Point2::new(8.0 + EXT, 10.0 + EXT),
            Point2::new(22.0 - EXT, 10.0 + EXT),
        ] {
            assert!(chain.edges.iter().any(|e| point_eq(&e.segment.start, &corner)));
        }
        let points: Vec<Point2> = chain.edges.iter().map(|e| e.segment.start).collect();
        assert!(crate::math::polygon_2d::signed_area_2d(&points) > 0.0);
    }

    #[test]
    fn t_shape_has_eight_edges() {
        let chains = perimeter_for(json!([
            {"id": "a", "width": 30, "height": 10},
            {"id": "b", "width": 8, "height": 10,
             "adjacent_to": {"room": "a", "wall": "north", "alignment": "center"}}
        ]));
        assert_eq!(chains.len(), 1);
        let chain = &chains[0];
        assert_closed(chain);
        assert_axis_aligned(chain);
        assert_eq!(chain.edges.len(), 8);
        assert_abs_diff_eq!(chain.bounds.height, 20.0 + 3.0 * EXT, epsilon = 1e-9);
    }

    #[test]
    fn separate_buildings_give_separate_chains() {
        let chains = perimeter_for(json!([
            {"id": "a", "width": 10, "height": 10},
            {"id": "b", "width": 10, "height": 10, "position": [30, 0]}
        ]));
        assert_eq!(chains.len(), 2);
        chains.iter().for_each(assert_closed);
    }
}
