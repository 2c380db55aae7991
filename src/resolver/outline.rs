//! Visible room outline: the room plus its extensions, minus its enclosures.
//!
//! The rectangles are cut into a grid on every distinct X and Y coordinate.
//! Each cell is either inside or outside the outline; the boundary is the set
//! of cell edges between an inside and an outside cell, directed so the inside
//! lies to the left, then chained into one counter-clockwise loop.

use std::collections::HashMap;

use crate::geometry::Rect;
use crate::math::polygon_2d::{remove_axis_collinear, rotate_to_canonical_start};
use crate::math::{Point2, COORD_EPSILON};

type GridPoint = (usize, usize);

/// Computes the composite outline of a room.
///
/// Returns an empty outline for a degenerate room.
#[must_use]
pub fn composite_outline(room: &Rect, extensions: &[Rect], enclosures: &[Rect]) -> Vec<Point2> {
    if room.is_degenerate() {
        return Vec::new();
    }

    let rects = || std::iter::once(room).chain(extensions).chain(enclosures);
    let xs = unique_sorted(rects().flat_map(|r| [r.x, r.right()]));
    let ys = unique_sorted(rects().flat_map(|r| [r.y, r.top()]));
    if xs.len() < 2 || ys.len() < 2 {
        return Vec::new();
    }

    let (nx, ny) = (xs.len() - 1, ys.len() - 1);
    let mut inside = vec![false; nx * ny];
    for j in 0..ny {
        for i in 0..nx {
            let cx = (xs[i] + xs[i + 1]) / 2.0;
            let cy = (ys[j] + ys[j + 1]) / 2.0;
            let covered = strictly_contains(room, cx, cy)
                || extensions.iter().any(|r| strictly_contains(r, cx, cy));
            inside[j * nx + i] = covered && !enclosures.iter().any(|r| strictly_contains(r, cx, cy));
        }
    }
    let is_inside = |i: isize, j: isize| {
        usize::try_from(i)
            .ok()
            .zip(usize::try_from(j).ok())
            .is_some_and(|(i, j)| i < nx && j < ny && inside[j * nx + i])
    };

    let mut edges: Vec<(GridPoint, GridPoint)> = Vec::new();
    for j in 0..ny {
        for i in 0..nx {
            if !inside[j * nx + i] {
                continue;
            }
            #[allow(clippy::cast_possible_wrap)]
            let (si, sj) = (i as isize, j as isize);
            if !is_inside(si, sj - 1) {
                edges.push(((i, j), (i + 1, j)));
            }
            if !is_inside(si + 1, sj) {
                edges.push(((i + 1, j), (i + 1, j + 1)));
            }
            if !is_inside(si, sj + 1) {
                edges.push(((i + 1, j + 1), (i, j + 1)));
            }
            if !is_inside(si - 1, sj) {
                edges.push(((i, j + 1), (i, j)));
            }
        }
    }

    let loop_points = chain(&edges);
    let points: Vec<Point2> = loop_points
        .into_iter()
        .map(|(i, j)| Point2::new(xs[i], ys[j]))
        .collect();
    rotate_to_canonical_start(&remove_axis_collinear(&points))
}

fn strictly_contains(r: &Rect, x: f64, y: f64) -> bool {
    x > r.x && x < r.right() && y > r.y && y < r.top()
}

fn unique_sorted(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut values: Vec<f64> = values.collect();
    values.sort_by(f64::total_cmp);
    values.dedup_by(|b, a| (*b - *a).abs() < COORD_EPSILON);
    values
}

/// Follows directed edges from the lowest, then leftmost, start point until
/// the loop closes. Returns the loop's vertices in order.
fn chain(edges: &[(GridPoint, GridPoint)]) -> Vec<GridPoint> {
    let mut outgoing: HashMap<GridPoint, Vec<usize>> = HashMap::new();
    for (index, (from, _)) in edges.iter().enumerate() {
        outgoing.entry(*from).or_default().push(index);
    }
    let Some(start) = edges.iter().map(|(from, _)| *from).min_by_key(|&(i, j)| (j, i)) else {
        return Vec::new();
    };

    let mut used = vec![false; edges.len()];
    let mut points = Vec::new();
    let mut at = start;
    loop {
        let next = outgoing
            .get(&at)
            .and_then(|candidates| candidates.iter().copied().find(|&e| !used[e]));
        let Some(edge) = next else {
            break;
        };
        used[edge] = true;
        points.push(at);
        at = edges[edge].1;
        if at == start {
            break;
        }
    }
    points
}
