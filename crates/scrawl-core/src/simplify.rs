//! Ramer-Douglas-Peucker stroke simplification.

use crate::geometry::{Positioned, perpendicular_distance};

/// Simplify a polyline, keeping only points that deviate more than `epsilon`
/// from the chord of their enclosing span.
///
/// The first and last points are always kept. Sequences of two points or
/// fewer are returned unchanged. The work is driven by an explicit stack so
/// long near-collinear strokes cannot exhaust the call stack.
pub fn simplify<T: Positioned + Clone>(points: &[T], epsilon: f64) -> Vec<T> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    // NaN and negative tolerances behave like zero.
    let epsilon = epsilon.max(0.0);
    let last = points.len() - 1;
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[last] = true;

    let mut stack = vec![(0usize, last)];
    while let Some((start, end)) = stack.pop() {
        if end <= start + 1 {
            continue;
        }

        let first = points[start].position();
        let line_end = points[end].position();

        let mut max_dist = 0.0;
        let mut max_index = start;
        for (i, point) in points.iter().enumerate().take(end).skip(start + 1) {
            let dist = perpendicular_distance(point.position(), first, line_end);
            if dist > max_dist {
                max_dist = dist;
                max_index = i;
            }
        }

        if max_dist > epsilon && max_index > start {
            keep[max_index] = true;
            stack.push((max_index, end));
            stack.push((start, max_index));
        }
    }

    points
        .iter()
        .zip(keep)
        .filter_map(|(point, kept)| kept.then(|| point.clone()))
        .collect()
}

/// Effective tolerance for a tool drawing at `width`: wider strokes tolerate
/// proportionally coarser paths.
pub fn tolerance_for_width(base_epsilon: f64, width: f64) -> f64 {
    base_epsilon * (width / 10.0).max(1.0)
}

/// Simplify with a tool tolerance, logging the reduction.
///
/// A non-positive `epsilon` disables simplification.
pub fn simplify_stroke<T: Positioned + Clone>(points: &[T], epsilon: f64) -> Vec<T> {
    if epsilon <= 0.0 {
        return points.to_vec();
    }
    let simplified = simplify(points, epsilon);
    log::debug!(
        "Simplification: {} -> {} points (epsilon: {:.2})",
        points.len(),
        simplified.len(),
        epsilon
    );
    simplified
}
