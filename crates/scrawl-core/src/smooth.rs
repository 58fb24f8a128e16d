//! Midpoint quadratic smoothing for polylines.

use kurbo::{BezPath, Point};

/// How the first vertex of a smoothed run attaches to the path being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Join {
    /// Start a new subpath at the first vertex.
    MoveTo,
    /// Continue the current subpath with a straight segment to the first vertex.
    LineTo,
}

/// Build a smoothed open path through `points`.
///
/// Each interior vertex becomes the control point of a quadratic curve between
/// the midpoints of its neighbouring segments, which rounds corners without a
/// full spline fit. One vertex yields a bare move-to, two a straight line.
pub fn smooth_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    extend_smooth(&mut path, points, Join::MoveTo);
    path
}

/// Append a smoothed run through `points` to an existing path.
pub fn extend_smooth(path: &mut BezPath, points: &[Point], join: Join) {
    let Some(&first) = points.first() else {
        return;
    };

    match join {
        Join::MoveTo => path.move_to(first),
        Join::LineTo => path.line_to(first),
    }

    match points.len() {
        1 => {}
        2 => path.line_to(points[1]),
        n => {
            path.line_to(first.midpoint(points[1]));
            for i in 1..n - 1 {
                let control = points[i];
                path.quad_to(control, control.midpoint(points[i + 1]));
            }
            path.line_to(points[n - 1]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;

    #[test]
    fn test_empty() {
        assert!(smooth_path(&[]).elements().is_empty());
    }

    #[test]
    fn test_single_point() {
        let path = smooth_path(&[Point::new(1.0, 2.0)]);
        assert_eq!(path.elements(), &[PathEl::MoveTo(Point::new(1.0, 2.0))]);
    }

    #[test]
    fn test_two_points_is_line() {
        let path = smooth_path(&[Point::new(0.0, 0.0), Point::new(4.0, 0.0)]);
        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(Point::new(0.0, 0.0)),
                PathEl::LineTo(Point::new(4.0, 0.0)),
            ]
        );
    }

    #[test]
    fn test_quadratic_through_midpoints() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ];
        let path = smooth_path(&points);
        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(Point::new(0.0, 0.0)),
                PathEl::LineTo(Point::new(5.0, 0.0)),
                PathEl::QuadTo(Point::new(10.0, 0.0), Point::new(10.0, 5.0)),
                PathEl::LineTo(Point::new(10.0, 10.0)),
            ]
        );
    }

    #[test]
    fn test_svg_encoding() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ];
        let svg = smooth_path(&points).to_svg();
        assert!(svg.starts_with('M'));
        assert!(svg.contains('Q'));
    }
}
