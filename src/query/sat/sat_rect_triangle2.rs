use crate::math::{Point2, Real, Vector2};

use approx::AbsDiffEq;
use na::Unit;

#[inline]
fn interval_separation(a: (Real, Real), b: (Real, Real)) -> Real {
    (b.0 - a.1).max(a.0 - b.1)
}

#[inline]
fn extents_on_dir2<const N: usize>(pts: &[Point2<Real>; N], dir: &Vector2<Real>) -> (Real, Real) {
    pts.iter()
        .map(|p| p.coords.dot(dir))
        .fold((Real::MAX, -Real::MAX), |(lo, hi), d| (lo.min(d), hi.max(d)))
}

/// Finds the best separating axis between an axis-aligned rectangle and a 2D triangle.
///
/// The rectangle is given by its corners `mins` and `maxs`. Both the rectangle axes and
/// the edge normals of the triangle are tested. Edges with a near-zero length are skipped.
pub fn rect_triangle2_find_local_separating_axis(
    mins: &Point2<Real>,
    maxs: &Point2<Real>,
    triangle: &[Point2<Real>; 3],
) -> (Real, Vector2<Real>) {
    let mut best_separation = -Real::MAX;
    let mut best_dir = Vector2::zeros();

    for i in 0..2 {
        let tri = extents_on_dir2(triangle, &Vector2::ith(i, 1.0));
        let separation = interval_separation((mins[i], maxs[i]), tri);

        if separation > best_separation {
            best_separation = separation;
            best_dir = Vector2::ith(i, 1.0);
        }
    }

    let corners = [
        *mins,
        Point2::new(maxs.x, mins.y),
        *maxs,
        Point2::new(mins.x, maxs.y),
    ];

    for i in 0..3 {
        let edge = triangle[(i + 1) % 3] - triangle[i];

        if let Some(normal) = Unit::try_new(Vector2::new(-edge.y, edge.x), Real::default_epsilon())
        {
            let rect = extents_on_dir2(&corners, &normal);
            let tri = extents_on_dir2(triangle, &normal);
            let separation = interval_separation(rect, tri);

            if separation > best_separation {
                best_separation = separation;
                best_dir = *normal;
            }
        }
    }

    (best_separation, best_dir)
}
