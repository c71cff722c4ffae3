use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector, DIM};
use crate::shape::Triangle;

use approx::AbsDiffEq;
use na::Unit;

/// Expresses `triangle` in the local frame of `aabb`, i.e., relative to its center.
#[inline]
fn triangle_local_to_aabb(aabb: &Aabb, triangle: &Triangle) -> Triangle {
    let center = aabb.center().coords;
    triangle.map(|p| Point::from(p.coords - center))
}

/// Separation along `axis` between a box centered at the origin with the given
/// half-extents and a triangle expressed in the same frame.
///
/// Both orientations of `axis` are considered, the largest separation is returned.
#[inline]
fn centered_box_triangle_separation_wrt_local_line(
    half_extents: &Vector<Real>,
    triangle: &Triangle,
    axis: &Unit<Vector<Real>>,
) -> Real {
    let radius = axis.abs().dot(half_extents);
    let (tri_min, tri_max) = triangle.extents_on_dir(axis);
    (tri_min - radius).max(-radius - tri_max)
}

/// Finds the best separating axis among the face normals of `aabb`.
///
/// This is equivalent to an interval test between the AABB and the triangle
/// bounding box on each coordinate axis.
pub fn aabb_triangle_find_local_separating_normal_oneway(
    aabb: &Aabb,
    triangle: &Triangle,
) -> (Real, Vector<Real>) {
    let mut best_separation = -Real::MAX;
    let mut best_dir = Vector::zeros();

    for i in 0..DIM {
        let (tri_min, tri_max) = triangle.extents_on_axis(i);

        for sign in &[-1.0, 1.0] {
            let separation = if *sign > 0.0 {
                tri_min - aabb.maxs[i]
            } else {
                aabb.mins[i] - tri_max
            };

            if separation > best_separation {
                best_separation = separation;
                best_dir = Vector::ith(i, *sign);
            }
        }
    }

    (best_separation, best_dir)
}

/// Computes the separation between `triangle` and `aabb` along the normal of the triangle.
///
/// If the triangle is degenerate, its normal is undefined and `-Real::MAX` is returned,
/// meaning that this axis cannot separate the shapes.
pub fn triangle_aabb_find_local_separating_normal_oneway(
    triangle: &Triangle,
    aabb: &Aabb,
) -> (Real, Vector<Real>) {
    if let Some(normal) = triangle.normal() {
        let half_extents = aabb.half_extents();
        let local_tri = triangle_local_to_aabb(aabb, triangle);
        let dist = local_tri.a.coords.dot(&normal);
        let radius = normal.abs().dot(&half_extents);
        let dir = if dist >= 0.0 { *normal } else { -*normal };

        (dist.abs() - radius, dir)
    } else {
        (-Real::MAX, Vector::zeros())
    }
}

/// Finds the best separating axis among the cross products between the axes of `aabb`
/// and the edges of `triangle`.
pub fn aabb_triangle_find_local_separating_edge_twoway(
    aabb: &Aabb,
    triangle: &Triangle,
) -> (Real, Vector<Real>) {
    let half_extents = aabb.half_extents();
    let local_tri = triangle_local_to_aabb(aabb, triangle);
    let [x2, y2, z2] = local_tri.edge_vectors();

    // We have 3 * 3 = 9 axes to test.
    let axes = [
        // Vector::{x, y ,z}().cross(x2)
        Vector::new(0.0, -x2.z, x2.y),
        Vector::new(x2.z, 0.0, -x2.x),
        Vector::new(-x2.y, x2.x, 0.0),
        // Vector::{x, y ,z}().cross(y2)
        Vector::new(0.0, -y2.z, y2.y),
        Vector::new(y2.z, 0.0, -y2.x),
        Vector::new(-y2.y, y2.x, 0.0),
        // Vector::{x, y ,z}().cross(z2)
        Vector::new(0.0, -z2.z, z2.y),
        Vector::new(z2.z, 0.0, -z2.x),
        Vector::new(-z2.y, z2.x, 0.0),
    ];

    let mut best_separation = -Real::MAX;
    let mut best_dir = Vector::zeros();

    for axis in &axes {
        if let Some(axis) = Unit::try_new(*axis, Real::default_epsilon()) {
            let separation =
                centered_box_triangle_separation_wrt_local_line(&half_extents, &local_tri, &axis);

            if separation > best_separation {
                best_separation = separation;
                best_dir = *axis;
            }
        }
    }

    (best_separation, best_dir)
}
