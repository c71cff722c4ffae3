use crate::bounding_volume::Aabb;
use crate::query::sat;
use crate::shape::Triangle;

/// Tests if a triangle intersects an AABB.
///
/// Both shapes are closed: a triangle touching a face, an edge or a corner of the
/// AABB is considered intersecting. A degenerate triangle is tested as the segment
/// (or point) it reduces to.
pub fn intersection_test_aabb_triangle(aabb1: &Aabb, triangle2: &Triangle) -> bool {
    /*
     *
     * Point-Face cases.
     *
     */
    let sep1 = sat::aabb_triangle_find_local_separating_normal_oneway(aabb1, triangle2).0;
    if sep1 > 0.0 {
        return false;
    }

    let sep2 = sat::triangle_aabb_find_local_separating_normal_oneway(triangle2, aabb1).0;
    if sep2 > 0.0 {
        return false;
    }

    /*
     *
     * Edge-Edge cases.
     *
     */
    let sep3 = sat::aabb_triangle_find_local_separating_edge_twoway(aabb1, triangle2).0;
    sep3 <= 0.0
}
