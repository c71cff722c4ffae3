//! Definition of the triangle shape.

use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector, DEFAULT_EPSILON};

use na::Unit;

/// A triangle shape.
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Triangle {
    /// The triangle first point.
    pub a: Point<Real>,
    /// The triangle second point.
    pub b: Point<Real>,
    /// The triangle third point.
    pub c: Point<Real>,
}

impl Triangle {
    /// Creates a triangle from three points.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>, c: Point<Real>) -> Triangle {
        Triangle { a, b, c }
    }

    /// The three vertices of this triangle.
    #[inline]
    pub fn vertices(&self) -> [Point<Real>; 3] {
        [self.a, self.b, self.c]
    }

    /// The normal of this triangle assuming it is oriented counter-clockwise.
    ///
    /// Returns `None` if the triangle is degenerate.
    #[inline]
    pub fn normal(&self) -> Option<Unit<Vector<Real>>> {
        if self.is_degenerate() {
            None
        } else {
            Unit::try_new(self.scaled_normal(), 0.0)
        }
    }

    /// A vector normal of this triangle.
    ///
    /// The vector points such that it is collinear to `AB × AC` (where `×` denotes the cross
    /// product).
    #[inline]
    pub fn scaled_normal(&self) -> Vector<Real> {
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        ab.cross(&ac)
    }

    /// The three edge vectors of this triangle: `[AB, BC, CA]`.
    #[inline]
    pub fn edge_vectors(&self) -> [Vector<Real>; 3] {
        [self.b - self.a, self.c - self.b, self.a - self.c]
    }

    /// Is this triangle degenerate, i.e., are its three vertices (almost) collinear?
    ///
    /// The test is relative to the edge lengths: `|AB × AC| <= ε |AB| |AC|`, so it
    /// doesn't depend on the size of the triangle.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        let sq_sin = DEFAULT_EPSILON * DEFAULT_EPSILON;
        ab.cross(&ac).norm_squared() <= sq_sin * ab.norm_squared() * ac.norm_squared()
    }

    /// The coordinate axis most nearly parallel to the normal of this triangle.
    ///
    /// The orthographic projection of the triangle along that axis has the largest
    /// area among the three axis-aligned projections. Ties are broken toward the
    /// axis with the smallest index.
    #[inline]
    pub fn dominant_axis(&self) -> usize {
        self.scaled_normal().iamax()
    }

    /// Computes the extents of this triangle on the given direction.
    ///
    /// This computes the min and max values of the dot products between each
    /// vertex of this triangle and `dir`. `dir` does not have to be normalized.
    #[inline]
    pub fn extents_on_dir(&self, dir: &Vector<Real>) -> (Real, Real) {
        let a = self.a.coords.dot(dir);
        let b = self.b.coords.dot(dir);
        let c = self.c.coords.dot(dir);

        (a.min(b).min(c), a.max(b).max(c))
    }

    /// The min and max coordinates of this triangle along the `i`-th axis.
    #[inline]
    pub fn extents_on_axis(&self, i: usize) -> (Real, Real) {
        let (a, b, c) = (self.a[i], self.b[i], self.c[i]);
        (a.min(b).min(c), a.max(b).max(c))
    }

    /// The smallest AABB enclosing this triangle.
    #[inline]
    pub fn local_aabb(&self) -> Aabb {
        Aabb::new(
            self.a.coords.inf(&self.b.coords).inf(&self.c.coords).into(),
            self.a.coords.sup(&self.b.coords).sup(&self.c.coords).into(),
        )
    }

    /// Applies `f` to every vertex of this triangle.
    #[inline]
    pub fn map(&self, f: impl Fn(Point<Real>) -> Point<Real>) -> Triangle {
        Triangle::new(f(self.a), f(self.b), f(self.c))
    }
}

#[cfg(test)]
mod test {
    use crate::math::{Point, Vector};
    use crate::shape::Triangle;

    #[test]
    fn test_triangle_normal() {
        let pa = Point::new(0.0, 5.0, 0.0);
        let pb = Point::new(0.0, 0.0, 0.0);
        let pc = Point::new(0.0, 0.0, 4.0);

        let normal = Triangle::new(pa, pb, pc).normal().unwrap();
        assert_relative_eq!(*normal, -Vector::x());
    }

    #[test]
    fn test_tiny_triangle_is_not_degenerate() {
        let tri = Triangle::new(
            Point::new(1.0, 1.0, 1.0),
            Point::new(1.0 + 1.0e-6, 1.0, 1.0),
            Point::new(1.0, 1.0 + 1.0e-6, 1.0),
        );
        assert!(!tri.is_degenerate());
        assert_relative_eq!(*tri.normal().unwrap(), Vector::z(), epsilon = 1.0e-3);
    }

    #[test]
    fn test_dominant_axis() {
        let xy = Triangle::new(
            Point::new(0.0, 0.0, 0.3),
            Point::new(1.0, 0.0, 0.35),
            Point::new(0.0, 1.0, 0.3),
        );
        assert_eq!(xy.dominant_axis(), 2);

        let yz = Triangle::new(
            Point::new(0.5, 0.0, 0.0),
            Point::new(0.5, 1.0, 0.0),
            Point::new(0.6, 0.0, 1.0),
        );
        assert_eq!(yz.dominant_axis(), 0);
    }

    #[test]
    fn test_degenerate_triangle() {
        let tri = Triangle::new(
            Point::new(0.0, 0.0, 0.0),
            Point::new(1.0, 1.0, 1.0),
            Point::new(2.0, 2.0, 2.0),
        );
        assert!(tri.is_degenerate());
        assert!(tri.normal().is_none());
    }

    #[test]
    fn test_extents() {
        let tri = Triangle::new(
            Point::new(0.0, 2.0, -1.0),
            Point::new(3.0, 0.0, 1.0),
            Point::new(1.0, 1.0, 4.0),
        );
        assert_eq!(tri.extents_on_axis(0), (0.0, 3.0));
        assert_eq!(tri.extents_on_axis(2), (-1.0, 4.0));
        let aabb = tri.local_aabb();
        assert_eq!(aabb.mins, Point::new(0.0, 0.0, -1.0));
        assert_eq!(aabb.maxs, Point::new(3.0, 2.0, 4.0));
    }
}
