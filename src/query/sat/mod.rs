//! Application of the Separating-Axis-Theorem (SAT).
//!
//! Every function returns the separation along the best axis found: positive when
//! the shapes are separated along that axis, zero when they touch, negative when
//! their projections overlap. Shapes are closed, so touching counts as overlapping.

pub use self::sat_aabb_triangle::*;
pub use self::sat_rect_triangle2::*;

mod sat_aabb_triangle;
mod sat_rect_triangle2;
