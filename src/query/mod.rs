//! Non-persistent geometric queries.
//!
//! The functions exported by this module and its `sat` submodule have the form
//! `[operation]_[shape1]_[shape2]()` where `[operation]` is either a separating-axis
//! search or an `intersection_test`, and `[shape1]`/`[shape2]` name the shapes involved.

pub use self::intersection_test::intersection_test_aabb_triangle;

mod intersection_test;
pub mod sat;
