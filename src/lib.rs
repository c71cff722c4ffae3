/*!
meshvox
=======

**meshvox** converts a triangle mesh into a sparse set of occupied voxels.

The pipeline loads a `.obj` or `.ply` file, rescales it uniformly into the
unit cube, rasterizes every triangle into a cubic occupancy grid (in parallel
when the `parallel` feature is enabled) and extracts the occupied cells in a
fixed traversal order so the output is reproducible byte-for-byte.

```no_run
use meshvox::pipeline::{Mode, Pipeline};
use meshvox::transformation::voxelization::VoxelizationParameters;

let params = VoxelizationParameters {
    resolution: 64,
    ..Default::default()
};
let output = Pipeline::new(params)
    .run("bunny.obj", Mode::Batch { output: "bunny.vox".into() })
    .unwrap();
println!("{} occupied voxels", output.voxels.len());
```
*/

#![deny(non_camel_case_types)]
#![deny(unused_parens)]
#![deny(non_upper_case_globals)]
#![deny(unused_results)]
#![warn(missing_docs)]
#![warn(unused_imports)]
#![allow(missing_copy_implementations)]

#[macro_use]
extern crate approx;

pub extern crate nalgebra as na;

pub mod bounding_volume;
pub mod camera;
pub mod io;
pub mod pipeline;
pub mod query;
pub mod shape;
pub mod transformation;

/// Compilation flags dependent aliases for mathematical types.
pub mod math {
    pub use na::{Matrix4, Point2, Point3, Vector2, Vector3};

    /// The scalar type used throughout this crate.
    pub type Real = f32;

    /// The default tolerance used for geometric operations.
    pub const DEFAULT_EPSILON: Real = Real::EPSILON;

    /// The dimension of the space.
    pub const DIM: usize = 3;

    /// The point type.
    pub use Point3 as Point;

    /// The vector type.
    pub use Vector3 as Vector;
}
