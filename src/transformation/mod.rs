//! Transformation of triangle meshes into sparse voxel sets.

pub use self::normalize::{normalize, NormalizeError, NormalizedMesh};

mod normalize;
/// Surface voxelization of a normalized triangle mesh.
pub mod voxelization;
