//! Surface voxelization of a normalized triangle mesh.
//!
//! The triangles are rasterized into a cubic grid of `R³` cells covering the unit cube.
//! A cell is occupied if it intersects at least one triangle of the mesh. Both the
//! triangles and the cells are considered closed, so a triangle lying exactly on the
//! boundary between two cells marks both of them.

pub use self::accumulator::{AtomicOccupancyGrid, VolumetricAccumulator};
pub use self::occupancy::OccupancyGrid;
pub use self::rasterizer::{GridRasterizer, RasterStats};
pub use self::voxel_set::{RenderInstances, VoxelSet};
pub use self::voxel_set_io::{
    load_voxel_set, read_voxel_set, save_voxel_set, write_voxel_set, VoxelSetFormatError,
};

use crate::math::{Point, Real};
use crate::transformation::NormalizedMesh;

mod accumulator;
mod occupancy;
mod rasterizer;
mod voxel_set;
mod voxel_set_io;

/// Error raised when the voxel grid can't be created.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum VoxelizationError {
    /// The grid resolution must be at least 1.
    #[error("invalid resolution {0}: it must be a positive integer")]
    InvalidResolution(u32),
    /// The grid resolution exceeds the configured maximum.
    #[error("the resolution {resolution} exceeds the maximum resolution {max_resolution}")]
    ResolutionTooLarge {
        /// The requested resolution.
        resolution: u32,
        /// The largest accepted resolution.
        max_resolution: u32,
    },
    /// The dense grid could not be allocated.
    #[error("not enough memory to allocate a voxel grid of resolution {0}")]
    OutOfMemory(u32),
}

/// Parameters of the voxelization pipeline.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VoxelizationParameters {
    /// The number of cells along each axis of the grid.
    ///
    /// Default: 23
    pub resolution: u32,
    /// Relative margin added to the largest extent of the mesh before rescaling it
    /// into the unit cube.
    ///
    /// Default: 0.01
    pub padding: Real,
    /// The largest accepted resolution. The dense grid takes `resolution³` bits.
    ///
    /// Default: 1024
    pub max_resolution: u32,
    /// Rasterize the triangles in parallel. Ignored if the `parallel` feature is disabled.
    ///
    /// Default: true
    pub parallel: bool,
}

impl Default for VoxelizationParameters {
    fn default() -> Self {
        Self {
            resolution: 23,
            padding: 0.01,
            max_resolution: 1024,
            parallel: true,
        }
    }
}

impl VoxelizationParameters {
    /// Checks that the resolution is usable.
    pub fn validate(&self) -> Result<(), VoxelizationError> {
        if self.resolution == 0 {
            return Err(VoxelizationError::InvalidResolution(self.resolution));
        }

        if self.resolution > self.max_resolution {
            return Err(VoxelizationError::ResolutionTooLarge {
                resolution: self.resolution,
                max_resolution: self.max_resolution,
            });
        }

        Ok(())
    }
}

/// Computes the set of cells of a `resolution³` grid intersected by the triangles of `mesh`.
///
/// This rasterizes the mesh into a fresh [`AtomicOccupancyGrid`], waits for every
/// triangle to be processed, and extracts the occupied cells.
pub fn voxelize(
    mesh: &NormalizedMesh,
    params: &VoxelizationParameters,
) -> Result<VoxelSet, VoxelizationError> {
    params.validate()?;
    let grid = GridRasterizer::new(params.resolution)
        .parallel(params.parallel)
        .rasterize(&mesh.mesh)?;
    let voxels = grid.into_voxel_set();
    log::info!(
        "extracted {} occupied cells out of {}³",
        voxels.len(),
        voxels.resolution()
    );
    Ok(voxels)
}

/// The linear index of `cell` in a dense grid with the given resolution.
///
/// The last coordinate varies fastest.
#[inline]
pub(crate) fn cell_index(resolution: u32, cell: &Point<u32>) -> usize {
    let r = resolution as usize;
    (cell.x as usize * r + cell.y as usize) * r + cell.z as usize
}

/// The number of cells of a dense grid with the given resolution.
#[inline]
pub(crate) fn num_cells(resolution: u32) -> Option<usize> {
    let r = resolution as usize;
    r.checked_mul(r)?.checked_mul(r)
}
