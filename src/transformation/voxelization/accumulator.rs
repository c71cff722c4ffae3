use super::{cell_index, num_cells, OccupancyGrid, VoxelizationError};
use crate::math::Point;
use std::sync::atomic::{AtomicU64, Ordering};

/// A cubic volume receiving the cells covered by rasterized triangles.
///
/// Marking is a logical OR: it is commutative and idempotent, so triangles can be
/// rasterized concurrently in any order.
pub trait VolumetricAccumulator: Sync {
    /// The number of cells along each axis.
    fn resolution(&self) -> u32;

    /// Marks `cell` as occupied.
    ///
    /// Every coordinate of `cell` must be smaller than the resolution.
    fn mark(&self, cell: Point<u32>);
}

/// A dense bitset of `R³` cells that can be marked from multiple threads.
///
/// Once every writer is done, the grid is consumed by [`AtomicOccupancyGrid::into_dense`]
/// to read the occupancy.
#[derive(Debug)]
pub struct AtomicOccupancyGrid {
    resolution: u32,
    words: Vec<AtomicU64>,
}

impl AtomicOccupancyGrid {
    /// Allocates an empty grid with `resolution` cells along each axis.
    pub fn new(resolution: u32) -> Result<Self, VoxelizationError> {
        if resolution == 0 {
            return Err(VoxelizationError::InvalidResolution(resolution));
        }

        let num_words = num_cells(resolution)
            .ok_or(VoxelizationError::OutOfMemory(resolution))?
            .div_ceil(64);
        let mut words = Vec::new();
        words
            .try_reserve_exact(num_words)
            .map_err(|_| VoxelizationError::OutOfMemory(resolution))?;
        words.extend((0..num_words).map(|_| AtomicU64::new(0)));

        Ok(Self { resolution, words })
    }

    /// Converts this grid into a plain occupancy grid.
    ///
    /// Taking `self` by value guarantees that no other thread can still be marking cells.
    pub fn into_dense(self) -> OccupancyGrid {
        let words = self.words.into_iter().map(AtomicU64::into_inner).collect();
        OccupancyGrid::from_words(self.resolution, words)
    }
}

impl VolumetricAccumulator for AtomicOccupancyGrid {
    #[inline]
    fn resolution(&self) -> u32 {
        self.resolution
    }

    #[inline]
    fn mark(&self, cell: Point<u32>) {
        debug_assert!(cell.iter().all(|e| *e < self.resolution));
        let id = cell_index(self.resolution, &cell);
        let _ = self.words[id / 64].fetch_or(1 << (id % 64), Ordering::Relaxed);
    }
}
