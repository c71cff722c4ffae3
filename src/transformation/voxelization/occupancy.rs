use super::{cell_index, VoxelSet};
use crate::math::Point;

/// A dense bitset of `R³` cells, readable once rasterization is complete.
///
/// Bit `(i * R + j) * R + k` is set if the cell `(i, j, k)` is occupied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    resolution: u32,
    words: Vec<u64>,
}

impl OccupancyGrid {
    pub(crate) fn from_words(resolution: u32, words: Vec<u64>) -> Self {
        Self { resolution, words }
    }

    /// The number of cells along each axis.
    #[inline]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Is the given cell occupied?
    ///
    /// Cells outside of the grid are never occupied.
    pub fn is_occupied(&self, cell: &Point<u32>) -> bool {
        if cell.iter().any(|e| *e >= self.resolution) {
            return false;
        }

        let id = cell_index(self.resolution, cell);
        self.words[id / 64] & (1 << (id % 64)) != 0
    }

    /// The number of occupied cells.
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Extracts the occupied cells, freeing the dense grid.
    ///
    /// The cells are listed with `i` as the outermost coordinate and `k` as the innermost
    /// (fastest varying) one.
    pub fn into_voxel_set(self) -> VoxelSet {
        let r = self.resolution as usize;
        let mut cells = Vec::with_capacity(self.count());

        for (word_id, word) in self.words.iter().enumerate() {
            let mut bits = *word;

            while bits != 0 {
                let id = word_id * 64 + bits.trailing_zeros() as usize;
                bits &= bits - 1;
                cells.push(Point::new(
                    (id / (r * r)) as u32,
                    (id / r % r) as u32,
                    (id % r) as u32,
                ));
            }
        }

        VoxelSet::new(self.resolution, cells)
    }
}
