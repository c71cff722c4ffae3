use crate::math::{Point, Real};
use crate::transformation::NormalizedMesh;

/// Scale of the cube drawn for each voxel, relative to the cell size.
const INSTANCE_SCALE_FACTOR: Real = 0.4;

/// A sparse set of voxels.
///
/// It only contains the cells of a cubic grid that are considered as "full" after a
/// voxelization, in the order they were extracted from the grid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VoxelSet {
    resolution: u32,
    cells: Vec<Point<u32>>,
}

/// Per-instance data needed to draw a voxel set as a set of small cubes.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderInstances {
    /// The normalized position of each voxel, as consecutive `x, y, z` triples.
    pub positions: Vec<f32>,
    /// The uniform scale of the cube drawn at each position.
    pub scale: f32,
}

impl RenderInstances {
    /// The number of instances.
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    /// Is there no instance to draw?
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl VoxelSet {
    /// Creates a voxel set from its cells.
    ///
    /// Every coordinate of every cell must be smaller than `resolution`.
    pub fn new(resolution: u32, cells: Vec<Point<u32>>) -> Self {
        debug_assert!(cells.iter().all(|c| c.iter().all(|e| *e < resolution)));
        Self { resolution, cells }
    }

    /// The number of cells along each axis of the grid this set was extracted from.
    #[inline]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// The integer coordinates of the occupied cells.
    #[inline]
    pub fn cells(&self) -> &[Point<u32>] {
        &self.cells
    }

    /// The number of occupied cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Does this set contain no cell?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The width of a cell in the normalized frame.
    pub fn voxel_size(&self) -> Real {
        1.0 / self.resolution as Real
    }

    /// The position of `cell` in the unit cube, i.e., its coordinates divided by the resolution.
    #[inline]
    pub fn normalized_position(&self, cell: &Point<u32>) -> Point<Real> {
        let r = self.resolution as Real;
        cell.map(|e| e as Real / r)
    }

    /// The normalized positions of all the cells, in order.
    pub fn normalized_positions(&self) -> impl ExactSizeIterator<Item = Point<Real>> + '_ {
        self.cells.iter().map(|c| self.normalized_position(c))
    }

    /// The positions of all the cells mapped back to the frame of the mesh they were
    /// computed from.
    pub fn original_positions(&self, mesh: &NormalizedMesh) -> Vec<Point<Real>> {
        self.normalized_positions()
            .map(|p| mesh.to_original(&p))
            .collect()
    }

    /// The smallest and largest cell coordinates, or `None` if this set is empty.
    pub fn compute_bb(&self) -> Option<(Point<u32>, Point<u32>)> {
        let first = *self.cells.first()?;
        Some(self.cells[1..].iter().fold((first, first), |(mins, maxs), c| {
            (mins.inf(c), maxs.sup(c))
        }))
    }

    /// The data needed to draw this set as instanced cubes.
    pub fn render_instances(&self) -> RenderInstances {
        RenderInstances {
            positions: self
                .normalized_positions()
                .flat_map(|p| [p.x, p.y, p.z])
                .collect(),
            scale: INSTANCE_SCALE_FACTOR * self.voxel_size(),
        }
    }
}
