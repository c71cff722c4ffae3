use super::{AtomicOccupancyGrid, OccupancyGrid, VolumetricAccumulator, VoxelizationError};
use crate::bounding_volume::Aabb;
use crate::math::{Point, Point2, Real, Vector, DIM};
use crate::query::{self, sat};
use crate::shape::{Mesh, Triangle};
use std::ops::RangeInclusive;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Margin added to the candidate ranges before the exact intersection test, to absorb
/// rounding errors of the plane evaluation.
///
/// This is the margin for grids of up to 64 cells per axis. It grows linearly beyond,
/// following the spacing of floating-point numbers near `resolution`.
const CANDIDATE_MARGIN: Real = 1.0e-4;

/// The candidate margin, in grid units, for a grid with `resolution` cells per axis.
#[inline]
fn candidate_margin(resolution: u32) -> Real {
    CANDIDATE_MARGIN * (resolution as Real / 64.0).max(1.0)
}

/// Counters gathered while rasterizing a mesh.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RasterStats {
    /// The number of rasterized triangles.
    pub num_triangles: usize,
    /// The number of triangles skipped because their area is zero.
    pub num_degenerate: usize,
    /// The number of triangles projected along each axis.
    pub dominant_axes: [usize; DIM],
    /// The number of exact triangle-cell intersection tests performed.
    pub num_cell_tests: usize,
}

impl RasterStats {
    fn merge(mut self, other: Self) -> Self {
        self.num_triangles += other.num_triangles;
        self.num_degenerate += other.num_degenerate;
        self.num_cell_tests += other.num_cell_tests;
        for i in 0..DIM {
            self.dominant_axes[i] += other.dominant_axes[i];
        }
        self
    }
}

/// Rasterizes triangles of the unit cube into a cubic grid.
///
/// Each triangle is projected along its dominant axis. For every cell of the 2D footprint
/// of the projection, the range of cells crossed by the triangle plane gives the candidate
/// cells, which are then confirmed with an exact separating-axis test.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GridRasterizer {
    resolution: u32,
    parallel: bool,
}

impl GridRasterizer {
    /// A rasterizer targeting a grid with `resolution` cells along each axis.
    pub fn new(resolution: u32) -> Self {
        Self {
            resolution,
            parallel: true,
        }
    }

    /// Enables or disables the parallel processing of triangles.
    ///
    /// This has no effect if the `parallel` feature is disabled.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The number of cells along each axis.
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Rasterizes `mesh`, expressed in the unit cube, into a fresh occupancy grid.
    pub fn rasterize(&self, mesh: &Mesh) -> Result<OccupancyGrid, VoxelizationError> {
        let grid = AtomicOccupancyGrid::new(self.resolution)?;
        let stats = self.rasterize_into(mesh, &grid);

        log::debug!(
            "rasterized {} triangles ({} degenerate), dominant axes {:?}, {} cell tests",
            stats.num_triangles,
            stats.num_degenerate,
            stats.dominant_axes,
            stats.num_cell_tests
        );
        if stats.num_degenerate > 0 {
            log::warn!(
                "skipped {} degenerate triangles out of {}",
                stats.num_degenerate,
                stats.num_triangles
            );
        }

        // Every rasterization task has completed here.
        Ok(grid.into_dense())
    }

    /// Rasterizes `mesh`, expressed in the unit cube, into `accumulator`.
    ///
    /// The resolution of `accumulator` is used instead of the resolution of this rasterizer.
    /// This returns once every triangle has been processed.
    pub fn rasterize_into<A: VolumetricAccumulator + ?Sized>(
        &self,
        mesh: &Mesh,
        accumulator: &A,
    ) -> RasterStats {
        let scale = accumulator.resolution() as Real;
        let process = |idx: &[u32; 3]| {
            let triangle = Triangle::new(
                mesh.vertices()[idx[0] as usize] * scale,
                mesh.vertices()[idx[1] as usize] * scale,
                mesh.vertices()[idx[2] as usize] * scale,
            );
            rasterize_triangle(&triangle, accumulator)
        };

        #[cfg(feature = "parallel")]
        if self.parallel {
            return mesh
                .indices()
                .par_iter()
                .map(&process)
                .reduce(RasterStats::default, RasterStats::merge);
        }

        mesh.indices()
            .iter()
            .map(&process)
            .fold(RasterStats::default(), RasterStats::merge)
    }
}

/// The range of cells of a grid with `resolution` cells touching the interval `[lo, hi]`.
///
/// Cells are closed, so a bound lying exactly on a cell boundary selects the cells on
/// both sides.
fn touched_cells(lo: Real, hi: Real, resolution: u32) -> Option<RangeInclusive<u32>> {
    let first = (lo.ceil() - 1.0).max(0.0);
    let last = hi.floor().min(resolution as Real - 1.0);

    if first <= last {
        Some(first as u32..=last as u32)
    } else {
        None
    }
}

/// Marks every cell intersected by `triangle`, given in grid coordinates.
fn rasterize_triangle<A: VolumetricAccumulator + ?Sized>(
    triangle: &Triangle,
    accumulator: &A,
) -> RasterStats {
    let mut stats = RasterStats {
        num_triangles: 1,
        ..Default::default()
    };

    if triangle.is_degenerate() {
        stats.num_degenerate = 1;
        return stats;
    }

    let resolution = accumulator.resolution();
    let margin = candidate_margin(resolution);
    let normal = triangle.scaled_normal();
    let d = triangle.dominant_axis();
    let (u, v) = ((d + 1) % DIM, (d + 2) % DIM);
    stats.dominant_axes[d] = 1;

    let aabb = triangle.local_aabb();
    let (Some(range_u), Some(range_v), Some(_)) = (
        touched_cells(aabb.mins[u], aabb.maxs[u], resolution),
        touched_cells(aabb.mins[v], aabb.maxs[v], resolution),
        touched_cells(aabb.mins[d], aabb.maxs[d], resolution),
    ) else {
        return stats;
    };

    let a = triangle.a;
    let projected = triangle.vertices().map(|p| Point2::new(p[u], p[v]));
    // Coordinate along `d` of the point of the triangle plane projecting on (pu, pv).
    let plane = |pu: Real, pv: Real| {
        a[d] - (normal[u] * (pu - a[u]) + normal[v] * (pv - a[v])) / normal[d]
    };

    for cu in range_u {
        for cv in range_v.clone() {
            let mins = Point2::new(cu as Real, cv as Real);
            let maxs = Point2::new(mins.x + 1.0, mins.y + 1.0);
            let (separation, _) =
                sat::rect_triangle2_find_local_separating_axis(&mins, &maxs, &projected);

            if separation > margin {
                continue;
            }

            let corners = [
                plane(mins.x, mins.y),
                plane(maxs.x, mins.y),
                plane(mins.x, maxs.y),
                plane(maxs.x, maxs.y),
            ];
            let w_min = corners.iter().copied().fold(Real::MAX, Real::min);
            let w_max = corners.iter().copied().fold(-Real::MAX, Real::max);
            let lo = w_min.max(aabb.mins[d]) - margin;
            let hi = w_max.min(aabb.maxs[d]) + margin;

            let Some(range_w) = touched_cells(lo, hi, resolution) else {
                continue;
            };

            for cw in range_w {
                let mut cell = Point::<u32>::origin();
                cell[u] = cu;
                cell[v] = cv;
                cell[d] = cw;

                let cell_mins = cell.map(|e| e as Real);
                let cell_aabb = Aabb::new(cell_mins, cell_mins + Vector::repeat(1.0));
                stats.num_cell_tests += 1;

                if query::intersection_test_aabb_triangle(&cell_aabb, triangle) {
                    accumulator.mark(cell);
                }
            }
        }
    }

    stats
}
