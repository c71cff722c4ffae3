use super::{octahedron, random_mesh};
use meshvox::math::Point;
use meshvox::transformation::normalize;
use meshvox::transformation::voxelization::{voxelize, VoxelSet, VoxelizationParameters};
use std::collections::HashSet;

#[test]
fn normalized_meshes_fit_in_the_unit_cube() {
    let mut rng = oorandom::Rand32::new(42);

    for _ in 0..20 {
        let mesh = random_mesh(&mut rng, 10);
        let original = mesh.local_aabb();
        let normalized = normalize(mesh, 0.01).unwrap();
        let aabb = normalized.mesh.local_aabb();

        for v in normalized.mesh.vertices() {
            assert!(v.iter().all(|e| *e >= 0.0 && *e <= 1.0), "{:?}", v);
        }

        approx::assert_relative_eq!(aabb.max_extent(), 1.0 / 1.01, epsilon = 1.0e-5);
        // Uniform scaling preserves the ratios between extents.
        let ratio = original.extents() / original.max_extent();
        approx::assert_relative_eq!(aabb.extents(), ratio / 1.01, epsilon = 1.0e-5);
    }
}

#[test]
fn normalization_is_idempotent() {
    let mut rng = oorandom::Rand32::new(7);
    let once = normalize(random_mesh(&mut rng, 30), 0.0).unwrap();
    let twice = normalize(once.mesh.clone(), 0.0).unwrap();
    assert_eq!(once.mesh, twice.mesh);
}

#[test]
fn cells_are_within_the_grid_and_unique() {
    let mut rng = oorandom::Rand32::new(1234);

    for resolution in [1, 3, 17, 32] {
        let params = VoxelizationParameters {
            resolution,
            ..Default::default()
        };
        let mesh = normalize(random_mesh(&mut rng, 25), params.padding).unwrap();
        let voxels = voxelize(&mesh, &params).unwrap();

        assert!(!voxels.is_empty());
        let unique: HashSet<_> = voxels.cells().iter().collect();
        assert_eq!(unique.len(), voxels.len());
        assert!(voxels
            .cells()
            .iter()
            .all(|c| c.iter().all(|e| *e < resolution)));
        // Extraction order: lexicographic on (i, j, k).
        assert!(voxels
            .cells()
            .windows(2)
            .all(|w| (w[0].x, w[0].y, w[0].z) < (w[1].x, w[1].y, w[1].z)));
    }
}

#[test]
fn voxelization_is_deterministic() {
    let mut rng = oorandom::Rand32::new(99);
    let mesh = normalize(random_mesh(&mut rng, 200), 0.01).unwrap();
    let params = VoxelizationParameters {
        resolution: 40,
        ..Default::default()
    };
    let sequential = VoxelizationParameters {
        parallel: false,
        ..params
    };

    let first = voxelize(&mesh, &params).unwrap();
    let second = voxelize(&mesh, &params).unwrap();
    let third = voxelize(&mesh, &sequential).unwrap();

    assert_eq!(first, second);
    assert_eq!(first, third);
}

fn is_near(set: &HashSet<Point<u32>>, cell: &Point<u32>) -> bool {
    let range = |e: u32| e.saturating_sub(1)..=e + 1;
    range(cell.x).any(|i| {
        range(cell.y).any(|j| range(cell.z).any(|k| set.contains(&Point::new(i, j, k))))
    })
}

fn voxelize_octahedron(resolution: u32) -> VoxelSet {
    let params = VoxelizationParameters {
        resolution,
        ..Default::default()
    };
    let mesh = normalize(octahedron(), params.padding).unwrap();
    voxelize(&mesh, &params).unwrap()
}

#[test]
fn finer_grids_refine_coarser_ones() {
    let coarse = voxelize_octahedron(16);
    let fine = voxelize_octahedron(128);
    assert!(fine.len() > coarse.len());

    let coarse_cells: HashSet<_> = coarse.cells().iter().copied().collect();
    let projected: HashSet<_> = fine.cells().iter().map(|c| c / 8).collect();

    for cell in &projected {
        assert!(is_near(&coarse_cells, cell), "{:?}", cell);
    }
    for cell in &coarse_cells {
        assert!(is_near(&projected, cell), "{:?}", cell);
    }
}

#[test]
fn small_isolated_triangles_are_rasterized_at_every_resolution() {
    let mesh = meshvox::shape::Mesh::new(
        vec![
            Point::new(0.0, 0.0, 0.0),
            Point::new(0.2, 0.0, 0.0),
            Point::new(0.0, 0.2, 0.0),
            Point::new(1.0, 1.0, 1.0),
            Point::new(1.0001, 1.0, 1.0),
            Point::new(1.0, 1.0001, 1.0),
        ],
        vec![[0, 1, 2], [3, 4, 5]],
    )
    .unwrap();
    let normalized = normalize(mesh, 0.01).unwrap();

    for resolution in [1, 2, 4, 8, 64] {
        let params = VoxelizationParameters {
            resolution,
            ..Default::default()
        };
        let voxels = voxelize(&normalized, &params).unwrap();
        let far = Point::new(resolution - 1, resolution - 1, resolution - 1);
        assert!(voxels.cells().contains(&far), "resolution {}", resolution);
    }
}
