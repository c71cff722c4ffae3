use super::{octahedron, scratch_dir};
use meshvox::pipeline::{Mode, Pipeline};
use meshvox::transformation::voxelization::{load_voxel_set, write_voxel_set, VoxelizationParameters};

#[test]
fn batch_output_round_trip() {
    let dir = scratch_dir("round-trip");
    let path = dir.join("octahedron.vox");
    let params = VoxelizationParameters {
        resolution: 23,
        ..Default::default()
    };

    let output = Pipeline::new(params)
        .run_mesh(octahedron(), Mode::Batch { output: path.clone() })
        .unwrap();
    assert!(output.instances.is_none());

    let text = std::fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("23"));
    assert_eq!(lines.next(), Some(output.voxels.len().to_string().as_str()));
    assert_eq!(lines.count(), output.voxels.len());

    let read = load_voxel_set(&path).unwrap();
    assert_eq!(read, output.voxels);

    let mut rewritten = Vec::new();
    write_voxel_set(&read, &mut rewritten).unwrap();
    assert_eq!(rewritten, text.into_bytes());
}

#[test]
fn voxels_map_back_near_the_original_mesh() {
    let params = VoxelizationParameters {
        resolution: 32,
        ..Default::default()
    };
    let output = Pipeline::new(params)
        .run_mesh(octahedron(), Mode::Interactive)
        .unwrap();

    let original = octahedron().local_aabb();
    let cell_size = original.max_extent() * 1.01 / 32.0;

    for p in output.voxels.original_positions(&output.mesh) {
        for i in 0..3 {
            assert!(p[i] >= original.mins[i] - 1.0e-4);
            assert!(p[i] <= original.maxs[i] + cell_size);
        }
    }
}
