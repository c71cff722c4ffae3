use super::{scratch_dir, unit_cube, CUBE_OBJ};
use meshvox::pipeline::{Mode, Pipeline};
use meshvox::transformation::voxelization::VoxelizationParameters;

fn params(resolution: u32) -> VoxelizationParameters {
    VoxelizationParameters {
        resolution,
        ..Default::default()
    }
}

#[test]
fn unit_cube_only_marks_the_shell() {
    let output = Pipeline::new(params(4))
        .run_mesh(unit_cube(), Mode::Interactive)
        .unwrap();
    let voxels = output.voxels;

    assert_eq!(voxels.len(), 56);
    for cell in voxels.cells() {
        assert!(cell.iter().any(|e| *e == 0 || *e == 3), "{:?}", cell);
    }
}

#[test]
fn unit_cube_shell_at_higher_resolution() {
    for r in [1u32, 2, 8, 13] {
        let output = Pipeline::new(params(r))
            .run_mesh(unit_cube(), Mode::Interactive)
            .unwrap();
        let inner = r.saturating_sub(2);
        assert_eq!(output.voxels.len() as u32, r * r * r - inner * inner * inner);
    }
}

#[test]
fn cube_from_obj_and_ply_files() {
    let dir = scratch_dir("cube-files");

    let obj_path = dir.join("cube.obj");
    std::fs::write(&obj_path, CUBE_OBJ).unwrap();

    let mut ply = String::from(
        "ply\nformat ascii 1.0\nelement vertex 8\nproperty float x\nproperty float y\n\
         property float z\nelement face 6\nproperty list uchar int vertex_indices\nend_header\n",
    );
    for line in CUBE_OBJ.lines() {
        if let Some(v) = line.strip_prefix("v ") {
            ply.push_str(v);
            ply.push('\n');
        }
    }
    for line in CUBE_OBJ.lines() {
        if let Some(f) = line.strip_prefix("f ") {
            let ids: Vec<u32> = f.split(' ').map(|i| i.parse::<u32>().unwrap() - 1).collect();
            ply.push_str(&format!("4 {} {} {} {}\n", ids[0], ids[1], ids[2], ids[3]));
        }
    }
    let ply_path = dir.join("CUBE.PLY");
    std::fs::write(&ply_path, ply).unwrap();

    let pipeline = Pipeline::new(params(4));
    let from_obj = pipeline.run(&obj_path, Mode::Interactive).unwrap();
    let from_ply = pipeline.run(&ply_path, Mode::Interactive).unwrap();
    let from_memory = pipeline.run_mesh(unit_cube(), Mode::Interactive).unwrap();

    assert_eq!(from_obj.voxels, from_memory.voxels);
    assert_eq!(from_ply.voxels, from_memory.voxels);
}
