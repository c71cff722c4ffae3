use super::scratch_dir;
use meshvox::io::MeshLoadError;
use meshvox::pipeline::{Mode, Pipeline, PipelineError};
use meshvox::transformation::NormalizeError;

fn run(name: &str, content: &str) -> Result<usize, PipelineError> {
    let path = scratch_dir("errors").join(name);
    std::fs::write(&path, content).unwrap();
    Pipeline::default()
        .run(&path, Mode::Interactive)
        .map(|output| output.voxels.len())
}

#[test]
fn mesh_without_faces() {
    assert!(matches!(
        run("no-faces.obj", "v 0 0 0\nv 1 0 0\nv 0 1 0\n"),
        Err(PipelineError::Load(MeshLoadError::EmptyMesh))
    ));
}

#[test]
fn mesh_collapsed_to_a_point() {
    assert!(matches!(
        run("point.obj", "v 1 2 3\nv 1 2 3\nv 1 2 3\nf 1 2 3\n"),
        Err(PipelineError::Normalize(NormalizeError::DegenerateMesh))
    ));
}

#[test]
fn unsupported_extension() {
    assert!(matches!(
        run("mesh.stl", "solid\nendsolid\n"),
        Err(PipelineError::Load(MeshLoadError::UnsupportedFormat(_)))
    ));
}

#[test]
fn flat_mesh_is_not_degenerate() {
    // A single triangle only has a zero extent along one axis.
    assert_eq!(run("flat.obj", "v 0 0 0\nv 2 0 0\nv 0 2 0\nf 1 2 3\n").unwrap(), 23 * 24 / 2);
}
