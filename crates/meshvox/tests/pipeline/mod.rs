mod cli;
mod cube;
mod errors;
mod properties;
mod round_trip;

use meshvox::math::Point;
use meshvox::shape::Mesh;
use std::path::PathBuf;

/// A unit cube made of quads.
pub const CUBE_OBJ: &str = "\
o cube
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
v 0 0 1
v 1 0 1
v 1 1 1
v 0 1 1
f 1 4 3 2
f 5 6 7 8
f 1 2 6 5
f 4 8 7 3
f 1 5 8 4
f 2 3 7 6
";

pub fn unit_cube() -> Mesh {
    let vertices = (0..8)
        .map(|i| Point::new((i & 1) as f32, ((i >> 1) & 1) as f32, ((i >> 2) & 1) as f32))
        .collect();
    let indices = vec![
        [0, 2, 3],
        [0, 3, 1],
        [4, 5, 7],
        [4, 7, 6],
        [0, 1, 5],
        [0, 5, 4],
        [2, 6, 7],
        [2, 7, 3],
        [0, 4, 6],
        [0, 6, 2],
        [1, 3, 7],
        [1, 7, 5],
    ];
    Mesh::new(vertices, indices).unwrap()
}

pub fn octahedron() -> Mesh {
    let vertices = vec![
        Point::new(1.0, 0.1, 0.2),
        Point::new(-1.0, -0.1, 0.0),
        Point::new(0.2, 1.3, 0.1),
        Point::new(0.0, -0.9, -0.3),
        Point::new(0.1, 0.0, 0.8),
        Point::new(-0.2, 0.3, -1.1),
    ];
    let indices = vec![
        [0, 2, 4],
        [2, 1, 4],
        [1, 3, 4],
        [3, 0, 4],
        [2, 0, 5],
        [1, 2, 5],
        [3, 1, 5],
        [0, 3, 5],
    ];
    Mesh::new(vertices, indices).unwrap()
}

pub fn random_mesh(rng: &mut oorandom::Rand32, num_triangles: usize) -> Mesh {
    let vertices = (0..num_triangles * 3)
        .map(|_| {
            Point::new(
                rng.rand_float() * 20.0 - 10.0,
                rng.rand_float() * 4.0 + 3.0,
                rng.rand_float() * 8.0 - 1.0,
            )
        })
        .collect();
    let indices = (0..num_triangles as u32)
        .map(|i| [3 * i, 3 * i + 1, 3 * i + 2])
        .collect();
    Mesh::new(vertices, indices).unwrap()
}

/// A fresh directory for the files written by one test.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("meshvox-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
