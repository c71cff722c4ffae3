use super::{triangulate_fan, MeshLoadError, MeshReader};
use crate::math::Point;
use crate::shape::Mesh;
use obj::ObjData;
use std::io::BufRead;

/// Reader of Wavefront `.obj` files.
///
/// Every polygon of every group of every object is kept. Polygons with more than three
/// vertices are split into a triangle fan. Texture coordinates, normals and materials
/// are ignored.
#[derive(Copy, Clone, Debug, Default)]
pub struct ObjReader;

impl MeshReader for ObjReader {
    fn read(&self, input: &mut dyn BufRead) -> Result<Mesh, MeshLoadError> {
        let ObjData {
            position, objects, ..
        } = ObjData::load_buf(input).map_err(|e| MeshLoadError::Parse(e.to_string()))?;

        let vertices = position
            .iter()
            .map(|v| Point::new(v[0], v[1], v[2]))
            .collect();

        let mut indices = Vec::new();
        let mut polygon = Vec::new();

        for group in objects.iter().flat_map(|o| o.groups.iter()) {
            for poly in &group.polys {
                polygon.clear();
                for tuple in &poly.0 {
                    let id = u32::try_from(tuple.0).map_err(|_| {
                        MeshLoadError::Parse(format!("vertex index {} is too large", tuple.0))
                    })?;
                    polygon.push(id);
                }
                triangulate_fan(&polygon, &mut indices)?;
            }
        }

        Ok(Mesh::new(vertices, indices)?)
    }
}

#[cfg(test)]
mod test {
    use super::ObjReader;
    use crate::io::{MeshLoadError, MeshReader};
    use crate::math::Point;

    const TETRAHEDRON: &str = "\
# a tetrahedron
o tetra
v 0 0 0
v 1 0 0
v 0 1 0
v 0 0 1
f 1 3 2
f 1 2 4
f 1 4 3
f 2 3 4
";

    #[test]
    fn read_tetrahedron() {
        let mesh = ObjReader.read(&mut TETRAHEDRON.as_bytes()).unwrap();
        assert_eq!(mesh.vertices().len(), 4);
        assert_eq!(mesh.num_triangles(), 4);
        assert_eq!(mesh.vertices()[3], Point::new(0.0, 0.0, 1.0));
        assert_eq!(mesh.indices()[0], [0, 2, 1]);
    }

    #[test]
    fn quads_are_triangulated() {
        let quad = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let mesh = ObjReader.read(&mut quad.as_bytes()).unwrap();
        assert_eq!(mesh.indices(), &[[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn faces_with_texture_and_normal_indices() {
        let data = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvn 0 0 1\nf 1/1/1 2/1/1 3/1/1\n";
        let mesh = ObjReader.read(&mut data.as_bytes()).unwrap();
        assert_eq!(mesh.indices(), &[[0, 1, 2]]);
    }

    #[test]
    fn vertices_without_faces_is_empty() {
        let data = "v 0 0 0\nv 1 0 0\nv 0 1 0\n";
        assert!(matches!(
            ObjReader.read(&mut data.as_bytes()),
            Err(MeshLoadError::EmptyMesh)
        ));
    }

    #[test]
    fn malformed_vertex_is_a_parse_error() {
        let data = "v 0 zero 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        assert!(matches!(
            ObjReader.read(&mut data.as_bytes()),
            Err(MeshLoadError::Parse(_))
        ));
    }
}
