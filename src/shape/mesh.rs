use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};

/// Indicated an inconsistency while building a triangle mesh.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum MeshBuilderError {
    /// A mesh must contain at least one vertex.
    #[error("A mesh must contain at least one vertex.")]
    EmptyVertices,
    /// A mesh must contain at least one triangle.
    #[error("A mesh must contain at least one triangle.")]
    EmptyIndices,
    /// A triangle refers to a vertex that does not exist.
    #[error("the triangle {triangle} refers to the vertex {index} but the mesh only has {num_vertices} vertices.")]
    IndexOutOfBounds {
        /// The index of the faulty triangle.
        triangle: usize,
        /// The out-of-bounds vertex index.
        index: u32,
        /// The number of vertices of the mesh.
        num_vertices: usize,
    },
}

/// An indexed triangle mesh.
///
/// Every index of `indices` is guaranteed to be smaller than the number of vertices,
/// and neither buffer is empty.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    vertices: Vec<Point<Real>>,
    indices: Vec<[u32; 3]>,
}

impl Mesh {
    /// Creates a new triangle mesh from a vertex buffer and an index buffer.
    pub fn new(
        vertices: Vec<Point<Real>>,
        indices: Vec<[u32; 3]>,
    ) -> Result<Self, MeshBuilderError> {
        if vertices.is_empty() {
            return Err(MeshBuilderError::EmptyVertices);
        }

        if indices.is_empty() {
            return Err(MeshBuilderError::EmptyIndices);
        }

        let num_vertices = vertices.len();
        for (triangle, idx) in indices.iter().enumerate() {
            if let Some(index) = idx.iter().find(|i| **i as usize >= num_vertices) {
                return Err(MeshBuilderError::IndexOutOfBounds {
                    triangle,
                    index: *index,
                    num_vertices,
                });
            }
        }

        Ok(Self { vertices, indices })
    }

    /// The vertex buffer of this mesh.
    #[inline]
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// The index buffer of this mesh.
    #[inline]
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }

    /// The number of triangles of this mesh.
    #[inline]
    pub fn num_triangles(&self) -> usize {
        self.indices.len()
    }

    /// The AABB of the vertices of this mesh.
    ///
    /// Vertices not referenced by any triangle are included.
    pub fn local_aabb(&self) -> Aabb {
        Aabb::from_points(&self.vertices)
    }

    /// Applies `f` to every vertex of this mesh, keeping its topology.
    pub fn map_vertices(mut self, f: impl Fn(Point<Real>) -> Point<Real>) -> Self {
        self.vertices.iter_mut().for_each(|v| *v = f(*v));
        self
    }
}
