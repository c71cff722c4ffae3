//! Mesh file loaders.
//!
//! A [`Mesh`] can be read from a Wavefront `.obj` file or from a Stanford `.ply` file
//! (ASCII or binary). The format is detected from the file extension.

pub use self::ply::PlyReader;
pub use self::wavefront::ObjReader;

use crate::shape::{Mesh, MeshBuilderError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

mod ply;
mod wavefront;

/// Error raised while loading a mesh.
#[derive(thiserror::Error, Debug)]
pub enum MeshLoadError {
    /// The file extension does not match any supported mesh format.
    #[error("unsupported mesh format `{0}`: expected a `.obj` or a `.ply` file")]
    UnsupportedFormat(String),
    /// The file content is malformed.
    #[error("malformed mesh file: {0}")]
    Parse(String),
    /// The file contains no vertex or no triangle.
    #[error("the mesh has no vertices or no triangles")]
    EmptyMesh,
    /// The file could not be read.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<MeshBuilderError> for MeshLoadError {
    fn from(err: MeshBuilderError) -> Self {
        match err {
            MeshBuilderError::EmptyVertices | MeshBuilderError::EmptyIndices => {
                MeshLoadError::EmptyMesh
            }
            MeshBuilderError::IndexOutOfBounds { .. } => MeshLoadError::Parse(err.to_string()),
        }
    }
}

/// A decoder turning the content of a mesh file into a [`Mesh`].
pub trait MeshReader {
    /// Reads a whole mesh from `input`.
    fn read(&self, input: &mut dyn BufRead) -> Result<Mesh, MeshLoadError>;
}

/// The mesh file formats supported by [`load_mesh`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// Wavefront `.obj`.
    Obj,
    /// Stanford polygon file `.ply`.
    Ply,
}

impl MeshFormat {
    /// Detects the format of a mesh file from its extension, ignoring case.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MeshLoadError> {
        let ext = path
            .as_ref()
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "obj" => Ok(MeshFormat::Obj),
            "ply" => Ok(MeshFormat::Ply),
            _ => Err(MeshLoadError::UnsupportedFormat(ext)),
        }
    }

    /// The reader decoding this format.
    pub fn reader(self) -> Box<dyn MeshReader> {
        match self {
            MeshFormat::Obj => Box::new(ObjReader),
            MeshFormat::Ply => Box::new(PlyReader),
        }
    }
}

/// Loads the mesh stored at `path`.
pub fn load_mesh(path: impl AsRef<Path>) -> Result<Mesh, MeshLoadError> {
    let path = path.as_ref();
    let format = MeshFormat::from_path(path)?;
    let mut input = BufReader::new(File::open(path)?);
    let mesh = format.reader().read(&mut input)?;

    log::info!(
        "loaded {} vertices and {} triangles from {}",
        mesh.vertices().len(),
        mesh.num_triangles(),
        path.display()
    );

    Ok(mesh)
}

/// Splits a polygon into a fan of triangles sharing its first vertex.
pub(crate) fn triangulate_fan(
    polygon: &[u32],
    out: &mut Vec<[u32; 3]>,
) -> Result<(), MeshLoadError> {
    if polygon.len() < 3 {
        return Err(MeshLoadError::Parse(format!(
            "found a face with {} vertices, at least 3 are needed",
            polygon.len()
        )));
    }

    out.extend(polygon[1..].windows(2).map(|w| [polygon[0], w[0], w[1]]));
    Ok(())
}

#[cfg(test)]
mod test {
    use super::{load_mesh, triangulate_fan, MeshFormat, MeshLoadError};

    #[test]
    fn format_detection_ignores_case() {
        assert_eq!(MeshFormat::from_path("a/b/bunny.obj").unwrap(), MeshFormat::Obj);
        assert_eq!(MeshFormat::from_path("BUNNY.PLY").unwrap(), MeshFormat::Ply);
        assert_eq!(MeshFormat::from_path("scan.Ply").unwrap(), MeshFormat::Ply);
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(matches!(
            MeshFormat::from_path("mesh.stl"),
            Err(MeshLoadError::UnsupportedFormat(ext)) if ext == "stl"
        ));
        assert!(matches!(
            MeshFormat::from_path("mesh"),
            Err(MeshLoadError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = std::env::temp_dir().join("meshvox-this-file-does-not-exist.obj");
        assert!(matches!(load_mesh(path), Err(MeshLoadError::Io(_))));
    }

    #[test]
    fn fan_triangulation() {
        let mut out = Vec::new();
        triangulate_fan(&[4, 5, 6, 7, 8], &mut out).unwrap();
        assert_eq!(out, vec![[4, 5, 6], [4, 6, 7], [4, 7, 8]]);

        assert!(matches!(
            triangulate_fan(&[0, 1], &mut out),
            Err(MeshLoadError::Parse(_))
        ));
    }
}
