//! Shapes supported by meshvox.

pub use self::mesh::{Mesh, MeshBuilderError};
pub use self::triangle::Triangle;

mod mesh;
mod triangle;
