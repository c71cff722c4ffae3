use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, DEFAULT_EPSILON};
use crate::shape::Mesh;

/// Error raised while rescaling a mesh into the unit cube.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum NormalizeError {
    /// All the vertices of the mesh coincide, so it has no extent to rescale.
    #[error("the mesh is degenerate: all its vertices coincide")]
    DegenerateMesh,
    /// A vertex has a NaN or infinite coordinate.
    #[error("the vertex {0} has a non-finite coordinate")]
    NonFiniteVertex(usize),
    /// The padding must be finite and non-negative.
    #[error("invalid padding {0}: it must be finite and non-negative")]
    InvalidPadding(Real),
}

/// A mesh rescaled uniformly so that all its vertices lie in the unit cube `[0, 1]³`.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedMesh {
    /// The rescaled mesh.
    pub mesh: Mesh,
    /// The minimum of the bounding box of the original mesh.
    pub origin: Point<Real>,
    /// The uniform scale factor that was applied after translating by `-origin`.
    pub scale: Real,
}

impl NormalizedMesh {
    /// Maps a point from the normalized frame back to the frame of the original mesh.
    #[inline]
    pub fn to_original(&self, pt: &Point<Real>) -> Point<Real> {
        self.origin + pt.coords / self.scale
    }
}

/// Rescales `mesh` uniformly into the unit cube.
///
/// The mesh bounding box is moved to the origin and its largest extent, enlarged
/// by the relative `padding`, is mapped to `1`. The aspect ratio is preserved. With a
/// positive padding, every normalized coordinate lies in `[0, 1 / (1 + padding)]`.
pub fn normalize(mesh: Mesh, padding: Real) -> Result<NormalizedMesh, NormalizeError> {
    if !padding.is_finite() || padding < 0.0 {
        return Err(NormalizeError::InvalidPadding(padding));
    }

    if let Some(id) = mesh
        .vertices()
        .iter()
        .position(|v| v.iter().any(|e| !e.is_finite()))
    {
        return Err(NormalizeError::NonFiniteVertex(id));
    }

    let aabb: Aabb = mesh.local_aabb();
    let max_extent = aabb.max_extent();

    if !max_extent.is_finite() || max_extent <= DEFAULT_EPSILON {
        return Err(NormalizeError::DegenerateMesh);
    }

    let extent = max_extent * (1.0 + padding);
    let origin = aabb.mins;
    // Divide instead of multiplying by the inverse so the largest coordinate can't exceed 1.
    let mesh = mesh.map_vertices(|v| Point::from((v - origin) / extent));

    log::info!(
        "normalized mesh: origin {:?}, extent {}, padding {}",
        origin.coords.as_slice(),
        max_extent,
        padding
    );

    Ok(NormalizedMesh {
        mesh,
        origin,
        scale: 1.0 / extent,
    })
}
