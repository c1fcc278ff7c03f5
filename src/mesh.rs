//! Indexed triangle mesh consumed by the surface sampler.
//!
//! Mesh file parsing is out of scope; a [`TriangleMesh`] is built from
//! already-loaded vertex and index data and validated once at construction
//! so downstream code can index triangles without bounds checks failing.

use glam::Vec3;

use crate::error::MeshError;

/// An indexed triangle mesh.
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    positions: Vec<Vec3>,
    indices: Vec<u32>,
}

impl TriangleMesh {
    /// Create a mesh from vertex positions and triangle indices.
    ///
    /// The index buffer must describe at least one triangle, contain a
    /// multiple of three entries, and reference only existing vertices.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Result<Self, MeshError> {
        if indices.is_empty() {
            return Err(MeshError::Empty);
        }
        if indices.len() % 3 != 0 {
            return Err(MeshError::RaggedIndices(indices.len()));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= positions.len()) {
            return Err(MeshError::IndexOutOfRange {
                index: bad,
                vertex_count: positions.len(),
            });
        }
        Ok(Self { positions, indices })
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Corner positions of triangle `i`.
    pub fn triangle(&self, i: usize) -> [Vec3; 3] {
        let base = i * 3;
        [
            self.positions[self.indices[base] as usize],
            self.positions[self.indices[base + 1] as usize],
            self.positions[self.indices[base + 2] as usize],
        ]
    }

    /// Iterate over all triangles.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        (0..self.triangle_count()).map(|i| self.triangle(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> TriangleMesh {
        TriangleMesh::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            vec![0, 1, 2, 0, 2, 3],
        )
        .unwrap()
    }

    #[test]
    fn test_triangle_access() {
        let mesh = quad();
        assert_eq!(mesh.triangle_count(), 2);
        let tri = mesh.triangle(1);
        assert_eq!(tri[0], Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(tri[2], Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(
            TriangleMesh::new(vec![], vec![]),
            Err(MeshError::Empty)
        ));
    }

    #[test]
    fn test_rejects_ragged_indices() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        assert!(matches!(
            TriangleMesh::new(positions, vec![0, 1]),
            Err(MeshError::RaggedIndices(2))
        ));
    }

    #[test]
    fn test_rejects_out_of_range_index() {
        let positions = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        assert!(matches!(
            TriangleMesh::new(positions, vec![0, 1, 7]),
            Err(MeshError::IndexOutOfRange { index: 7, .. })
        ));
    }
}
