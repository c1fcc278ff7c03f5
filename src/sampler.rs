//! Uniform surface sampling over a triangle mesh.
//!
//! [`MeshSampler`] draws random points from a mesh surface, weighted by
//! triangle area so the point density approximates a uniform coating of the
//! shape. The [`SurfaceSampler`] trait is the seam between the sampler and
//! the particle buffer builder; tests substitute a scripted implementation
//! to pin down exact draw sequences.

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::error::MeshError;
use crate::mesh::TriangleMesh;

/// Source of random points on a surface.
pub trait SurfaceSampler {
    /// Draw the next random surface point.
    fn sample(&mut self) -> Vec3;
}

/// Area-weighted random sampler over a [`TriangleMesh`].
pub struct MeshSampler {
    triangles: Vec<[Vec3; 3]>,
    /// Running total of triangle areas, parallel to `triangles`.
    cumulative_area: Vec<f32>,
    total_area: f32,
    rng: SmallRng,
}

impl MeshSampler {
    /// Build a sampler from a mesh, seeding the RNG from system entropy.
    pub fn build(mesh: &TriangleMesh) -> Result<Self, MeshError> {
        Self::with_rng(mesh, SmallRng::from_entropy())
    }

    /// Build a sampler with a caller-provided RNG for reproducible draws.
    pub fn with_rng(mesh: &TriangleMesh, rng: SmallRng) -> Result<Self, MeshError> {
        let triangles: Vec<[Vec3; 3]> = mesh.triangles().collect();
        if triangles.is_empty() {
            return Err(MeshError::Empty);
        }

        let mut cumulative_area = Vec::with_capacity(triangles.len());
        let mut total_area = 0.0;
        for [a, b, c] in &triangles {
            total_area += 0.5 * (*b - *a).cross(*c - *a).length();
            cumulative_area.push(total_area);
        }
        if total_area <= 0.0 {
            return Err(MeshError::ZeroArea);
        }

        Ok(Self {
            triangles,
            cumulative_area,
            total_area,
            rng,
        })
    }

    fn pick_triangle(&mut self) -> usize {
        let r = self.rng.gen_range(0.0..self.total_area);
        self.cumulative_area
            .partition_point(|&area| area <= r)
            .min(self.triangles.len() - 1)
    }
}

impl SurfaceSampler for MeshSampler {
    fn sample(&mut self) -> Vec3 {
        let picked = self.pick_triangle();
        let [a, b, c] = self.triangles[picked];

        // Uniform barycentric coordinates: fold the unit square onto the
        // triangle so the distribution stays uniform.
        let mut u: f32 = self.rng.gen();
        let mut v: f32 = self.rng.gen();
        if u + v > 1.0 {
            u = 1.0 - u;
            v = 1.0 - v;
        }

        a + (b - a) * u + (c - a) * v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(mesh: &TriangleMesh) -> MeshSampler {
        MeshSampler::with_rng(mesh, SmallRng::seed_from_u64(7)).unwrap()
    }

    #[test]
    fn test_samples_stay_on_triangle() {
        let mesh = TriangleMesh::new(
            vec![Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 2.0, 0.0)],
            vec![0, 1, 2],
        )
        .unwrap();
        let mut sampler = seeded(&mesh);

        for _ in 0..500 {
            let p = sampler.sample();
            // Inside the triangle x >= 0, y >= 0, x + y <= 2, on the z = 0 plane.
            assert_eq!(p.z, 0.0);
            assert!(p.x >= 0.0 && p.y >= 0.0);
            assert!(p.x + p.y <= 2.0 + 1e-5);
        }
    }

    #[test]
    fn test_area_weighting() {
        // Two disjoint triangles with a 1:4 area ratio.
        let mesh = TriangleMesh::new(
            vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(10.0, 0.0, 0.0),
                Vec3::new(12.0, 0.0, 0.0),
                Vec3::new(10.0, 4.0, 0.0),
            ],
            vec![0, 1, 2, 3, 4, 5],
        )
        .unwrap();
        let mut sampler = seeded(&mesh);

        let draws = 4000;
        let big = (0..draws).filter(|_| sampler.sample().x >= 5.0).count();
        let fraction = big as f32 / draws as f32;
        assert!(
            (fraction - 0.8).abs() < 0.05,
            "expected ~80% of samples on the large triangle, got {}",
            fraction
        );
    }

    #[test]
    fn test_rejects_zero_area_mesh() {
        // Three collinear points: a triangle with no surface.
        let mesh = TriangleMesh::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::new(2.0, 0.0, 0.0)],
            vec![0, 1, 2],
        )
        .unwrap();
        assert!(matches!(
            MeshSampler::build(&mesh),
            Err(MeshError::ZeroArea)
        ));
    }
}
