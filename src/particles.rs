//! Particle attribute buffer generation.
//!
//! A [`ParticleSet`] holds the three parallel per-particle attribute arrays
//! consumed by the point shader:
//!
//! - `origin`: random rest position in the z = 0 plane,
//! - `target`: a point sampled from the mesh surface, scaled into scene space,
//! - `drift`: a small random vector decorrelating per-particle jitter.
//!
//! All three arrays always share the same length; index `i` in one array
//! refers to the same logical particle as index `i` in the others. The set
//! is rebuilt wholesale when the particle count changes, never patched in
//! place.

use glam::Vec3;
use rand::Rng;

use crate::sampler::SurfaceSampler;

/// Half-extent of the square the origin positions are drawn from.
pub const SPAWN_HALF_EXTENT: f32 = 5.0;
/// Half-extent of the cube the drift vectors are drawn from.
pub const DRIFT_HALF_EXTENT: f32 = 0.5;
/// Divisor applied to raw surface samples to fit the model in view.
pub const TARGET_SCALE: f32 = 5.0;
/// Vertical offset applied to scaled surface samples.
pub const TARGET_Y_OFFSET: f32 = -3.0;

/// The three parallel attribute arrays for one generation of particles.
pub struct ParticleSet {
    origins: Vec<Vec3>,
    targets: Vec<Vec3>,
    drifts: Vec<Vec3>,
}

impl ParticleSet {
    /// Build a fresh particle set.
    ///
    /// Draws `count` origins uniformly from `[-5, 5] x [-5, 5] x {0}`, one
    /// surface sample per particle (scaled by `1 / 5` and shifted down by 3
    /// on y), and `count` drift vectors from `[-0.5, 0.5]^3`. No GPU upload
    /// happens here; the caller owns that.
    pub fn build<S, R>(count: u32, sampler: &mut S, rng: &mut R) -> Self
    where
        S: SurfaceSampler + ?Sized,
        R: Rng + ?Sized,
    {
        let count = count as usize;
        let mut origins = Vec::with_capacity(count);
        let mut targets = Vec::with_capacity(count);
        let mut drifts = Vec::with_capacity(count);

        for _ in 0..count {
            origins.push(Vec3::new(
                rng.gen_range(-SPAWN_HALF_EXTENT..SPAWN_HALF_EXTENT),
                rng.gen_range(-SPAWN_HALF_EXTENT..SPAWN_HALF_EXTENT),
                0.0,
            ));

            let surface = sampler.sample();
            targets.push(surface / TARGET_SCALE + Vec3::new(0.0, TARGET_Y_OFFSET, 0.0));

            drifts.push(Vec3::new(
                rng.gen_range(-DRIFT_HALF_EXTENT..DRIFT_HALF_EXTENT),
                rng.gen_range(-DRIFT_HALF_EXTENT..DRIFT_HALF_EXTENT),
                rng.gen_range(-DRIFT_HALF_EXTENT..DRIFT_HALF_EXTENT),
            ));
        }

        Self {
            origins,
            targets,
            drifts,
        }
    }

    /// Number of particles in the set.
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    /// Whether the set holds no particles.
    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    /// Rest positions, one per particle.
    pub fn origins(&self) -> &[Vec3] {
        &self.origins
    }

    /// Morph targets on the mesh surface, one per particle.
    pub fn targets(&self) -> &[Vec3] {
        &self.targets
    }

    /// Jitter vectors, one per particle.
    pub fn drifts(&self) -> &[Vec3] {
        &self.drifts
    }
}
