//! Particle system ownership and lifecycle.
//!
//! [`ParticleSystem`] is the single owner of the current renderable handle
//! and the surface sampler. It starts `Unready` (no sampler, nothing to
//! draw); the mesh-load completion installs the sampler and moves it to
//! `Ready`, the only state in which generation is callable. Regeneration is
//! one type-checked transition: the previous handle is taken out of the
//! owner and disposed before the new one is created, so two live
//! generations can never overlap.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::error::RegenError;
use crate::particles::ParticleSet;
use crate::sampler::SurfaceSampler;

/// GPU-side resources that must be released before being discarded.
pub trait Dispose {
    /// Release the resources behind this handle.
    fn dispose(&mut self);
}

/// Readiness of the particle system.
enum LoadState<S> {
    /// Mesh not loaded yet (or load failed); generation is not callable.
    Unready,
    /// Surface sampler installed; generation is allowed.
    Ready(S),
}

/// Owner of the current particle generation.
pub struct ParticleSystem<S, H: Dispose> {
    state: LoadState<S>,
    handle: Option<H>,
    rng: SmallRng,
}

impl<S: SurfaceSampler, H: Dispose> ParticleSystem<S, H> {
    /// Create a system in the `Unready` state.
    pub fn new() -> Self {
        Self {
            state: LoadState::Unready,
            handle: None,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Install the surface sampler, moving the system to `Ready`.
    pub fn make_ready(&mut self, sampler: S) {
        self.state = LoadState::Ready(sampler);
    }

    /// Whether a surface sampler is installed.
    pub fn is_ready(&self) -> bool {
        matches!(self.state, LoadState::Ready(_))
    }

    /// The current renderable handle, if a generation exists.
    pub fn handle(&self) -> Option<&H> {
        self.handle.as_ref()
    }

    /// Rebuild the particle set and swap in a new renderable handle.
    ///
    /// The previous handle is disposed before `create` runs, making the
    /// dispose-then-create sequencing structural rather than a call-site
    /// convention.
    pub fn regenerate<F>(&mut self, count: u32, create: F) -> Result<u32, RegenError>
    where
        F: FnOnce(&ParticleSet) -> H,
    {
        if count == 0 {
            return Err(RegenError::ZeroCount);
        }
        let LoadState::Ready(sampler) = &mut self.state else {
            return Err(RegenError::NotReady);
        };

        if let Some(mut old) = self.handle.take() {
            old.dispose();
        }

        let set = ParticleSet::build(count, sampler, &mut self.rng);
        self.handle = Some(create(&set));
        Ok(count)
    }

    /// Dispose the current handle, leaving the system empty but ready.
    pub fn clear(&mut self) {
        if let Some(mut old) = self.handle.take() {
            old.dispose();
        }
    }
}

impl<S: SurfaceSampler, H: Dispose> Default for ParticleSystem<S, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, H: Dispose> Drop for ParticleSystem<S, H> {
    fn drop(&mut self) {
        if let Some(mut old) = self.handle.take() {
            old.dispose();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::cell::Cell;
    use std::rc::Rc;

    struct ConstSampler(Vec3);

    impl SurfaceSampler for ConstSampler {
        fn sample(&mut self) -> Vec3 {
            self.0
        }
    }

    /// Handle that records how many times it has been disposed.
    struct CountingHandle {
        len: usize,
        disposed: Rc<Cell<u32>>,
    }

    impl Dispose for CountingHandle {
        fn dispose(&mut self) {
            self.disposed.set(self.disposed.get() + 1);
        }
    }

    fn ready_system() -> ParticleSystem<ConstSampler, CountingHandle> {
        let mut system = ParticleSystem::new();
        system.make_ready(ConstSampler(Vec3::ONE));
        system
    }

    #[test]
    fn test_unready_system_rejects_generation() {
        let mut system: ParticleSystem<ConstSampler, CountingHandle> = ParticleSystem::new();
        assert!(!system.is_ready());
        let result = system.regenerate(100, |_| unreachable!("must not build while unready"));
        assert_eq!(result, Err(RegenError::NotReady));
        assert!(system.handle().is_none());
    }

    #[test]
    fn test_zero_count_is_rejected() {
        let mut system = ready_system();
        let result = system.regenerate(0, |_| unreachable!("must not build an empty set"));
        assert_eq!(result, Err(RegenError::ZeroCount));
    }

    #[test]
    fn test_regeneration_disposes_previous_handle_exactly_once() {
        let mut system = ready_system();
        let disposed = Rc::new(Cell::new(0));

        let d = disposed.clone();
        system
            .regenerate(100_000, |set| CountingHandle {
                len: set.len(),
                disposed: d.clone(),
            })
            .unwrap();
        assert_eq!(disposed.get(), 0);
        assert_eq!(system.handle().unwrap().len, 100_000);

        let d = disposed.clone();
        system
            .regenerate(200_000, |set| {
                // The old handle must already be gone when the new one is built.
                assert_eq!(d.get(), 1);
                CountingHandle {
                    len: set.len(),
                    disposed: d.clone(),
                }
            })
            .unwrap();
        assert_eq!(disposed.get(), 1);
        assert_eq!(system.handle().unwrap().len, 200_000);
    }

    #[test]
    fn test_drop_disposes_live_handle() {
        let disposed = Rc::new(Cell::new(0));
        {
            let mut system = ready_system();
            let d = disposed.clone();
            system
                .regenerate(10, |set| CountingHandle {
                    len: set.len(),
                    disposed: d.clone(),
                })
                .unwrap();
        }
        assert_eq!(disposed.get(), 1);
    }

    #[test]
    fn test_clear_leaves_system_ready() {
        let disposed = Rc::new(Cell::new(0));
        let mut system = ready_system();
        let d = disposed.clone();
        system
            .regenerate(10, |set| CountingHandle {
                len: set.len(),
                disposed: d.clone(),
            })
            .unwrap();

        system.clear();
        assert_eq!(disposed.get(), 1);
        assert!(system.handle().is_none());
        assert!(system.is_ready());
    }
}
