//! End-to-end regeneration scenario through the public API: a real mesh
//! sampler feeding the particle system, with resource accounting on the
//! renderable handles.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use pointmorph::prelude::*;

/// Stand-in for a GPU handle that tracks how often it was released.
struct FakeHandle {
    floats_per_array: usize,
    disposed: Arc<AtomicU32>,
}

impl Dispose for FakeHandle {
    fn dispose(&mut self) {
        self.disposed.fetch_add(1, Ordering::SeqCst);
    }
}

fn blade_like_mesh() -> TriangleMesh {
    TriangleMesh::new(
        vec![
            Vec3::new(0.0, 20.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ],
        vec![0, 1, 2, 0, 2, 3, 0, 3, 1],
    )
    .unwrap()
}

#[test]
fn regeneration_resizes_buffers_and_disposes_once() {
    let mut system = ParticleSystem::new();
    system.make_ready(MeshSampler::build(&blade_like_mesh()).unwrap());

    let disposed = Arc::new(AtomicU32::new(0));

    // First generation: count=100_000 means 300_000 floats per array.
    let d = disposed.clone();
    system
        .regenerate(100_000, |set| {
            let floats: &[f32] = pointmorph::bytemuck::cast_slice(set.origins());
            assert_eq!(floats.len(), 300_000);
            assert_eq!(
                pointmorph::bytemuck::cast_slice::<Vec3, f32>(set.targets()).len(),
                300_000
            );
            assert_eq!(
                pointmorph::bytemuck::cast_slice::<Vec3, f32>(set.drifts()).len(),
                300_000
            );
            FakeHandle {
                floats_per_array: floats.len(),
                disposed: d.clone(),
            }
        })
        .unwrap();
    assert_eq!(disposed.load(Ordering::SeqCst), 0);
    assert_eq!(system.handle().unwrap().floats_per_array, 300_000);

    // Second generation doubles the count; the first handle must be gone
    // exactly once before the new one exists.
    let d = disposed.clone();
    system
        .regenerate(200_000, |set| {
            assert_eq!(d.load(Ordering::SeqCst), 1);
            FakeHandle {
                floats_per_array: pointmorph::bytemuck::cast_slice::<Vec3, f32>(set.origins())
                    .len(),
                disposed: d.clone(),
            }
        })
        .unwrap();
    assert_eq!(disposed.load(Ordering::SeqCst), 1);
    assert_eq!(system.handle().unwrap().floats_per_array, 600_000);

    // Teardown disposes the live generation.
    drop(system);
    assert_eq!(disposed.load(Ordering::SeqCst), 2);
}

#[test]
fn targets_land_in_scaled_scene_space() {
    let mesh = blade_like_mesh();
    let mut system = ParticleSystem::new();
    system.make_ready(MeshSampler::build(&mesh).unwrap());

    system
        .regenerate(5_000, |set| {
            // Raw mesh spans y in [0, 20]; after the fixed 1/5 scale and
            // -3 y offset, targets must span y in [-3, 1].
            for t in set.targets() {
                assert!(t.y >= -3.0 - 1e-4 && t.y <= 1.0 + 1e-4, "target {:?}", t);
                assert!(t.x.abs() <= 0.2 + 1e-4);
            }
            DropHandle
        })
        .unwrap();
}

struct DropHandle;

impl Dispose for DropHandle {
    fn dispose(&mut self) {}
}
