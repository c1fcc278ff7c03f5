//! Global animation uniforms.
//!
//! [`AnimationUniforms`] is the small host-side record mutated once per
//! frame (elapsed time) and once per pointer-move event (pointer position).
//! [`RawUniforms`] is its GPU mirror, padded to match the WGSL uniform
//! struct layout, and additionally carries the view-projection matrix and
//! viewport size needed by the quad-billboard vertex stage.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

/// Far-off-screen pointer position used until the first pointer movement,
/// so the repulsion term never fires on an untouched scene.
pub const POINTER_SENTINEL: Vec3 = Vec3::new(-999.0, -999.0, 0.0);

/// Host-side animation state fed to the shader each draw call.
#[derive(Debug, Clone, Copy)]
pub struct AnimationUniforms {
    /// Monotonically increasing elapsed time in seconds.
    pub elapsed_time: f32,
    /// Point radius in physical pixels (already display-density scaled).
    pub point_size: f32,
    /// Pointer position projected onto the z = 0 world plane.
    pub pointer_world: Vec3,
}

impl AnimationUniforms {
    /// Fresh uniforms with the pointer parked off-screen.
    pub fn new(point_size: f32) -> Self {
        Self {
            elapsed_time: 0.0,
            point_size,
            pointer_world: POINTER_SENTINEL,
        }
    }

    /// Pack into the GPU layout together with the per-frame camera state.
    pub fn to_raw(&self, view_proj: Mat4, viewport: Vec2) -> RawUniforms {
        RawUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            pointer_world: self.pointer_world.to_array(),
            time: self.elapsed_time,
            point_size: self.point_size,
            _pad: 0.0,
            viewport: viewport.to_array(),
        }
    }
}

impl Default for AnimationUniforms {
    fn default() -> Self {
        Self::new(5.0)
    }
}

/// GPU-side uniform block. Field order and padding mirror the WGSL struct.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RawUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub pointer_world: [f32; 3],
    pub time: f32,
    pub point_size: f32,
    _pad: f32,
    pub viewport: [f32; 2],
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem;

    #[test]
    fn test_layout_matches_wgsl() {
        // WGSL: mat4x4 at 0, vec3 at 64, f32 at 76, f32 at 80, vec2 at 88,
        // struct size rounded up to 96.
        assert_eq!(mem::size_of::<RawUniforms>(), 96);
        assert_eq!(mem::offset_of!(RawUniforms, pointer_world), 64);
        assert_eq!(mem::offset_of!(RawUniforms, time), 76);
        assert_eq!(mem::offset_of!(RawUniforms, point_size), 80);
        assert_eq!(mem::offset_of!(RawUniforms, viewport), 88);
    }

    #[test]
    fn test_sentinel_until_first_pointer_move() {
        let u = AnimationUniforms::new(5.0);
        assert_eq!(u.pointer_world, POINTER_SENTINEL);

        let raw = u.to_raw(Mat4::IDENTITY, Vec2::new(1280.0, 720.0));
        assert_eq!(raw.pointer_world, [-999.0, -999.0, 0.0]);
        assert_eq!(raw.time, 0.0);
        assert_eq!(raw.point_size, 5.0);
    }
}
