//! Fixed perspective camera for the particle scene.

use glam::{Mat4, Vec3};
use std::f32::consts::FRAC_PI_2;

/// Perspective camera looking down -Z with a fixed roll.
pub struct Camera {
    /// World position; x/y are nudged by pointer parallax.
    pub position: Vec3,
    /// Rotation around the view axis in radians.
    pub roll: f32,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Viewport width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    /// Scene camera: 3 units in front of the particle plane, rolled 90°.
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            roll: -FRAC_PI_2,
            fov_y: 75.0_f32.to_radians(),
            aspect,
            near: 0.1,
            far: 100.0,
        }
    }

    /// Update the aspect ratio after a viewport resize.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Up vector: world +Y rotated by the roll angle around the view axis.
    pub fn up(&self) -> Vec3 {
        Vec3::new(-self.roll.sin(), self.roll.cos(), 0.0)
    }

    /// View matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + Vec3::NEG_Z, self.up())
    }

    /// Projection matrix for rendering.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    /// Combined view-projection matrix.
    pub fn view_proj_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_turns_up_vector() {
        let camera = Camera::new(16.0 / 9.0);
        // -90° roll maps +Y up onto +X.
        let up = camera.up();
        assert!((up.x - 1.0).abs() < 1e-6);
        assert!(up.y.abs() < 1e-6);
    }

    #[test]
    fn test_scene_center_projects_to_ndc_origin() {
        let camera = Camera::new(16.0 / 9.0);
        let clip = camera.view_proj_matrix() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((clip.x / clip.w).abs() < 1e-6);
        assert!((clip.y / clip.w).abs() < 1e-6);
    }

    #[test]
    fn test_set_aspect_ignores_degenerate_values() {
        let mut camera = Camera::new(2.0);
        camera.set_aspect(0.0);
        camera.set_aspect(f32::NAN);
        assert_eq!(camera.aspect, 2.0);
    }
}
