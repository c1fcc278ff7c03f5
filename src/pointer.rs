//! Pointer projection onto the particle plane.
//!
//! Converts a 2D screen position into a 3D world point by unprojecting
//! through the camera and intersecting the resulting ray with the plane
//! `z = 0` the particle field lies in. Also computes the small parallax
//! nudge applied to the camera on every pointer move.

use glam::{Vec2, Vec3};

use crate::camera::Camera;

/// Scale factor for the camera parallax nudge.
pub const PARALLAX_FACTOR: f32 = 0.0001;

/// Convert screen pixels to normalized device coordinates.
///
/// Output range is [-1, 1] on both axes, with y flipped relative to the
/// screen-space convention (screen y grows downward).
pub fn screen_to_ndc(screen: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(
        2.0 * screen.x / viewport.x - 1.0,
        -(2.0 * screen.y / viewport.y - 1.0),
    )
}

/// Project a screen position onto the world plane `z = 0`.
///
/// Returns `None` when the pointer ray runs parallel to the plane (or the
/// intersection is otherwise non-finite); the caller keeps the previous
/// pointer position in that case.
pub fn project_to_plane(screen: Vec2, viewport: Vec2, camera: &Camera) -> Option<Vec3> {
    let ndc = screen_to_ndc(screen, viewport);

    // Unproject a point on the pointer ray; any NDC depth gives the same
    // ray once normalized through the camera position.
    let inverse = camera.view_proj_matrix().inverse();
    let through = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
    let direction = (through - camera.position).normalize();

    intersect_ground(camera.position, direction)
}

/// Intersect a ray with the plane `z = 0`.
///
/// Returns `None` for rays parallel to the plane instead of propagating a
/// non-finite point.
pub fn intersect_ground(origin: Vec3, direction: Vec3) -> Option<Vec3> {
    let distance = -origin.z / direction.z;
    if !distance.is_finite() {
        return None;
    }
    let hit = origin + direction * distance;
    hit.is_finite().then_some(hit)
}

/// Camera offset for the parallax effect.
///
/// Returns the new camera x/y. The axes are deliberately swapped (camera x
/// follows screen y and vice versa) to match the scene's rolled camera.
pub fn parallax_offset(screen: Vec2, viewport: Vec2) -> Vec2 {
    let center = viewport * 0.5;
    Vec2::new(
        (screen.y - center.y) * PARALLAX_FACTOR,
        (screen.x - center.x) * PARALLAX_FACTOR,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

    #[test]
    fn test_ndc_conversion_flips_y() {
        let ndc = screen_to_ndc(Vec2::new(0.0, 0.0), VIEWPORT);
        assert_eq!(ndc, Vec2::new(-1.0, 1.0));
        let ndc = screen_to_ndc(Vec2::new(1280.0, 720.0), VIEWPORT);
        assert_eq!(ndc, Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_viewport_center_hits_scene_origin() {
        let camera = Camera::new(VIEWPORT.x / VIEWPORT.y);
        let world = project_to_plane(VIEWPORT * 0.5, VIEWPORT, &camera).unwrap();
        assert!(world.length() < 1e-4, "expected origin, got {:?}", world);
    }

    #[test]
    fn test_off_center_pointer_lands_on_plane() {
        let camera = Camera::new(VIEWPORT.x / VIEWPORT.y);
        let world = project_to_plane(Vec2::new(200.0, 650.0), VIEWPORT, &camera).unwrap();
        assert!(world.z.abs() < 1e-4);
        assert!(world.x != 0.0 || world.y != 0.0);
    }

    #[test]
    fn test_parallel_ray_is_rejected() {
        // Ray running inside the z = 0 plane never yields a finite hit.
        assert_eq!(
            intersect_ground(Vec3::new(0.0, 0.0, 3.0), Vec3::new(1.0, 0.0, 0.0)),
            None
        );
        // Degenerate origin on the plane with zero z direction: 0/0.
        assert_eq!(
            intersect_ground(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0)),
            None
        );
    }

    #[test]
    fn test_parallax_swaps_axes() {
        let offset = parallax_offset(Vec2::new(740.0, 360.0), VIEWPORT);
        // 100 px right of center moves the camera on y only.
        assert_eq!(offset.x, 0.0);
        assert!((offset.y - 0.01).abs() < 1e-6);

        let offset = parallax_offset(Vec2::new(640.0, 160.0), VIEWPORT);
        // 200 px above center moves the camera on x only.
        assert!((offset.x + 0.02).abs() < 1e-6);
        assert_eq!(offset.y, 0.0);
    }
}
