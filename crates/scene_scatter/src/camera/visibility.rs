//! Frustum test reducing world-space candidates to those a camera can see.
use glam::Vec3;
use tracing::debug;

use crate::camera::CameraModel;

/// Strict frustum predicate on projected coordinates.
///
/// Points exactly on the frame border or on either clip plane are outside.
#[inline]
pub fn is_in_view(ndc: Vec3, clip_start: f32, clip_end: f32) -> bool {
    0.0 < ndc.x && ndc.x < 1.0 && 0.0 < ndc.y && ndc.y < 1.0 && clip_start < ndc.z && ndc.z < clip_end
}

/// Returns the points visible to `camera`, preserving input order.
///
/// The camera's world transform is rebuilt before the first point is projected.
pub fn filter_visible(points: &[Vec3], camera: &CameraModel) -> Vec<Vec3> {
    let view = camera.view();
    let visible: Vec<Vec3> = points.iter().copied().filter(|p| view.sees(*p)).collect();
    debug!(
        "Visibility: {} of {} candidates inside the frustum.",
        visible.len(),
        points.len()
    );
    visible
}

/// Splits points into `(visible, hidden)`, both in input order.
pub fn partition_visible(points: &[Vec3], camera: &CameraModel) -> (Vec<Vec3>, Vec<Vec3>) {
    let view = camera.view();
    points.iter().copied().partition(|p| view.sees(*p))
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use glam::Quat;
    use rand::rngs::StdRng;
    use rand::{Rng as RngCore, SeedableRng};

    use super::*;
    use crate::camera::Projection;
    use crate::sampling::rand01;

    fn top_down_camera() -> CameraModel {
        CameraModel::from_location_rotation(
            Vec3::new(0.0, 0.0, 8.0),
            Quat::IDENTITY,
            Projection::perspective(FRAC_PI_2, FRAC_PI_2),
        )
        .with_clip(0.5, 6.0)
    }

    #[test]
    fn predicate_is_strict_on_every_bound() {
        assert!(is_in_view(Vec3::new(0.5, 0.5, 1.0), 0.1, 10.0));
        assert!(!is_in_view(Vec3::new(0.0, 0.5, 1.0), 0.1, 10.0));
        assert!(!is_in_view(Vec3::new(1.0, 0.5, 1.0), 0.1, 10.0));
        assert!(!is_in_view(Vec3::new(0.5, 0.0, 1.0), 0.1, 10.0));
        assert!(!is_in_view(Vec3::new(0.5, 1.0, 1.0), 0.1, 10.0));
        assert!(!is_in_view(Vec3::new(0.5, 0.5, 0.1), 0.1, 10.0));
        assert!(!is_in_view(Vec3::new(0.5, 0.5, 10.0), 0.1, 10.0));
        assert!(!is_in_view(Vec3::new(f32::NAN, 0.5, 1.0), 0.1, 10.0));
    }

    #[test]
    fn keeps_order_and_drops_outside_points() {
        let camera = top_down_camera();
        let points = vec![
            Vec3::new(0.0, 0.0, 4.0),  // visible, depth 4
            Vec3::new(0.0, 0.0, 1.0),  // beyond far clip (depth 7)
            Vec3::new(1.0, -1.0, 3.0), // visible
            Vec3::new(9.0, 0.0, 4.0),  // outside frame
            Vec3::new(0.0, 0.0, 9.0),  // behind camera
            Vec3::new(-2.0, 2.0, 5.0), // visible
        ];
        let visible = filter_visible(&points, &camera);
        assert_eq!(visible, vec![points[0], points[2], points[5]]);
    }

    #[test]
    fn empty_input_and_fully_hidden_input_yield_empty_output() {
        let camera = top_down_camera();
        assert!(filter_visible(&[], &camera).is_empty());
        assert!(filter_visible(&[Vec3::new(0.0, 0.0, 20.0)], &camera).is_empty());
    }

    #[test]
    fn uses_current_basis_after_camera_moves() {
        let mut camera = top_down_camera();
        let point = Vec3::new(20.0, 0.0, 4.0);
        assert!(filter_visible(&[point], &camera).is_empty());

        camera.basis = glam::Affine3A::from_translation(Vec3::new(20.0, 0.0, 8.0));
        assert_eq!(filter_visible(&[point], &camera), vec![point]);
    }

    #[test]
    fn visible_and_hidden_sets_are_sound_and_complete() {
        let camera = top_down_camera();
        let mut rng = StdRng::seed_from_u64(99);
        let points: Vec<Vec3> = (0..2_000)
            .map(|_| {
                let rng: &mut dyn RngCore = &mut rng;
                Vec3::new(
                    rand01(rng) * 24.0 - 12.0,
                    rand01(rng) * 24.0 - 12.0,
                    rand01(rng) * 12.0,
                )
            })
            .collect();

        let (visible, hidden) = partition_visible(&points, &camera);
        assert_eq!(visible.len() + hidden.len(), points.len());
        assert!(!visible.is_empty());
        assert!(!hidden.is_empty());

        for p in &visible {
            let ndc = camera.world_to_camera_view(*p);
            assert!(ndc.x > 0.0 && ndc.x < 1.0);
            assert!(ndc.y > 0.0 && ndc.y < 1.0);
            assert!(ndc.z > camera.clip_start && ndc.z < camera.clip_end);
        }
        for p in &hidden {
            let ndc = camera.world_to_camera_view(*p);
            assert!(
                !is_in_view(ndc, camera.clip_start, camera.clip_end),
                "{p:?} -> {ndc:?}"
            );
        }
        assert_eq!(filter_visible(&points, &camera), visible);
    }
}
