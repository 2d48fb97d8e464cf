#![allow(dead_code)]

use std::time::Duration;

use criterion::{Criterion, Throughput};
use glam::{Quat, Vec3};
use scene_scatter::prelude::{CameraModel, Projection};

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// Camera eight units above the origin looking straight down, wide enough for a 9x7 volume.
pub fn overhead_camera() -> CameraModel {
    let fov = 2.0 * 2.5f32.atan();
    CameraModel::from_location_rotation(
        Vec3::new(0.0, 0.0, 8.0),
        Quat::IDENTITY,
        Projection::perspective(fov, fov),
    )
}

/// `n` candidates spread on a plane below [`overhead_camera`].
pub fn plane_candidates(n: usize) -> Vec<Vec3> {
    let side = (n as f32).sqrt().ceil().max(1.0) as usize;
    (0..n)
        .map(|i| {
            let x = (i % side) as f32 / side as f32 * 8.0 - 4.0;
            let y = (i / side) as f32 / side as f32 * 6.0 - 3.0;
            Vec3::new(x, y, 2.0)
        })
        .collect()
}
