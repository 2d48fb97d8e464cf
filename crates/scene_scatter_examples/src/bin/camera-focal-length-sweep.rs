use glam::{Quat, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use scene_scatter::prelude::*;
use scene_scatter_examples::init_tracing;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let request = PlacementRequest::new(
        Domain::new(9.0, 7.0, 4.0).with_base_height(2.0),
        1.5,
        CountRange::new(1, 6),
    );
    let runner = PlacementRunner::try_new(request)?;

    println!("focal_mm  sampled  visible  placed");
    for focal_mm in [14.0, 20.0, 35.0, 50.0, 85.0] {
        let camera = CameraModel::from_location_rotation(
            Vec3::new(0.0, 0.0, 8.0),
            Quat::IDENTITY,
            Projection::from_focal_length(focal_mm, DEFAULT_SENSOR_WIDTH_MM, (1280, 720)),
        );
        let mut rng = StdRng::seed_from_u64(11);

        match runner.run(&camera, &mut rng) {
            Ok(result) => println!(
                "{:>8}  {:>7}  {:>7}  {:>6}",
                focal_mm,
                result.stats.sampled_candidates,
                result.visible_candidates(),
                result.chosen.len()
            ),
            Err(Error::CapacityExceeded {
                requested,
                available,
                ..
            }) => println!(
                "{:>8}  requested {} but only {} visible",
                focal_mm, requested, available
            ),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}
