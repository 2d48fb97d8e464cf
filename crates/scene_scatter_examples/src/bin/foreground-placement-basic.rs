use glam::{Quat, Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use scene_scatter::prelude::*;
use scene_scatter_examples::{init_tracing, render_scene_to_png, LoggingInstantiator, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let camera = CameraModel::from_location_rotation(
        Vec3::new(0.0, 0.0, 8.0),
        Quat::IDENTITY,
        Projection::from_focal_length(20.0, DEFAULT_SENSOR_WIDTH_MM, (1280, 720)),
    );
    let pool = AssetPool::from_paths(
        "humans",
        (0..3).map(|i| format!("assets/humans/human_{i}.blend")),
    );
    let plan = ScenePlan::new().with_layer(PlacementLayer::foreground_humans(pool));

    let mut host = LoggingInstantiator::new();
    let mut rng = StdRng::seed_from_u64(7);
    let outcome = run_scene_plan(&plan, &camera, &mut host, &mut rng)?;

    for p in &outcome.layers[0].population.placements {
        println!(
            "{:<10} at ({:6.2}, {:6.2}, {:5.2}) scale {:.2}",
            p.source_name, p.position.x, p.position.y, p.position.z, p.scale
        );
    }

    let config = RenderConfig::new((900, 700), Vec2::new(-4.5, -3.5), Vec2::new(4.5, 3.5));
    render_scene_to_png(
        &plan,
        &outcome,
        &camera.view(),
        &config,
        "foreground-placement-basic.png",
    )?;
    Ok(())
}
