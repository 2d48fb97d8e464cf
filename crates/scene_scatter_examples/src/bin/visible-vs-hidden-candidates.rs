use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use scene_scatter::prelude::*;
use scene_scatter_examples::{init_tracing, RenderConfig, TopDownCanvas};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let domain = Domain::new(9.0, 7.0, 4.0).with_base_height(2.0);
    // Tilted camera off to one side, so part of the volume falls outside the frame.
    let camera = CameraModel::looking_at(
        Vec3::new(-6.0, -4.0, 9.0),
        Vec3::new(0.0, 0.0, 2.0),
        Vec3::Z,
        Projection::from_focal_length(35.0, DEFAULT_SENSOR_WIDTH_MM, (1280, 720)),
    );

    let mut rng = StdRng::seed_from_u64(3);
    let sampled = sample_until_non_empty(
        &PoissonDiskSampling::new(0.6),
        &domain,
        8,
        &mut rng,
        &mut (),
    )?;
    let (visible, hidden) = partition_visible(&sampled.points, &camera);
    println!(
        "{} candidates: {} visible, {} hidden",
        sampled.points.len(),
        visible.len(),
        hidden.len()
    );

    let config = RenderConfig::new((900, 700), Vec2::new(-4.5, -3.5), Vec2::new(4.5, 3.5));
    let mut canvas = TopDownCanvas::new(config);
    canvas.shade_visible_plane(&camera.view(), domain.base_height);
    canvas.draw_domain(&domain, [60, 60, 60]);
    for p in &hidden {
        canvas.draw_cross(p.truncate(), [160, 160, 160]);
    }
    for p in &visible {
        canvas.draw_disc(p.truncate(), 3, [30, 150, 60]);
    }
    canvas.save("visible-vs-hidden-candidates.png")?;
    Ok(())
}
