use std::path::Path;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scene_scatter::prelude::*;
use scene_scatter_examples::{
    init_tracing, load_scene_file, render_scene_to_png, LoggingInstantiator, RenderConfig,
};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let root = Path::new(env!("CARGO_MANIFEST_DIR"));
    let scene = load_scene_file(root.join("assets/scene-plan.ron"))?;
    let plan = scene.plan.to_plan(root)?;
    let camera = CameraModel::from(&scene.camera);

    let mut host = LoggingInstantiator::new();
    let mut rng = StdRng::seed_from_u64(scene.seed);
    let report = FnSink::new(|event: PlacementEvent| {
        if let PlacementEvent::LayerFinished { id, placed, .. } = event {
            println!("layer '{id}' placed {placed} instances");
        }
    });
    let mut sink = MultiSink::new(TracingSink, report);
    let outcome = run_scene_plan_with_events(&plan, &camera, &mut host, &mut rng, &mut sink)?;
    println!(
        "{} instances total, {} recorded by the host",
        outcome.placed(),
        host.placed().count()
    );

    let config = RenderConfig::new((900, 700), Vec2::new(-4.5, -3.5), Vec2::new(4.5, 3.5));
    render_scene_to_png(
        &plan,
        &outcome,
        &camera.view(),
        &config,
        "scene-plan-from-ron.png",
    )?;
    Ok(())
}
