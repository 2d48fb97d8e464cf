#![forbid(unsafe_code)]

mod host;
mod plan_file;
mod rendering;

pub use host::{InstanceRecord, LoggingInstantiator};
pub use plan_file::{
    load_scene_file, CameraDef, LayerDef, PoolDef, ProjectionDef, SceneFile, ScenePlanDef,
};
pub use rendering::{render_scene_to_png, RenderConfig, TopDownCanvas};

/// Installs a `fmt` subscriber filtered by `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
