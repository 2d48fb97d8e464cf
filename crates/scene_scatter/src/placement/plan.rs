//! Planning module for populating a scene with several placement layers.
//!
//! A scene typically holds more than one asset group (people, occluders,
//! background props), each with its own volume, spacing and count range.
//! [`run_scene_plan`] places them one after another with a shared RNG and aborts
//! the whole scene on the first failing layer.
use rand::Rng as RngCore;
use tracing::info;

use crate::camera::CameraModel;
use crate::domain::Domain;
use crate::error::Result;
use crate::placement::assets::{AssetInstantiator, AssetPool};
use crate::placement::events::{EventSink, PlacementEvent};
use crate::placement::runner::{populate_with_events, PlacementRequest, Population};
use crate::placement::{CountRange, ScaleRange};

/// World height of the placement plane used by the built-in presets.
pub const PRESET_BASE_HEIGHT: f32 = 2.0;

/// A layer in a scene plan.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct PlacementLayer {
    /// Unique identifier for this layer.
    pub id: String,
    /// Sampling and count configuration.
    pub request: PlacementRequest,
    /// Sources instantiated for this layer.
    pub pool: AssetPool,
    /// Optional per-instance scale range.
    pub scale: Option<ScaleRange>,
}

impl PlacementLayer {
    pub fn new(id: impl Into<String>, request: PlacementRequest, pool: AssetPool) -> Self {
        Self {
            id: id.into(),
            request,
            pool,
            scale: None,
        }
    }

    /// Set the per-instance scale range.
    pub fn with_scale(mut self, scale: ScaleRange) -> Self {
        self.scale = Some(scale);
        self
    }

    /// Virtual humans: 9x7x4 volume, 1.5 spacing, 1 to 6 instances scaled 0.8 to 1.5.
    pub fn foreground_humans(pool: AssetPool) -> Self {
        let request = PlacementRequest::new(
            Domain::new(9.0, 7.0, 4.0).with_base_height(PRESET_BASE_HEIGHT),
            1.5,
            CountRange::new(1, 6),
        );
        Self::new("foreground", request, pool).with_scale(ScaleRange::new(0.8, 1.5))
    }

    /// Occluders: 2.5x1.5x0.5 volume, 0.25 spacing, 5 to 10 instances scaled 0.5 to 1.2.
    pub fn occluders(pool: AssetPool) -> Self {
        let request = PlacementRequest::new(
            Domain::new(2.5, 1.5, 0.5).with_base_height(PRESET_BASE_HEIGHT),
            0.25,
            CountRange::new(5, 10),
        );
        Self::new("occluder", request, pool).with_scale(ScaleRange::new(0.5, 1.2))
    }
}

/// A scene plan composed of one or more [`PlacementLayer`]s.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct ScenePlan {
    pub layers: Vec<PlacementLayer>,
}

impl ScenePlan {
    /// Create a new empty plan.
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Add a single layer to the plan.
    pub fn with_layer(mut self, layer: PlacementLayer) -> Self {
        self.layers.push(layer);
        self
    }

    /// Add multiple layers to the plan.
    pub fn with_layers(mut self, layers: Vec<PlacementLayer>) -> Self {
        self.layers.extend(layers);
        self
    }

    /// Validates every layer without sampling anything.
    pub fn validate(&self) -> Result<()> {
        for layer in &self.layers {
            layer.request.validate()?;
            if let Some(scale) = &layer.scale {
                scale.validate()?;
            }
        }
        Ok(())
    }
}

/// Outcome of one layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerOutcome<H> {
    pub id: String,
    pub population: Population<H>,
}

/// Outcome of a whole scene plan, in layer order.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneOutcome<H> {
    pub layers: Vec<LayerOutcome<H>>,
}

impl<H> SceneOutcome<H> {
    /// Total instances placed across all layers.
    pub fn placed(&self) -> usize {
        self.layers
            .iter()
            .map(|l| l.population.placements.len())
            .sum()
    }

    pub fn layer(&self, id: &str) -> Option<&LayerOutcome<H>> {
        self.layers.iter().find(|l| l.id == id)
    }
}

pub fn run_scene_plan<I, R>(
    plan: &ScenePlan,
    camera: &CameraModel,
    instantiator: &mut I,
    rng: &mut R,
) -> Result<SceneOutcome<I::Handle>>
where
    I: AssetInstantiator + ?Sized,
    R: RngCore,
{
    run_scene_plan_with_events(plan, camera, instantiator, rng, &mut ())
}

pub fn run_scene_plan_with_events<I, R>(
    plan: &ScenePlan,
    camera: &CameraModel,
    instantiator: &mut I,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> Result<SceneOutcome<I::Handle>>
where
    I: AssetInstantiator + ?Sized,
    R: RngCore,
{
    plan.validate()?;
    camera.validate()?;

    if plan.layers.is_empty() {
        sink.send(PlacementEvent::Warning {
            context: "plan".into(),
            message: "Scene plan has no layers".into(),
        });
    }

    let mut layers = Vec::with_capacity(plan.layers.len());
    for (index, layer) in plan.layers.iter().enumerate() {
        info!(
            "Layer {}: '{}' | pool '{}' ({} sources).",
            index,
            layer.id,
            layer.pool.id,
            layer.pool.len()
        );
        sink.send(PlacementEvent::LayerStarted {
            index,
            id: layer.id.clone(),
        });

        let population = populate_with_events(
            &layer.request,
            camera,
            &layer.pool,
            layer.scale,
            instantiator,
            rng,
            sink,
        )?;

        sink.send(PlacementEvent::LayerFinished {
            index,
            id: layer.id.clone(),
            placed: population.placements.len(),
        });
        layers.push(LayerOutcome {
            id: layer.id.clone(),
            population,
        });
    }

    Ok(SceneOutcome { layers })
}
