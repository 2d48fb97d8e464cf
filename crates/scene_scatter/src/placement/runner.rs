//! High-level runner for one placement pass: sample, filter, select, bind.
//!
//! Randomness is drawn from the caller's RNG in this order:
//! 1. the sampling pass (and any retried passes),
//! 2. the placement count,
//! 3. the subset of visible candidates,
//! 4. the asset sources (only when the pool is larger than the count),
//! 5. one scale per instance when a [`ScaleRange`] is configured.
//!
//! Two runs with identically seeded RNGs and identical inputs therefore produce
//! identical results.
use glam::Vec3;
use rand::Rng as RngCore;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::camera::{filter_visible, CameraModel};
use crate::domain::Domain;
use crate::error::{Error, PassContext, Result};
use crate::placement::assets::{assign_positions, bind, AssetInstantiator, AssetPool};
use crate::placement::events::{EventSink, PlacementEvent};
use crate::placement::selection::select;
use crate::placement::{CountRange, ScaleRange};
use crate::sampling::poisson_disk::DEFAULT_REJECTION_THRESHOLD;
use crate::sampling::{sample_until_non_empty, PoissonDiskSampling, DEFAULT_MAX_SAMPLING_ATTEMPTS};

/// Represents a placed instance of a source asset at a specific position.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Index of the source in its pool.
    pub source_index: usize,
    /// Name of the source asset.
    pub source_name: String,
    /// World position of the instance.
    pub position: Vec3,
    /// Uniform scale applied to the instance.
    pub scale: f32,
}

/// Configuration for one placement pass.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRequest {
    /// Inclusive range the instance count is drawn from.
    pub count_range: CountRange,
    /// Volume candidates are sampled in.
    pub domain: Domain,
    /// Minimum distance between candidates in world units.
    pub radius: f32,
    /// Attempts per active point before it is retired.
    #[cfg_attr(feature = "serde", serde(default = "default_rejection_threshold"))]
    pub rejection_threshold: usize,
    /// Full sampling passes allowed before giving up.
    #[cfg_attr(feature = "serde", serde(default = "default_max_sampling_attempts"))]
    pub max_sampling_attempts: usize,
}

#[cfg(feature = "serde")]
fn default_rejection_threshold() -> usize {
    DEFAULT_REJECTION_THRESHOLD
}

#[cfg(feature = "serde")]
fn default_max_sampling_attempts() -> usize {
    DEFAULT_MAX_SAMPLING_ATTEMPTS
}

impl PlacementRequest {
    /// Creates a request with default rejection threshold and attempt cap.
    pub fn new(domain: Domain, radius: f32, count_range: CountRange) -> Self {
        Self {
            count_range,
            domain,
            radius,
            rejection_threshold: DEFAULT_REJECTION_THRESHOLD,
            max_sampling_attempts: DEFAULT_MAX_SAMPLING_ATTEMPTS,
        }
    }

    /// Sets the per-active-point attempt budget.
    pub fn with_rejection_threshold(mut self, rejection_threshold: usize) -> Self {
        self.rejection_threshold = rejection_threshold;
        self
    }

    /// Sets the cap on full sampling passes.
    pub fn with_max_sampling_attempts(mut self, max_sampling_attempts: usize) -> Self {
        self.max_sampling_attempts = max_sampling_attempts;
        self
    }

    /// The sampler this request drives.
    pub fn sampling(&self) -> PoissonDiskSampling {
        PoissonDiskSampling::new(self.radius).with_rejection_threshold(self.rejection_threshold)
    }

    pub fn pass_context(&self) -> PassContext {
        PassContext {
            radius: self.radius,
            domain: self.domain,
        }
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        self.domain.validate()?;
        self.count_range.validate()?;
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "radius must be finite and > 0, got {}",
                self.radius
            )));
        }
        if self.rejection_threshold == 0 {
            return Err(Error::InvalidConfig(
                "rejection_threshold must be >= 1".into(),
            ));
        }
        if self.max_sampling_attempts == 0 {
            return Err(Error::InvalidConfig(
                "max_sampling_attempts must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

/// Diagnostic counters of one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlacementStats {
    /// Candidates produced by the accepted sampling pass.
    pub sampled_candidates: usize,
    /// Candidates inside the camera frustum.
    pub visible_candidates: usize,
    /// Empty sampling passes discarded.
    pub sampling_retries: usize,
}

/// Result of one placement pass.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementResult {
    /// Count drawn from the request's range.
    pub requested_count: usize,
    /// Distinct visible positions in draw order.
    pub chosen: Vec<Vec3>,
    pub stats: PlacementStats,
}

impl PlacementResult {
    /// Number of visible candidates the positions were chosen from.
    pub fn visible_candidates(&self) -> usize {
        self.stats.visible_candidates
    }
}

/// Positions bound to live asset instances.
#[derive(Debug, Clone, PartialEq)]
pub struct Population<H> {
    pub result: PlacementResult,
    /// One record per instance, in activation order.
    pub placements: Vec<Placement>,
    /// Host handles matching `placements` index for index.
    pub handles: Vec<H>,
}

/// Runs one validated [`PlacementRequest`] against camera snapshots.
pub struct PlacementRunner {
    /// Request applied by this runner.
    pub request: PlacementRequest,
}

impl PlacementRunner {
    pub fn try_new(request: PlacementRequest) -> Result<Self> {
        request.validate()?;
        Ok(Self { request })
    }

    /// Generates positions for the given camera.
    pub fn run(&self, camera: &CameraModel, rng: &mut impl RngCore) -> Result<PlacementResult> {
        generate_placement(&self.request, camera, rng)
    }

    pub fn run_with_events(
        &self,
        camera: &CameraModel,
        rng: &mut impl RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<PlacementResult> {
        generate_placement_with_events(&self.request, camera, rng, sink)
    }

    /// Generates positions and binds them to instances from `pool`.
    pub fn populate<I: AssetInstantiator + ?Sized>(
        &self,
        camera: &CameraModel,
        pool: &AssetPool,
        scale: Option<ScaleRange>,
        instantiator: &mut I,
        rng: &mut impl RngCore,
    ) -> Result<Population<I::Handle>> {
        populate(&self.request, camera, pool, scale, instantiator, rng)
    }
}

pub fn generate_placement<R: RngCore>(
    request: &PlacementRequest,
    camera: &CameraModel,
    rng: &mut R,
) -> Result<PlacementResult> {
    generate_placement_with_events(request, camera, rng, &mut ())
}

pub fn generate_placement_with_events<R: RngCore>(
    request: &PlacementRequest,
    camera: &CameraModel,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> Result<PlacementResult> {
    request.validate()?;
    camera.validate()?;

    sink.send(PlacementEvent::PassStarted {
        request: request.clone(),
    });

    let sampler = request.sampling();
    let sampled = sample_until_non_empty(
        &sampler,
        &request.domain,
        request.max_sampling_attempts,
        rng,
        sink,
    )?;

    let visible = filter_visible(&sampled.points, camera);
    sink.send(PlacementEvent::VisibilityFiltered {
        before: sampled.points.len(),
        after: visible.len(),
    });

    let selection = select(request.count_range, &visible, rng)
        .map_err(|e| e.with_pass_context(request.pass_context()))?;
    sink.send(PlacementEvent::CountDrawn {
        requested: selection.requested_count,
        min: request.count_range.min,
        max: request.count_range.max,
    });

    let stats = PlacementStats {
        sampled_candidates: sampled.points.len(),
        visible_candidates: visible.len(),
        sampling_retries: sampled.retries,
    };
    info!(
        "Placement over {}: {} sampled | {} visible | {} requested | {} retries.",
        request.domain,
        stats.sampled_candidates,
        stats.visible_candidates,
        selection.requested_count,
        stats.sampling_retries
    );

    sink.send(PlacementEvent::PositionsSelected {
        positions: selection.chosen.clone(),
    });
    sink.send(PlacementEvent::PassFinished { stats });

    Ok(PlacementResult {
        requested_count: selection.requested_count,
        chosen: selection.chosen,
        stats,
    })
}

pub fn populate<I, R>(
    request: &PlacementRequest,
    camera: &CameraModel,
    pool: &AssetPool,
    scale: Option<ScaleRange>,
    instantiator: &mut I,
    rng: &mut R,
) -> Result<Population<I::Handle>>
where
    I: AssetInstantiator + ?Sized,
    R: RngCore,
{
    populate_with_events(request, camera, pool, scale, instantiator, rng, &mut ())
}

/// Full pass: positions are generated, then bound to instances from `pool`.
///
/// The pool and scale range are checked before any sampling happens.
pub fn populate_with_events<I, R>(
    request: &PlacementRequest,
    camera: &CameraModel,
    pool: &AssetPool,
    scale: Option<ScaleRange>,
    instantiator: &mut I,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> Result<Population<I::Handle>>
where
    I: AssetInstantiator + ?Sized,
    R: RngCore,
{
    if pool.is_empty() {
        return Err(Error::EmptyAssetPool {
            pool: pool.id.clone(),
        });
    }
    if let Some(range) = &scale {
        range.validate()?;
    }

    let result = generate_placement_with_events(request, camera, rng, sink)?;
    let bound = bind(result.requested_count, pool, instantiator, rng)?;
    let scales: Option<Vec<f32>> = match scale {
        Some(range) => Some((0..bound.len()).map(|_| range.draw(&mut *rng)).collect()),
        None => None,
    };
    assign_positions(&bound, &result.chosen, scales.as_deref(), instantiator)?;

    let placements: Vec<Placement> = bound
        .iter()
        .zip(&result.chosen)
        .enumerate()
        .map(|(i, (asset, position))| Placement {
            source_index: asset.source_index,
            source_name: asset.source_name.clone(),
            position: *position,
            scale: scales.as_ref().map_or(1.0, |s| s[i]),
        })
        .collect();
    info!(
        "Bound {} instances from pool '{}' ({} sources).",
        placements.len(),
        pool.id,
        pool.len()
    );
    sink.send(PlacementEvent::AssetsBound {
        placements: placements.clone(),
    });

    Ok(Population {
        result,
        placements,
        handles: bound.into_iter().map(|b| b.handle).collect(),
    })
}
