#![forbid(unsafe_code)]
//! scene_scatter: camera-aware blue-noise placement for synthetic scene generation.
//!
//! Modules:
//! - domain: the box-shaped placement volume and its recentering transform
//! - sampling: Poisson disk candidate generation and the bounded outer retry loop
//! - camera: read-only camera snapshot, projection and frustum filtering
//! - placement: count/subset selection, asset binding, runner, scene plans, events
//!
//! A pass samples candidates in a [`domain::Domain`], keeps the ones a
//! [`camera::CameraModel`] sees, draws how many instances to place and where,
//! and finally binds those positions to instances created through a host
//! [`placement::assets::AssetInstantiator`].
pub mod camera;
pub mod domain;
pub mod error;
pub mod placement;
pub mod sampling;

/// Convenient re-exports for common types. Import with `use scene_scatter::prelude::*;`.
pub mod prelude {
    pub use crate::camera::{
        filter_visible, is_in_view, partition_visible, CameraModel, CameraView, Projection,
        DEFAULT_SENSOR_WIDTH_MM,
    };
    pub use crate::domain::Domain;
    pub use crate::error::{Error, PassContext, Result};
    pub use crate::placement::assets::{
        assign_positions, bind, plan_sources, AssetInstantiator, AssetPool, AssetSource,
        BoundAsset,
    };
    pub use crate::placement::events::{
        EventSink, FnSink, MultiSink, PlacementEvent, TracingSink, VecSink,
    };
    pub use crate::placement::plan::{
        run_scene_plan, run_scene_plan_with_events, LayerOutcome, PlacementLayer, SceneOutcome,
        ScenePlan,
    };
    pub use crate::placement::runner::{
        generate_placement, generate_placement_with_events, populate, populate_with_events,
        Placement, PlacementRequest, PlacementResult, PlacementRunner, PlacementStats, Population,
    };
    pub use crate::placement::selection::{choose_distinct_indices, draw_count, select, Selection};
    pub use crate::placement::{CountRange, ScaleRange};
    pub use crate::sampling::{
        sample_until_non_empty, PoissonDiskSampling, PositionSampling, SampledCandidates,
    };
}
