//! Diagnostics emitted while a pass runs.
//!
//! Every `*_with_events` entry point reports its stages to an [`EventSink`]:
//! sampling retries, candidate counts before and after the frustum test, the
//! drawn count, the chosen positions and the bound instances. Scene plans add
//! per-layer start/finish events.
use glam::Vec3;
use tracing::{debug, warn};

use crate::placement::runner::{Placement, PlacementRequest, PlacementStats};

/// Describes events emitted by placement operations.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub enum PlacementEvent {
    /// Emitted when a placement pass starts.
    PassStarted {
        /// The validated request driving the pass.
        request: PlacementRequest,
    },

    /// Emitted for every sampling pass that came back empty.
    SamplingRetried {
        /// 1-based index of the failed pass.
        attempt: usize,
        /// Configured cap on passes.
        max_attempts: usize,
    },

    /// Emitted once the sampler produced a non-empty candidate set.
    CandidatesSampled {
        /// Number of candidates in world space.
        count: usize,
        /// Empty passes discarded before this one.
        retries: usize,
    },

    /// Emitted after the frustum test.
    VisibilityFiltered {
        /// Candidates before filtering.
        before: usize,
        /// Candidates inside the view frustum.
        after: usize,
    },

    /// Emitted when the placement count was drawn from its range.
    CountDrawn {
        /// The drawn count.
        requested: usize,
        /// Lower bound of the range.
        min: usize,
        /// Upper bound of the range.
        max: usize,
    },

    /// Emitted after the random subset of visible candidates was chosen.
    PositionsSelected {
        /// Chosen positions in draw order.
        positions: Vec<Vec3>,
    },

    /// Emitted after asset instances were created and positioned.
    AssetsBound {
        /// One record per activated instance.
        placements: Vec<Placement>,
    },

    /// Emitted when a pass completes successfully.
    PassFinished {
        /// Diagnostic counters of the pass.
        stats: PlacementStats,
    },

    /// A scene-plan layer is about to run.
    LayerStarted { index: usize, id: String },

    /// A scene-plan layer placed all of its instances.
    LayerFinished {
        index: usize,
        id: String,
        /// Instances created by the layer.
        placed: usize,
    },

    /// Something worth surfacing that does not abort the pass.
    Warning { context: String, message: String },
}

impl PlacementEvent {
    /// Short stable name of the variant, used for log lines and filtering.
    pub fn kind(&self) -> &'static str {
        match self {
            PlacementEvent::PassStarted { .. } => "pass_started",
            PlacementEvent::SamplingRetried { .. } => "sampling_retried",
            PlacementEvent::CandidatesSampled { .. } => "candidates_sampled",
            PlacementEvent::VisibilityFiltered { .. } => "visibility_filtered",
            PlacementEvent::CountDrawn { .. } => "count_drawn",
            PlacementEvent::PositionsSelected { .. } => "positions_selected",
            PlacementEvent::AssetsBound { .. } => "assets_bound",
            PlacementEvent::PassFinished { .. } => "pass_finished",
            PlacementEvent::LayerStarted { .. } => "layer_started",
            PlacementEvent::LayerFinished { .. } => "layer_finished",
            PlacementEvent::Warning { .. } => "warning",
        }
    }
}

/// Receiver for [`PlacementEvent`]s emitted during a pass.
pub trait EventSink {
    fn send(&mut self, event: PlacementEvent);
}

/// Discards every event.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: PlacementEvent) {}
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    #[inline]
    fn send(&mut self, event: PlacementEvent) {
        (**self).send(event);
    }
}

/// Calls a closure for each event.
pub struct FnSink<F: FnMut(PlacementEvent)>(pub F);

impl<F: FnMut(PlacementEvent)> FnSink<F> {
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F: FnMut(PlacementEvent)> EventSink for FnSink<F> {
    #[inline]
    fn send(&mut self, event: PlacementEvent) {
        (self.0)(event);
    }
}

/// Keeps every event in arrival order.
#[derive(Debug, Default)]
pub struct VecSink {
    events: Vec<PlacementEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[PlacementEvent] {
        &self.events
    }

    pub fn into_inner(self) -> Vec<PlacementEvent> {
        self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Variant names in arrival order.
    pub fn kinds(&self) -> Vec<&'static str> {
        self.events.iter().map(PlacementEvent::kind).collect()
    }

    /// Number of events of the given [`PlacementEvent::kind`].
    pub fn count_kind(&self, kind: &str) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: PlacementEvent) {
        self.events.push(event);
    }
}

/// Forwards each event to two sinks, `first` before `second`.
///
/// Nest tees to fan out further.
pub struct MultiSink<A, B> {
    pub first: A,
    pub second: B,
}

impl<A: EventSink, B: EventSink> MultiSink<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: EventSink, B: EventSink> EventSink for MultiSink<A, B> {
    fn send(&mut self, event: PlacementEvent) {
        self.first.send(event.clone());
        self.second.send(event);
    }
}

/// Writes one `tracing` debug line per event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn send(&mut self, event: PlacementEvent) {
        match &event {
            PlacementEvent::Warning { context, message } => {
                warn!("[{}] {}.", context, message);
            }
            PlacementEvent::VisibilityFiltered { before, after } => {
                debug!("Event {}: {} -> {}.", event.kind(), before, after);
            }
            PlacementEvent::LayerFinished { id, placed, .. } => {
                debug!("Event {}: '{}' placed {}.", event.kind(), id, placed);
            }
            _ => debug!("Event {}.", event.kind()),
        }
    }
}
