//! Outer retry loop around a full sampling pass.
//!
//! Rejection sampling can come back empty on an unlucky run. The whole pass is
//! repeated until it yields at least one point, up to a bounded number of
//! attempts, after which [`Error::SamplingExhausted`] is returned.
use glam::Vec3;
use rand::Rng as RngCore;
use tracing::{debug, warn};

use crate::domain::Domain;
use crate::error::{Error, Result};
use crate::placement::events::{EventSink, PlacementEvent};
use crate::sampling::PositionSampling;

/// Default cap on full sampling passes before giving up.
pub const DEFAULT_MAX_SAMPLING_ATTEMPTS: usize = 64;

/// World-space candidates from the first non-empty sampling pass.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledCandidates {
    /// Recentered candidate positions in sampling order.
    pub points: Vec<Vec3>,
    /// Number of empty passes discarded before this one.
    pub retries: usize,
}

/// Runs `sampler` over `domain` until it returns a non-empty point set.
///
/// Points are recentered into world space before being returned.
pub fn sample_until_non_empty(
    sampler: &dyn PositionSampling,
    domain: &Domain,
    max_attempts: usize,
    rng: &mut dyn RngCore,
    sink: &mut dyn EventSink,
) -> Result<SampledCandidates> {
    if max_attempts == 0 {
        return Err(Error::InvalidConfig(
            "max_sampling_attempts must be >= 1".into(),
        ));
    }

    for attempt in 0..max_attempts {
        let raw = sampler.generate(domain.extent().into(), rng);
        if raw.is_empty() {
            warn!(
                "Sampling pass {}/{} over {} produced no points; retrying.",
                attempt + 1,
                max_attempts,
                domain
            );
            sink.send(PlacementEvent::SamplingRetried {
                attempt: attempt + 1,
                max_attempts,
            });
            continue;
        }

        let points: Vec<Vec3> = raw
            .into_iter()
            .map(Vec3::from)
            .map(|p| domain.recenter(p))
            .collect();
        debug!(
            "Sampled {} candidates after {} retries.",
            points.len(),
            attempt
        );
        sink.send(PlacementEvent::CandidatesSampled {
            count: points.len(),
            retries: attempt,
        });
        return Ok(SampledCandidates {
            points,
            retries: attempt,
        });
    }

    Err(Error::SamplingExhausted {
        attempts: max_attempts,
        radius: sampler.min_separation().unwrap_or(0.0),
        domain: *domain,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use mint::Vector3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::placement::events::VecSink;
    use crate::sampling::PoissonDiskSampling;

    /// Returns nothing for the first `empty_passes` calls, then a fixed corner point.
    struct FlakySampling {
        empty_passes: usize,
        calls: AtomicUsize,
    }

    impl FlakySampling {
        fn new(empty_passes: usize) -> Self {
            Self {
                empty_passes,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl PositionSampling for FlakySampling {
        fn generate(&self, _extent: Vector3<f32>, _rng: &mut dyn RngCore) -> Vec<Vector3<f32>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.empty_passes {
                Vec::new()
            } else {
                vec![Vec3::new(1.0, 1.0, 0.0).into()]
            }
        }

        fn min_separation(&self) -> Option<f32> {
            Some(0.75)
        }
    }

    #[test]
    fn retries_until_points_appear() {
        let sampler = FlakySampling::new(3);
        let domain = Domain::new(4.0, 2.0, 1.0).with_base_height(2.0);
        let mut rng = StdRng::seed_from_u64(0);
        let mut sink = VecSink::new();

        let sampled = sample_until_non_empty(&sampler, &domain, 10, &mut rng, &mut sink)
            .expect("fourth pass succeeds");

        assert_eq!(sampled.retries, 3);
        assert_eq!(sampled.points, vec![Vec3::new(-1.0, 0.0, 2.0)]);
        let retries = sink
            .as_slice()
            .iter()
            .filter(|e| matches!(e, PlacementEvent::SamplingRetried { .. }))
            .count();
        assert_eq!(retries, 3);
    }

    #[test]
    fn gives_up_after_cap_with_context() {
        let sampler = FlakySampling::new(usize::MAX);
        let domain = Domain::new(1.0, 1.0, 1.0);
        let mut rng = StdRng::seed_from_u64(0);

        let err = sample_until_non_empty(&sampler, &domain, 5, &mut rng, &mut ())
            .expect_err("never yields points");
        match err {
            Error::SamplingExhausted {
                attempts,
                radius,
                domain: d,
            } => {
                assert_eq!(attempts, 5);
                assert_eq!(radius, 0.75);
                assert_eq!(d, domain);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(sampler.calls.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn zero_attempt_cap_is_a_config_error() {
        let sampler = FlakySampling::new(0);
        let mut rng = StdRng::seed_from_u64(0);
        let err = sample_until_non_empty(
            &sampler,
            &Domain::new(1.0, 1.0, 1.0),
            0,
            &mut rng,
            &mut (),
        )
        .expect_err("cap of zero rejected");
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn poisson_output_is_recentered_into_world_bounds() {
        let domain = Domain::new(9.0, 7.0, 4.0).with_base_height(2.0);
        let sampler = PoissonDiskSampling::new(1.5);
        let mut rng = StdRng::seed_from_u64(2024);

        let sampled = sample_until_non_empty(&sampler, &domain, 8, &mut rng, &mut ())
            .expect("poisson sampling yields points");

        assert!(!sampled.points.is_empty());
        assert!(sampled.points.iter().all(|p| domain.contains_world(*p)));
    }
}
