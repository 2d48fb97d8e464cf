//! Sampling strategies for generating candidate positions in a 3D domain.
//!
//! Strategies produce points in corner-origin coordinates `[0, extent)`; the
//! retry wrapper in [`retry`] recenters them into world space via
//! [`crate::domain::Domain::recenter`].
use std::f32::consts::PI;

use glam::Vec3;
use mint::Vector3;
use rand::Rng as RngCore;

pub mod poisson_disk;
pub mod retry;

pub use poisson_disk::PoissonDiskSampling;
pub use retry::{sample_until_non_empty, SampledCandidates, DEFAULT_MAX_SAMPLING_ATTEMPTS};

/// Trait for position sampling.
pub trait PositionSampling: Send + Sync {
    fn generate(&self, domain_extent: Vector3<f32>, rng: &mut dyn RngCore) -> Vec<Vector3<f32>>;

    /// Minimum pairwise separation the strategy guarantees, if any.
    fn min_separation(&self) -> Option<f32> {
        None
    }
}

/// Generate a random float in the range [0, 1].
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

/// Uniform integer in `[0, n)` without modulo bias.
///
/// `n` must be non-zero.
#[inline]
pub(crate) fn rand_index(rng: &mut dyn RngCore, n: usize) -> usize {
    debug_assert!(n > 0, "rand_index requires a non-empty range");
    let n = n as u64;
    // 2^64 mod n; draws below it would over-represent the low residues.
    let threshold = n.wrapping_neg() % n;
    loop {
        let v = rng.next_u64();
        if v >= threshold {
            return (v % n) as usize;
        }
    }
}

/// Uniform integer in `[min, max]`. Callers guarantee `min <= max`.
#[inline]
pub(crate) fn rand_range_inclusive(rng: &mut dyn RngCore, min: usize, max: usize) -> usize {
    debug_assert!(min <= max);
    match (max - min).checked_add(1) {
        Some(span) => min + rand_index(rng, span),
        None => rng.next_u64() as usize,
    }
}

/// Uniformly distributed direction on the unit sphere.
pub(crate) fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    let z = 2.0 * rand01(rng) - 1.0;
    let phi = 2.0 * PI * rand01(rng);
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * phi.cos(), r * phi.sin(), z)
}
