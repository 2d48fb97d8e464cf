//! Placement pipeline: count selection, subset selection, asset binding and
//! multi-layer scene plans.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use rand::Rng as RngCore;

use crate::error::{Error, Result};
use crate::sampling::{rand01, rand_range_inclusive};

pub mod assets;
pub mod events;
pub mod plan;
pub mod runner;
pub mod selection;

/// Inclusive range the number of placed instances is drawn from.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CountRange {
    pub min: usize,
    pub max: usize,
}

impl CountRange {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// A range that always yields `count`.
    pub fn exactly(count: usize) -> Self {
        Self::new(count, count)
    }

    pub fn contains(&self, count: usize) -> bool {
        (self.min..=self.max).contains(&count)
    }

    /// Draws a count uniformly from `[min, max]`.
    pub fn draw(&self, rng: &mut dyn RngCore) -> usize {
        rand_range_inclusive(rng, self.min, self.max)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min > self.max {
            return Err(Error::InvalidConfig(format!(
                "count range min {} exceeds max {}",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Inclusive range of uniform scale factors applied to placed instances.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleRange {
    pub min: f32,
    pub max: f32,
}

impl ScaleRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn draw(&self, rng: &mut dyn RngCore) -> f32 {
        self.min + rand01(rng) * (self.max - self.min)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.min <= 0.0 || self.min > self.max
        {
            return Err(Error::InvalidConfig(format!(
                "scale range must satisfy 0 < min <= max, got [{}, {}]",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn count_range_draws_within_bounds() {
        let range = CountRange::new(1, 5);
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..200 {
            assert!(range.contains(range.draw(&mut rng)));
        }
        assert_eq!(CountRange::exactly(3).draw(&mut rng), 3);
    }

    #[test]
    fn count_range_rejects_inverted_bounds() {
        assert!(CountRange::new(2, 2).validate().is_ok());
        assert!(matches!(
            CountRange::new(6, 1).validate(),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn scale_range_draws_within_bounds() {
        let range = ScaleRange::new(0.8, 1.5);
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..200 {
            let s = range.draw(&mut rng);
            assert!((0.8..=1.5).contains(&s), "{s}");
        }
    }

    #[test]
    fn scale_range_validation() {
        assert!(ScaleRange::new(6.0, 6.0).validate().is_ok());
        assert!(ScaleRange::new(0.0, 1.0).validate().is_err());
        assert!(ScaleRange::new(2.0, 1.0).validate().is_err());
        assert!(ScaleRange::new(1.0, f32::NAN).validate().is_err());
    }
}
