//! Selection of how many instances to place and where.
//!
//! - [draw_count]: draws the instance count from a [crate::placement::CountRange].
//! - [choose_distinct_indices]: a uniformly random `k`-subset of `0..n` in draw order.
//! - [select]: draws the count, checks it against the visible candidates and picks
//!   that many distinct positions.
//!
//! Randomness is consumed in a fixed order: one draw for the count, then `k`
//! draws for the subset.
use glam::Vec3;
use rand::Rng as RngCore;
use tracing::debug;

use crate::error::{Error, Result};
use crate::placement::CountRange;
use crate::sampling::rand_index;

/// Positions picked for one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Count drawn from the configured range.
    pub requested_count: usize,
    /// Exactly `requested_count` distinct positions in draw order.
    pub chosen: Vec<Vec3>,
}

pub fn draw_count<R: RngCore>(range: CountRange, rng: &mut R) -> usize {
    range.draw(rng)
}

/// Draws `k` distinct indices from `0..n` without replacement.
///
/// Partial Fisher-Yates: every `k`-subset is equally likely and the output is
/// in draw order. `k` must not exceed `n`.
pub fn choose_distinct_indices<R: RngCore>(n: usize, k: usize, rng: &mut R) -> Vec<usize> {
    debug_assert!(k <= n, "cannot choose {k} of {n}");
    let k = k.min(n);
    let mut indices: Vec<usize> = (0..n).collect();
    for i in 0..k {
        let j = i + rand_index(rng, n - i);
        indices.swap(i, j);
    }
    indices.truncate(k);
    indices
}

/// Draws the placement count and picks that many distinct visible positions.
///
/// Fails with [`Error::CapacityExceeded`] when fewer candidates are visible than
/// the drawn count; no partial selection is returned.
pub fn select<R: RngCore>(range: CountRange, visible: &[Vec3], rng: &mut R) -> Result<Selection> {
    range.validate()?;
    let requested_count = draw_count(range, rng);
    if requested_count > visible.len() {
        return Err(Error::CapacityExceeded {
            requested: requested_count,
            available: visible.len(),
            context: None,
        });
    }

    let chosen: Vec<Vec3> = choose_distinct_indices(visible.len(), requested_count, rng)
        .into_iter()
        .map(|i| visible[i])
        .collect();
    debug!(
        "Selected {} of {} visible candidates.",
        chosen.len(),
        visible.len()
    );

    Ok(Selection {
        requested_count,
        chosen,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn line(n: usize) -> Vec<Vec3> {
        (0..n).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect()
    }

    #[test]
    fn indices_are_distinct_and_in_range() {
        let mut rng = StdRng::seed_from_u64(4);
        for k in 0..=10 {
            let picked = choose_distinct_indices(10, k, &mut rng);
            assert_eq!(picked.len(), k);
            let unique: HashSet<_> = picked.iter().copied().collect();
            assert_eq!(unique.len(), k);
            assert!(picked.iter().all(|&i| i < 10));
        }
    }

    #[test]
    fn every_pair_is_roughly_equally_likely() {
        // 4 choose 2 = 6 subsets, ~1000 hits each.
        let mut rng = StdRng::seed_from_u64(21);
        let mut counts: HashMap<(usize, usize), usize> = HashMap::new();
        for _ in 0..6_000 {
            let mut pair = choose_distinct_indices(4, 2, &mut rng);
            pair.sort_unstable();
            *counts.entry((pair[0], pair[1])).or_default() += 1;
        }
        assert_eq!(counts.len(), 6);
        assert!(
            counts.values().all(|&c| c > 850 && c < 1150),
            "{counts:?}"
        );
    }

    #[test]
    fn select_returns_requested_count_of_distinct_visible_points() {
        let visible = line(12);
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let selection = select(CountRange::new(1, 5), &visible, &mut rng).expect("capacity");
            assert!((1..=5).contains(&selection.requested_count));
            assert_eq!(selection.chosen.len(), selection.requested_count);

            let xs: HashSet<u32> = selection.chosen.iter().map(|p| p.x.to_bits()).collect();
            assert_eq!(xs.len(), selection.chosen.len());
            assert!(selection.chosen.iter().all(|p| visible.contains(p)));
        }
    }

    #[test]
    fn select_can_take_every_candidate() {
        let visible = line(3);
        let mut rng = StdRng::seed_from_u64(6);
        let selection = select(CountRange::exactly(3), &visible, &mut rng).expect("capacity");
        let mut xs: Vec<f32> = selection.chosen.iter().map(|p| p.x).collect();
        xs.sort_by(f32::total_cmp);
        assert_eq!(xs, vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn zero_count_on_empty_candidates_is_valid() {
        let mut rng = StdRng::seed_from_u64(6);
        let selection = select(CountRange::exactly(0), &[], &mut rng).expect("nothing requested");
        assert_eq!(selection.requested_count, 0);
        assert!(selection.chosen.is_empty());
    }

    #[test]
    fn capacity_failure_reports_counts() {
        let visible = line(3);
        let mut rng = StdRng::seed_from_u64(7);
        let err = select(CountRange::exactly(10), &visible, &mut rng).expect_err("too few");
        assert!(matches!(
            err,
            Error::CapacityExceeded {
                requested: 10,
                available: 3,
                context: None
            }
        ));
    }

    #[test]
    fn inverted_range_is_rejected_before_drawing() {
        let mut rng = StdRng::seed_from_u64(7);
        let err = select(CountRange::new(5, 1), &line(10), &mut rng).expect_err("invalid");
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn same_seed_same_selection() {
        let visible = line(20);
        let a = select(CountRange::new(2, 8), &visible, &mut StdRng::seed_from_u64(9));
        let b = select(CountRange::new(2, 8), &visible, &mut StdRng::seed_from_u64(9));
        assert_eq!(a.expect("a"), b.expect("b"));
    }
}
