//! Sequential weighted sampling without replacement.
//!
//! Contract:
//! - Pick position 0 by sampling one team from the full pool proportional to
//!   its weight; remove it; repeat against the shrunk pool.
//! - The final remaining team takes the last slot without consuming
//!   randomness (exact convergence, no wasted entropy).
//! - Randomness is consumed only through the injected [`RandomSource`]'s
//!   uniform-in-[0,1) primitive, so a seeded source reproduces a fixed order.
//!
//! Determinism:
//! - Scans run in league order (the `teams` slice); a given uniform sequence
//!   maps to exactly one draft order.

use alloc::vec::Vec;
use core::fmt;

use dl_core::{
    distribution::WeightVector,
    entities::{DraftOrder, Team},
    rng::RandomSource,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DrawError {
    /// Zero teams in the pool.
    EmptyPool,
    /// Weights are missing, mismatched, or not normalized (defensive check;
    /// `resolve_weights` should already guarantee this).
    InvalidDistribution(&'static str),
}

impl fmt::Display for DrawError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawError::EmptyPool => write!(f, "empty team pool"),
            DrawError::InvalidDistribution(m) => write!(f, "invalid distribution: {m}"),
        }
    }
}

/// Draw one complete draft order from `teams` weighted by `weights`.
///
/// `weights` is indexed by league order and must parallel `teams`. Consumes
/// exactly `N - 1` uniform draws for an `N`-team pool.
pub fn draw_order(
    teams: &[Team],
    weights: &WeightVector,
    rng: &mut dyn RandomSource,
) -> Result<DraftOrder, DrawError> {
    if teams.is_empty() {
        return Err(DrawError::EmptyPool);
    }
    if weights.len() != teams.len() {
        return Err(DrawError::InvalidDistribution(
            "weight count does not match team count",
        ));
    }
    if !weights.is_normalized() {
        return Err(DrawError::InvalidDistribution("weights do not sum to 1.0"));
    }

    // Indices still in the pool, in league order.
    let mut remaining: Vec<usize> = (0..teams.len()).collect();
    let mut picks = Vec::with_capacity(teams.len());

    while remaining.len() > 1 {
        // Sampling against the sum of the surviving original weights is the
        // same as renormalizing each of them.
        let pool: f64 = remaining
            .iter()
            .map(|&i| weights.get(i).unwrap_or(0.0))
            .sum();
        let target = rng.next_unit() * pool;

        let mut acc = 0.0;
        // The last slot also catches any floating-point shortfall in `acc`.
        let mut chosen = remaining.len() - 1;
        for (slot, &i) in remaining.iter().enumerate() {
            acc += weights.get(i).unwrap_or(0.0);
            if target < acc {
                chosen = slot;
                break;
            }
        }

        let idx = remaining.remove(chosen);
        picks.push(teams[idx].id.clone());
    }

    // Last team is placed, not sampled.
    picks.push(teams[remaining[0]].id.clone());

    Ok(DraftOrder::new(picks))
}
