//! Exact per-team, per-position odds for the sequential draw.
//!
//! Contract:
//! - Answers "probability team `t` lands position `p`" analytically, for the
//!   exact without-replacement process in [`crate::draw`]. No Monte Carlo.
//! - Dynamic programming over drawn-team subsets: state = bitmask of teams
//!   already drawn, value = probability of reaching that subset. From a
//!   subset of size `p`, team `t` (not yet drawn) takes position `p` with
//!   the reach probability times `w[t]` over the surviving pool weight.
//! - `O(2^N * N)` time and `O(2^N)` space; pools above [`MAX_ODDS_TEAMS`]
//!   are a typed error, not a silent degradation.
//! - The finished table is re-checked to be doubly stochastic within
//!   `ODDS_EPS` before it is returned.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use dl_core::{
    distribution::WeightVector,
    entities::OddsTable,
    numeric::ODDS_EPS,
};

/// Hard ceiling on the subset DP. Also the documented tractability bound for
/// league sizes; the store caps leagues at 18 teams anyway.
pub const MAX_ODDS_TEAMS: usize = 20;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OddsError {
    /// Zero teams in the pool.
    EmptyPool,
    /// Weights not normalized (defensive check; `resolve_weights` should
    /// already guarantee this).
    InvalidDistribution(&'static str),
    /// More teams than the subset DP can enumerate.
    PoolTooLarge { teams: usize },
    /// The computed table failed the doubly-stochastic re-check.
    ToleranceExceeded,
}

impl fmt::Display for OddsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OddsError::EmptyPool => write!(f, "empty team pool"),
            OddsError::InvalidDistribution(m) => write!(f, "invalid distribution: {m}"),
            OddsError::PoolTooLarge { teams } => {
                write!(f, "odds pool too large: {teams} teams (max {MAX_ODDS_TEAMS})")
            }
            OddsError::ToleranceExceeded => {
                write!(f, "odds table failed doubly-stochastic check")
            }
        }
    }
}

/// Compute the full odds table for `weights` (indexed by league order).
pub fn odds_table(weights: &WeightVector) -> Result<OddsTable, OddsError> {
    let n = weights.len();
    if n == 0 {
        return Err(OddsError::EmptyPool);
    }
    if n > MAX_ODDS_TEAMS {
        return Err(OddsError::PoolTooLarge { teams: n });
    }
    if !weights.is_normalized() {
        return Err(OddsError::InvalidDistribution("weights do not sum to 1.0"));
    }

    let w = weights.as_slice();
    let size = 1usize << n;

    // drawn[mask] = total weight of the teams in `mask`, built incrementally
    // from the mask with its lowest bit cleared.
    let mut drawn = vec![0.0f64; size];
    for mask in 1..size {
        let low = mask.trailing_zeros() as usize;
        drawn[mask] = drawn[mask & (mask - 1)] + w[low];
    }

    // reach[mask] = probability the draw passes through exactly this subset.
    let mut reach = vec![0.0f64; size];
    reach[0] = 1.0;

    let mut rows = vec![vec![0.0f64; n]; n];
    for mask in 0..size {
        let p = reach[mask];
        if p == 0.0 {
            continue;
        }
        let pos = mask.count_ones() as usize;
        if pos == n {
            continue;
        }
        let pool = 1.0 - drawn[mask];
        for t in 0..n {
            if mask & (1 << t) != 0 {
                continue;
            }
            let pt = p * w[t] / pool;
            rows[t][pos] += pt;
            reach[mask | (1 << t)] += pt;
        }
    }

    let table = OddsTable::from_rows(rows);
    if !table.is_doubly_stochastic(ODDS_EPS) {
        return Err(OddsError::ToleranceExceeded);
    }
    Ok(table)
}
