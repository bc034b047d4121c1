//! Distribution resolution: spec → normalized weight vector.
//!
//! Contract:
//! - `Straight`: every team gets weight 1/N.
//! - `Weighted`: positional ball counts, length == N, all > 0.
//! - `Custom`: every team id mapped to a positive ball count.
//!
//! Resolution is a pure function; the resulting `WeightVector` sums to 1.0
//! within `WEIGHT_EPS` and is rebuilt (never patched) whenever the spec or
//! the team set changes.

use crate::entities::{Team, TeamId};
use crate::errors::CoreError;
use crate::numeric::{nearly_one, WEIGHT_EPS};
use alloc::collections::BTreeMap;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How relative odds are assigned to teams before the draw.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum DistributionSpec {
    /// Uniform odds for every team.
    Straight,
    /// Positional ball counts, indexed by league order.
    Weighted { balls: Vec<f64> },
    /// Per-team ball counts.
    Custom { balls: BTreeMap<TeamId, f64> },
}

impl DistributionSpec {
    /// The classic weighted preset: N balls for the first team down to 1
    /// for the last.
    pub fn descending_balls(team_count: usize) -> Self {
        DistributionSpec::Weighted {
            balls: (1..=team_count).rev().map(|b| b as f64).collect(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DistributionSpec::Straight => "straight",
            DistributionSpec::Weighted { .. } => "weighted",
            DistributionSpec::Custom { .. } => "custom",
        }
    }

    /// Raw (un-normalized) ball count for the team at `index`, as persisted.
    pub fn raw_weight(&self, teams: &[Team], index: usize) -> Option<f64> {
        match self {
            DistributionSpec::Straight => {
                (index < teams.len()).then_some(1.0)
            }
            DistributionSpec::Weighted { balls } => balls.get(index).copied(),
            DistributionSpec::Custom { balls } => {
                teams.get(index).and_then(|t| balls.get(&t.id)).copied()
            }
        }
    }
}

/// Normalized probability per team, indexed by league order.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightVector(Vec<f64>);

impl WeightVector {
    /// Validate raw ball counts (all finite and > 0) and normalize by sum.
    pub fn try_from_raw(raw: &[f64]) -> Result<Self, CoreError> {
        if raw.is_empty() {
            return Err(CoreError::EmptyPool);
        }
        let mut sum = 0.0;
        for &w in raw {
            if !w.is_finite() {
                return Err(CoreError::InvalidDistribution("ball count must be finite"));
            }
            if w <= 0.0 {
                return Err(CoreError::InvalidDistribution("ball count must be positive"));
            }
            sum += w;
        }
        let normalized: Vec<f64> = raw.iter().map(|w| w / sum).collect();
        Ok(WeightVector(normalized))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Sum check against `WEIGHT_EPS`; holds for every vector built through
    /// `try_from_raw`, re-checked defensively by the draw and odds layers.
    pub fn is_normalized(&self) -> bool {
        let sum: f64 = self.0.iter().sum();
        !self.0.is_empty() && nearly_one(sum, WEIGHT_EPS)
    }
}

/// Resolve a distribution spec against an ordered team set.
///
/// Fails with `InvalidDistribution` when any team lacks a positive weight,
/// and `EmptyPool` on a zero-team league. A single-team league always
/// resolves to `[1.0]`.
pub fn resolve_weights(
    teams: &[Team],
    spec: &DistributionSpec,
) -> Result<WeightVector, CoreError> {
    if teams.is_empty() {
        return Err(CoreError::EmptyPool);
    }
    let raw: Vec<f64> = match spec {
        DistributionSpec::Straight => {
            let mut v = Vec::with_capacity(teams.len());
            v.resize(teams.len(), 1.0);
            v
        }
        DistributionSpec::Weighted { balls } => {
            if balls.len() != teams.len() {
                return Err(CoreError::InvalidDistribution(
                    "ball count does not match team count",
                ));
            }
            balls.clone()
        }
        DistributionSpec::Custom { balls } => {
            let mut v = Vec::with_capacity(teams.len());
            for t in teams {
                match balls.get(&t.id) {
                    Some(&w) => v.push(w),
                    None => {
                        return Err(CoreError::InvalidDistribution(
                            "team missing from custom ball map",
                        ))
                    }
                }
            }
            v
        }
    };
    WeightVector::try_from_raw(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Team;
    use alloc::string::ToString;
    use alloc::vec;

    fn teams(ids: &[&str]) -> Vec<Team> {
        ids.iter()
            .map(|id| Team {
                id: id.parse().unwrap(),
                display_name: id.to_string(),
                manager: None,
            })
            .collect()
    }

    #[test]
    fn straight_is_uniform_and_normalized() {
        let ts = teams(&["a", "b", "c", "d"]);
        let w = resolve_weights(&ts, &DistributionSpec::Straight).unwrap();
        assert_eq!(w.len(), 4);
        for i in 0..4 {
            assert!(nearly_one(w.get(i).unwrap() * 4.0, WEIGHT_EPS));
        }
        assert!(w.is_normalized());
    }

    #[test]
    fn weighted_normalizes_by_sum() {
        let ts = teams(&["a", "b"]);
        let spec = DistributionSpec::Weighted { balls: vec![3.0, 1.0] };
        let w = resolve_weights(&ts, &spec).unwrap();
        assert!(nearly_one(w.get(0).unwrap() / 0.75, WEIGHT_EPS));
        assert!(nearly_one(w.get(1).unwrap() / 0.25, WEIGHT_EPS));
    }

    #[test]
    fn weighted_rejects_length_mismatch_and_zero() {
        let ts = teams(&["a", "b"]);
        let short = DistributionSpec::Weighted { balls: vec![1.0] };
        assert!(matches!(
            resolve_weights(&ts, &short),
            Err(CoreError::InvalidDistribution(_))
        ));

        // Boundary: a zero ball count is rejected, never a silent
        // zero-probability team.
        let zero = DistributionSpec::Weighted { balls: vec![0.0, 1.0] };
        assert!(matches!(
            resolve_weights(&ts, &zero),
            Err(CoreError::InvalidDistribution(_))
        ));
    }

    #[test]
    fn custom_requires_every_team() {
        let ts = teams(&["a", "b", "c"]);
        let mut balls: BTreeMap<TeamId, f64> = BTreeMap::new();
        balls.insert("a".parse().unwrap(), 6.0);
        balls.insert("b".parse().unwrap(), 3.0);
        let incomplete = DistributionSpec::Custom { balls: balls.clone() };
        assert!(matches!(
            resolve_weights(&ts, &incomplete),
            Err(CoreError::InvalidDistribution(_))
        ));

        balls.insert("c".parse().unwrap(), 1.0);
        let w = resolve_weights(&ts, &DistributionSpec::Custom { balls }).unwrap();
        assert!(nearly_one(w.get(0).unwrap() / 0.6, WEIGHT_EPS));
        assert!(nearly_one(w.get(2).unwrap() / 0.1, WEIGHT_EPS));
    }

    #[test]
    fn custom_rejects_negative_ball_count() {
        let ts = teams(&["a"]);
        let mut balls: BTreeMap<TeamId, f64> = BTreeMap::new();
        balls.insert("a".parse().unwrap(), -1.0);
        assert!(matches!(
            resolve_weights(&ts, &DistributionSpec::Custom { balls }),
            Err(CoreError::InvalidDistribution(_))
        ));
    }

    #[test]
    fn single_team_resolves_to_unit() {
        let ts = teams(&["solo"]);
        let w = resolve_weights(&ts, &DistributionSpec::Straight).unwrap();
        assert_eq!(w.len(), 1);
        assert!(nearly_one(w.get(0).unwrap(), WEIGHT_EPS));
    }

    #[test]
    fn empty_pool_is_rejected() {
        assert_eq!(
            resolve_weights(&[], &DistributionSpec::Straight),
            Err(CoreError::EmptyPool)
        );
    }

    #[test]
    fn descending_preset_shape() {
        let spec = DistributionSpec::descending_balls(4);
        match &spec {
            DistributionSpec::Weighted { balls } => {
                assert_eq!(balls, &vec![4.0, 3.0, 2.0, 1.0]);
            }
            _ => panic!("expected weighted preset"),
        }
    }
}
