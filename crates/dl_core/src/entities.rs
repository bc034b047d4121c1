//! League entities and run artifacts.
//!
//! Everything here is immutable during a lottery run: the `League` snapshot
//! is cloned into the `LotteryRun`, and `DraftOrder`/`OddsTable` are built
//! once by the algorithm layer and never mutated afterwards.

use crate::distribution::DistributionSpec;
use crate::errors::CoreError;
use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Store-level floor on league size (the engine itself accepts a single team).
pub const MIN_TEAMS: usize = 2;
/// Store-level cap on league size; also keeps the odds DP comfortably small.
pub const MAX_TEAMS: usize = 18;
/// Cap on leagues held in one store file.
pub const MAX_LEAGUES: usize = 5;

/// Canonical team glyphs, one per possible league slot.
pub const TEAM_GLYPHS: [&str; MAX_TEAMS] = [
    "α", "β", "γ", "δ", "ε", "ζ", "η", "θ", "ι", "κ", "λ", "μ", "ν", "ξ", "ο", "π", "ρ", "σ",
];

/// Glyph for the team at `index` in league order, if in range.
pub fn team_glyph(index: usize) -> Option<&'static str> {
    TEAM_GLYPHS.get(index).copied()
}

fn is_token(s: &str) -> bool {
    let len = s.len();
    if !(1..=64).contains(&len) {
        return false;
    }
    s.bytes().all(|b| {
        matches!(b,
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' |
            b'_' | b'-' | b':' | b'.'
        )
    })
}

/// Team identifier, unique within a league. Strict charset, 1..=64 bytes.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TeamId(String);

impl TeamId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TeamId {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_token(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(CoreError::InvalidToken)
        }
    }
}

/// One franchise entry. Immutable during a run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Team {
    pub id: TeamId,
    pub display_name: String,
    pub manager: Option<String>,
}

/// A league snapshot: ordered teams plus the chosen distribution.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct League {
    pub name: String,
    pub teams: Vec<Team>,
    pub distribution: DistributionSpec,
}

impl League {
    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    /// Index of a team within league order.
    pub fn team_index(&self, id: &TeamId) -> Option<usize> {
        self.teams.iter().position(|t| &t.id == id)
    }

    /// Store-level validation: name present, team count within bounds,
    /// ids unique. The engine's own N ≥ 1 edge case is deliberately *not*
    /// enforced here; this is the persisted-league rule set.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.is_empty() {
            return Err(CoreError::DomainOutOfRange("league name"));
        }
        if !(MIN_TEAMS..=MAX_TEAMS).contains(&self.teams.len()) {
            return Err(CoreError::DomainOutOfRange("team count"));
        }
        let mut seen = BTreeSet::new();
        for t in &self.teams {
            if !seen.insert(&t.id) {
                return Err(CoreError::DuplicateTeamId);
            }
        }
        Ok(())
    }
}

/// The drawn draft order: a permutation of the league's teams.
/// Index 0 is the first overall pick.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DraftOrder {
    picks: Vec<TeamId>,
}

impl DraftOrder {
    pub fn new(picks: Vec<TeamId>) -> Self {
        Self { picks }
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    /// Team holding draft position `position` (0-based).
    pub fn pick(&self, position: usize) -> Option<&TeamId> {
        self.picks.get(position)
    }

    /// Draft position of `id`, if drawn.
    pub fn position_of(&self, id: &TeamId) -> Option<usize> {
        self.picks.iter().position(|p| p == id)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, TeamId> {
        self.picks.iter()
    }

    pub fn as_slice(&self) -> &[TeamId] {
        &self.picks
    }
}

/// Exact per-team, per-position probabilities, independent of any single
/// drawn order. Row index follows league order; column index is the draft
/// position. A valid table is doubly stochastic.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OddsTable {
    rows: Vec<Vec<f64>>,
}

impl OddsTable {
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    pub fn team_count(&self) -> usize {
        self.rows.len()
    }

    /// Probability of the team at league index `team` landing draft
    /// position `position`.
    pub fn probability(&self, team: usize, position: usize) -> Option<f64> {
        self.rows.get(team).and_then(|r| r.get(position)).copied()
    }

    pub fn row(&self, team: usize) -> Option<&[f64]> {
        self.rows.get(team).map(|r| r.as_slice())
    }

    /// Every row and every column sums to 1.0 and every cell lies in
    /// [0, 1], all within `eps`.
    pub fn is_doubly_stochastic(&self, eps: f64) -> bool {
        use crate::numeric::nearly_one;
        let n = self.rows.len();
        if n == 0 || self.rows.iter().any(|r| r.len() != n) {
            return false;
        }
        for row in &self.rows {
            if row.iter().any(|&p| !(-eps..=1.0 + eps).contains(&p)) {
                return false;
            }
            if !nearly_one(row.iter().sum(), eps) {
                return false;
            }
        }
        for pos in 0..n {
            let col: f64 = self.rows.iter().map(|r| r[pos]).sum();
            if !nearly_one(col, eps) {
                return false;
            }
        }
        true
    }
}

/// One complete, immutable lottery execution bundle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LotteryRun {
    /// League snapshot (teams + distribution) as drawn.
    pub league: League,
    pub order: DraftOrder,
    pub odds: OddsTable,
    /// Strict `YYYY-MM-DDTHH:MM:SSZ` UTC stamp.
    pub timestamp_utc: String,
    /// Seed of the injected random source; rerunning with it reproduces
    /// `order` exactly.
    pub seed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn team(id: &str) -> Team {
        Team {
            id: id.parse().unwrap(),
            display_name: id.to_string(),
            manager: None,
        }
    }

    #[test]
    fn team_id_charset() {
        assert!("alpha".parse::<TeamId>().is_ok());
        assert!("A-1_x:y.z".parse::<TeamId>().is_ok());
        assert!("".parse::<TeamId>().is_err());
        assert!("has space".parse::<TeamId>().is_err());
    }

    #[test]
    fn league_validation_bounds_and_duplicates() {
        let mut league = League {
            name: "Keepers".to_string(),
            teams: vec![team("a"), team("b")],
            distribution: DistributionSpec::Straight,
        };
        assert!(league.validate().is_ok());

        league.teams.pop();
        assert_eq!(
            league.validate(),
            Err(CoreError::DomainOutOfRange("team count"))
        );

        league.teams = vec![team("a"), team("a")];
        assert_eq!(league.validate(), Err(CoreError::DuplicateTeamId));

        league.teams = vec![team("a"), team("b")];
        league.name.clear();
        assert!(league.validate().is_err());
    }

    #[test]
    fn draft_order_lookups() {
        let order = DraftOrder::new(vec![
            "b".parse().unwrap(),
            "a".parse().unwrap(),
            "c".parse().unwrap(),
        ]);
        assert_eq!(order.len(), 3);
        assert_eq!(order.pick(0).unwrap().as_str(), "b");
        assert_eq!(order.position_of(&"c".parse().unwrap()), Some(2));
        assert_eq!(order.position_of(&"z".parse().unwrap()), None);
    }

    #[test]
    fn odds_table_doubly_stochastic_check() {
        let good = OddsTable::from_rows(vec![vec![0.5, 0.5], vec![0.5, 0.5]]);
        assert!(good.is_doubly_stochastic(1e-6));

        let bad_row = OddsTable::from_rows(vec![vec![0.6, 0.5], vec![0.4, 0.5]]);
        assert!(!bad_row.is_doubly_stochastic(1e-6));

        let ragged = OddsTable::from_rows(vec![vec![1.0], vec![0.0, 1.0]]);
        assert!(!ragged.is_doubly_stochastic(1e-6));
    }

    #[test]
    fn glyphs_cover_max_league() {
        assert_eq!(team_glyph(0), Some("α"));
        assert_eq!(team_glyph(MAX_TEAMS - 1), Some("σ"));
        assert_eq!(team_glyph(MAX_TEAMS), None);
    }
}
