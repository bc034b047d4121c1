//! LotterySession — pure orchestration of one run.

use dl_core::{
    distribution::resolve_weights,
    entities::{League, LotteryRun},
    ids::validate_utc_timestamp,
    rng::RandomSource,
};

use crate::PipelineError;

/// Run one lottery: resolve weights, draw the order, compute the odds table,
/// bundle everything into an immutable [`LotteryRun`].
///
/// `seed` is echoed into the bundle; the caller seeds `rng` with it and must
/// not draw from the source elsewhere during the run, so a recorded seed
/// reproduces the order exactly. Component errors surface unchanged.
pub fn run_lottery(
    league: &League,
    rng: &mut dyn RandomSource,
    seed: u64,
    timestamp_utc: &str,
) -> Result<LotteryRun, PipelineError> {
    validate_utc_timestamp(timestamp_utc)?;

    let weights = resolve_weights(&league.teams, &league.distribution)?;
    let order = dl_algo::draw_order(&league.teams, &weights, rng)?;
    let odds = dl_algo::odds_table(&weights)?;

    log::info!(
        "lottery drawn for {:?}: {} teams, {} distribution",
        league.name,
        league.team_count(),
        league.distribution.kind()
    );

    Ok(LotteryRun {
        league: league.clone(),
        order,
        odds,
        timestamp_utc: timestamp_utc.to_string(),
        seed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use dl_core::distribution::DistributionSpec;
    use dl_core::entities::{Team, TeamId};
    use dl_core::rng::seeded_source;
    use std::collections::BTreeMap;

    const TS: &str = "2026-08-04T12:00:00Z";

    fn league(n: usize, distribution: DistributionSpec) -> League {
        League {
            name: "Keepers".to_string(),
            teams: (0..n)
                .map(|i| {
                    let id = format!("t{i}");
                    Team {
                        id: id.parse().unwrap(),
                        display_name: id,
                        manager: None,
                    }
                })
                .collect(),
            distribution,
        }
    }

    #[test]
    fn bundles_order_odds_and_metadata() {
        let league = league(4, DistributionSpec::descending_balls(4));
        let mut rng = seeded_source(7);
        let run = run_lottery(&league, &mut rng, 7, TS).unwrap();

        assert_eq!(run.order.len(), 4);
        assert_eq!(run.odds.team_count(), 4);
        assert_eq!(run.seed, 7);
        assert_eq!(run.timestamp_utc, TS);
        assert_eq!(run.league, league);
    }

    #[test]
    fn same_seed_reproduces_the_order() {
        let league = league(10, DistributionSpec::descending_balls(10));
        let mut a = seeded_source(42);
        let mut b = seeded_source(42);
        let ra = run_lottery(&league, &mut a, 42, TS).unwrap();
        let rb = run_lottery(&league, &mut b, 42, TS).unwrap();
        assert_eq!(ra.order, rb.order);
    }

    #[test]
    fn empty_league_surfaces_empty_pool() {
        let league = league(0, DistributionSpec::Straight);
        let mut rng = seeded_source(0);
        assert_eq!(
            run_lottery(&league, &mut rng, 0, TS),
            Err(PipelineError::EmptyPool)
        );
    }

    #[test]
    fn incomplete_custom_weights_surface_unchanged() {
        let mut league = league(3, DistributionSpec::Straight);
        let mut balls: BTreeMap<TeamId, f64> = BTreeMap::new();
        balls.insert("t0".parse().unwrap(), 5.0);
        league.distribution = DistributionSpec::Custom { balls };

        let mut rng = seeded_source(0);
        assert!(matches!(
            run_lottery(&league, &mut rng, 0, TS),
            Err(PipelineError::InvalidDistribution(_))
        ));
    }

    #[test]
    fn loose_timestamp_is_rejected() {
        let league = league(2, DistributionSpec::Straight);
        let mut rng = seeded_source(0);
        assert!(matches!(
            run_lottery(&league, &mut rng, 0, "2026-08-04 12:00:00"),
            Err(PipelineError::Build(_))
        ));
    }
}
