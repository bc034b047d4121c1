//! Run-record assembly.
//!
//! The record is assembled without its id, canonicalized, hashed, and only
//! then stamped with `RUN:<timestamp>-<hex64>`. Rebuilding the record from
//! the same run yields byte-identical canonical payloads, so the id doubles
//! as an integrity check over the whole bundle.

use serde::Serialize;

use dl_core::entities::LotteryRun;
use dl_io::{canonical_json, hasher};

use crate::{EngineMeta, PipelineError};

/// League facts echoed into the record for audit reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueEcho {
    pub name: String,
    pub team_count: usize,
    pub distribution: String,
    pub total_balls: f64,
}

/// Canonical artifact for one finished lottery run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunRecord {
    /// `RUN:<timestamp>-<hex64>`, derived from the canonical payload below.
    pub id: String,
    pub timestamp_utc: String,
    pub engine: EngineMeta,
    pub seed: u64,
    /// Fixed-width hex echo of the seed, for eyeballing across artifacts.
    pub seed_hex: String,
    /// Uniform draws consumed from the random source, when the caller
    /// tracked them.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draws_consumed: Option<u64>,
    pub league: LeagueEcho,
    /// Team ids by draft position (index 0 = first overall pick).
    pub order: Vec<String>,
    /// Odds rows in league order, columns by draft position.
    pub odds: Vec<Vec<f64>>,
    /// SHA-256 of the canonical payload (everything above except `id`).
    pub payload_sha256: String,
}

#[derive(Serialize)]
struct RecordPayload<'a> {
    timestamp_utc: &'a str,
    engine: &'a EngineMeta,
    seed: u64,
    seed_hex: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    draws_consumed: Option<u64>,
    league: &'a LeagueEcho,
    order: &'a [String],
    odds: &'a [Vec<f64>],
}

/// Assemble the canonical record for `run`.
pub fn build_run_record(
    run: &LotteryRun,
    engine: &EngineMeta,
    draws_consumed: Option<u64>,
) -> Result<RunRecord, PipelineError> {
    let league = &run.league;

    let total_balls: f64 = (0..league.teams.len())
        .map(|i| league.distribution.raw_weight(&league.teams, i).unwrap_or(0.0))
        .sum();

    let league_echo = LeagueEcho {
        name: league.name.clone(),
        team_count: league.team_count(),
        distribution: league.distribution.kind().to_string(),
        total_balls,
    };

    let order: Vec<String> = run.order.iter().map(|id| id.as_str().to_string()).collect();
    let odds: Vec<Vec<f64>> = (0..run.odds.team_count())
        .map(|t| run.odds.row(t).unwrap_or(&[]).to_vec())
        .collect();

    let seed_hex = format!("{:016x}", run.seed);
    let payload = RecordPayload {
        timestamp_utc: &run.timestamp_utc,
        engine,
        seed: run.seed,
        seed_hex: &seed_hex,
        draws_consumed,
        league: &league_echo,
        order: &order,
        odds: &odds,
    };

    let bytes = canonical_json::to_canonical_bytes(&payload)?;
    let payload_sha256 = hasher::sha256_hex(&bytes);
    let id = hasher::run_id_from_bytes(&run.timestamp_utc, &bytes)?;

    Ok(RunRecord {
        id: id.as_str().to_string(),
        timestamp_utc: run.timestamp_utc.clone(),
        engine: engine.clone(),
        seed: run.seed,
        seed_hex,
        draws_consumed,
        league: league_echo,
        order,
        odds,
        payload_sha256,
    })
}
