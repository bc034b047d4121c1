//! dl_report — pure offline results model + renderers.
//!
//! Determinism rules:
//! - No I/O here; callers supply the finished run and its record in memory.
//! - Nothing is recomputed: every number in the model is read from the
//!   `LotteryRun`/`RunRecord` pair, formatted, and placed.
//! - Stable section order and field names.

#![forbid(unsafe_code)]

use dl_core::entities::{team_glyph, LotteryRun};
use dl_pipeline::RunRecord;

pub mod render_json;
pub mod render_text;

pub use render_json::render_json;
pub use render_text::render_text;

// ===== Errors =====

#[derive(Debug, PartialEq, Eq)]
pub enum ReportError {
    MissingField(&'static str),
    /// The run and its record disagree (e.g., order references a team the
    /// league snapshot does not contain).
    Inconsistent(&'static str),
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::MissingField(m) => write!(f, "missing field: {m}"),
            ReportError::Inconsistent(m) => write!(f, "inconsistent artifacts: {m}"),
        }
    }
}

impl std::error::Error for ReportError {}

// ===== Model =====

#[derive(Clone, Debug, serde::Serialize)]
pub struct ReportModel {
    pub title: String,
    pub picks: Vec<PickRow>,
    /// Column labels for the odds matrix ("Pick 1"..."Pick N").
    pub odds_header: Vec<String>,
    pub odds_rows: Vec<OddsRow>,
    pub metadata: SectionMetadata,
    pub integrity: SectionIntegrity,
}

/// One row of the pick table, in draft order.
#[derive(Clone, Debug, serde::Serialize)]
pub struct PickRow {
    pub rank: usize,
    pub glyph: String,
    pub team: String,
    pub manager: String,
    pub balls: String,
    pub odds_first_pct: String,
    pub odds_this_pick_pct: String,
}

/// One row of the full odds matrix, in league order.
#[derive(Clone, Debug, serde::Serialize)]
pub struct OddsRow {
    pub team: String,
    pub cells: Vec<String>,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct SectionMetadata {
    pub league_name: String,
    pub team_count: usize,
    pub distribution: String,
    pub total_balls: String,
    pub generated_utc: String,
    pub seed: u64,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct SectionIntegrity {
    pub run_id: String,
    pub seed_hex: String,
    pub payload_sha256: String,
    pub engine_vendor: String,
    pub engine_name: String,
    pub engine_version: String,
    pub engine_build: String,
}

// ===== API =====

/// Build the report model from a finished run and its record (pure, offline).
pub fn build_model(run: &LotteryRun, record: &RunRecord) -> Result<ReportModel, ReportError> {
    let league = &run.league;
    let n = league.team_count();
    if run.order.len() != n || run.odds.team_count() != n {
        return Err(ReportError::Inconsistent(
            "order/odds size does not match the league snapshot",
        ));
    }

    let mut picks = Vec::with_capacity(n);
    for position in 0..n {
        let id = run
            .order
            .pick(position)
            .ok_or(ReportError::MissingField("order position"))?;
        let index = league
            .team_index(id)
            .ok_or(ReportError::Inconsistent("order references unknown team"))?;
        let team = &league.teams[index];

        let balls = league
            .distribution
            .raw_weight(&league.teams, index)
            .ok_or(ReportError::MissingField("ball count"))?;
        let first = run
            .odds
            .probability(index, 0)
            .ok_or(ReportError::MissingField("first-pick odds"))?;
        let landed = run
            .odds
            .probability(index, position)
            .ok_or(ReportError::MissingField("landed-pick odds"))?;

        picks.push(PickRow {
            rank: position + 1,
            glyph: team_glyph(index).unwrap_or("?").to_string(),
            team: team.display_name.clone(),
            manager: team.manager.clone().unwrap_or_else(|| "-".to_string()),
            balls: fmt_balls(balls),
            odds_first_pct: fmt_pct(first),
            odds_this_pick_pct: fmt_pct(landed),
        });
    }

    let odds_header = (1..=n).map(|p| format!("Pick {p}")).collect();
    let mut odds_rows = Vec::with_capacity(n);
    for (index, team) in league.teams.iter().enumerate() {
        let row = run
            .odds
            .row(index)
            .ok_or(ReportError::MissingField("odds row"))?;
        odds_rows.push(OddsRow {
            team: team.display_name.clone(),
            cells: row.iter().map(|&p| fmt_pct(p)).collect(),
        });
    }

    Ok(ReportModel {
        title: format!("Draft Lottery Results: {}", league.name),
        picks,
        odds_header,
        odds_rows,
        metadata: SectionMetadata {
            league_name: league.name.clone(),
            team_count: n,
            distribution: league.distribution.kind().to_string(),
            total_balls: fmt_balls(record.league.total_balls),
            generated_utc: run.timestamp_utc.clone(),
            seed: run.seed,
        },
        integrity: SectionIntegrity {
            run_id: record.id.clone(),
            seed_hex: record.seed_hex.clone(),
            payload_sha256: record.payload_sha256.clone(),
            engine_vendor: record.engine.vendor.clone(),
            engine_name: record.engine.name.clone(),
            engine_version: record.engine.version.clone(),
            engine_build: record.engine.build.clone(),
        },
    })
}

// ===== Formatting helpers =====

/// Probabilities render as two-decimal percentages.
fn fmt_pct(p: f64) -> String {
    format!("{:.2}%", p * 100.0)
}

/// Ball counts are usually whole numbers; keep them readable either way.
fn fmt_balls(b: f64) -> String {
    if b.fract() == 0.0 {
        format!("{b:.0}")
    } else {
        format!("{b}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dl_core::distribution::DistributionSpec;
    use dl_core::entities::{League, Team};
    use dl_core::rng::seeded_source;
    use dl_pipeline::{build_run_record, engine_identifiers, run_lottery};

    const TS: &str = "2026-08-04T12:00:00Z";

    fn fixture() -> (LotteryRun, RunRecord) {
        let league = League {
            name: "Keepers".to_string(),
            teams: (0..3)
                .map(|i| Team {
                    id: format!("t{i}").parse().unwrap(),
                    display_name: format!("Team {i}"),
                    manager: (i != 2).then(|| format!("M{i}")),
                })
                .collect(),
            distribution: DistributionSpec::descending_balls(3),
        };
        let mut rng = seeded_source(5);
        let run = run_lottery(&league, &mut rng, 5, TS).unwrap();
        let record = build_run_record(&run, &engine_identifiers(), None).unwrap();
        (run, record)
    }

    #[test]
    fn model_covers_every_pick_and_team() {
        let (run, record) = fixture();
        let model = build_model(&run, &record).unwrap();

        assert_eq!(model.picks.len(), 3);
        assert_eq!(model.odds_rows.len(), 3);
        assert_eq!(model.odds_header, vec!["Pick 1", "Pick 2", "Pick 3"]);
        assert_eq!(model.metadata.total_balls, "6");
        assert_eq!(model.integrity.run_id, record.id);

        // Ranks are 1-based and sequential in draft order.
        let ranks: Vec<usize> = model.picks.iter().map(|p| p.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);

        // A missing manager renders as a placeholder, never as an error.
        assert!(model.picks.iter().any(|p| p.manager == "-"));
    }

    #[test]
    fn glyphs_follow_league_order_not_draft_order() {
        let (run, record) = fixture();
        let model = build_model(&run, &record).unwrap();
        for pick in &model.picks {
            let league_index = run
                .league
                .teams
                .iter()
                .position(|t| t.display_name == pick.team)
                .unwrap();
            assert_eq!(pick.glyph, team_glyph(league_index).unwrap());
        }
    }

    #[test]
    fn pct_formatting_is_two_decimals() {
        assert_eq!(fmt_pct(0.5), "50.00%");
        assert_eq!(fmt_pct(1.0 / 3.0), "33.33%");
        assert_eq!(fmt_balls(6.0), "6");
        assert_eq!(fmt_balls(2.5), "2.5");
    }
}
