//! League store: load and save the JSON league file.
//!
//! The file holds up to `MAX_LEAGUES` leagues. Each league carries a name,
//! its teams in league order (id, display name, optional manager), the
//! persisted distribution choice, and the ball counts backing it. Wire docs
//! are mirrored into `dl_core` types; every league is validated structurally
//! and its distribution resolved eagerly, so a malformed file surfaces as a
//! typed error at load time, never as a silent default.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use dl_core::{
    distribution::{resolve_weights, DistributionSpec},
    entities::{League, Team, TeamId, MAX_LEAGUES},
};

use crate::{canonical_json, IoError, IoResult};

// ----------------------------- Wire-facing types -----------------------------

/// On-disk league file (mirrors the persisted `leagues_*.json` layout).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueFileDoc {
    pub schema_version: String,
    pub leagues: Vec<LeagueDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueDoc {
    pub name: String,
    pub teams: Vec<TeamDoc>,
    /// "straight" | "weighted" | "custom"
    pub distribution: String,
    /// Positional ball counts for an explicit weighted distribution.
    /// Empty means the classic descending N..1 preset.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub balls: Vec<f64>,
    /// Per-team ball counts for a custom distribution.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_balls: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamDoc {
    pub id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
}

// ----------------------------- Load -----------------------------

/// Load and validate every league in `path`.
pub fn load_leagues(path: &Path) -> IoResult<Vec<League>> {
    let bytes = fs::read(path)?;
    let doc: LeagueFileDoc = serde_json::from_slice(&bytes)?;

    if doc.leagues.is_empty() {
        return Err(IoError::Invalid("league file holds no leagues".into()));
    }
    if doc.leagues.len() > MAX_LEAGUES {
        return Err(IoError::Invalid(format!(
            "league file holds {} leagues (max {MAX_LEAGUES})",
            doc.leagues.len()
        )));
    }

    let mut leagues = Vec::with_capacity(doc.leagues.len());
    for league_doc in &doc.leagues {
        leagues.push(league_from_doc(league_doc)?);
    }

    log::info!("loaded {} league(s) from {}", leagues.len(), path.display());
    Ok(leagues)
}

fn league_from_doc(doc: &LeagueDoc) -> IoResult<League> {
    let mut teams = Vec::with_capacity(doc.teams.len());
    for t in &doc.teams {
        let id: TeamId = t
            .id
            .parse()
            .map_err(|_| IoError::Invalid(format!("bad team id {:?}", t.id)))?;
        teams.push(Team {
            id,
            display_name: t.display_name.clone(),
            manager: t.manager.clone(),
        });
    }

    let distribution = distribution_from_doc(doc, teams.len())?;
    let league = League {
        name: doc.name.clone(),
        teams,
        distribution,
    };

    league.validate()?;
    // Resolve eagerly so incomplete or non-positive ball counts fail here.
    resolve_weights(&league.teams, &league.distribution)?;
    Ok(league)
}

fn distribution_from_doc(doc: &LeagueDoc, team_count: usize) -> IoResult<DistributionSpec> {
    match doc.distribution.as_str() {
        "straight" => Ok(DistributionSpec::Straight),
        "weighted" => {
            if doc.balls.is_empty() {
                Ok(DistributionSpec::descending_balls(team_count))
            } else {
                Ok(DistributionSpec::Weighted {
                    balls: doc.balls.clone(),
                })
            }
        }
        "custom" => {
            let mut balls: BTreeMap<TeamId, f64> = BTreeMap::new();
            for (id, &count) in &doc.custom_balls {
                let id: TeamId = id
                    .parse()
                    .map_err(|_| IoError::Invalid(format!("bad team id {id:?} in custom balls")))?;
                balls.insert(id, count);
            }
            Ok(DistributionSpec::Custom { balls })
        }
        other => Err(IoError::Invalid(format!(
            "unknown distribution kind {other:?}"
        ))),
    }
}

// ----------------------------- Save -----------------------------

/// Save `leagues` to `path` as canonical JSON (atomic write).
pub fn save_leagues(path: &Path, leagues: &[League]) -> IoResult<()> {
    if leagues.len() > MAX_LEAGUES {
        return Err(IoError::Invalid(format!(
            "cannot save {} leagues (max {MAX_LEAGUES})",
            leagues.len()
        )));
    }
    let doc = LeagueFileDoc {
        schema_version: "1".to_string(),
        leagues: leagues.iter().map(league_to_doc).collect(),
    };
    canonical_json::write_canonical_file(&doc, path)?;
    log::info!("saved {} league(s) to {}", leagues.len(), path.display());
    Ok(())
}

fn league_to_doc(league: &League) -> LeagueDoc {
    let (kind, balls, custom_balls) = match &league.distribution {
        DistributionSpec::Straight => ("straight", Vec::new(), BTreeMap::new()),
        DistributionSpec::Weighted { balls } => ("weighted", balls.clone(), BTreeMap::new()),
        DistributionSpec::Custom { balls } => (
            "custom",
            Vec::new(),
            balls
                .iter()
                .map(|(id, &count)| (id.as_str().to_string(), count))
                .collect(),
        ),
    };
    LeagueDoc {
        name: league.name.clone(),
        teams: league
            .teams
            .iter()
            .map(|t| TeamDoc {
                id: t.id.as_str().to_string(),
                display_name: t.display_name.clone(),
                manager: t.manager.clone(),
            })
            .collect(),
        distribution: kind.to_string(),
        balls,
        custom_balls,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_json_diff::assert_json_eq;
    use serde_json::json;

    fn write_file(dir: &tempfile::TempDir, body: serde_json::Value) -> std::path::PathBuf {
        let path = dir.path().join("leagues.json");
        fs::write(&path, serde_json::to_vec(&body).unwrap()).unwrap();
        path
    }

    fn two_team_league(distribution: &str) -> serde_json::Value {
        json!({
            "schema_version": "1",
            "leagues": [{
                "name": "Keepers",
                "teams": [
                    {"id": "alpha", "display_name": "Team Alpha", "manager": "Sam"},
                    {"id": "beta", "display_name": "Team Beta"}
                ],
                "distribution": distribution
            }]
        })
    }

    #[test]
    fn straight_league_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, two_team_league("straight"));
        let leagues = load_leagues(&path).unwrap();
        assert_eq!(leagues.len(), 1);
        assert_eq!(leagues[0].team_count(), 2);
        assert_eq!(leagues[0].teams[0].manager.as_deref(), Some("Sam"));
        assert_eq!(leagues[0].distribution, DistributionSpec::Straight);

        let out = dir.path().join("saved.json");
        save_leagues(&out, &leagues).unwrap();
        let reloaded = load_leagues(&out).unwrap();
        assert_eq!(leagues, reloaded);

        // The saved wire shape matches what the loader accepts.
        let on_disk: serde_json::Value =
            serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
        assert_json_eq!(
            on_disk.pointer("/leagues/0/distribution").unwrap(),
            json!("straight")
        );
    }

    #[test]
    fn weighted_without_balls_uses_descending_preset() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, two_team_league("weighted"));
        let leagues = load_leagues(&path).unwrap();
        assert_eq!(
            leagues[0].distribution,
            DistributionSpec::Weighted {
                balls: vec![2.0, 1.0]
            }
        );
    }

    #[test]
    fn custom_league_resolves_and_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let mut body = two_team_league("custom");
        body["leagues"][0]["custom_balls"] = json!({"alpha": 6, "beta": 3});
        let path = write_file(&dir, body);
        let leagues = load_leagues(&path).unwrap();

        let out = dir.path().join("saved.json");
        save_leagues(&out, &leagues).unwrap();
        assert_eq!(load_leagues(&out).unwrap(), leagues);
    }

    #[test]
    fn custom_missing_team_fails_at_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut body = two_team_league("custom");
        body["leagues"][0]["custom_balls"] = json!({"alpha": 6});
        let path = write_file(&dir, body);
        assert!(matches!(load_leagues(&path), Err(IoError::Invalid(_))));
    }

    #[test]
    fn zero_ball_count_fails_at_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut body = two_team_league("custom");
        body["leagues"][0]["custom_balls"] = json!({"alpha": 0, "beta": 3});
        let path = write_file(&dir, body);
        assert!(matches!(load_leagues(&path), Err(IoError::Invalid(_))));
    }

    #[test]
    fn unknown_distribution_kind_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, two_team_league("lottery"));
        assert!(matches!(load_leagues(&path), Err(IoError::Invalid(_))));
    }

    #[test]
    fn duplicate_team_id_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut body = two_team_league("straight");
        body["leagues"][0]["teams"][1]["id"] = json!("alpha");
        let path = write_file(&dir, body);
        assert!(matches!(load_leagues(&path), Err(IoError::Invalid(_))));
    }

    #[test]
    fn empty_and_overfull_files_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, json!({"schema_version": "1", "leagues": []}));
        assert!(matches!(load_leagues(&path), Err(IoError::Invalid(_))));

        let league = two_team_league("straight")["leagues"][0].clone();
        let body = json!({
            "schema_version": "1",
            "leagues": (0..MAX_LEAGUES + 1).map(|_| league.clone()).collect::<Vec<_>>()
        });
        let path = write_file(&dir, body);
        assert!(matches!(load_leagues(&path), Err(IoError::Invalid(_))));
    }

    #[test]
    fn malformed_json_maps_to_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leagues.json");
        fs::write(&path, b"{ not json").unwrap();
        assert!(matches!(load_leagues(&path), Err(IoError::Json { .. })));
    }
}
