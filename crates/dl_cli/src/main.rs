// crates/dl_cli/src/main.rs
//
// Offline CLI driver: load a league file, run the lottery, pace the reveal,
// write canonical artifacts. Pacing lives here (the controller only yields
// one step per advance()); a fixed --seed reproduces the same artifacts.

mod args;

mod exitcodes {
    pub const OK: i32 = 0;
    /// User-input problems: bad flags, malformed/invalid league files,
    /// invalid distributions.
    pub const VALIDATION: i32 = 2;
    /// Filesystem failures reading inputs or writing artifacts.
    pub const IO: i32 = 4;
    /// Engine-side failures: empty pool, odds ceiling, state machine misuse,
    /// record assembly.
    pub const ENGINE: i32 = 5;
}

use std::path::Path;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use args::{parse_and_validate as parse_cli, Args};

use dl_core::distribution::DistributionSpec;
use dl_core::entities::League;
use dl_core::rng::seeded_source;
use dl_io::{canonical_json, store, IoError};
use dl_pipeline::{
    build_run_record, run_lottery, EngineMeta, PipelineError, RevealController,
    RevealDirection, RevealPhase, RunRecord,
};
use dl_report::{build_model, render_text, ReportError};

/// Central error type for CLI → exit-code mapping.
#[derive(Debug)]
enum MainError {
    /// League file shape/content problems and bad run configuration.
    Validation(String),
    /// Filesystem read/write failures.
    Io(String),
    /// Engine/pipeline failures.
    Engine(String),
    /// Report building/rendering failures.
    Render(String),
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_cli() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("dl: error: {e}");
            return ExitCode::from(exitcodes::VALIDATION as u8);
        }
    };

    let rc = if args.validate_only {
        match validate_only(&args) {
            Ok(()) => exitcodes::OK,
            Err(e) => report_and_map(&e),
        }
    } else {
        match run_once(&args) {
            Ok(()) => exitcodes::OK,
            Err(e) => report_and_map(&e),
        }
    };

    ExitCode::from(rc as u8)
}

/// Validate-only path: load + structural checks + eager distribution
/// resolution, no draw, no artifacts.
fn validate_only(args: &Args) -> Result<(), MainError> {
    let leagues = store::load_leagues(&args.leagues).map_err(map_io_err)?;
    let league = select_league(&leagues, args.league.as_deref())?;
    // The override must at least be applicable to the selected league.
    let _ = apply_distribution_override(league.clone(), args.distribution.as_deref())?;

    if !args.quiet {
        eprintln!("validate-only: inputs OK ({} league(s))", leagues.len());
    }
    Ok(())
}

fn run_once(args: &Args) -> Result<(), MainError> {
    // 1) Engine metadata (compile-time env where available).
    let engine = EngineMeta {
        vendor: option_env!("DL_ENGINE_VENDOR").unwrap_or("dl").to_string(),
        name: option_env!("DL_ENGINE_NAME")
            .unwrap_or(env!("CARGO_PKG_NAME"))
            .to_string(),
        version: option_env!("DL_ENGINE_VERSION")
            .unwrap_or(env!("CARGO_PKG_VERSION"))
            .to_string(),
        build: option_env!("DL_ENGINE_BUILD").unwrap_or("dev").to_string(),
    };

    // 2) Load and select.
    let leagues = store::load_leagues(&args.leagues).map_err(map_io_err)?;
    let league = select_league(&leagues, args.league.as_deref())?.clone();
    let league = apply_distribution_override(league, args.distribution.as_deref())?;
    log::debug!(
        "selected league {:?} with {} distribution",
        league.name,
        league.distribution.kind()
    );

    // 3) Seed: explicit, or derived once and recorded for reproducibility.
    let seed = match args.seed {
        Some(s) => s,
        None => derive_seed(),
    };
    if !args.quiet {
        eprintln!("run: league {:?}, seed {seed} (0x{seed:016x})", league.name);
    }

    // 4) Draw + odds + bundle.
    let timestamp = now_utc();
    let mut rng = seeded_source(seed);
    let run = run_lottery(&league, &mut rng, seed, &timestamp).map_err(map_pipeline_err)?;
    let record = build_run_record(&run, &engine, Some(rng.draws_consumed()))
        .map_err(map_pipeline_err)?;

    // 5) Staged reveal on stdout; this loop owns the pacing.
    reveal(args, &run.order, &league).map_err(map_pipeline_err)?;

    // 6) Artifacts.
    write_artifacts(args, &run, &record)?;

    if !args.quiet {
        eprintln!("run: artifacts written to {}", args.out.display());
        eprintln!("run: record id {}", record.id);
    }
    Ok(())
}

/// Pick the league to run: by name, by 0-based index, or the only one.
fn select_league<'a>(leagues: &'a [League], selector: Option<&str>) -> Result<&'a League, MainError> {
    match selector {
        None => {
            if leagues.len() == 1 {
                Ok(&leagues[0])
            } else {
                Err(MainError::Validation(format!(
                    "league file holds {} leagues; pass --league",
                    leagues.len()
                )))
            }
        }
        Some(sel) => {
            if let Some(league) = leagues.iter().find(|l| l.name == sel) {
                return Ok(league);
            }
            if let Ok(index) = sel.parse::<usize>() {
                if let Some(league) = leagues.get(index) {
                    return Ok(league);
                }
            }
            Err(MainError::Validation(format!("no league matches {sel:?}")))
        }
    }
}

/// Swap the persisted distribution for the run, keeping custom ball counts
/// only where the league actually has them.
fn apply_distribution_override(
    mut league: League,
    kind: Option<&str>,
) -> Result<League, MainError> {
    match kind {
        None => Ok(league),
        Some("straight") => {
            league.distribution = DistributionSpec::Straight;
            Ok(league)
        }
        Some("weighted") => {
            league.distribution = DistributionSpec::descending_balls(league.team_count());
            Ok(league)
        }
        Some("custom") => {
            if matches!(league.distribution, DistributionSpec::Custom { .. }) {
                Ok(league)
            } else {
                Err(MainError::Validation(
                    "league has no stored custom ball counts".to_string(),
                ))
            }
        }
        Some(other) => Err(MainError::Validation(format!(
            "unknown distribution {other:?}"
        ))),
    }
}

/// Walk the reveal state machine; sleep between steps unless skipping.
fn reveal(
    args: &Args,
    order: &dl_core::entities::DraftOrder,
    league: &League,
) -> Result<(), PipelineError> {
    let direction = match args.direction.as_str() {
        "first-to-last" => RevealDirection::FirstToLast,
        _ => RevealDirection::LastToFirst,
    };

    let mut ctrl = RevealController::new(direction);
    ctrl.start(order.clone()).map_err(|e| PipelineError::State(e.to_string()))?;

    println!("Draft order for {}:", league.name);
    if args.skip {
        let batch = ctrl.skip().map_err(|e| PipelineError::State(e.to_string()))?;
        for emission in batch {
            print_emission(&emission, league);
        }
    } else {
        while ctrl.phase() == RevealPhase::Revealing {
            let emission = ctrl
                .advance()
                .map_err(|e| PipelineError::State(e.to_string()))?;
            print_emission(&emission, league);
            if ctrl.phase() == RevealPhase::Revealing && args.delay_ms > 0 {
                thread::sleep(Duration::from_millis(args.delay_ms));
            }
        }
    }
    Ok(())
}

fn print_emission(emission: &dl_pipeline::Emission, league: &League) {
    let label = league
        .team_index(&emission.team)
        .and_then(|i| league.teams.get(i))
        .map(|t| match &t.manager {
            Some(m) => format!("{} ({m})", t.display_name),
            None => t.display_name.clone(),
        })
        .unwrap_or_else(|| emission.team.to_string());
    println!("Pick {}: {label}", emission.position + 1);
}

fn write_artifacts(args: &Args, run: &dl_core::entities::LotteryRun, record: &RunRecord) -> Result<(), MainError> {
    std::fs::create_dir_all(&args.out)
        .map_err(|e| MainError::Io(format!("mkdir {}: {e}", args.out.display())))?;

    let record_path = args.out.join("run_record.json");
    canonical_json::write_canonical_file(record, &record_path)
        .map_err(|e| MainError::Io(format!("write run_record.json: {e}")))?;

    let model = build_model(run, record).map_err(map_report_err)?;

    // No explicit --render means the classic text results file.
    let requested: Vec<&str> = if args.render.is_empty() {
        vec!["text"]
    } else {
        args.render.iter().map(|s| s.as_str()).collect()
    };

    for fmt in requested {
        match fmt {
            "text" => {
                let text = render_text(&model).map_err(map_report_err)?;
                write_text(&args.out.join("lottery_results.txt"), &text)?;
            }
            "json" => {
                canonical_json::write_canonical_file(&model, &args.out.join("report.json"))
                    .map_err(|e| MainError::Io(format!("write report.json: {e}")))?;
            }
            other => return Err(MainError::Render(format!("unknown renderer: {other}"))),
        }
    }
    Ok(())
}

fn write_text(path: &Path, text: &str) -> Result<(), MainError> {
    std::fs::write(path, text)
        .map_err(|e| MainError::Io(format!("write {}: {e}", path.display())))
}

/// Strict `YYYY-MM-DDTHH:MM:SSZ` stamp from the system clock.
fn now_utc() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// One-shot seed when none was supplied; recorded in the run artifact so the
/// run stays reproducible after the fact.
fn derive_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    nanos ^ u64::from(std::process::id())
}

/// Map our typed errors to the exit-code table.
fn report_and_map(e: &MainError) -> i32 {
    use exitcodes::*;
    eprintln!("dl: error: {}", describe(e));
    match e {
        MainError::Validation(_) => VALIDATION,
        MainError::Io(_) => IO,
        MainError::Engine(_) => ENGINE,
        MainError::Render(_) => ENGINE,
    }
}

fn describe(e: &MainError) -> &str {
    match e {
        MainError::Validation(m)
        | MainError::Io(m)
        | MainError::Engine(m)
        | MainError::Render(m) => m,
    }
}

/// Translate dl_io::IoError into MainError buckets for exit-code mapping.
fn map_io_err(e: IoError) -> MainError {
    match e {
        IoError::Invalid(m) => MainError::Validation(format!("league file: {m}")),
        IoError::Json { pointer, msg } => MainError::Validation(format!("json {pointer}: {msg}")),
        IoError::Path(m) => MainError::Io(format!("path: {m}")),
        IoError::Hash(m) => MainError::Engine(format!("hash: {m}")),
    }
}

/// Translate dl_pipeline::PipelineError into MainError buckets.
fn map_pipeline_err(e: PipelineError) -> MainError {
    match e {
        PipelineError::InvalidDistribution(m) => {
            MainError::Validation(format!("invalid distribution: {m}"))
        }
        PipelineError::Io(m) => MainError::Io(m),
        other => MainError::Engine(other.to_string()),
    }
}

fn map_report_err(e: ReportError) -> MainError {
    MainError::Render(e.to_string())
}
