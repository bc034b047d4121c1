// crates/dl_cli/src/args.rs
//
// Deterministic, offline CLI argument parsing surface.
//
// Rules:
// - No networked paths (reject any scheme:// like http/https/file)
// - --leagues is the league file; --league selects by name or 0-based index
// - Seed override accepts decimal u64 or 0x-hex up to 16 nybbles
// - --validate-only loads and checks inputs without running the lottery

use clap::Parser;
use std::path::{Path, PathBuf};

/// Parsed CLI arguments (raw).
#[derive(Debug, Parser, Clone)]
#[command(
    name = "dl",
    disable_help_subcommand = true,
    about = "Offline, deterministic draft lottery engine"
)]
pub struct Args {
    /// League file (JSON) holding one or more leagues.
    #[arg(long)]
    pub leagues: PathBuf,

    /// League to run: a league name or a 0-based index. Optional when the
    /// file holds exactly one league.
    #[arg(long)]
    pub league: Option<String>,

    /// Distribution override for this run (defaults to the league's
    /// persisted choice).
    #[arg(long, value_parser = ["straight", "weighted", "custom"])]
    pub distribution: Option<String>,

    /// Reveal direction.
    #[arg(long, value_parser = ["last-to-first", "first-to-last"], default_value = "last-to-first")]
    pub direction: String,

    /// Pause between reveals, in milliseconds.
    #[arg(long, default_value_t = 2000)]
    pub delay_ms: u64,

    /// Reveal everything at once instead of pick by pick.
    #[arg(long)]
    pub skip: bool,

    /// Output directory for artifacts (default: current directory).
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Renderer(s) to emit. Omit for the default text results file.
    #[arg(long, value_parser = ["text", "json"], num_args = 0..=2)]
    pub render: Vec<String>,

    /// RNG seed override. Accepts decimal u64 or 0x-hex (<=16 hex digits).
    /// Without it, a seed is derived once and recorded in the run artifact.
    #[arg(long, value_parser = parse_seed)]
    pub seed: Option<u64>,

    /// Validate inputs only (load + structural/distribution checks), do not
    /// run the lottery.
    #[arg(long)]
    pub validate_only: bool,

    /// Suppress non-essential stderr logs.
    #[arg(long)]
    pub quiet: bool,
}

/// Errors surfaced by argument parsing/validation.
/// Keep messages short/stable (handy for scripts/tests).
#[derive(Debug)]
pub enum CliError {
    NonLocalPath(String),
    NotFound(String),
    BadSeed(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use CliError::*;
        match self {
            NonLocalPath(p) => write!(f, "path must be a local file (no scheme): {p}"),
            NotFound(p) => write!(f, "file not found: {p}"),
            BadSeed(s) => write!(f, "invalid seed: {s}"),
        }
    }
}
impl std::error::Error for CliError {}

/// Seed parser: decimal u64 or 0x-hex (1..=16 nybbles).
pub fn parse_seed(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty seed".into());
    }
    if let Some(rest) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        if rest.is_empty() || rest.len() > 16 || !rest.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err("hex seed must be 1..16 hex digits".into());
        }
        u64::from_str_radix(rest, 16).map_err(|_| "hex seed out of range".into())
    } else {
        s.parse::<u64>().map_err(|_| "decimal seed must be a valid u64".into())
    }
}

/// Reject any explicit URI scheme (e.g., http://, https://, file://).
#[inline]
fn has_scheme(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    lower.contains("://")
        || lower.starts_with("http:")
        || lower.starts_with("https:")
        || lower.starts_with("file:")
}

#[inline]
fn ensure_local_path(p: &Path) -> Result<(), CliError> {
    if let Some(s) = p.to_str() {
        if has_scheme(s) {
            return Err(CliError::NonLocalPath(s.to_string()));
        }
    }
    Ok(())
}

/// Entry point used by main.rs
pub fn parse_and_validate() -> Result<Args, CliError> {
    let mut args = Args::parse();

    ensure_local_path(&args.leagues)?;
    ensure_local_path(&args.out)?;

    let meta = std::fs::metadata(&args.leagues)
        .map_err(|_| CliError::NotFound(format!("--leagues {}", args.leagues.display())))?;
    if !meta.is_file() {
        return Err(CliError::NotFound(format!(
            "--leagues {}",
            args.leagues.display()
        )));
    }

    args.leagues = normalize_path(&args.leagues);
    // Normalize output directory even if it doesn't exist yet.
    args.out = normalize_path(&args.out);

    Ok(args)
}

/// Best-effort normalization to an absolute path.
fn normalize_path(p: &Path) -> PathBuf {
    std::fs::canonicalize(p).unwrap_or_else(|_| {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(p)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_parser_decimal_and_hex() {
        assert_eq!(parse_seed("42").unwrap(), 42u64);
        assert_eq!(parse_seed("0x2A").unwrap(), 42u64);
        assert!(parse_seed("0x").is_err());
        assert!(parse_seed("0xFFFFFFFFFFFFFFFFF").is_err()); // 17 nybbles
        assert!(parse_seed("-1").is_err());
    }

    #[test]
    fn local_path_check_rejects_schemes() {
        assert!(ensure_local_path(Path::new("http://x")).is_err());
        assert!(ensure_local_path(Path::new("file:///x.json")).is_err());
        assert!(ensure_local_path(Path::new("/tmp/file.json")).is_ok());
        assert!(ensure_local_path(Path::new("leagues.json")).is_ok());
    }

    #[test]
    fn normalize_path_returns_absolute() {
        let p = PathBuf::from("does/not/exist.json");
        assert!(normalize_path(&p).is_absolute());
    }
}
