//! dl_pipeline — orchestration of one lottery run.
//!
//! This crate stays presentation-free: it resolves the distribution, draws
//! the order, computes the odds table (all via `dl_core`/`dl_algo`), bundles
//! the immutable [`dl_core::entities::LotteryRun`], assembles the canonical
//! run record (via `dl_io`), and drives the staged reveal state machine.
//! Pacing, rendering, and persistence belong to the caller.

#![forbid(unsafe_code)]

use std::fmt;

use dl_core::CoreError;

/// Engine identifiers echoed into run records (overridable by the binary).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EngineMeta {
    pub vendor: String,
    pub name: String,
    pub version: String,
    pub build: String,
}

/// Default engine identifiers; the CLI overrides via its own env.
pub fn engine_identifiers() -> EngineMeta {
    EngineMeta {
        vendor: "dl".to_string(),
        name: "dl_engine".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        build: "dev".to_string(),
    }
}

/// Single error surface for the pipeline. Component error kinds are carried
/// through unchanged; nothing is downgraded or defaulted.
#[derive(Debug, PartialEq)]
pub enum PipelineError {
    /// Malformed or incomplete weight configuration (user input error).
    InvalidDistribution(String),
    /// Zero teams where at least one is required.
    EmptyPool,
    /// Odds pool beyond the exact-DP ceiling.
    PoolTooLarge(usize),
    /// Illegal reveal-controller transition (driver programming error).
    State(String),
    /// Artifact I/O failures.
    Io(String),
    /// Record assembly / id derivation failures.
    Build(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use PipelineError::*;
        match self {
            InvalidDistribution(m) => write!(f, "invalid distribution: {m}"),
            EmptyPool => write!(f, "empty team pool"),
            PoolTooLarge(n) => write!(f, "odds pool too large: {n} teams"),
            State(m) => write!(f, "reveal state error: {m}"),
            Io(m) => write!(f, "io error: {m}"),
            Build(m) => write!(f, "record build error: {m}"),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<CoreError> for PipelineError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::InvalidDistribution(m) => PipelineError::InvalidDistribution(m.to_string()),
            CoreError::EmptyPool => PipelineError::EmptyPool,
            other => PipelineError::Build(other.to_string()),
        }
    }
}

impl From<dl_algo::DrawError> for PipelineError {
    fn from(e: dl_algo::DrawError) -> Self {
        match e {
            dl_algo::DrawError::EmptyPool => PipelineError::EmptyPool,
            dl_algo::DrawError::InvalidDistribution(m) => {
                PipelineError::InvalidDistribution(m.to_string())
            }
        }
    }
}

impl From<dl_algo::OddsError> for PipelineError {
    fn from(e: dl_algo::OddsError) -> Self {
        match e {
            dl_algo::OddsError::EmptyPool => PipelineError::EmptyPool,
            dl_algo::OddsError::InvalidDistribution(m) => {
                PipelineError::InvalidDistribution(m.to_string())
            }
            dl_algo::OddsError::PoolTooLarge { teams } => PipelineError::PoolTooLarge(teams),
            dl_algo::OddsError::ToleranceExceeded => PipelineError::Build(e.to_string()),
        }
    }
}

impl From<dl_io::IoError> for PipelineError {
    fn from(e: dl_io::IoError) -> Self {
        match e {
            dl_io::IoError::Hash(m) => PipelineError::Build(format!("hash: {m}")),
            other => PipelineError::Io(other.to_string()),
        }
    }
}

pub mod reveal;
pub mod run_record;
pub mod session;

pub use reveal::{Emission, RevealController, RevealDirection, RevealPhase, StateError};
pub use run_record::{build_run_record, LeagueEcho, RunRecord};
pub use session::run_lottery;
