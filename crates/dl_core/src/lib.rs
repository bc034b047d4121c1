//! dl_core — Core types, distribution model, and deterministic RNG.
//!
//! This crate is **I/O-free**. It defines the stable types/APIs used across
//! the engine (`dl_io`, `dl_algo`, `dl_pipeline`, `dl_report`, `dl_cli`).
//!
//! - League entities: `Team`, `TeamId`, `League`
//! - Run artifacts: `DraftOrder`, `OddsTable`, `LotteryRun`
//! - Distribution resolution: `DistributionSpec` → `WeightVector`
//! - Identifiers: `Sha256Hex`, `RunId`
//! - Injected randomness: `RandomSource` + seeded ChaCha20 source
//!
//! Serialization derives are gated behind the `serde` feature.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod errors {
    use core::fmt;

    /// Minimal error set for core-domain validation & parsing.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum CoreError {
        /// Malformed or incomplete weight configuration (user input error).
        InvalidDistribution(&'static str),
        /// Zero teams where at least one is required.
        EmptyPool,
        /// Identifier charset/shape violation.
        InvalidToken,
        InvalidTimestamp,
        InvalidId,
        /// League-level bound violated (team count, league count).
        DomainOutOfRange(&'static str),
        DuplicateTeamId,
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::InvalidDistribution(m) => write!(f, "invalid distribution: {m}"),
                CoreError::EmptyPool => write!(f, "empty team pool"),
                CoreError::InvalidToken => write!(f, "invalid token"),
                CoreError::InvalidTimestamp => write!(f, "invalid timestamp"),
                CoreError::InvalidId => write!(f, "invalid id"),
                CoreError::DomainOutOfRange(k) => write!(f, "domain out of range: {k}"),
                CoreError::DuplicateTeamId => write!(f, "duplicate team id"),
            }
        }
    }
}

pub mod distribution;
pub mod entities;
pub mod ids;
pub mod numeric;
pub mod rng;

pub use errors::CoreError;
