// crates/dl_algo/src/lib.rs
#![forbid(unsafe_code)]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

// File modules (actual implementations)
pub mod draw;
pub mod odds;

// Tight, explicit re-exports (avoid wildcard export drift).
pub use draw::{draw_order, DrawError};
pub use odds::{odds_table, OddsError, MAX_ODDS_TEAMS};
