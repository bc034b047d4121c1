//! Float tolerance helpers shared by the distribution and odds layers.
//!
//! Probabilities are plain `f64`; the engine never compares them for exact
//! equality. Two tolerances are normative: `WEIGHT_EPS` for normalized
//! weight vectors and `ODDS_EPS` for the doubly-stochastic odds check.

/// Tolerance for a normalized weight vector (`sum == 1.0`).
pub const WEIGHT_EPS: f64 = 1e-9;

/// Tolerance for odds-table row/column sums and cell bounds.
pub const ODDS_EPS: f64 = 1e-6;

/// `|x|` without requiring `std` (`f64::abs` lives in `std`).
#[inline]
pub fn fabs(x: f64) -> f64 {
    if x < 0.0 {
        -x
    } else {
        x
    }
}

/// True iff `a` and `b` differ by at most `eps`.
#[inline]
pub fn nearly(a: f64, b: f64, eps: f64) -> bool {
    fabs(a - b) <= eps
}

/// True iff `x` is within `eps` of 1.0.
#[inline]
pub fn nearly_one(x: f64, eps: f64) -> bool {
    nearly(x, 1.0, eps)
}
