//! Newtypes and parsers for run/digest identifiers.

use crate::errors::CoreError;
use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

fn is_lower_hex(s: &str) -> bool {
    s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

fn is_lower_hex_len(s: &str, n: usize) -> bool {
    s.len() == n && is_lower_hex(s)
}

fn is_ts_utc_z(s: &str) -> bool {
    // Very strict RFC3339-like check: "YYYY-MM-DDTHH:MM:SSZ" (length 20)
    let b = s.as_bytes();
    if b.len() != 20 {
        return false;
    }
    matches!(b[4], b'-')
        && matches!(b[7], b'-')
        && matches!(b[10], b'T')
        && matches!(b[13], b':')
        && matches!(b[16], b':')
        && matches!(b[19], b'Z')
        && b.iter().enumerate().all(|(i, c)| match i {
            0..=3 | 5..=6 | 8..=9 | 11..=12 | 14..=15 | 17..=18 => matches!(c, b'0'..=b'9'),
            4 | 7 | 10 | 13 | 16 | 19 => true,
            _ => false,
        })
}

/// Validate a strict `YYYY-MM-DDTHH:MM:SSZ` UTC timestamp.
pub fn validate_utc_timestamp(s: &str) -> Result<(), CoreError> {
    if is_ts_utc_z(s) {
        Ok(())
    } else {
        Err(CoreError::InvalidTimestamp)
    }
}

/// 64-hex lowercase (digest/fingerprint).
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sha256Hex(String);

impl Sha256Hex {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sha256Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Sha256Hex {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if is_lower_hex_len(s, 64) {
            Ok(Self(s.to_string()))
        } else {
            Err(CoreError::InvalidId)
        }
    }
}

/// "RUN:" + "<YYYY-MM-DDTHH:MM:SSZ>" + "-" + "<8..64-hex lowercase>"
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunId(String);

impl RunId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RunId {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s.strip_prefix("RUN:").ok_or(CoreError::InvalidId)?;
        // Split at the dash between timestamp and hash. The timestamp itself
        // contains dashes, so split from the right.
        let (ts, hash) = rest.rsplit_once('-').ok_or(CoreError::InvalidId)?;
        if !is_ts_utc_z(ts) {
            return Err(CoreError::InvalidTimestamp);
        }
        if !(8..=64).contains(&hash.len()) || !is_lower_hex(hash) {
            return Err(CoreError::InvalidId);
        }
        Ok(Self(s.to_string()))
    }
}
