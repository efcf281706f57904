//! Trade fairness heuristic
//!
//! Compares two card values by percentage difference against a threshold.
//! Purely advisory; validation never consults it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default threshold: value gaps up to 20% (inclusive) count as fair
pub const DEFAULT_THRESHOLD_PERCENT: f64 = 20.0;

/// Fairness verdict for a proposed card-for-card exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fairness {
    Fair,
    Unfair,
}

impl fmt::Display for Fairness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fairness::Fair => f.write_str("fair"),
            Fairness::Unfair => f.write_str("unfair"),
        }
    }
}

/// Assess two card values against the default 20% threshold.
pub fn trade_fairness(value1: i64, value2: i64) -> Fairness {
    trade_fairness_with_threshold(value1, value2, DEFAULT_THRESHOLD_PERCENT)
}

/// Assess two card values against a caller-chosen threshold.
///
/// Computes `|v1 - v2| / max(v1, v2) * 100` and compares inclusively.
/// When both values are zero the ratio is NaN and the comparison fails,
/// yielding `Unfair`; upstream behavior for that degenerate case is
/// undefined and deliberately left as-is.
pub fn trade_fairness_with_threshold(value1: i64, value2: i64, threshold_percent: f64) -> Fairness {
    let difference = (value1 - value2).abs() as f64;
    let max_value = value1.max(value2) as f64;
    let percent_difference = difference / max_value * 100.0;

    if percent_difference <= threshold_percent {
        Fairness::Fair
    } else {
        Fairness::Unfair
    }
}
