//! Pure derivations over an [`AnalyticsSnapshot`].
//!
//! Every function here is deterministic and total. Inputs are not clamped
//! beyond a floor of zero on the component scores:
//!
//! # Preconditions
//!
//! The gini coefficient is expected in `[0, 1]` and the top-miners
//! concentration in `[0, 100]`. Values outside those ranges are accepted
//! without error; a negative gini, for example, yields a health score above
//! 100.

use crate::thresholds::{ConcentrationLevel, HealthBand, Thresholds};
use crate::types::{AnalyticsSnapshot, DecentralizationMetrics};

const BYTE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// `max(0, 1 - gini)`.
pub fn gini_score(gini: f64) -> f64 {
    (1.0 - gini).max(0.0)
}

/// `max(0, 1 - pct / 100)`.
pub fn concentration_score(pct: f64) -> f64 {
    (1.0 - pct / 100.0).max(0.0)
}

/// Mean of the two component scores as a percentage, rounded to one decimal.
pub fn score_from(gini: f64, pct: f64) -> f64 {
    let raw = (gini_score(gini) + concentration_score(pct)) / 2.0 * 100.0;
    round_to(raw, 1)
}

/// Network health score in `[0, 100]` for in-range inputs.
pub fn health_score(snapshot: &AnalyticsSnapshot) -> f64 {
    decentralization_score(&snapshot.decentralization_metrics)
}

/// Same formula as [`health_score`], reported on the decentralization view.
pub fn decentralization_score(metrics: &DecentralizationMetrics) -> f64 {
    score_from(metrics.gini_coefficient, metrics.top_miners_concentration)
}

pub fn health_band(score: f64) -> HealthBand {
    Thresholds::DEFAULT.health_band(score)
}

/// "Critical" below 50, "Warning" below 75, otherwise "Healthy".
pub fn health_label(score: f64) -> &'static str {
    health_band(score).label()
}

pub fn decentralization_interpretation(gini: f64) -> &'static str {
    Thresholds::DEFAULT.decentralization_interpretation(gini)
}

pub fn concentration_level(pct: f64) -> ConcentrationLevel {
    Thresholds::DEFAULT.concentration_level(pct)
}

pub fn decentralization_risk(gini: f64, pct: f64) -> &'static str {
    Thresholds::DEFAULT.decentralization_risk(gini, pct)
}

pub fn score_level(score: f64) -> &'static str {
    Thresholds::DEFAULT.score_level(score)
}

/// Human-readable byte size using powers of 1024.
///
/// Picks the largest unit up to GB whose mantissa is at least 1 and rounds
/// the mantissa to two decimals, dropping trailing zeros.
pub fn format_bytes(bytes: f64) -> String {
    if bytes == 0.0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes;
    let mut unit = 0;
    while value.abs() >= 1024.0 && unit < BYTE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{} {}", round_to(value, 2), BYTE_UNITS[unit])
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
