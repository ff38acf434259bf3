//! Band boundaries for every qualitative label the console derives.
//!
//! All comparisons are half-open on the lower bound: a value equal to a
//! boundary belongs to the band above it.

/// Coarse health classification used for status colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthBand {
    Critical,
    Warning,
    Healthy,
}

impl HealthBand {
    pub fn label(&self) -> &'static str {
        match self {
            HealthBand::Critical => "Critical",
            HealthBand::Warning => "Warning",
            HealthBand::Healthy => "Healthy",
        }
    }
}

/// Share of blocks held by the top miners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConcentrationLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ConcentrationLevel {
    pub fn label(&self) -> &'static str {
        match self {
            ConcentrationLevel::Low => "Low",
            ConcentrationLevel::Medium => "Medium",
            ConcentrationLevel::High => "High",
            ConcentrationLevel::VeryHigh => "Very High",
        }
    }
}

/// Policy table for score and label derivation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Health scores below this are `Critical`.
    pub health_critical_below: f64,
    /// Health scores below this (and not critical) are `Warning`.
    pub health_warning_below: f64,

    /// Gini upper bounds for "Highly decentralized", "Moderately
    /// decentralized" and "Somewhat centralized"; anything above is
    /// "Highly centralized".
    pub interpretation_bounds: [f64; 3],

    /// Concentration upper bounds for "Low", "Medium" and "High"; anything
    /// above is "Very High".
    pub concentration_bounds: [f64; 3],

    /// Gini strictly above this is a medium risk.
    pub risk_gini_medium: f64,
    /// Gini strictly above this is a high risk.
    pub risk_gini_high: f64,
    /// Concentration strictly above this is a medium risk.
    pub risk_concentration_medium: f64,
    /// Concentration strictly above this is a high risk.
    pub risk_concentration_high: f64,

    /// Minimum scores for "Poor", "Fair", "Good" and "Excellent".
    pub score_level_floors: [f64; 4],
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Thresholds {
    pub const DEFAULT: Thresholds = Thresholds {
        health_critical_below: 50.0,
        health_warning_below: 75.0,
        interpretation_bounds: [0.3, 0.5, 0.7],
        concentration_bounds: [30.0, 60.0, 80.0],
        risk_gini_medium: 0.5,
        risk_gini_high: 0.7,
        risk_concentration_medium: 60.0,
        risk_concentration_high: 80.0,
        score_level_floors: [20.0, 40.0, 60.0, 80.0],
    };

    /// Classify a health or decentralization score.
    pub fn health_band(&self, score: f64) -> HealthBand {
        if score < self.health_critical_below {
            HealthBand::Critical
        } else if score < self.health_warning_below {
            HealthBand::Warning
        } else {
            HealthBand::Healthy
        }
    }

    pub fn decentralization_interpretation(&self, gini: f64) -> &'static str {
        let [high, moderate, somewhat] = self.interpretation_bounds;
        if gini < high {
            "Highly decentralized"
        } else if gini < moderate {
            "Moderately decentralized"
        } else if gini < somewhat {
            "Somewhat centralized"
        } else {
            "Highly centralized"
        }
    }

    pub fn concentration_level(&self, pct: f64) -> ConcentrationLevel {
        let [low, medium, high] = self.concentration_bounds;
        if pct < low {
            ConcentrationLevel::Low
        } else if pct < medium {
            ConcentrationLevel::Medium
        } else if pct < high {
            ConcentrationLevel::High
        } else {
            ConcentrationLevel::VeryHigh
        }
    }

    pub fn decentralization_risk(&self, gini: f64, pct: f64) -> &'static str {
        if gini > self.risk_gini_high || pct > self.risk_concentration_high {
            "High"
        } else if gini > self.risk_gini_medium || pct > self.risk_concentration_medium {
            "Medium"
        } else {
            "Low"
        }
    }

    pub fn score_level(&self, score: f64) -> &'static str {
        let [poor, fair, good, excellent] = self.score_level_floors;
        if score >= excellent {
            "Excellent"
        } else if score >= good {
            "Good"
        } else if score >= fair {
            "Fair"
        } else if score >= poor {
            "Poor"
        } else {
            "Critical"
        }
    }
}
