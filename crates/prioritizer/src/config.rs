//! Configuration for the scoring engine

use serde::{Deserialize, Serialize};

use crate::{PrioritizerError, Result};

/// Lower bounds (inclusive) of each priority tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierThresholds {
    #[serde(default = "default_critical")]
    pub critical: f64,
    #[serde(default = "default_high")]
    pub high: f64,
    #[serde(default = "default_medium")]
    pub medium: f64,
    #[serde(default = "default_low")]
    pub low: f64,
}

fn default_critical() -> f64 {
    10.0
}

fn default_high() -> f64 {
    8.0
}

fn default_medium() -> f64 {
    6.0
}

fn default_low() -> f64 {
    4.0
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            critical: default_critical(),
            high: default_high(),
            medium: default_medium(),
            low: default_low(),
        }
    }
}

/// Core configuration for a scoring pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringConfig {
    /// Score returned for an edge that closes a cycle, or for a record missing from the run
    #[serde(default = "default_fallback_score")]
    pub fallback_score: f64,
    /// Upper bound of any propagated score
    #[serde(default = "default_max_score")]
    pub max_score: f64,
    /// How far a requirement is lifted above its highest-scoring dependent
    #[serde(default = "default_dependent_margin")]
    pub dependent_margin: f64,
    /// Penalty per pending dependency
    #[serde(default = "default_pending_penalty")]
    pub pending_penalty: f64,
    /// Unmet dependencies never push a score below this
    #[serde(default = "default_score_floor")]
    pub score_floor: f64,
    /// Allowed difference between a persisted and a fresh score
    #[serde(default = "default_drift_tolerance")]
    pub drift_tolerance: f64,
    /// Tier boundaries
    #[serde(default)]
    pub tiers: TierThresholds,
}

fn default_fallback_score() -> f64 {
    5.0
}

fn default_max_score() -> f64 {
    15.0
}

fn default_dependent_margin() -> f64 {
    0.5
}

fn default_pending_penalty() -> f64 {
    2.0
}

fn default_score_floor() -> f64 {
    4.0
}

fn default_drift_tolerance() -> f64 {
    0.1
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            fallback_score: default_fallback_score(),
            max_score: default_max_score(),
            dependent_margin: default_dependent_margin(),
            pending_penalty: default_pending_penalty(),
            score_floor: default_score_floor(),
            drift_tolerance: default_drift_tolerance(),
            tiers: TierThresholds::default(),
        }
    }
}

impl ScoringConfig {
    /// Reject configurations that would break tier ordering or the score range
    pub fn validate(&self) -> Result<()> {
        let t = &self.tiers;
        if !(t.critical > t.high && t.high > t.medium && t.medium > t.low) {
            return Err(PrioritizerError::ConfigError(format!(
                "tier thresholds must be strictly descending, got critical={} high={} medium={} low={}",
                t.critical, t.high, t.medium, t.low
            )));
        }

        if self.max_score < self.score_floor {
            return Err(PrioritizerError::ConfigError(format!(
                "maxScore ({}) is below scoreFloor ({})",
                self.max_score, self.score_floor
            )));
        }

        if self.dependent_margin < 0.0 {
            return Err(PrioritizerError::ConfigError(format!(
                "dependentMargin must be non-negative, got {}",
                self.dependent_margin
            )));
        }

        if self.pending_penalty < 0.0 || self.drift_tolerance < 0.0 {
            return Err(PrioritizerError::ConfigError(
                "pendingPenalty and driftTolerance must be non-negative".to_string(),
            ));
        }

        Ok(())
    }
}
