//! Priority tiers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::TierThresholds;
use crate::PrioritizerError;

/// Priority tier (human-readable)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PriorityTier {
    Critical,
    High,
    Medium,
    Low,
    Deferred,
}

impl PriorityTier {
    /// All tiers, most urgent first
    pub const ALL: [PriorityTier; 5] = [
        PriorityTier::Critical,
        PriorityTier::High,
        PriorityTier::Medium,
        PriorityTier::Low,
        PriorityTier::Deferred,
    ];

    /// Classify with the default thresholds
    pub fn from_score(score: f64) -> Self {
        Self::from_score_with(score, &TierThresholds::default())
    }

    /// Classify a score; lower bounds are inclusive and the first match wins
    pub fn from_score_with(score: f64, thresholds: &TierThresholds) -> Self {
        match score {
            s if s >= thresholds.critical => PriorityTier::Critical,
            s if s >= thresholds.high => PriorityTier::High,
            s if s >= thresholds.medium => PriorityTier::Medium,
            s if s >= thresholds.low => PriorityTier::Low,
            _ => PriorityTier::Deferred,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityTier::Critical => "Critical",
            PriorityTier::High => "High",
            PriorityTier::Medium => "Medium",
            PriorityTier::Low => "Low",
            PriorityTier::Deferred => "Deferred",
        }
    }
}

impl fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriorityTier {
    type Err = PrioritizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PriorityTier::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PrioritizerError::UnknownTier(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_from_score() {
        assert_eq!(PriorityTier::from_score(12.0), PriorityTier::Critical);
        assert_eq!(PriorityTier::from_score(8.5), PriorityTier::High);
        assert_eq!(PriorityTier::from_score(6.0), PriorityTier::Medium);
        assert_eq!(PriorityTier::from_score(4.0), PriorityTier::Low);
        assert_eq!(PriorityTier::from_score(2.0), PriorityTier::Deferred);
    }

    #[test]
    fn test_tier_boundaries_are_inclusive() {
        assert_eq!(PriorityTier::from_score(9.99), PriorityTier::High);
        assert_eq!(PriorityTier::from_score(10.0), PriorityTier::Critical);
        assert_eq!(PriorityTier::from_score(7.99), PriorityTier::Medium);
        assert_eq!(PriorityTier::from_score(8.0), PriorityTier::High);
        assert_eq!(PriorityTier::from_score(5.99), PriorityTier::Low);
        assert_eq!(PriorityTier::from_score(3.99), PriorityTier::Deferred);
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = TierThresholds {
            critical: 12.0,
            ..Default::default()
        };
        assert_eq!(PriorityTier::from_score_with(11.0, &thresholds), PriorityTier::High);
    }

    #[test]
    fn test_parse_tier_label() {
        assert_eq!("critical".parse::<PriorityTier>().unwrap(), PriorityTier::Critical);
        assert_eq!(" Deferred ".parse::<PriorityTier>().unwrap(), PriorityTier::Deferred);
        assert!("urgent".parse::<PriorityTier>().is_err());
    }
}
