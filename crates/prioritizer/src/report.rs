//! Priority assignments and aggregate summaries
//!
//! Output shapes handed to whatever renders or persists the results. Nothing
//! in here is read back by the scoring algorithm.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::graph::index::DependencyStatus;
use crate::scoring::{intrinsic::round_one_decimal, tier::PriorityTier};

/// Short presentational markers for one requirement
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Indicators {
    pub foundational: bool,
    pub blocking: bool,
    pub safety_related: bool,
    /// Longest chain of transitive dependents
    pub depth: usize,
    /// Number of dependencies not yet satisfied
    pub pending: usize,
}

impl Indicators {
    pub fn is_empty(&self) -> bool {
        !self.foundational && !self.blocking && !self.safety_related && self.depth == 0 && self.pending == 0
    }
}

impl fmt::Display for Indicators {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();

        if self.foundational {
            parts.push("🏗".to_string());
        }
        if self.blocking {
            parts.push("🚧".to_string());
        }
        if self.safety_related {
            parts.push("⚠".to_string());
        }
        if self.depth > 0 {
            parts.push(format!("↳{}", self.depth));
        }
        if self.pending > 0 {
            parts.push(format!("⏳{}", self.pending));
        }

        f.write_str(&parts.join(" "))
    }
}

/// Fresh priority of one requirement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityAssignment {
    pub id: String,
    pub title: Option<String>,
    /// Dynamic score (propagated minus the unmet-dependency penalty)
    pub score: f64,
    /// Score before the unmet-dependency penalty
    pub propagated_score: f64,
    pub tier: PriorityTier,
    pub depth: usize,
    pub dependency_status: DependencyStatus,
    pub indicators: Indicators,
}

impl PriorityAssignment {
    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }

    /// Score as persisted: one decimal place
    pub fn rounded_score(&self) -> f64 {
        round_one_decimal(self.score)
    }
}

/// Tier counts and tier-grouped, score-sorted assignments
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritySummary {
    pub total: usize,
    pub counts: IndexMap<PriorityTier, usize>,
    pub tiers: IndexMap<PriorityTier, Vec<PriorityAssignment>>,
    /// Requirements with at least one pending dependency
    pub blocked: usize,
}

impl PrioritySummary {
    pub fn from_assignments<'a, I>(assignments: I) -> Self
    where
        I: IntoIterator<Item = &'a PriorityAssignment>,
    {
        let mut tiers: IndexMap<PriorityTier, Vec<PriorityAssignment>> = PriorityTier::ALL
            .into_iter()
            .map(|tier| (tier, Vec::new()))
            .collect();

        let mut total = 0;
        let mut blocked = 0;
        for assignment in assignments {
            total += 1;
            if !assignment.dependency_status.satisfied {
                blocked += 1;
            }
            tiers
                .entry(assignment.tier)
                .or_default()
                .push(assignment.clone());
        }

        for group in tiers.values_mut() {
            sort_by_score(group);
        }

        let counts = tiers
            .iter()
            .map(|(tier, group)| (*tier, group.len()))
            .collect();

        Self {
            total,
            counts,
            tiers,
            blocked,
        }
    }

    pub fn count(&self, tier: PriorityTier) -> usize {
        self.counts.get(&tier).copied().unwrap_or(0)
    }

    pub fn in_tier(&self, tier: PriorityTier) -> &[PriorityAssignment] {
        self.tiers.get(&tier).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Score descending, ties broken by id ascending
pub fn sort_by_score(assignments: &mut [PriorityAssignment]) {
    assignments.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assignment(id: &str, score: f64, pending: usize) -> PriorityAssignment {
        PriorityAssignment {
            id: id.to_string(),
            title: None,
            score,
            propagated_score: score,
            tier: PriorityTier::from_score(score),
            depth: 0,
            dependency_status: DependencyStatus {
                satisfied: pending == 0,
                pending: (0..pending).map(|i| format!("DEP-{}", i)).collect(),
            },
            indicators: Indicators {
                pending,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_indicator_rendering() {
        let indicators = Indicators {
            foundational: true,
            blocking: false,
            safety_related: true,
            depth: 3,
            pending: 2,
        };
        assert_eq!(indicators.to_string(), "🏗 ⚠ ↳3 ⏳2");
        assert_eq!(Indicators::default().to_string(), "");
        assert!(Indicators::default().is_empty());
    }

    #[test]
    fn test_summary_groups_and_sorts() {
        let assignments = vec![
            assignment("B", 6.5, 0),
            assignment("A", 11.0, 0),
            assignment("C", 6.5, 1),
            assignment("D", 3.0, 0),
            assignment("E", 7.0, 0),
        ];
        let summary = PrioritySummary::from_assignments(&assignments);

        assert_eq!(summary.total, 5);
        assert_eq!(summary.blocked, 1);
        assert_eq!(summary.count(PriorityTier::Critical), 1);
        assert_eq!(summary.count(PriorityTier::High), 0);
        assert_eq!(summary.count(PriorityTier::Medium), 3);
        assert_eq!(summary.count(PriorityTier::Deferred), 1);

        let medium: Vec<&str> = summary
            .in_tier(PriorityTier::Medium)
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(medium, vec!["E", "B", "C"]);

        // Every tier is present, even when empty
        assert_eq!(summary.counts.len(), 5);
    }
}
