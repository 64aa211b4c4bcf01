//! Validation mode
//!
//! Compares persisted priorities against a fresh run and flags critical work
//! that is still waiting on its prerequisites.

use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::graph::index::DependencyIndex;
use crate::report::PriorityAssignment;
use crate::scoring::tier::PriorityTier;

/// What a validation issue is about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ValidationIssueKind {
    /// Persisted score is missing or differs from the fresh score beyond the tolerance
    ScoreDrift {
        persisted: Option<f64>,
        computed: f64,
    },
    /// Critical tier while dependencies are still pending
    CriticalBlocked { pending: Vec<String> },
}

/// Severity levels for validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IssueSeverity {
    /// Stale data, fixed by re-running the update
    Warning,
    /// Planning problem that needs a person to look at it
    Error,
}

/// A single validation finding
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub requirement_id: String,
    pub severity: IssueSeverity,
    pub kind: ValidationIssueKind,
    pub message: String,
    pub suggested_fix: Option<String>,
}

/// Outcome of a validation pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub checked: usize,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Check all assignments of a run against the records they came from
    pub fn check<'a, I>(index: &DependencyIndex, assignments: I, config: &ScoringConfig) -> Self
    where
        I: IntoIterator<Item = &'a PriorityAssignment>,
    {
        let mut issues = Vec::new();
        let mut checked = 0;

        for assignment in assignments {
            checked += 1;
            if let Some(issue) = check_drift(index, assignment, config) {
                issues.push(issue);
            }
            if let Some(issue) = check_critical_blocked(assignment) {
                issues.push(issue);
            }
        }

        if !issues.is_empty() {
            tracing::info!(issues = issues.len(), "Priority validation found issues");
        }

        Self { checked, issues }
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn drift_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| matches!(i.kind, ValidationIssueKind::ScoreDrift { .. }))
            .count()
    }

    pub fn critical_blocked_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| matches!(i.kind, ValidationIssueKind::CriticalBlocked { .. }))
            .count()
    }
}

fn check_drift(
    index: &DependencyIndex,
    assignment: &PriorityAssignment,
    config: &ScoringConfig,
) -> Option<ValidationIssue> {
    let persisted = index.get(&assignment.id)?.priority_score;
    let computed = assignment.rounded_score();

    let drifted = match persisted {
        Some(previous) => (previous - computed).abs() > config.drift_tolerance,
        None => true,
    };
    if !drifted {
        return None;
    }

    let message = match persisted {
        Some(previous) => format!(
            "{} has priorityScore {:.1} but computes to {:.1}",
            assignment.id, previous, computed
        ),
        None => format!(
            "{} has no priorityScore, computes to {:.1}",
            assignment.id, computed
        ),
    };

    Some(ValidationIssue {
        requirement_id: assignment.id.clone(),
        severity: IssueSeverity::Warning,
        kind: ValidationIssueKind::ScoreDrift { persisted, computed },
        message,
        suggested_fix: Some("Run the priority update to refresh persisted scores".to_string()),
    })
}

fn check_critical_blocked(assignment: &PriorityAssignment) -> Option<ValidationIssue> {
    if assignment.tier != PriorityTier::Critical || assignment.dependency_status.satisfied {
        return None;
    }

    let pending = assignment.dependency_status.pending.clone();
    Some(ValidationIssue {
        requirement_id: assignment.id.clone(),
        severity: IssueSeverity::Error,
        message: format!(
            "{} is Critical but waits on unmet dependencies: {}",
            assignment.id,
            pending.join(", ")
        ),
        kind: ValidationIssueKind::CriticalBlocked { pending },
        suggested_fix: Some("Complete or re-scope the pending dependencies first".to_string()),
    })
}
