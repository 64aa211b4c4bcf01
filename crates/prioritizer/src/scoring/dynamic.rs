//! Dynamic priority
//!
//! Propagated score minus a penalty for every dependency that is still
//! pending. The floor keeps a blocked requirement out of the Deferred tier.

use crate::config::ScoringConfig;
use crate::graph::propagation::PropagationRun;
use crate::requirement::RequirementRecord;

/// Propagated score of `record` with the unmet-dependency penalty applied
pub fn dynamic_score(run: &mut PropagationRun<'_>, record: &RequirementRecord) -> f64 {
    let propagated = run.visit(&record.id);
    let status = run.index().dependency_status(record);
    apply_unmet_penalty(propagated, status.pending_count(), run.config())
}

/// `max(floor, propagated - min(pending * penalty, propagated - floor))`;
/// a record with nothing pending keeps its propagated score.
pub fn apply_unmet_penalty(propagated: f64, pending: usize, config: &ScoringConfig) -> f64 {
    if pending == 0 {
        return propagated;
    }

    let penalty = (pending as f64 * config.pending_penalty).min(propagated - config.score_floor);
    (propagated - penalty).max(config.score_floor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::index::DependencyIndex;

    #[test]
    fn test_no_pending_keeps_score() {
        let config = ScoringConfig::default();
        assert_eq!(apply_unmet_penalty(7.5, 0, &config), 7.5);
    }

    #[test]
    fn test_penalty_per_pending_dependency() {
        let config = ScoringConfig::default();
        assert_eq!(apply_unmet_penalty(12.0, 1, &config), 10.0);
        assert_eq!(apply_unmet_penalty(12.0, 3, &config), 6.0);
    }

    #[test]
    fn test_floor_holds_with_many_pending() {
        let config = ScoringConfig::default();
        assert_eq!(apply_unmet_penalty(6.0, 5, &config), 4.0);
        assert_eq!(apply_unmet_penalty(15.0, 100, &config), 4.0);
    }

    #[test]
    fn test_low_propagated_score_lifts_to_floor() {
        let config = ScoringConfig::default();
        // penalty = min(2, -1) = -1, so 3.0 - (-1) = 4.0
        assert_eq!(apply_unmet_penalty(3.0, 1, &config), 4.0);
    }

    #[test]
    fn test_dynamic_score_with_missing_dependency() {
        let index = DependencyIndex::build(vec![
            RequirementRecord::new("A").with_status("Implemented"),
            RequirementRecord::new("B")
                .with_dependencies(["A", "GHOST"])
                .with_safety_related(true)
                .with_foundational(true)
                .with_blocking(true),
        ]);
        let config = ScoringConfig::default();
        let mut run = PropagationRun::new(&index, &config);

        let b = index.get("B").unwrap().clone();
        // propagated 8.0, one pending (GHOST) -> 6.0
        assert_eq!(dynamic_score(&mut run, &b), 6.0);

        let a = index.get("A").unwrap().clone();
        // A is lifted to 8.5 and has nothing pending
        assert_eq!(dynamic_score(&mut run, &a), 8.5);
    }
}
