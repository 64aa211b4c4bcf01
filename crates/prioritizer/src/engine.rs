//! Priority engine - one full scoring pass over a requirement set

use indexmap::IndexMap;

use crate::config::ScoringConfig;
use crate::graph::{depth::DepthCalculator, index::DependencyIndex, propagation::PropagationRun};
use crate::report::{sort_by_score, Indicators, PriorityAssignment, PrioritySummary};
use crate::requirement::RequirementRecord;
use crate::scoring::{dynamic::dynamic_score, tier::PriorityTier};
use crate::validation::ValidationReport;
use crate::{PrioritizerError, Result};

/// Entry point for scoring a requirement set
#[derive(Debug, Clone, Default)]
pub struct PriorityEngine {
    config: ScoringConfig,
}

impl PriorityEngine {
    /// Create an engine, rejecting inconsistent configuration
    pub fn new(config: ScoringConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score every record. Each call builds its own index and traversal state.
    pub fn run<I>(&self, records: I) -> PriorityRun
    where
        I: IntoIterator<Item = RequirementRecord>,
    {
        let index = DependencyIndex::build(records);
        let (assignments, cycles_detected) = self.assign(&index);

        tracing::debug!(
            requirements = assignments.len(),
            dependencies = index.edge_count(),
            cycles = cycles_detected,
            "Scored requirement set"
        );

        PriorityRun {
            config: self.config.clone(),
            index,
            assignments,
            cycles_detected,
        }
    }

    fn assign(&self, index: &DependencyIndex) -> (IndexMap<String, PriorityAssignment>, usize) {
        let mut propagation = PropagationRun::new(index, &self.config);
        propagation.run();

        let depth = DepthCalculator::new(index);
        let mut assignments = IndexMap::with_capacity(index.len());

        for record in index.records() {
            let propagated = propagation.visit(&record.id);
            let score = dynamic_score(&mut propagation, record);
            let status = index.dependency_status(record);
            let tier = PriorityTier::from_score_with(score, &self.config.tiers);
            let record_depth = depth.depth(&record.id);

            let indicators = Indicators {
                foundational: record.foundational,
                blocking: record.blocking,
                safety_related: record.safety_related,
                depth: record_depth,
                pending: status.pending_count(),
            };

            assignments.insert(
                record.id.clone(),
                PriorityAssignment {
                    id: record.id.clone(),
                    title: record.title.clone(),
                    score,
                    propagated_score: propagated,
                    tier,
                    depth: record_depth,
                    dependency_status: status,
                    indicators,
                },
            );
        }

        (assignments, propagation.cycles_detected())
    }
}

/// Results of one scoring pass
#[derive(Debug, Clone)]
pub struct PriorityRun {
    config: ScoringConfig,
    index: DependencyIndex,
    assignments: IndexMap<String, PriorityAssignment>,
    cycles_detected: usize,
}

impl PriorityRun {
    /// Assignments in record-set order
    pub fn assignments(&self) -> impl Iterator<Item = &PriorityAssignment> {
        self.assignments.values()
    }

    pub fn get(&self, id: &str) -> Option<&PriorityAssignment> {
        self.assignments.get(id)
    }

    /// Like [`PriorityRun::get`], for callers that treat a miss as an error
    pub fn require(&self, id: &str) -> Result<&PriorityAssignment> {
        self.get(id)
            .ok_or_else(|| PrioritizerError::RecordNotFound(id.to_string()))
    }

    /// Assignments sorted by score, highest first
    pub fn ranked(&self) -> Vec<PriorityAssignment> {
        let mut ranked: Vec<PriorityAssignment> = self.assignments.values().cloned().collect();
        sort_by_score(&mut ranked);
        ranked
    }

    pub fn summary(&self) -> PrioritySummary {
        PrioritySummary::from_assignments(self.assignments.values())
    }

    pub fn validate(&self) -> ValidationReport {
        ValidationReport::check(&self.index, self.assignments.values(), &self.config)
    }

    /// The record an assignment was computed from
    pub fn record(&self, id: &str) -> Option<&RequirementRecord> {
        self.index.get(id)
    }

    pub fn index(&self) -> &DependencyIndex {
        &self.index
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn cycles_detected(&self) -> usize {
        self.cycles_detected
    }
}
