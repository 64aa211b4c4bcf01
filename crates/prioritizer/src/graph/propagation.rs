//! Topological priority propagation
//!
//! Depth-first memoized visit over the dependents relation. A requirement's
//! score is lifted to at least `dependent_margin` above the highest score among
//! the requirements that depend on it, so prerequisites always sort ahead of
//! the work they unblock.
//!
//! All traversal state lives in a [`PropagationRun`] built fresh for each
//! pass, so separate passes never share a cache.

use std::collections::HashSet;

use indexmap::IndexMap;

use super::index::DependencyIndex;
use crate::config::ScoringConfig;
use crate::scoring::intrinsic::intrinsic_score;

/// State of one propagation pass
pub struct PropagationRun<'a> {
    index: &'a DependencyIndex,
    config: &'a ScoringConfig,
    /// Memoized scores
    priorities: IndexMap<&'a str, f64>,
    /// Fully resolved ids
    visited: HashSet<&'a str>,
    /// Recursion-stack guard
    visiting: HashSet<&'a str>,
    cycles_detected: usize,
}

impl<'a> PropagationRun<'a> {
    pub fn new(index: &'a DependencyIndex, config: &'a ScoringConfig) -> Self {
        Self {
            index,
            config,
            priorities: IndexMap::with_capacity(index.len()),
            visited: HashSet::with_capacity(index.len()),
            visiting: HashSet::new(),
            cycles_detected: 0,
        }
    }

    /// Visit every record as a top-level call, in record-set order
    pub fn run(&mut self) -> &mut Self {
        let index = self.index;
        for id in index.ids() {
            self.visit(id);
        }

        tracing::debug!(
            requirements = self.priorities.len(),
            cycles = self.cycles_detected,
            "Priority propagation finished"
        );
        self
    }

    /// Propagated score of `id`, computing it (and everything that depends on
    /// it) on first use.
    ///
    /// Re-entering a node that is still on the stack returns the fallback
    /// score for that edge without memoizing it. Which edge of a cycle gets
    /// the fallback depends on visit order.
    pub fn visit(&mut self, id: &str) -> f64 {
        if self.visiting.contains(id) {
            self.cycles_detected += 1;
            tracing::warn!(
                requirement_id = %id,
                "Circular dependency detected, using fallback score"
            );
            return self.config.fallback_score;
        }

        if self.visited.contains(id) {
            return self.priorities[id];
        }

        let index = self.index;
        let Some(record) = index.get(id) else {
            tracing::warn!(
                requirement_id = %id,
                "Requirement not found during propagation, using fallback score"
            );
            return self.config.fallback_score;
        };
        let id = record.id.as_str();

        self.visiting.insert(id);

        let base = intrinsic_score(record);
        let max_dependent = index
            .dependents(id)
            .iter()
            .fold(0.0_f64, |max, dependent| max.max(self.visit(dependent)));

        let mut score = if max_dependent == 0.0 {
            base
        } else {
            base.max(max_dependent + self.config.dependent_margin)
        };
        score = score.min(self.config.max_score);

        self.visiting.remove(id);
        self.visited.insert(id);
        self.priorities.insert(id, score);
        score
    }

    /// Memoized score, if `id` has been visited
    pub fn score(&self, id: &str) -> Option<f64> {
        self.priorities.get(id).copied()
    }

    pub fn is_visited(&self, id: &str) -> bool {
        self.visited.contains(id)
    }

    /// Scores in the order visits finished
    pub fn scores(&self) -> &IndexMap<&'a str, f64> {
        &self.priorities
    }

    pub fn index(&self) -> &'a DependencyIndex {
        self.index
    }

    pub fn config(&self) -> &'a ScoringConfig {
        self.config
    }

    /// Number of cyclic edges hit so far
    pub fn cycles_detected(&self) -> usize {
        self.cycles_detected
    }
}
