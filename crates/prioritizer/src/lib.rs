//! # Prioritizer - Dependency-aware requirement scoring
//!
//! Computes a numeric score and a priority tier for every requirement in a
//! requirements graph. A requirement always outranks the requirements that
//! depend on it, intrinsic attributes (risk, compliance, foundational status)
//! raise the base score, and unmet prerequisites pull the final score down.
//!
//! ## Pipeline
//!
//! - **Dependency Index**: dependents-of lookups and unmet-dependency checks
//! - **Intrinsic Scorer**: base score from a record's own attributes
//! - **Propagator**: memoized depth-first visit lifting each requirement above its dependents
//! - **Combiner**: unmet-dependency penalty on top of the propagated score
//! - **Classifier**: numeric score to `Critical | High | Medium | Low | Deferred`
//!
//! The engine performs no I/O. Records are handed in fully loaded and every
//! call to [`PriorityEngine::run`] builds its own traversal state.

pub mod config;
pub mod engine;
pub mod graph;
pub mod report;
pub mod requirement;
pub mod scoring;
pub mod validation;

pub use config::{ScoringConfig, TierThresholds};
pub use engine::{PriorityEngine, PriorityRun};
pub use graph::{
    depth::DepthCalculator,
    index::{DependencyIndex, DependencyStatus},
    propagation::PropagationRun,
};
pub use report::{Indicators, PriorityAssignment, PrioritySummary};
pub use requirement::RequirementRecord;
pub use scoring::{
    dynamic::dynamic_score,
    intrinsic::intrinsic_score,
    tier::PriorityTier,
};
pub use validation::{IssueSeverity, ValidationIssue, ValidationIssueKind, ValidationReport};

/// Main error types for prioritizer operations
#[derive(Debug, thiserror::Error)]
pub enum PrioritizerError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Requirement not found: {0}")]
    RecordNotFound(String),

    #[error("Unknown priority tier: {0}")]
    UnknownTier(String),
}

pub type Result<T> = std::result::Result<T, PrioritizerError>;
