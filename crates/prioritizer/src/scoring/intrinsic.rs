//! Intrinsic Scoring
//!
//! Base score of a requirement from its own attributes only.

use crate::requirement::RequirementRecord;

const BASE_SCORE: f64 = 5.0;
const SATISFIED_FLOOR: f64 = 2.0;
const PART_11: &str = "21-CFR-Part-11";

/// Score a record from its attributes, rounded to one decimal place.
///
/// Bonuses are applied in a fixed order; the completion reduction is applied
/// after the attribute bonuses and before the Draft/compliance/validation
/// adjustments.
pub fn intrinsic_score(record: &RequirementRecord) -> f64 {
    let mut score = BASE_SCORE;

    if record.foundational {
        score += 1.0;
    }
    if record.blocking {
        score += 1.0;
    }
    if record.hierarchy.as_deref() == Some("system-level") {
        score += 0.5;
    }
    if record.category.as_deref() == Some("infrastructure") {
        score += 0.5;
    }
    if record.safety_related {
        score += 1.0;
    }
    if !record.compliance_standards.is_empty() {
        score += 0.5;
    }

    if record.has_risk_level("Critical") {
        score += 0.5;
    } else if record.has_risk_level("High") {
        score += 0.3;
    }

    if record.is_satisfied() {
        score = (score - 1.0).max(SATISFIED_FLOOR);
    }

    if record.status == "Draft" && record.blocking {
        score += 0.3;
    }
    if record.has_compliance_standard(PART_11) {
        score += 0.5;
    }
    if record.validation_required && record.status != "Implemented" {
        score += 0.3;
    }

    round_one_decimal(score)
}

pub(crate) fn round_one_decimal(score: f64) -> f64 {
    (score * 10.0).round() / 10.0
}
