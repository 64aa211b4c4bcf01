//! Requirement record model

use serde::{Deserialize, Deserializer, Serialize};

/// Statuses that count as satisfied for dependency checks and scoring
pub const SATISFIED_STATUSES: [&str; 2] = ["Implemented", "Completed"];

/// A single tracked requirement as read from its frontmatter
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementRecord {
    /// Unique identifier; records with an empty id are never scored
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Ids that must be satisfied before this requirement
    #[serde(default, deserialize_with = "one_or_many")]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub foundational: bool,
    #[serde(default)]
    pub blocking: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hierarchy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub safety_related: bool,
    #[serde(default, deserialize_with = "one_or_many")]
    pub compliance_standards: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<String>,
    #[serde(default)]
    pub validation_required: bool,
    /// Tier label persisted by a previous run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// Score persisted by a previous run, only used for drift detection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_score: Option<f64>,
}

impl RequirementRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_foundational(mut self, foundational: bool) -> Self {
        self.foundational = foundational;
        self
    }

    pub fn with_blocking(mut self, blocking: bool) -> Self {
        self.blocking = blocking;
        self
    }

    pub fn with_hierarchy(mut self, hierarchy: impl Into<String>) -> Self {
        self.hierarchy = Some(hierarchy.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_safety_related(mut self, safety_related: bool) -> Self {
        self.safety_related = safety_related;
        self
    }

    pub fn with_compliance_standards<I, S>(mut self, standards: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.compliance_standards = standards.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_risk_level(mut self, risk_level: impl Into<String>) -> Self {
        self.risk_level = Some(risk_level.into());
        self
    }

    pub fn with_validation_required(mut self, validation_required: bool) -> Self {
        self.validation_required = validation_required;
        self
    }

    pub fn with_priority_score(mut self, score: f64) -> Self {
        self.priority_score = Some(score);
        self
    }

    /// Non-empty dependency ids, in declaration order
    pub fn dependency_ids(&self) -> impl Iterator<Item = &str> {
        self.dependencies
            .iter()
            .map(|d| d.trim())
            .filter(|d| !d.is_empty())
    }

    /// Whether the status is `Implemented` or `Completed`
    pub fn is_satisfied(&self) -> bool {
        SATISFIED_STATUSES.contains(&self.status.as_str())
    }

    pub fn has_risk_level(&self, level: &str) -> bool {
        self.risk_level.as_deref() == Some(level)
    }

    pub fn has_compliance_standard(&self, standard: &str) -> bool {
        self.compliance_standards.iter().any(|s| s == standard)
    }

    /// Title if present, otherwise the id
    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.id)
    }
}

/// Frontmatter sometimes carries a bare string where a list is expected
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<Option<String>>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(items)) => items.into_iter().flatten().collect(),
    })
}
