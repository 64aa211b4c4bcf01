//! Dependency index over a requirement set
//!
//! Stores the records keyed by id in their original order and precomputes the
//! inverse of the dependency relation so that `dependents(id)` is a single
//! lookup.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::requirement::RequirementRecord;

/// Whether every dependency of a record resolves to a satisfied record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyStatus {
    pub satisfied: bool,
    /// Dependency ids that are unknown or not yet satisfied, in declaration order
    pub pending: Vec<String>,
}

impl DependencyStatus {
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

/// The requirement set plus its dependents-of lookup
#[derive(Debug, Clone, Default)]
pub struct DependencyIndex {
    records: IndexMap<String, RequirementRecord>,
    dependents: IndexMap<String, Vec<String>>,
}

impl DependencyIndex {
    /// Build the index. Records with an empty id are dropped and the first
    /// record wins when ids collide.
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RequirementRecord>,
    {
        let mut by_id: IndexMap<String, RequirementRecord> = IndexMap::new();

        for record in records {
            if record.id.trim().is_empty() {
                tracing::debug!("Skipping requirement without an id");
                continue;
            }
            if by_id.contains_key(&record.id) {
                tracing::warn!(requirement_id = %record.id, "Duplicate requirement id, keeping the first");
                continue;
            }
            by_id.insert(record.id.clone(), record);
        }

        let mut dependents: IndexMap<String, Vec<String>> = IndexMap::new();
        for record in by_id.values() {
            for dep in record.dependency_ids() {
                let entry = dependents.entry(dep.to_string()).or_default();
                if !entry.iter().any(|d| d == &record.id) {
                    entry.push(record.id.clone());
                }
            }
        }

        Self {
            records: by_id,
            dependents,
        }
    }

    /// Get a record by id
    pub fn get(&self, id: &str) -> Option<&RequirementRecord> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    /// All records in their original order
    pub fn records(&self) -> impl Iterator<Item = &RequirementRecord> {
        self.records.values()
    }

    /// All ids in their original order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Ids of the records that list `id` among their dependencies
    pub fn dependents(&self, id: &str) -> &[String] {
        self.dependents.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Resolve every dependency of `record` against the set.
    /// Unknown ids are pending rather than errors.
    pub fn dependency_status(&self, record: &RequirementRecord) -> DependencyStatus {
        let pending: Vec<String> = record
            .dependency_ids()
            .filter(|dep| !self.get(dep).is_some_and(RequirementRecord::is_satisfied))
            .map(str::to_string)
            .collect();

        DependencyStatus {
            satisfied: pending.is_empty(),
            pending,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of dependency edges between known records
    pub fn edge_count(&self) -> usize {
        self.dependents
            .iter()
            .filter(|(id, _)| self.contains(id))
            .map(|(_, ds)| ds.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DependencyIndex {
        DependencyIndex::build(vec![
            RequirementRecord::new("A").with_status("Implemented"),
            RequirementRecord::new("B").with_dependencies(["A"]),
            RequirementRecord::new("C").with_dependencies(["A", "B", "GHOST"]),
            RequirementRecord::new("D").with_dependencies(["A", "A"]),
        ])
    }

    #[test]
    fn test_dependents_inverse_edges() {
        let index = sample();
        assert_eq!(index.dependents("A"), ["B", "C", "D"]);
        assert_eq!(index.dependents("B"), ["C"]);
        assert!(index.dependents("C").is_empty());
        assert!(index.dependents("NOPE").is_empty());
        assert_eq!(index.edge_count(), 4);
    }

    #[test]
    fn test_dependency_status() {
        let index = sample();

        let b = index.dependency_status(index.get("B").unwrap());
        assert!(b.satisfied);
        assert!(b.pending.is_empty());

        let c = index.dependency_status(index.get("C").unwrap());
        assert!(!c.satisfied);
        assert_eq!(c.pending, vec!["B", "GHOST"]);
        assert_eq!(c.pending_count(), 2);
    }

    #[test]
    fn test_records_without_id_and_duplicates() {
        let index = DependencyIndex::build(vec![
            RequirementRecord::new(""),
            RequirementRecord::new("A").with_status("Draft"),
            RequirementRecord::new("A").with_status("Implemented"),
        ]);

        assert_eq!(index.len(), 1);
        assert_eq!(index.get("A").unwrap().status, "Draft");
    }

    #[test]
    fn test_sentinel_dependency_is_satisfied() {
        let index = DependencyIndex::build(vec![RequirementRecord::new("A").with_dependencies([""])]);
        let status = index.dependency_status(index.get("A").unwrap());
        assert!(status.satisfied);
    }
}
