//! Dependent-chain depth
//!
//! Length of the longest chain of transitive dependents hanging off a
//! requirement. Display-only: it feeds the indicator string, never the score.

use std::collections::HashSet;

use super::index::DependencyIndex;

/// Computes dependent-chain depth with a fresh cycle guard per call
pub struct DepthCalculator<'a> {
    index: &'a DependencyIndex,
}

impl<'a> DepthCalculator<'a> {
    pub fn new(index: &'a DependencyIndex) -> Self {
        Self { index }
    }

    /// 0 when nothing depends on `id`, otherwise one more than the deepest dependent
    pub fn depth(&self, id: &str) -> usize {
        let mut visited = HashSet::new();
        self.depth_from(id, &mut visited)
    }

    fn depth_from<'s>(&'s self, id: &'s str, visited: &mut HashSet<&'s str>) -> usize {
        // A node seen earlier in this traversal adds nothing
        if !visited.insert(id) {
            return 0;
        }

        let dependents = self.index.dependents(id);
        if dependents.is_empty() {
            return 0;
        }

        let deepest = dependents
            .iter()
            .map(|dependent| self.depth_from(dependent, visited))
            .max()
            .unwrap_or(0);

        1 + deepest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirement::RequirementRecord;

    #[test]
    fn test_depth_of_chain() {
        let index = DependencyIndex::build(vec![
            RequirementRecord::new("A"),
            RequirementRecord::new("B").with_dependencies(["A"]),
            RequirementRecord::new("C").with_dependencies(["B"]),
            RequirementRecord::new("D").with_dependencies(["A"]),
        ]);
        let calc = DepthCalculator::new(&index);

        assert_eq!(calc.depth("A"), 2);
        assert_eq!(calc.depth("B"), 1);
        assert_eq!(calc.depth("C"), 0);
        assert_eq!(calc.depth("D"), 0);
        assert_eq!(calc.depth("UNKNOWN"), 0);
    }

    #[test]
    fn test_depth_terminates_on_cycle() {
        let index = DependencyIndex::build(vec![
            RequirementRecord::new("A").with_dependencies(["B"]),
            RequirementRecord::new("B").with_dependencies(["A"]),
        ]);
        let calc = DepthCalculator::new(&index);

        // A -> B -> A (already visited, contributes 0)
        assert_eq!(calc.depth("A"), 2);
        assert_eq!(calc.depth("B"), 2);
    }

    #[test]
    fn test_visited_set_is_fresh_per_call() {
        let index = DependencyIndex::build(vec![
            RequirementRecord::new("A"),
            RequirementRecord::new("B").with_dependencies(["A"]),
        ]);
        let calc = DepthCalculator::new(&index);

        assert_eq!(calc.depth("A"), 1);
        assert_eq!(calc.depth("A"), 1);
    }
}
