//! Learning path planning: the closure minus what is already known

use super::prerequisites::{PrerequisiteIndex, PrerequisiteQuery};
use super::types::Prerequisite;
use crate::storage::{StorageResult, TripleStore};
use std::collections::BTreeSet;

/// Query for the remaining study sequence towards a material
#[derive(Debug, Clone)]
pub struct PathQuery {
    /// Target material id
    pub target: String,
    /// Ids the learner already knows
    pub known: BTreeSet<String>,
}

/// Remaining materials to study, ascending by id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LearningPath {
    pub target: String,
    pub steps: Vec<Prerequisite>,
}

impl PathQuery {
    pub fn to(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            known: BTreeSet::new(),
        }
    }

    /// Exclude materials the learner already knows
    pub fn already_known<I, S>(mut self, known: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.known.extend(known.into_iter().map(Into::into));
        self
    }

    pub fn execute(
        &self,
        index: &PrerequisiteIndex,
        store: &dyn TripleStore,
    ) -> StorageResult<LearningPath> {
        let closure = PrerequisiteQuery::of(self.target.clone()).execute(index, store)?;
        let steps: Vec<Prerequisite> = closure
            .into_iter()
            .filter(|p| !self.known.contains(&p.id))
            .collect();

        tracing::debug!(
            target = %self.target,
            known = self.known.len(),
            remaining = steps.len(),
            "learning path planned"
        );
        Ok(LearningPath {
            target: self.target.clone(),
            steps,
        })
    }
}

impl LearningPath {
    /// `(id) title` per remaining material
    pub fn display_lines(&self) -> Vec<String> {
        self.steps.iter().map(Prerequisite::display_line).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Predicate, Triple};
    use crate::storage::MemoryStore;

    fn create_test_graph() -> (MemoryStore, PrerequisiteIndex) {
        let store = MemoryStore::new();
        store
            .insert_all(&[
                Triple::new("T1.1", Predicate::Label, "Variables"),
                Triple::new("T1.2", Predicate::Label, "Conditions"),
                Triple::new("T1.3", Predicate::Label, "Loops"),
                Triple::new("T1.3", Predicate::Prerequisite, "T1.2"),
                Triple::new("T1.2", Predicate::Prerequisite, "T1.1"),
            ])
            .unwrap();
        let index = PrerequisiteIndex::build(&store).unwrap();
        (store, index)
    }

    #[test]
    fn test_nothing_known_is_full_closure() {
        let (store, index) = create_test_graph();
        let path = PathQuery::to("T1.3").execute(&index, &store).unwrap();
        assert_eq!(path.display_lines(), vec!["(T1.1) Variables", "(T1.2) Conditions"]);
    }

    #[test]
    fn test_known_materials_are_removed() {
        let (store, index) = create_test_graph();
        let path = PathQuery::to("T1.3")
            .already_known(["T1.1"])
            .execute(&index, &store)
            .unwrap();
        assert_eq!(path.display_lines(), vec!["(T1.2) Conditions"]);
    }

    #[test]
    fn test_knowing_the_target_has_no_effect() {
        let (store, index) = create_test_graph();
        let path = PathQuery::to("T1.3")
            .already_known(["T1.3"])
            .execute(&index, &store)
            .unwrap();
        assert_eq!(path.steps.len(), 2);
    }

    #[test]
    fn test_unknown_target_is_empty() {
        let (store, index) = create_test_graph();
        let path = PathQuery::to("Z1.1").execute(&index, &store).unwrap();
        assert!(path.is_empty());
    }
}
