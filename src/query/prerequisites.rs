//! Prerequisite closure over the "requires" relation

use super::types::Prerequisite;
use crate::graph::{course_of, Predicate};
use crate::storage::{Pattern, StorageResult, TripleStore};
use std::collections::{BTreeMap, BTreeSet, HashSet, VecDeque};

/// Adjacency of the "requires" relation, built once at load time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrerequisiteIndex {
    requires: BTreeMap<String, BTreeSet<String>>,
}

impl PrerequisiteIndex {
    /// Build the index from every prerequisite fact in the store
    pub fn build(store: &dyn TripleStore) -> StorageResult<Self> {
        let rows = store.match_rows(&Pattern::new().bind(Predicate::Prerequisite))?;

        let mut index = Self::default();
        for row in rows {
            if let Some(target) = row.value {
                index.add_edge(row.subject, target);
            }
        }

        tracing::debug!(
            materials = index.requires.len(),
            edges = index.edge_count(),
            "prerequisite index built"
        );
        Ok(index)
    }

    /// Record that `material` requires `prerequisite`
    pub fn add_edge(&mut self, material: impl Into<String>, prerequisite: impl Into<String>) {
        self.requires
            .entry(material.into())
            .or_default()
            .insert(prerequisite.into());
    }

    /// Direct prerequisites of a material
    pub fn direct(&self, material: &str) -> impl Iterator<Item = &str> {
        self.requires
            .get(material)
            .into_iter()
            .flat_map(|targets| targets.iter().map(String::as_str))
    }

    pub fn edge_count(&self) -> usize {
        self.requires.values().map(BTreeSet::len).sum()
    }

    /// Ids transitively required by `start`, excluding `start`, ascending
    ///
    /// Breadth-first with a visited set: every node is expanded at most
    /// once, so diamonds and cycles terminate.
    pub fn closure(&self, start: &str) -> BTreeSet<String> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            for next in self.direct(current) {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        visited
            .into_iter()
            .filter(|id| *id != start)
            .map(str::to_string)
            .collect()
    }
}

/// Query for the prerequisite closure of one material
#[derive(Debug, Clone)]
pub struct PrerequisiteQuery {
    /// Starting material id
    pub origin: String,
}

impl PrerequisiteQuery {
    pub fn of(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
        }
    }

    /// Execute against an index and the store it was built from
    ///
    /// Ids reached only as dependency targets (no title in the store) are
    /// walked through but not reported. An unknown origin yields an empty
    /// closure.
    pub fn execute(
        &self,
        index: &PrerequisiteIndex,
        store: &dyn TripleStore,
    ) -> StorageResult<Vec<Prerequisite>> {
        let closure = index.closure(&self.origin);

        let mut result = Vec::with_capacity(closure.len());
        for id in closure {
            let Some(title) = store.objects(&id, Predicate::Label)?.into_iter().next() else {
                tracing::debug!(material = %id, "prerequisite has no material node");
                continue;
            };
            let course = store
                .objects(&id, Predicate::ForCourse)?
                .into_iter()
                .next()
                .unwrap_or_else(|| course_of(&id).to_string());
            result.push(Prerequisite { id, title, course });
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Triple;
    use crate::storage::MemoryStore;

    fn index(edges: &[(&str, &str)]) -> PrerequisiteIndex {
        let mut index = PrerequisiteIndex::default();
        for (from, to) in edges {
            index.add_edge(*from, *to);
        }
        index
    }

    fn ids(closure: &BTreeSet<String>) -> Vec<&str> {
        closure.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_chain() {
        let idx = index(&[("A", "B"), ("B", "C"), ("C", "D")]);
        assert_eq!(ids(&idx.closure("A")), vec!["B", "C", "D"]);
        assert_eq!(ids(&idx.closure("C")), vec!["D"]);
    }

    #[test]
    fn test_diamond_visits_shared_node_once() {
        //   A -> B -> D
        //    \-> C -/
        let idx = index(&[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")]);
        assert_eq!(ids(&idx.closure("A")), vec!["B", "C", "D"]);
    }

    #[test]
    fn test_cycle_terminates_and_excludes_start() {
        let idx = index(&[("A", "B"), ("B", "C"), ("C", "A")]);
        assert_eq!(ids(&idx.closure("A")), vec!["B", "C"]);
        assert_eq!(ids(&idx.closure("B")), vec!["A", "C"]);
    }

    #[test]
    fn test_self_loop() {
        let idx = index(&[("A", "A")]);
        assert!(idx.closure("A").is_empty());
    }

    #[test]
    fn test_unknown_origin_is_empty() {
        let idx = index(&[("A", "B")]);
        assert!(idx.closure("missing").is_empty());
    }

    #[test]
    fn test_build_from_store() {
        let store = MemoryStore::new();
        store
            .insert_all(&[
                Triple::new("T2.1", Predicate::Prerequisite, "T1.1"),
                Triple::new("T2.1", Predicate::Prerequisite, "T1.2"),
                Triple::new("T1.2", Predicate::Prerequisite, "T1.1"),
                Triple::new("T1.1", Predicate::Label, "Variables"),
            ])
            .unwrap();
        let idx = PrerequisiteIndex::build(&store).unwrap();
        assert_eq!(idx.edge_count(), 3);
        assert_eq!(idx.direct("T2.1").collect::<Vec<_>>(), vec!["T1.1", "T1.2"]);
    }

    #[test]
    fn test_query_skips_untitled_targets() {
        let store = MemoryStore::new();
        store
            .insert_all(&[
                Triple::new("T2.1", Predicate::Prerequisite, "T1.1"),
                Triple::new("T2.1", Predicate::Prerequisite, "X9.9"),
                Triple::new("T1.1", Predicate::Label, "Variables"),
                Triple::new("T1.1", Predicate::ForCourse, "T1"),
            ])
            .unwrap();
        let idx = PrerequisiteIndex::build(&store).unwrap();
        let result = PrerequisiteQuery::of("T2.1").execute(&idx, &store).unwrap();
        assert_eq!(
            result,
            vec![Prerequisite {
                id: "T1.1".into(),
                title: "Variables".into(),
                course: "T1".into(),
            }]
        );
    }
}
