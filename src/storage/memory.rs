//! In-memory triple store

use super::traits::{Constraint, Pattern, Row, StorageResult, TripleStore};
use crate::graph::{Predicate, Triple};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{PoisonError, RwLock};

type Facts = BTreeMap<Predicate, BTreeSet<String>>;

/// Triple store held in ordered maps: subject -> predicate -> objects
///
/// Ordered maps give the (subject, value) row order for free.
#[derive(Debug, Default)]
pub struct MemoryStore {
    subjects: RwLock<BTreeMap<String, Facts>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn satisfies(facts: &Facts, constraint: &Constraint) -> bool {
        match constraint {
            Constraint::Equals { predicate, object } => facts
                .get(predicate)
                .is_some_and(|objects| objects.contains(object)),
            Constraint::Absent { predicate } => facts
                .get(predicate)
                .map_or(true, |objects| objects.is_empty()),
        }
    }

    fn matches(facts: &Facts, pattern: &Pattern) -> bool {
        pattern.constraints.iter().all(|c| Self::satisfies(facts, c))
    }
}

impl TripleStore for MemoryStore {
    fn insert(&self, triple: &Triple) -> StorageResult<bool> {
        let mut subjects = self.subjects.write().unwrap_or_else(PoisonError::into_inner);
        Ok(subjects
            .entry(triple.subject.clone())
            .or_default()
            .entry(triple.predicate)
            .or_default()
            .insert(triple.object.clone()))
    }

    fn match_rows(&self, pattern: &Pattern) -> StorageResult<Vec<Row>> {
        let subjects = self.subjects.read().unwrap_or_else(PoisonError::into_inner);
        let mut rows = Vec::new();

        for (subject, facts) in subjects.iter() {
            if !Self::matches(facts, pattern) {
                continue;
            }
            match pattern.bind {
                None => rows.push(Row {
                    subject: subject.clone(),
                    value: None,
                }),
                Some(predicate) => {
                    for object in facts.get(&predicate).into_iter().flatten() {
                        rows.push(Row {
                            subject: subject.clone(),
                            value: Some(object.clone()),
                        });
                    }
                }
            }
        }

        Ok(rows)
    }

    fn exists(&self, pattern: &Pattern) -> StorageResult<bool> {
        let subjects = self.subjects.read().unwrap_or_else(PoisonError::into_inner);
        Ok(subjects.values().any(|facts| {
            Self::matches(facts, pattern)
                && pattern
                    .bind
                    .map_or(true, |p| facts.get(&p).is_some_and(|o| !o.is_empty()))
        }))
    }

    fn objects(&self, subject: &str, predicate: Predicate) -> StorageResult<Vec<String>> {
        let subjects = self.subjects.read().unwrap_or_else(PoisonError::into_inner);
        Ok(subjects
            .get(subject)
            .and_then(|facts| facts.get(&predicate))
            .map(|objects| objects.iter().cloned().collect())
            .unwrap_or_default())
    }

    fn len(&self) -> StorageResult<usize> {
        let subjects = self.subjects.read().unwrap_or_else(PoisonError::into_inner);
        Ok(subjects
            .values()
            .flat_map(|facts| facts.values())
            .map(BTreeSet::len)
            .sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .insert_all(&[
                Triple::new("T1.1", Predicate::TypicalAgeRange, "8-10"),
                Triple::new("T1.1", Predicate::InLanguage, "Python"),
                Triple::new("T1.1", Predicate::InLanguage, "Scratch"),
                Triple::new("T1.2", Predicate::TypicalAgeRange, "8-10"),
                Triple::new("T1.3", Predicate::TypicalAgeRange, "11-14"),
            ])
            .unwrap();
        store
    }

    #[test]
    fn test_insert_is_set_semantics() {
        let store = MemoryStore::new();
        let triple = Triple::new("T1.1", Predicate::Label, "Intro");
        assert!(store.insert(&triple).unwrap());
        assert!(!store.insert(&triple).unwrap());
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_match_equals() {
        let store = create_test_store();
        let rows = store
            .match_rows(&Pattern::new().with(Constraint::equals(Predicate::TypicalAgeRange, "8-10")))
            .unwrap();
        let subjects: Vec<_> = rows.iter().map(|r| r.subject.as_str()).collect();
        assert_eq!(subjects, vec!["T1.1", "T1.2"]);
    }

    #[test]
    fn test_match_absent() {
        let store = create_test_store();
        let rows = store
            .match_rows(&Pattern::new().with(Constraint::absent(Predicate::InLanguage)))
            .unwrap();
        let subjects: Vec<_> = rows.iter().map(|r| r.subject.as_str()).collect();
        assert_eq!(subjects, vec!["T1.2", "T1.3"]);
    }

    #[test]
    fn test_match_binds_each_value() {
        let store = create_test_store();
        let rows = store
            .match_rows(&Pattern::new().bind(Predicate::InLanguage))
            .unwrap();
        let values: Vec<_> = rows.iter().filter_map(|r| r.value.as_deref()).collect();
        assert_eq!(values, vec!["Python", "Scratch"]);
    }

    #[test]
    fn test_exists() {
        let store = create_test_store();
        assert!(store
            .exists(&Pattern::new().with(Constraint::equals(Predicate::TypicalAgeRange, "11-14")))
            .unwrap());
        assert!(!store
            .exists(&Pattern::new().with(Constraint::equals(Predicate::TypicalAgeRange, "15-18")))
            .unwrap());
    }

    #[test]
    fn test_objects_sorted() {
        let store = create_test_store();
        assert_eq!(
            store.objects("T1.1", Predicate::InLanguage).unwrap(),
            vec!["Python".to_string(), "Scratch".to_string()]
        );
        assert!(store.objects("missing", Predicate::InLanguage).unwrap().is_empty());
    }
}
