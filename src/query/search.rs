//! Material search

use super::criteria::Criteria;
use super::filter::Filter;
use super::types::{MaterialRow, SearchOrder};
use crate::graph::{course_of, Predicate};
use crate::storage::{StorageResult, TripleStore};

/// Query for materials matching a filter
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    pub filter: Filter,
    pub order: SearchOrder,
}

impl SearchQuery {
    /// Create a query matching every material
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a query from criteria
    pub fn matching(criteria: &Criteria) -> Self {
        Self {
            filter: Filter::build(criteria),
            order: SearchOrder::ById,
        }
    }

    /// Set the result ordering
    pub fn order(mut self, order: SearchOrder) -> Self {
        self.order = order;
        self
    }

    /// Execute against a store
    ///
    /// Materials without a title are skipped. The course falls back to the
    /// id prefix when no course fact is stored.
    pub fn execute(&self, store: &dyn TripleStore) -> StorageResult<Vec<MaterialRow>> {
        let subjects = store.match_rows(&self.filter.to_pattern())?;

        let mut rows = Vec::with_capacity(subjects.len());
        for row in subjects {
            let Some(title) = store.objects(&row.subject, Predicate::Label)?.into_iter().next() else {
                continue;
            };
            let course = store
                .objects(&row.subject, Predicate::ForCourse)?
                .into_iter()
                .next()
                .unwrap_or_else(|| course_of(&row.subject).to_string());
            rows.push(MaterialRow {
                id: row.subject,
                course,
                title,
            });
        }

        // Store rows arrive ordered by subject, which is ById
        if self.order == SearchOrder::ByCourse {
            rows.sort_by(|a, b| a.course.cmp(&b.course).then_with(|| a.id.cmp(&b.id)));
        }

        tracing::debug!(
            constraints = self.filter.constraints().len(),
            matches = rows.len(),
            "material search"
        );
        Ok(rows)
    }
}
