//! Facet enumeration: the values a dimension can still take

use super::criteria::Criteria;
use super::filter::Filter;
use super::types::FacetValue;
use crate::graph::Dimension;
use crate::storage::{Constraint, StorageResult, TripleStore};
use std::collections::BTreeSet;

/// Query for the distinct values of one dimension under a filter
#[derive(Debug, Clone)]
pub struct FacetQuery {
    /// Dimension to enumerate
    pub dimension: Dimension,
    /// Filter narrowing the materials considered
    pub filter: Filter,
}

impl FacetQuery {
    /// Enumerate a dimension across all materials
    pub fn of(dimension: Dimension) -> Self {
        Self {
            dimension,
            filter: Filter::none(),
        }
    }

    /// Restrict to materials matching the criteria
    pub fn filtered_by(mut self, criteria: &Criteria) -> Self {
        self.filter = Filter::build(criteria);
        self
    }

    /// Execute against a store
    ///
    /// Values present on matching materials, ascending, preceded by the
    /// non-specific sentinel when some matching material has no value.
    pub fn execute(&self, store: &dyn TripleStore) -> StorageResult<Vec<FacetValue>> {
        let predicate = self.dimension.predicate();
        let base = self.filter.to_pattern();

        let values: BTreeSet<String> = store
            .match_rows(&base.clone().bind(predicate))?
            .into_iter()
            .filter_map(|row| row.value)
            .collect();

        let lacking = store.exists(&base.with(Constraint::absent(predicate)))?;

        tracing::debug!(
            dimension = %self.dimension,
            constraints = self.filter.constraints().len(),
            values = values.len(),
            lacking,
            "facet enumerated"
        );

        let mut result = Vec::with_capacity(values.len() + 1);
        if lacking {
            result.push(FacetValue::NonSpecific);
        }
        result.extend(values.into_iter().map(FacetValue::Value));
        Ok(result)
    }
}
