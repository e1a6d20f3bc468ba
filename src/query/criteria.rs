//! Search criteria: one optional value per dimension

use super::types::NON_SPECIFIC;
use crate::graph::Dimension;
use std::collections::BTreeMap;
use std::fmt;

/// Value of an active criterion
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CriterionValue {
    /// Materials carrying this literal value
    Literal(String),
    /// Materials with no value at all for the dimension
    NonSpecific,
}

impl CriterionValue {
    /// Parse user input. Empty input yields `None`; "non-specific" in any
    /// case yields the sentinel.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.eq_ignore_ascii_case(NON_SPECIFIC) {
            Some(CriterionValue::NonSpecific)
        } else {
            Some(CriterionValue::Literal(trimmed.to_string()))
        }
    }
}

impl fmt::Display for CriterionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CriterionValue::Literal(v) => f.write_str(v),
            CriterionValue::NonSpecific => f.write_str(NON_SPECIFIC),
        }
    }
}

/// Criteria for narrowing a material set
///
/// A dimension without an entry is not filtered on. Entries iterate in the
/// canonical dimension order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    values: BTreeMap<Dimension, CriterionValue>,
}

impl Criteria {
    /// Create empty criteria (matches every material)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a dimension from user input. Empty input is a no-op.
    pub fn set(&mut self, dimension: Dimension, input: &str) {
        if let Some(value) = CriterionValue::parse(input) {
            self.values.insert(dimension, value);
        }
    }

    /// Set a dimension to an already-typed value
    pub fn set_value(&mut self, dimension: Dimension, value: CriterionValue) {
        self.values.insert(dimension, value);
    }

    /// Stop filtering on a dimension
    pub fn unset(&mut self, dimension: Dimension) -> Option<CriterionValue> {
        self.values.remove(&dimension)
    }

    /// Builder form of [`Criteria::set`]
    pub fn with(mut self, dimension: Dimension, input: &str) -> Self {
        self.set(dimension, input);
        self
    }

    pub fn with_non_specific(mut self, dimension: Dimension) -> Self {
        self.set_value(dimension, CriterionValue::NonSpecific);
        self
    }

    pub fn get(&self, dimension: Dimension) -> Option<&CriterionValue> {
        self.values.get(&dimension)
    }

    pub fn is_set(&self, dimension: Dimension) -> bool {
        self.values.contains_key(&dimension)
    }

    /// Active dimensions with their values, in canonical order
    pub fn active(&self) -> impl Iterator<Item = (Dimension, &CriterionValue)> {
        self.values.iter().map(|(d, v)| (*d, v))
    }

    pub fn active_dimensions(&self) -> Vec<Dimension> {
        self.values.keys().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_a_no_op() {
        let mut criteria = Criteria::new().with(Dimension::Age, "8-10");
        criteria.set(Dimension::Age, "  ");
        criteria.set(Dimension::Topic, "");
        assert_eq!(
            criteria.get(Dimension::Age),
            Some(&CriterionValue::Literal("8-10".into()))
        );
        assert!(!criteria.is_set(Dimension::Topic));
    }

    #[test]
    fn non_specific_is_recognised_in_any_case() {
        let criteria = Criteria::new()
            .with(Dimension::Language, "non-specific")
            .with(Dimension::Concept, "NON-SPECIFIC");
        assert_eq!(criteria.get(Dimension::Language), Some(&CriterionValue::NonSpecific));
        assert_eq!(criteria.get(Dimension::Concept), Some(&CriterionValue::NonSpecific));
    }

    #[test]
    fn active_dimensions_follow_canonical_order() {
        let criteria = Criteria::new()
            .with(Dimension::Education, "all")
            .with(Dimension::Age, "8-10")
            .with_non_specific(Dimension::Language);
        assert_eq!(
            criteria.active_dimensions(),
            vec![Dimension::Age, Dimension::Language, Dimension::Education]
        );
    }

    #[test]
    fn unset_removes_the_filter() {
        let mut criteria = Criteria::new().with(Dimension::Topic, "Programming");
        assert!(criteria.unset(Dimension::Topic).is_some());
        assert!(criteria.is_empty());
    }
}
