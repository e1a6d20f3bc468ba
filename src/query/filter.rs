//! Filter builder: criteria to typed store constraints

use super::criteria::{CriterionValue, Criteria};
use crate::graph::{Dimension, Predicate, MATERIAL_CLASS};
use crate::storage::{Constraint, Pattern};

/// Whether a dimension must carry a value or carry none
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Polarity {
    Equals(String),
    Absent,
}

/// One constraint per active dimension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionConstraint {
    pub dimension: Dimension,
    pub polarity: Polarity,
}

impl DimensionConstraint {
    /// Lower to a store constraint on the dimension's predicate
    pub fn to_constraint(&self) -> Constraint {
        let predicate = self.dimension.predicate();
        match &self.polarity {
            Polarity::Equals(value) => Constraint::equals(predicate, value.clone()),
            Polarity::Absent => Constraint::absent(predicate),
        }
    }
}

/// An AND-composed list of dimension constraints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    constraints: Vec<DimensionConstraint>,
}

impl Filter {
    /// A filter that matches every material
    pub fn none() -> Self {
        Self::default()
    }

    /// Build from criteria; inactive dimensions produce no constraint.
    pub fn build(criteria: &Criteria) -> Self {
        let constraints = criteria
            .active()
            .map(|(dimension, value)| DimensionConstraint {
                dimension,
                polarity: match value {
                    CriterionValue::Literal(v) if !v.trim().is_empty() => Polarity::Equals(v.clone()),
                    _ => Polarity::Absent,
                },
            })
            .collect();
        Self { constraints }
    }

    pub fn constraints(&self) -> &[DimensionConstraint] {
        &self.constraints
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Pattern over material subjects satisfying this filter
    pub fn to_pattern(&self) -> Pattern {
        Pattern::new()
            .with(Constraint::equals(Predicate::Type, MATERIAL_CLASS))
            .with_all(self.constraints.iter().map(DimensionConstraint::to_constraint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_criteria_build_empty_filter() {
        let filter = Filter::build(&Criteria::new());
        assert!(filter.is_empty());
        assert_eq!(filter.to_pattern().constraints.len(), 1);
    }

    #[test]
    fn literal_and_non_specific_polarities() {
        let criteria = Criteria::new()
            .with(Dimension::Age, "8-10")
            .with_non_specific(Dimension::Language);
        let filter = Filter::build(&criteria);

        assert_eq!(
            filter.constraints(),
            &[
                DimensionConstraint {
                    dimension: Dimension::Age,
                    polarity: Polarity::Equals("8-10".into()),
                },
                DimensionConstraint {
                    dimension: Dimension::Language,
                    polarity: Polarity::Absent,
                },
            ]
        );
    }

    #[test]
    fn pattern_targets_dimension_predicates() {
        let criteria = Criteria::new()
            .with(Dimension::Concept, "Loops")
            .with_non_specific(Dimension::Education);
        let pattern = Filter::build(&criteria).to_pattern();

        assert_eq!(
            pattern.constraints,
            vec![
                Constraint::equals(Predicate::Type, MATERIAL_CLASS),
                Constraint::equals(Predicate::Teaches, "Loops"),
                Constraint::absent(Predicate::EducationalLevel),
            ]
        );
        assert_eq!(pattern.bind, None);
    }

    #[test]
    fn inactive_dimensions_are_omitted() {
        let filter = Filter::build(&Criteria::new().with(Dimension::Topic, "Programming"));
        assert_eq!(filter.constraints().len(), 1);
        assert_eq!(filter.constraints()[0].dimension, Dimension::Topic);
    }
}
