//! Query types and result structures

use serde::{Serialize, Serializer};
use std::fmt;

/// Display name of the non-specific sentinel
pub const NON_SPECIFIC: &str = "Non-specific";

/// Ordering of material search results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchOrder {
    /// Material id ascending
    #[default]
    ById,
    /// Course, then material id; for callers grouping by course
    ByCourse,
}

/// A material matched by a search
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaterialRow {
    pub id: String,
    pub course: String,
    pub title: String,
}

impl fmt::Display for MaterialRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({})", self.id, self.title, self.course)
    }
}

/// A material in a prerequisite closure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prerequisite {
    pub id: String,
    pub title: String,
    pub course: String,
}

impl Prerequisite {
    /// `(id) title`
    pub fn display_line(&self) -> String {
        format!("({}) {}", self.id, self.title)
    }
}

/// One value a dimension can still take
///
/// `NonSpecific` sorts before every literal value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FacetValue {
    /// Some in-scope material has no value for the dimension
    NonSpecific,
    Value(String),
}

impl FacetValue {
    pub fn as_str(&self) -> &str {
        match self {
            FacetValue::NonSpecific => NON_SPECIFIC,
            FacetValue::Value(v) => v,
        }
    }
}

impl fmt::Display for FacetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FacetValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_specific_sorts_first() {
        let mut values = vec![
            FacetValue::Value("Python".into()),
            FacetValue::NonSpecific,
            FacetValue::Value("C++".into()),
        ];
        values.sort();
        assert_eq!(values[0], FacetValue::NonSpecific);
        assert_eq!(values[1].as_str(), "C++");
    }

    #[test]
    fn prerequisite_display_line() {
        let p = Prerequisite {
            id: "T1.2".into(),
            title: "Compilers".into(),
            course: "T1".into(),
        };
        assert_eq!(p.display_line(), "(T1.2) Compilers");
    }
}
